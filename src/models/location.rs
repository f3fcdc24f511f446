//! Locations (properties) and their event stream

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::announcement::AnnouncementLinkEventData;
use super::attachment::AttachmentLinkEventData;
use super::common::{Coordinate, Metadata};
use super::embedded_url::EmbeddedUrlLinkEventData;
use super::unit::UnitRequest;

/// Fields a client supplies for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRequest {
    /// Street address
    pub street: String,
    pub zipcode: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

/// Location request plus the synchronization source id the server tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDbRequest {
    pub street: String,
    pub zipcode: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// A persisted location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub organization_id: String,
    pub meta: Metadata,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDeviceEventData {
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantMovedEventData {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFloorEventData {
    pub floor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationServiceEventData {
    pub name: String,
}

/// Everything that can happen to a location.
///
/// The largest union in the contract surface; the event bus fans these
/// out to the displays of the affected location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationEventKind {
    DeviceInstalled { data: LocationDeviceEventData },
    DeviceUninstalled { data: LocationDeviceEventData },
    LocationCreated { data: LocationRequest },
    LocationUpdated { data: LocationRequest },
    LocationDeleted,
    UnitCreated { data: UnitRequest },
    UnitUpdated { data: UnitRequest },
    UnitDeleted,
    AnnouncementLinked { data: AnnouncementLinkEventData },
    AnnouncementUnlinked { data: AnnouncementLinkEventData },
    AttachmentLinked { data: AttachmentLinkEventData },
    AttachmentUnlinked { data: AttachmentLinkEventData },
    EmbeddedUrlLinked { data: EmbeddedUrlLinkEventData },
    EmbeddedUrlUnlinked { data: EmbeddedUrlLinkEventData },
    TenantMovedIn { data: TenantMovedEventData },
    TenantMovedOut { data: TenantMovedEventData },
    FloorAdded { data: LocationFloorEventData },
    FloorRemoved { data: LocationFloorEventData },
    ServiceOpened { data: LocationServiceEventData },
    ServiceUpdated { data: LocationServiceEventData },
    ServiceClosed { data: LocationServiceEventData },
}

/// A location event as submitted to the event bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEventRequest {
    pub location_id: Uuid,
    #[serde(flatten)]
    pub event: LocationEventKind,
}

/// A persisted location event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEventRecord {
    pub id: String,
    pub organization_id: String,
    pub meta: Metadata,
    pub location_id: Uuid,
    #[serde(flatten)]
    pub event: LocationEventKind,
}

contract!(LocationRequest => "LocationRequest");
contract!(LocationDbRequest => "LocationDbRequest");
contract!(Location => "Location");
contract!(LocationEventRequest => "LocationEventRequest");
contract!(LocationEventRecord => "LocationEvent");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_kind_wire_tags() {
        let event = LocationEventKind::TenantMovedIn {
            data: TenantMovedEventData {
                name: "Anna Ek".to_string(),
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], json!("tenant_moved_in"));
        assert_eq!(value["data"]["name"], json!("Anna Ek"));
    }

    #[test]
    fn test_envelope_flattens_event() {
        let request: LocationEventRequest = serde_json::from_value(json!({
            "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
            "type": "location_deleted"
        }))
        .unwrap();
        assert!(matches!(request.event, LocationEventKind::LocationDeleted));
    }
}
