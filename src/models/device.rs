//! Display devices and their lifecycle events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{ConfigMap, Metadata};
use super::location::Location;

/// Device hardware platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Eloview,
}

/// Device lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Created,
    Installed,
    Decommissioned,
}

/// Last known connectivity of a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub hardware_online: bool,
    pub software_online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Fields a client may change on a device
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<DateTime<Utc>>,
}

/// The server-known device record as written to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDbRequest {
    /// Name of the device
    pub name: String,
    pub hardware_id: String,
    /// Provider's ID for this device
    pub source_id: String,
    pub organization_id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub state: DeviceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<DateTime<Utc>>,
}

/// A persisted device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub organization_id: String,
    pub meta: Metadata,
    /// Name of the device
    pub name: String,
    pub hardware_id: String,
    /// Provider's ID for this device
    pub source_id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub state: DeviceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigMap>,
}

/// Fields a client supplies when installing a device at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInstallationRequest {
    pub location_id: Uuid,
    /// Specific place within the location where the device is installed
    pub placement: String,
}

/// Query parameters for the device event listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceEventQueryParams {
    /// DeviceEvent ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Device for which to retrieve events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Organization for which to retrieve events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Start of time range for which to retrieve events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<DateTime<Utc>>,
    /// End of time range for which to retrieve events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<DateTime<Utc>>,
    /// Offset into query results to start returning from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatusChangeEventData {
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInstallationEventData {
    pub location: Location,
}

/// Everything that can happen to a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DeviceEventKind {
    Creation,
    Reboot,
    StatusChangeSoftware { data: DeviceStatusChangeEventData },
    StatusChangeHardware { data: DeviceStatusChangeEventData },
    Installation { data: DeviceInstallationEventData },
    Uninstall,
    FactoryReset,
}

/// A device event as submitted to the event bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEventRequest {
    pub device_id: String,
    #[serde(flatten)]
    pub event: DeviceEventKind,
}

/// A persisted device event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEventRecord {
    pub id: String,
    pub organization_id: String,
    pub meta: Metadata,
    pub device_id: String,
    #[serde(flatten)]
    pub event: DeviceEventKind,
}

contract!(DeviceType => "DeviceType");
contract!(DeviceState => "DeviceState");
contract!(DeviceStatus => "DeviceStatus");
contract!(DeviceRequest => "DeviceRequest");
contract!(DeviceDbRequest => "DeviceDbRequest");
contract!(Device => "Device");
contract!(DeviceInstallationRequest => "DeviceInstallationRequest");
contract!(DeviceEventQueryParams => "DeviceEventQueryParams");
contract!(DeviceEventRequest => "DeviceEventRequest");
contract!(DeviceEventRecord => "DeviceEvent");
