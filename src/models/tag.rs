//! IoT tags: name tags on apartment doors, booking tags on shared resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tag presenting the resident names of one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameTag {
    pub id: String,
    pub organization_id: String,
    pub last_gateway_id: String,
    pub last_heartbeat_at: DateTime<Utc>,
    pub location_id: Uuid,
    pub unit: String,
}

/// One booked interval shown on a booking tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingTagCalendar {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// What a booking tag shows next: an open slot or the upcoming booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NextBookingSlot {
    Free,
    Event { from: DateTime<Utc>, to: DateTime<Utc> },
}

/// A tag presenting the booking calendar of a shared resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingTag {
    pub id: String,
    pub organization_id: String,
    pub last_gateway_id: String,
    pub last_heartbeat_at: DateTime<Utc>,
    pub resource_id: String,
    pub calendar: Vec<BookingTagCalendar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<NextBookingSlot>,
}

/// The closed set of tag kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tag {
    #[serde(rename = "nametag")]
    Name(NameTag),
    #[serde(rename = "bookingtag")]
    Booking(BookingTag),
}

/// Fields a client supplies when installing a name tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameTagInstallationRequest {
    pub location_id: Uuid,
    pub unit: String,
}

contract!(Tag => "Tag");
contract!(NameTag => "NameTag");
contract!(BookingTag => "BookingTag");
contract!(BookingTagCalendar => "BookingTagCalendar");
contract!(NameTagInstallationRequest => "NameTagInstallationRequest");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_union_dispatches_on_type() {
        let value = json!({
            "type": "nametag",
            "id": "tag-1",
            "organization_id": "org-1",
            "last_gateway_id": "gw-9",
            "last_heartbeat_at": "2024-03-01T10:15:00Z",
            "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
            "unit": "1203"
        });
        let tag: Tag = serde_json::from_value(value).unwrap();
        match tag {
            Tag::Name(name_tag) => assert_eq!(name_tag.unit, "1203"),
            other => panic!("Expected name tag, got {:?}", other),
        }
    }

    #[test]
    fn test_next_booking_slot_wire_encoding() {
        let free = serde_json::to_value(NextBookingSlot::Free).unwrap();
        assert_eq!(free, json!({ "type": "free" }));

        let event: NextBookingSlot = serde_json::from_value(json!({
            "type": "event",
            "from": "2024-03-01T10:00:00Z",
            "to": "2024-03-01T11:00:00Z"
        }))
        .unwrap();
        assert!(matches!(event, NextBookingSlot::Event { .. }));
    }
}
