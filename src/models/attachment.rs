//! Document attachments shown on location displays

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Metadata;

/// Document categories; exact wire values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentCategory {
    EnergyDeclarationOvk,
    PropertyInfo,
    RestaurantMenu,
    Other,
}

/// Metadata supplied alongside an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentUploadMetadata {
    pub category: AttachmentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_to: Option<DateTime<Utc>>,
}

/// The patchable subset of an attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPatchRequest {
    pub category: AttachmentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_to: Option<DateTime<Utc>>,
    pub name: String,
    pub location_ids: Vec<Uuid>,
}

/// Everything the server stores about an uploaded attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentRequest {
    pub category: AttachmentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_to: Option<DateTime<Utc>>,
    pub name: String,
    pub location_ids: Vec<Uuid>,
    pub content_hash: String,
    pub mime_type: String,
}

/// A persisted attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub organization_id: String,
    pub meta: Metadata,
    pub category: AttachmentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_to: Option<DateTime<Utc>>,
    pub name: String,
    pub location_ids: Vec<Uuid>,
    pub content_hash: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentLinkEventData {
    pub attachment_id: Uuid,
}

contract!(AttachmentCategory => "AttachmentCategory");
contract!(AttachmentUploadMetadata => "AttachmentUploadMetadata");
contract!(AttachmentPatchRequest => "AttachmentPatchRequest");
contract!(AttachmentRequest => "AttachmentRequest");
contract!(Attachment => "Attachment");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_wire_values() {
        assert_eq!(
            serde_json::to_value(AttachmentCategory::EnergyDeclarationOvk).unwrap(),
            json!("energy-declaration-ovk")
        );
        assert_eq!(
            serde_json::to_value(AttachmentCategory::RestaurantMenu).unwrap(),
            json!("restaurant-menu")
        );
    }
}
