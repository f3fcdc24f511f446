//! External pages embedded on location displays

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Metadata;

/// Icons a display can show next to an embedded page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddedUrlIcon {
    Booking,
    Info,
    Menu,
    Other,
}

/// Fields a client supplies for an embedded URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedUrlRequest {
    pub name: String,
    pub url: String,
    pub location_ids: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<EmbeddedUrlIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_to: Option<DateTime<Utc>>,
}

/// A persisted embedded URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedUrl {
    pub id: Uuid,
    pub organization_id: String,
    pub meta: Metadata,
    pub name: String,
    pub url: String,
    pub location_ids: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<EmbeddedUrlIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedUrlLinkEventData {
    pub embedded_url_id: Uuid,
}

contract!(EmbeddedUrlIcon => "EmbeddedUrlIcon");
contract!(EmbeddedUrlRequest => "EmbeddedUrlRequest");
contract!(EmbeddedUrl => "EmbeddedUrl");
