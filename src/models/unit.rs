//! Units (apartments) and their tenants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Metadata;

/// The closed set of tenant kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tenant {
    Individual {
        id: Uuid,
        first_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        last_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active_from: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active_to: Option<DateTime<Utc>>,
    },
    Company {
        id: Uuid,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        contact_email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active_from: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active_to: Option<DateTime<Utc>>,
    },
}

/// Fields a client supplies for a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRequest {
    pub location_id: Uuid,
    pub unit: String,
    pub floor: f64,
    pub tenants: Vec<Tenant>,
}

/// Unit request plus the synchronization source id the server tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDbRequest {
    pub location_id: Uuid,
    pub unit: String,
    pub floor: f64,
    pub tenants: Vec<Tenant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// A persisted unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub organization_id: String,
    pub meta: Metadata,
    pub location_id: Uuid,
    pub unit: String,
    pub floor: f64,
    pub tenants: Vec<Tenant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// The subset of a unit shown on public displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUnit {
    pub unit: String,
}

contract!(Tenant => "Tenant");
contract!(UnitRequest => "UnitRequest");
contract!(UnitDbRequest => "UnitDbRequest");
contract!(Unit => "Unit");
contract!(PublicUnit => "PublicUnit");
