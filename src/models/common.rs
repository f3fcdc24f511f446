//! Shared value objects: metadata, addresses, coordinates, config bags

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Creation/update/deletion provenance attached to every persisted
/// entity. Soft deletion populates `deleted_at`/`deleted_by`; the two
/// travel together, though the pairing is a documented invariant rather
/// than an enforced one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    /// Identity provider user ID
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Identity provider user ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
}

/// Postal address of a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street address
    pub street: String,
    pub zipcode: String,
    pub city: String,
}

/// Coordinate reference systems in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crs {
    #[serde(rename = "WGS84")]
    Wgs84,
    /// Swedish national grid (RT90 2.5 gon V)
    #[serde(rename = "EPSG:3021")]
    Epsg3021,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub crs: Crs,
    pub x: f64,
    pub y: f64,
}

/// A single value of a dynamic config bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigScalar {
    Bool(bool),
    Number(f64),
    String(String),
}

/// Dynamic key/value config attached to devices
pub type ConfigMap = BTreeMap<String, ConfigScalar>;

contract!(Metadata => "Metadata");
contract!(Address => "Address");
contract!(Coordinate => "Coordinate");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_scalar_round_trip() {
        let map: ConfigMap = serde_json::from_value(json!({
            "brightness": 80,
            "kiosk_mode": true,
            "theme": "dark"
        }))
        .unwrap();
        assert_eq!(map["kiosk_mode"], ConfigScalar::Bool(true));
        assert_eq!(map["brightness"], ConfigScalar::Number(80.0));
        assert_eq!(map["theme"], ConfigScalar::String("dark".to_string()));

        let back = serde_json::to_value(&map).unwrap();
        assert_eq!(back["theme"], json!("dark"));
    }

    #[test]
    fn test_crs_wire_values() {
        assert_eq!(serde_json::to_value(Crs::Wgs84).unwrap(), json!("WGS84"));
        assert_eq!(serde_json::to_value(Crs::Epsg3021).unwrap(), json!("EPSG:3021"));
    }
}
