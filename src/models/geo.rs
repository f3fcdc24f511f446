//! GeoJSON models for the location map endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A 2D or 3D position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    D2([f64; 2]),
    D3([f64; 3]),
}

/// A 2D or 3D bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BBox {
    D2([f64; 4]),
    D3([f64; 6]),
}

/// The closed set of geometry kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

/// Marker for the fixed `"type": "GeometryCollection"` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryCollectionType {
    GeometryCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    #[serde(rename = "type")]
    pub collection_type: GeometryCollectionType,
    pub geometries: Vec<Geometry>,
}

/// A feature id may be a string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Number(f64),
}

/// Marker for the fixed `"type": "Feature"` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    Feature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    /// Present on every feature, but the whole bag may be null.
    pub properties: Option<BTreeMap<String, Value>>,
}

/// Marker for the fixed `"type": "FeatureCollection"` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: FeatureCollectionType,
    pub features: Vec<Feature>,
}

contract!(Position => "Position");
contract!(BBox => "BBox");
contract!(Geometry => "Geometry");
contract!(GeometryCollection => "GeometryCollection");
contract!(Feature => "Feature");
contract!(FeatureCollection => "FeatureCollection");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_dispatches_on_type() {
        let geometry: Geometry = serde_json::from_value(json!({
            "type": "Point",
            "coordinates": [18.0686, 59.3293]
        }))
        .unwrap();
        match geometry {
            Geometry::Point { coordinates } => {
                assert_eq!(coordinates, Position::D2([18.0686, 59.3293]));
            }
            other => panic!("Expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_properties_may_be_null() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [18.0686, 59.3293, 12.0] },
            "properties": null
        }))
        .unwrap();
        assert!(feature.properties.is_none());
        assert!(feature.id.is_none());
    }
}
