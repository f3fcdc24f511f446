//! GeoJSON shapes
//!
//! Standard position/geometry/feature hierarchy used by the location
//! map endpoints. Registered unchanged in every snapshot.

use crate::error::Result;
use crate::registry::ShapeRegistry;
use crate::shape::{Field, TaggedUnion, TypeExpr};

pub(crate) fn install(reg: &mut ShapeRegistry) -> Result<()> {
    let n = TypeExpr::Number;

    // Positions and bounding boxes come in 2D and 3D flavors.
    reg.define(
        "Position",
        TypeExpr::OneOf(vec![
            TypeExpr::Tuple(vec![n.clone(), n.clone()]),
            TypeExpr::Tuple(vec![n.clone(), n.clone(), n.clone()]),
        ]),
    )?;
    reg.define(
        "BBox",
        TypeExpr::OneOf(vec![
            TypeExpr::Tuple(vec![n.clone(), n.clone(), n.clone(), n.clone()]),
            TypeExpr::Tuple(vec![n.clone(), n.clone(), n.clone(), n.clone(), n.clone(), n]),
        ]),
    )?;

    let position = || TypeExpr::reference("Position");

    reg.define(
        "Point",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("Point")),
            Field::required("coordinates", position()),
        ]),
    )?;
    reg.define(
        "MultiPoint",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("MultiPoint")),
            Field::required("coordinates", TypeExpr::array(position())),
        ]),
    )?;
    reg.define(
        "LineString",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("LineString")),
            Field::required("coordinates", TypeExpr::array(position())),
        ]),
    )?;
    reg.define(
        "MultiLineString",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("MultiLineString")),
            Field::required("coordinates", TypeExpr::array(TypeExpr::array(position()))),
        ]),
    )?;
    reg.define(
        "Polygon",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("Polygon")),
            Field::required("coordinates", TypeExpr::array(TypeExpr::array(position()))),
        ]),
    )?;
    reg.define(
        "MultiPolygon",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("MultiPolygon")),
            Field::required(
                "coordinates",
                TypeExpr::array(TypeExpr::array(TypeExpr::array(position()))),
            ),
        ]),
    )?;

    reg.define(
        "Geometry",
        TypeExpr::Union(
            TaggedUnion::new("type")
                .variant("Point", TypeExpr::reference("Point"))
                .variant("MultiPoint", TypeExpr::reference("MultiPoint"))
                .variant("LineString", TypeExpr::reference("LineString"))
                .variant("MultiLineString", TypeExpr::reference("MultiLineString"))
                .variant("Polygon", TypeExpr::reference("Polygon"))
                .variant("MultiPolygon", TypeExpr::reference("MultiPolygon")),
        ),
    )?;

    reg.define(
        "GeometryCollection",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("GeometryCollection")),
            Field::required("geometries", TypeExpr::array(TypeExpr::reference("Geometry"))),
        ]),
    )?;

    // Free-form properties bag; the whole bag may be null.
    reg.define(
        "GeoProperties",
        TypeExpr::OneOf(vec![TypeExpr::map(TypeExpr::Json), TypeExpr::Null]),
    )?;

    reg.define(
        "Feature",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("Feature")),
            Field::required("geometry", TypeExpr::reference("Geometry")),
            Field::optional("id", TypeExpr::OneOf(vec![TypeExpr::String, TypeExpr::Number])),
            Field::required("properties", TypeExpr::reference("GeoProperties")),
        ]),
    )?;

    reg.define(
        "FeatureCollection",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("FeatureCollection")),
            Field::required("features", TypeExpr::array(TypeExpr::reference("Feature"))),
        ]),
    )?;

    Ok(())
}
