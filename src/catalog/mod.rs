//! The contract catalog
//!
//! Each submodule is a full snapshot of the domain model at one point in
//! time. Snapshots are append-only history: `v1` is kept exactly as it
//! shipped so historical payloads stay checkable, `v2` is the current
//! contract surface. [`Catalog`] builds the snapshot registry, finalizes
//! it and hands out validators over it.

pub mod geo;
pub mod v1;
pub mod v2;

use serde_json::Value;

use crate::error::Result;
use crate::registry::{RegistryManifest, ShapeRegistry};
use crate::shape::{Field, Shape, TaggedUnion, TypeExpr};
use crate::validate::{Contract, ValidationReport, Validator, ValidatorOptions};
use crate::version::ContractVersion;

/// A built, sealed snapshot of the contract catalog
pub struct Catalog {
    registry: ShapeRegistry,
}

impl Catalog {
    /// The first shipped snapshot
    pub fn v1() -> Result<Self> {
        Self::build("1.0.0", v1::install)
    }

    /// The current snapshot
    pub fn v2() -> Result<Self> {
        Self::build("2.0.0", v2::install)
    }

    /// The latest snapshot
    pub fn latest() -> Result<Self> {
        Self::v2()
    }

    fn build(version: &str, install: fn(&mut ShapeRegistry) -> Result<()>) -> Result<Self> {
        let mut registry = ShapeRegistry::new(ContractVersion::parse(version)?);
        install(&mut registry)?;
        geo::install(&mut registry)?;
        registry.finalize()?;
        Ok(Self { registry })
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn version(&self) -> &ContractVersion {
        self.registry.version()
    }

    /// A validator with default options
    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.registry)
    }

    /// A validator with explicit options
    pub fn validator_with(&self, options: ValidatorOptions) -> Validator<'_> {
        Validator::with_options(&self.registry, options)
    }

    /// Validate a value against a named shape of this snapshot
    pub fn validate(
        &self,
        shape: &str,
        value: &Value,
    ) -> Result<std::result::Result<(), ValidationReport>> {
        self.validator().validate_named(shape, value)
    }

    /// Validate and decode a value into its typed model
    pub fn decode<T: Contract>(
        &self,
        value: &Value,
    ) -> Result<std::result::Result<T, ValidationReport>> {
        self.validator().decode(value)
    }

    /// Manifest of the sealed snapshot
    pub fn manifest(&self) -> Result<RegistryManifest> {
        self.registry.manifest()
    }
}

/// A lifecycle event with no payload: `{ "type": <literal> }`
pub(crate) fn event(literal: &str) -> Shape {
    Shape::new(vec![Field::required("type", TypeExpr::literal(literal))])
}

/// A lifecycle event wrapping a payload: `{ "type": <literal>, "data": ... }`
pub(crate) fn event_with(literal: &str, data: TypeExpr) -> Shape {
    Shape::new(vec![
        Field::required("type", TypeExpr::literal(literal)),
        Field::required("data", data),
    ])
}

/// Intersect an envelope prefix (parent id, entity identity) with a
/// closed set of event variants, distributing the prefix over every
/// variant so each one stays a plain object shape.
pub(crate) fn tagged_envelope(tag: &str, prefix: &Shape, variants: &[(&str, Shape)]) -> TypeExpr {
    let mut union = TaggedUnion::new(tag);
    for (literal, shape) in variants {
        union = union.variant(*literal, TypeExpr::Object(prefix.merge(shape)));
    }
    TypeExpr::Union(union)
}
