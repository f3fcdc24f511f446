//! Shape registry
//!
//! A registry holds every named shape of one contract snapshot. It is
//! built once at startup — `define` each shape, then `finalize` — and is
//! read-only afterwards. Finalization resolves named references through
//! the dependency graph, fingerprints each shape and seals the registry;
//! defining into a sealed registry is a definition-time error.

use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::checksum::Checksum;
use crate::error::{Result, SchemaError};
use crate::graph::ShapeGraph;
use crate::shape::{ShapeKind, TypeExpr};
use crate::version::ContractVersion;

/// A named shape with its fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeEntry {
    pub name: String,
    pub expr: TypeExpr,
    /// SHA256 of the canonical shape encoding
    pub checksum: Checksum,
}

impl ShapeEntry {
    fn new(name: impl Into<String>, expr: TypeExpr) -> Self {
        let checksum = Checksum::from_canonical(&expr);
        Self {
            name: name.into(),
            expr,
            checksum,
        }
    }
}

/// The shape registry for one contract snapshot
pub struct ShapeRegistry {
    version: ContractVersion,
    shapes: HashMap<String, ShapeEntry>,
    /// Definition order, for stable manifests and exports
    order: Vec<String>,
    sealed: bool,
}

impl ShapeRegistry {
    /// Create an empty registry for a snapshot version
    pub fn new(version: ContractVersion) -> Self {
        Self {
            version,
            shapes: HashMap::new(),
            order: Vec::new(),
            sealed: false,
        }
    }

    pub fn version(&self) -> &ContractVersion {
        &self.version
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Shape names in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Entries in definition order
    pub fn entries(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.order.iter().map(|name| &self.shapes[name])
    }

    /// Define a named shape.
    ///
    /// Fails on duplicate names, on structural misuse (duplicate union
    /// discriminants, non-object variants) and once the registry is
    /// sealed.
    pub fn define(&mut self, name: &str, expr: TypeExpr) -> Result<()> {
        if self.sealed {
            return Err(SchemaError::Sealed {
                version: self.version.tag_string(),
                name: name.to_string(),
            });
        }
        if self.shapes.contains_key(name) {
            return Err(SchemaError::AlreadyDefined {
                name: name.to_string(),
            });
        }
        expr.check_definition()?;

        trace!(shape = name, "defined shape");
        self.shapes.insert(name.to_string(), ShapeEntry::new(name, expr));
        self.order.push(name.to_string());
        Ok(())
    }

    /// Resolve references, verify union variants, and seal the registry.
    pub fn finalize(&mut self) -> Result<()> {
        let graph = self.graph();

        if let Some((from, reference)) = graph.unresolved().into_iter().next() {
            return Err(SchemaError::UnresolvedReference { from, reference });
        }

        // Union variants declared as references must resolve to objects.
        for entry in self.entries() {
            self.check_variant_targets(&entry.expr)?;
        }

        let recursive = graph.recursive_groups();
        debug!(
            version = %self.version,
            shapes = self.order.len(),
            recursive_groups = recursive.len(),
            "finalized shape registry"
        );
        for group in &recursive {
            trace!(shapes = ?group, "recursive shape group");
        }

        self.sealed = true;
        Ok(())
    }

    /// Look up a shape; unknown names come back with a fuzzy suggestion.
    pub fn get(&self, name: &str) -> Result<&ShapeEntry> {
        self.shapes.get(name).ok_or_else(|| SchemaError::NotFound {
            name: name.to_string(),
            suggestion: self.suggest(name),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Best fuzzy match for a (possibly misspelled) shape name
    pub fn suggest(&self, name: &str) -> Option<String> {
        let matcher = SkimMatcherV2::default();
        self.order
            .iter()
            .filter_map(|candidate| {
                matcher
                    .fuzzy_match(candidate, name)
                    .map(|score| (score, candidate))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, candidate)| candidate.clone())
    }

    /// Dependency graph over the current definitions
    pub fn graph(&self) -> ShapeGraph {
        ShapeGraph::build(self.order.iter().map(|name| {
            let entry = &self.shapes[name];
            (entry.name.as_str(), &entry.expr)
        }))
    }

    /// Build the manifest for this snapshot. Requires a sealed registry.
    pub fn manifest(&self) -> Result<RegistryManifest> {
        if !self.sealed {
            return Err(SchemaError::NotFinalized {
                operation: "manifest".to_string(),
            });
        }

        let shapes: Vec<ManifestEntry> = self
            .entries()
            .map(|entry| ManifestEntry {
                name: entry.name.clone(),
                kind: entry.expr.kind(),
                checksum: entry.checksum.clone(),
            })
            .collect();

        let stats = ManifestStats {
            total_shapes: shapes.len(),
            objects: shapes.iter().filter(|s| s.kind == ShapeKind::Object).count(),
            unions: shapes.iter().filter(|s| s.kind == ShapeKind::Union).count(),
            enums: shapes.iter().filter(|s| s.kind == ShapeKind::Enum).count(),
            values: shapes.iter().filter(|s| s.kind == ShapeKind::Value).count(),
        };

        let combined: Vec<String> = shapes.iter().map(|s| s.checksum.to_string()).collect();
        let manifest_checksum = Checksum::from_content(&combined.join(","));

        Ok(RegistryManifest {
            version: self.version.version_string(),
            generated_at: Utc::now(),
            shapes,
            stats,
            manifest_checksum,
        })
    }

    fn check_variant_targets(&self, expr: &TypeExpr) -> Result<()> {
        match expr {
            TypeExpr::Union(union) => {
                for variant in &union.variants {
                    if let TypeExpr::Ref(target) = &variant.payload {
                        let entry = self.get(target)?;
                        if !matches!(entry.expr, TypeExpr::Object(_)) {
                            return Err(SchemaError::NonObjectVariant {
                                literal: variant.literal.clone(),
                            });
                        }
                    }
                }
                Ok(())
            }
            TypeExpr::Object(shape) => {
                for field in &shape.fields {
                    self.check_variant_targets(&field.ty)?;
                }
                Ok(())
            }
            TypeExpr::Array(item) | TypeExpr::Map(item) => self.check_variant_targets(item),
            TypeExpr::Tuple(items) | TypeExpr::OneOf(items) => {
                for item in items {
                    self.check_variant_targets(item)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Manifest of a sealed registry: every shape with its fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryManifest {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub shapes: Vec<ManifestEntry>,
    pub stats: ManifestStats,
    /// Checksum over all shape checksums
    pub manifest_checksum: Checksum,
}

/// One shape in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub kind: ShapeKind,
    pub checksum: Checksum,
}

/// Statistics about a snapshot manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStats {
    pub total_shapes: usize,
    pub objects: usize,
    pub unions: usize,
    pub enums: usize,
    pub values: usize,
}

impl RegistryManifest {
    /// Get a manifest entry by shape name
    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.shapes.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Field;

    fn registry() -> ShapeRegistry {
        ShapeRegistry::new(ContractVersion::parse("0.1.0").unwrap())
    }

    #[test]
    fn test_define_and_get() {
        let mut reg = registry();
        reg.define(
            "Address",
            TypeExpr::object(vec![Field::required("street", TypeExpr::String)]),
        )
        .unwrap();
        assert!(reg.get("Address").is_ok());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut reg = registry();
        reg.define("Address", TypeExpr::object(vec![])).unwrap();
        let err = reg.define("Address", TypeExpr::object(vec![])).unwrap_err();
        assert!(matches!(err, SchemaError::AlreadyDefined { .. }));
    }

    #[test]
    fn test_sealed_registry_rejects_definitions() {
        let mut reg = registry();
        reg.define("Address", TypeExpr::object(vec![])).unwrap();
        reg.finalize().unwrap();
        let err = reg.define("Device", TypeExpr::object(vec![])).unwrap_err();
        assert!(matches!(err, SchemaError::Sealed { .. }));
    }

    #[test]
    fn test_finalize_rejects_unresolved_reference() {
        let mut reg = registry();
        reg.define(
            "Location",
            TypeExpr::object(vec![Field::required(
                "coordinate",
                TypeExpr::reference("Coordinate"),
            )]),
        )
        .unwrap();
        let err = reg.finalize().unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_unknown_shape_gets_suggestion() {
        let mut reg = registry();
        reg.define("Announcement", TypeExpr::object(vec![])).unwrap();
        let err = reg.get("Anouncement").unwrap_err();
        match err {
            SchemaError::NotFound { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("Announcement"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_manifest_requires_finalize() {
        let mut reg = registry();
        reg.define("Address", TypeExpr::object(vec![])).unwrap();
        assert!(reg.manifest().is_err());
        reg.finalize().unwrap();
        let manifest = reg.manifest().unwrap();
        assert_eq!(manifest.stats.total_shapes, 1);
        assert_eq!(manifest.stats.objects, 1);
    }

    #[test]
    fn test_union_variant_must_resolve_to_object() {
        use crate::shape::TaggedUnion;
        let mut reg = registry();
        reg.define("Calendar", TypeExpr::array(TypeExpr::String))
            .unwrap();
        reg.define(
            "Tag",
            TypeExpr::Union(TaggedUnion::new("type").variant("bookingtag", TypeExpr::reference("Calendar"))),
        )
        .unwrap();
        let err = reg.finalize().unwrap_err();
        assert!(matches!(err, SchemaError::NonObjectVariant { .. }));
    }
}
