//! Snapshot compatibility checking
//!
//! Detects what changed between two snapshots of the same shape and
//! classifies each change as breaking or backward compatible. Consumers
//! pin a snapshot; this is how a new snapshot is vetted before release.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SchemaError};
use crate::registry::{ShapeEntry, ShapeRegistry};
use crate::shape::{Shape, TaggedUnion, TypeExpr};

/// Result of a compatibility check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Whether the shapes are compatible
    pub is_compatible: bool,
    /// Whether this is a breaking change
    pub is_breaking: bool,
    /// List of changes detected
    pub changes: Vec<ShapeChange>,
    /// Summary of the compatibility check
    pub summary: String,
}

impl CompatibilityResult {
    /// Create a compatible result
    pub fn compatible(changes: Vec<ShapeChange>) -> Self {
        let summary = if changes.is_empty() {
            "No changes detected".to_string()
        } else {
            format!("{} compatible changes detected", changes.len())
        };
        Self {
            is_compatible: true,
            is_breaking: false,
            changes,
            summary,
        }
    }

    /// Create an incompatible result
    pub fn incompatible(changes: Vec<ShapeChange>, reason: impl Into<String>) -> Self {
        Self {
            is_compatible: false,
            is_breaking: true,
            changes,
            summary: reason.into(),
        }
    }
}

/// A detected change between shape snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeChange {
    /// Type of change
    pub change_type: ChangeType,
    /// Path to the changed element (e.g., "tenants.first_name")
    pub path: String,
    /// Old value (if applicable)
    pub old_value: Option<String>,
    /// New value (if applicable)
    pub new_value: Option<String>,
    /// Whether this change is breaking
    pub is_breaking: bool,
    /// Human-readable description
    pub description: String,
}

/// Type of shape change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// A new field was added
    FieldAdded,
    /// A field was removed
    FieldRemoved,
    /// A field's type changed
    TypeChanged,
    /// A field's optionality changed (required <-> optional)
    OptionalityChanged,
    /// A field's nullability changed
    NullabilityChanged,
    /// Enum vocabulary value added
    EnumVariantAdded,
    /// Enum vocabulary value removed
    EnumVariantRemoved,
    /// Discriminated-union variant added
    UnionVariantAdded,
    /// Discriminated-union variant removed
    UnionVariantRemoved,
    /// String format constraint changed
    FormatChanged,
    /// Description changed
    DocumentationChanged,
    /// Other change
    Other,
}

impl ChangeType {
    /// Check if this change type is typically breaking
    pub fn is_typically_breaking(&self) -> bool {
        matches!(
            self,
            ChangeType::FieldRemoved
                | ChangeType::TypeChanged
                | ChangeType::EnumVariantRemoved
                | ChangeType::UnionVariantRemoved
                | ChangeType::OptionalityChanged
                | ChangeType::FormatChanged
        )
    }
}

/// Compatibility checker for contract snapshots
pub struct CompatibilityChecker {
    /// Strict mode - any change is considered breaking
    strict_mode: bool,
}

impl CompatibilityChecker {
    pub fn new() -> Self {
        Self { strict_mode: false }
    }

    /// Enable strict mode
    pub fn strict(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Check compatibility between two entries of the same shape
    pub fn check(&self, old: &ShapeEntry, new: &ShapeEntry) -> Result<CompatibilityResult> {
        if old.name != new.name {
            return Err(SchemaError::IncompatibleChange(
                "Cannot compare shapes with different names".to_string(),
            ));
        }

        let mut changes = Vec::new();
        self.diff_expr(&old.expr, &new.expr, "", &mut changes);
        let breaking_count = changes.iter().filter(|c| c.is_breaking).count();

        if self.strict_mode && !changes.is_empty() {
            Ok(CompatibilityResult::incompatible(
                changes.clone(),
                format!("Strict mode: {} changes detected", changes.len()),
            ))
        } else if breaking_count > 0 {
            Ok(CompatibilityResult::incompatible(
                changes,
                format!("{} breaking changes detected", breaking_count),
            ))
        } else {
            Ok(CompatibilityResult::compatible(changes))
        }
    }

    /// Check every shape of the old registry against the new one.
    ///
    /// Shapes removed in the new snapshot are incompatible; shapes added
    /// there do not affect existing consumers.
    pub fn check_registries(
        &self,
        old: &ShapeRegistry,
        new: &ShapeRegistry,
    ) -> Result<BTreeMap<String, CompatibilityResult>> {
        let mut results = BTreeMap::new();

        for old_entry in old.entries() {
            if new.contains(&old_entry.name) {
                let new_entry = new.get(&old_entry.name)?;
                let result = self.check(old_entry, new_entry)?;
                results.insert(old_entry.name.clone(), result);
            } else {
                results.insert(
                    old_entry.name.clone(),
                    CompatibilityResult::incompatible(
                        vec![],
                        format!("Shape '{}' was removed", old_entry.name),
                    ),
                );
            }
        }

        Ok(results)
    }

    fn diff_expr(&self, old: &TypeExpr, new: &TypeExpr, path: &str, changes: &mut Vec<ShapeChange>) {
        match (old, new) {
            (TypeExpr::Object(old_shape), TypeExpr::Object(new_shape)) => {
                self.diff_shapes(old_shape, new_shape, path, changes);
            }
            (TypeExpr::Enum(old_values), TypeExpr::Enum(new_values)) => {
                self.diff_vocab(old_values, new_values, path, changes);
            }
            (TypeExpr::Union(old_union), TypeExpr::Union(new_union)) => {
                self.diff_unions(old_union, new_union, path, changes);
            }
            (TypeExpr::Format(old_format), TypeExpr::Format(new_format)) => {
                if old_format != new_format {
                    changes.push(change(
                        ChangeType::FormatChanged,
                        path,
                        Some(old_format.label().to_string()),
                        Some(new_format.label().to_string()),
                        format!(
                            "Format changed from {} to {}",
                            old_format.label(),
                            new_format.label()
                        ),
                    ));
                }
            }
            (TypeExpr::Array(old_item), TypeExpr::Array(new_item))
            | (TypeExpr::Map(old_item), TypeExpr::Map(new_item)) => {
                self.diff_expr(old_item, new_item, path, changes);
            }
            (TypeExpr::Tuple(old_items), TypeExpr::Tuple(new_items))
            | (TypeExpr::OneOf(old_items), TypeExpr::OneOf(new_items)) => {
                if old_items.len() != new_items.len() {
                    changes.push(type_changed(path, old, new));
                } else {
                    for (i, (old_item, new_item)) in old_items.iter().zip(new_items).enumerate() {
                        let item_path = format!("{path}[{i}]");
                        self.diff_expr(old_item, new_item, &item_path, changes);
                    }
                }
            }
            (TypeExpr::Ref(old_target), TypeExpr::Ref(new_target)) => {
                // Changes inside the target are reported on the target
                // shape itself; only a retargeting matters here.
                if old_target != new_target {
                    changes.push(type_changed(path, old, new));
                }
            }
            _ => {
                if old != new {
                    changes.push(type_changed(path, old, new));
                }
            }
        }
    }

    fn diff_shapes(&self, old: &Shape, new: &Shape, path: &str, changes: &mut Vec<ShapeChange>) {
        for old_field in &old.fields {
            let field_path = join(path, &old_field.name);
            match new.field(&old_field.name) {
                None => {
                    changes.push(change(
                        ChangeType::FieldRemoved,
                        &field_path,
                        Some(describe_expr(&old_field.ty)),
                        None,
                        format!("Field '{}' was removed", old_field.name),
                    ));
                }
                Some(new_field) => {
                    if old_field.required != new_field.required {
                        changes.push(change(
                            ChangeType::OptionalityChanged,
                            &field_path,
                            Some(optionality(old_field.required).to_string()),
                            Some(optionality(new_field.required).to_string()),
                            format!(
                                "Field '{}' went from {} to {}",
                                old_field.name,
                                optionality(old_field.required),
                                optionality(new_field.required)
                            ),
                        ));
                    }
                    if old_field.nullable != new_field.nullable {
                        // Widening to nullable keeps old payloads valid.
                        let narrowed = old_field.nullable && !new_field.nullable;
                        changes.push(ShapeChange {
                            change_type: ChangeType::NullabilityChanged,
                            path: field_path.clone(),
                            old_value: Some(old_field.nullable.to_string()),
                            new_value: Some(new_field.nullable.to_string()),
                            is_breaking: narrowed,
                            description: format!(
                                "Field '{}' nullability changed",
                                old_field.name
                            ),
                        });
                    }
                    if old_field.description != new_field.description {
                        changes.push(ShapeChange {
                            change_type: ChangeType::DocumentationChanged,
                            path: field_path.clone(),
                            old_value: old_field.description.clone(),
                            new_value: new_field.description.clone(),
                            is_breaking: false,
                            description: format!(
                                "Field '{}' description changed",
                                old_field.name
                            ),
                        });
                    }
                    self.diff_expr(&old_field.ty, &new_field.ty, &field_path, changes);
                }
            }
        }

        for new_field in &new.fields {
            if old.field(&new_field.name).is_none() {
                let field_path = join(path, &new_field.name);
                changes.push(ShapeChange {
                    change_type: ChangeType::FieldAdded,
                    path: field_path,
                    old_value: None,
                    new_value: Some(describe_expr(&new_field.ty)),
                    is_breaking: new_field.required,
                    description: if new_field.required {
                        format!("Required field '{}' was added (breaking)", new_field.name)
                    } else {
                        format!("Optional field '{}' was added", new_field.name)
                    },
                });
            }
        }
    }

    fn diff_vocab(&self, old: &[String], new: &[String], path: &str, changes: &mut Vec<ShapeChange>) {
        for removed in old.iter().filter(|v| !new.contains(v)) {
            changes.push(change(
                ChangeType::EnumVariantRemoved,
                path,
                Some(removed.clone()),
                None,
                format!("Vocabulary value '{removed}' was removed"),
            ));
        }
        for added in new.iter().filter(|v| !old.contains(v)) {
            changes.push(ShapeChange {
                change_type: ChangeType::EnumVariantAdded,
                path: path.to_string(),
                old_value: None,
                new_value: Some(added.clone()),
                is_breaking: false,
                description: format!("Vocabulary value '{added}' was added"),
            });
        }
    }

    fn diff_unions(
        &self,
        old: &TaggedUnion,
        new: &TaggedUnion,
        path: &str,
        changes: &mut Vec<ShapeChange>,
    ) {
        if old.tag != new.tag {
            changes.push(change(
                ChangeType::TypeChanged,
                &join(path, &old.tag),
                Some(old.tag.clone()),
                Some(new.tag.clone()),
                format!("Discriminant renamed from '{}' to '{}'", old.tag, new.tag),
            ));
            return;
        }

        for old_variant in &old.variants {
            let variant_path = format!("{path}<{}>", old_variant.literal);
            match new.variant_for(&old_variant.literal) {
                None => {
                    changes.push(change(
                        ChangeType::UnionVariantRemoved,
                        &variant_path,
                        Some(old_variant.literal.clone()),
                        None,
                        format!("Union variant '{}' was removed", old_variant.literal),
                    ));
                }
                Some(new_variant) => {
                    self.diff_expr(&old_variant.payload, &new_variant.payload, &variant_path, changes);
                }
            }
        }

        for new_variant in &new.variants {
            if old.variant_for(&new_variant.literal).is_none() {
                changes.push(ShapeChange {
                    change_type: ChangeType::UnionVariantAdded,
                    path: format!("{path}<{}>", new_variant.literal),
                    old_value: None,
                    new_value: Some(new_variant.literal.clone()),
                    is_breaking: false,
                    description: format!("Union variant '{}' was added", new_variant.literal),
                });
            }
        }
    }
}

impl Default for CompatibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn change(
    change_type: ChangeType,
    path: &str,
    old_value: Option<String>,
    new_value: Option<String>,
    description: String,
) -> ShapeChange {
    ShapeChange {
        change_type,
        path: path.to_string(),
        old_value,
        new_value,
        is_breaking: change_type.is_typically_breaking(),
        description,
    }
}

fn type_changed(path: &str, old: &TypeExpr, new: &TypeExpr) -> ShapeChange {
    change(
        ChangeType::TypeChanged,
        path,
        Some(describe_expr(old)),
        Some(describe_expr(new)),
        "Type changed".to_string(),
    )
}

fn describe_expr(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Bool => "boolean".to_string(),
        TypeExpr::Number => "number".to_string(),
        TypeExpr::String => "string".to_string(),
        TypeExpr::Null => "null".to_string(),
        TypeExpr::Json => "json".to_string(),
        TypeExpr::Literal(value) => format!("literal '{value}'"),
        TypeExpr::Enum(values) => format!("enum of {}", values.len()),
        TypeExpr::Format(format) => format.label().to_string(),
        TypeExpr::Array(_) => "array".to_string(),
        TypeExpr::Tuple(items) => format!("tuple of {}", items.len()),
        TypeExpr::Map(_) => "map".to_string(),
        TypeExpr::Object(shape) => format!("object with {} fields", shape.fields.len()),
        TypeExpr::Ref(target) => format!("ref '{target}'"),
        TypeExpr::OneOf(items) => format!("one of {}", items.len()),
        TypeExpr::Union(union) => format!("union tagged by '{}'", union.tag),
    }
}

fn optionality(required: bool) -> &'static str {
    if required {
        "required"
    } else {
        "optional"
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}
