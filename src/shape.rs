//! Shape data model and composition primitives
//!
//! A shape is data: an ordered list of fields with types, requiredness
//! and nullability. Derived shapes are built from previously defined
//! shapes with four pure operations — `extend`, `merge`, `pick`, `omit` —
//! so a change to a base shape propagates to everything derived from it.
//! Misusing an operation is a definition-time error; nothing here ever
//! fails while a payload is being validated.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::format::Format;

/// A type expression for a field or a whole named shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    /// JSON boolean
    Bool,
    /// JSON number
    Number,
    /// JSON string
    String,
    /// Exact string value (union discriminants, fixed type markers)
    Literal(String),
    /// Closed string vocabulary; exact wire values
    Enum(Vec<String>),
    /// String constrained by a wire format
    Format(Format),
    /// Homogeneous array
    Array(Box<TypeExpr>),
    /// Fixed-length tuple (geo positions, bounding boxes)
    Tuple(Vec<TypeExpr>),
    /// String-keyed map with a single value type
    Map(Box<TypeExpr>),
    /// Inline object shape
    Object(Shape),
    /// Named shape, resolved when the registry is finalized.
    /// A shape may refer to itself through this indirection.
    Ref(String),
    /// Untagged alternatives; a value must match at least one
    OneOf(Vec<TypeExpr>),
    /// Discriminated union: switch on the tag, then validate the payload
    Union(TaggedUnion),
    /// JSON null
    Null,
    /// Unconstrained JSON tree
    Json,
}

impl TypeExpr {
    pub fn object(fields: Vec<Field>) -> Self {
        TypeExpr::Object(Shape::new(fields))
    }

    pub fn array(item: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(item))
    }

    pub fn map(value: TypeExpr) -> Self {
        TypeExpr::Map(Box::new(value))
    }

    pub fn literal(value: impl Into<String>) -> Self {
        TypeExpr::Literal(value.into())
    }

    pub fn vocab(values: &[&str]) -> Self {
        TypeExpr::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeExpr::Ref(name.into())
    }

    pub fn format(format: Format) -> Self {
        TypeExpr::Format(format)
    }

    /// Coarse kind used for manifest statistics
    pub fn kind(&self) -> ShapeKind {
        match self {
            TypeExpr::Object(_) => ShapeKind::Object,
            TypeExpr::Union(_) => ShapeKind::Union,
            TypeExpr::Enum(_) => ShapeKind::Enum,
            _ => ShapeKind::Value,
        }
    }

    /// Collect every named reference below this expression
    pub fn collect_refs(&self, out: &mut Vec<String>) {
        match self {
            TypeExpr::Ref(name) => out.push(name.clone()),
            TypeExpr::Array(item) | TypeExpr::Map(item) => item.collect_refs(out),
            TypeExpr::Tuple(items) | TypeExpr::OneOf(items) => {
                for item in items {
                    item.collect_refs(out);
                }
            }
            TypeExpr::Object(shape) => {
                for field in &shape.fields {
                    field.ty.collect_refs(out);
                }
            }
            TypeExpr::Union(union) => {
                for variant in &union.variants {
                    variant.payload.collect_refs(out);
                }
            }
            _ => {}
        }
    }

    /// Definition-time structural checks, run when the expression is
    /// registered: duplicate discriminant literals, inline non-object
    /// union variants.
    pub(crate) fn check_definition(&self) -> Result<()> {
        match self {
            TypeExpr::Union(union) => union.check_definition(),
            TypeExpr::Object(shape) => {
                for field in &shape.fields {
                    field.ty.check_definition()?;
                }
                Ok(())
            }
            TypeExpr::Array(item) | TypeExpr::Map(item) => item.check_definition(),
            TypeExpr::Tuple(items) | TypeExpr::OneOf(items) => {
                for item in items {
                    item.check_definition()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Coarse shape kind for manifest statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Object,
    Union,
    Enum,
    Value,
}

/// A single field of a shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
    /// Whether the field must be present.
    pub required: bool,
    /// Whether a present field may be JSON null. Distinct from
    /// `required`: a field can be optional-but-never-null and vice versa.
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    /// A field that must be present
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
            nullable: false,
            description: None,
        }
    }

    /// A field that may be absent
    pub fn optional(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            nullable: false,
            description: None,
        }
    }

    /// Allow JSON null as a value
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach a description (carried into manifests)
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An ordered, closed record of typed fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub fields: Vec<Field>,
}

impl Shape {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Add fields to this shape; additions win on name conflict.
    ///
    /// Conflicting names keep their original position so derived shapes
    /// stay stably ordered.
    pub fn extend(&self, additions: Vec<Field>) -> Shape {
        let mut fields = self.fields.clone();
        for addition in additions {
            match fields.iter_mut().find(|f| f.name == addition.name) {
                Some(existing) => *existing = addition,
                None => fields.push(addition),
            }
        }
        Shape { fields }
    }

    /// Union of two shapes; the right side wins on name conflict.
    pub fn merge(&self, other: &Shape) -> Shape {
        self.extend(other.fields.clone())
    }

    /// Restrict to the named fields, keeping their order.
    ///
    /// Naming a field the shape does not have is a definition-time error.
    pub fn pick(&self, names: &[&str]) -> Result<Shape> {
        for name in names {
            if self.field(name).is_none() {
                return Err(SchemaError::UnknownField {
                    operation: "pick",
                    field: name.to_string(),
                });
            }
        }
        let fields = self
            .fields
            .iter()
            .filter(|f| names.contains(&f.name.as_str()))
            .cloned()
            .collect();
        Ok(Shape { fields })
    }

    /// Drop the named fields, keeping the rest in order.
    pub fn omit(&self, names: &[&str]) -> Result<Shape> {
        for name in names {
            if self.field(name).is_none() {
                return Err(SchemaError::UnknownField {
                    operation: "omit",
                    field: name.to_string(),
                });
            }
        }
        let fields = self
            .fields
            .iter()
            .filter(|f| !names.contains(&f.name.as_str()))
            .cloned()
            .collect();
        Ok(Shape { fields })
    }
}

/// A closed discriminated union
///
/// Exactly one variant applies to a value, selected by the literal in
/// the designated tag field. Validation switches on the tag first and
/// then checks only the matched payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedUnion {
    /// The discriminant field name (`type`, `driver_type`, ...)
    pub tag: String,
    pub variants: Vec<UnionVariant>,
}

/// One variant of a discriminated union
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionVariant {
    /// The literal value of the tag field selecting this variant
    pub literal: String,
    /// The variant payload: an inline object or a named reference to one
    pub payload: TypeExpr,
}

impl TaggedUnion {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            variants: Vec::new(),
        }
    }

    /// Add a variant selected by `literal`
    pub fn variant(mut self, literal: impl Into<String>, payload: TypeExpr) -> Self {
        self.variants.push(UnionVariant {
            literal: literal.into(),
            payload,
        });
        self
    }

    /// Find the variant for a discriminant value
    pub fn variant_for(&self, literal: &str) -> Option<&UnionVariant> {
        self.variants.iter().find(|v| v.literal == literal)
    }

    /// The closed set of allowed discriminant values
    pub fn literals(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.literal.as_str()).collect()
    }

    fn check_definition(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.literal.as_str()) {
                return Err(SchemaError::DuplicateDiscriminant {
                    tag: self.tag.clone(),
                    literal: variant.literal.clone(),
                });
            }
            // Inline payloads must be objects; refs are checked once the
            // registry can resolve them.
            match &variant.payload {
                TypeExpr::Object(_) | TypeExpr::Ref(_) => {}
                _ => {
                    return Err(SchemaError::NonObjectVariant {
                        literal: variant.literal.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Shape {
        Shape::new(vec![
            Field::required("street", TypeExpr::String),
            Field::required("zipcode", TypeExpr::String),
            Field::required("city", TypeExpr::String),
        ])
    }

    #[test]
    fn test_extend_adds_fields() {
        let extended = address().extend(vec![Field::optional("site_name", TypeExpr::String)]);
        assert_eq!(extended.fields.len(), 4);
        assert!(!extended.field("site_name").unwrap().required);
    }

    #[test]
    fn test_extension_wins_on_conflict() {
        let extended = address().extend(vec![Field::optional("zipcode", TypeExpr::Number)]);
        let zipcode = extended.field("zipcode").unwrap();
        assert_eq!(zipcode.ty, TypeExpr::Number);
        assert!(!zipcode.required);
        // Position is preserved
        assert_eq!(extended.field_names(), vec!["street", "zipcode", "city"]);
    }

    #[test]
    fn test_merge_right_side_wins() {
        let left = address();
        let right = Shape::new(vec![
            Field::optional("city", TypeExpr::String).nullable(),
            Field::required("country", TypeExpr::String),
        ]);
        let merged = left.merge(&right);
        assert_eq!(merged.fields.len(), 4);
        assert!(!merged.field("city").unwrap().required);
        assert!(merged.field("city").unwrap().nullable);
    }

    #[test]
    fn test_pick_keeps_order() {
        let picked = address().pick(&["city", "street"]).unwrap();
        assert_eq!(picked.field_names(), vec!["street", "city"]);
    }

    #[test]
    fn test_pick_unknown_field_is_definition_error() {
        let err = address().pick(&["street", "county"]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownField {
                operation: "pick",
                ..
            }
        ));
    }

    #[test]
    fn test_omit_complement() {
        let omitted = address().omit(&["zipcode"]).unwrap();
        assert_eq!(omitted.field_names(), vec!["street", "city"]);
        assert!(address().omit(&["zip"]).is_err());
    }

    #[test]
    fn test_duplicate_discriminant_rejected() {
        let union = TypeExpr::Union(
            TaggedUnion::new("type")
                .variant("reboot", TypeExpr::object(vec![]))
                .variant("reboot", TypeExpr::object(vec![])),
        );
        assert!(matches!(
            union.check_definition(),
            Err(SchemaError::DuplicateDiscriminant { .. })
        ));
    }

    #[test]
    fn test_non_object_variant_rejected() {
        let union = TypeExpr::Union(TaggedUnion::new("type").variant("reboot", TypeExpr::String));
        assert!(matches!(
            union.check_definition(),
            Err(SchemaError::NonObjectVariant { .. })
        ));
    }
}
