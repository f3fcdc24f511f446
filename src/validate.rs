//! Payload validation
//!
//! Validates an already-deserialized `serde_json::Value` against a named
//! shape. Validation never partially applies a shape and never aborts on
//! the first problem: every violation found in one pass is collected into
//! a recursive tree that serializes to the platform's own
//! `ParameterValidationError` wire contract. Failures are data for the
//! caller (typically an HTTP 400 body), never process-fatal.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::format::Format;
use crate::registry::{ShapeEntry, ShapeRegistry};
use crate::shape::{Shape, TaggedUnion, TypeExpr};

/// Longest rendering of an offending value carried in a violation
const VALUE_DISPLAY_LIMIT: usize = 120;

/// Which part of the request the offending value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLocation {
    #[default]
    Body,
    Query,
    Params,
    Cookies,
    Headers,
}

/// What went wrong at one spot in the value
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Wrong primitive or container kind
    TypeMismatch { expected: String },
    /// Right primitive kind, wrong wire format
    FormatViolation { format: Format },
    MissingField,
    /// Only raised under strict unknown-field checking
    UnknownField,
    /// A fixed literal field had a different value
    LiteralMismatch { expected: String },
    /// Value outside a closed vocabulary
    NotInVocabulary,
    /// Union tag value outside the closed variant set
    UnknownDiscriminant { tag: String },
    /// Union tag matched, but the variant payload is invalid
    VariantMismatch { tag: String, literal: String },
    /// Untagged alternatives all failed
    NoAlternativeMatched,
    /// Input nesting exceeded the configured depth guard
    DepthExceeded,
}

/// One node of the validation error tree.
///
/// Serializes to the `ParameterValidationError` wire shape (`msg`,
/// `param`, `value`, `location`, `nestedErrors`); `kind` is the
/// in-process taxonomy and stays out of the wire encoding.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    #[serde(skip)]
    pub kind: ViolationKind,
    pub msg: String,
    pub param: String,
    pub value: String,
    pub location: ErrorLocation,
    #[serde(rename = "nestedErrors", skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Violation>,
}

impl Violation {
    fn new(kind: ViolationKind, msg: impl Into<String>, param: &str, value: &Value) -> Self {
        Self {
            kind,
            msg: msg.into(),
            param: param.to_string(),
            value: render_value(value),
            location: ErrorLocation::default(),
            nested: Vec::new(),
        }
    }

    fn with_nested(mut self, nested: Vec<Violation>) -> Self {
        self.nested = nested;
        self
    }

    /// Tag this violation (and its subtree) with a request part
    pub fn at_location(mut self, location: ErrorLocation) -> Self {
        self.location = location;
        self.nested = self
            .nested
            .into_iter()
            .map(|v| v.at_location(location))
            .collect();
        self
    }

    /// Depth of the deepest nested violation under this one
    pub fn depth(&self) -> usize {
        self.nested.iter().map(|v| v.depth() + 1).max().unwrap_or(0)
    }

    fn render(&self, indent: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = "  ".repeat(indent);
        let param = if self.param.is_empty() { "(root)" } else { &self.param };
        writeln!(f, "{pad}{param}: {}", self.msg)?;
        for nested in &self.nested {
            nested.render(indent + 1, f)?;
        }
        Ok(())
    }
}

/// The collected outcome of a failed validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    #[serde(skip)]
    pub shape: String,
    pub message: String,
    pub errors: Vec<Violation>,
}

impl ValidationReport {
    fn new(shape: &str, errors: Vec<Violation>) -> Self {
        Self {
            shape: shape.to_string(),
            message: format!("Value does not conform to shape '{shape}'"),
            errors,
        }
    }

    /// Total number of violations, nested ones included
    pub fn total(&self) -> usize {
        fn count(violations: &[Violation]) -> usize {
            violations.iter().map(|v| 1 + count(&v.nested)).sum()
        }
        count(&self.errors)
    }

    /// Tag every violation with a request part
    pub fn at_location(mut self, location: ErrorLocation) -> Self {
        self.errors = self
            .errors
            .into_iter()
            .map(|v| v.at_location(location))
            .collect();
        self
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        for violation in &self.errors {
            violation.render(1, f)?;
        }
        Ok(())
    }
}

/// Binds a typed model to the shape it decodes from
pub trait Contract: DeserializeOwned {
    /// Registry name of the shape validating this type
    const SHAPE: &'static str;
}

/// Validation settings
#[derive(Debug, Clone, Copy)]
pub struct ValidatorOptions {
    /// Maximum input nesting before validation reports `DepthExceeded`.
    /// The original contracts had no such guard.
    pub max_depth: usize,
    /// Reject fields the shape does not declare (default: ignore them,
    /// matching the original contracts)
    pub strict_unknown_fields: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 64,
            strict_unknown_fields: false,
        }
    }
}

/// Validates values against the shapes of one sealed registry
pub struct Validator<'r> {
    registry: &'r ShapeRegistry,
    options: ValidatorOptions,
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r ShapeRegistry) -> Self {
        Self::with_options(registry, ValidatorOptions::default())
    }

    pub fn with_options(registry: &'r ShapeRegistry, options: ValidatorOptions) -> Self {
        Self { registry, options }
    }

    /// Validate a value against a shape entry
    pub fn validate(&self, entry: &ShapeEntry, value: &Value) -> Result<(), ValidationReport> {
        let mut violations = Vec::new();
        self.check_expr(&entry.expr, value, "", 0, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            let report = ValidationReport::new(&entry.name, violations);
            debug!(shape = %entry.name, violations = report.total(), "validation failed");
            Err(report)
        }
    }

    /// Validate against a shape looked up by name
    pub fn validate_named(
        &self,
        shape: &str,
        value: &Value,
    ) -> crate::error::Result<Result<(), ValidationReport>> {
        let entry = self.registry.get(shape)?;
        Ok(self.validate(entry, value))
    }

    /// Validate and deserialize into the typed model bound to the shape
    pub fn decode<T: Contract>(
        &self,
        value: &Value,
    ) -> crate::error::Result<Result<T, ValidationReport>> {
        let entry = self.registry.get(T::SHAPE)?;
        if let Err(report) = self.validate(entry, value) {
            return Ok(Err(report));
        }
        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed) => Ok(Ok(typed)),
            Err(err) => {
                // A shape/model mismatch; surface it as a report rather
                // than a panic so callers keep a single failure path.
                let violation = Violation::new(
                    ViolationKind::TypeMismatch {
                        expected: T::SHAPE.to_string(),
                    },
                    format!("decoded shape rejected by model: {err}"),
                    "",
                    value,
                );
                Ok(Err(ValidationReport::new(T::SHAPE, vec![violation])))
            }
        }
    }

    fn check_expr(
        &self,
        expr: &TypeExpr,
        value: &Value,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        if depth > self.options.max_depth {
            out.push(Violation::new(
                ViolationKind::DepthExceeded,
                format!("nesting exceeds the maximum depth of {}", self.options.max_depth),
                path,
                value,
            ));
            return;
        }

        match expr {
            TypeExpr::Bool => {
                if !value.is_boolean() {
                    out.push(self.type_mismatch("boolean", path, value));
                }
            }
            TypeExpr::Number => {
                if !value.is_number() {
                    out.push(self.type_mismatch("number", path, value));
                }
            }
            TypeExpr::String => {
                if !value.is_string() {
                    out.push(self.type_mismatch("string", path, value));
                }
            }
            TypeExpr::Null => {
                if !value.is_null() {
                    out.push(self.type_mismatch("null", path, value));
                }
            }
            TypeExpr::Json => {}
            TypeExpr::Literal(expected) => match value.as_str() {
                Some(actual) if actual == expected => {}
                Some(_) => out.push(Violation::new(
                    ViolationKind::LiteralMismatch {
                        expected: expected.clone(),
                    },
                    format!("must be exactly '{expected}'"),
                    path,
                    value,
                )),
                None => out.push(self.type_mismatch("string", path, value)),
            },
            TypeExpr::Enum(values) => match value.as_str() {
                Some(actual) if values.iter().any(|v| v == actual) => {}
                Some(actual) => out.push(Violation::new(
                    ViolationKind::NotInVocabulary,
                    format!("'{actual}' is not one of: {}", values.join(", ")),
                    path,
                    value,
                )),
                None => out.push(self.type_mismatch("string", path, value)),
            },
            TypeExpr::Format(format) => match value.as_str() {
                Some(actual) if format.check(actual) => {}
                Some(_) => out.push(Violation::new(
                    ViolationKind::FormatViolation { format: *format },
                    format!("must be a valid {format}"),
                    path,
                    value,
                )),
                None => out.push(self.type_mismatch("string", path, value)),
            },
            TypeExpr::Array(item) => match value.as_array() {
                Some(elements) => {
                    for (i, element) in elements.iter().enumerate() {
                        let child = format!("{path}[{i}]");
                        self.check_expr(item, element, &child, depth + 1, out);
                    }
                }
                None => out.push(self.type_mismatch("array", path, value)),
            },
            TypeExpr::Tuple(items) => match value.as_array() {
                Some(elements) if elements.len() == items.len() => {
                    for (i, (item, element)) in items.iter().zip(elements).enumerate() {
                        let child = format!("{path}[{i}]");
                        self.check_expr(item, element, &child, depth + 1, out);
                    }
                }
                Some(elements) => out.push(Violation::new(
                    ViolationKind::TypeMismatch {
                        expected: format!("tuple of {}", items.len()),
                    },
                    format!("expected {} elements, got {}", items.len(), elements.len()),
                    path,
                    value,
                )),
                None => out.push(self.type_mismatch("array", path, value)),
            },
            TypeExpr::Map(value_ty) => match value.as_object() {
                Some(entries) => {
                    for (key, entry) in entries {
                        let child = join_path(path, key);
                        self.check_expr(value_ty, entry, &child, depth + 1, out);
                    }
                }
                None => out.push(self.type_mismatch("object", path, value)),
            },
            TypeExpr::Object(shape) => self.check_shape(shape, value, path, depth, out),
            TypeExpr::Ref(name) => match self.registry.get(name) {
                Ok(entry) => self.check_expr(&entry.expr, value, path, depth + 1, out),
                // Unreachable on a finalized registry; reported rather
                // than swallowed in case validation runs before sealing.
                Err(err) => out.push(Violation::new(
                    ViolationKind::TypeMismatch {
                        expected: name.clone(),
                    },
                    err.to_string(),
                    path,
                    value,
                )),
            },
            TypeExpr::OneOf(alternatives) => self.check_one_of(alternatives, value, path, depth, out),
            TypeExpr::Union(union) => self.check_union(union, value, path, depth, out),
        }
    }

    fn check_shape(
        &self,
        shape: &Shape,
        value: &Value,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        let Some(object) = value.as_object() else {
            out.push(self.type_mismatch("object", path, value));
            return;
        };

        for field in &shape.fields {
            let child = join_path(path, &field.name);
            match object.get(&field.name) {
                None => {
                    if field.required {
                        out.push(Violation::new(
                            ViolationKind::MissingField,
                            format!("required field '{}' is missing", field.name),
                            &child,
                            &Value::Null,
                        ));
                    }
                }
                Some(Value::Null) if field.nullable => {}
                Some(present) => self.check_expr(&field.ty, present, &child, depth + 1, out),
            }
        }

        if self.options.strict_unknown_fields {
            for key in object.keys() {
                if shape.field(key).is_none() {
                    let child = join_path(path, key);
                    out.push(Violation::new(
                        ViolationKind::UnknownField,
                        format!("field '{key}' is not part of the shape"),
                        &child,
                        &object[key],
                    ));
                }
            }
        }
    }

    fn check_one_of(
        &self,
        alternatives: &[TypeExpr],
        value: &Value,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        let mut attempts: Vec<Vec<Violation>> = Vec::new();
        for alternative in alternatives {
            let mut scratch = Vec::new();
            self.check_expr(alternative, value, path, depth, &mut scratch);
            if scratch.is_empty() {
                return;
            }
            attempts.push(scratch);
        }

        // Keep the closest attempt so the caller sees why the best
        // candidate failed, not every candidate's noise.
        let closest = attempts
            .into_iter()
            .min_by_key(|a| a.len())
            .unwrap_or_default();
        out.push(
            Violation::new(
                ViolationKind::NoAlternativeMatched,
                format!("matched none of the {} alternatives", alternatives.len()),
                path,
                value,
            )
            .with_nested(closest),
        );
    }

    fn check_union(
        &self,
        union: &TaggedUnion,
        value: &Value,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        let Some(object) = value.as_object() else {
            out.push(self.type_mismatch("object", path, value));
            return;
        };

        let tag_path = join_path(path, &union.tag);
        let Some(tag_value) = object.get(&union.tag) else {
            out.push(Violation::new(
                ViolationKind::MissingField,
                format!("required discriminant '{}' is missing", union.tag),
                &tag_path,
                &Value::Null,
            ));
            return;
        };
        let Some(literal) = tag_value.as_str() else {
            out.push(self.type_mismatch("string", &tag_path, tag_value));
            return;
        };

        let Some(variant) = union.variant_for(literal) else {
            out.push(Violation::new(
                ViolationKind::UnknownDiscriminant {
                    tag: union.tag.clone(),
                },
                format!(
                    "'{literal}' is not one of: {}",
                    union.literals().join(", ")
                ),
                &tag_path,
                tag_value,
            ));
            return;
        };

        // Tag matched: validate only this variant's payload.
        let mut nested = Vec::new();
        self.check_expr(&variant.payload, value, path, depth, &mut nested);
        if !nested.is_empty() {
            out.push(
                Violation::new(
                    ViolationKind::VariantMismatch {
                        tag: union.tag.clone(),
                        literal: literal.to_string(),
                    },
                    format!("invalid payload for variant '{literal}'"),
                    path,
                    value,
                )
                .with_nested(nested),
            );
        }
    }

    fn type_mismatch(&self, expected: &str, path: &str, value: &Value) -> Violation {
        Violation::new(
            ViolationKind::TypeMismatch {
                expected: expected.to_string(),
            },
            format!("expected {expected}"),
            path,
            value,
        )
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn render_value(value: &Value) -> String {
    if value.is_null() {
        return String::new();
    }
    let mut rendered = value.to_string();
    if rendered.len() > VALUE_DISPLAY_LIMIT {
        rendered.truncate(
            (0..=VALUE_DISPLAY_LIMIT)
                .rev()
                .find(|&i| rendered.is_char_boundary(i))
                .unwrap_or(0),
        );
        rendered.push('…');
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Field, TaggedUnion};
    use crate::version::ContractVersion;
    use serde_json::json;

    fn registry() -> ShapeRegistry {
        let mut reg = ShapeRegistry::new(ContractVersion::parse("0.0.0").unwrap());
        reg.define(
            "Address",
            TypeExpr::object(vec![
                Field::required("street", TypeExpr::String),
                Field::required("zipcode", TypeExpr::String),
                Field::required("city", TypeExpr::String),
            ]),
        )
        .unwrap();
        reg.define(
            "DeviceEvent",
            TypeExpr::Union(
                TaggedUnion::new("type")
                    .variant(
                        "reboot",
                        TypeExpr::object(vec![Field::required("type", TypeExpr::literal("reboot"))]),
                    )
                    .variant(
                        "installation",
                        TypeExpr::object(vec![
                            Field::required("type", TypeExpr::literal("installation")),
                            Field::required(
                                "data",
                                TypeExpr::object(vec![Field::required(
                                    "location_id",
                                    TypeExpr::String,
                                )]),
                            ),
                        ]),
                    ),
            ),
        )
        .unwrap();
        reg.finalize().unwrap();
        reg
    }

    #[test]
    fn test_collects_every_violation_in_one_pass() {
        let reg = registry();
        let validator = Validator::new(&reg);
        let entry = reg.get("Address").unwrap();

        let report = validator
            .validate(entry, &json!({ "street": 12, "city": true }))
            .unwrap_err();
        // Bad street, bad city, missing zipcode — all reported at once.
        assert_eq!(report.total(), 3);
        assert!(report
            .errors
            .iter()
            .any(|v| v.kind == ViolationKind::MissingField && v.param == "zipcode"));
    }

    #[test]
    fn test_union_switches_on_tag_first() {
        let reg = registry();
        let validator = Validator::new(&reg);
        let entry = reg.get("DeviceEvent").unwrap();

        let report = validator
            .validate(entry, &json!({ "type": "factory-reset" }))
            .unwrap_err();
        assert!(matches!(
            report.errors[0].kind,
            ViolationKind::UnknownDiscriminant { .. }
        ));

        let report = validator
            .validate(entry, &json!({ "type": "installation" }))
            .unwrap_err();
        match &report.errors[0].kind {
            ViolationKind::VariantMismatch { literal, .. } => {
                assert_eq!(literal, "installation");
            }
            other => panic!("Expected VariantMismatch, got {:?}", other),
        }
        assert!(report.errors[0]
            .nested
            .iter()
            .any(|v| v.kind == ViolationKind::MissingField && v.param == "data"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let reg = registry();
        let validator = Validator::new(&reg);
        let entry = reg.get("Address").unwrap();
        let value = json!({ "street": "Main St 1", "zipcode": "12345", "city": "Metropolis" });

        assert!(validator.validate(entry, &value).is_ok());
        assert!(validator.validate(entry, &value).is_ok());
    }

    #[test]
    fn test_depth_guard_reports_instead_of_recursing() {
        let mut reg = ShapeRegistry::new(ContractVersion::parse("0.0.0").unwrap());
        reg.define(
            "Nested",
            TypeExpr::object(vec![Field::optional("child", TypeExpr::reference("Nested"))]),
        )
        .unwrap();
        reg.finalize().unwrap();

        let mut value = json!({});
        for _ in 0..40 {
            value = json!({ "child": value });
        }

        let options = ValidatorOptions {
            max_depth: 16,
            strict_unknown_fields: false,
        };
        let validator = Validator::with_options(&reg, options);
        let entry = reg.get("Nested").unwrap();
        let report = validator.validate(entry, &value).unwrap_err();
        assert!(report
            .errors
            .iter()
            .any(|v| v.kind == ViolationKind::DepthExceeded));
    }

    #[test]
    fn test_strict_unknown_fields() {
        let reg = registry();
        let options = ValidatorOptions {
            strict_unknown_fields: true,
            ..ValidatorOptions::default()
        };
        let validator = Validator::with_options(&reg, options);
        let entry = reg.get("Address").unwrap();

        let value = json!({
            "street": "Main St 1", "zipcode": "12345", "city": "Metropolis",
            "county": "Unknown"
        });
        let report = validator.validate(entry, &value).unwrap_err();
        assert_eq!(report.errors[0].kind, ViolationKind::UnknownField);
        assert_eq!(report.errors[0].param, "county");

        // The default validator ignores unknown fields.
        assert!(Validator::new(&reg).validate(entry, &value).is_ok());
    }

    #[test]
    fn test_report_serializes_to_wire_contract() {
        let reg = registry();
        let validator = Validator::new(&reg);
        let entry = reg.get("Address").unwrap();
        let report = validator
            .validate(entry, &json!({ "street": "Main St 1", "city": "Metropolis" }))
            .unwrap_err();

        let wire = serde_json::to_value(&report).unwrap();
        assert!(wire.get("message").is_some());
        let first = &wire["errors"][0];
        assert_eq!(first["param"], "zipcode");
        assert_eq!(first["location"], "body");
        assert!(first.get("msg").is_some());
        // The in-process taxonomy stays out of the wire encoding.
        assert!(first.get("kind").is_none());
    }
}
