//! Error types for the contract registry

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Definition-time schema errors.
///
/// Everything here is raised while a catalog is being constructed or
/// finalized. Validation of payloads never produces a `SchemaError`; it
/// produces a structured [`ValidationReport`](crate::validate::ValidationReport).
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Shape not found: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
    NotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Shape already defined: {name}")]
    AlreadyDefined { name: String },

    #[error("Registry for {version} is sealed: cannot define '{name}' after finalize")]
    Sealed { version: String, name: String },

    #[error("Registry must be finalized before '{operation}'")]
    NotFinalized { operation: String },

    #[error("Unresolved shape reference: '{reference}' (referenced from '{from}')")]
    UnresolvedReference { from: String, reference: String },

    #[error("Cannot {operation} unknown field '{field}'")]
    UnknownField {
        operation: &'static str,
        field: String,
    },

    #[error("Duplicate discriminant literal '{literal}' in union tagged by '{tag}'")]
    DuplicateDiscriminant { tag: String, literal: String },

    #[error("Union variant '{literal}' must be an object shape")]
    NonObjectVariant { literal: String },

    #[error("Invalid version: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Compatibility check failed: {0}")]
    IncompatibleChange(String),
}
