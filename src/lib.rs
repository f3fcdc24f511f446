//! Hemvist Contract Registry
//!
//! Versioned data-contract definitions for the Hemvist property
//! platform: every request/response payload, entity shape and event
//! envelope crossing the platform's external interfaces, as both a
//! structural validator and a typed Rust model.
//!
//! ## Features
//!
//! - **Shape composition**: shapes are data; `extend`/`merge`/`pick`/`omit`
//!   derive new shapes from old ones, so derived contracts follow their
//!   base shapes
//! - **Discriminated unions**: tags, tenants, connectors and events are
//!   closed variant sets validated by switching on the tag first
//! - **Snapshot versioning**: each catalog version is a frozen snapshot;
//!   historical payloads stay checkable forever
//! - **Error trees**: validation collects every violation in one pass
//!   into the platform's own recursive error contract
//! - **Compatibility checking**: structural diffing between snapshots
//!   with breaking-change classification
//!
//! ## Validating a payload
//!
//! ```
//! use hemvist_schemas::Catalog;
//! use serde_json::json;
//!
//! let catalog = Catalog::latest().unwrap();
//! let outcome = catalog
//!     .validate(
//!         "Address",
//!         &json!({ "street": "Storgatan 1", "zipcode": "11455", "city": "Stockholm" }),
//!     )
//!     .unwrap();
//! assert!(outcome.is_ok());
//! ```

pub mod catalog;
pub mod checksum;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod models;
pub mod registry;
pub mod shape;
pub mod validate;
pub mod version;

pub use catalog::Catalog;
pub use checksum::Checksum;
pub use compatibility::{CompatibilityChecker, CompatibilityResult};
pub use config::SchemasConfig;
pub use error::{Result, SchemaError};
pub use format::Format;
pub use registry::{RegistryManifest, ShapeEntry, ShapeRegistry};
pub use shape::{Field, Shape, ShapeKind, TaggedUnion, TypeExpr};
pub use validate::{
    Contract, ErrorLocation, ValidationReport, Validator, ValidatorOptions, Violation,
    ViolationKind,
};
pub use version::ContractVersion;
