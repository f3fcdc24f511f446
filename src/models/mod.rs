//! Typed models for the current contract snapshot
//!
//! The outbound half of the registry: for every shape of the latest
//! snapshot there is a serde-derived Rust type, so collaborators get
//! compile-time checking of the payloads they construct before handing
//! them to the validator. Each model implements [`Contract`] to bind it
//! to the shape that validates it; `Catalog::decode` uses that binding.
//!
//! Historical snapshot v1 stays a validation-only surface — its payloads
//! are checked through the registry, not through these types.
//!
//! [`Contract`]: crate::validate::Contract

/// Bind a model type to the registry shape that validates it.
macro_rules! contract {
    ($ty:ty => $shape:literal) => {
        impl crate::validate::Contract for $ty {
            const SHAPE: &'static str = $shape;
        }
    };
}

pub mod announcement;
pub mod attachment;
pub mod common;
pub mod connector;
pub mod device;
pub mod embedded_url;
pub mod error;
pub mod geo;
pub mod location;
pub mod organization;
pub mod tag;
pub mod unit;
pub mod user;

pub use announcement::{Announcement, AnnouncementLinkEventData, AnnouncementRequest};
pub use attachment::{
    Attachment, AttachmentCategory, AttachmentLinkEventData, AttachmentPatchRequest,
    AttachmentRequest, AttachmentUploadMetadata,
};
pub use common::{Address, ConfigMap, ConfigScalar, Coordinate, Crs, Metadata};
pub use connector::{
    BokameraDriverConfig, Connector, ConnectorDriver, ConnectorRequest,
    GoogleCalendarDriverConfig, MicrosoftPersonalDriverConfig, MicrosoftResourceDriverConfig,
    WipDriverConfig,
};
pub use device::{
    Device, DeviceDbRequest, DeviceEventKind, DeviceEventQueryParams, DeviceEventRecord,
    DeviceEventRequest, DeviceInstallationEventData, DeviceInstallationRequest, DeviceRequest,
    DeviceState, DeviceStatus, DeviceStatusChangeEventData, DeviceType,
};
pub use embedded_url::{EmbeddedUrl, EmbeddedUrlIcon, EmbeddedUrlLinkEventData, EmbeddedUrlRequest};
pub use error::{ErrorBody, ParameterValidationError, ValidationErrorBody};
pub use geo::{
    BBox, Feature, FeatureCollection, FeatureId, Geometry, GeometryCollection, Position,
};
pub use location::{
    Location, LocationDbRequest, LocationDeviceEventData, LocationEventKind, LocationEventRecord,
    LocationEventRequest, LocationFloorEventData, LocationRequest, LocationServiceEventData,
    TenantMovedEventData,
};
pub use organization::{
    IloqLockGroupConfig, Organization, OrganizationConfig, OrganizationRequest, Permission,
    SynchronizedType,
};
pub use tag::{
    BookingTag, BookingTagCalendar, NameTag, NameTagInstallationRequest, NextBookingSlot, Tag,
};
pub use unit::{PublicUnit, Tenant, Unit, UnitDbRequest, UnitRequest};
pub use user::{Profile, User};
