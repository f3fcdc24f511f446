//! Snapshot v1 of the domain model
//!
//! The first shipped contract surface. Kept exactly as released so
//! payloads recorded against it stay checkable; `v2` supersedes it.

use super::{event, event_with, tagged_envelope};
use crate::error::Result;
use crate::format::Format;
use crate::registry::ShapeRegistry;
use crate::shape::{Field, Shape, TypeExpr};

/// Date-times in v1 are ISO-8601; a UTC offset was not yet required.
fn dt() -> TypeExpr {
    TypeExpr::format(Format::DateTime)
}

fn uuid() -> TypeExpr {
    TypeExpr::format(Format::Uuid)
}

pub(crate) fn install(reg: &mut ShapeRegistry) -> Result<()> {
    // --- Base shapes -----------------------------------------------------

    // deleted_at and deleted_by are either both present or both absent;
    // the pairing is documented, not enforced by the shape.
    let metadata = Shape::new(vec![
        Field::required("created_at", dt()),
        Field::required("created_by", TypeExpr::format(Format::ActorId))
            .describe("Identity provider user ID"),
        Field::required("updated_at", dt()),
        Field::optional("deleted_at", dt()),
        Field::optional("deleted_by", TypeExpr::format(Format::ActorId))
            .describe("Identity provider user ID"),
    ]);
    reg.define("Metadata", TypeExpr::Object(metadata))?;

    let uuid_entity = Shape::new(vec![
        Field::required("id", uuid()),
        Field::required("meta", TypeExpr::reference("Metadata")),
        Field::required("organization_id", TypeExpr::String),
    ]);
    reg.define("UuidEntity", TypeExpr::Object(uuid_entity.clone()))?;

    let string_entity = Shape::new(vec![
        Field::required("id", TypeExpr::String),
        Field::required("meta", TypeExpr::reference("Metadata")),
        Field::required("organization_id", TypeExpr::String),
    ]);
    reg.define("StringEntity", TypeExpr::Object(string_entity.clone()))?;

    let address = Shape::new(vec![
        Field::required("street", TypeExpr::String).describe("Street address"),
        Field::required("zipcode", TypeExpr::String),
        Field::required("city", TypeExpr::String),
    ]);
    reg.define("Address", TypeExpr::Object(address.clone()))?;

    reg.define(
        "Coordinate",
        TypeExpr::object(vec![
            Field::required("crs", TypeExpr::vocab(&["WGS84", "EPSG:3021"])),
            Field::required("x", TypeExpr::Number),
            Field::required("y", TypeExpr::Number),
        ]),
    )?;

    // --- Tags ------------------------------------------------------------

    let tag = Shape::new(vec![
        Field::required("id", TypeExpr::String),
        Field::required("organization_id", TypeExpr::String),
        Field::required("last_gateway_id", TypeExpr::String),
        Field::required("last_heartbeat_at", dt()),
    ]);
    reg.define("Tag", TypeExpr::Object(tag.clone()))?;

    let name_tag = tag.extend(vec![
        Field::required("type", TypeExpr::literal("nametag")),
        Field::required("location_id", uuid()),
        Field::required("unit", TypeExpr::String),
    ]);
    reg.define("NameTag", TypeExpr::Object(name_tag.clone()))?;

    reg.define(
        "NameTagInstallationRequest",
        TypeExpr::Object(name_tag.pick(&["location_id", "unit"])?),
    )?;

    reg.define(
        "BookingTagCalendar",
        TypeExpr::object(vec![
            Field::required("from", dt()),
            Field::required("to", dt()),
        ]),
    )?;

    let booking_tag = tag.extend(vec![
        Field::required("type", TypeExpr::literal("bookingtag")),
        Field::required("resource_id", TypeExpr::String),
        Field::required("calendar", TypeExpr::array(TypeExpr::reference("BookingTagCalendar"))),
    ]);
    reg.define("BookingTag", TypeExpr::Object(booking_tag))?;

    // --- Announcements ---------------------------------------------------

    let announcement_request = Shape::new(vec![
        Field::required("message", TypeExpr::String),
        Field::required("location_ids", TypeExpr::array(uuid())),
        Field::optional("active_from", dt()),
        Field::optional("active_to", dt()),
    ]);
    reg.define("AnnouncementRequest", TypeExpr::Object(announcement_request.clone()))?;
    reg.define(
        "Announcement",
        TypeExpr::Object(uuid_entity.merge(&announcement_request)),
    )?;

    reg.define(
        "AnnouncementLinkEventData",
        TypeExpr::object(vec![Field::required("announcement_id", TypeExpr::String)]),
    )?;
    let announcement_linked = event_with(
        "announcement_linked",
        TypeExpr::reference("AnnouncementLinkEventData"),
    );
    let announcement_unlinked = event_with(
        "announcement_unlinked",
        TypeExpr::reference("AnnouncementLinkEventData"),
    );
    reg.define("AnnouncementLinkedEvent", TypeExpr::Object(announcement_linked.clone()))?;
    reg.define("AnnouncementUnlinkedEvent", TypeExpr::Object(announcement_unlinked.clone()))?;

    // --- Apartments ------------------------------------------------------

    reg.define(
        "Tenant",
        TypeExpr::object(vec![
            Field::required("id", uuid()),
            Field::required("first_name", TypeExpr::String),
            Field::optional("last_name", TypeExpr::String),
            Field::optional("active_from", dt()),
            Field::optional("active_to", dt()),
        ]),
    )?;

    let apartment_request = Shape::new(vec![
        Field::required("location_id", uuid()),
        Field::required("unit", TypeExpr::String),
        Field::required("floor", TypeExpr::Number),
        Field::required("tenants", TypeExpr::array(TypeExpr::reference("Tenant"))),
        Field::optional("source_id", TypeExpr::String),
    ]);
    reg.define("ApartmentRequest", TypeExpr::Object(apartment_request.clone()))?;
    reg.define("PublicApartment", TypeExpr::Object(apartment_request.pick(&["unit"])?))?;
    reg.define("Apartment", TypeExpr::Object(uuid_entity.merge(&apartment_request)))?;

    let apartment_created = event_with("apartment_created", TypeExpr::reference("ApartmentRequest"));
    let apartment_updated = event_with("apartment_updated", TypeExpr::reference("ApartmentRequest"));
    reg.define("ApartmentCreatedEvent", TypeExpr::Object(apartment_created.clone()))?;
    reg.define("ApartmentUpdatedEvent", TypeExpr::Object(apartment_updated.clone()))?;

    // --- Attachments -----------------------------------------------------

    reg.define(
        "AttachmentCategory",
        TypeExpr::vocab(&["energy-declaration-ovk", "property-info", "other"]),
    )?;

    let attachment_upload_metadata = Shape::new(vec![
        Field::required("category", TypeExpr::reference("AttachmentCategory")),
        Field::optional("active_from", dt()),
        Field::optional("active_to", dt()),
    ]);
    reg.define(
        "AttachmentUploadMetadata",
        TypeExpr::Object(attachment_upload_metadata.clone()),
    )?;

    let attachment_patch_request = attachment_upload_metadata.extend(vec![
        Field::required("name", TypeExpr::String),
        Field::required("location_ids", TypeExpr::array(uuid())),
    ]);
    reg.define(
        "AttachmentPatchRequest",
        TypeExpr::Object(attachment_patch_request.clone()),
    )?;

    let attachment_request = attachment_patch_request.extend(vec![
        Field::required("content_hash", TypeExpr::String),
        Field::required("mime_type", TypeExpr::String),
    ]);
    reg.define("AttachmentRequest", TypeExpr::Object(attachment_request.clone()))?;
    reg.define("Attachment", TypeExpr::Object(uuid_entity.merge(&attachment_request)))?;

    reg.define(
        "AttachmentLinkEventData",
        TypeExpr::object(vec![Field::required("attachment_id", uuid())]),
    )?;
    let attachment_linked = event_with(
        "attachment_linked",
        TypeExpr::reference("AttachmentLinkEventData"),
    );
    let attachment_unlinked = event_with(
        "attachment_unlinked",
        TypeExpr::reference("AttachmentLinkEventData"),
    );
    reg.define("AttachmentLinkedEvent", TypeExpr::Object(attachment_linked.clone()))?;
    reg.define("AttachmentUnlinkedEvent", TypeExpr::Object(attachment_unlinked.clone()))?;

    // --- Embedded URLs ---------------------------------------------------

    let embedded_url_request = Shape::new(vec![
        Field::required("name", TypeExpr::String),
        Field::required("url", TypeExpr::format(Format::Url)),
        Field::required("location_ids", TypeExpr::array(uuid())),
        Field::optional("active_from", dt()),
        Field::optional("active_to", dt()),
    ]);
    reg.define("EmbeddedUrlRequest", TypeExpr::Object(embedded_url_request.clone()))?;
    reg.define("EmbeddedUrl", TypeExpr::Object(uuid_entity.merge(&embedded_url_request)))?;

    reg.define(
        "EmbeddedUrlLinkEventData",
        TypeExpr::object(vec![Field::required("embedded_url_id", uuid())]),
    )?;
    let embedded_url_linked = event_with(
        "embedded_url_linked",
        TypeExpr::reference("EmbeddedUrlLinkEventData"),
    );
    let embedded_url_unlinked = event_with(
        "embedded_url_unlinked",
        TypeExpr::reference("EmbeddedUrlLinkEventData"),
    );
    reg.define("EmbeddedUrlLinkedEvent", TypeExpr::Object(embedded_url_linked.clone()))?;
    reg.define("EmbeddedUrlUnlinkedEvent", TypeExpr::Object(embedded_url_unlinked.clone()))?;

    // --- Locations -------------------------------------------------------

    let location_request = address.merge(&Shape::new(vec![
        Field::optional("site_name", TypeExpr::String),
        Field::optional("coordinate", TypeExpr::reference("Coordinate")),
    ]));
    reg.define("LocationRequest", TypeExpr::Object(location_request.clone()))?;

    let location_db_request =
        location_request.extend(vec![Field::optional("source_id", TypeExpr::String)]);
    reg.define("LocationDbRequest", TypeExpr::Object(location_db_request.clone()))?;
    reg.define("Location", TypeExpr::Object(uuid_entity.merge(&location_db_request)))?;

    // --- Devices ---------------------------------------------------------

    reg.define("DeviceType", TypeExpr::literal("eloview"))?;
    reg.define("DeviceState", TypeExpr::vocab(&["created", "installed"]))?;

    reg.define(
        "DeviceConfig",
        TypeExpr::map(TypeExpr::OneOf(vec![
            TypeExpr::Bool,
            TypeExpr::Number,
            TypeExpr::String,
        ])),
    )?;

    let device_request = Shape::new(vec![
        Field::optional("location_id", uuid()),
        Field::optional("placement", TypeExpr::String),
        Field::optional("license_expiry", dt()),
        Field::optional("warranty_expiry", dt()),
    ]);
    reg.define("DeviceRequest", TypeExpr::Object(device_request.clone()))?;

    let device_db_request = Shape::new(vec![
        Field::required("name", TypeExpr::String).describe("Name of the device"),
        Field::required("hardware_id", TypeExpr::String),
        Field::required("source_id", TypeExpr::String).describe("Provider's ID for this device"),
        Field::required("organization_id", TypeExpr::String),
        Field::required("type", TypeExpr::reference("DeviceType")),
        Field::required("state", TypeExpr::reference("DeviceState")),
    ])
    .merge(&device_request);
    reg.define("DeviceDbRequest", TypeExpr::Object(device_db_request.clone()))?;

    reg.define(
        "DeviceStatus",
        TypeExpr::object(vec![
            Field::required("hardware_online", TypeExpr::Bool),
            Field::required("software_online", TypeExpr::Bool),
            Field::optional("last_seen", dt()),
        ]),
    )?;

    reg.define(
        "Device",
        TypeExpr::Object(string_entity.merge(&device_db_request).extend(vec![
            Field::required("status", TypeExpr::reference("DeviceStatus")),
        ])),
    )?;

    reg.define(
        "DeviceInstallationRequest",
        TypeExpr::object(vec![
            Field::required("location_id", uuid()),
            Field::required("placement", TypeExpr::String)
                .describe("Specific place within the location where the device is installed"),
        ]),
    )?;

    reg.define(
        "DeviceEventQueryParams",
        TypeExpr::object(vec![
            Field::optional("id", TypeExpr::String).describe("DeviceEvent ID"),
            Field::optional("device_id", TypeExpr::String)
                .describe("Device for which to retrieve events"),
            Field::optional("organization_id", TypeExpr::String)
                .describe("Organization for which to retrieve events"),
            Field::optional("date_start", dt())
                .describe("Start of time range for which to retrieve events"),
            Field::optional("date_end", dt())
                .describe("End of time range for which to retrieve events"),
            Field::optional("offset", TypeExpr::Number).describe(
                "Offset into query results to start returning from. \
                 No more than 1000 items will be returned per request.",
            ),
        ]),
    )?;

    // --- Device events ---------------------------------------------------

    reg.define(
        "DeviceStatusChangeEventData",
        TypeExpr::object(vec![Field::required("online", TypeExpr::Bool)]),
    )?;
    reg.define(
        "DeviceInstallationEventData",
        TypeExpr::object(vec![Field::required("location", TypeExpr::reference("Location"))]),
    )?;

    let device_creation = event("creation");
    let device_reboot = event("reboot");
    let device_status_software = event_with(
        "status-change-software",
        TypeExpr::reference("DeviceStatusChangeEventData"),
    );
    let device_status_hardware = event_with(
        "status-change-hardware",
        TypeExpr::reference("DeviceStatusChangeEventData"),
    );
    let device_installation = event_with(
        "installation",
        TypeExpr::reference("DeviceInstallationEventData"),
    );
    let device_uninstall = event("uninstall");
    let device_factory_reset = event("factory-reset");

    reg.define("DeviceCreationEvent", TypeExpr::Object(device_creation.clone()))?;
    reg.define("DeviceRebootEvent", TypeExpr::Object(device_reboot.clone()))?;
    reg.define(
        "DeviceSoftwareStatusChangeEvent",
        TypeExpr::Object(device_status_software.clone()),
    )?;
    reg.define(
        "DeviceHardwareStatusChangeEvent",
        TypeExpr::Object(device_status_hardware.clone()),
    )?;
    reg.define("DeviceInstallationEvent", TypeExpr::Object(device_installation.clone()))?;
    reg.define("DeviceUninstallEvent", TypeExpr::Object(device_uninstall.clone()))?;
    reg.define("DeviceFactoryResetEvent", TypeExpr::Object(device_factory_reset.clone()))?;

    let device_event_variants = [
        ("reboot", device_reboot),
        ("status-change-software", device_status_software),
        ("status-change-hardware", device_status_hardware),
        ("creation", device_creation),
        ("installation", device_installation),
        ("uninstall", device_uninstall),
        ("factory-reset", device_factory_reset),
    ];

    let device_id = Shape::new(vec![Field::required("device_id", TypeExpr::String)]);
    reg.define(
        "DeviceEventRequest",
        tagged_envelope("type", &device_id, &device_event_variants),
    )?;
    reg.define(
        "DeviceEvent",
        tagged_envelope(
            "type",
            &string_entity.merge(&device_id),
            &device_event_variants,
        ),
    )?;

    // --- Location events -------------------------------------------------

    reg.define(
        "LocationDeviceEventData",
        TypeExpr::object(vec![Field::required("device_id", TypeExpr::String)]),
    )?;
    reg.define(
        "TenantMovedEventData",
        TypeExpr::object(vec![Field::required("name", TypeExpr::String)]),
    )?;

    let location_created = event_with("location_created", TypeExpr::reference("LocationRequest"));
    let location_updated = event_with("location_updated", TypeExpr::reference("LocationRequest"));
    let location_deleted = event("location_deleted");
    let location_device_installed = event_with(
        "device_installed",
        TypeExpr::reference("LocationDeviceEventData"),
    );
    let location_device_uninstalled = event_with(
        "device_uninstalled",
        TypeExpr::reference("LocationDeviceEventData"),
    );
    let tenant_moved_in = event_with("tenant_moved_in", TypeExpr::reference("TenantMovedEventData"));
    let tenant_moved_out = event_with("tenant_moved_out", TypeExpr::reference("TenantMovedEventData"));

    reg.define("LocationCreatedEvent", TypeExpr::Object(location_created.clone()))?;
    reg.define("LocationUpdatedEvent", TypeExpr::Object(location_updated.clone()))?;
    reg.define("LocationDeletedEvent", TypeExpr::Object(location_deleted.clone()))?;
    reg.define(
        "LocationDeviceInstalledEvent",
        TypeExpr::Object(location_device_installed.clone()),
    )?;
    reg.define(
        "LocationDeviceUninstalledEvent",
        TypeExpr::Object(location_device_uninstalled.clone()),
    )?;
    reg.define("TenantMovedInEvent", TypeExpr::Object(tenant_moved_in.clone()))?;
    reg.define("TenantMovedOutEvent", TypeExpr::Object(tenant_moved_out.clone()))?;

    let location_event_variants = [
        ("device_installed", location_device_installed),
        ("device_uninstalled", location_device_uninstalled),
        ("location_created", location_created),
        ("location_updated", location_updated),
        ("location_deleted", location_deleted),
        ("apartment_created", apartment_created),
        ("apartment_updated", apartment_updated),
        ("announcement_linked", announcement_linked),
        ("announcement_unlinked", announcement_unlinked),
        ("attachment_linked", attachment_linked),
        ("attachment_unlinked", attachment_unlinked),
        ("embedded_url_linked", embedded_url_linked),
        ("embedded_url_unlinked", embedded_url_unlinked),
        ("tenant_moved_in", tenant_moved_in),
        ("tenant_moved_out", tenant_moved_out),
    ];

    let location_id = Shape::new(vec![Field::required("location_id", uuid())]);
    reg.define(
        "LocationEventRequest",
        tagged_envelope("type", &location_id, &location_event_variants),
    )?;
    reg.define(
        "LocationEvent",
        tagged_envelope(
            "type",
            &string_entity.merge(&location_id),
            &location_event_variants,
        ),
    )?;

    // --- Organizations ---------------------------------------------------

    reg.define(
        "SynchronizedType",
        TypeExpr::vocab(&[
            "announcements",
            "apartments",
            "attachments",
            "embedded-urls",
            "locations",
        ]),
    )?;

    let organization_request = Shape::new(vec![
        Field::required("name", TypeExpr::String),
        Field::required(
            "synchronized_types",
            TypeExpr::array(TypeExpr::reference("SynchronizedType")),
        ),
    ]);
    reg.define("OrganizationRequest", TypeExpr::Object(organization_request.clone()))?;
    reg.define(
        "Organization",
        TypeExpr::Object(string_entity.merge(&organization_request)),
    )?;

    reg.define(
        "Permission",
        TypeExpr::vocab(&[
            "announcements:create",
            "announcements:update",
            "announcements:delete",
            "apartments:create",
            "apartments:update",
            "apartments:delete",
            "attachments:create",
            "attachments:update",
            "attachments:delete",
            "devices:create",
            "devices:update",
            "devices:delete",
            "devices:factory-reset",
            "devices:uninstall",
            "embedded-urls:create",
            "embedded-urls:update",
            "embedded-urls:delete",
            "locations:create",
            "locations:update",
            "locations:delete",
            "users:read-all",
        ]),
    )?;

    // --- Users -----------------------------------------------------------

    reg.define("Profile", TypeExpr::map(TypeExpr::Json))?;

    reg.define(
        "User",
        TypeExpr::object(vec![
            Field::required("id", TypeExpr::format(Format::ActorId))
                .describe("Identity provider user ID"),
            Field::required("meta", TypeExpr::reference("Metadata")),
            Field::required("name", TypeExpr::String),
            Field::required("email", TypeExpr::format(Format::Email)),
        ]),
    )?;

    // --- Errors ----------------------------------------------------------

    let error = Shape::new(vec![
        Field::required("message", TypeExpr::String).describe("Error message"),
    ]);
    reg.define("Error", TypeExpr::Object(error.clone()))?;

    // Self-referential: nested errors are lists of this same shape,
    // resolved lazily through the registry.
    reg.define(
        "ParameterValidationError",
        TypeExpr::object(vec![
            Field::required("msg", TypeExpr::String),
            Field::required("param", TypeExpr::String),
            Field::required("value", TypeExpr::String),
            Field::required(
                "location",
                TypeExpr::vocab(&["body", "query", "params", "cookies", "headers"]),
            ),
            Field::optional(
                "nestedErrors",
                TypeExpr::array(TypeExpr::reference("ParameterValidationError")),
            ),
        ]),
    )?;

    reg.define(
        "ValidationError",
        TypeExpr::Object(error.extend(vec![Field::required(
            "errors",
            TypeExpr::array(TypeExpr::reference("ParameterValidationError")),
        )])),
    )?;

    Ok(())
}
