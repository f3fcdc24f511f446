//! Snapshot v2 of the domain model
//!
//! The current contract surface. Relative to v1: apartments became
//! units, tags and tenants became closed unions, booking connectors and
//! the iLOQ organization config arrived, and every date-time now has to
//! carry an explicit UTC offset.

use super::{event, event_with, tagged_envelope};
use crate::error::Result;
use crate::format::Format;
use crate::registry::ShapeRegistry;
use crate::shape::{Field, Shape, TaggedUnion, TypeExpr};

/// Date-times in v2 must carry an explicit UTC offset.
fn dt() -> TypeExpr {
    TypeExpr::format(Format::DateTimeOffset)
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

    reg.define("FreeBookingSlot", TypeExpr::Object(event("free")))?;
    reg.define(
        "EventBookingSlot",
        TypeExpr::object(vec![
            Field::required("type", TypeExpr::literal("event")),
            Field::required("from", dt()),
            Field::required("to", dt()),
        ]),
    )?;
    reg.define(
        "NextBookingSlot",
        TypeExpr::Union(
            TaggedUnion::new("type")
                .variant("free", TypeExpr::reference("FreeBookingSlot"))
                .variant("event", TypeExpr::reference("EventBookingSlot")),
        ),
    )?;

    let tag_base = Shape::new(vec![
        Field::required("id", TypeExpr::String),
        Field::required("organization_id", TypeExpr::String),
        Field::required("last_gateway_id", TypeExpr::String),
        Field::required("last_heartbeat_at", dt()),
    ]);

    let name_tag = tag_base.extend(vec![
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

    let booking_tag = tag_base.extend(vec![
        Field::required("type", TypeExpr::literal("bookingtag")),
        Field::required("resource_id", TypeExpr::String),
        Field::required("calendar", TypeExpr::array(TypeExpr::reference("BookingTagCalendar"))),
        Field::optional("next_booking", TypeExpr::reference("NextBookingSlot")),
    ]);
    reg.define("BookingTag", TypeExpr::Object(booking_tag))?;

    // The tag kinds are a closed set since v2.
    reg.define(
        "Tag",
        TypeExpr::Union(
            TaggedUnion::new("type")
                .variant("nametag", TypeExpr::reference("NameTag"))
                .variant("bookingtag", TypeExpr::reference("BookingTag")),
        ),
    )?;

    // --- Booking connectors ----------------------------------------------

    reg.define(
        "ConnectorDriverType",
        TypeExpr::vocab(&[
            "wip",
            "bokamera",
            "google-calendar",
            "microsoft-personal",
            "microsoft-resource",
        ]),
    )?;

    reg.define("WipDriverConfig", TypeExpr::object(vec![]))?;
    reg.define(
        "BokameraDriverConfig",
        TypeExpr::object(vec![
            Field::required("api_key", TypeExpr::String),
            Field::optional("site_id", TypeExpr::String),
        ]),
    )?;
    reg.define(
        "GoogleCalendarDriverConfig",
        TypeExpr::object(vec![
            Field::required("calendar_id", TypeExpr::String),
            Field::required("service_account_email", TypeExpr::format(Format::Email)),
        ]),
    )?;
    reg.define(
        "MicrosoftPersonalDriverConfig",
        TypeExpr::object(vec![
            Field::required("tenant_id", TypeExpr::String),
            Field::required("client_id", TypeExpr::String),
        ]),
    )?;
    reg.define(
        "MicrosoftResourceDriverConfig",
        TypeExpr::object(vec![
            Field::required("tenant_id", TypeExpr::String),
            Field::required("client_id", TypeExpr::String),
            Field::required("resource_mailbox", TypeExpr::format(Format::Email)),
        ]),
    )?;

    let connector_variant = |driver: &str, config: &str| {
        Shape::new(vec![
            Field::required("driver_type", TypeExpr::literal(driver)),
            Field::required("name", TypeExpr::String),
            Field::required("config", TypeExpr::reference(config)),
        ])
    };
    let connector_variants = [
        ("wip", connector_variant("wip", "WipDriverConfig")),
        ("bokamera", connector_variant("bokamera", "BokameraDriverConfig")),
        (
            "google-calendar",
            connector_variant("google-calendar", "GoogleCalendarDriverConfig"),
        ),
        (
            "microsoft-personal",
            connector_variant("microsoft-personal", "MicrosoftPersonalDriverConfig"),
        ),
        (
            "microsoft-resource",
            connector_variant("microsoft-resource", "MicrosoftResourceDriverConfig"),
        ),
    ];

    reg.define(
        "ConnectorRequest",
        tagged_envelope("driver_type", &Shape::default(), &connector_variants),
    )?;
    reg.define(
        "Connector",
        tagged_envelope("driver_type", &uuid_entity, &connector_variants),
    )?;

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

    // --- Tenants ---------------------------------------------------------

    let individual_tenant = Shape::new(vec![
        Field::required("type", TypeExpr::literal("individual")),
        Field::required("id", uuid()),
        Field::required("first_name", TypeExpr::String),
        Field::optional("last_name", TypeExpr::String),
        Field::optional("email", TypeExpr::format(Format::Email)),
        Field::optional("active_from", dt()),
        Field::optional("active_to", dt()),
    ]);
    reg.define("IndividualTenant", TypeExpr::Object(individual_tenant))?;

    let company_tenant = Shape::new(vec![
        Field::required("type", TypeExpr::literal("company")),
        Field::required("id", uuid()),
        Field::required("name", TypeExpr::String),
        Field::optional("contact_email", TypeExpr::format(Format::Email)),
        Field::optional("active_from", dt()),
        Field::optional("active_to", dt()),
    ]);
    reg.define("CompanyTenant", TypeExpr::Object(company_tenant))?;

    reg.define(
        "Tenant",
        TypeExpr::Union(
            TaggedUnion::new("type")
                .variant("individual", TypeExpr::reference("IndividualTenant"))
                .variant("company", TypeExpr::reference("CompanyTenant")),
        ),
    )?;

    // --- Units -----------------------------------------------------------

    let unit_request = Shape::new(vec![
        Field::required("location_id", uuid()),
        Field::required("unit", TypeExpr::String),
        Field::required("floor", TypeExpr::Number),
        Field::required("tenants", TypeExpr::array(TypeExpr::reference("Tenant"))),
    ]);
    reg.define("UnitRequest", TypeExpr::Object(unit_request.clone()))?;
    reg.define("PublicUnit", TypeExpr::Object(unit_request.pick(&["unit"])?))?;

    let unit_db_request = unit_request.extend(vec![Field::optional("source_id", TypeExpr::String)]);
    reg.define("UnitDbRequest", TypeExpr::Object(unit_db_request.clone()))?;
    reg.define("Unit", TypeExpr::Object(uuid_entity.merge(&unit_db_request)))?;

    let unit_created = event_with("unit_created", TypeExpr::reference("UnitRequest"));
    let unit_updated = event_with("unit_updated", TypeExpr::reference("UnitRequest"));
    let unit_deleted = event("unit_deleted");
    reg.define("UnitCreatedEvent", TypeExpr::Object(unit_created.clone()))?;
    reg.define("UnitUpdatedEvent", TypeExpr::Object(unit_updated.clone()))?;
    reg.define("UnitDeletedEvent", TypeExpr::Object(unit_deleted.clone()))?;

    // --- Attachments -----------------------------------------------------

    reg.define(
        "AttachmentCategory",
        TypeExpr::vocab(&[
            "energy-declaration-ovk",
            "property-info",
            "restaurant-menu",
            "other",
        ]),
    )?;

    let attachment_request = Shape::new(vec![
        Field::required("category", TypeExpr::reference("AttachmentCategory")),
        Field::optional("active_from", dt()),
        Field::optional("active_to", dt()),
        Field::required("name", TypeExpr::String),
        Field::required("location_ids", TypeExpr::array(uuid())),
        Field::required("content_hash", TypeExpr::String),
        Field::required("mime_type", TypeExpr::String),
    ]);
    reg.define("AttachmentRequest", TypeExpr::Object(attachment_request.clone()))?;

    // The patchable subset: everything the upload pipeline does not own.
    let attachment_patch_request = attachment_request.omit(&["content_hash", "mime_type"])?;
    reg.define(
        "AttachmentPatchRequest",
        TypeExpr::Object(attachment_patch_request.clone()),
    )?;
    reg.define(
        "AttachmentUploadMetadata",
        TypeExpr::Object(attachment_patch_request.omit(&["name", "location_ids"])?),
    )?;
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

    reg.define(
        "EmbeddedUrlIcon",
        TypeExpr::vocab(&["booking", "info", "menu", "other"]),
    )?;

    let embedded_url_request = Shape::new(vec![
        Field::required("name", TypeExpr::String),
        Field::required("url", TypeExpr::format(Format::Url)),
        Field::required("location_ids", TypeExpr::array(uuid())),
        Field::optional("icon", TypeExpr::reference("EmbeddedUrlIcon")),
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

    reg.define("DeviceType", TypeExpr::vocab(&["eloview"]))?;
    reg.define(
        "DeviceState",
        TypeExpr::vocab(&["created", "installed", "decommissioned"]),
    )?;

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
            Field::optional("config", TypeExpr::reference("DeviceConfig")),
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
    reg.define(
        "LocationFloorEventData",
        TypeExpr::object(vec![Field::required("floor", TypeExpr::Number)]),
    )?;
    reg.define(
        "LocationServiceEventData",
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
    let floor_added = event_with("floor_added", TypeExpr::reference("LocationFloorEventData"));
    let floor_removed = event_with("floor_removed", TypeExpr::reference("LocationFloorEventData"));
    let service_opened = event_with("service_opened", TypeExpr::reference("LocationServiceEventData"));
    let service_updated = event_with("service_updated", TypeExpr::reference("LocationServiceEventData"));
    let service_closed = event_with("service_closed", TypeExpr::reference("LocationServiceEventData"));

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
    reg.define("LocationFloorAddedEvent", TypeExpr::Object(floor_added.clone()))?;
    reg.define("LocationFloorRemovedEvent", TypeExpr::Object(floor_removed.clone()))?;
    reg.define("LocationServiceOpenedEvent", TypeExpr::Object(service_opened.clone()))?;
    reg.define("LocationServiceUpdatedEvent", TypeExpr::Object(service_updated.clone()))?;
    reg.define("LocationServiceClosedEvent", TypeExpr::Object(service_closed.clone()))?;

    let location_event_variants = [
        ("device_installed", location_device_installed),
        ("device_uninstalled", location_device_uninstalled),
        ("location_created", location_created),
        ("location_updated", location_updated),
        ("location_deleted", location_deleted),
        ("unit_created", unit_created),
        ("unit_updated", unit_updated),
        ("unit_deleted", unit_deleted),
        ("announcement_linked", announcement_linked),
        ("announcement_unlinked", announcement_unlinked),
        ("attachment_linked", attachment_linked),
        ("attachment_unlinked", attachment_unlinked),
        ("embedded_url_linked", embedded_url_linked),
        ("embedded_url_unlinked", embedded_url_unlinked),
        ("tenant_moved_in", tenant_moved_in),
        ("tenant_moved_out", tenant_moved_out),
        ("floor_added", floor_added),
        ("floor_removed", floor_removed),
        ("service_opened", service_opened),
        ("service_updated", service_updated),
        ("service_closed", service_closed),
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
            "attachments",
            "embedded-urls",
            "locations",
            "units",
        ]),
    )?;

    reg.define(
        "IloqLockGroupConfig",
        TypeExpr::object(vec![
            Field::required("customer_code", TypeExpr::String),
            Field::required("lock_group_id", TypeExpr::String),
        ]),
    )?;
    reg.define(
        "OrganizationConfig",
        TypeExpr::object(vec![Field::optional(
            "iloq",
            TypeExpr::reference("IloqLockGroupConfig"),
        )]),
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
        TypeExpr::Object(string_entity.merge(&organization_request).extend(vec![
            Field::optional("config", TypeExpr::reference("OrganizationConfig")),
        ])),
    )?;

    reg.define(
        "Permission",
        TypeExpr::vocab(&[
            "announcements:create",
            "announcements:update",
            "announcements:delete",
            "attachments:create",
            "attachments:update",
            "attachments:delete",
            "connectors:create",
            "connectors:update",
            "connectors:delete",
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
            "tags:create",
            "tags:update",
            "tags:delete",
            "units:create",
            "units:update",
            "units:delete",
            "units:sync",
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
