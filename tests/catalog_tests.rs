//! Catalog integrity, snapshot compatibility and typed decoding

use hemvist_schemas::models::{
    Connector, ConnectorDriver, LocationEventKind, LocationEventRequest, Organization, Tag, Unit,
};
use hemvist_schemas::{Catalog, CompatibilityChecker, SchemaError, ShapeKind};
use serde_json::json;

// =============================================================================
// Snapshot integrity
// =============================================================================

#[test]
fn test_both_snapshots_build_and_seal() {
    for catalog in [Catalog::v1().unwrap(), Catalog::v2().unwrap()] {
        assert!(catalog.registry().is_sealed());
        assert!(catalog.registry().len() > 60);
    }
}

#[test]
fn test_manifest_checksums_are_reproducible() {
    let first = Catalog::v2().unwrap().manifest().unwrap();
    let second = Catalog::v2().unwrap().manifest().unwrap();
    assert_eq!(first.manifest_checksum, second.manifest_checksum);
    assert_eq!(first.stats.total_shapes, second.stats.total_shapes);
}

#[test]
fn test_manifest_survives_a_round_trip_to_disk() {
    let manifest = Catalog::v2().unwrap().manifest().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

    let reloaded: hemvist_schemas::RegistryManifest =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded.manifest_checksum, manifest.manifest_checksum);
    assert_eq!(reloaded.version, "2.0.0");
}

#[test]
fn test_manifest_counts_shape_kinds() {
    let manifest = Catalog::v2().unwrap().manifest().unwrap();
    assert!(manifest.stats.objects > 40);
    // Tag, Tenant, NextBookingSlot, ConnectorRequest, Connector, the two
    // event envelopes per entity, Geometry.
    assert!(manifest.stats.unions >= 8);
    assert!(manifest.stats.enums >= 5);
    let tag = manifest.get("Tag").unwrap();
    assert_eq!(tag.kind, ShapeKind::Union);
}

#[test]
fn test_recursive_group_is_reported() {
    let catalog = Catalog::v2().unwrap();
    let groups = catalog.registry().graph().recursive_groups();
    assert!(groups
        .iter()
        .any(|group| group == &vec!["ParameterValidationError".to_string()]));
}

#[test]
fn test_dependency_queries() {
    let catalog = Catalog::v2().unwrap();
    let graph = catalog.registry().graph();

    let deps = graph.dependencies("Location");
    assert!(deps.contains(&"Metadata".to_string()));
    assert!(deps.contains(&"Coordinate".to_string()));

    let dependents = graph.dependents("Metadata");
    assert!(dependents.contains(&"Location".to_string()));
    assert!(dependents.contains(&"User".to_string()));
}

#[test]
fn test_unknown_shape_suggests_a_name() {
    let catalog = Catalog::v2().unwrap();
    let err = catalog.registry().get("LocationEvnt").unwrap_err();
    match err {
        SchemaError::NotFound { suggestion, .. } => {
            assert_eq!(suggestion.as_deref(), Some("LocationEvent"));
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

// =============================================================================
// Snapshot compatibility
// =============================================================================

#[test]
fn test_v1_to_v2_compatibility_report() {
    let v1 = Catalog::v1().unwrap();
    let v2 = Catalog::v2().unwrap();
    let results = CompatibilityChecker::new()
        .check_registries(v1.registry(), v2.registry())
        .unwrap();

    // Apartments became units: the shape is gone from v2.
    assert!(!results["Apartment"].is_compatible);
    assert!(results["Apartment"].summary.contains("removed"));

    // The category vocabulary only widened.
    assert!(results["AttachmentCategory"].is_compatible);

    // Date-times got stricter across the snapshot.
    assert!(results["Metadata"].is_breaking);

    // Unchanged shapes stay unchanged.
    assert!(results["Address"].is_compatible);
    assert!(results["Address"].changes.is_empty());
}

#[test]
fn test_synchronized_types_swap_is_breaking() {
    let v1 = Catalog::v1().unwrap();
    let v2 = Catalog::v2().unwrap();
    let results = CompatibilityChecker::new()
        .check_registries(v1.registry(), v2.registry())
        .unwrap();

    // 'apartments' was removed from the vocabulary; 'units' was added.
    let sync = &results["SynchronizedType"];
    assert!(sync.is_breaking);
    assert!(sync
        .changes
        .iter()
        .any(|c| c.old_value.as_deref() == Some("apartments") && c.is_breaking));
    assert!(sync
        .changes
        .iter()
        .any(|c| c.new_value.as_deref() == Some("units") && !c.is_breaking));
}

// =============================================================================
// Typed decoding
// =============================================================================

#[test]
fn test_decode_tag_union() {
    let catalog = Catalog::latest().unwrap();
    let value = json!({
        "type": "nametag",
        "id": "tag-1",
        "organization_id": "org-1",
        "last_gateway_id": "gw-9",
        "last_heartbeat_at": "2024-03-01T10:15:00Z",
        "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
        "unit": "1203"
    });

    let tag: Tag = catalog.decode(&value).unwrap().unwrap();
    match tag {
        Tag::Name(name_tag) => assert_eq!(name_tag.unit, "1203"),
        other => panic!("Expected name tag, got {:?}", other),
    }
}

#[test]
fn test_decode_rejects_invalid_payload_with_report() {
    let catalog = Catalog::latest().unwrap();
    let value = json!({ "type": "keytag" });
    let outcome = catalog.decode::<Tag>(&value).unwrap();
    let report = outcome.unwrap_err();
    assert_eq!(report.shape, "Tag");
}

#[test]
fn test_decode_unit_with_tenants() {
    let catalog = Catalog::latest().unwrap();
    let value = json!({
        "id": "9f0d8a4e-6a3b-4c8e-b9f2-1c2d3e4f5a6b",
        "organization_id": "org-1",
        "meta": {
            "created_at": "2024-03-01T10:15:00Z",
            "created_by": format!("auth0|{}", "a".repeat(24)),
            "updated_at": "2024-03-01T10:15:00Z"
        },
        "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
        "unit": "1203",
        "floor": 12,
        "tenants": [
            { "type": "individual", "id": "7c1e2d3f-4a5b-6c7d-8e9f-0a1b2c3d4e5f", "first_name": "Anna" },
            { "type": "company", "id": "7c1e2d3f-4a5b-6c7d-8e9f-0a1b2c3d4e60", "name": "Frisör Saxen AB" }
        ]
    });

    let unit: Unit = catalog.decode(&value).unwrap().unwrap();
    assert_eq!(unit.tenants.len(), 2);
    assert_eq!(unit.floor, 12.0);
}

#[test]
fn test_decode_connector() {
    let catalog = Catalog::latest().unwrap();
    let value = json!({
        "id": "9f0d8a4e-6a3b-4c8e-b9f2-1c2d3e4f5a6b",
        "organization_id": "org-1",
        "meta": {
            "created_at": "2024-03-01T10:15:00Z",
            "created_by": format!("auth0|{}", "b".repeat(24)),
            "updated_at": "2024-03-01T10:15:00Z"
        },
        "name": "Sauna",
        "driver_type": "google-calendar",
        "config": {
            "calendar_id": "sauna",
            "service_account_email": "svc@example.iam.gserviceaccount.com"
        }
    });

    let connector: Connector = catalog.decode(&value).unwrap().unwrap();
    assert!(matches!(
        connector.driver,
        ConnectorDriver::GoogleCalendar { .. }
    ));
}

#[test]
fn test_decode_location_event_round_trip() {
    let catalog = Catalog::latest().unwrap();
    let value = json!({
        "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
        "type": "floor_added",
        "data": { "floor": 6 }
    });

    let request: LocationEventRequest = catalog.decode(&value).unwrap().unwrap();
    assert!(matches!(request.event, LocationEventKind::FloorAdded { .. }));

    // Re-validating the serialized form succeeds with an identical result.
    let back = serde_json::to_value(&request).unwrap();
    assert!(catalog.validate("LocationEventRequest", &back).unwrap().is_ok());
    let again: LocationEventRequest = catalog.decode(&back).unwrap().unwrap();
    assert_eq!(again, request);
}

#[test]
fn test_decode_organization_with_iloq_config() {
    let catalog = Catalog::latest().unwrap();
    let value = json!({
        "id": "org-1",
        "organization_id": "org-1",
        "meta": {
            "created_at": "2024-03-01T10:15:00Z",
            "created_by": format!("auth0|{}", "c".repeat(24)),
            "updated_at": "2024-03-01T10:15:00Z"
        },
        "name": "Bostadsbolaget",
        "synchronized_types": ["locations", "units"],
        "config": {
            "iloq": { "customer_code": "BB01", "lock_group_id": "LG-7" }
        }
    });

    let organization: Organization = catalog.decode(&value).unwrap().unwrap();
    let config = organization.config.unwrap();
    assert_eq!(config.iloq.unwrap().lock_group_id, "LG-7");
}
