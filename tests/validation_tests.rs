//! Validation scenarios against the contract catalog
//!
//! Exercises the documented behavior of the validator: missing fields,
//! format violations, vocabulary checks, union dispatch and the
//! recursive error shape.

use hemvist_schemas::{Catalog, ViolationKind};
use rstest::rstest;
use serde_json::{json, Value};

fn latest() -> Catalog {
    Catalog::latest().unwrap()
}

// =============================================================================
// Plain shapes
// =============================================================================

#[test]
fn test_address_validates() {
    let catalog = latest();
    let value = json!({ "street": "Main St 1", "zipcode": "12345", "city": "Metropolis" });
    assert!(catalog.validate("Address", &value).unwrap().is_ok());
}

#[test]
fn test_address_missing_zipcode_fails() {
    let catalog = latest();
    let value = json!({ "street": "Main St 1", "city": "Metropolis" });
    let report = catalog.validate("Address", &value).unwrap().unwrap_err();

    assert_eq!(report.total(), 1);
    let violation = &report.errors[0];
    assert_eq!(violation.kind, ViolationKind::MissingField);
    assert_eq!(violation.param, "zipcode");
}

#[test]
fn test_validation_is_idempotent() {
    let catalog = latest();
    let value = json!({ "street": "Main St 1", "zipcode": "12345", "city": "Metropolis" });
    let first = catalog.validate("Address", &value).unwrap();
    let second = catalog.validate("Address", &value).unwrap();
    assert!(first.is_ok());
    assert!(second.is_ok());
}

// =============================================================================
// Formats
// =============================================================================

fn metadata(created_by: &str) -> Value {
    json!({
        "created_at": "2024-03-01T10:15:00Z",
        "created_by": created_by,
        "updated_at": "2024-03-01T10:15:00Z"
    })
}

#[test]
fn test_actor_id_format_enforced() {
    let catalog = latest();

    // 11 hex characters is not a provider-issued id.
    let report = catalog
        .validate("Metadata", &metadata("auth0|abc123abc12"))
        .unwrap()
        .unwrap_err();
    let violation = &report.errors[0];
    assert_eq!(violation.param, "created_by");
    assert!(matches!(violation.kind, ViolationKind::FormatViolation { .. }));

    let ok = format!("auth0|{}", "a".repeat(24));
    assert!(catalog.validate("Metadata", &metadata(&ok)).unwrap().is_ok());
}

#[rstest]
#[case("2024-03-01T10:15:00Z", true)]
#[case("2024-03-01T10:15:00+02:00", true)]
#[case("2024-03-01T10:15:00", false)]
#[case("not a date", false)]
fn test_v2_datetimes_require_utc_offset(#[case] timestamp: &str, #[case] valid: bool) {
    let catalog = latest();
    let value = json!({ "from": timestamp, "to": "2024-03-01T11:00:00Z" });
    let outcome = catalog.validate("BookingTagCalendar", &value).unwrap();
    assert_eq!(outcome.is_ok(), valid, "timestamp {timestamp}");
}

#[test]
fn test_v1_datetimes_accept_missing_offset() {
    let catalog = Catalog::v1().unwrap();
    let value = json!({ "from": "2024-03-01T10:15:00", "to": "2024-03-01T11:00:00" });
    assert!(catalog.validate("BookingTagCalendar", &value).unwrap().is_ok());
}

// =============================================================================
// Vocabularies
// =============================================================================

#[test]
fn test_permission_vocabulary_is_closed() {
    let catalog = latest();
    assert!(catalog
        .validate("Permission", &json!("devices:delete"))
        .unwrap()
        .is_ok());

    let report = catalog
        .validate("Permission", &json!("bogus:permission"))
        .unwrap()
        .unwrap_err();
    assert_eq!(report.errors[0].kind, ViolationKind::NotInVocabulary);
}

#[rstest]
#[case("energy-declaration-ovk")]
#[case("property-info")]
#[case("restaurant-menu")]
#[case("other")]
fn test_attachment_categories(#[case] category: &str) {
    let catalog = latest();
    assert!(catalog
        .validate("AttachmentCategory", &json!(category))
        .unwrap()
        .is_ok());
}

#[test]
fn test_restaurant_menu_is_new_in_v2() {
    let v1 = Catalog::v1().unwrap();
    let outcome = v1.validate("AttachmentCategory", &json!("restaurant-menu")).unwrap();
    assert!(outcome.is_err());
}

// =============================================================================
// Discriminated unions
// =============================================================================

fn name_tag_payload(tag_type: &str) -> Value {
    json!({
        "type": tag_type,
        "id": "tag-1",
        "organization_id": "org-1",
        "last_gateway_id": "gw-9",
        "last_heartbeat_at": "2024-03-01T10:15:00Z",
        "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
        "unit": "1203"
    })
}

#[test]
fn test_tag_union_accepts_matching_variant() {
    let catalog = latest();
    assert!(catalog
        .validate("Tag", &name_tag_payload("nametag"))
        .unwrap()
        .is_ok());
}

#[test]
fn test_tag_union_rejects_mislabeled_payload_within_variant() {
    // The tag says bookingtag, the fields are a nametag's: the variant
    // matches but its payload does not.
    let catalog = latest();
    let report = catalog
        .validate("Tag", &name_tag_payload("bookingtag"))
        .unwrap()
        .unwrap_err();

    match &report.errors[0].kind {
        ViolationKind::VariantMismatch { literal, .. } => assert_eq!(literal, "bookingtag"),
        other => panic!("Expected VariantMismatch, got {:?}", other),
    }
    assert!(report.errors[0]
        .nested
        .iter()
        .any(|v| v.kind == ViolationKind::MissingField && v.param == "resource_id"));
}

#[test]
fn test_tag_union_rejects_unknown_discriminant() {
    let catalog = latest();
    let report = catalog
        .validate("Tag", &name_tag_payload("keytag"))
        .unwrap()
        .unwrap_err();

    let violation = &report.errors[0];
    assert!(matches!(
        violation.kind,
        ViolationKind::UnknownDiscriminant { .. }
    ));
    assert_eq!(violation.param, "type");
    assert!(violation.msg.contains("nametag"));
    assert!(violation.msg.contains("bookingtag"));
}

#[test]
fn test_location_event_envelope() {
    let catalog = latest();
    let value = json!({
        "location_id": "4b4b1c8a-9a9c-4f72-8d2e-24c0d1f6b9aa",
        "type": "tenant_moved_in",
        "data": { "name": "Anna Ek" }
    });
    assert!(catalog.validate("LocationEventRequest", &value).unwrap().is_ok());

    // The envelope's parent id is required on every variant.
    let report = catalog
        .validate(
            "LocationEventRequest",
            &json!({ "type": "tenant_moved_in", "data": { "name": "Anna Ek" } }),
        )
        .unwrap()
        .unwrap_err();
    assert!(report.errors[0]
        .nested
        .iter()
        .any(|v| v.kind == ViolationKind::MissingField && v.param == "location_id"));
}

#[test]
fn test_connector_union_dispatches_on_driver_type() {
    let catalog = latest();
    let value = json!({
        "driver_type": "bokamera",
        "name": "Laundry room",
        "config": { "api_key": "bk-123" }
    });
    assert!(catalog.validate("ConnectorRequest", &value).unwrap().is_ok());

    let report = catalog
        .validate(
            "ConnectorRequest",
            &json!({
                "driver_type": "fortnox",
                "name": "Laundry room",
                "config": {}
            }),
        )
        .unwrap()
        .unwrap_err();
    assert!(matches!(
        report.errors[0].kind,
        ViolationKind::UnknownDiscriminant { .. }
    ));
}

// =============================================================================
// Recursive error shape
// =============================================================================

fn parameter_error(depth: usize) -> Value {
    let mut value = json!({
        "msg": "invalid value",
        "param": "zipcode",
        "value": "12",
        "location": "body"
    });
    for _ in 0..depth {
        value = json!({
            "msg": "nested failure",
            "param": "tenants",
            "value": "[...]",
            "location": "body",
            "nestedErrors": [value]
        });
    }
    value
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
fn test_recursive_error_shape_validates_at_depth(#[case] depth: usize) {
    let catalog = latest();
    assert!(catalog
        .validate("ParameterValidationError", &parameter_error(depth))
        .unwrap()
        .is_ok());
}

#[test]
fn test_malformed_node_at_depth_three_is_located() {
    let catalog = latest();
    let mut bad = parameter_error(0);
    bad["location"] = json!("somewhere");
    let mut value = bad;
    for _ in 0..3 {
        value = json!({
            "msg": "nested failure",
            "param": "tenants",
            "value": "[...]",
            "location": "body",
            "nestedErrors": [value]
        });
    }

    let report = catalog
        .validate("ParameterValidationError", &value)
        .unwrap()
        .unwrap_err();
    let violation = &report.errors[0];
    assert_eq!(violation.kind, ViolationKind::NotInVocabulary);
    assert_eq!(
        violation.param,
        "nestedErrors[0].nestedErrors[0].nestedErrors[0].location"
    );
}

#[test]
fn test_unbounded_nesting_hits_the_depth_guard() {
    let catalog = latest();
    let report = catalog
        .validate("ParameterValidationError", &parameter_error(200))
        .unwrap()
        .unwrap_err();
    assert!(report
        .errors
        .iter()
        .any(|v| v.kind == ViolationKind::DepthExceeded));
}

// =============================================================================
// Geo shapes
// =============================================================================

#[test]
fn test_feature_collection_validates() {
    let catalog = latest();
    let value = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [18.0686, 59.3293] },
            "properties": null
        }]
    });
    assert!(catalog.validate("FeatureCollection", &value).unwrap().is_ok());
}

#[test]
fn test_position_accepts_2d_and_3d_only() {
    let catalog = latest();
    assert!(catalog.validate("Position", &json!([18.0, 59.3])).unwrap().is_ok());
    assert!(catalog
        .validate("Position", &json!([18.0, 59.3, 12.0]))
        .unwrap()
        .is_ok());

    let report = catalog
        .validate("Position", &json!([18.0]))
        .unwrap()
        .unwrap_err();
    assert_eq!(report.errors[0].kind, ViolationKind::NoAlternativeMatched);
}

// =============================================================================
// Wire error contract
// =============================================================================

#[test]
fn test_report_is_itself_a_valid_error_payload() {
    // The validator's own error tree serializes to the platform's
    // recursive error contract.
    let catalog = latest();
    let report = catalog
        .validate("Address", &json!({ "street": "Main St 1" }))
        .unwrap()
        .unwrap_err();

    let wire = serde_json::to_value(&report).unwrap();
    assert!(catalog.validate("ValidationError", &wire).unwrap().is_ok());
}
