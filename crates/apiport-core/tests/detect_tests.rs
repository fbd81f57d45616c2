use apiport_core::import::{detect, parse_import};
use apiport_core::model::SourceFormat;
use apiport_core::ImportError;

const PETSTORE_30: &str = include_str!("fixtures/petstore-3.0.json");
const PETSTORE_SWAGGER: &str = include_str!("fixtures/petstore-swagger2.json");
const SHOP_COLLECTION: &str = include_str!("fixtures/shop.postman_collection.json");

#[test]
fn detects_each_fixture_format() {
    assert_eq!(detect(PETSTORE_30), Some(SourceFormat::OpenApi));
    assert_eq!(detect(PETSTORE_SWAGGER), Some(SourceFormat::Swagger));
    assert_eq!(detect(SHOP_COLLECTION), Some(SourceFormat::Postman));
    assert_eq!(
        detect("curl https://api.example.com/users"),
        Some(SourceFormat::Curl)
    );
}

#[test]
fn detection_failure_is_reported() {
    let err = parse_import(r#"{"not": "a spec"}"#, None).unwrap_err();
    assert!(matches!(err, ImportError::UnknownFormat));

    let err = parse_import("wget https://example.com", None).unwrap_err();
    assert!(matches!(err, ImportError::UnknownFormat));
}

#[test]
fn expectation_mismatch_names_both_formats() {
    let err = parse_import(PETSTORE_SWAGGER, Some(SourceFormat::OpenApi)).unwrap_err();
    match &err {
        ImportError::FormatMismatch { expected, detected } => {
            assert_eq!(*expected, SourceFormat::OpenApi);
            assert_eq!(*detected, SourceFormat::Swagger);
        }
        other => panic!("expected FormatMismatch, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("openapi"));
    assert!(message.contains("swagger"));
}

#[test]
fn matching_expectation_is_accepted() {
    let import = parse_import(PETSTORE_30, Some(SourceFormat::OpenApi)).unwrap();
    assert_eq!(import.format, SourceFormat::OpenApi);
}

#[test]
fn openapi_without_info_or_paths_is_invalid() {
    let err = parse_import(r#"{"openapi": "3.0.3"}"#, None).unwrap_err();
    assert!(matches!(err, ImportError::Invalid { .. }));

    let err = parse_import(r#"{"openapi": "3.0.3", "info": {"title": "x"}}"#, None).unwrap_err();
    assert!(matches!(err, ImportError::Invalid { .. }));
}

#[test]
fn raw_spec_round_trips_byte_for_byte() {
    for fixture in [PETSTORE_30, PETSTORE_SWAGGER, SHOP_COLLECTION] {
        let import = parse_import(fixture, None).unwrap();
        assert_eq!(import.spec.raw_spec, fixture);
    }

    let curl = "curl https://api.example.com/users";
    let import = parse_import(curl, None).unwrap();
    assert_eq!(import.spec.raw_spec, curl);
}

#[test]
fn conversion_is_deterministic() {
    for fixture in [PETSTORE_30, PETSTORE_SWAGGER, SHOP_COLLECTION] {
        let first = parse_import(fixture, None).unwrap();
        let second = parse_import(fixture, None).unwrap();
        assert_eq!(first.spec, second.spec);
    }
}
