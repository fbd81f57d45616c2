use apiport_core::import::parse_import;
use apiport_core::model::{AuthType, FieldType, ParamLocation, SourceFormat};
use serde_json::json;

const PETSTORE_SWAGGER: &str = include_str!("fixtures/petstore-swagger2.json");

fn petstore() -> apiport_core::CanonicalSpec {
    parse_import(PETSTORE_SWAGGER, None).unwrap().spec
}

#[test]
fn base_url_joins_scheme_host_and_base_path() {
    let spec = petstore();
    assert_eq!(spec.base_url.as_deref(), Some("https://petstore.swagger.io/v2"));
    assert_eq!(spec.name, "Petstore Classic");
    assert_eq!(spec.endpoints.len(), 3);
    assert!(spec.endpoints.iter().all(|e| e.source == SourceFormat::Swagger));
}

#[test]
fn body_parameter_becomes_json_body() {
    let spec = petstore();
    let order = spec
        .endpoints
        .iter()
        .find(|e| e.operation_id.as_deref() == Some("placeOrder"))
        .unwrap();

    let request = order.request.as_ref().unwrap();
    assert_eq!(request.content_type, "application/json");
    // The body parameter must not double-appear in the parameter list.
    assert!(request.parameters.is_empty());

    let body = request.body.as_ref().unwrap();
    assert!(body.required);

    let names: Vec<_> = body.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "petId", "shipDate", "complete"]);

    let pet_id = body.fields.iter().find(|f| f.name == "petId").unwrap();
    assert!(pet_id.required);

    let ship_date = body.fields.iter().find(|f| f.name == "shipDate").unwrap();
    assert_eq!(ship_date.format.as_deref(), Some("date-time"));

    // Synthesized example follows the schema shape.
    let example = body.example.as_ref().unwrap();
    assert_eq!(example["shipDate"], json!("2024-01-15T09:30:00Z"));
    assert_eq!(example["complete"], json!(true));
}

#[test]
fn form_data_parameters_become_multipart_body() {
    let spec = petstore();
    let upload = spec
        .endpoints
        .iter()
        .find(|e| e.operation_id.as_deref() == Some("uploadFile"))
        .unwrap();

    let request = upload.request.as_ref().unwrap();
    assert_eq!(request.content_type, "multipart/form-data");

    // Path parameter survives; formData parameters moved into the body.
    let names: Vec<_> = request.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["petId"]);
    assert_eq!(request.parameters[0].location, ParamLocation::Path);

    let body = request.body.as_ref().unwrap();
    assert!(body.required);
    // Form-encoded bodies carry no top-level example.
    assert!(body.example.is_none());

    let field_names: Vec<_> = body.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(field_names, vec!["additionalMetadata", "file"]);

    let file = body.fields.iter().find(|f| f.name == "file").unwrap();
    assert_eq!(file.field_type, FieldType::File);
    assert!(file.required);

    let meta = body.fields.iter().find(|f| f.name == "additionalMetadata").unwrap();
    assert_eq!(meta.field_type, FieldType::String);
    assert!(!meta.required);
    assert_eq!(
        meta.description.as_deref(),
        Some("Additional data to pass to server")
    );
}

#[test]
fn api_key_security_definition_maps_to_auth() {
    let spec = petstore();
    let upload = spec
        .endpoints
        .iter()
        .find(|e| e.operation_id.as_deref() == Some("uploadFile"))
        .unwrap();

    let auth = upload.auth.as_ref().unwrap();
    assert_eq!(auth.auth_type, AuthType::ApiKey);
    assert_eq!(auth.name.as_deref(), Some("api_key"));
    assert!(auth.required);
    assert!(!auth.example.is_empty());

    // No document-level security: other operations carry no auth.
    let login = spec
        .endpoints
        .iter()
        .find(|e| e.operation_id.as_deref() == Some("loginUser"))
        .unwrap();
    assert!(login.auth.is_none());
}

#[test]
fn inline_parameter_types_and_format_heuristics() {
    let spec = petstore();
    let login = spec
        .endpoints
        .iter()
        .find(|e| e.operation_id.as_deref() == Some("loginUser"))
        .unwrap();

    let request = login.request.as_ref().unwrap();
    let username = request.parameters.iter().find(|p| p.name == "username").unwrap();
    assert_eq!(username.field_type, FieldType::String);
    assert_eq!(username.location, ParamLocation::Query);
    assert!(username.required);
    // Name-hint heuristic fires for schema-less strings.
    assert_eq!(username.example, json!("Jane Doe"));

    let password = request.parameters.iter().find(|p| p.name == "password").unwrap();
    assert_eq!(password.format.as_deref(), Some("password"));
    assert_eq!(password.example, json!("********"));
}

#[test]
fn swagger_response_schema_produces_fields_and_errors() {
    let spec = petstore();
    let order = spec
        .endpoints
        .iter()
        .find(|e| e.operation_id.as_deref() == Some("placeOrder"))
        .unwrap();

    let success = &order.responses.success;
    assert_eq!(success.status, 200);
    assert_eq!(success.content_type.as_deref(), Some("application/json"));
    let names: Vec<_> = success.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "petId", "shipDate", "complete"]);

    assert_eq!(order.responses.errors.len(), 1);
    assert_eq!(order.responses.errors[0].status, 400);
    assert_eq!(order.responses.errors[0].reason, "Invalid order");
}
