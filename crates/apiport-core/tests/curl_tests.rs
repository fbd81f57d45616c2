use apiport_core::import::parse_import;
use apiport_core::model::{AuthType, FieldType, Method, ParamLocation, SourceFormat};
use apiport_core::{Diagnostic, ImportError};
use serde_json::json;

fn import(text: &str) -> apiport_core::Import {
    parse_import(text, None).unwrap()
}

fn single_endpoint(text: &str) -> apiport_core::Endpoint {
    import(text).spec.endpoints.remove(0)
}

#[test]
fn bare_url_is_a_get() {
    let endpoint = single_endpoint("curl https://api.example.com/users");
    assert_eq!(endpoint.method, Method::Get);
    assert_eq!(endpoint.path, "/users");
    assert_eq!(endpoint.source, SourceFormat::Curl);
}

#[test]
fn spec_wrapper_carries_title_version_and_base_url() {
    let result = import("curl https://api.example.com:8443/users");
    assert_eq!(result.format, SourceFormat::Curl);
    assert_eq!(result.spec.name, "cURL Import - GET /users");
    assert_eq!(result.spec.version, "1.0.0");
    assert_eq!(
        result.spec.base_url.as_deref(),
        Some("https://api.example.com:8443")
    );
    assert_eq!(result.spec.endpoints.len(), 1);
}

#[test]
fn json_data_parses_structurally() {
    let endpoint = single_endpoint(
        r#"curl -X POST https://api.example.com/users -H 'Content-Type: application/json' -d '{"name":"John"}'"#,
    );
    assert_eq!(endpoint.method, Method::Post);

    let request = endpoint.request.unwrap();
    assert_eq!(request.content_type, "application/json");

    let body = request.body.unwrap();
    assert_eq!(body.example, Some(json!({"name": "John"})));
    let name = body.fields.iter().find(|f| f.name == "name").unwrap();
    assert_eq!(name.field_type, FieldType::String);
}

#[test]
fn nested_json_with_internal_quotes_survives() {
    let endpoint = single_endpoint(
        r#"curl -X POST https://api.example.com/orders -d '{"customer":{"name":"J \"Q\" Public","tags":["vip","eu"]},"total":99.5}'"#,
    );

    let body = endpoint.request.unwrap().body.unwrap();
    assert_eq!(
        body.example,
        Some(json!({
            "customer": {"name": "J \"Q\" Public", "tags": ["vip", "eu"]},
            "total": 99.5
        }))
    );

    // One top-level field per top-level key, no dotted names.
    let names: Vec<_> = body.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["customer", "total"]);
    assert!(names.iter().all(|n| !n.contains('.')));

    let customer = body.fields.iter().find(|f| f.name == "customer").unwrap();
    assert_eq!(customer.field_type, FieldType::Object);
    let nested: Vec<_> = customer
        .properties
        .as_ref()
        .unwrap()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(nested, vec!["name", "tags"]);

    let total = body.fields.iter().find(|f| f.name == "total").unwrap();
    assert_eq!(total.field_type, FieldType::Number);
}

#[test]
fn multipart_file_fields() {
    let endpoint = single_endpoint(
        "curl -X POST https://api.example.com/upload -F 'meta=hello' -F 'file=@/tmp/photo.png'",
    );

    let request = endpoint.request.unwrap();
    assert_eq!(request.content_type, "multipart/form-data");

    let body = request.body.unwrap();
    let file = body.fields.iter().find(|f| f.name == "file").unwrap();
    assert_eq!(file.field_type, FieldType::File);
    assert_eq!(file.format.as_deref(), Some("binary"));
    assert_eq!(file.example, Some(json!("photo.png")));

    let example = body.example.as_ref().unwrap();
    assert_eq!(example["file"], json!("photo.png"));
    assert_eq!(example["meta"], json!("hello"));
}

#[test]
fn repeated_data_with_json_first_drops_the_rest() {
    let result = import(r#"curl https://api.example.com/x -d '{"a":1}' -d 'b=2'"#);
    let body = result.spec.endpoints[0]
        .request
        .as_ref()
        .unwrap()
        .body
        .as_ref()
        .unwrap();
    assert_eq!(body.example, Some(json!({"a": 1})));
    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::DroppedData { .. })));
}

#[test]
fn repeated_data_concatenates_as_form_urlencoded() {
    let endpoint = single_endpoint("curl https://api.example.com/x -d 'a=1' -d 'b=two'");
    let request = endpoint.request.unwrap();
    assert_eq!(request.content_type, "application/x-www-form-urlencoded");

    let body = request.body.unwrap();
    assert!(body.example.is_none());
    let names: Vec<_> = body.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(body.fields[1].example, Some(json!("two")));
}

#[test]
fn query_string_splits_into_parameters() {
    let endpoint = single_endpoint("curl 'https://api.example.com/search?q=rust&limit=10'");
    assert_eq!(endpoint.path, "/search");

    let request = endpoint.request.unwrap();
    assert_eq!(request.parameters.len(), 2);
    assert!(request
        .parameters
        .iter()
        .all(|p| p.location == ParamLocation::Query));
    assert_eq!(request.parameters[0].name, "q");
    assert_eq!(request.parameters[0].example, json!("rust"));
}

#[test]
fn headers_become_parameters_and_authorization_drives_auth() {
    let endpoint = single_endpoint(
        "curl https://api.example.com/me -H 'Accept: application/json' -H 'Authorization: Bearer tok-123'",
    );

    let request = endpoint.request.unwrap();
    let header_names: Vec<_> = request.parameters.iter().map(|p| p.name.as_str()).collect();
    // Authorization stays in the parameter list AND populates auth.
    assert_eq!(header_names, vec!["Accept", "Authorization"]);

    let auth = endpoint.auth.unwrap();
    assert_eq!(auth.auth_type, AuthType::Bearer);
    assert_eq!(auth.example, "tok-123");
}

#[test]
fn unspaced_header_form_is_accepted() {
    let endpoint = single_endpoint("curl https://api.example.com/me -H 'X-Trace:abc'");
    let request = endpoint.request.unwrap();
    assert_eq!(request.parameters[0].name, "X-Trace");
    assert_eq!(request.parameters[0].example, json!("abc"));
    assert_eq!(request.parameters[0].location, ParamLocation::Header);
}

#[test]
fn user_flag_synthesizes_basic_authorization() {
    let endpoint = single_endpoint("curl -u user:pass https://api.example.com/private");
    let request = endpoint.request.unwrap();
    let header = request
        .parameters
        .iter()
        .find(|p| p.name == "Authorization")
        .unwrap();
    assert_eq!(header.example, json!("Basic dXNlcjpwYXNz"));

    let auth = endpoint.auth.unwrap();
    assert_eq!(auth.auth_type, AuthType::Basic);
    assert_eq!(auth.example, "dXNlcjpwYXNz");
}

#[test]
fn location_flag_accepts_the_url() {
    let endpoint = single_endpoint("curl --location 'https://api.example.com/items'");
    assert_eq!(endpoint.method, Method::Get);
    assert_eq!(endpoint.path, "/items");
}

#[test]
fn line_continuations_are_joined() {
    let endpoint = single_endpoint(
        "curl -X PUT \\\n  'https://api.example.com/items/9' \\\n  -H 'Accept: application/json'",
    );
    assert_eq!(endpoint.method, Method::Put);
    assert_eq!(endpoint.path, "/items/9");
}

#[test]
fn missing_url_is_a_hard_failure() {
    let err = parse_import("curl -X POST -d \"data\"", None).unwrap_err();
    assert!(matches!(err, ImportError::CurlMissingUrl));
}
