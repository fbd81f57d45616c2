pub mod document;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use url::Url;

use crate::diagnostics::Diagnostics;
use crate::error::ImportError;
use crate::model::{
    Auth, AuthLocation, AuthType, CanonicalSpec, Endpoint, Field, FieldType, Method,
    Parameter as CanonicalParameter, ParamLocation, Request, RequestBody, Responses, SourceFormat,
    SuccessResponse,
};
use crate::schema::content::{APPLICATION_JSON, FORM_URLENCODED, MULTIPART_FORM_DATA};
use crate::schema::infer_fields_from_example;

use document::{AuthBlock, BodySpec, Collection, Item, KeyValue, RequestSpec, UrlNode, UrlObject};

/// Folder nesting is unbounded in the wild; anything deeper than this is
/// dropped with a diagnostic instead of recursing further.
const MAX_FOLDER_DEPTH: usize = 64;

/// Flatten a Postman collection tree into a canonical spec. Folder names
/// are not carried into the canonical model.
pub fn convert_collection(
    collection: &Collection,
    raw_text: &str,
    diag: &mut Diagnostics,
) -> Result<CanonicalSpec, ImportError> {
    let mut variables = IndexMap::new();
    for variable in &collection.variable {
        if let (Some(key), Some(value)) = (&variable.key, variable.value_text()) {
            variables.insert(key.clone(), value);
        }
    }

    let mut endpoints = Vec::new();
    walk_items(
        &collection.item,
        collection.auth.as_ref(),
        0,
        &mut endpoints,
        diag,
    );

    let base_url = endpoints.iter().find_map(|(base, _)| base.clone());
    let endpoints: Vec<Endpoint> = endpoints.into_iter().map(|(_, ep)| ep).collect();

    Ok(CanonicalSpec {
        name: collection
            .info
            .name
            .clone()
            .unwrap_or_else(|| "Postman Import".to_string()),
        version: "1.0.0".to_string(),
        description: collection
            .info
            .description
            .as_ref()
            .and_then(|d| d.text()),
        base_url,
        variables,
        endpoints,
        raw_spec: raw_text.to_string(),
    })
}

fn walk_items(
    items: &[Item],
    collection_auth: Option<&AuthBlock>,
    depth: usize,
    out: &mut Vec<(Option<String>, Endpoint)>,
    diag: &mut Diagnostics,
) {
    if depth > MAX_FOLDER_DEPTH {
        diag.note("folder nesting exceeds depth limit; deeper items skipped".to_string());
        return;
    }
    for item in items {
        if let Some(children) = &item.item {
            walk_items(children, collection_auth, depth + 1, out, diag);
        }
        if let Some(request) = &item.request {
            out.push(convert_item(item, request, collection_auth, diag));
        }
    }
}

fn convert_item(
    item: &Item,
    request: &RequestSpec,
    collection_auth: Option<&AuthBlock>,
    diag: &mut Diagnostics,
) -> (Option<String>, Endpoint) {
    let method = request
        .method
        .as_deref()
        .and_then(|m| m.parse::<Method>().ok())
        .unwrap_or(Method::Get);

    let mut parameters = Vec::new();
    let (path, base_url) = match &request.url {
        Some(UrlNode::Detailed(obj)) => convert_url_object(obj, &mut parameters),
        Some(UrlNode::Raw(raw)) => convert_raw_url(raw, &mut parameters),
        None => ("/".to_string(), None),
    };

    let mut auth = convert_auth(request.auth.as_ref().or(collection_auth));

    for header in &request.header {
        if header.disabled == Some(true) {
            continue;
        }
        let (Some(name), value) = (&header.key, header.value.clone().unwrap_or_default()) else {
            continue;
        };
        parameters.push(plain_parameter(name, ParamLocation::Header, &value));
        if name.eq_ignore_ascii_case("authorization") {
            if let Some(token) = value.strip_prefix("Bearer ") {
                auth = Some(bearer_auth(token.to_string()));
            } else if let Some(encoded) = value.strip_prefix("Basic ") {
                auth = Some(basic_auth(encoded.to_string()));
            }
        }
    }

    let (content_type, body) = convert_body(request.body.as_ref(), diag);

    let request_block = Request {
        content_type,
        parameters,
        body,
    };
    let request_block = if request_block.is_empty() {
        None
    } else {
        Some(request_block)
    };

    let name = item
        .name
        .clone()
        .unwrap_or_else(|| format!("{method} {path}"));

    let endpoint = Endpoint {
        source: SourceFormat::Postman,
        method,
        path,
        name,
        description: request.description.as_ref().and_then(|d| d.text()),
        tags: Vec::new(),
        operation_id: None,
        deprecated: false,
        request: request_block,
        responses: convert_responses(item),
        auth,
    };

    (base_url, endpoint)
}

/// Structured URL: join path segments (normalizing `:param` to `{param}`),
/// lift query entries and path variables into parameters, and recover the
/// base URL from the raw form when it is absolute.
fn convert_url_object(
    obj: &UrlObject,
    parameters: &mut Vec<CanonicalParameter>,
) -> (String, Option<String>) {
    let segments: Vec<String> = obj
        .path
        .iter()
        .filter_map(|seg| seg.as_str().map(normalize_segment))
        .filter(|seg| !seg.is_empty())
        .collect();
    let path = format!("/{}", segments.join("/"));

    for variable in &obj.variable {
        if let Some(key) = &variable.key {
            parameters.push(plain_parameter(
                key,
                ParamLocation::Path,
                &variable.value_text().unwrap_or_default(),
            ));
        }
    }

    for query in &obj.query {
        if query.disabled == Some(true) {
            continue;
        }
        if let Some(key) = &query.key {
            parameters.push(plain_parameter(
                key,
                ParamLocation::Query,
                query.value.as_deref().unwrap_or_default(),
            ));
        }
    }

    let base_url = obj.raw.as_deref().and_then(absolute_base);
    (path, base_url)
}

/// Raw string URL, possibly templated with `{{variables}}`.
fn convert_raw_url(
    raw: &str,
    parameters: &mut Vec<CanonicalParameter>,
) -> (String, Option<String>) {
    if let Ok(url) = Url::parse(raw) {
        for (key, value) in url.query_pairs() {
            parameters.push(plain_parameter(&key, ParamLocation::Query, &value));
        }
        let path = match url.path() {
            "" => "/".to_string(),
            p => normalize_template_path(p),
        };
        return (path, absolute_base(raw));
    }

    // Templated host like `{{baseUrl}}/users/:id?active=true`.
    let (before_query, query) = match raw.split_once('?') {
        Some((b, q)) => (b, Some(q)),
        None => (raw, None),
    };
    if let Some(q) = query {
        for pair in q.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if !key.is_empty() {
                parameters.push(plain_parameter(key, ParamLocation::Query, value));
            }
        }
    }

    let path = match before_query.find('/') {
        Some(idx) if before_query.starts_with("{{") => {
            normalize_template_path(&before_query[idx..])
        }
        Some(_) | None => normalize_template_path(before_query),
    };
    let path = if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    };
    (path, None)
}

fn normalize_template_path(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(normalize_segment)
        .collect();
    format!("/{}", segments.join("/"))
}

/// Postman path variables use `:name`; the canonical template form is
/// `{name}`.
fn normalize_segment(segment: &str) -> String {
    match segment.strip_prefix(':') {
        Some(name) if !name.is_empty() => format!("{{{name}}}"),
        _ => segment.to_string(),
    }
}

fn absolute_base(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    (url.scheme() == "http" || url.scheme() == "https")
        .then(|| url.origin().ascii_serialization())
}

fn convert_body(body: Option<&BodySpec>, diag: &mut Diagnostics) -> (String, Option<RequestBody>) {
    let Some(body) = body else {
        return (APPLICATION_JSON.to_string(), None);
    };

    match body.mode.as_deref() {
        Some("raw") => {
            let raw = body.raw.clone().unwrap_or_default();
            match serde_json::from_str::<Value>(&raw) {
                Ok(json) => {
                    let fields = infer_fields_from_example(&json);
                    (
                        APPLICATION_JSON.to_string(),
                        Some(RequestBody {
                            required: true,
                            description: None,
                            example: Some(json),
                            fields,
                        }),
                    )
                }
                Err(_) => {
                    if !raw.is_empty() {
                        diag.note("raw body is not JSON; keeping it as plain text".to_string());
                    }
                    (
                        "text/plain".to_string(),
                        Some(RequestBody {
                            required: true,
                            description: None,
                            example: Some(Value::String(raw)),
                            fields: Vec::new(),
                        }),
                    )
                }
            }
        }
        Some("urlencoded") => (
            FORM_URLENCODED.to_string(),
            Some(RequestBody {
                required: true,
                description: None,
                example: None,
                fields: keyvalue_fields(&body.urlencoded),
            }),
        ),
        Some("formdata") => {
            let mut fields = Vec::new();
            let mut example = Map::new();
            for entry in &body.formdata {
                if entry.disabled == Some(true) {
                    continue;
                }
                let Some(key) = &entry.key else { continue };
                if entry.kind.as_deref() == Some("file") {
                    let filename = entry
                        .src
                        .as_ref()
                        .and_then(Value::as_str)
                        .and_then(|src| src.rsplit(['/', '\\']).next())
                        .unwrap_or("file")
                        .to_string();
                    let mut field = Field::new(key, FieldType::File);
                    field.required = true;
                    field.format = Some("binary".into());
                    field.example = Some(Value::String(filename.clone()));
                    fields.push(field);
                    example.insert(key.clone(), Value::String(filename));
                } else {
                    let value = entry.value.clone().unwrap_or_default();
                    let mut field = Field::new(key, FieldType::String);
                    field.required = true;
                    field.example = Some(Value::String(value.clone()));
                    fields.push(field);
                    example.insert(key.clone(), Value::String(value));
                }
            }
            (
                MULTIPART_FORM_DATA.to_string(),
                Some(RequestBody {
                    required: true,
                    description: None,
                    example: Some(Value::Object(example)),
                    fields,
                }),
            )
        }
        _ => (APPLICATION_JSON.to_string(), None),
    }
}

fn keyvalue_fields(entries: &[KeyValue]) -> Vec<Field> {
    entries
        .iter()
        .filter(|e| e.disabled != Some(true))
        .filter_map(|e| {
            let key = e.key.as_ref()?;
            let mut field = Field::new(key, FieldType::String);
            field.required = true;
            field.example = Some(Value::String(e.value.clone().unwrap_or_default()));
            field.description = e.description.as_ref().and_then(|d| d.text());
            Some(field)
        })
        .collect()
}

/// A leaf's first saved 2xx response enriches the success block; everything
/// else gets the default.
fn convert_responses(item: &Item) -> Responses {
    let saved = item
        .response
        .iter()
        .find(|r| r.code.is_some_and(|c| (200..300).contains(&c)));

    let Some(saved) = saved else {
        return Responses::default();
    };

    let parsed_body = saved
        .body
        .as_deref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok());
    let content_type = parsed_body
        .is_some()
        .then(|| APPLICATION_JSON.to_string())
        .or_else(|| {
            (saved.preview_language.as_deref() == Some("json"))
                .then(|| APPLICATION_JSON.to_string())
        });
    let example = parsed_body.or_else(|| saved.body.clone().map(Value::String));

    Responses {
        success: SuccessResponse {
            status: saved.code.unwrap_or(200),
            description: saved.name.clone().or_else(|| saved.status.clone()),
            content_type,
            example,
            fields: Vec::new(),
            headers: Vec::new(),
        },
        errors: Vec::new(),
    }
}

fn convert_auth(auth: Option<&AuthBlock>) -> Option<Auth> {
    let auth = auth?;
    match auth.kind.as_deref() {
        Some("bearer") => Some(bearer_auth(
            auth.attribute("bearer", "token").unwrap_or_default(),
        )),
        Some("basic") => {
            let user = auth.attribute("basic", "username").unwrap_or_default();
            let pass = auth.attribute("basic", "password").unwrap_or_default();
            Some(basic_auth(BASE64.encode(format!("{user}:{pass}"))))
        }
        Some("apikey") => Some(Auth {
            required: true,
            auth_type: AuthType::ApiKey,
            scheme: None,
            bearer_format: None,
            location: Some(match auth.attribute("apikey", "in").as_deref() {
                Some("query") => AuthLocation::Query,
                _ => AuthLocation::Header,
            }),
            name: auth.attribute("apikey", "key"),
            description: None,
            example: auth.attribute("apikey", "value").unwrap_or_default(),
        }),
        _ => None,
    }
}

fn bearer_auth(token: String) -> Auth {
    Auth {
        required: true,
        auth_type: AuthType::Bearer,
        scheme: Some("bearer".into()),
        bearer_format: None,
        location: None,
        name: None,
        description: None,
        example: token,
    }
}

fn basic_auth(encoded: String) -> Auth {
    Auth {
        required: true,
        auth_type: AuthType::Basic,
        scheme: Some("basic".into()),
        bearer_format: None,
        location: None,
        name: None,
        description: None,
        example: encoded,
    }
}

fn plain_parameter(name: &str, location: ParamLocation, value: &str) -> CanonicalParameter {
    CanonicalParameter {
        name: name.to_string(),
        location,
        field_type: FieldType::String,
        required: true,
        description: None,
        example: Value::String(value.to_string()),
        enum_values: Vec::new(),
        pattern: None,
        min: None,
        max: None,
        default: None,
        format: None,
        items: None,
    }
}
