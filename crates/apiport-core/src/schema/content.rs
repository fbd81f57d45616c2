use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::node::SchemaOrRef;
use super::resolve::deref_schema;
use crate::diagnostics::Diagnostics;

pub const APPLICATION_JSON: &str = "application/json";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// One entry in a media-type map: a schema plus optional examples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesNode>,
}

/// `examples` comes in two shapes: a plain array (JSON Schema) or the
/// OpenAPI keyed-object form where each entry wraps its literal in `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExamplesNode {
    List(Vec<Value>),
    Keyed(IndexMap<String, Value>),
}

impl ExamplesNode {
    pub fn first(&self) -> Option<Value> {
        match self {
            ExamplesNode::List(values) => values.first().cloned(),
            ExamplesNode::Keyed(map) => map.values().next().map(unwrap_keyed_example),
        }
    }
}

fn unwrap_keyed_example(entry: &Value) -> Value {
    match entry.get("value") {
        Some(inner) => inner.clone(),
        None => entry.clone(),
    }
}

/// Pick a content type from a media-type map: prefer `application/json`,
/// else the first declared key, else default to JSON.
pub fn extract_content_type(content: &IndexMap<String, MediaObject>) -> String {
    if content.contains_key(APPLICATION_JSON) {
        return APPLICATION_JSON.to_string();
    }
    content
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| APPLICATION_JSON.to_string())
}

/// Declared example for a media-type entry: direct `example`, first of
/// `examples`, then whatever the (dereferenced) schema declares.
pub fn extract_example(
    media: &MediaObject,
    doc: Option<&Value>,
    diag: &mut Diagnostics,
) -> Option<Value> {
    if let Some(example) = &media.example {
        return Some(example.clone());
    }
    if let Some(first) = media.examples.as_ref().and_then(ExamplesNode::first) {
        return Some(first);
    }
    media
        .schema
        .as_ref()
        .and_then(|node| deref_schema(node, doc, diag))
        .and_then(|schema| schema.declared_example())
}

/// Form-encoded payloads carry per-field examples; a top-level example is
/// suppressed for them.
pub fn is_form_encoded(content_type: &str) -> bool {
    content_type.starts_with("multipart/") || content_type == FORM_URLENCODED
}
