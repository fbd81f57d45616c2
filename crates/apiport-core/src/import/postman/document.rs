use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Postman Collection v2.x document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<Item>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

/// Descriptions appear both as plain strings and as `{content, type}`
/// objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Object {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

impl Description {
    pub fn text(&self) -> Option<String> {
        match self {
            Description::Text(s) => Some(s.clone()),
            Description::Object { content } => content.clone(),
        }
    }
}

/// A node in the collection tree: a request leaf or a folder of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Item>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<SavedResponse>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<KeyValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlNode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthBlock>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

/// URLs appear as a bare raw string or a structured object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlNode {
    Raw(String),
    Detailed(Box<UrlObject>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UrlObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<OneOrMany>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<KeyValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

/// Postman writes hosts both as `"api.example.com"` and
/// `["api", "example", "com"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn joined(&self) -> String {
        match self {
            OneOrMany::One(s) => s.clone(),
            OneOrMany::Many(parts) => parts.join("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// File source for formdata entries of type `file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urlencoded: Vec<KeyValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<KeyValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// Auth blocks carry their parameters either as `[{key, value}]` lists or
/// as plain objects, depending on the exporter version; the payload is kept
/// raw and probed for both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthBlock {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl AuthBlock {
    /// Fetch a named auth attribute from either carrier shape.
    pub fn attribute(&self, section: &str, key: &str) -> Option<String> {
        let node = self.payload.get(section)?;
        match node {
            Value::Array(entries) => entries.iter().find_map(|entry| {
                (entry.get("key").and_then(Value::as_str) == Some(key))
                    .then(|| entry.get("value").map(value_to_string))
                    .flatten()
            }),
            Value::Object(map) => map.get(key).map(value_to_string),
            _ => None,
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

impl Variable {
    pub fn value_text(&self) -> Option<String> {
        self.value.as_ref().map(value_to_string)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(
        rename = "_postman_previewlanguage",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_language: Option<String>,
}
