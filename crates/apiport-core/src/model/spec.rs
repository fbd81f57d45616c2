use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;

/// The source format an endpoint or spec was imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    OpenApi,
    Swagger,
    Postman,
    Curl,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::OpenApi => "openapi",
            SourceFormat::Swagger => "swagger",
            SourceFormat::Postman => "postman",
            SourceFormat::Curl => "curl",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openapi" => Ok(SourceFormat::OpenApi),
            "swagger" => Ok(SourceFormat::Swagger),
            "postman" => Ok(SourceFormat::Postman),
            "curl" => Ok(SourceFormat::Curl),
            other => Err(format!("unknown source format: {other}")),
        }
    }
}

/// The canonical, source-format-independent representation of an API spec.
///
/// Produced once per import and never mutated by the converters; editing
/// happens on copies outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSpec {
    pub name: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Scheme + host + optional port + base path, no trailing slash.
    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, String>,

    pub endpoints: Vec<Endpoint>,

    /// The original input text, preserved verbatim for audit.
    #[serde(rename = "rawSpec")]
    pub raw_spec: String,
}
