pub mod curl;
pub mod openapi;
pub mod postman;

use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ImportError;
use crate::model::{CanonicalSpec, SourceFormat};

/// A successful import: the canonical spec plus everything the converters
/// wanted to warn about.
#[derive(Debug)]
pub struct Import {
    pub format: SourceFormat,
    pub spec: CanonicalSpec,
    pub diagnostics: Vec<Diagnostic>,
}

/// Detect the input format from structural signals: top-level `openapi` or
/// `swagger` keys, the Postman collection schema URL, or a leading `curl`
/// token.
pub fn detect(raw: &str) -> Option<SourceFormat> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if value.get("openapi").is_some() {
            return Some(SourceFormat::OpenApi);
        }
        if value.get("swagger").is_some() {
            return Some(SourceFormat::Swagger);
        }
        if value
            .pointer("/info/schema")
            .and_then(Value::as_str)
            .is_some_and(is_postman_schema)
        {
            return Some(SourceFormat::Postman);
        }
        return None;
    }

    let trimmed = raw.trim_start();
    if let Some(rest) = trimmed.strip_prefix("curl")
        && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        return Some(SourceFormat::Curl);
    }

    None
}

fn is_postman_schema(schema: &str) -> bool {
    schema.contains("schema.getpostman.com") || schema.contains("schema.postman.com")
}

/// Parse raw text into the canonical model.
///
/// `expected` is validated against detection, never used to bypass it: a
/// mismatch is refused with an error naming both formats. Converter
/// failures come back as values; nothing panics across this boundary.
pub fn parse_import(
    raw: &str,
    expected: Option<SourceFormat>,
) -> Result<Import, ImportError> {
    let detected = detect(raw).ok_or(ImportError::UnknownFormat)?;

    if let Some(expected) = expected
        && expected != detected
    {
        return Err(ImportError::FormatMismatch { expected, detected });
    }

    let mut diag = Diagnostics::new();
    let spec = match detected {
        SourceFormat::OpenApi | SourceFormat::Swagger => {
            let value: Value = serde_json::from_str(raw)?;
            validate_openapi_structure(&value, detected)?;
            let doc: openapi::document::Document = serde_json::from_value(value.clone())
                .map_err(|err| ImportError::Invalid {
                    format: detected,
                    reason: err.to_string(),
                })?;
            openapi::convert_document(&doc, &value, raw, detected, &mut diag)
        }
        SourceFormat::Postman => {
            let collection: postman::document::Collection = serde_json::from_str(raw)
                .map_err(|err| ImportError::Invalid {
                    format: detected,
                    reason: err.to_string(),
                })?;
            postman::convert_collection(&collection, raw, &mut diag)?
        }
        SourceFormat::Curl => curl::spec_from_curl(raw, &mut diag)?,
    };

    Ok(Import {
        format: detected,
        spec,
        diagnostics: diag.into_entries(),
    })
}

/// Both OpenAPI versions require `info` and `paths` at the top level;
/// without them there is nothing meaningful to convert.
fn validate_openapi_structure(value: &Value, format: SourceFormat) -> Result<(), ImportError> {
    for key in ["info", "paths"] {
        if value.get(key).is_none() {
            return Err(ImportError::Invalid {
                format,
                reason: format!("missing required top-level field: {key}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_openapi() {
        assert_eq!(
            detect(r#"{"openapi": "3.0.3", "info": {}, "paths": {}}"#),
            Some(SourceFormat::OpenApi)
        );
    }

    #[test]
    fn detects_swagger() {
        assert_eq!(
            detect(r#"{"swagger": "2.0"}"#),
            Some(SourceFormat::Swagger)
        );
    }

    #[test]
    fn detects_postman_by_schema_url() {
        let raw = r#"{"info": {"schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"}}"#;
        assert_eq!(detect(raw), Some(SourceFormat::Postman));
    }

    #[test]
    fn detects_curl_prefix() {
        assert_eq!(detect("curl https://example.com"), Some(SourceFormat::Curl));
        assert_eq!(detect("  curl https://example.com"), Some(SourceFormat::Curl));
        // `curl` must be a standalone token.
        assert_eq!(detect("curling https://example.com"), None);
    }

    #[test]
    fn unknown_json_fails_detection() {
        assert_eq!(detect(r#"{"hello": "world"}"#), None);
        assert_eq!(detect("plain text"), None);
    }
}
