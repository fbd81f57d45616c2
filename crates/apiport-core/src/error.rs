use thiserror::Error;

use crate::model::SourceFormat;

/// Failures surfaced by the import pipeline. Everything crossing the crate
/// boundary is a value of this type; converters never panic on bad input.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not detect format: input is not OpenAPI, Swagger, Postman, or cURL")]
    UnknownFormat,

    #[error("expected {expected} but detected {detected}")]
    FormatMismatch {
        expected: SourceFormat,
        detected: SourceFormat,
    },

    #[error("invalid {format} document: {reason}")]
    Invalid {
        format: SourceFormat,
        reason: String,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cURL command has no discoverable URL")]
    CurlMissingUrl,
}
