use std::fmt;

use serde::Serialize;

/// A non-fatal condition observed during conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A `$ref` that could not be resolved within the document.
    UnresolvedRef { reference: String },

    /// One `(method, path)` operation failed to convert; siblings were
    /// unaffected.
    OperationFailed {
        method: String,
        path: String,
        message: String,
    },

    /// Input data was intentionally discarded (e.g. repeated `-d` payloads
    /// after a JSON first occurrence).
    DroppedData { detail: String },

    Note { detail: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedRef { reference } => {
                write!(f, "unresolved reference: {reference}")
            }
            Diagnostic::OperationFailed {
                method,
                path,
                message,
            } => write!(f, "failed to convert {method} {path}: {message}"),
            Diagnostic::DroppedData { detail } => write!(f, "dropped input data: {detail}"),
            Diagnostic::Note { detail } => f.write_str(detail),
        }
    }
}

/// Collector threaded through the converters and returned with the result,
/// so callers can inspect warnings without scraping a global log sink. Each
/// entry is also mirrored to `log::warn!`.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unresolved_ref(&mut self, reference: &str) {
        log::warn!("unresolved reference: {reference}");
        self.entries.push(Diagnostic::UnresolvedRef {
            reference: reference.to_string(),
        });
    }

    pub fn operation_failed(&mut self, method: &str, path: &str, message: impl Into<String>) {
        let message = message.into();
        log::warn!("failed to convert {method} {path}: {message}");
        self.entries.push(Diagnostic::OperationFailed {
            method: method.to_string(),
            path: path.to_string(),
            message,
        });
    }

    pub fn dropped(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        log::warn!("dropped input data: {detail}");
        self.entries.push(Diagnostic::DroppedData { detail });
    }

    pub fn note(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        log::warn!("{detail}");
        self.entries.push(Diagnostic::Note { detail });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
