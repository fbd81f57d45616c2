pub mod config;
pub mod diagnostics;
pub mod error;
pub mod import;
pub mod model;
pub mod schema;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::ImportError;
pub use import::{Import, detect, parse_import};
pub use model::{CanonicalSpec, Endpoint, SourceFormat};
