pub mod content;
pub mod example;
pub mod fields;
pub mod node;
pub mod resolve;

pub use content::{MediaObject, extract_content_type, extract_example, is_form_encoded};
pub use example::schema_to_example;
pub use fields::{flatten_schema_fields, infer_fields_from_example, infer_type};
pub use node::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};
pub use resolve::{deref_schema, resolve_ref};
