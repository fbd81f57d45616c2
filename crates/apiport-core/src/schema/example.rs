use serde_json::{Map, Value, json};

use super::node::{Schema, SchemaOrRef, SchemaType};

/// Recursion guard for pathological schemas; deeper nodes degrade to a
/// placeholder string.
const MAX_DEPTH: usize = 32;

/// Fixed values for well-known string formats, checked before any other
/// string heuristic.
const FORMAT_VALUES: &[(&str, &str)] = &[
    ("date-time", "2024-01-15T09:30:00Z"),
    ("date", "2024-01-15"),
    ("time", "09:30:00Z"),
    ("email", "user@example.com"),
    ("uuid", "123e4567-e89b-12d3-a456-426614174000"),
    ("uri", "https://example.com/resource"),
    ("url", "https://example.com/resource"),
    ("hostname", "api.example.com"),
    ("ipv4", "192.0.2.1"),
    ("ipv6", "2001:db8::1"),
    ("byte", "ZXhhbXBsZQ=="),
    ("password", "********"),
];

/// Ordered field-name hints: the first entry whose needle is a substring of
/// the lowercased field name wins. Kept as a table so the rule set stays
/// independently testable.
const NAME_HINTS: &[(&str, &str)] = &[
    ("email", "user@example.com"),
    ("phone", "+1-555-0123"),
    ("url", "https://example.com"),
    ("link", "https://example.com"),
    ("token", "tok_abc123def456"),
    ("key", "key_abc123def456"),
    ("file", "document.pdf"),
    ("image", "photo.jpg"),
    ("photo", "photo.jpg"),
    ("name", "Jane Doe"),
    ("id", "a1b2c3d4"),
];

/// Synthesize a representative literal for a schema node.
///
/// Priority: declared `example` → first of `examples` → `default` →
/// type-driven synthesis. Never fails; unknown or missing shape degrades to
/// a placeholder string.
pub fn schema_to_example(schema: &Schema, field_name: Option<&str>) -> Value {
    example_at(schema, field_name, 0)
}

fn example_at(schema: &Schema, field_name: Option<&str>, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return placeholder(field_name);
    }

    if let Some(declared) = schema.declared_example() {
        return declared;
    }

    // Composition: take the first variant of a union, merge nothing for
    // allOf beyond recursing into the first member that yields an object.
    if let Some(first) = schema.one_of.first().or_else(|| schema.any_of.first())
        && let SchemaOrRef::Schema(inner) = first
    {
        return example_at(inner, field_name, depth + 1);
    }

    match schema.primary_type() {
        Some(SchemaType::String) => string_example(schema, field_name),
        Some(SchemaType::Integer) => number_example(schema, true),
        Some(SchemaType::Number) => number_example(schema, false),
        Some(SchemaType::Boolean) => Value::Bool(true),
        Some(SchemaType::Null) => Value::Null,
        Some(SchemaType::File) => Value::String(file_example(field_name)),
        Some(SchemaType::Array) => {
            let item = match schema.items.as_deref() {
                Some(SchemaOrRef::Schema(inner)) => example_at(inner, field_name, depth + 1),
                _ => placeholder(field_name),
            };
            Value::Array(vec![item])
        }
        Some(SchemaType::Object) => {
            let mut map = Map::new();
            for (name, prop) in &schema.properties {
                let value = match prop {
                    SchemaOrRef::Schema(inner) => example_at(inner, Some(name), depth + 1),
                    SchemaOrRef::Ref { .. } => placeholder(Some(name)),
                };
                map.insert(name.clone(), value);
            }
            for part in &schema.all_of {
                if let SchemaOrRef::Schema(inner) = part
                    && let Value::Object(merged) = example_at(inner, field_name, depth + 1)
                {
                    map.extend(merged);
                }
            }
            Value::Object(map)
        }
        None => placeholder(field_name),
    }
}

fn string_example(schema: &Schema, field_name: Option<&str>) -> Value {
    if let Some(format) = schema.format.as_deref() {
        if format == "binary" {
            return Value::String(file_example(field_name));
        }
        if let Some((_, value)) = FORMAT_VALUES.iter().find(|(f, _)| *f == format) {
            return Value::String((*value).to_string());
        }
    }
    if let Some(first) = schema.enum_values.first() {
        return first.clone();
    }
    if let Some(hint) = field_name.and_then(name_hint) {
        return Value::String(hint.to_string());
    }
    placeholder(field_name)
}

fn number_example(schema: &Schema, integer: bool) -> Value {
    if let Some(min) = schema.minimum {
        return number_value(min, integer);
    }
    if let Some(excl) = schema.exclusive_minimum {
        return number_value(excl + 1.0, integer);
    }
    if let Some(first) = schema.enum_values.first() {
        return first.clone();
    }
    if integer { json!(123) } else { json!(123.45) }
}

fn number_value(value: f64, integer: bool) -> Value {
    if integer {
        json!(value as i64)
    } else {
        json!(value)
    }
}

fn file_example(field_name: Option<&str>) -> String {
    match field_name {
        Some(name) => format!("{name}.jpg"),
        None => "file.jpg".to_string(),
    }
}

fn name_hint(field_name: &str) -> Option<&'static str> {
    let lowered = field_name.to_ascii_lowercase();
    NAME_HINTS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, value)| *value)
}

fn placeholder(field_name: Option<&str>) -> Value {
    match field_name {
        Some(name) => Value::String(format!("example-{name}")),
        None => Value::String("example-value".to_string()),
    }
}
