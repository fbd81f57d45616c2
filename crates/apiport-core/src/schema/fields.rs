use indexmap::IndexMap;
use serde_json::Value;

use super::node::{Schema, SchemaOrRef, SchemaType};
use super::resolve::deref_schema;
use crate::diagnostics::Diagnostics;
use crate::model::{Field, FieldItems, FieldType};

/// Bound on schema/example nesting; levels past this are dropped rather
/// than risking unbounded recursion on a cyclic or hostile document.
const MAX_DEPTH: usize = 32;

pub fn field_type_of(t: SchemaType) -> FieldType {
    match t {
        SchemaType::String | SchemaType::Null => FieldType::String,
        SchemaType::Number => FieldType::Number,
        SchemaType::Integer => FieldType::Integer,
        SchemaType::Boolean => FieldType::Boolean,
        SchemaType::Array => FieldType::Array,
        SchemaType::Object => FieldType::Object,
        SchemaType::File => FieldType::File,
    }
}

/// Flatten `schema.properties` into one level of canonical fields.
///
/// Property-level `$ref`s are resolved against `doc` before their attributes
/// are read. Nested objects recurse into `Field.properties` and arrays into
/// `Field.items` (with `items.properties` for arrays of objects); names are
/// never dot-flattened. Membership in `required` is a positional lookup.
pub fn flatten_schema_fields(
    schema: &Schema,
    required: &[String],
    doc: Option<&Value>,
    diag: &mut Diagnostics,
) -> Vec<Field> {
    flatten_at(schema, required, doc, diag, 0)
}

fn flatten_at(
    schema: &Schema,
    required: &[String],
    doc: Option<&Value>,
    diag: &mut Diagnostics,
    depth: usize,
) -> Vec<Field> {
    if depth > MAX_DEPTH {
        return Vec::new();
    }

    let mut fields = Vec::new();
    collect_properties(&schema.properties, required, doc, diag, depth, &mut fields);

    // allOf members contribute their properties to the same flat level.
    for part in &schema.all_of {
        if let Some(sub) = deref_schema(part, doc, diag) {
            collect_properties(&sub.properties, &sub.required, doc, diag, depth, &mut fields);
        }
    }

    fields
}

fn collect_properties(
    properties: &IndexMap<String, SchemaOrRef>,
    required: &[String],
    doc: Option<&Value>,
    diag: &mut Diagnostics,
    depth: usize,
    out: &mut Vec<Field>,
) {
    for (name, prop) in properties {
        let Some(resolved) = deref_schema(prop, doc, diag) else {
            // Unresolved ref: the field is omitted, conversion continues.
            continue;
        };
        out.push(build_field(name, &resolved, required, doc, diag, depth));
    }
}

fn build_field(
    name: &str,
    schema: &Schema,
    required: &[String],
    doc: Option<&Value>,
    diag: &mut Diagnostics,
    depth: usize,
) -> Field {
    let field_type = schema
        .primary_type()
        .map(field_type_of)
        .unwrap_or(FieldType::String);

    let mut field = Field::new(name, field_type);
    field.required = required.iter().any(|r| r == name);
    field.description = schema.description.clone();
    field.format = schema.format.clone();
    field.enum_values = schema.enum_values.clone();
    field.pattern = schema.pattern.clone();
    field.min = schema.minimum;
    field.max = schema.maximum;
    field.example = schema.declared_example();

    match field_type {
        FieldType::Object => {
            let nested = if depth < MAX_DEPTH {
                flatten_at(schema, &schema.required, doc, diag, depth + 1)
            } else {
                Vec::new()
            };
            field.properties = Some(nested);
        }
        FieldType::Array => {
            field.items = Some(array_items(schema, doc, diag, depth));
        }
        _ => {}
    }

    field
}

fn array_items(
    schema: &Schema,
    doc: Option<&Value>,
    diag: &mut Diagnostics,
    depth: usize,
) -> FieldItems {
    let item_schema = schema
        .items
        .as_deref()
        .and_then(|node| deref_schema(node, doc, diag));

    match item_schema {
        Some(item) => {
            let item_type = item
                .primary_type()
                .map(field_type_of)
                .unwrap_or(FieldType::String);
            let properties = if item_type == FieldType::Object && depth < MAX_DEPTH {
                Some(flatten_at(&item, &item.required, doc, diag, depth + 1))
            } else {
                None
            };
            FieldItems {
                item_type,
                enum_values: item.enum_values.clone(),
                properties,
            }
        }
        None => FieldItems {
            item_type: FieldType::String,
            enum_values: Vec::new(),
            properties: None,
        },
    }
}

/// Infer a canonical type from the shape of a literal. Numbers map to
/// `integer` when they are mathematically integral.
pub fn infer_type(value: &Value) -> FieldType {
    match value {
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                FieldType::Integer
            } else {
                FieldType::Number
            }
        }
        Value::String(_) | Value::Null => FieldType::String,
    }
}

/// Reverse path used when no schema exists: derive a field tree from a
/// literal example, preserving nesting structurally.
pub fn infer_fields_from_example(example: &Value) -> Vec<Field> {
    infer_at(example, 0)
}

fn infer_at(example: &Value, depth: usize) -> Vec<Field> {
    let Value::Object(map) = example else {
        return Vec::new();
    };
    if depth > MAX_DEPTH {
        return Vec::new();
    }

    map.iter()
        .map(|(name, value)| {
            let field_type = infer_type(value);
            let mut field = Field::new(name, field_type);
            field.example = Some(value.clone());
            match field_type {
                FieldType::Object => {
                    field.properties = Some(infer_at(value, depth + 1));
                }
                FieldType::Array => {
                    let first = value.as_array().and_then(|a| a.first());
                    let item_type = first.map(infer_type).unwrap_or(FieldType::String);
                    let properties = match first {
                        Some(item) if item_type == FieldType::Object => {
                            Some(infer_at(item, depth + 1))
                        }
                        _ => None,
                    };
                    field.items = Some(FieldItems {
                        item_type,
                        enum_values: Vec::new(),
                        properties,
                    });
                }
                _ => {}
            }
            field
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_keep_structure() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "properties": {
                        "city": {"type": "string"},
                        "zip": {"type": "string"}
                    },
                    "required": ["city"]
                }
            }
        }))
        .unwrap();

        let mut diag = Diagnostics::new();
        let fields = flatten_schema_fields(&schema, &[], None, &mut diag);
        assert_eq!(fields.len(), 1);
        let address = &fields[0];
        assert_eq!(address.name, "address");
        assert_eq!(address.field_type, FieldType::Object);
        let nested = address.properties.as_ref().unwrap();
        assert_eq!(nested.len(), 2);
        assert!(nested[0].required);
        assert!(!nested[1].required);
        // No dotted names anywhere.
        assert!(fields.iter().all(|f| !f.name.contains('.')));
    }

    #[test]
    fn property_ref_resolved_against_doc() {
        let doc = json!({
            "components": {"schemas": {"Tag": {"type": "string", "enum": ["a", "b"]}}}
        });
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": {"tag": {"$ref": "#/components/schemas/Tag"}}
        }))
        .unwrap();

        let mut diag = Diagnostics::new();
        let fields = flatten_schema_fields(&schema, &[], Some(&doc), &mut diag);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, FieldType::String);
        assert_eq!(fields[0].enum_values, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn unresolved_ref_omits_field() {
        let doc = json!({"components": {"schemas": {}}});
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "ok": {"type": "boolean"},
                "missing": {"$ref": "#/components/schemas/Nope"}
            }
        }))
        .unwrap();

        let mut diag = Diagnostics::new();
        let fields = flatten_schema_fields(&schema, &[], Some(&doc), &mut diag);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "ok");
        assert!(!diag.is_empty());
    }

    #[test]
    fn array_of_objects_nests_under_items() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "tags": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"label": {"type": "string"}}
                    }
                }
            }
        }))
        .unwrap();

        let mut diag = Diagnostics::new();
        let fields = flatten_schema_fields(&schema, &[], None, &mut diag);
        let items = fields[0].items.as_ref().unwrap();
        assert_eq!(items.item_type, FieldType::Object);
        let nested = items.properties.as_ref().unwrap();
        assert_eq!(nested[0].name, "label");
    }

    #[test]
    fn infer_types_from_literals() {
        assert_eq!(infer_type(&json!("x")), FieldType::String);
        assert_eq!(infer_type(&json!(3)), FieldType::Integer);
        assert_eq!(infer_type(&json!(3.5)), FieldType::Number);
        assert_eq!(infer_type(&json!(true)), FieldType::Boolean);
        assert_eq!(infer_type(&json!([1])), FieldType::Array);
        assert_eq!(infer_type(&json!({})), FieldType::Object);
        assert_eq!(infer_type(&Value::Null), FieldType::String);
    }

    #[test]
    fn infer_fields_preserves_nesting() {
        let example = json!({
            "name": "John",
            "age": 41,
            "address": {"city": "Oslo"},
            "scores": [1.5, 2.5]
        });
        let fields = infer_fields_from_example(&example);
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|f| !f.name.contains('.')));

        let address = fields.iter().find(|f| f.name == "address").unwrap();
        assert_eq!(address.field_type, FieldType::Object);
        assert_eq!(address.properties.as_ref().unwrap()[0].name, "city");

        let scores = fields.iter().find(|f| f.name == "scores").unwrap();
        assert_eq!(scores.items.as_ref().unwrap().item_type, FieldType::Number);
    }
}
