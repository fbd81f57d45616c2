use std::collections::HashSet;

use serde_json::Value;

use super::node::{Schema, SchemaOrRef};
use crate::diagnostics::Diagnostics;

/// Resolve a local `#/a/b/c` reference against the raw document by JSON
/// pointer walk. External and malformed refs resolve to `None` with a
/// diagnostic, never an error.
pub fn resolve_ref<'a>(
    reference: &str,
    doc: &'a Value,
    diag: &mut Diagnostics,
) -> Option<&'a Value> {
    let Some(pointer) = reference.strip_prefix('#') else {
        diag.unresolved_ref(reference);
        return None;
    };
    match doc.pointer(pointer) {
        Some(node) => Some(node),
        None => {
            diag.unresolved_ref(reference);
            None
        }
    }
}

/// Chase a `SchemaOrRef` down to an inline schema, following transitive
/// refs. A visited set fails closed on cycles: the offending ref is treated
/// as unresolved instead of recursing forever.
pub fn deref_schema(
    node: &SchemaOrRef,
    doc: Option<&Value>,
    diag: &mut Diagnostics,
) -> Option<Schema> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = node.clone();
    loop {
        match current {
            SchemaOrRef::Schema(schema) => return Some(*schema),
            SchemaOrRef::Ref { ref_path } => {
                let Some(doc) = doc else {
                    diag.unresolved_ref(&ref_path);
                    return None;
                };
                if !seen.insert(ref_path.clone()) {
                    diag.unresolved_ref(&ref_path);
                    return None;
                }
                let target = resolve_ref(&ref_path, doc, diag)?;
                match serde_json::from_value::<SchemaOrRef>(target.clone()) {
                    Ok(next) => current = next,
                    Err(_) => {
                        diag.unresolved_ref(&ref_path);
                        return None;
                    }
                }
            }
        }
    }
}
