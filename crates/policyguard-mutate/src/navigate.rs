use crate::error::PathError;
use crate::path::PathComponent;
use serde_json::{Map, Value};

/// Walk `path` from `root`, creating missing map fields along the way.
///
/// Missing fields are created with the kind the next component needs (an
/// index wants a sequence, a field wants a map, the leaf starts as null).
/// Sequences are never grown: an out-of-range index is `Ok(None)`.
/// Nothing is created unless the whole path resolves.
pub(crate) fn lookup_or_create<'a>(
    root: &'a mut Value,
    path: &[PathComponent],
) -> Result<Option<&'a mut Value>, PathError> {
    if !resolves(root, path)? {
        return Ok(None);
    }

    let mut node = root;
    for (i, component) in path.iter().enumerate() {
        let next = path.get(i + 1);
        node = match component {
            PathComponent::Field(name) => {
                if node.is_null() {
                    *node = Value::Object(Map::new());
                }
                let found = kind_name(node);
                match node {
                    Value::Object(map) => map
                        .entry(name.clone())
                        .or_insert_with(|| placeholder(next)),
                    _ => return Err(mismatch(component, "map", found)),
                }
            }
            PathComponent::Index(idx) => {
                let found = kind_name(node);
                match node {
                    Value::Array(items) => match items.get_mut(*idx) {
                        Some(item) => item,
                        None => return Ok(None),
                    },
                    _ => return Err(mismatch(component, "sequence", found)),
                }
            }
        };
    }
    Ok(Some(node))
}

/// Read-only dry run of [`lookup_or_create`].
fn resolves(root: &Value, path: &[PathComponent]) -> Result<bool, PathError> {
    let mut node = root;
    for (i, component) in path.iter().enumerate() {
        node = match (component, node) {
            (PathComponent::Field(name), Value::Object(map)) => match map.get(name) {
                Some(child) => child,
                None => return Ok(created_tail_resolves(&path[i + 1..])),
            },
            (PathComponent::Field(_), Value::Null) => {
                return Ok(created_tail_resolves(&path[i + 1..]));
            }
            (PathComponent::Field(_), other) => {
                return Err(mismatch(component, "map", kind_name(other)));
            }
            (PathComponent::Index(idx), Value::Array(items)) => match items.get(*idx) {
                Some(item) => item,
                None => return Ok(false),
            },
            (PathComponent::Index(_), other) => {
                return Err(mismatch(component, "sequence", kind_name(other)));
            }
        };
    }
    Ok(true)
}

/// Below a created field every container is new, so any index lands in an empty sequence.
fn created_tail_resolves(rest: &[PathComponent]) -> bool {
    !rest
        .iter()
        .any(|component| matches!(component, PathComponent::Index(_)))
}

fn placeholder(next: Option<&PathComponent>) -> Value {
    match next {
        Some(PathComponent::Index(_)) => Value::Array(Vec::new()),
        Some(PathComponent::Field(_)) => Value::Object(Map::new()),
        None => Value::Null,
    }
}

fn mismatch(component: &PathComponent, expected: &'static str, found: &'static str) -> PathError {
    PathError {
        component: component.to_string(),
        expected,
        found,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}
