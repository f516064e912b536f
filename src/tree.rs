use std::collections::HashMap;

use serde_json::Value;

/// Flattened view of a document: every non-root node keyed by its path,
/// kept in pre-order traversal order.
#[derive(Debug, Default)]
pub struct AddressSpace<'a> {
    entries: Vec<(String, &'a Value)>,
    positions: HashMap<String, usize>,
}

impl<'a> AddressSpace<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&'a Value> {
        self.positions.get(path).map(|&i| self.entries[i].1)
    }

    // traversal order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a Value)> + '_ {
        self.entries.iter().map(|(p, v)| (p.as_str(), *v))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    fn insert(&mut self, path: String, value: &'a Value) {
        self.positions.insert(path.clone(), self.entries.len());
        self.entries.push((path, value));
    }
}

/// Walk `root` once and collect every descendant under its path.
pub fn index(root: &Value) -> AddressSpace<'_> {
    let mut space = AddressSpace::default();
    walk(root, None, &mut space);
    tracing::debug!(paths = space.len(), "indexed document");
    space
}

// `parent` is None only for the root, so an empty key still gets its dot
fn walk<'a>(value: &'a Value, parent: Option<&str>, space: &mut AddressSpace<'a>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter() {
                let child_path = match parent {
                    None => key.clone(),
                    Some(parent) => format!("{}.{}", parent, key),
                };
                space.insert(child_path.clone(), child);
                walk(child, Some(&child_path), space);
            }
        }
        Value::Array(arr) => {
            for (index, item) in arr.iter().enumerate() {
                let child_path = format!("{}[{}]", parent.unwrap_or(""), index);
                space.insert(child_path.clone(), item);
                walk(item, Some(&child_path), space);
            }
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

/// Last `.` segment of a path, used as a short label.
pub fn tag(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Number of `.` segments; array brackets do not add levels.
pub fn depth(path: &str) -> usize {
    path.split('.').count()
}

/// Text a value is matched against: raw text for strings, the JSON literal
/// for other scalars. Containers keep JSON punctuation but their keys and
/// strings are written unescaped, so a term matching a leaf also matches
/// every container above it.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) | Value::Null => value.to_string(),
        Value::Object(_) | Value::Array(_) => {
            let mut out = String::new();
            write_raw(value, &mut out);
            out
        }
    }
}

fn write_raw(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_raw(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                out.push_str(key);
                out.push_str("\":");
                write_raw(child, out);
            }
            out.push('}');
        }
    }
}

pub fn text_matches(text: &str, query: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text.contains(query)
    } else {
        text.to_lowercase().contains(&query.to_lowercase())
    }
}
