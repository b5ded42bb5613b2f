//! Path site discovery
//!
//! A node is any JSON object. Every object with a string `data` field inside
//! one of the configured path arrays is a path site; recursion follows the
//! configured children array. Sites come out in document order: path fields in
//! configured order, then children by index.

use serde_json::Value;

use crate::options::DocumentOptions;

/// A path record found in a document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSite {
    /// JSON pointer to the record object (not to its `data` string)
    pub pointer: String,
    pub data: String,
}

/// Escape a key as a JSON pointer reference token
pub fn escape_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Collect every path site under `root`
pub fn collect_sites(root: &Value, options: &DocumentOptions) -> Vec<PathSite> {
    let mut sites = Vec::new();
    visit(root, String::new(), options, &mut sites);
    sites
}

fn visit(node: &Value, pointer: String, options: &DocumentOptions, sites: &mut Vec<PathSite>) {
    let Value::Object(map) = node else {
        return;
    };

    for field in &options.path_fields {
        let Some(Value::Array(records)) = map.get(field) else {
            continue;
        };
        let field_pointer = format!("{}/{}", pointer, escape_token(field));
        for (index, record) in records.iter().enumerate() {
            if let Some(Value::String(data)) = record.get("data") {
                sites.push(PathSite {
                    pointer: format!("{}/{}", field_pointer, index),
                    data: data.clone(),
                });
            }
        }
    }

    if let Some(Value::Array(children)) = map.get(&options.children_field) {
        let children_pointer = format!("{}/{}", pointer, escape_token(&options.children_field));
        for (index, child) in children.iter().enumerate() {
            visit(child, format!("{}/{}", children_pointer, index), options, sites);
        }
    }
}

/// Overwrite the `data` string of the record at `pointer`
///
/// Returns `false` when the pointer no longer resolves to a string.
pub fn write_site(root: &mut Value, pointer: &str, data: String) -> bool {
    match root.pointer_mut(&format!("{}/data", pointer)) {
        Some(slot) if slot.is_string() => {
            *slot = Value::String(data);
            true
        }
        _ => false,
    }
}
