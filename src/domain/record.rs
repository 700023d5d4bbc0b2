use indexmap::IndexMap;
use serde_json::Value;

use super::resource::ResourceSpec;

/// Backend-assigned integer identifier. A record without one has never been
/// persisted.
pub type RecordId = u64;

/// Ordered field-name → value map. Every editable attribute is a free-form
/// string on the wire, so values are kept as strings end to end.
pub type FieldValues = IndexMap<String, String>;

/// Per-field human-readable messages. Produced independently by local
/// validation and by the backend's 422 responses; the two sets are kept
/// apart and rendered next to each other, never merged.
pub type FieldErrors = IndexMap<String, String>;

/// One user or address-book entry as known to the console.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: Option<RecordId>,
    pub fields: FieldValues,
    /// The untouched backend object, kept for display columns that reach
    /// into nested structures (e.g. `user.name`).
    pub raw: Value,
}

impl Record {
    /// Builds a record from a backend object, projecting the fields the
    /// resource declares. Missing or non-scalar attributes become empty
    /// strings; numeric scalars are rendered as text.
    pub fn from_value(spec: &ResourceSpec, value: &Value) -> Self {
        let id = value.get("id").and_then(Value::as_u64);
        let mut fields = FieldValues::new();
        for field in &spec.fields {
            let text = value
                .get(&field.name)
                .and_then(scalar_string)
                .unwrap_or_default();
            fields.insert(field.name.clone(), text);
        }
        Record {
            id,
            fields,
            raw: value.clone(),
        }
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Resolves a dotted display path (`user.name`) against the raw object.
    pub fn display_at(&self, path: &str) -> String {
        let mut current = &self.raw;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return String::new(),
            }
        }
        scalar_string(current).unwrap_or_default()
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
