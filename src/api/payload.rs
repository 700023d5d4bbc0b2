//! Readers for the backend's response envelopes.
//!
//! The backend wraps everything: single records under
//! `{"data": {"<record_key>": {...}}}`, collections under
//! `{"data": {"<list_key>": [...]}}`, mutations under `{"message", "data"}`
//! and 422 rejections under `{"errors": {...}}`. These helpers unwrap those
//! shapes and shrug off missing keys instead of failing.

use serde_json::Value;

use crate::domain::{FieldErrors, Record, ResourceSpec};
use crate::session::CurrentUser;

/// The human-readable message of a mutation response.
pub fn message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// The per-field map of a 422 body. Values may be a plain string or an array
/// of strings; arrays collapse to their first entry.
pub fn error_map(body: &Value) -> FieldErrors {
    let mut map = FieldErrors::new();
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return map;
    };
    for (field, value) in errors {
        let first = match value {
            Value::String(text) => Some(text.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        if let Some(message) = first {
            map.insert(field.clone(), message);
        }
    }
    map
}

/// The records of a collection response.
pub fn record_list(spec: &ResourceSpec, body: &Value) -> Vec<Record> {
    body.get("data")
        .and_then(|data| data.get(&spec.list_key))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| Record::from_value(spec, item))
                .collect()
        })
        .unwrap_or_default()
}

/// The single record of a fetch-one or mutation response.
pub fn one_record(spec: &ResourceSpec, body: &Value) -> Option<Record> {
    body.get("data")
        .and_then(|data| data.get(&spec.record_key))
        .map(|value| Record::from_value(spec, value))
}

/// The account object of `GET /me` and login responses (`{"user": {...}}`).
pub fn account(body: &Value) -> Option<CurrentUser> {
    let user = body.get("user")?;
    let email = user
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let name = user
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| email.clone());
    Some(CurrentUser { name, email })
}

/// The session token of a login response.
pub fn token(body: &Value) -> Option<String> {
    body.get("token")
        .and_then(Value::as_str)
        .map(str::to_string)
}
