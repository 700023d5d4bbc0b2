use crate::domain::{FieldErrors, FieldValues, Record};
use crate::schema::FormSchema;

use super::field::FieldInput;

/// Live state of one form: the ordered inputs plus the focus index.
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: Vec<FieldInput>,
    pub focus: usize,
}

impl FormState {
    /// Builds a blank form matching `schema`, focused on the first field.
    pub fn from_schema(schema: &FormSchema) -> Self {
        let fields = schema
            .fields
            .iter()
            .map(|plan| FieldInput::new(plan.spec.clone()))
            .collect();
        Self { fields, focus: 0 }
    }

    /// Builds a form seeded from an existing record. Fields the record does
    /// not carry stay blank.
    pub fn from_record(schema: &FormSchema, record: &Record) -> Self {
        let mut state = Self::from_schema(schema);
        state.seed(&record.fields);
        state
    }

    pub fn seed(&mut self, values: &FieldValues) {
        for field in &mut self.fields {
            if let Some(stored) = values.get(&field.spec.name) {
                field.seed(stored);
            }
        }
    }

    /// Snapshot of every field's current value, keyed by field name.
    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|field| (field.spec.name.clone(), field.current()))
            .collect()
    }

    pub fn focused_mut(&mut self) -> Option<&mut FieldInput> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        if self.focus == 0 {
            self.focus = self.fields.len() - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldInput> {
        self.fields.iter_mut().find(|field| field.spec.name == name)
    }

    /// Replaces every client error slot from a validation result. Fields
    /// missing from `errors` have their slot cleared.
    pub fn set_client_errors(&mut self, errors: &FieldErrors) {
        for field in &mut self.fields {
            field.client_error = errors.get(&field.spec.name).cloned();
        }
    }

    /// Replaces every server error slot wholesale. Keys the form does not
    /// know are dropped.
    pub fn set_server_errors(&mut self, errors: &FieldErrors) {
        for field in &mut self.fields {
            field.server_error = errors.get(&field.spec.name).cloned();
        }
    }

    pub fn clear_server_errors(&mut self) {
        for field in &mut self.fields {
            field.server_error = None;
        }
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|field| field.has_error()).count()
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(|field| field.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use crate::schema::resolve;
    use serde_json::json;

    #[test]
    fn blank_form_mirrors_schema_order() {
        let schema = resolve(ResourceKind::Users.spec(), None);
        let form = FormState::from_schema(&schema);
        let names: Vec<&str> = form.fields.iter().map(|f| f.spec.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "name",
                "email",
                "phone",
                "website",
                "gender",
                "age",
                "nationality",
                "password",
                "confirm_password",
            ]
        );
        assert_eq!(form.focus, 0);
        assert!(!form.is_dirty());
    }

    #[test]
    fn seeded_form_copies_record_values() {
        let spec = ResourceKind::Users.spec();
        let schema = resolve(spec, Some(7));
        let record = Record::from_value(
            spec,
            &json!({"id": 7, "name": "Ada", "email": "ada@lovelace.dev", "gender": "female"}),
        );
        let form = FormState::from_record(&schema, &record);
        let values = form.values();
        assert_eq!(values.get("name").map(String::as_str), Some("Ada"));
        assert_eq!(values.get("gender").map(String::as_str), Some("female"));
        assert_eq!(values.get("phone").map(String::as_str), Some(""));
        assert!(!form.is_dirty());
    }

    #[test]
    fn focus_wraps_both_directions() {
        let schema = resolve(ResourceKind::AddressBooks.spec(), None);
        let mut form = FormState::from_schema(&schema);
        form.focus_prev();
        assert_eq!(form.focus, form.fields.len() - 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn server_errors_replace_wholesale() {
        let schema = resolve(ResourceKind::Users.spec(), None);
        let mut form = FormState::from_schema(&schema);
        let first: FieldErrors = [
            ("email".to_string(), "already taken".to_string()),
            ("name".to_string(), "too short".to_string()),
        ]
        .into_iter()
        .collect();
        form.set_server_errors(&first);
        assert_eq!(form.error_count(), 2);

        let second: FieldErrors = [("email".to_string(), "is invalid".to_string())]
            .into_iter()
            .collect();
        form.set_server_errors(&second);
        assert_eq!(
            form.field_mut("email").unwrap().server_error.as_deref(),
            Some("is invalid")
        );
        assert!(form.field_mut("name").unwrap().server_error.is_none());
    }

    #[test]
    fn unknown_server_keys_are_dropped() {
        let schema = resolve(ResourceKind::AddressBooks.spec(), None);
        let mut form = FormState::from_schema(&schema);
        let errors: FieldErrors = [("nonexistent".to_string(), "boom".to_string())]
            .into_iter()
            .collect();
        form.set_server_errors(&errors);
        assert_eq!(form.error_count(), 0);
    }
}
