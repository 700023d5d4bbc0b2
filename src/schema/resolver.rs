use serde_json::Value;

use crate::domain::{FieldErrors, FieldSpec, FieldValues, RecordId, ResourceSpec};
use crate::schema::rules::Rule;

/// Whether a schema was resolved for creating a new record or editing an
/// existing one. Credential fields only exist in create mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    Create,
    Edit,
}

/// One field of a resolved schema: the widget description plus the rules that
/// gate submission.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    pub spec: FieldSpec,
    pub rules: Vec<Rule>,
}

impl FieldPlan {
    fn new(spec: FieldSpec, rules: Vec<Rule>) -> Self {
        Self { spec, rules }
    }
}

/// A fully resolved schema for one editing session.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub mode: SchemaMode,
    pub fields: Vec<FieldPlan>,
}

impl FormSchema {
    /// Runs every rule against `values` and returns the failures, keyed by
    /// field name. Each field reports its first failing rule only.
    pub fn validate(&self, values: &FieldValues) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for plan in &self.fields {
            if let Some(message) = self.check_field(&plan.spec.name, values) {
                errors.insert(plan.spec.name.clone(), message);
            }
        }
        errors
    }

    /// Validates a single field, returning its first failing rule's message.
    /// Unknown field names validate clean.
    pub fn check_field(&self, name: &str, values: &FieldValues) -> Option<String> {
        let plan = self.fields.iter().find(|plan| plan.spec.name == name)?;
        let value = values.get(name).map(String::as_str).unwrap_or_default();
        plan.rules
            .iter()
            .find_map(|rule| rule.check(value, values))
    }

    /// Projects `values` into the JSON object sent to the backend. Only the
    /// schema's own fields are included; stray keys in `values` are dropped.
    pub fn payload(&self, values: &FieldValues) -> Value {
        let mut body = serde_json::Map::new();
        for plan in &self.fields {
            let value = values.get(&plan.spec.name).cloned().unwrap_or_default();
            body.insert(plan.spec.name.clone(), Value::String(value));
        }
        Value::Object(body)
    }
}

/// Resolves the schema for editing `spec` records. With no existing record the
/// schema is in create mode, which appends the password pair for resources
/// that carry credentials.
pub fn resolve(spec: &ResourceSpec, existing: Option<RecordId>) -> FormSchema {
    let mode = if existing.is_some() {
        SchemaMode::Edit
    } else {
        SchemaMode::Create
    };
    let mut fields: Vec<FieldPlan> = spec
        .fields
        .iter()
        .map(|field| FieldPlan::new(field.clone(), base_rules(&field.name)))
        .collect();
    if mode == SchemaMode::Create && spec.credentials {
        fields.push(FieldPlan::new(
            FieldSpec::secret("password", "Password"),
            vec![Rule::min_length(6, "Password must be at least 6 characters")],
        ));
        fields.push(FieldPlan::new(
            FieldSpec::secret("confirm_password", "Confirm Password"),
            vec![
                Rule::required("Confirm Password is required"),
                Rule::matches("password", "Password don't match"),
            ],
        ));
    }
    FormSchema { mode, fields }
}

/// The sign-in form schema. Not tied to any resource.
pub fn login_schema() -> FormSchema {
    FormSchema {
        mode: SchemaMode::Create,
        fields: vec![
            FieldPlan::new(
                FieldSpec::text("email", "Email", "name@company.com"),
                vec![Rule::email()],
            ),
            FieldPlan::new(
                FieldSpec::secret("password", "Password"),
                vec![Rule::required("Password is required")],
            ),
        ],
    }
}

fn base_rules(name: &str) -> Vec<Rule> {
    match name {
        "name" => vec![Rule::required("Name is required")],
        "email" => vec![Rule::email()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn field_names(schema: &FormSchema) -> Vec<&str> {
        schema
            .fields
            .iter()
            .map(|plan| plan.spec.name.as_str())
            .collect()
    }

    #[test]
    fn create_mode_appends_credentials_for_users() {
        let schema = resolve(ResourceKind::Users.spec(), None);
        assert_eq!(schema.mode, SchemaMode::Create);
        assert!(field_names(&schema).ends_with(&["password", "confirm_password"]));
    }

    #[test]
    fn edit_mode_omits_credentials() {
        let schema = resolve(ResourceKind::Users.spec(), Some(7));
        assert_eq!(schema.mode, SchemaMode::Edit);
        assert!(!field_names(&schema).contains(&"password"));
        assert!(!field_names(&schema).contains(&"confirm_password"));
    }

    #[test]
    fn address_books_never_carry_credentials() {
        let schema = resolve(ResourceKind::AddressBooks.spec(), None);
        assert!(!field_names(&schema).contains(&"password"));
    }

    #[test]
    fn validate_reports_first_failure_per_field() {
        let schema = resolve(ResourceKind::Users.spec(), None);
        let errors = schema.validate(&values(&[("email", "nope")]));
        assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email"));
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("Password must be at least 6 characters")
        );
        // confirm_password is empty and matches the empty password, so only
        // the required rule fires.
        assert_eq!(
            errors.get("confirm_password").map(String::as_str),
            Some("Confirm Password is required")
        );
    }

    #[test]
    fn mismatched_confirmation_is_reported_on_the_confirm_field() {
        let schema = resolve(ResourceKind::Users.spec(), None);
        let errors = schema.validate(&values(&[
            ("name", "Ada"),
            ("email", "ada@lovelace.dev"),
            ("password", "secret1"),
            ("confirm_password", "secret2"),
        ]));
        assert!(!errors.contains_key("password"));
        assert_eq!(
            errors.get("confirm_password").map(String::as_str),
            Some("Password don't match")
        );
    }

    #[test]
    fn clean_values_validate_without_errors() {
        let schema = resolve(ResourceKind::Users.spec(), None);
        let errors = schema.validate(&values(&[
            ("name", "Ada"),
            ("email", "ada@lovelace.dev"),
            ("password", "secret1"),
            ("confirm_password", "secret1"),
        ]));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn payload_projects_schema_fields_only() {
        let schema = resolve(ResourceKind::AddressBooks.spec(), Some(3));
        let mut input = values(&[("name", "Ada"), ("email", "ada@lovelace.dev")]);
        input.insert("stray".to_string(), "ignored".to_string());
        let payload = schema.payload(&input);
        assert_eq!(payload["name"], "Ada");
        assert_eq!(payload["email"], "ada@lovelace.dev");
        assert_eq!(payload["phone"], "");
        assert!(payload.get("stray").is_none());
    }

    #[test]
    fn login_schema_checks_email_shape_and_password_presence() {
        let schema = login_schema();
        let errors = schema.validate(&values(&[("email", "admin"), ("password", "")]));
        assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email"));
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("Password is required")
        );
    }
}
