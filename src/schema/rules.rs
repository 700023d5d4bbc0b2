use std::sync::LazyLock;

use regex::Regex;

use crate::domain::FieldValues;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

/// A single field-level constraint together with the message shown when it fails.
///
/// Rules are evaluated in declaration order and the first failure wins, so a
/// field reports at most one message at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The value must be non-empty.
    Required { message: String },
    /// The value must look like an email address. Empty values fail too.
    Email { message: String },
    /// The value must be at least `min` characters long.
    MinLength { min: usize, message: String },
    /// The value must equal the current value of another field.
    Matches { field: String, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn email() -> Self {
        Self::Email {
            message: "Invalid email".to_string(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn matches(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Matches {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Checks `value` against this rule, returning the failure message if it
    /// does not hold. `values` supplies the other fields for cross-field rules.
    pub fn check(&self, value: &str, values: &FieldValues) -> Option<String> {
        match self {
            Self::Required { message } => value.is_empty().then(|| message.clone()),
            Self::Email { message } => (!EMAIL_PATTERN.is_match(value)).then(|| message.clone()),
            Self::MinLength { min, message } => {
                (value.chars().count() < *min).then(|| message.clone())
            }
            Self::Matches { field, message } => {
                let other = values.get(field).map(String::as_str).unwrap_or_default();
                (value != other).then(|| message.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn no_values() -> FieldValues {
        IndexMap::new()
    }

    #[test]
    fn required_rejects_empty_only() {
        let rule = Rule::required("Name is required");
        assert_eq!(
            rule.check("", &no_values()),
            Some("Name is required".to_string())
        );
        assert_eq!(rule.check("Ada", &no_values()), None);
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let rule = Rule::email();
        assert_eq!(rule.check("", &no_values()), Some("Invalid email".into()));
        assert_eq!(
            rule.check("not-an-email", &no_values()),
            Some("Invalid email".into())
        );
        assert_eq!(rule.check("ada@lovelace.dev", &no_values()), None);
    }

    #[test]
    fn min_length_counts_characters() {
        let rule = Rule::min_length(6, "Password must be at least 6 characters");
        assert!(rule.check("12345", &no_values()).is_some());
        assert_eq!(rule.check("123456", &no_values()), None);
    }

    #[test]
    fn matches_compares_against_other_field() {
        let rule = Rule::matches("password", "Password don't match");
        let mut values = no_values();
        values.insert("password".to_string(), "secret1".to_string());
        assert_eq!(
            rule.check("secret2", &values),
            Some("Password don't match".to_string())
        );
        assert_eq!(rule.check("secret1", &values), None);
    }
}
