use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{FieldSpec, Widget};

/// The live buffer behind one form input.
#[derive(Debug, Clone)]
pub enum InputValue {
    Text(String),
    Secret(String),
    Select { options: Vec<String>, selected: usize },
}

/// One input of a live form: the field description plus its buffer, dirty
/// flag, and two independent error slots.
///
/// `client_error` comes from local rules. `server_error` is the message the
/// backend echoed back for this field after a rejected submission; it sticks
/// around until the next submission attempt replaces or clears it.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub spec: FieldSpec,
    pub value: InputValue,
    pub dirty: bool,
    pub client_error: Option<String>,
    pub server_error: Option<String>,
}

impl FieldInput {
    pub fn new(spec: FieldSpec) -> Self {
        let value = match &spec.widget {
            Widget::Text => InputValue::Text(String::new()),
            Widget::Secret => InputValue::Secret(String::new()),
            Widget::Select(options) => InputValue::Select {
                options: options.clone(),
                selected: 0,
            },
        };
        Self {
            spec,
            value,
            dirty: false,
            client_error: None,
            server_error: None,
        }
    }

    /// Loads a stored value without marking the field dirty. A select keeps
    /// its first option when the stored value is not among the options.
    pub fn seed(&mut self, stored: &str) {
        match &mut self.value {
            InputValue::Text(buffer) | InputValue::Secret(buffer) => {
                *buffer = stored.to_string();
            }
            InputValue::Select { options, selected } => {
                if let Some(index) = options.iter().position(|option| option == stored) {
                    *selected = index;
                }
            }
        }
    }

    /// The value this field submits. A select always carries its highlighted
    /// option, even when the user never touched it.
    pub fn current(&self) -> String {
        match &self.value {
            InputValue::Text(buffer) | InputValue::Secret(buffer) => buffer.clone(),
            InputValue::Select { options, selected } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
        }
    }

    /// What the field renders as. Secrets are masked.
    pub fn display_value(&self) -> String {
        match &self.value {
            InputValue::Text(buffer) => buffer.clone(),
            InputValue::Secret(buffer) => "*".repeat(buffer.chars().count()),
            InputValue::Select { options, selected } => options
                .get(*selected)
                .cloned()
                .unwrap_or_else(|| "<none>".to_string()),
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match &mut self.value {
            InputValue::Text(buffer) | InputValue::Secret(buffer) => match key.code {
                KeyCode::Char(ch) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        return false;
                    }
                    buffer.push(ch);
                    self.after_edit();
                    true
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    self.after_edit();
                    true
                }
                KeyCode::Delete => {
                    buffer.clear();
                    self.after_edit();
                    true
                }
                _ => false,
            },
            InputValue::Select { options, selected } => match key.code {
                KeyCode::Left => {
                    if *selected == 0 {
                        *selected = options.len().saturating_sub(1);
                    } else {
                        *selected -= 1;
                    }
                    self.after_edit();
                    true
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    if !options.is_empty() {
                        *selected = (*selected + 1) % options.len();
                    }
                    self.after_edit();
                    true
                }
                _ => false,
            },
        }
    }

    pub fn has_error(&self) -> bool {
        self.client_error.is_some() || self.server_error.is_some()
    }

    fn after_edit(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn text_input_edits_mark_dirty() {
        let mut field = FieldInput::new(FieldSpec::text("name", "Name", ""));
        assert!(field.handle_key(&key(KeyCode::Char('A'))));
        assert!(field.handle_key(&key(KeyCode::Char('d'))));
        assert_eq!(field.current(), "Ad");
        assert!(field.dirty);
        assert!(field.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(field.current(), "A");
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut field = FieldInput::new(FieldSpec::text("name", "Name", ""));
        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!field.handle_key(&chord));
        assert_eq!(field.current(), "");
        assert!(!field.dirty);
    }

    #[test]
    fn secret_display_is_masked_but_current_is_not() {
        let mut field = FieldInput::new(FieldSpec::secret("password", "Password"));
        field.seed("secret1");
        assert_eq!(field.display_value(), "*******");
        assert_eq!(field.current(), "secret1");
        assert!(!field.dirty);
    }

    #[test]
    fn select_defaults_to_first_option_and_cycles() {
        let mut field = FieldInput::new(FieldSpec::select(
            "gender",
            "Gender",
            &["male", "female", "others"],
        ));
        assert_eq!(field.current(), "male");
        assert!(field.handle_key(&key(KeyCode::Right)));
        assert_eq!(field.current(), "female");
        assert!(field.handle_key(&key(KeyCode::Left)));
        assert!(field.handle_key(&key(KeyCode::Left)));
        assert_eq!(field.current(), "others");
    }

    #[test]
    fn select_seed_ignores_unknown_values() {
        let mut field =
            FieldInput::new(FieldSpec::select("gender", "Gender", &["male", "female"]));
        field.seed("unknown");
        assert_eq!(field.current(), "male");
        field.seed("female");
        assert_eq!(field.current(), "female");
    }
}
