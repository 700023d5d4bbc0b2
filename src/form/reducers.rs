use crate::schema::FormSchema;

use super::{actions::FormCommand, state::FormState};

/// Applies form commands against a state/schema pair.
///
/// Submission-time validation lives in the pipeline; the engine only keeps
/// already-visible messages honest while the user types. A field that shows a
/// client error is rechecked on each edit so the message clears the moment
/// the input becomes valid; untouched fields keep whatever they show.
pub struct FormEngine<'a> {
    state: &'a mut FormState,
    schema: &'a FormSchema,
}

impl<'a> FormEngine<'a> {
    pub fn new(state: &'a mut FormState, schema: &'a FormSchema) -> Self {
        Self { state, schema }
    }

    pub fn dispatch(&mut self, command: FormCommand) {
        match command {
            FormCommand::FocusNext => self.state.focus_next(),
            FormCommand::FocusPrev => self.state.focus_prev(),
            FormCommand::Edited { field } => self.recheck(&field),
        }
    }

    fn recheck(&mut self, name: &str) {
        let showing = self
            .state
            .field_mut(name)
            .is_some_and(|field| field.client_error.is_some());
        if !showing {
            return;
        }
        let values = self.state.values();
        let message = self.schema.check_field(name, &values);
        if let Some(field) = self.state.field_mut(name) {
            field.client_error = message;
        }
    }
}
