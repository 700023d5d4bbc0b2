mod actions;
mod field;
mod reducers;
mod state;

pub use actions::FormCommand;
pub use field::{FieldInput, InputValue};
pub use reducers::FormEngine;
pub use state::FormState;
