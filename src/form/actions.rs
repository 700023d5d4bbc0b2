#[derive(Debug, Clone)]
pub enum FormCommand {
    FocusNext,
    FocusPrev,
    Edited { field: String },
}
