mod record;
mod resource;

pub use record::{FieldErrors, FieldValues, Record, RecordId};
pub use resource::{Column, FieldSpec, ResourceKind, ResourceSpec, Widget};
