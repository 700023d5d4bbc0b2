//! Validation schemas resolved per resource and mode.
//!
//! A [`FormSchema`] is the bridge between a [`ResourceSpec`](crate::domain::ResourceSpec)
//! and a live form: it carries the ordered field plans (widget + rules) for one
//! concrete editing session, knows how to validate a value map, and projects the
//! values into the JSON payload the backend expects.

pub(crate) mod resolver;
pub(crate) mod rules;

pub use resolver::{FormSchema, SchemaMode, login_schema, resolve};
