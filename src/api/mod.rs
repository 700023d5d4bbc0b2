//! Backend transport and response envelope handling.

mod client;
mod error;
pub mod payload;

pub use client::{Backend, HttpBackend};
pub use error::ApiError;
