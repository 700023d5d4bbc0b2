#![deny(rust_2018_idioms)]

mod api;
mod app;
mod config;
mod console;
mod domain;
mod form;
mod presentation;
mod schema;
mod session;

pub use api::{ApiError, Backend, HttpBackend};
pub use app::UiOptions;
pub use config::Config;
pub use console::Console;
pub use domain::{Record, RecordId, ResourceKind, ResourceSpec};
pub use session::SessionStore;

pub mod prelude {
    pub use super::{Config, Console, UiOptions};
}
