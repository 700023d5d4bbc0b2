//! Session state and the route gate that consumes it.

mod gate;
mod store;

pub use gate::{GateDecision, RouteAccess, evaluate};
pub use store::{CurrentUser, SessionStore};
