use thiserror::Error;

use crate::domain::FieldErrors;

/// A classified backend failure.
///
/// Recoverable cases resolve at the submission pipeline; none of these may
/// crash the console. `Validation` is the only case that carries structured,
/// user-facing field feedback.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 422: the backend rejected the payload with per-field messages.
    #[error("validation failed for {} field(s)", .errors.len())]
    Validation { errors: FieldErrors },

    /// 401: the session token is missing, stale, or revoked.
    #[error("authentication required")]
    Auth,

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Every other failure mode, kept with enough detail for the log.
    #[error("unexpected response ({status}): {detail}")]
    Unexpected { status: u16, detail: String },
}

impl ApiError {
    /// Generic user-facing message for failures without field feedback.
    pub const FALLBACK_NOTICE: &'static str = "Something went wrong. Please try again.";

    /// Message shown when a 401 bounces the user back to the login view.
    pub const SESSION_EXPIRED_NOTICE: &'static str = "Session expired. Please sign in again.";
}
