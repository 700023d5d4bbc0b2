use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::payload;
use crate::session::SessionStore;

/// Blocking transport to the backend.
///
/// Only the worker thread calls this, so blocking is fine; the UI thread
/// never touches a `Backend` directly. All bodies are JSON values in and out;
/// an empty response body comes back as `Value::Null`.
pub trait Backend: Send + Sync {
    fn get(&self, path: &str) -> Result<Value, ApiError>;
    fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError>;
    /// `POST` authenticated with the given token instead of the stored
    /// session. Used by logout, which fires after the local session is
    /// already gone.
    fn post_with_token(&self, path: &str, token: &str) -> Result<Value, ApiError>;
    fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
    fn delete(&self, path: &str) -> Result<Value, ApiError>;
}

/// `ureq`-backed transport. Requests attach the stored session token as a
/// bearer credential whenever one is present; an explicit token takes
/// precedence over the store.
pub struct HttpBackend {
    agent: ureq::Agent,
    base_url: String,
    session: SessionStore,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration, session: SessionStore) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self
            .agent
            .request(method, &url)
            .set("Accept", "application/json");
        let bearer = match token {
            Some(explicit) => Some(explicit.to_string()),
            None => self.session.token(),
        };
        if let Some(token) = bearer {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        debug!(method, path, "backend request");
        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };
        match result {
            Ok(response) => parse_body(response),
            Err(ureq::Error::Status(status, response)) => Err(classify(status, response)),
            Err(err) => Err(ApiError::Network(err.to_string())),
        }
    }
}

impl Backend for HttpBackend {
    fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send("GET", path, None, None)
    }

    fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.send("POST", path, body, None)
    }

    fn post_with_token(&self, path: &str, token: &str) -> Result<Value, ApiError> {
        self.send("POST", path, None, Some(token))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send("PUT", path, Some(body), None)
    }

    fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send("DELETE", path, None, None)
    }
}

fn parse_body(response: ureq::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response
        .into_string()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|err| ApiError::Unexpected {
        status,
        detail: format!("unparseable body: {err}"),
    })
}

fn classify(status: u16, response: ureq::Response) -> ApiError {
    let text = response.into_string().unwrap_or_default();
    match status {
        401 => ApiError::Auth,
        422 => {
            let errors = serde_json::from_str::<Value>(&text)
                .map(|body| payload::error_map(&body))
                .unwrap_or_default();
            ApiError::Validation { errors }
        }
        _ => ApiError::Unexpected {
            status,
            detail: snippet(&text),
        },
    }
}

fn snippet(text: &str) -> String {
    const LIMIT: usize = 200;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        let cut: String = text.chars().take(LIMIT).collect();
        format!("{cut}…")
    }
}
