//! The one background thread that talks to the backend.
//!
//! The UI thread never blocks: it queues an [`ApiRequest`] tagged with the
//! navigation scope it was issued under, and drains completed [`ApiEvent`]s
//! every tick. There is no cancellation of a request already in flight; a
//! completion whose scope is no longer current is discarded by the runtime,
//! so stale responses cannot touch state owned by a view the user has left.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiError, Backend, payload};
use crate::domain::{Record, RecordId, ResourceKind};
use crate::session::CurrentUser;

/// Navigation generation. Bumped on every route change; completions carry the
/// generation they were issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope(pub u64);

#[derive(Debug, Clone)]
pub enum ApiRequest {
    Login { payload: Value },
    /// Carries its own token, snapshotted at dispatch; the store is already
    /// cleared by the time this request executes.
    Logout { token: String },
    FetchMe,
    List { resource: ResourceKind },
    Fetch { resource: ResourceKind, id: RecordId },
    Save {
        resource: ResourceKind,
        id: Option<RecordId>,
        payload: Value,
    },
    Remove { resource: ResourceKind, id: RecordId },
}

/// A successful login: the token plus the account object, when the response
/// carried one.
#[derive(Debug, Clone)]
pub struct Login {
    pub token: String,
    pub user: Option<CurrentUser>,
}

#[derive(Debug)]
pub enum ApiOutcome {
    LoggedIn(Result<Login, ApiError>),
    LoggedOut(Result<(), ApiError>),
    Me(Result<CurrentUser, ApiError>),
    Listed {
        resource: ResourceKind,
        result: Result<Vec<Record>, ApiError>,
    },
    Fetched {
        resource: ResourceKind,
        id: RecordId,
        result: Result<Record, ApiError>,
    },
    Saved {
        resource: ResourceKind,
        result: Result<String, ApiError>,
    },
    Removed {
        resource: ResourceKind,
        result: Result<String, ApiError>,
    },
}

#[derive(Debug)]
pub struct ApiEvent {
    pub scope: Scope,
    pub outcome: ApiOutcome,
}

/// Executes one request against the backend. Pure with respect to the UI:
/// all session/screen mutation happens later, from the completion handler.
pub fn perform(backend: &dyn Backend, request: &ApiRequest) -> ApiOutcome {
    match request {
        ApiRequest::Login { payload } => ApiOutcome::LoggedIn(login(backend, payload)),
        ApiRequest::Logout { token } => {
            ApiOutcome::LoggedOut(backend.post_with_token("logout", token).map(|_| ()))
        }
        ApiRequest::FetchMe => ApiOutcome::Me(fetch_me(backend)),
        ApiRequest::List { resource } => {
            let spec = resource.spec();
            let result = backend
                .get(&spec.slug)
                .map(|body| payload::record_list(spec, &body));
            ApiOutcome::Listed {
                resource: *resource,
                result,
            }
        }
        ApiRequest::Fetch { resource, id } => {
            let spec = resource.spec();
            let result = backend
                .get(&format!("{}/{id}", spec.slug))
                .and_then(|body| {
                    payload::one_record(spec, &body).ok_or_else(|| ApiError::Unexpected {
                        status: 200,
                        detail: format!("record missing under data.{}", spec.record_key),
                    })
                });
            ApiOutcome::Fetched {
                resource: *resource,
                id: *id,
                result,
            }
        }
        ApiRequest::Save {
            resource,
            id,
            payload: body,
        } => {
            let spec = resource.spec();
            let result = match id {
                Some(id) => backend.put(&format!("{}/{id}", spec.slug), body),
                None => backend.post(&spec.slug, Some(body)),
            }
            .map(|body| payload::message(&body).unwrap_or_else(|| "Saved.".to_string()));
            ApiOutcome::Saved {
                resource: *resource,
                result,
            }
        }
        ApiRequest::Remove { resource, id } => {
            let spec = resource.spec();
            let result = backend
                .delete(&format!("{}/{id}", spec.slug))
                .map(|body| payload::message(&body).unwrap_or_else(|| "Deleted.".to_string()));
            ApiOutcome::Removed {
                resource: *resource,
                result,
            }
        }
    }
}

fn login(backend: &dyn Backend, payload: &Value) -> Result<Login, ApiError> {
    let body = backend.post("login", Some(payload))?;
    let token = payload::token(&body).ok_or_else(|| ApiError::Unexpected {
        status: 200,
        detail: "login response carried no token".to_string(),
    })?;
    Ok(Login {
        token,
        user: payload::account(&body),
    })
}

fn fetch_me(backend: &dyn Backend) -> Result<CurrentUser, ApiError> {
    let body = backend.get("me")?;
    payload::account(&body).ok_or_else(|| ApiError::Unexpected {
        status: 200,
        detail: "me response carried no user".to_string(),
    })
}

struct Job {
    scope: Scope,
    request: ApiRequest,
}

/// Handle to the background thread. Dropping it closes the request channel,
/// which ends the thread.
pub struct ApiWorker {
    requests: Sender<Job>,
    events: Receiver<ApiEvent>,
}

impl ApiWorker {
    pub fn spawn(backend: Arc<dyn Backend>) -> Result<Self> {
        let (request_tx, request_rx) = channel::<Job>();
        let (event_tx, event_rx) = channel();
        thread::Builder::new()
            .name("backend-io".to_string())
            .spawn(move || {
                while let Ok(job) = request_rx.recv() {
                    let outcome = perform(backend.as_ref(), &job.request);
                    if event_tx
                        .send(ApiEvent {
                            scope: job.scope,
                            outcome,
                        })
                        .is_err()
                    {
                        break;
                    }
                }
                debug!("backend worker shut down");
            })
            .context("failed to spawn backend worker thread")?;
        Ok(Self {
            requests: request_tx,
            events: event_rx,
        })
    }

    /// Queues a request under the given navigation scope. Never blocks.
    pub fn dispatch(&self, scope: Scope, request: ApiRequest) {
        let _ = self.requests.send(Job { scope, request });
    }

    /// Drains every completion that has arrived so far. Never blocks.
    pub fn poll(&self) -> Vec<ApiEvent> {
        self.events.try_iter().collect()
    }
}
