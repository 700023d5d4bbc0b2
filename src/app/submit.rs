//! The record submission pipeline, split at the async boundary.
//!
//! [`prepare`] runs on the UI thread: validate, and either reject with field
//! errors (no request is made) or produce the request to queue. [`conclude`]
//! classifies the completion once the worker delivers it. Both halves are
//! pure, so the whole pipeline is testable without a terminal or a server.
//!
//! Repeated invocations are safe: each attempt fully replaces the prior
//! error state, and nothing guards against overlapping submissions. The last
//! completion to arrive wins.

use crate::api::ApiError;
use crate::app::worker::ApiRequest;
use crate::domain::{FieldErrors, FieldValues, RecordId, ResourceKind};
use crate::schema::FormSchema;

/// What a submission is aimed at.
#[derive(Debug, Clone, Copy)]
pub enum SubmitTarget {
    Record {
        resource: ResourceKind,
        existing: Option<RecordId>,
    },
    Login,
}

/// Result of the local half of the pipeline.
#[derive(Debug)]
pub enum Launch {
    /// Client validation failed; these messages go to the form, and no
    /// network call is made.
    Rejected { errors: FieldErrors },
    /// Values passed validation; queue this request.
    Dispatched { request: ApiRequest },
}

/// Validates `values` against `schema` and builds the outbound request.
///
/// The payload is projected from the schema's own fields, so values the
/// schema does not know (say, a lingering password on an edit form) never
/// reach the wire. An existing identifier turns the save into an update
/// aimed at that identifier; its absence means create.
pub fn prepare(schema: &FormSchema, target: SubmitTarget, values: &FieldValues) -> Launch {
    let errors = schema.validate(values);
    if !errors.is_empty() {
        return Launch::Rejected { errors };
    }
    let payload = schema.payload(values);
    let request = match target {
        SubmitTarget::Login => ApiRequest::Login { payload },
        SubmitTarget::Record { resource, existing } => ApiRequest::Save {
            resource,
            id: existing,
            payload,
        },
    };
    Launch::Dispatched { request }
}

/// How a completed submission resolves.
#[derive(Debug)]
pub enum Outcome {
    /// 2xx: show the server's message and navigate to the collection view.
    Saved { message: String },
    /// 422: these messages replace the form's server errors wholesale. No
    /// navigation.
    Invalid { errors: FieldErrors },
    /// Everything else. The form stays as-is; the runtime decides how to
    /// surface it.
    Failed { error: ApiError },
}

pub fn conclude(result: Result<String, ApiError>) -> Outcome {
    match result {
        Ok(message) => Outcome::Saved { message },
        Err(ApiError::Validation { errors }) => Outcome::Invalid { errors },
        Err(error) => Outcome::Failed { error },
    }
}
