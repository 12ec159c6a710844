//! Error types and HTTP error response handling.
//!
//! Two kinds of failure leave the request pipeline:
//!
//! - A [`Failure`] is *signaled* by a pipeline stage (precondition, body
//!   parser). It skips every remaining stage and is rendered by the single
//!   error responder in [`Failure::into_response`].
//! - Every other [`AppError`] variant is a response the stage decided on
//!   itself (a store error with a route specific message, a 404).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::services::StoreError;

/// Top-level message of every response produced by the error responder.
pub const FAILURE_RESPONSE_MESSAGE: &str = "Bad request";

/// A failure signaled by a pipeline stage.
///
/// Serialized as-is into the `err` field of the error responder's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The centralized error responder.
///
/// Always answers 500 with a fixed message and the raw failure embedded:
///
/// ```json
/// {
///   "message": "Bad request",
///   "err": { "message": "Hub not found; invalid id" }
/// }
/// ```
impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        tracing::warn!(failure = %self.message, "request failed");

        let body = Json(json!({
            "message": FAILURE_RESPONSE_MESSAGE,
            "err": self,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Application-wide error type returned by middleware and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Signaled failure, rendered by the error responder.
    #[error(transparent)]
    Failure(#[from] Failure),

    /// A store call rejected.
    ///
    /// Returns HTTP 500 with `context` as the message. The store error itself
    /// is logged, never sent to the client.
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// The addressed record does not exist.
    ///
    /// Returns HTTP 404.
    #[error("{0}")]
    NotFound(&'static str),
}

impl AppError {
    /// Adapter for `map_err` that tags a store error with the message the
    /// client should see.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| AppError::Store { context, source }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Status Code Mapping
///
/// - `Failure` → delegated to the error responder (500)
/// - `Store` → 500 Internal Server Error, `{"message": context}`
/// - `NotFound` → 404 Not Found, `{"message": ...}`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Failure(failure) => return failure.into_response(),
            AppError::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                (StatusCode::INTERNAL_SERVER_ERROR, context)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
