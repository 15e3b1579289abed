//! Response rendering and error envelopes.
//!
//! # Responsibilities
//! - Render every JSON body pretty-printed (two-space indent, UTF-8 verbatim)
//! - Map caller and upstream errors to status codes and envelopes
//! - Convert panics into the generic internal-error envelope
//!
//! # Design Decisions
//! - Internal failures never leak details to the caller

use std::any::Any;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

const ERROR_KEY: &str = "⚠️ error";
const EXCEPTION_KEY: &str = "💥 exception";

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Player ID (uid) is required!")]
    MissingUid,

    #[error("Invalid UID format. Must be numeric!")]
    InvalidUid,

    /// Upstream answered with a non-200 status, relayed to the caller.
    #[error("Failed to fetch account info")]
    UpstreamStatus(StatusCode),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUid | ApiError::InvalidUid => StatusCode::BAD_REQUEST,
            ApiError::UpstreamStatus(code) => *code,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let key = match self {
            ApiError::Internal => EXCEPTION_KEY,
            _ => ERROR_KEY,
        };
        let body = json!({
            key: self.to_string(),
            "status_code": status.as_u16(),
        });
        pretty_json(status, &body)
    }
}

/// Serialize `body` with two-space indentation under `status`.
pub fn pretty_json<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string_pretty(body) {
        Ok(text) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            internal_error()
        }
    }
}

/// The generic 500 envelope, built without any fallible step.
pub fn internal_error() -> Response {
    let body = format!(
        "{{\n  \"{}\": \"Internal server error\",\n  \"status_code\": 500\n}}",
        EXCEPTION_KEY
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(detail = %detail, "Request handler panicked");
    internal_error()
}
