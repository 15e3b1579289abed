//! Request identification and input validation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) and echo it on the response
//! - Validate player identifiers before any upstream call

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Mints a fresh UUID v4 for every inbound request.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// Accept only non-empty strings of ASCII decimal digits.
pub fn validate_uid(uid: Option<&str>) -> Result<&str, ApiError> {
    match uid {
        None | Some("") => Err(ApiError::MissingUid),
        Some(uid) if uid.bytes().all(|b| b.is_ascii_digit()) => Ok(uid),
        Some(_) => Err(ApiError::InvalidUid),
    }
}
