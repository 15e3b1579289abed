//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::http::dashboard::DASHBOARD_HTML;
use crate::http::request::validate_uid;
use crate::http::response::{pretty_json, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// `/check` query parameters. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckParams {
    pub uid: Option<String>,
    pub server: Option<String>,
}

impl CheckParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "uid" => &mut params.uid,
                "server" => &mut params.server,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus<'a> {
    pub status: &'static str,
    pub service: &'a str,
    pub version: &'a str,
    pub uptime: String,
    pub features: &'a [String],
}

/// `GET /check?uid=<digits>&server=<region>`
///
/// `server` is taken as given when present, even if empty; only an absent
/// parameter falls back to the default region.
pub async fn check(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let params = CheckParams::from_query(query.as_deref().unwrap_or_default());
    let response = match validate_uid(params.uid.as_deref()) {
        Ok(uid) => {
            let region = params
                .server
                .as_deref()
                .unwrap_or(state.service.default_region.as_str());

            let result = state.aggregator.check_account(uid, region).await;
            tracing::debug!(uid = %uid, region = %region, ban_checked = result.ban_checked(), "Account checked");
            pretty_json(StatusCode::OK, &result)
        }
        Err(e) => {
            tracing::debug!(uid = ?params.uid, error = %e, "Rejected check request");
            e.into_response()
        }
    };

    metrics::record_request("check", response.status().as_u16(), start);
    response
}

/// `GET /info/{uid}`: the upstream account-info document, verbatim.
pub async fn raw_info(State(state): State<AppState>, Path(uid): Path<String>) -> Response {
    let start = Instant::now();
    let response = match state.upstream.fetch_raw_info(&uid).await {
        Ok(document) => pretty_json(StatusCode::OK, &document),
        Err(UpstreamError::Status(code)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            ApiError::UpstreamStatus(status).into_response()
        }
        Err(e) => {
            tracing::error!(uid = %uid, error = %e, "Full info lookup failed");
            ApiError::Internal.into_response()
        }
    };

    metrics::record_request("info", response.status().as_u16(), start);
    response
}

/// `GET /health`: static liveness document, no upstream calls.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthStatus {
        status: "✅ OK",
        service: &state.service.name,
        version: &state.service.version,
        uptime: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        features: &state.service.features,
    };
    pretty_json(StatusCode::OK, &body)
}

/// `GET /`
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
