//! HTTP client for the account-info and ban-status services.
//!
//! # Responsibilities
//! - Issue GET requests with per-service deadlines
//! - Send the browser headers the ban service requires
//! - Classify every failure into an `UpstreamError`
//! - Log one diagnostic line per failed call

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::types::{
    AccountPayload, AccountRecord, BanPayload, BanRecord, UpstreamError, UpstreamResult,
};

const INFO_SERVICE: &str = "account_info";
const BAN_SERVICE: &str = "ban_status";

/// Client for both upstream services. Cheap to clone.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
    ban_headers: HeaderMap,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let mut ban_headers = HeaderMap::new();
        ban_headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        ban_headers.insert(ACCEPT, header_value(&config.accept)?);
        ban_headers.insert(REFERER, header_value(&config.referer)?);
        ban_headers.insert("x-requested-with", header_value(&config.requested_with)?);

        Ok(Self {
            http,
            config,
            ban_headers,
        })
    }

    /// Fetch and normalize account info. `region` labels the record when
    /// upstream omits one.
    pub async fn fetch_account_info(&self, uid: &str, region: &str) -> UpstreamResult<AccountRecord> {
        let result = self.try_account_info(uid, region).await;
        observe(INFO_SERVICE, uid, &result);
        result
    }

    /// Fetch the raw account-info document without reshaping it.
    pub async fn fetch_raw_info(&self, uid: &str) -> UpstreamResult<Value> {
        let result = self.get_info_body(uid).await;
        observe(INFO_SERVICE, uid, &result);
        result
    }

    /// Ask the ban service whether `uid` is banned.
    pub async fn fetch_ban_status(&self, uid: &str) -> UpstreamResult<BanRecord> {
        let result = self.try_ban_status(uid).await;
        observe(BAN_SERVICE, uid, &result);
        result
    }

    async fn try_account_info(&self, uid: &str, region: &str) -> UpstreamResult<AccountRecord> {
        let body = self.get_info_body(uid).await?;
        let payload: AccountPayload =
            serde_json::from_value(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(AccountRecord::from_payload(payload, region))
    }

    async fn try_ban_status(&self, uid: &str) -> UpstreamResult<BanRecord> {
        let response = self
            .http
            .get(&self.config.ban_url)
            .query(&[("lang", self.config.ban_lang.as_str()), ("uid", uid)])
            .headers(self.ban_headers.clone())
            .timeout(Duration::from_millis(self.config.ban_timeout_ms))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let payload: BanPayload = response.json().await?;
        Ok(BanRecord::from(payload))
    }

    async fn get_info_body(&self, uid: &str) -> UpstreamResult<Value> {
        let response = self
            .http
            .get(&self.config.info_url)
            .query(&[("uid", uid)])
            .timeout(Duration::from_millis(self.config.info_timeout_ms))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

fn header_value(value: &str) -> UpstreamResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| UpstreamError::Transport(e.to_string()))
}

fn observe<T>(service: &'static str, uid: &str, result: &UpstreamResult<T>) {
    match result {
        Ok(_) => metrics::record_upstream_call(service, "ok"),
        Err(e) => {
            tracing::warn!(uid = %uid, service, class = e.class(), error = %e, "Upstream call failed");
            metrics::record_upstream_call(service, e.class());
        }
    }
}
