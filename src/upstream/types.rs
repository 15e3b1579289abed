//! Records produced by the upstream client and the error type for upstream calls.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Marker used wherever a timestamp could not be determined.
pub const UNKNOWN_MARKER: &str = "❌ Unknown";

/// Longest signature returned before truncation kicks in, in characters.
pub const SIGNATURE_LIMIT: usize = 50;

/// Why an upstream call did not produce a usable record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Upstream answered with a status other than 200.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The call exceeded its deadline.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection, TLS, or protocol failure.
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// The body was not the JSON shape we expect.
    #[error("upstream body could not be decoded: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Short label used in logs and metrics.
    pub fn class(&self) -> &'static str {
        match self {
            UpstreamError::Status(_) => "status",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode(e.to_string())
        } else {
            UpstreamError::Transport(e.to_string())
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Account details for one player, normalized from the account-info service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub nickname: String,
    pub region: String,
    pub level: String,
    pub experience: String,
    pub rank: String,
    pub guild: String,
    pub last_login: String,
    pub created_at: String,
    /// Empty when the player has no signature.
    pub signature: String,
}

impl AccountRecord {
    /// Placeholder record substituted when the account-info call fails.
    pub fn fallback(error: &UpstreamError, region: &str) -> Self {
        let nickname = match error {
            UpstreamError::Status(_) => "❌ Fetch failed",
            UpstreamError::Timeout => "❌ Timeout",
            UpstreamError::Transport(_) | UpstreamError::Decode(_) => "❌ Error",
        };

        Self {
            nickname: nickname.to_string(),
            region: region.to_string(),
            level: "0".to_string(),
            experience: "0".to_string(),
            rank: "Unknown".to_string(),
            guild: "None".to_string(),
            last_login: UNKNOWN_MARKER.to_string(),
            created_at: UNKNOWN_MARKER.to_string(),
            signature: String::new(),
        }
    }

    /// Build a record from the account-info payload. `region` is used when the
    /// payload does not carry one.
    pub fn from_payload(payload: AccountPayload, region: &str) -> Self {
        let info = payload.account_info;
        let rank_points = payload
            .profile
            .br_rank_point
            .as_ref()
            .map(value_text)
            .unwrap_or_else(|| "0".to_string());

        Self {
            nickname: info
                .name
                .as_ref()
                .map(value_text)
                .unwrap_or_else(|| "❌ Not available".to_string()),
            region: info
                .region
                .as_ref()
                .map(value_text)
                .unwrap_or_else(|| region.to_string()),
            level: info.level.as_ref().map(value_text).unwrap_or_else(|| "0".to_string()),
            experience: info.exp.as_ref().map(value_text).unwrap_or_else(|| "0".to_string()),
            rank: format!("BR: {}", rank_points),
            guild: payload
                .guild
                .name
                .as_ref()
                .map(value_text)
                .unwrap_or_else(|| "No Guild".to_string()),
            last_login: parse_date_string(&info.last_login.as_ref().map(value_text).unwrap_or_default()),
            created_at: parse_date_string(&info.create_time.as_ref().map(value_text).unwrap_or_default()),
            signature: truncate_signature(&payload.social.signature.as_ref().map(value_text).unwrap_or_default()),
        }
    }
}

/// Ban status for one player. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRecord {
    pub is_banned: bool,
    /// Ban length in months, rendered as upstream sent it.
    pub period: String,
    /// Whether the ban service actually answered.
    pub success: bool,
}

impl BanRecord {
    /// Record used when the ban service could not be consulted.
    pub fn unavailable() -> Self {
        Self {
            is_banned: false,
            period: "0".to_string(),
            success: false,
        }
    }
}

/// Account-info response body. Every section is optional upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountPayload {
    #[serde(rename = "AccountInfo")]
    pub account_info: AccountInfoSection,
    #[serde(rename = "AccountProfileInfo")]
    pub profile: ProfileSection,
    #[serde(rename = "GuildInfo")]
    pub guild: GuildSection,
    #[serde(rename = "SocialInfo")]
    pub social: SocialSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountInfoSection {
    #[serde(rename = "AccountName")]
    pub name: Option<Value>,
    #[serde(rename = "AccountRegion")]
    pub region: Option<Value>,
    #[serde(rename = "AccountLevel")]
    pub level: Option<Value>,
    #[serde(rename = "AccountEXP")]
    pub exp: Option<Value>,
    #[serde(rename = "AccountLastLogin")]
    pub last_login: Option<Value>,
    #[serde(rename = "AccountCreateTime")]
    pub create_time: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    #[serde(rename = "BrRankPoint")]
    pub br_rank_point: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GuildSection {
    #[serde(rename = "GuildName")]
    pub name: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SocialSection {
    pub signature: Option<Value>,
}

/// Ban-status response body: `{"data": {"is_banned": .., "period": ..}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BanPayload {
    pub data: BanData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BanData {
    pub is_banned: Option<Value>,
    pub period: Option<Value>,
}

impl From<BanPayload> for BanRecord {
    fn from(payload: BanPayload) -> Self {
        let data = payload.data;
        Self {
            is_banned: data.is_banned.as_ref().map(is_truthy).unwrap_or(false),
            period: data.period.as_ref().map(value_text).unwrap_or_else(|| "0".to_string()),
            success: true,
        }
    }
}

/// Keep the date and time tokens of `"2025-02-10 20:27:51 BDT"`, dropping the zone.
pub fn parse_date_string(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_MARKER.to_string();
    }

    let tokens: Vec<&str> = raw.split(' ').take(2).collect();
    if tokens.len() == 2 {
        tokens.join(" ")
    } else {
        raw.to_string()
    }
}

/// Cut signatures longer than [`SIGNATURE_LIMIT`] characters and mark the cut.
pub fn truncate_signature(signature: &str) -> String {
    if signature.chars().count() > SIGNATURE_LIMIT {
        let head: String = signature.chars().take(SIGNATURE_LIMIT).collect();
        format!("{}...", head)
    } else {
        signature.to_string()
    }
}

/// Render a scalar the way upstream meant it: strings bare, everything else as JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
