//! The merged payload returned by `/check`.

use serde::Serialize;

use crate::config::ServiceInfo;
use crate::upstream::{AccountRecord, BanRecord};

/// One account-info record and one ban record, flattened into labelled fields.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedResult {
    #[serde(rename = "✅ Status")]
    pub status: String,
    #[serde(rename = "🆔 UID")]
    pub uid: String,
    #[serde(rename = "🏷️ Nickname")]
    pub nickname: String,
    #[serde(rename = "🌍 Region")]
    pub region: String,
    #[serde(rename = "⭐ Level")]
    pub level: String,
    #[serde(rename = "⚡ Experience")]
    pub experience: String,
    #[serde(rename = "📊 Rank")]
    pub rank: String,
    #[serde(rename = "👥 Guild")]
    pub guild: String,
    #[serde(rename = "🕒 Last Login")]
    pub last_login: String,
    #[serde(rename = "🆕 Created At")]
    pub created_at: String,
    #[serde(rename = "🔒 Account")]
    pub ban_status: String,
    #[serde(rename = "⏳ Duration")]
    pub ban_duration: String,
    #[serde(rename = "📊 Banned?")]
    pub banned: bool,
    #[serde(rename = "💎 Powered by")]
    pub powered_by: String,
    #[serde(rename = "📡 Channel")]
    pub channel: String,
    #[serde(rename = "✏️ BIO", skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl AggregatedResult {
    /// Merge the two upstream records. The status line reflects the ban lookup only.
    pub fn compose(uid: &str, account: AccountRecord, ban: BanRecord, info: &ServiceInfo) -> Self {
        let status = if ban.success {
            "Account checked successfully"
        } else {
            "Partial data fetched"
        };

        let (ban_status, ban_duration) = if ban.is_banned {
            ("🚫 BANNED".to_string(), format!("{} month(s)", ban.period))
        } else {
            ("✅ NOT BANNED".to_string(), "No ban".to_string())
        };

        let bio = if account.signature.is_empty() {
            None
        } else {
            Some(account.signature)
        };

        Self {
            status: status.to_string(),
            uid: uid.to_string(),
            nickname: account.nickname,
            region: account.region,
            level: account.level,
            experience: account.experience,
            rank: account.rank,
            guild: account.guild,
            last_login: account.last_login,
            created_at: account.created_at,
            ban_status,
            ban_duration,
            banned: ban.is_banned,
            powered_by: info.powered_by.clone(),
            channel: info.channel.clone(),
            bio,
        }
    }

    /// Whether the ban service answered for this result.
    pub fn ban_checked(&self) -> bool {
        self.status == "Account checked successfully"
    }
}
