//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the ban check service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Third-party account-info and ban-status endpoints.
    pub upstream: UpstreamConfig,

    /// Account-info memoization settings.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Service metadata reported by `/health` and stamped on check results.
    pub service: ServiceInfo,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Replace the port of the bind address, keeping the host part.
    pub fn override_port(&mut self, port: u16) {
        let host = match self.listener.bind_address.rsplit_once(':') {
            Some((host, _)) => host.to_string(),
            None => self.listener.bind_address.clone(),
        };
        self.listener.bind_address = format!("{}:{}", host, port);
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Account-info lookup endpoint; the uid is sent as the `uid` query parameter.
    pub info_url: String,

    /// Ban-status endpoint; `lang` and `uid` are sent as query parameters.
    pub ban_url: String,

    /// Deadline for a single account-info call in milliseconds.
    pub info_timeout_ms: u64,

    /// Deadline for a single ban-status call in milliseconds.
    pub ban_timeout_ms: u64,

    /// Skip TLS certificate validation for both upstreams.
    pub accept_invalid_certs: bool,

    /// Value of the `lang` query parameter sent to the ban endpoint.
    pub ban_lang: String,

    /// Browser headers the ban endpoint insists on.
    pub user_agent: String,
    pub accept: String,
    pub referer: String,
    pub requested_with: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            info_url: "https://info-api-ecru-ten.vercel.app/get".to_string(),
            ban_url: "https://ff.garena.com/api/antihack/check_banned".to_string(),
            info_timeout_ms: 5_000,
            ban_timeout_ms: 3_000,
            accept_invalid_certs: true,
            ban_lang: "en".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            accept: "application/json".to_string(),
            referer: "https://ff.garena.com/en/support/".to_string(),
            requested_with: "B6FksShzIgjfrYImLpTsadjS86sddhFH".to_string(),
        }
    }
}

/// Account-info cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of (uid, region) entries kept before LRU eviction.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Service identity and branding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub features: Vec<String>,

    /// Region label used when the caller omits `server` and upstream omits the region.
    pub default_region: String,

    pub powered_by: String,
    pub channel: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "Free Fire Ban Check API".to_string(),
            version: "2.0".to_string(),
            features: vec![
                "Ban Check".to_string(),
                "Account Info".to_string(),
                "Guild Info".to_string(),
                "Rank Info".to_string(),
            ],
            default_region: "BD".to_string(),
            powered_by: "@dev_eco".to_string(),
            channel: "https://discord.gg/Mba5bNbdCP".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
        assert_eq!(config.upstream.info_timeout_ms, 5_000);
        assert_eq!(config.upstream.ban_timeout_ms, 3_000);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.service.default_region, "BD");
    }

    #[test]
    fn test_partial_sections() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [cache]
            capacity = 8

            [upstream]
            ban_timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.cache.capacity, 8);
        assert_eq!(config.upstream.ban_timeout_ms, 250);
        assert_eq!(config.upstream.info_timeout_ms, 5_000);
    }

    #[test]
    fn test_override_port() {
        let mut config = ServiceConfig::default();
        config.override_port(8088);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8088");

        config.listener.bind_address = "[::1]:80".to_string();
        config.override_port(81);
        assert_eq!(config.listener.bind_address, "[::1]:81");
    }
}
