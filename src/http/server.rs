//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, panic catching)
//! - Construct the shared cache and upstream client once, inject them as state
//! - Serve until the shutdown signal fires

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::aggregate::Aggregator;
use crate::cache::AccountCache;
use crate::config::{ServiceConfig, ServiceInfo};
use crate::http::handlers;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::handle_panic;
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub upstream: UpstreamClient,
    pub service: Arc<ServiceInfo>,
}

impl AppState {
    /// Build the process-wide state from configuration.
    pub fn from_config(config: &ServiceConfig) -> UpstreamResult<Self> {
        let upstream = UpstreamClient::new(config.upstream.clone())?;
        let cache = AccountCache::new(config.cache.capacity);
        let aggregator = Aggregator::new(upstream.clone(), cache, config.service.clone());

        Ok(Self {
            aggregator: Arc::new(aggregator),
            upstream,
            service: Arc::new(config.service.clone()),
        })
    }
}

/// HTTP server for the ban check service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> UpstreamResult<Self> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::dashboard))
            .route("/check", get(handlers::check))
            .route("/info/{uid}", get(handlers::raw_info))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cache_capacity = self.config.cache.capacity,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn offline_server() -> HttpServer {
        // Upstreams point at a closed port; only routes that never reach them are exercised.
        let mut config = ServiceConfig::default();
        config.upstream.info_url = "http://127.0.0.1:9/get".to_string();
        config.upstream.ban_url = "http://127.0.0.1:9/ban".to_string();
        HttpServer::new(config).unwrap()
    }

    async fn send(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn test_check_rejects_bad_uids() {
        let server = offline_server();
        for uri in ["/check", "/check?uid=", "/check?uid=12a", "/check?uid=-5&server=BD"] {
            let (status, _, body) = send(server.router(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["status_code"], 400);
        }
    }

    #[tokio::test]
    async fn test_check_repeated_keys_use_first_value() {
        let server = offline_server();

        let (status, headers, body) = send(server.router(), "/check?uid=1&server=BD&server=IND").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers["content-type"].to_str().unwrap().starts_with("application/json"));
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["🆔 UID"], "1");
        assert_eq!(json["🌍 Region"], "BD");

        let (status, _, body) = send(server.router(), "/check?uid=abc&uid=def").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["⚠️ error"], "Invalid UID format. Must be numeric!");
        assert_eq!(json["status_code"], 400);
    }

    #[tokio::test]
    async fn test_check_region_label() {
        let server = offline_server();

        let (_, _, body) = send(server.router(), "/check?uid=7").await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["🌍 Region"], server.config().service.default_region.as_str());

        // Present but empty is used as given.
        let (status, _, body) = send(server.router(), "/check?uid=7&server=").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["🌍 Region"], "");
    }

    #[tokio::test]
    async fn test_health_without_upstreams() {
        let server = offline_server();
        let (status, headers, body) = send(server.router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key("x-request-id"));

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "✅ OK");
        assert_eq!(json["version"], server.config().service.version.as_str());
        assert_eq!(json["features"].as_array().unwrap().len(), 4);
        assert!(json["uptime"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_dashboard_served() {
        let (status, headers, body) = send(offline_server().router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers["content-type"].to_str().unwrap().starts_with("text/html"));
        assert!(String::from_utf8(body).unwrap().contains("/check?uid="));
    }

    async fn explode() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_panics_become_internal_errors() {
        let router = Router::new()
            .route("/boom", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));

        let (status, _, body) = send(router, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["💥 exception"], "Internal server error");
        assert!(!String::from_utf8_lossy(&body).contains("kaboom"));
    }
}
