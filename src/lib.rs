//! Ban check aggregation service.
//!
//! Accepts a player id, queries an account-info service and a ban-status
//! service concurrently, and merges both answers into one JSON document.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use aggregate::{AggregatedResult, Aggregator};
pub use cache::AccountCache;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
