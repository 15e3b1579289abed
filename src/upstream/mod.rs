//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! Aggregator / raw info handler
//!     → client.rs (GET with deadline, status check, JSON decode)
//!     → types.rs (payload → AccountRecord / BanRecord)
//!     → Result<_, UpstreamError>
//!     → caller degrades to AccountRecord::fallback / BanRecord::unavailable
//! ```
//!
//! # Design Decisions
//! - Failures are values, never panics
//! - Timeouts are per call: 5s account info, 3s ban status by default
//! - Ban status is always fetched live

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{AccountRecord, BanRecord, UpstreamError, UpstreamResult};
