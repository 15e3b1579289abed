//! Aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! check_account(uid, region)
//!     ├─ account_info → AccountCache hit? → else UpstreamClient::fetch_account_info
//!     └─ ban_status   → UpstreamClient::fetch_ban_status (never cached)
//!     → join (both complete; worst case is the longer deadline)
//!     → AggregatedResult::compose
//! ```

pub mod aggregator;
pub mod result;

pub use aggregator::Aggregator;
pub use result::AggregatedResult;
