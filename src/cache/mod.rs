//! Account-info memoization.
//!
//! # Design Decisions
//! - Keyed by (uid, region); capacity-bounded with least-recently-used eviction
//! - Constructed once at startup and handed to the aggregator
//! - Ban status is deliberately never cached
//! - Entries never expire; staleness is accepted

pub mod account;

pub use account::{AccountCache, CacheKey};
