//! Concurrent fan-out to both upstreams and the merge of their answers.

use crate::aggregate::result::AggregatedResult;
use crate::cache::{AccountCache, CacheKey};
use crate::config::ServiceInfo;
use crate::upstream::{AccountRecord, BanRecord, UpstreamClient};

/// Runs the account-info and ban-status lookups for one player and merges them.
#[derive(Clone)]
pub struct Aggregator {
    client: UpstreamClient,
    cache: AccountCache,
    info: ServiceInfo,
}

impl Aggregator {
    pub fn new(client: UpstreamClient, cache: AccountCache, info: ServiceInfo) -> Self {
        Self { client, cache, info }
    }

    pub fn cache(&self) -> &AccountCache {
        &self.cache
    }

    /// Look up both records concurrently and merge them. Never fails: upstream
    /// problems surface as placeholder field values.
    #[tracing::instrument(skip(self), fields(cache_size = self.cache.len()))]
    pub async fn check_account(&self, uid: &str, region: &str) -> AggregatedResult {
        let (account, ban) = tokio::join!(self.account_info(uid, region), self.ban_status(uid));
        AggregatedResult::compose(uid, account, ban, &self.info)
    }

    /// Account info through the cache. Placeholder records from failed lookups
    /// are memoized too, so a cached key always answers the same way.
    pub async fn account_info(&self, uid: &str, region: &str) -> AccountRecord {
        let key = CacheKey::new(uid, region);
        if let Some(record) = self.cache.get(&key) {
            tracing::debug!(uid = %uid, region = %region, "Account cache hit");
            return record;
        }

        let record = match self.client.fetch_account_info(uid, region).await {
            Ok(record) => record,
            Err(e) => AccountRecord::fallback(&e, region),
        };
        self.cache.insert(key, record.clone());
        record
    }

    async fn ban_status(&self, uid: &str) -> BanRecord {
        self.client
            .fetch_ban_status(uid)
            .await
            .unwrap_or_else(|_| BanRecord::unavailable())
    }
}
