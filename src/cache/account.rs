//! Bounded LRU memoization of account-info records.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::observability::metrics;
use crate::upstream::AccountRecord;

/// Cache key: the player id and the region label the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub uid: String,
    pub region: String,
}

impl CacheKey {
    pub fn new(uid: &str, region: &str) -> Self {
        Self {
            uid: uid.to_string(),
            region: region.to_string(),
        }
    }
}

struct Slot {
    record: AccountRecord,
    /// Position in `order`; larger is more recent.
    tick: u64,
}

#[derive(Default)]
struct LruState {
    slots: HashMap<CacheKey, Slot>,
    order: BTreeMap<u64, CacheKey>,
    next_tick: u64,
}

impl LruState {
    fn bump(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }

    fn promote(&mut self, key: &CacheKey) -> Option<AccountRecord> {
        let tick = self.bump();
        let slot = self.slots.get_mut(key)?;
        let old = std::mem::replace(&mut slot.tick, tick);
        let record = slot.record.clone();
        if let Some(k) = self.order.remove(&old) {
            self.order.insert(tick, k);
        }
        Some(record)
    }
}

/// Thread-safe account cache shared by all request handlers.
///
/// A single mutex guards the bookkeeping; it is never held across an
/// upstream call.
#[derive(Clone)]
pub struct AccountCache {
    inner: Arc<Mutex<LruState>>,
    capacity: usize,
}

impl AccountCache {
    /// Create an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruState::default())),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a record and mark it most recently used.
    pub fn get(&self, key: &CacheKey) -> Option<AccountRecord> {
        let found = self.lock().promote(key);
        metrics::record_cache_lookup(found.is_some());
        found
    }

    /// Look up a record without touching its recency.
    pub fn peek(&self, key: &CacheKey) -> Option<AccountRecord> {
        self.lock().slots.get(key).map(|slot| slot.record.clone())
    }

    /// Insert or replace a record. Returns the key evicted to make room, if any.
    pub fn insert(&self, key: CacheKey, record: AccountRecord) -> Option<CacheKey> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let tick = state.bump();

        if let Some(slot) = state.slots.get_mut(&key) {
            let old = std::mem::replace(&mut slot.tick, tick);
            slot.record = record;
            state.order.remove(&old);
            state.order.insert(tick, key);
            return None;
        }

        let evicted = if state.slots.len() >= self.capacity {
            state.order.pop_first().map(|(_, oldest)| {
                state.slots.remove(&oldest);
                oldest
            })
        } else {
            None
        };

        if let Some(ref k) = evicted {
            tracing::debug!(uid = %k.uid, region = %k.region, "Evicting LRU entry");
        }

        state.order.insert(tick, key.clone());
        state.slots.insert(key, Slot { record, tick });
        metrics::record_cache_size(state.slots.len());
        evicted
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
