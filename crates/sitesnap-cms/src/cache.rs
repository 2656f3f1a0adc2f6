//! Snapshot cache keyed by logical query.
//!
//! Entries stay fresh for the configured stale time. Concurrent misses on the same key are
//! coalesced: the first caller fetches while the rest wait on a per-key lock and then read the
//! entry it stored. Failed fetches are never cached, and neither are empty answers to
//! lookups keyed by a slug or page number, so requests for arbitrary slugs leave nothing behind.
//! Stale entries are evicted on every insert.

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, OwnedMutexGuard, RwLock},
    time::Instant,
};
use tracing::debug;

use crate::{envelope::Snapshot, error::CmsError, query::QueryKey};

/// A cached snapshot and when it was fetched.
#[derive(Debug, Clone)]
struct Entry {
    /// The cached response.
    snapshot: Arc<Snapshot>,
    /// Fetch time.
    fetched_at: Instant,
}

/// Time-bounded snapshot cache with per-key fetch coalescing.
#[derive(Debug)]
pub struct QueryCache {
    /// How long an entry stays fresh.
    stale_time: Duration,
    /// Stored snapshots.
    entries: RwLock<HashMap<QueryKey, Entry>>,
    /// One lock per key with a fetch in flight.
    inflight: Mutex<HashMap<QueryKey, Arc<Mutex<()>>>>,
}

impl QueryCache {
    /// Creates an empty cache.
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: RwLock::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// How long entries stay fresh.
    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// The fresh entry for `key`, if any.
    pub async fn get(&self, key: &QueryKey) -> Option<Arc<Snapshot>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_time)
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    /// Stores `snapshot` under `key`, replacing any previous entry and evicting stale ones.
    pub async fn insert(&self, key: QueryKey, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        let entry = Entry {
            snapshot: Arc::clone(&snapshot),
            fetched_at: Instant::now(),
        };
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.stale_time);
        entries.insert(key, entry);
        snapshot
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the fresh entry for `key`, or runs `fetch` and caches its result.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: QueryKey,
        fetch: F,
    ) -> Result<Arc<Snapshot>, CmsError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Snapshot, CmsError>>,
    {
        if let Some(hit) = self.get(&key).await {
            debug!(%key, "cache hit");
            return Ok(hit);
        }

        let guard = self.acquire(&key).await;
        let result = self.fetch_locked(key, fetch).await;
        drop(guard);
        self.prune_locks().await;
        result
    }

    /// Fetches `key` while holding its lock.
    async fn fetch_locked<F, Fut>(
        &self,
        key: QueryKey,
        fetch: F,
    ) -> Result<Arc<Snapshot>, CmsError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Snapshot, CmsError>>,
    {
        // Another caller may have filled the entry while we waited.
        if let Some(hit) = self.get(&key).await {
            debug!(%key, "cache hit after wait");
            return Ok(hit);
        }

        debug!(%key, "cache miss");
        let snapshot = fetch().await?;
        if key.is_parameterised() && snapshot.companies.is_empty() {
            return Ok(Arc::new(snapshot));
        }
        Ok(self.insert(key, snapshot).await)
    }

    /// Takes the fetch lock for `key`.
    async fn acquire(&self, key: &QueryKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(
                inflight
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Drops the locks nobody holds or waits on. The map's own reference is the only one left
    /// for those.
    async fn prune_locks(&self) {
        self.inflight
            .lock()
            .await
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
