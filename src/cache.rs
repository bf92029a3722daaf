//! In-memory product cache — URL to [`ProductRecord`], time-bounded.
//!
//! Eviction is time-based, not capacity-based: entries expire lazily on
//! read instead of via per-entry scheduled callbacks, so nothing is left
//! dangling across restarts and tests can simulate time directly through
//! [`is_expired`]. Concurrent redundant extractions for the same URL are
//! tolerated — extraction is idempotent and side-effect-free, so the last
//! writer simply wins.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::product::ProductRecord;

/// Pure expiry check, so tests can pick `now` without waiting.
pub fn is_expired(now: Instant, inserted_at: Instant, ttl: Duration) -> bool {
    now.duration_since(inserted_at) >= ttl
}

struct CacheEntry {
    record: ProductRecord,
    inserted_at: Instant,
}

/// TTL cache of extracted product records.
pub struct ProductCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ProductCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Fresh record for the URL, or `None`. An expired entry is removed on
    /// the way out.
    pub fn get(&mut self, url: &str) -> Option<ProductRecord> {
        self.get_at(url, Instant::now())
    }

    /// Store a record for the URL, resetting its TTL.
    pub fn put(&mut self, url: &str, record: ProductRecord) {
        self.put_at(url, record, Instant::now());
    }

    /// Number of entries, expired ones included until their next read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry.
    pub fn sweep(&mut self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| !is_expired(now, entry.inserted_at, ttl));
    }

    fn get_at(&mut self, url: &str, now: Instant) -> Option<ProductRecord> {
        match self.entries.get(url) {
            Some(entry) if is_expired(now, entry.inserted_at, self.ttl) => {}
            Some(entry) => return Some(entry.record.clone()),
            None => return None,
        }
        self.entries.remove(url);
        None
    }

    fn put_at(&mut self, url: &str, record: ProductRecord, now: Instant) {
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                record,
                inserted_at: now,
            },
        );
    }
}
