//! Sharded, TTL-bound, capacity-bounded in-memory cache.
//!
//! Keys hash to one of N shards, each behind its own lock, so concurrent
//! readers and writers on different keys rarely contend. Every entry expires
//! `ttl` after it was written, whether or not the shard is under pressure.
//! When a shard is full, expired entries are dropped first; if that is not
//! enough, the configured percentage of the shard is evicted, soonest-expiring
//! (that is, oldest-written) entries first.

use crate::CacheSettings;

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::{Duration, Instant};

use parking_lot::RwLock;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

struct Shard<V> {
    entries: HashMap<String, Entry<V>>,
}

impl<V> Shard<V> {
    fn remove_expired(&mut self, now: Instant) {
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    fn evict_oldest(&mut self, count: usize) {
        let mut by_expiry: Vec<(Instant, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.expires_at, key.clone()))
            .collect();
        by_expiry.sort_unstable_by_key(|(expires_at, _)| *expires_at);

        for (_, key) in by_expiry.into_iter().take(count) {
            self.entries.remove(&key);
        }
    }
}

pub struct ShardedCache<V> {
    shards: Vec<RwLock<Shard<V>>>,
    shard_capacity: usize,
    ttl: Duration,
    eviction_percentage: u8,
}

impl<V: Clone> ShardedCache<V> {
    pub fn new(capacity: usize, shards: usize, ttl: Duration, eviction_percentage: u8) -> Self {
        let shard_count = shards.max(1);
        let shard_capacity = capacity.div_ceil(shard_count).max(1);

        Self {
            shards: (0..shard_count)
                .map(|_| {
                    RwLock::new(Shard {
                        entries: HashMap::with_capacity(shard_capacity),
                    })
                })
                .collect(),
            shard_capacity,
            ttl,
            eviction_percentage: eviction_percentage.clamp(1, 100),
        }
    }

    pub fn with_settings(settings: &CacheSettings) -> Self {
        Self::new(
            settings.capacity,
            settings.shards,
            settings.ttl,
            settings.eviction_percentage,
        )
    }

    /// Live value for `key`. Expired entries are never returned.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let shard = self.shard_for(key);

        {
            let guard = shard.read();
            match guard.entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless a writer refreshed it in the meantime
        let mut guard = shard.write();
        if guard
            .entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= now)
        {
            guard.entries.remove(key);
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = Instant::now();
        let mut guard = self.shard_for(&key).write();

        if !guard.entries.contains_key(&key) && guard.entries.len() >= self.shard_capacity {
            guard.remove_expired(now);
            if guard.entries.len() >= self.shard_capacity {
                guard.evict_oldest(self.eviction_count());
            }
        }

        guard.entries.insert(
            key,
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Remove `key`. Returns whether a (possibly expired) entry was present.
    pub fn delete(&self, key: &str) -> bool {
        self.shard_for(key).write().entries.remove(key).is_some()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .read()
                    .entries
                    .values()
                    .filter(|entry| entry.expires_at > now)
                    .count()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            shard.write().entries.clear();
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn eviction_count(&self) -> usize {
        (self.shard_capacity * usize::from(self.eviction_percentage) / 100).max(1)
    }

    fn shard_for(&self, key: &str) -> &RwLock<Shard<V>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[index]
    }
}
