use std::time::Duration;

const DEFAULT_CAPACITY: usize = 10_000;
const DEFAULT_SHARDS: usize = 10;
const DEFAULT_EVICTION_PERCENTAGE: u8 = 10;
const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Sizing and expiry for a [`ShardedCache`](crate::ShardedCache).
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Maximum number of entries across all shards
    pub capacity: usize,
    pub shards: usize,
    /// Entries expire this long after they were written
    pub ttl: Duration,
    /// Share of a full shard evicted to make room, 1-100
    pub eviction_percentage: u8,
}

impl CacheSettings {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            shards: DEFAULT_SHARDS,
            ttl: DEFAULT_TTL,
            eviction_percentage: DEFAULT_EVICTION_PERCENTAGE,
        }
    }
}
