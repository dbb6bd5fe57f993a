use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_EVICTION_PERCENTAGE,
    DEFAULT_CACHE_SHARDS, DEFAULT_CACHE_TTL_SECS,
};

use serde::Deserialize;

/// Sizing of the identity cache in front of the database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
    pub shards: usize,
    pub ttl_secs: u64,
    /// Share of a full shard evicted at once, 1-100
    pub eviction_percentage: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            shards: DEFAULT_CACHE_SHARDS,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            eviction_percentage: DEFAULT_CACHE_EVICTION_PERCENTAGE,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.capacity == 0 {
            return Err(ConfigError::cache("cache.capacity must be at least 1"));
        }

        if self.shards == 0 || self.shards > self.capacity {
            return Err(ConfigError::cache(format!(
                "cache.shards must be 1-{} (capacity), got {}",
                self.capacity, self.shards
            )));
        }

        if self.ttl_secs == 0 {
            return Err(ConfigError::cache("cache.ttl_secs must be at least 1"));
        }

        if self.eviction_percentage == 0 || self.eviction_percentage > 100 {
            return Err(ConfigError::cache(format!(
                "cache.eviction_percentage must be 1-100, got {}",
                self.eviction_percentage
            )));
        }

        Ok(())
    }
}
