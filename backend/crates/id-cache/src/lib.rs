pub mod cache_settings;
pub mod cached_store;
pub mod cached_tx_store;
pub mod identity_cache;
pub mod sharded_cache;

pub use cache_settings::CacheSettings;
pub use cached_store::CachedStore;
pub use cached_tx_store::CachedTxStore;
pub use identity_cache::IdentityCache;
pub use sharded_cache::ShardedCache;

#[cfg(test)]
mod tests;
