//! Cache-aside decorator over any [`Storer`].
//!
//! The wrapped store is authoritative. Writes go to it first and only reach
//! the cache once they have succeeded; a failed write leaves the cache
//! untouched. Each identity is cached under two keys, its id and its email,
//! which are refreshed and evicted together.
//!
//! Updates and deletes look up the email the identity is currently stored
//! under before writing, so an email change drops the old address even when
//! the id key has already expired. A future cancelled mid-write evicts both
//! keys on drop.

use crate::identity_cache::{IdentityCache, InFlight};
use crate::{CacheSettings, CachedTxStore, ShardedCache};

use id_core::{Email, Identity, StoreResult, Storer, TxStorer};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

pub struct CachedStore<S> {
    storer: S,
    cache: Arc<IdentityCache>,
}

impl<S: Storer> CachedStore<S> {
    /// Wrap `storer` with the default sizing (10 000 entries, 10 shards, 10 % eviction).
    pub fn new(storer: S, ttl: Duration) -> Self {
        Self::with_settings(storer, CacheSettings::with_ttl(ttl))
    }

    pub fn with_settings(storer: S, settings: CacheSettings) -> Self {
        Self {
            storer,
            cache: Arc::new(IdentityCache::with_settings(&settings)),
        }
    }

    pub fn cache(&self) -> &ShardedCache<Identity> {
        self.cache.entries()
    }

    pub fn inner(&self) -> &S {
        &self.storer
    }
}

#[async_trait]
impl<S: Storer> Storer for CachedStore<S> {
    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        let in_flight = InFlight::new(&self.cache).track(identity, None);
        let result = self.storer.create(identity).await;
        in_flight.finish();

        result?;
        self.cache.store(identity, None);
        Ok(())
    }

    async fn update(&self, identity: &Identity) -> StoreResult<()> {
        let previous_email = current_email(&self.cache, &self.storer, identity.id).await?;

        let in_flight = InFlight::new(&self.cache).track(identity, previous_email.as_ref());
        let result = self.storer.update(identity).await;
        in_flight.finish();

        result?;
        self.cache.store(identity, previous_email.as_ref());
        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> StoreResult<()> {
        let previous_email = current_email(&self.cache, &self.storer, identity.id).await?;

        let in_flight = InFlight::new(&self.cache).track(identity, previous_email.as_ref());
        let result = self.storer.delete(identity).await;
        in_flight.finish();

        result?;
        self.cache.evict(identity, previous_email.as_ref());
        Ok(())
    }

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity> {
        if let Some(cached) = self.cache.get_by_id(id) {
            debug!("Identity cache hit by id: {}", id);
            return Ok(cached);
        }

        debug!("Identity cache miss by id: {}", id);
        let observed = self.cache.generation();
        let identity = self.storer.query_by_id(id).await?;
        self.cache.fill(observed, &identity);

        Ok(identity)
    }

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity> {
        if let Some(cached) = self.cache.get_by_email(email) {
            debug!("Identity cache hit by email for {}", cached.id);
            return Ok(cached);
        }

        debug!("Identity cache miss by email");
        let observed = self.cache.generation();
        let identity = self.storer.query_by_email(email).await?;
        self.cache.fill(observed, &identity);

        Ok(identity)
    }

    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>> {
        let tx = self.storer.begin().await?;
        Ok(Box::new(CachedTxStore::new(tx, Arc::clone(&self.cache))))
    }
}

/// Email `id` is stored under right now, from the cache or else the store.
///
/// `None` when the store has no such row.
pub(crate) async fn current_email(
    cache: &IdentityCache,
    storer: &(impl Storer + ?Sized),
    id: Uuid,
) -> StoreResult<Option<Email>> {
    if let Some(cached) = cache.get_by_id(id) {
        return Ok(Some(cached.email));
    }

    match storer.query_by_id(id).await {
        Ok(current) => Ok(Some(current.email)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
