//! Two-key identity view over a [`ShardedCache`].
//!
//! Each identity lives under its id and its email. Every mutation that
//! follows a store write runs under one lock and bumps a generation counter.
//! A read-through records the generation before it goes to the store, and
//! its fill is dropped if any mutation landed in the meantime: a row read
//! before a concurrent update or delete never replaces what that write left.

use crate::{CacheSettings, ShardedCache};

use id_core::{Email, Identity};

use log::debug;
use parking_lot::Mutex;
use uuid::Uuid;

pub struct IdentityCache {
    entries: ShardedCache<Identity>,
    generation: Mutex<u64>,
}

impl IdentityCache {
    pub fn with_settings(settings: &CacheSettings) -> Self {
        Self {
            entries: ShardedCache::with_settings(settings),
            generation: Mutex::new(0),
        }
    }

    /// Raw key/value view, keyed by id string and by email.
    pub fn entries(&self) -> &ShardedCache<Identity> {
        &self.entries
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<Identity> {
        self.entries.get(&id.to_string())
    }

    pub fn get_by_email(&self, email: &Email) -> Option<Identity> {
        self.entries.get(email.as_str())
    }

    /// Snapshot to pass to [`fill`](Self::fill) after a store read.
    pub fn generation(&self) -> u64 {
        *self.generation.lock()
    }

    /// Cache `identity` after a successful store write.
    ///
    /// `previous_email` is the address the identity was stored under before
    /// the write. Its key, and any other email the cached id entry still
    /// points at, are dropped so an old address stops resolving.
    pub fn store(&self, identity: &Identity, previous_email: Option<&Email>) {
        let mut generation = self.generation.lock();
        *generation += 1;

        for stale in self.stale_emails(identity, previous_email) {
            self.entries.delete(stale.as_str());
        }
        self.entries.set(identity.id.to_string(), identity.clone());
        self.entries.set(identity.email.as_str(), identity.clone());
    }

    /// Drop every key that can resolve to `identity`.
    pub fn evict(&self, identity: &Identity, previous_email: Option<&Email>) {
        let mut generation = self.generation.lock();
        *generation += 1;

        for stale in self.stale_emails(identity, previous_email) {
            self.entries.delete(stale.as_str());
        }
        self.entries.delete(&identity.id.to_string());
        self.entries.delete(identity.email.as_str());
    }

    /// Cache a row read from the store, unless a mutation happened since `observed`.
    ///
    /// Returns whether the row was cached.
    pub fn fill(&self, observed: u64, identity: &Identity) -> bool {
        let generation = self.generation.lock();
        if *generation != observed {
            debug!("Skipping cache fill for {}: changed during read", identity.id);
            return false;
        }

        for stale in self.stale_emails(identity, None) {
            self.entries.delete(stale.as_str());
        }
        self.entries.set(identity.id.to_string(), identity.clone());
        self.entries.set(identity.email.as_str(), identity.clone());
        true
    }

    fn stale_emails(&self, identity: &Identity, previous_email: Option<&Email>) -> Vec<Email> {
        let cached_email = self.get_by_id(identity.id).map(|cached| cached.email);

        previous_email
            .cloned()
            .into_iter()
            .chain(cached_email)
            .filter(|email| *email != identity.email)
            .collect()
    }
}

/// Invalidates an identity's keys if dropped before [`finish`](Self::finish).
///
/// Held across a store write. When the owning future is cancelled the write
/// may or may not have landed, so both keys are evicted together instead of
/// leaving a cached value the store may no longer agree with.
pub(crate) struct InFlight<'a> {
    cache: &'a IdentityCache,
    targets: Vec<(&'a Identity, Option<&'a Email>)>,
}

impl<'a> InFlight<'a> {
    pub(crate) fn new(cache: &'a IdentityCache) -> Self {
        Self {
            cache,
            targets: Vec::new(),
        }
    }

    pub(crate) fn track(
        mut self,
        identity: &'a Identity,
        previous_email: Option<&'a Email>,
    ) -> Self {
        self.targets.push((identity, previous_email));
        self
    }

    /// The store call resolved; the caller applies the outcome itself.
    pub(crate) fn finish(mut self) {
        self.targets.clear();
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        for (identity, previous_email) in self.targets.drain(..) {
            debug!("Store write for {} cancelled, evicting", identity.id);
            self.cache.evict(identity, previous_email);
        }
    }
}
