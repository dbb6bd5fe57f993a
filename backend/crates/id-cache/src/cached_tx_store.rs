use crate::cached_store::current_email;
use crate::identity_cache::{IdentityCache, InFlight};

use id_core::{Email, Identity, StoreResult, Storer, TxStorer};

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use uuid::Uuid;

enum PendingChange {
    Write {
        identity: Identity,
        previous_email: Option<Email>,
    },
    Evict {
        identity: Identity,
        previous_email: Option<Email>,
    },
}

impl PendingChange {
    fn target(&self) -> (&Identity, Option<&Email>) {
        match self {
            Self::Write {
                identity,
                previous_email,
            }
            | Self::Evict {
                identity,
                previous_email,
            } => (identity, previous_email.as_ref()),
        }
    }
}

/// Transaction-bound view of a [`CachedStore`](crate::CachedStore).
///
/// Reads go straight to the transaction, which sees its own uncommitted
/// writes. Cache changes are queued and applied, in order, only after the
/// transaction commits; a rollback (or dropping the transaction) discards them.
pub struct CachedTxStore {
    tx: Box<dyn TxStorer>,
    cache: Arc<IdentityCache>,
    pending: Mutex<Vec<PendingChange>>,
}

impl CachedTxStore {
    pub fn new(tx: Box<dyn TxStorer>, cache: Arc<IdentityCache>) -> Self {
        Self {
            tx,
            cache,
            pending: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Storer for CachedTxStore {
    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        self.tx.create(identity).await?;
        self.pending.lock().push(PendingChange::Write {
            identity: identity.clone(),
            previous_email: None,
        });
        Ok(())
    }

    async fn update(&self, identity: &Identity) -> StoreResult<()> {
        let previous_email = current_email(&self.cache, &*self.tx, identity.id).await?;
        self.tx.update(identity).await?;
        self.pending.lock().push(PendingChange::Write {
            identity: identity.clone(),
            previous_email,
        });
        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> StoreResult<()> {
        let previous_email = current_email(&self.cache, &*self.tx, identity.id).await?;
        self.tx.delete(identity).await?;
        self.pending.lock().push(PendingChange::Evict {
            identity: identity.clone(),
            previous_email,
        });
        Ok(())
    }

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity> {
        self.tx.query_by_id(id).await
    }

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity> {
        self.tx.query_by_email(email).await
    }

    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>> {
        self.tx.begin().await
    }
}

#[async_trait]
impl TxStorer for CachedTxStore {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let Self { tx, cache, pending } = *self;
        let pending = pending.into_inner();

        let in_flight = pending
            .iter()
            .map(PendingChange::target)
            .fold(InFlight::new(&cache), |in_flight, (identity, previous_email)| {
                in_flight.track(identity, previous_email)
            });
        let result = tx.commit().await;
        in_flight.finish();
        result?;

        debug!("Transaction committed, applying {} cache change(s)", pending.len());
        for change in &pending {
            match change {
                PendingChange::Write {
                    identity,
                    previous_email,
                } => cache.store(identity, previous_email.as_ref()),
                PendingChange::Evict {
                    identity,
                    previous_email,
                } => cache.evict(identity, previous_email.as_ref()),
            }
        }

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        let Self { tx, .. } = *self;
        tx.rollback().await
    }
}
