//! The storage capability the business layer depends on.
//!
//! Implemented by the durable SQLite adapter and by the cache-aside
//! decorator that wraps any other `Storer`.

use crate::{Email, Identity, StoreResult};

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait Storer: Send + Sync {
    /// Persist a new identity. Fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, identity: &Identity) -> StoreResult<()>;

    /// Replace an existing identity. Fails with `NotFound` when no row matches the id.
    async fn update(&self, identity: &Identity) -> StoreResult<()>;

    /// Remove an identity. Removing an identity that is already gone succeeds.
    async fn delete(&self, identity: &Identity) -> StoreResult<()>;

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity>;

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity>;

    /// Start a transaction. The returned store sees its own uncommitted writes.
    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>>;
}

/// A `Storer` bound to an open transaction.
#[async_trait]
pub trait TxStorer: Storer {
    async fn commit(self: Box<Self>) -> StoreResult<()>;

    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}

#[async_trait]
impl<S: Storer + ?Sized> Storer for Arc<S> {
    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        (**self).create(identity).await
    }

    async fn update(&self, identity: &Identity) -> StoreResult<()> {
        (**self).update(identity).await
    }

    async fn delete(&self, identity: &Identity) -> StoreResult<()> {
        (**self).delete(identity).await
    }

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity> {
        (**self).query_by_id(id).await
    }

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity> {
        (**self).query_by_email(email).await
    }

    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>> {
        (**self).begin().await
    }
}
