use id_core::{Email, Identity, StoreResult, Storer, TxStorer};

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

/// Pass-through `Storer` that counts the calls reaching it.
pub struct CountingStore {
    inner: Box<dyn Storer>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new<S: Storer + 'static>(inner: S) -> Self {
        Self {
            inner: Box::new(inner),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storer for CountingStore {
    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create(identity).await
    }

    async fn update(&self, identity: &Identity) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(identity).await
    }

    async fn delete(&self, identity: &Identity) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(identity).await
    }

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.query_by_id(id).await
    }

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.query_by_email(email).await
    }

    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>> {
        self.inner.begin().await
    }
}
