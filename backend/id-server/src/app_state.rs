use id_auth::TokenIssuer;
use id_business::IdentityService;
use id_cache::{CacheSettings, CachedStore};
use id_core::Storer;
use id_db::IdentityRepository;

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub service: Arc<IdentityService>,
    pub issuer: Arc<TokenIssuer>,
    pub handler_timeout: Duration,
}

impl AppState {
    /// Wire the service over the cached SQLite store.
    pub fn new(
        pool: SqlitePool,
        cache: CacheSettings,
        issuer: TokenIssuer,
        handler_timeout: Duration,
    ) -> Self {
        let repository = IdentityRepository::new(pool.clone());
        let store: Arc<dyn Storer> = Arc::new(CachedStore::with_settings(repository, cache));

        Self {
            pool,
            service: Arc::new(IdentityService::new(store)),
            issuer: Arc::new(issuer),
            handler_timeout,
        }
    }
}
