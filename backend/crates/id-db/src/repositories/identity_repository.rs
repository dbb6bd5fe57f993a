//! Durable identity storage on SQLite.
//!
//! Both the pool-backed repository and the transaction-bound repository run
//! the same statements; only the connection they run on differs.

use crate::repositories::identity_row::IdentityRow;
use crate::{DbError, Result as DbErrorResult};

use id_core::{Email, ErrorLocation, Identity, StoreError, StoreResult, Storer, TxStorer};

use std::panic::Location;

use async_trait::async_trait;
use log::debug;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, email, roles, password_hash, department, enabled,
        created_at, updated_at
    FROM identities
"#;

pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn acquire(
        &self,
        operation: &'static str,
        key: &str,
    ) -> StoreResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| DbError::from(e).into_store_error(operation, key))
    }
}

#[async_trait]
impl Storer for IdentityRepository {
    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        let key = identity.email.as_str();
        let mut conn = self.acquire("create", key).await?;
        insert(&mut conn, identity)
            .await
            .map_err(|e| e.into_store_error("create", key))
    }

    async fn update(&self, identity: &Identity) -> StoreResult<()> {
        let key = identity.email.as_str();
        let mut conn = self.acquire("update", key).await?;
        update(&mut conn, identity)
            .await
            .map_err(|e| e.into_store_error("update", key))
    }

    async fn delete(&self, identity: &Identity) -> StoreResult<()> {
        let key = identity.id.to_string();
        let mut conn = self.acquire("delete", &key).await?;
        delete(&mut conn, identity.id)
            .await
            .map_err(|e| e.into_store_error("delete", &key))
    }

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity> {
        let key = id.to_string();
        let mut conn = self.acquire("query_by_id", &key).await?;
        find_by_id(&mut conn, &key)
            .await
            .map_err(|e| e.into_store_error("query_by_id", &key))
    }

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity> {
        let key = email.as_str();
        let mut conn = self.acquire("query_by_email", key).await?;
        find_by_email(&mut conn, key)
            .await
            .map_err(|e| e.into_store_error("query_by_email", key))
    }

    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>> {
        let tx = self.pool.begin().await.map_err(|e| StoreError::Transaction {
            message: format!("Failed to begin transaction: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Box::new(IdentityTxRepository {
            tx: Mutex::new(tx),
        }))
    }
}

/// Identity storage bound to an open transaction.
///
/// Statements run on the transaction's connection; nothing is visible to
/// other connections until `commit`.
pub struct IdentityTxRepository {
    tx: Mutex<Transaction<'static, Sqlite>>,
}

#[async_trait]
impl Storer for IdentityTxRepository {
    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        let mut tx = self.tx.lock().await;
        insert(&mut **tx, identity)
            .await
            .map_err(|e| e.into_store_error("create", identity.email.as_str()))
    }

    async fn update(&self, identity: &Identity) -> StoreResult<()> {
        let mut tx = self.tx.lock().await;
        update(&mut **tx, identity)
            .await
            .map_err(|e| e.into_store_error("update", identity.email.as_str()))
    }

    async fn delete(&self, identity: &Identity) -> StoreResult<()> {
        let mut tx = self.tx.lock().await;
        delete(&mut **tx, identity.id)
            .await
            .map_err(|e| e.into_store_error("delete", &identity.id.to_string()))
    }

    async fn query_by_id(&self, id: Uuid) -> StoreResult<Identity> {
        let id_str = id.to_string();
        let mut tx = self.tx.lock().await;
        find_by_id(&mut **tx, &id_str)
            .await
            .map_err(|e| e.into_store_error("query_by_id", &id_str))
    }

    async fn query_by_email(&self, email: &Email) -> StoreResult<Identity> {
        let mut tx = self.tx.lock().await;
        find_by_email(&mut **tx, email.as_str())
            .await
            .map_err(|e| e.into_store_error("query_by_email", email.as_str()))
    }

    async fn begin(&self) -> StoreResult<Box<dyn TxStorer>> {
        Err(StoreError::Transaction {
            message: "nested transactions are not supported".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[async_trait]
impl TxStorer for IdentityTxRepository {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx
            .into_inner()
            .commit()
            .await
            .map_err(|e| StoreError::Transaction {
                message: format!("Commit failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx
            .into_inner()
            .rollback()
            .await
            .map_err(|e| StoreError::Transaction {
                message: format!("Rollback failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

// =============================================================================
// Statements
// =============================================================================

async fn insert(conn: &mut SqliteConnection, identity: &Identity) -> DbErrorResult<()> {
    let row = IdentityRow::from_identity(identity)?;

    sqlx::query(
        r#"
            INSERT INTO identities (
                id, name, email, roles, password_hash, department, enabled,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.name)
    .bind(row.email)
    .bind(row.roles)
    .bind(row.password_hash)
    .bind(row.department)
    .bind(row.enabled)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&mut *conn)
    .await?;

    debug!("Inserted identity {}", identity.id);
    Ok(())
}

async fn update(conn: &mut SqliteConnection, identity: &Identity) -> DbErrorResult<()> {
    let row = IdentityRow::from_identity(identity)?;

    let result = sqlx::query(
        r#"
            UPDATE identities
            SET name = ?, email = ?, roles = ?, password_hash = ?, department = ?,
                enabled = ?, updated_at = ?
            WHERE id = ?
        "#,
    )
    .bind(row.name)
    .bind(row.email)
    .bind(row.roles)
    .bind(row.password_hash)
    .bind(row.department)
    .bind(row.enabled)
    .bind(row.updated_at)
    .bind(row.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::from(sqlx::Error::RowNotFound));
    }

    debug!("Updated identity {}", identity.id);
    Ok(())
}

async fn delete(conn: &mut SqliteConnection, id: Uuid) -> DbErrorResult<()> {
    let result = sqlx::query("DELETE FROM identities WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    debug!(
        "Deleted identity {} ({} row(s))",
        id,
        result.rows_affected()
    );
    Ok(())
}

async fn find_by_id(conn: &mut SqliteConnection, id: &str) -> DbErrorResult<Identity> {
    let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
    let row = sqlx::query_as::<_, IdentityRow>(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    row.into_identity()
}

async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> DbErrorResult<Identity> {
    let sql = format!("{} WHERE email = ?", SELECT_COLUMNS);
    let row = sqlx::query_as::<_, IdentityRow>(&sql)
        .bind(email)
        .fetch_one(&mut *conn)
        .await?;

    row.into_identity()
}
