//! Account creation and authentication over any [`Storer`].
//!
//! The service owns id assignment, defaulting and credential hashing. Storage
//! goes through the `Storer` capability only, so the same service runs over
//! the durable adapter directly or over the cache decorator.
//!
//! Hashing and verification are CPU-bound and run on the blocking pool.
//! Dropping a returned future abandons the operation; the store and cache
//! layers keep their own writes atomic with respect to that.

use crate::{BusinessError, Result as BusinessErrorResult};

use id_auth::password;
use id_core::{
    CredentialHash, Email, Identity, NewIdentity, PlaintextSecret, Role, Storer, UpdateIdentity,
};

use std::sync::Arc;

use log::{error, info, warn};
use uuid::Uuid;

pub struct IdentityService {
    store: Arc<dyn Storer>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn Storer>) -> Self {
        Self { store }
    }

    /// Hash the secret, assign an id and persist the new identity.
    ///
    /// An empty role list gets the default roles. A duplicate email fails
    /// with `Conflict`.
    pub async fn create(&self, request: NewIdentity) -> BusinessErrorResult<Identity> {
        let NewIdentity {
            name,
            email,
            roles,
            department,
            password,
        } = request;

        if password.is_empty() {
            return Err(BusinessError::invalid_argument(
                "password",
                "password cannot be empty",
            ));
        }

        let credential_hash = hash_secret(password).await?;

        let roles = if roles.is_empty() {
            Role::defaults()
        } else {
            roles
        };

        let now = Identity::timestamp_now();
        let identity = Identity {
            id: Uuid::new_v4(),
            name,
            email,
            roles,
            credential_hash,
            department,
            enabled: true,
            created_at: now,
            updated_at: now,
        };

        self.store
            .create(&identity)
            .await
            .map_err(|e| BusinessError::from_store("create", e))?;

        info!("Created identity {}", identity.id);
        Ok(identity)
    }

    /// Look up by email and verify the secret.
    ///
    /// Unknown email, wrong secret, disabled account and an unusable stored
    /// hash all fail with the same `Unauthenticated` error. An unknown email
    /// still pays for one verification.
    pub async fn authenticate(
        &self,
        email: &Email,
        secret: PlaintextSecret,
    ) -> BusinessErrorResult<Identity> {
        let identity = match self.store.query_by_email(email).await {
            Ok(identity) => identity,
            Err(e) if e.is_not_found() => {
                verify_decoy(secret).await;
                warn!("Rejected login");
                return Err(BusinessError::unauthenticated());
            }
            Err(e) => return Err(BusinessError::from_store("authenticate", e)),
        };

        match verify_secret(secret, identity.credential_hash.clone()).await {
            Ok(true) if identity.enabled => {
                info!("Authenticated identity {}", identity.id);
                Ok(identity)
            }
            Ok(_) => {
                warn!("Rejected login");
                Err(BusinessError::unauthenticated())
            }
            Err(e) => {
                error!("Credential verification error for {}: {}", identity.id, e);
                Err(BusinessError::unauthenticated())
            }
        }
    }

    pub async fn query_by_email(&self, email: &Email) -> BusinessErrorResult<Identity> {
        self.store
            .query_by_email(email)
            .await
            .map_err(|e| BusinessError::from_store("query_by_email", e))
    }

    pub async fn query_by_id(&self, id: Uuid) -> BusinessErrorResult<Identity> {
        self.store
            .query_by_id(id)
            .await
            .map_err(|e| BusinessError::from_store("query_by_id", e))
    }

    /// Apply `changes` to `identity` and persist the result.
    ///
    /// A new password is re-hashed. `updated_at` is refreshed on every call.
    pub async fn update(
        &self,
        identity: Identity,
        changes: UpdateIdentity,
    ) -> BusinessErrorResult<Identity> {
        let UpdateIdentity {
            name,
            email,
            roles,
            department,
            password,
            enabled,
        } = changes;

        let mut updated = identity;

        if let Some(password) = password {
            if password.is_empty() {
                return Err(BusinessError::invalid_argument(
                    "password",
                    "password cannot be empty",
                ));
            }
            updated.credential_hash = hash_secret(password).await?;
        }
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(email) = email {
            updated.email = email;
        }
        if let Some(roles) = roles {
            updated.roles = if roles.is_empty() {
                Role::defaults()
            } else {
                roles
            };
        }
        if let Some(department) = department {
            updated.department = department;
        }
        if let Some(enabled) = enabled {
            updated.enabled = enabled;
        }
        updated.updated_at = Identity::timestamp_now();

        self.store
            .update(&updated)
            .await
            .map_err(|e| BusinessError::from_store("update", e))?;

        info!("Updated identity {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, identity: &Identity) -> BusinessErrorResult<()> {
        self.store
            .delete(identity)
            .await
            .map_err(|e| BusinessError::from_store("delete", e))?;

        info!("Deleted identity {}", identity.id);
        Ok(())
    }
}

async fn hash_secret(secret: PlaintextSecret) -> BusinessErrorResult<CredentialHash> {
    tokio::task::spawn_blocking(move || password::hash(secret))
        .await
        .map_err(|e| BusinessError::internal(format!("Hashing task failed: {}", e)))?
        .map_err(BusinessError::from)
}

async fn verify_secret(
    secret: PlaintextSecret,
    hash: CredentialHash,
) -> BusinessErrorResult<bool> {
    tokio::task::spawn_blocking(move || password::verify(secret, &hash))
        .await
        .map_err(|e| BusinessError::internal(format!("Verification task failed: {}", e)))?
        .map_err(BusinessError::from)
}

async fn verify_decoy(secret: PlaintextSecret) {
    if let Err(e) = tokio::task::spawn_blocking(move || password::verify_decoy(secret)).await {
        error!("Decoy verification task failed: {}", e);
    }
}
