//! Argon2id credential hashing.
//!
//! The plaintext secret is taken by value and dropped (and zeroized) when the
//! call returns, on success and failure alike. Cost parameters are compiled
//! in; the `low-cost-hashing` feature swaps them for the cheapest legal set.

use crate::{AuthError, Result as AuthErrorResult};

use id_core::{CredentialHash, PlaintextSecret};

use std::panic::Location;
use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use error_location::ErrorLocation;
use log::debug;

#[cfg(not(feature = "low-cost-hashing"))]
const MEMORY_COST_KIB: u32 = 19_456;
#[cfg(not(feature = "low-cost-hashing"))]
const TIME_COST: u32 = 2;

#[cfg(feature = "low-cost-hashing")]
const MEMORY_COST_KIB: u32 = Params::MIN_M_COST;
#[cfg(feature = "low-cost-hashing")]
const TIME_COST: u32 = Params::MIN_T_COST;

const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Input for the decoy hash used when no identity matched.
const DECOY_INPUT: &[u8] = b"no-such-identity";

static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

#[track_caller]
fn hasher() -> AuthErrorResult<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| AuthError::Hashing {
            message: format!("Invalid Argon2 parameters: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `secret` with a fresh random salt, returning a PHC string.
#[track_caller]
pub fn hash(secret: PlaintextSecret) -> AuthErrorResult<CredentialHash> {
    let salt = SaltString::generate(&mut OsRng);

    let phc = hasher()?
        .hash_password(secret.expose().as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?
        .to_string();

    drop(secret);

    CredentialHash::new(phc).map_err(|e| AuthError::Hashing {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Check `secret` against `hash`. Comparison is constant-time.
///
/// `Ok(false)` means the secret does not match; `Err` means the stored hash
/// could not be used at all.
#[track_caller]
pub fn verify(secret: PlaintextSecret, hash: &CredentialHash) -> AuthErrorResult<bool> {
    let parsed = PasswordHash::new(hash.as_str()).map_err(|e| AuthError::InvalidHash {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    match hasher()?.verify_password(secret.expose().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => {
            debug!("Credential verification failed");
            Ok(false)
        }
        Err(e) => Err(AuthError::Hashing {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Spend the same work as [`verify`] against a throwaway hash.
///
/// Called when a login names an unknown account so that response timing does
/// not reveal whether the account exists.
pub fn verify_decoy(secret: PlaintextSecret) {
    let decoy = DECOY_HASH.get_or_init(|| {
        let salt = SaltString::generate(&mut OsRng);
        hasher()
            .ok()?
            .hash_password(DECOY_INPUT, &salt)
            .ok()
            .map(|h| h.to_string())
    });

    let Some(decoy) = decoy else {
        return;
    };

    if let (Ok(parsed), Ok(argon2)) = (PasswordHash::new(decoy), hasher()) {
        let _ = argon2.verify_password(secret.expose().as_bytes(), &parsed);
    }
}
