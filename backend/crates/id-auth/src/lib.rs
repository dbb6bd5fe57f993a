pub mod claims;
pub mod error;
pub mod jwt_validator;
pub mod password;
pub mod signer;
pub mod signing_key;
pub mod token_issuer;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use signer::{JwtSigner, Signer};
pub use signing_key::SigningKey;
pub use token_issuer::{DEFAULT_VALIDITY_HOURS, TokenIssuer};

#[cfg(test)]
mod tests;
