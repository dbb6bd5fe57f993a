pub mod credential_hash;
pub mod email;
pub mod identity;
pub mod name;
pub mod new_identity;
pub mod plaintext_secret;
pub mod role;
pub mod update_identity;
