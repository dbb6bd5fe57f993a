pub mod error;
pub mod identity_service;

pub use error::{BusinessError, ErrorKind, Result, UNAUTHENTICATED_MESSAGE};
pub use identity_service::IdentityService;
