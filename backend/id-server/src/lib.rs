pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod signing;

#[cfg(test)]
mod tests;

pub use api::{
    deadline::with_deadline,
    error::ApiError,
    error::Result as ApiResult,
    identity::{
        handlers::{login, register},
        login_request::LoginRequest,
        register_request::RegisterRequest,
        token_response::TokenResponse,
    },
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
