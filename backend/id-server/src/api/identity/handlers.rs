//! Registration and login handlers
//!
//! Both return a signed token. Request parsing happens before the handler
//! deadline starts; storage, hashing and signing run under it.

use crate::{
    ApiError, ApiResult, AppState, LoginRequest, RegisterRequest, TokenResponse, with_deadline,
};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use log::info;

// =============================================================================
// Handlers
// =============================================================================

/// POST /v1/register
///
/// Create an identity and return a token for it
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let Json(request) = payload?;
    let new_identity = request.into_new_identity()?;

    with_deadline(state.handler_timeout, async {
        let identity = state.service.create(new_identity).await?;
        let token = state.issuer.issue(&identity)?;

        info!("Registered identity {}", identity.id);
        Ok((StatusCode::CREATED, Json(TokenResponse { token })))
    })
    .await
}

/// POST /v1/login
///
/// Exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(request) = payload.map_err(|_| ApiError::unauthenticated())?;
    let (email, password) = request.into_credentials()?;

    with_deadline(state.handler_timeout, async {
        let identity = state.service.authenticate(&email, password).await?;
        let token = state.issuer.issue(&identity)?;

        Ok(Json(TokenResponse { token }))
    })
    .await
}
