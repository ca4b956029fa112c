//! Session guard
//!
//! Axum extractor that turns a bearer token into the acting account.
//! Extraction is a two-step check: the token must decode under the
//! current secret AND still be present in the owning account's token
//! list. Every failure mode maps to the same 401.

use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use taskbox_shared::AuthError;
use uuid::Uuid;

/// Authenticated account resolved from a bearer token
///
/// Keeps the raw token so logout can revoke exactly the credential
/// that authenticated the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        // Check Bearer prefix
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        // Decode + store membership check. Any failure collapses to the
        // same error so callers cannot tell which check rejected them.
        let user = UserService::find_by_valid_token(app_state.db(), app_state.tokens(), token)
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            token: token.to_string(),
        })
    }
}
