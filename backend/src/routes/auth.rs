//! Authentication routes
//!
//! Endpoints for registration, login, identity lookup, and logout.
//! Register and login return the issued session token alongside the
//! public `{id, email}` view of the account; nothing else about the
//! account ever leaves the backend.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::UserRecord;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use taskbox_shared::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", delete(logout))
}

fn user_response(user: &UserRecord) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        email: user.email.clone(),
    }
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let (user, token) =
        UserService::register(state.db(), state.tokens(), &req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user_response(&user),
        }),
    ))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (user, token) =
        UserService::login(state.db(), state.tokens(), &req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        token,
        user: user_response(&user),
    }))
}

/// Get the current identity (requires authentication)
///
/// GET /api/v1/auth/me
async fn me(auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserResponse {
        id: auth.user_id.to_string(),
        email: auth.email,
    }))
}

/// Logout: revoke the token that authenticated this request
///
/// DELETE /api/v1/auth/logout
async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    UserService::revoke_token(state.db(), auth.user_id, &auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
