//! User service: registration, login, and session token lifecycle
//!
//! # Performance
//!
//! Password hashing/verification runs on the blocking thread pool;
//! token encoding uses the codec's pre-computed keys.

use crate::auth::{PasswordService, TokenCodec, ACCESS_AUTH};
use crate::error::ApiError;
use crate::repositories::{TokenEntry, UserRecord, UserRepository};
use sqlx::PgPool;
use taskbox_shared::validation;
use uuid::Uuid;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and issue them a first session token
    ///
    /// Validates before hashing, so malformed input never pays the
    /// argon2 cost. Email uniqueness is enforced by the store's unique
    /// index; a duplicate insert (including one racing a concurrent
    /// registration) surfaces as a conflict, never a server error. The
    /// account is persisted with an empty token list and the first
    /// token is appended by `issue_token`.
    pub async fn register(
        pool: &PgPool,
        tokens: &TokenCodec,
        email: &str,
        password: &str,
    ) -> Result<(UserRecord, String), ApiError> {
        validation::validate_email(email).map_err(ApiError::Validation)?;
        validation::validate_password(password).map_err(ApiError::Validation)?;

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, email, &password_hash)
            .await
            .map_err(|e| {
                if let Some(sqlx::Error::Database(db_err)) = e.downcast_ref::<sqlx::Error>() {
                    if db_err.is_unique_violation() {
                        return ApiError::Conflict("Email already registered".to_string());
                    }
                }
                ApiError::Internal(e)
            })?;

        let token = Self::issue_token(pool, tokens, &user).await?;

        Ok((user, token))
    }

    /// Login with email and password, issuing a new session token
    ///
    /// Unknown email and wrong password produce the identical error so
    /// responses cannot be used to enumerate accounts.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenCodec,
        email: &str,
        password: &str,
    ) -> Result<(UserRecord, String), ApiError> {
        let user = Self::find_by_credentials(pool, email, password).await?;
        let token = Self::issue_token(pool, tokens, &user).await?;
        Ok((user, token))
    }

    /// Look up an account by email and verify the password against the
    /// stored digest
    pub async fn find_by_credentials(
        pool: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        let user = UserRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(user)
    }

    /// Issue a session token for an already-authenticated account
    ///
    /// Encodes the account id under access level "auth", appends the
    /// entry to the account's token list, and persists it before
    /// returning. Performs no credential check itself.
    pub async fn issue_token(
        pool: &PgPool,
        tokens: &TokenCodec,
        user: &UserRecord,
    ) -> Result<String, ApiError> {
        let token = tokens
            .encode(user.id, ACCESS_AUTH)
            .map_err(ApiError::Internal)?;

        let entry = TokenEntry {
            access: ACCESS_AUTH.to_string(),
            token: token.clone(),
        };
        UserRepository::push_token(pool, user.id, &entry)
            .await
            .map_err(ApiError::Internal)?;

        Ok(token)
    }

    /// Resolve a token to the account it was issued to
    ///
    /// Decodability alone is not enough: the exact token string must
    /// still be present in the account's token list with access level
    /// "auth". A revoked token keeps decoding but fails here.
    pub async fn find_by_valid_token(
        pool: &PgPool,
        tokens: &TokenCodec,
        token: &str,
    ) -> Result<UserRecord, ApiError> {
        let claims = tokens
            .decode(token)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        if claims.access != ACCESS_AUTH {
            return Err(ApiError::Unauthorized("Invalid token".to_string()));
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

        if !user.has_token(token, ACCESS_AUTH) {
            return Err(ApiError::Unauthorized("Invalid token".to_string()));
        }

        Ok(user)
    }

    /// Revoke a session token
    ///
    /// Removes the matching entry from the account's token list.
    /// Revoking a token that is already absent is not an error.
    pub async fn revoke_token(pool: &PgPool, user_id: Uuid, token: &str) -> Result<(), ApiError> {
        UserRepository::pull_token(pool, user_id, token)
            .await
            .map_err(ApiError::Internal)
    }
}
