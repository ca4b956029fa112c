//! User repository for database operations
//!
//! An account is a single row: the issued-token list is a JSONB array
//! on the row itself, so token append/remove are single-statement
//! updates and the row is the unit of atomicity.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// One issued session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub access: String,
    pub token: String,
}

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub tokens: Json<Vec<TokenEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Whether the exact token string is currently issued to this
    /// account with the given access level.
    pub fn has_token(&self, token: &str, access: &str) -> bool {
        self.tokens
            .0
            .iter()
            .any(|entry| entry.token == token && entry.access == access)
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user with an empty token list
    pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, tokens, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, tokens, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, tokens, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Append a token entry to the user's token list
    pub async fn push_token(pool: &PgPool, user_id: Uuid, entry: &TokenEntry) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET tokens = tokens || $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(Json(entry))
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove every entry matching the token string from the user's
    /// token list. Removing an absent token is a no-op.
    pub async fn pull_token(pool: &PgPool, user_id: Uuid, token: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET tokens = (
                    SELECT COALESCE(jsonb_agg(entry), '[]'::jsonb)
                    FROM jsonb_array_elements(tokens) entry
                    WHERE entry->>'token' IS DISTINCT FROM $2
                ),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;

        Ok(())
    }
}
