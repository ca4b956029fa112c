//! Todo repository for database operations
//!
//! Every query is scoped to the creating user; a todo id that belongs
//! to another user behaves exactly like a missing row.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Todo record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for updating a todo
#[derive(Debug, Clone, Default)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Todo repository for database operations
pub struct TodoRepository;

impl TodoRepository {
    /// Create a new todo for a user
    pub async fn create(pool: &PgPool, user_id: Uuid, text: &str) -> Result<TodoRecord> {
        let todo = sqlx::query_as::<_, TodoRecord>(
            r#"
            INSERT INTO todos (user_id, text)
            VALUES ($1, $2)
            RETURNING id, user_id, text, completed, completed_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(text)
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// List all todos for a user, oldest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<TodoRecord>> {
        let todos = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, user_id, text, completed, completed_at, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }

    /// Find one of a user's todos by id
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
    ) -> Result<Option<TodoRecord>> {
        let todo = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, user_id, text, completed, completed_at, created_at
            FROM todos
            WHERE id = $2 AND user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(todo_id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Update one of a user's todos
    ///
    /// `completed_at` tracks the completed flag: set when it flips to
    /// true, cleared when it flips to false, untouched otherwise.
    pub async fn update_for_user(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
        updates: UpdateTodo,
    ) -> Result<Option<TodoRecord>> {
        let todo = sqlx::query_as::<_, TodoRecord>(
            r#"
            UPDATE todos SET
                text = COALESCE($3, text),
                completed = COALESCE($4, completed),
                completed_at = CASE
                    WHEN $4 IS TRUE THEN NOW()
                    WHEN $4 IS FALSE THEN NULL
                    ELSE completed_at
                END
            WHERE id = $2 AND user_id = $1
            RETURNING id, user_id, text, completed, completed_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(todo_id)
        .bind(updates.text)
        .bind(updates.completed)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Delete one of a user's todos, returning the deleted row
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
    ) -> Result<Option<TodoRecord>> {
        let todo = sqlx::query_as::<_, TodoRecord>(
            r#"
            DELETE FROM todos
            WHERE id = $2 AND user_id = $1
            RETURNING id, user_id, text, completed, completed_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(todo_id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }
}
