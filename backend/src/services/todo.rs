//! Todo service

use crate::error::ApiError;
use crate::repositories::{TodoRecord, TodoRepository, UpdateTodo};
use sqlx::PgPool;
use taskbox_shared::validation;
use uuid::Uuid;

/// Todo business logic, always scoped to the acting user
pub struct TodoService;

impl TodoService {
    /// Create a todo
    pub async fn create(pool: &PgPool, user_id: Uuid, text: &str) -> Result<TodoRecord, ApiError> {
        validation::validate_todo_text(text).map_err(ApiError::Validation)?;

        TodoRepository::create(pool, user_id, text)
            .await
            .map_err(ApiError::Internal)
    }

    /// List the user's todos
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<TodoRecord>, ApiError> {
        TodoRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)
    }

    /// Get one of the user's todos
    pub async fn get(pool: &PgPool, user_id: Uuid, todo_id: Uuid) -> Result<TodoRecord, ApiError> {
        TodoRepository::find_for_user(pool, user_id, todo_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))
    }

    /// Update one of the user's todos
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
        updates: UpdateTodo,
    ) -> Result<TodoRecord, ApiError> {
        if let Some(text) = updates.text.as_deref() {
            validation::validate_todo_text(text).map_err(ApiError::Validation)?;
        }

        TodoRepository::update_for_user(pool, user_id, todo_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))
    }

    /// Delete one of the user's todos, returning the deleted record
    pub async fn delete(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
    ) -> Result<TodoRecord, ApiError> {
        TodoRepository::delete_for_user(pool, user_id, todo_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see backend/tests/
}
