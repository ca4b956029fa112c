//! Todo API routes
//!
//! All endpoints require authentication and only ever see the acting
//! user's own todos.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::repositories::{TodoRecord, UpdateTodo};
use crate::services::TodoService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use taskbox_shared::types::{CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest};
use uuid::Uuid;

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).patch(update_todo).delete(delete_todo))
}

fn todo_response(todo: TodoRecord) -> TodoResponse {
    TodoResponse {
        id: todo.id.to_string(),
        text: todo.text,
        completed: todo.completed,
        completed_at: todo.completed_at,
        created_at: todo.created_at,
    }
}

fn parse_todo_id(id: &str) -> Result<Uuid, ApiError> {
    // An unparseable id can't name any todo; treat it as missing.
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound("Todo not found".to_string()))
}

/// POST /api/v1/todos - Create a todo
async fn create_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    let todo = TodoService::create(state.db(), auth.user_id, &req.text).await?;
    Ok((StatusCode::CREATED, Json(todo_response(todo))))
}

/// GET /api/v1/todos - List the user's todos
async fn list_todos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<TodoListResponse>> {
    let todos = TodoService::list(state.db(), auth.user_id).await?;
    Ok(Json(TodoListResponse {
        todos: todos.into_iter().map(todo_response).collect(),
    }))
}

/// GET /api/v1/todos/:id - Get one todo
async fn get_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TodoResponse>> {
    let todo_id = parse_todo_id(&id)?;
    let todo = TodoService::get(state.db(), auth.user_id, todo_id).await?;
    Ok(Json(todo_response(todo)))
}

/// PATCH /api/v1/todos/:id - Update text and/or completed flag
async fn update_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let todo_id = parse_todo_id(&id)?;
    let updates = UpdateTodo {
        text: req.text,
        completed: req.completed,
    };
    let todo = TodoService::update(state.db(), auth.user_id, todo_id, updates).await?;
    Ok(Json(todo_response(todo)))
}

/// DELETE /api/v1/todos/:id - Delete a todo, returning the deleted record
async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TodoResponse>> {
    let todo_id = parse_todo_id(&id)?;
    let todo = TodoService::delete(state.db(), auth.user_id, todo_id).await?;
    Ok(Json(todo_response(todo)))
}
