use axum::extract::State;
use axum::Extension;
use serde::Deserialize;

use crate::api::{Body, RecordId};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Changes};
use crate::models::Todo;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub task: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    pub completed: i64,
}

/// GET /api/todos - the caller's todos, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Todo>> {
    Ok(ApiResponse::success(
        state.repo.get_all_by_user(auth_user.id),
    ))
}

/// POST /api/todos - add a todo, starting uncompleted
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Body(req): Body<CreateTodo>,
) -> ApiResult<Todo> {
    if req.task.is_empty() {
        return Err(ApiError::bad_request("Task is required"));
    }

    let todo = state.repo.insert(Todo::new(auth_user.id, req.task));
    Ok(ApiResponse::success(todo))
}

/// PUT /api/todos/:id - set the completion flag
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    RecordId(id): RecordId,
    Body(req): Body<UpdateTodo>,
) -> ApiResult<Changes> {
    let todo = state
        .repo
        .find_by_id::<Todo>(id)
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    if todo.user_id != auth_user.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let changes = state
        .repo
        .update_with(id, |t: &mut Todo| t.completed = req.completed);
    Ok(ApiResponse::with_message("updated", Changes { changes }))
}

/// DELETE /api/todos/:id - delete one of the caller's todos
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> ApiResult<Changes> {
    let todo = state
        .repo
        .find_by_id::<Todo>(id)
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    if todo.user_id != auth_user.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let changes = state.repo.delete::<Todo>(id);
    Ok(ApiResponse::with_message("deleted", Changes { changes }))
}
