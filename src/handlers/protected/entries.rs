use axum::extract::State;
use axum::Extension;
use serde::Deserialize;

use crate::api::{Body, RecordId};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Changes};
use crate::models::Entry;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEntry {
    #[serde(default)]
    pub content: String,
    pub mood: Option<String>,
}

/// GET /api/entries - all diary entries owned by the caller, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Entry>> {
    Ok(ApiResponse::success(
        state.repo.get_all_by_user(auth_user.id),
    ))
}

/// POST /api/entries - write a new diary entry
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Body(req): Body<CreateEntry>,
) -> ApiResult<Entry> {
    if req.content.is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    let entry = state
        .repo
        .insert(Entry::new(auth_user.id, req.content, req.mood));
    Ok(ApiResponse::success(entry))
}

/// DELETE /api/entries/:id - delete one of the caller's entries
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> ApiResult<Changes> {
    let entry = state
        .repo
        .find_by_id::<Entry>(id)
        .ok_or_else(|| ApiError::not_found("Entry not found"))?;

    if entry.user_id != auth_user.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let changes = state.repo.delete::<Entry>(id);
    Ok(ApiResponse::with_message("deleted", Changes { changes }))
}
