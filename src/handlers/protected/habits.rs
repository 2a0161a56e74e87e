use axum::extract::State;
use axum::Extension;
use chrono::Utc;
use serde::Deserialize;

use crate::api::{Body, RecordId};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Changes};
use crate::models::Habit;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateHabit {
    #[serde(default)]
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// GET /api/habits - the caller's habits, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Habit>> {
    Ok(ApiResponse::success(
        state.repo.get_all_by_user(auth_user.id),
    ))
}

/// POST /api/habits - start tracking a new habit
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Body(req): Body<CreateHabit>,
) -> ApiResult<Habit> {
    if req.name.is_empty() {
        return Err(ApiError::bad_request("Habit name is required"));
    }

    let habit = state
        .repo
        .insert(Habit::new(auth_user.id, req.name, req.icon, req.color));
    Ok(ApiResponse::success(habit))
}

/// PUT /api/habits/:id/checkin - toggle today's check-in
pub async fn checkin(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> ApiResult<Habit> {
    let habit = state
        .repo
        .find_by_id::<Habit>(id)
        .ok_or_else(|| ApiError::not_found("Habit not found"))?;

    if habit.user_id != auth_user.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let today = Utc::now().date_naive();
    state.repo.update_with(id, |h: &mut Habit| h.checkin(today));

    let habit = state
        .repo
        .find_by_id::<Habit>(id)
        .ok_or_else(|| ApiError::not_found("Habit not found"))?;
    Ok(ApiResponse::success(habit))
}

/// DELETE /api/habits/:id - stop tracking a habit
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> ApiResult<Changes> {
    let habit = state
        .repo
        .find_by_id::<Habit>(id)
        .ok_or_else(|| ApiError::not_found("Habit not found"))?;

    if habit.user_id != auth_user.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let changes = state.repo.delete::<Habit>(id);
    Ok(ApiResponse::with_message("deleted", Changes { changes }))
}
