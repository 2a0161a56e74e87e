use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::Body;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::User;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub tags: Option<Vec<String>>,
    pub avatar: Option<String>,
}

/// PUT /api/auth/profile - update the caller's bio, tags, and avatar
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Body(req): Body<ProfileUpdate>,
) -> ApiResult<Value> {
    let changed = state.repo.update_with(auth_user.id, |user: &mut User| {
        if let Some(bio) = req.bio {
            user.bio = bio;
        }
        if let Some(tags) = req.tags {
            user.tags = tags;
        }
        if let Some(avatar) = req.avatar {
            user.avatar = avatar;
        }
    });

    if changed == 0 {
        // valid token, but the account is gone from the document
        return Err(ApiError::not_found("User not found"));
    }

    let user = state
        .repo
        .find_by_id::<User>(auth_user.id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({ "user": user.to_public() })))
}
