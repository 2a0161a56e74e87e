use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::Body;
use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::User;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/register - create an account and hand back a token
pub async fn register(
    State(state): State<AppState>,
    Body(req): Body<CredentialsRequest>,
) -> ApiResult<Value> {
    let (username, password) = validate_credentials(req)?;

    if state
        .repo
        .find_one(|u: &User| u.username == username)
        .is_some()
    {
        return Err(ApiError::bad_request("Username already exists"));
    }

    let hashed = bcrypt::hash(&password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to create account")
    })?;

    let user = state.repo.insert(User::new(username, hashed));
    tracing::info!("registered user {} (id {})", user.username, user.id);

    let token = issue_token(&user)?;
    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user.to_public()
    })))
}

/// POST /api/auth/login - verify credentials and hand back a token
pub async fn login(
    State(state): State<AppState>,
    Body(req): Body<CredentialsRequest>,
) -> ApiResult<Value> {
    let (username, password) = validate_credentials(req)?;

    // Same message for unknown user and wrong password
    let user = state
        .repo
        .find_one(|u: &User| u.username == username)
        .ok_or_else(|| ApiError::bad_request("Invalid username or password"))?;

    let valid = bcrypt::verify(&password, &user.password).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal_server_error("Failed to verify credentials")
    })?;

    if !valid {
        return Err(ApiError::bad_request("Invalid username or password"));
    }

    let token = issue_token(&user)?;
    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user.to_public()
    })))
}

fn validate_credentials(req: CredentialsRequest) -> Result<(String, String), ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }
    Ok((req.username, req.password))
}

fn issue_token(user: &User) -> Result<String, ApiError> {
    let security = &config::config().security;
    let claims = Claims::new(user.id, user.username.clone(), security.token_expiry_hours);
    Ok(auth::generate_token(&claims, &security.jwt_secret)?)
}
