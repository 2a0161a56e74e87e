use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for API responses that adds the `{message, data}` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// The standard success envelope
    pub fn success(data: T) -> Self {
        Self {
            message: "success",
            data,
        }
    }

    /// An envelope with a custom verb, e.g. "deleted" or "updated"
    pub fn with_message(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        Json(json!({
            "message": self.message,
            "data": data_value
        }))
        .into_response()
    }
}

/// Changed-record count returned by update and delete endpoints
#[derive(Debug, Serialize)]
pub struct Changes {
    pub changes: usize,
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
