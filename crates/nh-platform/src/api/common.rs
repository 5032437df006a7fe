//! Common API types and error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use nh_store::StoreError;

use crate::error::NotificationError;

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

/// Success response with optional message
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// Cursor-paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_id: Option<String>,
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            NotificationError::InvalidArgument { .. } => {
                (StatusCode::BAD_REQUEST, "invalid_argument")
            }
            NotificationError::NotificationNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            NotificationError::Store(StoreError::InvalidCursor(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_cursor")
            }
            NotificationError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = ApiError {
            error: error.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
