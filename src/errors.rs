use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::repositories::StoreError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    Unprocessable(String),
    /// Rejected request body. Surfaced as a 500 with the validation message.
    Validation(String),
    /// Unexpected backend failure reported as a bare `{"error": ..}` object.
    Raw(String),
    Unauthorized,
    InternalServerError,
}

/// Body of every normalized error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Self::Validation(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            Self::Raw(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("Resource not found".to_string()),
            StoreError::MalformedId(_) => Self::Unprocessable("Invalid ID".to_string()),
            StoreError::Backend(message) => {
                error!("Store error: {}", message);
                Self::InternalServerError
            }
        }
    }
}
