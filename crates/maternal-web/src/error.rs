use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::inference::InferenceError;
use crate::schemas::{FieldError, validation_message};

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: validation_message(&errors),
                    details: errors,
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal server error".to_string(),
                        details: Vec::new(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<InferenceError> for ApiError {
    fn from(e: InferenceError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<tera::Error> for ApiError {
    fn from(e: tera::Error) -> Self {
        ApiError::Internal(format!("template rendering failed: {e}"))
    }
}
