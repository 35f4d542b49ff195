//! HTTP error shape shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use smartpark_core::error::CoreError;
use smartpark_core::validation::ValidationError;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// 400 with the first broken rule.
    Validation(String),
    /// 404 with the resource's fixed message.
    NotFound(&'static str),
    /// 500 for every store failure, foreign-key violations included.
    Internal { description: String, details: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(description: impl Into<String>, details: impl std::fmt::Display) -> Self {
        Self::Internal {
            description: description.into(),
            details: details.to_string(),
        }
    }

    /// Classifies a repository failure for `entity`. `action` names what was
    /// attempted and ends up in the 500 description.
    pub fn from_core(
        entity: &'static str,
        not_found: &'static str,
        action: &str,
        err: CoreError,
    ) -> Self {
        match err {
            CoreError::Validation(err) => Self::from(err),
            CoreError::NotFound { .. } => Self::NotFound(not_found),
            other => {
                error!(entity, action, error = %other, "request failed");
                Self::internal(format!("Failed to {action} {entity}."), other)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "description": "Validation error", "details": details })),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Internal {
                description,
                details,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "description": description, "details": details })),
            )
                .into_response(),
        }
    }
}
