//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::estimator::responses::EstimateErrorResponse;
use crate::estimator::EstimateError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Business settings are not configured")]
    SettingsNotConfigured,

    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, details) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::SettingsNotConfigured => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "settings_not_configured",
                None,
            ),
            AppError::Estimate(EstimateError::Validation { message, errors }) => {
                tracing::debug!("{}: {:?}", message, errors);
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    Some(serde_json::json!({ "errors": errors })),
                )
            }
            AppError::InvalidBody(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                (rejection.status(), "invalid_body", None)
            }
        };

        let body = EstimateErrorResponse {
            error_type: error_type.to_string(),
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
