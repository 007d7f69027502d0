//! Unified API error handling
//!
//! Provides consistent error responses across all endpoints. The wire shape
//! is the `{error, message}` envelope the frontend already consumes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::plan::PlanError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Server configuration error: {0}")]
    Configuration(&'static str),

    #[error("Failed to generate project plan")]
    PlanGeneration(#[from] PlanError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::PlanGeneration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_label(&self) -> String {
        match self {
            Self::MissingField(field) => format!("Missing required field: {field}"),
            Self::Configuration(_) => "Server configuration error".to_string(),
            Self::PlanGeneration(_) => "Failed to generate project plan".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::MissingField(field) => {
                format!("Please provide at least a {field} in the request body")
            }
            Self::Configuration(msg) => (*msg).to_string(),
            // Don't leak upstream or parser detail to the client
            Self::PlanGeneration(_) | Self::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server-side errors with their internal detail
        match &self {
            Self::PlanGeneration(e) => {
                tracing::error!(error = %e, "Plan generation failed");
            }
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.error_label(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
