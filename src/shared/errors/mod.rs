//! Error Types
//!
//! Query, domain and use case error types with proper HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors produced by a remote blockchain database query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Transport or I/O failure before any response existed
    #[error("Submission error: {0}")]
    Submission(String),

    /// The service answered with a status code outside the accepted set
    #[error("Response error: status {0}")]
    Response(u16),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("No data in response")]
    NoData,

    /// Well-formed body that does not match the expected model
    #[error("Model error: {0}")]
    Model(String),
}

impl QueryError {
    /// Short, stable name of the error kind (used in structured logs)
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Submission(_) => "submission",
            Self::Response(_) => "response",
            Self::JsonParse(_) => "json_parse",
            Self::NoData => "no_data",
            Self::Model(_) => "model",
        }
    }
}

/// Domain-level errors representing business rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid network state: {0}")]
    InvalidState(String),

    #[error("Invalid amount '{value}' for unit {unit}")]
    InvalidAmount { value: String, unit: String },
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::Query(QueryError::Response(404)) => StatusCode::NOT_FOUND,
            Self::Query(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(DomainError::InvalidState(_)) => "INVALID_STATE",
            Self::Domain(DomainError::InvalidAmount { .. }) => "INVALID_AMOUNT",
            Self::Query(QueryError::Response(404)) => "NOT_FOUND",
            Self::Query(QueryError::Submission(_)) => "UPSTREAM_UNREACHABLE",
            Self::Query(QueryError::Model(_)) => "UPSTREAM_CONTRACT_CHANGED",
            Self::Query(_) => "UPSTREAM_ERROR",
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::UseCase(UseCaseError::Query(err))
    }
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                let details = if let UseCaseError::Validation(errors) = uc_error {
                    Some(
                        errors
                            .iter()
                            .map(|e| {
                                let (field, message) = e.split_once(": ").unwrap_or(("", e.as_str()));
                                FieldError {
                                    field: field.to_string(),
                                    message: message.to_string(),
                                }
                            })
                            .collect(),
                    )
                } else {
                    None
                };
                (uc_error.status_code(), uc_error.error_code().to_string(), uc_error.to_string(), details)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string(), msg.clone(), None),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR".to_string(),
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}
