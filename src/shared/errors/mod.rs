//! Error Types
//!
//! Layered error types with proper HTTP status code mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Violations of the node-creation rules
///
/// Checked in a fixed order; only the first violation is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeValidationError {
    #[error("Not valid fabric version")]
    InvalidFabricVersion { version: String },

    #[error("Not valid node type for {network_type}")]
    InvalidNodeTypeForNetwork { node_type: String, network_type: String },

    #[error("Please set agent_type or agent")]
    MissingAgentSpecification,

    #[error("agent type not equal to agent")]
    AgentTypeMismatch { agent_type: String, agent: String },
}

impl NodeValidationError {
    /// Get the error code for this violation
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFabricVersion { .. } => "INVALID_FABRIC_VERSION",
            Self::InvalidNodeTypeForNetwork { .. } => "INVALID_NODE_TYPE",
            Self::MissingAgentSpecification => "MISSING_AGENT",
            Self::AgentTypeMismatch { .. } => "AGENT_TYPE_MISMATCH",
        }
    }
}

/// Errors raised by the agent directory
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Agent directory unavailable: {0}")]
    Unavailable(String),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error(transparent)]
    NodeValidation(#[from] NodeValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NodeValidation(_) => StatusCode::BAD_REQUEST,
            Self::Repository(RepositoryError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Repository(RepositoryError::Mapping(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NodeValidation(err) => err.error_code(),
            Self::Repository(_) => "INTERNAL_ERROR",
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

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),
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

impl From<&str> for FieldError {
    /// Split a `"path: message"` entry back into its parts
    fn from(entry: &str) -> Self {
        match entry.split_once(": ") {
            Some((field, message)) => Self {
                field: field.to_string(),
                message: message.to_string(),
            },
            None => Self {
                field: String::new(),
                message: entry.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                if let UseCaseError::Repository(err) = uc_error {
                    tracing::error!(error = %err, "Agent directory failure");
                }
                let details = if let UseCaseError::Validation(errors) = uc_error {
                    Some(errors.iter().map(|e| FieldError::from(e.as_str())).collect())
                } else {
                    None
                };
                let message = match uc_error {
                    UseCaseError::Repository(_) => "An unexpected error occurred".to_string(),
                    other => other.to_string(),
                };
                (uc_error.status_code(), uc_error.error_code().to_string(), message, details)
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string(), msg.clone(), None)
            }
            ApiError::InvalidUuid(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_UUID".to_string(), msg.clone(), None)
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

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::InvalidUuid(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::UseCase(UseCaseError::Validation(flatten_validation_errors(&err)))
    }
}

/// Flatten nested validation errors into sorted `"path: message"` entries
///
/// Nested structs are joined with `.`, list items with `[index]`.
#[must_use]
pub fn flatten_validation_errors(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages("", errors, &mut messages);
    messages.sort();
    messages
}

fn collect_messages(prefix: &str, errors: &validator::ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| {
                    format!("{}: {}", path, e.message.as_deref().unwrap_or(&e.code))
                }));
            }
            validator::ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            validator::ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
