//! Mapping of core errors onto HTTP responses

use axum::{http::StatusCode, response::Json};
use echoapi_core::prelude::*;
use serde::Serialize;
use tracing::{error, warn};

/// Error payload: `{"detail": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

/// Either a single message or the enumerated list of field errors
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            detail: ErrorDetail::Message(message.into()),
        }
    }
}

/// Result type returned by every handler
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

/// Convert core errors to HTTP status codes and responses
pub fn handle_core_error(error: CoreError) -> (StatusCode, Json<ErrorBody>) {
    let (status, detail) = match error {
        CoreError::Validation(errors) => {
            let paths: Vec<_> = errors.iter().map(FieldError::path).collect();
            warn!("Request validation failed: {}", paths.join(", "));
            (StatusCode::UNPROCESSABLE_ENTITY, ErrorDetail::Fields(errors))
        }
        CoreError::Rule(rule) => {
            warn!("Request rejected: {}", rule);
            (StatusCode::BAD_REQUEST, ErrorDetail::Message(rule.to_string()))
        }
        other => {
            error!("API error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::Message("Internal Server Error".to_string()),
            )
        }
    };

    (status, Json(ErrorBody { detail }))
}
