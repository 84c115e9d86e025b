//! HTTP request handlers

pub mod health;
pub mod items;
pub mod search;
pub mod users;
pub mod username;
pub mod reports;

use crate::ErrorBody;
use axum::{http::StatusCode, response::Json};

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::message("Not Found")))
}

/// Fallback for a known path called with the wrong method
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(ErrorBody::message("Method Not Allowed")))
}
