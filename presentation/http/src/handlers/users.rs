//! User creation

use crate::params::read_body;
use crate::{handle_core_error, ApiResult};
use axum::{body::Bytes, response::Json};
use echoapi_core::prelude::*;
use tracing::info;

/// `POST /users/`: validate the body as a [`User`] and echo it back
pub async fn create_user(body: Bytes) -> ApiResult<User> {
    let mut errors = Vec::new();
    match read_body::<User>(&body, &mut errors) {
        Some(user) => {
            info!("Accepted user {}", user.name);
            Ok(Json(user))
        }
        None => Err(handle_core_error(CoreError::Validation(errors))),
    }
}
