//! Username validation

use crate::params::QueryParams;
use crate::{handle_core_error, ApiResult, MessageResponse};
use axum::{extract::Query, response::Json};
use echoapi_core::prelude::*;
use echoapi_core::rules;

/// `GET /validate/?username=`
pub async fn validate_username(Query(pairs): Query<Vec<(String, String)>>) -> ApiResult<MessageResponse> {
    check(QueryParams::from_pairs(pairs))
        .map(Json)
        .map_err(handle_core_error)
}

fn check(mut params: QueryParams) -> CoreResult<MessageResponse> {
    let username = params.required_str("username");
    params.finish()?;

    rules::validate_username(&username)?;
    Ok(MessageResponse::new("Username is valid"))
}
