//! Item lookup

use crate::params::QueryParams;
use crate::{handle_core_error, ApiResult, ItemResponse};
use axum::{extract::Query, response::Json};
use echoapi_core::prelude::*;
use tracing::debug;

/// `GET /items/?name=&category=&price=`
pub async fn get_item(Query(pairs): Query<Vec<(String, String)>>) -> ApiResult<ItemResponse> {
    lookup_item(QueryParams::from_pairs(pairs))
        .map(Json)
        .map_err(handle_core_error)
}

fn lookup_item(mut params: QueryParams) -> CoreResult<ItemResponse> {
    let name = params.required_str("name");
    let category = params.required_str("category");
    let price = params.required_float("price");
    params.finish()?;

    debug!("Item lookup: {} in {}", name, category);
    Ok(ItemResponse { name, category, price })
}
