//! Search stub

use crate::params::QueryParams;
use crate::{handle_core_error, ApiResult, SearchResponse, PLACEHOLDER_RESULTS};
use axum::{extract::Query, response::Json};
use echoapi_core::prelude::*;
use tracing::debug;

/// Page used when none is given
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when none is given
pub const DEFAULT_SIZE: i64 = 10;

/// `GET /search/?query=&page=1&size=10`
pub async fn search(Query(pairs): Query<Vec<(String, String)>>) -> ApiResult<SearchResponse> {
    run_search(QueryParams::from_pairs(pairs))
        .map(Json)
        .map_err(handle_core_error)
}

fn run_search(mut params: QueryParams) -> CoreResult<SearchResponse> {
    let query = params.required_non_empty_str("query");
    // page and size are echoed without bounds checks
    let page = params.int_or("page", DEFAULT_PAGE);
    let size = params.int_or("size", DEFAULT_SIZE);
    params.finish()?;

    debug!("Search for {:?} (page {}, size {})", query, page, size);
    Ok(SearchResponse {
        query,
        page,
        size,
        results: PLACEHOLDER_RESULTS.iter().map(|s| s.to_string()).collect(),
    })
}
