//! Report creation

use crate::params::{path_int, read_body, QueryParams};
use crate::{handle_core_error, ApiResult, ReportResponse};
use axum::{
    body::Bytes,
    extract::{Path, Query},
    response::Json,
};
use echoapi_core::prelude::*;
use echoapi_core::rules;
use tracing::info;

/// `POST /reports/{report_id}?start_date=&end_date=`
pub async fn create_report(
    Path(raw_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> ApiResult<ReportResponse> {
    build_report(&raw_id, QueryParams::from_pairs(pairs), &body)
        .map(Json)
        .map_err(handle_core_error)
}

fn build_report(raw_id: &str, mut params: QueryParams, body: &Bytes) -> CoreResult<ReportResponse> {
    let mut errors = Vec::new();

    // The id rule is decided before the query and body are looked at.
    let report_id = path_int("report_id", raw_id, &mut errors);
    if let Some(id) = &report_id {
        rules::ensure_positive_report_id(id)?;
    }

    // Dates are passed through as opaque text.
    let start_date = params.required_str("start_date");
    let end_date = params.required_str("end_date");
    errors.extend(params.into_errors());

    let report = read_body::<Report>(body, &mut errors);

    let (Some(report_id), Some(report), true) = (report_id, report, errors.is_empty()) else {
        return Err(CoreError::Validation(errors));
    };

    info!("Created report {} ({} to {})", report_id, start_date, end_date);
    Ok(ReportResponse {
        report_id,
        start_date,
        end_date,
        report: report.to_map(),
    })
}
