//! Response models for the HTTP layer

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Placeholder hits returned by every search
pub const PLACEHOLDER_RESULTS: [&str; 3] = ["item1", "item2", "item3"];

/// `GET /items/` echo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResponse {
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// `GET /search/` result page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: Number,
    pub size: Number,
    pub results: Vec<String>,
}

/// A plain confirmation message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `POST /reports/{report_id}` echo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResponse {
    pub report_id: Number,
    pub start_date: String,
    pub end_date: String,
    pub report: Map<String, Value>,
}
