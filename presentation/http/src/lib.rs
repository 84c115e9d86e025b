//! HTTP presentation layer for EchoAPI
//!
//! Serves the item lookup, search, user creation, username validation and
//! report creation endpoints over axum. Handlers are stateless: every request
//! is validated and answered on its own.

use async_trait::async_trait;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use echoapi_core::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod error;
mod handlers;
mod middleware;
mod models;
mod params;

pub use error::{handle_core_error, ApiResult, ErrorBody, ErrorDetail};
pub use models::*;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable permissive CORS
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            enable_cors: true,
        }
    }
}

/// Build the axum router with all routes and middleware
pub fn build_router(config: &HttpConfig) -> Router {
    let mut router = Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        .route("/items/", get(handlers::items::get_item))
        .route("/items", get(handlers::items::get_item))

        .route("/search/", get(handlers::search::search))
        .route("/search", get(handlers::search::search))

        .route("/users/", post(handlers::users::create_user))
        .route("/users", post(handlers::users::create_user))

        .route("/validate/", get(handlers::username::validate_username))
        .route("/validate", get(handlers::username::validate_username))

        .route("/reports/:report_id", post(handlers::reports::create_report))

        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed);

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(middleware::request_logging)),
    )
}

/// HTTP presentation adapter
pub struct HttpAdapter {
    config: HttpConfig,
    shutdown: Arc<Notify>,
}

impl HttpAdapter {
    /// Create a new HTTP adapter
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            shutdown: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl PresentationAdapter for HttpAdapter {
    async fn start(&self) -> Result<(), PresentationError> {
        info!("Starting HTTP server on {}", self.config.bind_address);

        let router = build_router(&self.config);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("Failed to bind to {}: {}", self.config.bind_address, e)))?;

        info!("HTTP server listening on {}", self.config.bind_address);

        let shutdown = self.shutdown.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    async fn stop(&self) -> Result<(), PresentationError> {
        info!("Stopping HTTP server");
        // A stored permit covers a stop that races ahead of start.
        self.shutdown.notify_one();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(&HttpConfig::default())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(request).await
    }

    #[test]
    fn test_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.bind_address.port(), 8000);
        assert!(config.enable_cors);
    }

    #[tokio::test]
    async fn test_items_echo() {
        let (status, body) = get("/items/?name=widget&category=tools&price=9.5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"name": "widget", "category": "tools", "price": 9.5}));
    }

    #[tokio::test]
    async fn test_items_bad_price_lists_offending_field() {
        let (status, body) = get("/items/?name=widget&category=tools&price=cheap").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["query", "price"]));
        assert_eq!(body["detail"][0]["type"], "float_parsing");
        assert_eq!(body["detail"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_items_missing_everything() {
        let (status, body) = get("/items/").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let locs: Vec<_> = body["detail"].as_array().unwrap().iter().map(|e| e["loc"][1].clone()).collect();
        assert_eq!(locs, vec![json!("name"), json!("category"), json!("price")]);
    }

    #[tokio::test]
    async fn test_search_defaults_and_stub_results() {
        let (status, body) = get("/search/?query=foo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"query": "foo", "page": 1, "size": 10, "results": ["item1", "item2", "item3"]})
        );
    }

    #[tokio::test]
    async fn test_search_accepts_non_positive_paging() {
        let (status, body) = get("/search/?query=foo&page=0&size=-3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 0);
        assert_eq!(body["size"], -3);
        assert_eq!(body["results"], json!(["item1", "item2", "item3"]));
    }

    #[tokio::test]
    async fn test_search_accepts_huge_page() {
        let (status, body) = get("/search/?query=foo&page=99999999999999999999&size=12345678901234567890").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"].to_string(), "99999999999999999999");
        assert_eq!(body["size"].to_string(), "12345678901234567890");
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let (status, body) = get("/search/?page=2").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["query", "query"]));
        assert_eq!(body["detail"][0]["type"], "missing");
    }

    #[tokio::test]
    async fn test_create_user_round_trip() {
        let user = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "address": {"street": "1 Main St", "city": "Springfield", "zip": "12345"},
            "profile": {"b": 1, "a": [true, null], "c": {"deep": "x"}}
        });
        let (status, body) = post_json("/users/", user.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user);
    }

    #[tokio::test]
    async fn test_create_user_keeps_big_integers_exact() {
        let payload = r#"{"name":"Ada","email":"a@b.c","address":{"street":"s","city":"c","zip":"z"},"profile":{"n":123456789012345678901234567890,"m":18446744073709551616,"f":1.50}}"#;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .unwrap();
        let response = build_router(&HttpConfig::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_create_user_enumerates_errors() {
        let user = json!({"name": "Ada", "address": {"street": 5, "city": "x", "zip": "1"}, "profile": {}});
        let (status, body) = post_json("/users/", user).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "email"]));
        assert_eq!(body["detail"][0]["type"], "missing");
        assert_eq!(body["detail"][1]["loc"], json!(["body", "address", "street"]));
        assert_eq!(body["detail"][1]["type"], "string_type");
    }

    #[tokio::test]
    async fn test_create_user_rejects_malformed_json() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "json_invalid");
    }

    #[tokio::test]
    async fn test_validate_username_scenarios() {
        let (status, body) = get("/validate/?username=ab").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Username must be at least 3 characters long"}));

        let (status, body) = get("/validate/?username=ab%24").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"detail": "Username can only contain letters, numbers, underscores, and hyphens"})
        );

        let (status, body) = get("/validate/?username=ab_12").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Username is valid"}));
    }

    #[tokio::test]
    async fn test_validate_short_invalid_username_reports_length_only() {
        let (status, body) = get("/validate/?username=%24%21").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Username must be at least 3 characters long");
    }

    #[tokio::test]
    async fn test_create_report_echo() {
        let (status, body) = post_json(
            "/reports/7?start_date=2024-01-01&end_date=not-a-date",
            json!({"title": "Q1", "content": "All good"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "report_id": 7,
                "start_date": "2024-01-01",
                "end_date": "not-a-date",
                "report": {"title": "Q1", "content": "All good"}
            })
        );
    }

    #[tokio::test]
    async fn test_create_report_zero_id() {
        let (status, body) = post_json(
            "/reports/0?start_date=a&end_date=b",
            json!({"title": "Q1", "content": "All good"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Report ID must be positive"}));
    }

    #[tokio::test]
    async fn test_create_report_negative_id_wins_over_bad_input() {
        let (status, body) = post_json("/reports/-4", json!({"title": 1})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Report ID must be positive");
    }

    #[tokio::test]
    async fn test_create_report_huge_id() {
        let (status, body) = post_json(
            "/reports/99999999999999999999?start_date=a&end_date=b",
            json!({"title": "Q1", "content": "All good"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report_id"].to_string(), "99999999999999999999");

        let (status, body) = post_json(
            "/reports/-99999999999999999999?start_date=a&end_date=b",
            json!({"title": "Q1", "content": "All good"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Report ID must be positive");
    }

    #[tokio::test]
    async fn test_create_report_accumulates_errors() {
        let (status, body) = post_json("/reports/abc?start_date=a", json!({"title": "t"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let locs: Vec<_> = body["detail"].as_array().unwrap().iter().map(|e| e["loc"].clone()).collect();
        assert_eq!(
            locs,
            vec![
                json!(["path", "report_id"]),
                json!(["query", "end_date"]),
                json!(["body", "content"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Not Found"}));
    }

    #[tokio::test]
    async fn test_wrong_method_on_known_path() {
        let (status, body) = get("/reports/1").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"detail": "Method Not Allowed"}));

        let (status, body) = post_json("/items/", json!({})).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"detail": "Method Not Allowed"}));
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let response = build_router(&HttpConfig::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(middleware::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_stop_before_start_returns_promptly() {
        let adapter = HttpAdapter::new(HttpConfig {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
            enable_cors: false,
        });
        adapter.stop().await.unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(5), adapter.start())
            .await
            .expect("server should shut down")
            .unwrap();
    }
}
