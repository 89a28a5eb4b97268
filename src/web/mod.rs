// Web server — axum dashboard backend.
//
// All routes serve JSON. CORS is wide open: the dashboard frontend is
// served separately and talks to this backend cross-origin during
// development.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::geo::Geocoder;
use crate::model::Analyzer;

pub mod handlers;

/// Shared application state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub config: Arc<Config>,
    pub geocoder: Arc<dyn Geocoder>,
}

/// Start the web server and block until it exits.
pub async fn run_server(
    config: Config,
    geocoder: Arc<dyn Geocoder>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        analyzer: Arc::new(Analyzer::default()),
        config: Arc::new(config),
        geocoder,
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Ember dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(handlers::analyze::analyze))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
