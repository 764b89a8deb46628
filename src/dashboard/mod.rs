//! Dashboard — Axum web server for the trade desk page.
//!
//! Serves the JSON API and a self-contained HTML page. CORS enabled for
//! local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

pub use routes::{AppState, DeskState};

/// The embedded page (compiled into the binary).
const DESK_HTML: &str = include_str!("templates/index.html");

/// Bind `addr` and serve until the task is cancelled or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind desk address {addr}"))?;
    info!(%addr, "Desk server listening on http://{addr}");

    axum::serve(listener, app).await.context("Desk server error")?;
    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/zones", get(routes::get_zones))
        .route("/api/sessions", post(routes::create_session))
        .route(
            "/api/sessions/:id",
            get(routes::get_session).delete(routes::delete_session),
        )
        .route("/api/sessions/:id/price", post(routes::fetch_price))
        .route("/api/sessions/:id/evaluate", post(routes::evaluate))
        .route(
            "/api/sessions/:id/plans",
            get(routes::list_plans).post(routes::save_plan),
        )
        .route("/api/sessions/:id/plans/summary", get(routes::plan_summary))
        .route("/health", get(routes::health))
        // Page
        .route("/", get(serve_page))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML page.
async fn serve_page() -> Html<&'static str> {
    Html(DESK_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
