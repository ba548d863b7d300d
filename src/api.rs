use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{error, info, Level};

use crate::engine::Monitor;
use crate::models::Target;
use crate::page;

pub struct AppState {
    pub monitor: Arc<Monitor>,
    pub targets: Vec<Target>,
    pub template_path: PathBuf,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let template = page::load_template(&state.template_path).await;
    Html(page::render(&template, Utc::now()))
}

pub async fn check(State(state): State<Arc<AppState>>) -> Response {
    let results = state.monitor.aggregate(&state.targets).await;
    match serde_json::to_string_pretty(&results) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!("Error encoding check results: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn create_router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", any(index))
        .route("/check", get(check))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(index)
        .layer(
            TraceLayer::new_for_http()
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, app: Router) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Status page: http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received. Closing status page...");
}
