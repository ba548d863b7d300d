use anyhow::Result;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod engine;
mod models;
mod page;
mod registry;

use crate::api::AppState;
use crate::config::Settings;
use crate::engine::Monitor;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()))
        .with_ansi(true)
        .init();

    let settings = Settings::load("config.json")?;
    let monitor = Arc::new(Monitor::new(&settings)?);
    let targets = registry::services();
    info!("Starting web service, monitoring {} services...", targets.len());

    let state = Arc::new(AppState {
        monitor,
        targets,
        template_path: settings.template_path.clone(),
    });
    let app = api::create_router(state, settings.static_dir.clone());

    api::start_server(settings.port, app).await
}
