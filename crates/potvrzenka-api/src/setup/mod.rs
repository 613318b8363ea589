//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs, so tests
//! can build the same router around synthetic state.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use potvrzenka_core::{Config, TemplateAssets};
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();
    tracing::info!("Configuration loaded and validated successfully");

    // Template resources are read once here and shared read-only after.
    let assets = TemplateAssets::load(&config).context("Failed to load template assets")?;

    let state = Arc::new(AppState {
        config: config.clone(),
        assets: Arc::new(assets),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
