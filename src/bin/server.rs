//! AutoPrice Server - used-car price prediction over HTTP
//!
//! Loads the model artifact (downloading it once if it is not cached
//! locally), then serves `GET /` and `POST /predict`. Metrics are pushed via
//! structured JSON logs to stdout.
//!
//! # Usage
//! ```sh
//! MODEL_FILENAME=random_forest_model.json SERVER_PORT=8000 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_BIND_ADDRESS` / `SERVER_PORT` - Listen address (default: 0.0.0.0:8000)
//! - `MODEL_FILENAME` - Local artifact cache (default: random_forest_model.json)
//! - `MODEL_FILE_ID` / `MODEL_URL` - Where to download the artifact from
//! - `OBSERVABILITY_ENABLED` - Enable metrics reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between metric outputs (default: 60)

use anyhow::{Context, Result};
use autoprice::application::ml::{ModelLoader, PricePredictor};
use autoprice::application::prediction_service::PredictionService;
use autoprice::config::Config;
use autoprice::infrastructure::observability::{Metrics, MetricsReporter};
use autoprice::infrastructure::{HttpArtifactFetcher, HttpClientFactory};
use autoprice::interfaces::api::{AppState, router};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("AutoPrice Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Model={:?}, Listen={}",
        config.model.filename,
        config.server.socket_address()
    );

    // The listener is only bound once a model is in hand
    let client = HttpClientFactory::create_download_client(Duration::from_secs(
        config.model.download_timeout_secs,
    ));
    let fetcher = HttpArtifactFetcher::new(client, config.model.source_location())
        .with_confirm_retry(config.model.uses_google_drive());
    let loaded = ModelLoader::new(Arc::new(fetcher))
        .load(&config.model.filename)
        .await
        .context("Failed to load the price model")?;

    let service = PredictionService::new(loaded.predictor.clone());
    let metrics = Metrics::new()?;
    let state = AppState::new(service, metrics.clone());

    if config.observability.enabled {
        let reporter = MetricsReporter::new(
            metrics,
            loaded.predictor.name(),
            loaded.sha256.clone(),
            config.observability.interval_secs,
        );

        tokio::spawn(async move {
            reporter.run().await;
        });

        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability.interval_secs
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    let address = config.server.socket_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server listening on {}. Press Ctrl+C to shutdown.", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received. Exiting...");
        })
        .await?;

    Ok(())
}
