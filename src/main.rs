//! AutoPrice desktop client
//!
//! Form-driven front end for the prediction server. Reads
//! `PREDICTION_API_URL` and `PREDICTION_TIMEOUT_SECS` from the environment.

use autoprice::application::client::PredictionClient;
use autoprice::config::ClientEnvConfig;
use autoprice::infrastructure::HttpClientFactory;
use autoprice::interfaces::price_form::PricePredictorApp;
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Setup Logging
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let config = ClientEnvConfig::from_env()?;
    info!("Prediction server: {}", config.api_url);

    // 2. Tokio runtime on a background thread; the UI owns the main thread
    let (handle_tx, handle_rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build Tokio runtime: {}", e);
                return;
            }
        };

        let _ = handle_tx.send(rt.handle().clone());
        info!("Background Runtime Started.");
        rt.block_on(std::future::pending::<()>());
    });

    let runtime = handle_rx
        .recv()
        .map_err(|_| anyhow::anyhow!("Background runtime failed to start"))?;

    // 3. Client (single attempt per request)
    let http = HttpClientFactory::create_api_client(Duration::from_secs(config.timeout_secs));
    let client = PredictionClient::new(http, config.api_url);
    let app = PricePredictorApp::new(client, runtime);

    // 4. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([820.0, 900.0])
            .with_title("Used Car Price Predictor"),
        ..Default::default()
    };

    eframe::run_native(
        "Used Car Price Predictor",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    Ok(())
}
