//! Push-based metrics reporter for AutoPrice
//!
//! Periodically outputs metrics as structured JSON to stdout.

use crate::infrastructure::observability::metrics::Metrics;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const OUTCOMES: [&str; 4] = ["ok", "invalid_input", "feature_mismatch", "failure"];

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub model: ModelSnapshot,
    pub predictions: PredictionSnapshot,
}

#[derive(Serialize)]
pub struct ModelSnapshot {
    pub name: String,
    pub sha256: String,
    pub features: usize,
}

#[derive(Serialize)]
pub struct PredictionSnapshot {
    pub ok: u64,
    pub invalid_input: u64,
    pub feature_mismatch: u64,
    pub failure: u64,
}

/// Push-based metrics reporter
///
/// Outputs metrics as structured JSON logs on a configurable interval.
pub struct MetricsReporter {
    metrics: Metrics,
    model_name: String,
    model_sha256: String,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(
        metrics: Metrics,
        model_name: impl Into<String>,
        model_sha256: impl Into<String>,
        interval_seconds: u64,
    ) -> Self {
        Self {
            metrics,
            model_name: model_name.into(),
            model_sha256: model_sha256.into(),
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Use a special prefix so logs can be easily filtered
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Predictions ok={} rejected={} failed={} | Uptime: {}s",
                        snapshot.predictions.ok,
                        snapshot.predictions.invalid_input,
                        snapshot.predictions.failure + snapshot.predictions.feature_mismatch,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }
    }

    /// Collect current metrics snapshot
    pub fn collect_snapshot(&self) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        let [ok, invalid_input, feature_mismatch, failure] =
            OUTCOMES.map(|outcome| self.metrics.predictions(outcome));

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: ModelSnapshot {
                name: self.model_name.clone(),
                sha256: self.model_sha256.clone(),
                features: self.metrics.model_features.get() as usize,
            },
            predictions: PredictionSnapshot {
                ok,
                invalid_input,
                feature_mismatch,
                failure,
            },
        }
    }
}
