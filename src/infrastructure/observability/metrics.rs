//! Prometheus metrics definitions for AutoPrice
//!
//! All metrics use the `autoprice_` prefix.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry,
    core::{AtomicF64, GenericGauge},
};

/// Prometheus metrics for the prediction service
#[derive(Clone)]
pub struct Metrics {
    /// Prediction requests by outcome (ok, invalid_input, feature_mismatch, failure)
    pub predictions_total: CounterVec,
    /// Time spent in validate + align + model call
    pub prediction_latency_seconds: HistogramVec,
    /// Number of features the loaded model expects
    pub model_features: GenericGauge<AtomicF64>,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    ///
    /// Registration rejects duplicate or malformed metric names.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new(
                "autoprice_predictions_total",
                "Prediction requests by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let prediction_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "autoprice_prediction_latency_seconds",
                "Prediction latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25]),
            &["model"],
        )?;
        registry.register(Box::new(prediction_latency_seconds.clone()))?;

        let model_features = Gauge::with_opts(Opts::new(
            "autoprice_model_features",
            "Number of features expected by the loaded model",
        ))?;
        registry.register(Box::new(model_features.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "autoprice_uptime_seconds",
            "Server uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            predictions_total,
            prediction_latency_seconds,
            model_features,
            uptime_seconds,
        })
    }

    /// Increment prediction counter
    pub fn inc_predictions(&self, outcome: &str) {
        self.predictions_total.with_label_values(&[outcome]).inc();
    }

    pub fn predictions(&self, outcome: &str) -> u64 {
        self.predictions_total.with_label_values(&[outcome]).get() as u64
    }

    /// Observe prediction latency
    pub fn observe_latency(&self, model: &str, latency: f64) {
        self.prediction_latency_seconds
            .with_label_values(&[model])
            .observe(latency);
    }
}
