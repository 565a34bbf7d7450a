//! Push-based observability for AutoPrice
//!
//! Metrics are collected in a Prometheus registry and pushed as periodic
//! structured JSON logs. The service exposes no scrape endpoint.

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::MetricsReporter;
