// Model evaluation metrics
pub mod metrics;

pub use metrics::RegressionMetrics;
