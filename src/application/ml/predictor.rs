/// Interface for loaded price models (the model handle)
///
/// Implementations are immutable after load and shared across requests.
pub trait PricePredictor: Send + Sync {
    /// Feature names in the order `predict` expects its row
    fn feature_names(&self) -> &[String];

    /// Predict a price for a single row aligned to `feature_names`
    fn predict(&self, row: &[f64]) -> Result<f64, String>;

    /// Get model name/type
    fn name(&self) -> &str;
}
