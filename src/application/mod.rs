// Offline model evaluation
pub mod evaluation;

// Model handle and loading
pub mod ml;

// Request path of the prediction service
pub mod prediction_service;

// HTTP client used by the presentation layer
pub mod client;
