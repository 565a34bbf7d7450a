use thiserror::Error;

/// Errors raised while obtaining the model at startup.
///
/// Both variants are fatal: the server refuses to bind without a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model unavailable: download from {source_url} failed: {reason}")]
    ModelUnavailable { source_url: String, reason: String },

    #[error("Model could not be loaded from {path}: {reason}")]
    ModelLoadError { path: String, reason: String },
}

/// Errors raised while serving a single prediction request.
///
/// These never escape the request boundary; the HTTP layer turns them into
/// a structured error response.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Feature mismatch: model expects '{feature}' which the record does not provide")]
    FeatureMismatch { feature: String },

    #[error("Prediction failed: {reason}")]
    PredictionFailure { reason: String },
}

impl PredictionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::PredictionFailure {
            reason: reason.into(),
        }
    }

    /// True when the caller sent something wrong (as opposed to a server fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Errors seen by the presentation client when calling the service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not reach the prediction server: {reason}")]
    Transport { reason: String },

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected response from the prediction server: {reason}")]
    Decode { reason: String },
}
