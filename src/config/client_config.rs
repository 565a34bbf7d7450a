//! Presentation client configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Client environment configuration
#[derive(Debug, Clone)]
pub struct ClientEnvConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientEnvConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: env::var("PREDICTION_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            timeout_secs: env::var("PREDICTION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("Failed to parse PREDICTION_TIMEOUT_SECS")?,
        })
    }
}
