//! Configuration module for AutoPrice.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Model, Client, and Observability.

mod client_config;
mod model_config;
mod observability_config;
mod server_config;

pub use client_config::ClientEnvConfig;
pub use model_config::{DEFAULT_MODEL_FILE_ID, DEFAULT_MODEL_FILENAME, ModelEnvConfig};
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
///
/// Aggregates the sub-configs; each binary reads the parts it needs.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub model: ModelEnvConfig,
    pub client: ClientEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let model = ModelEnvConfig::from_env().context("Failed to load model config")?;
        let client = ClientEnvConfig::from_env().context("Failed to load client config")?;
        let observability = ObservabilityEnvConfig::from_env();

        Ok(Self {
            server,
            model,
            client,
            observability,
        })
    }
}
