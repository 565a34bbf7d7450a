//! Model artifact configuration parsing from environment variables.
//!
//! The artifact is cached under `MODEL_FILENAME` and only downloaded when
//! that file is absent. `MODEL_URL` overrides the Google Drive location
//! derived from `MODEL_FILE_ID`.

use crate::infrastructure::remote_storage::google_drive_url;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_FILENAME: &str = "random_forest_model.json";
pub const DEFAULT_MODEL_FILE_ID: &str = "1Ty8u2nOSlO0eF-FjDh8nrFuU8WbA-38p";

/// Model environment configuration
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub filename: PathBuf,
    pub file_id: String,
    pub url: Option<String>,
    pub download_timeout_secs: u64,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_MODEL_FILENAME),
            file_id: DEFAULT_MODEL_FILE_ID.to_string(),
            url: None,
            download_timeout_secs: 120,
        }
    }
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            filename: PathBuf::from(
                env::var("MODEL_FILENAME").unwrap_or_else(|_| DEFAULT_MODEL_FILENAME.to_string()),
            ),
            file_id: env::var("MODEL_FILE_ID").unwrap_or_else(|_| DEFAULT_MODEL_FILE_ID.to_string()),
            url: env::var("MODEL_URL").ok().filter(|u| !u.trim().is_empty()),
            download_timeout_secs: env::var("MODEL_DOWNLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("Failed to parse MODEL_DOWNLOAD_TIMEOUT_SECS")?,
        })
    }

    /// Where to fetch the artifact from when it is not cached locally.
    /// Not validated here: a cached artifact never needs it.
    pub fn source_location(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => google_drive_url(&self.file_id),
        }
    }

    /// Drive downloads may need the `confirm=t` retry
    pub fn uses_google_drive(&self) -> bool {
        self.url.is_none()
    }
}
