use crate::domain::performance::RegressionMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A model artifact attached to a tracked run
#[derive(Debug, Clone, PartialEq)]
pub struct RunArtifact {
    pub name: String,
    pub sha256: String,
    pub bytes: Vec<u8>,
}

impl RunArtifact {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            sha256: sha256_hex(&bytes),
            bytes,
        }
    }
}

/// One evaluation of one model, as stored by the experiment tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRun {
    pub id: Uuid,
    pub experiment: String,
    pub run_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub metrics: RegressionMetrics,
    /// SHA-256 of the evaluated artifact, so it can be compared with the
    /// artifact the server logs at startup
    pub artifact_sha256: String,
}

impl ExperimentRun {
    pub fn new(
        experiment: &str,
        run_name: &str,
        started_at: DateTime<Utc>,
        metrics: RegressionMetrics,
        artifact: &RunArtifact,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            experiment: experiment.to_string(),
            run_name: run_name.to_string(),
            started_at,
            finished_at: Utc::now(),
            metrics,
            artifact_sha256: artifact.sha256.clone(),
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
