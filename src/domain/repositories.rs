//! Repository Pattern Abstractions
//!
//! The experiment tracker stores one record per evaluated model: its
//! metrics and the artifact that produced them.
//!
//! # Current Implementation
//!
//! `SqliteExperimentTracker` writes each run in a single transaction so a
//! failing run never leaves partial rows next to earlier runs.

use crate::domain::experiment::{ExperimentRun, RunArtifact};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ExperimentTracker: Send + Sync {
    /// Persist a finished run together with its artifact
    async fn record_run(&self, run: &ExperimentRun, artifact: &RunArtifact) -> Result<()>;

    /// Runs of an experiment, most recent first
    async fn find_runs(&self, experiment: &str) -> Result<Vec<ExperimentRun>>;

    /// Load the artifact stored with a run
    async fn load_artifact(&self, run_id: uuid::Uuid) -> Result<Option<RunArtifact>>;
}
