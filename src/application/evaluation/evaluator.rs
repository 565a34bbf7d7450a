use super::test_set::TestSet;
use crate::application::ml::{Algorithm, PricePredictor, SmartCorePredictor};
use crate::domain::experiment::{ExperimentRun, RunArtifact};
use crate::domain::performance::RegressionMetrics;
use crate::domain::repositories::ExperimentTracker;
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// A saved model to evaluate, logged under `name`
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCandidate {
    pub name: String,
    pub path: PathBuf,
}

impl ModelCandidate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One candidate per trainable algorithm, read from `models_dir`
pub fn default_candidates(models_dir: &Path) -> Vec<ModelCandidate> {
    Algorithm::ALL
        .iter()
        .map(|a| ModelCandidate::new(a.run_name(), models_dir.join(a.artifact_filename())))
        .collect()
}

#[derive(Debug, Default)]
pub struct EvaluationSummary {
    pub completed: Vec<ExperimentRun>,
    pub failed: Vec<(String, String)>,
}

impl EvaluationSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Scores saved models against a test set and records one tracked run
/// per model.
pub struct ModelEvaluator {
    tracker: Arc<dyn ExperimentTracker>,
    experiment: String,
}

impl ModelEvaluator {
    pub fn new(tracker: Arc<dyn ExperimentTracker>, experiment: impl Into<String>) -> Self {
        Self {
            tracker,
            experiment: experiment.into(),
        }
    }

    /// Evaluate a single candidate. Nothing is recorded unless every step
    /// succeeds.
    pub async fn evaluate(
        &self,
        candidate: &ModelCandidate,
        test_set: &TestSet,
    ) -> Result<ExperimentRun> {
        let started_at = Utc::now();

        let bytes = tokio::fs::read(&candidate.path)
            .await
            .with_context(|| format!("Failed to read model file {:?}", candidate.path))?;
        let predictor = SmartCorePredictor::from_slice(&bytes, &candidate.path)?;

        let rows = test_set
            .rows_in_order(predictor.feature_names())
            .with_context(|| format!("Test set does not fit {}", candidate.name))?;
        let predictions = predictor
            .predict_batch(&rows)
            .map_err(|e| anyhow!("Prediction failed for {}: {}", candidate.name, e))?;

        let metrics = RegressionMetrics::calculate(&predictions, &test_set.targets)
            .context("Predictions do not line up with targets")?;

        let artifact = RunArtifact::new(candidate.name.clone(), bytes);
        let run = ExperimentRun::new(
            &self.experiment,
            &candidate.name,
            started_at,
            metrics,
            &artifact,
        );

        self.tracker
            .record_run(&run, &artifact)
            .await
            .with_context(|| format!("Failed to record run {}", candidate.name))?;

        info!(
            "{} ({}): MSE={:.2} RMSE={:.2} MAE={:.2} R2={:.4}",
            candidate.name,
            predictor.algorithm(),
            metrics.mse,
            metrics.rmse,
            metrics.mae,
            metrics.r2
        );

        Ok(run)
    }

    /// Evaluate every candidate. A failing candidate is reported and
    /// skipped; runs recorded before it are left untouched.
    pub async fn evaluate_all(
        &self,
        candidates: &[ModelCandidate],
        test_set: &TestSet,
    ) -> EvaluationSummary {
        let mut summary = EvaluationSummary::default();

        for candidate in candidates {
            match self.evaluate(candidate, test_set).await {
                Ok(run) => summary.completed.push(run),
                Err(e) => {
                    error!("Run {} aborted: {:#}", candidate.name, e);
                    summary.failed.push((candidate.name.clone(), format!("{:#}", e)));
                }
            }
        }

        summary
    }
}
