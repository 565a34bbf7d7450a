use crate::domain::experiment::{ExperimentRun, RunArtifact};
use crate::domain::performance::RegressionMetrics;
use crate::domain::repositories::ExperimentTracker;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

pub struct SqliteExperimentTracker {
    pool: SqlitePool,
}

impl SqliteExperimentTracker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).with_context(|| format!("Invalid timestamp {}", ms))
}

#[async_trait]
impl ExperimentTracker for SqliteExperimentTracker {
    async fn record_run(&self, run: &ExperimentRun, artifact: &RunArtifact) -> Result<()> {
        // All-or-nothing: a failure below rolls back when `tx` is dropped
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start run transaction")?;

        sqlx::query(
            r#"
            INSERT INTO runs
            (id, experiment, run_name, status, started_at, finished_at, samples, artifact_sha256)
            VALUES (?, ?, ?, 'FINISHED', ?, ?, ?, ?)
            "#,
        )
        .bind(run.id.to_string())
        .bind(&run.experiment)
        .bind(&run.run_name)
        .bind(run.started_at.timestamp_millis())
        .bind(run.finished_at.timestamp_millis())
        .bind(run.metrics.samples as i64)
        .bind(&run.artifact_sha256)
        .execute(&mut *tx)
        .await
        .context("Failed to save run")?;

        for (key, value) in run.metrics.as_pairs() {
            sqlx::query("INSERT INTO run_metrics (run_id, key, value) VALUES (?, ?, ?)")
                .bind(run.id.to_string())
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to save metric {}", key))?;
        }

        sqlx::query("INSERT INTO run_artifacts (run_id, name, sha256, content) VALUES (?, ?, ?, ?)")
            .bind(run.id.to_string())
            .bind(&artifact.name)
            .bind(&artifact.sha256)
            .bind(&artifact.bytes)
            .execute(&mut *tx)
            .await
            .context("Failed to save run artifact")?;

        tx.commit().await.context("Failed to commit run")?;
        Ok(())
    }

    async fn find_runs(&self, experiment: &str) -> Result<Vec<ExperimentRun>> {
        let rows = sqlx::query(
            "SELECT * FROM runs WHERE experiment = ? ORDER BY started_at DESC, rowid DESC",
        )
        .bind(experiment)
        .fetch_all(&self.pool)
        .await?;

        let mut runs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;

            let metric_rows = sqlx::query("SELECT key, value FROM run_metrics WHERE run_id = ?")
                .bind(&id)
                .fetch_all(&self.pool)
                .await?;

            let samples: i64 = row.try_get("samples")?;
            let mut metrics = RegressionMetrics {
                samples: samples as usize,
                ..Default::default()
            };
            for metric in metric_rows {
                let key: String = metric.try_get("key")?;
                let value: f64 = metric.try_get("value")?;
                match key.as_str() {
                    "mse" => metrics.mse = value,
                    "rmse" => metrics.rmse = value,
                    "mae" => metrics.mae = value,
                    "r2" => metrics.r2 = value,
                    _ => {}
                }
            }

            runs.push(ExperimentRun {
                id: Uuid::from_str(&id).context("Invalid run id")?,
                experiment: row.try_get("experiment")?,
                run_name: row.try_get("run_name")?,
                started_at: from_millis(row.try_get("started_at")?)?,
                finished_at: from_millis(row.try_get("finished_at")?)?,
                metrics,
                artifact_sha256: row.try_get("artifact_sha256")?,
            });
        }
        Ok(runs)
    }

    async fn load_artifact(&self, run_id: Uuid) -> Result<Option<RunArtifact>> {
        let row = sqlx::query("SELECT name, sha256, content FROM run_artifacts WHERE run_id = ?")
            .bind(run_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            Ok(Some(RunArtifact {
                name: row.try_get("name")?,
                sha256: row.try_get("sha256")?,
                bytes: row.try_get("content")?,
            }))
        } else {
            Ok(None)
        }
    }
}
