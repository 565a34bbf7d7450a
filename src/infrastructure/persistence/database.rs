use anyhow::{Context, Result};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

/// Experiment tracking store
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(db_url: &str) -> Result<Self> {
        // Ensure the directory exists if it's a file path
        if let Some(path_part) = db_url.strip_prefix("sqlite://") {
            let path = Path::new(path_part);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)
                        .await
                        .context("Failed to create database directory")?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(db_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        info!("Connected to tracking database: {}", db_url);

        let db = Self { pool };
        db.init().await?;

        Ok(db)
    }

    /// Initialize database schema
    async fn init(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        // 1. Runs Table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS runs (
                id TEXT PRIMARY KEY,
                experiment TEXT NOT NULL,
                run_name TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'FINISHED',
                started_at INTEGER NOT NULL,
                finished_at INTEGER NOT NULL,
                samples INTEGER NOT NULL,
                artifact_sha256 TEXT NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create runs table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_runs_experiment_time
            ON runs (experiment, started_at);
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create runs index")?;

        // 2. Metrics Table (one row per metric key)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS run_metrics (
                run_id TEXT NOT NULL REFERENCES runs(id) ON DELETE CASCADE,
                key TEXT NOT NULL,
                value REAL NOT NULL,
                PRIMARY KEY (run_id, key)
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create run_metrics table")?;

        // 3. Artifacts Table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS run_artifacts (
                run_id TEXT NOT NULL REFERENCES runs(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                sha256 TEXT NOT NULL,
                content BLOB NOT NULL,
                PRIMARY KEY (run_id, name)
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create run_artifacts table")?;

        info!("Tracking schema initialized.");
        Ok(())
    }
}
