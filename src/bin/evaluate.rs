//! Offline evaluation of saved price models.
//!
//! Scores each model artifact against `X_test.csv` / `y_test.csv` and
//! records the metrics plus the artifact in a SQLite experiment store.
//!
//! # Usage
//! ```sh
//! cargo run --bin evaluate -- --models-dir models
//! cargo run --bin evaluate -- --model RandomForest=models/rf.json
//! cargo run --bin evaluate -- --list
//! ```

use anyhow::{Context, Result, anyhow};
use autoprice::application::evaluation::{
    ModelCandidate, ModelEvaluator, TestSet, default_candidates,
};
use autoprice::domain::repositories::ExperimentTracker;
use autoprice::infrastructure::persistence::{Database, SqliteExperimentTracker};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding X_test.csv, y_test.csv and the model artifacts
    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    /// SQLite database that stores the tracked runs
    #[arg(long, default_value = "sqlite://data/tracking.db")]
    tracking_db: String,

    /// Experiment the runs are grouped under
    #[arg(long, default_value = "car-price")]
    experiment: String,

    /// Model to evaluate as NAME=FILE. Repeatable; defaults to the
    /// LinearRegression, RandomForest and ElasticNet artifacts in --models-dir
    #[arg(long = "model", value_parser = parse_candidate)]
    models: Vec<ModelCandidate>,

    /// Print the runs already recorded for the experiment and exit
    #[arg(long)]
    list: bool,
}

fn parse_candidate(value: &str) -> Result<ModelCandidate, String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FILE, got '{}'", value))?;
    if name.trim().is_empty() || path.trim().is_empty() {
        return Err(format!("expected NAME=FILE, got '{}'", value));
    }
    Ok(ModelCandidate::new(name.trim(), path.trim()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();

    let db = Database::new(&args.tracking_db).await?;
    let tracker: Arc<dyn ExperimentTracker> = Arc::new(SqliteExperimentTracker::new(db.pool));

    if args.list {
        let runs = tracker.find_runs(&args.experiment).await?;
        if runs.is_empty() {
            println!("No runs recorded for experiment '{}'", args.experiment);
        }
        for run in runs {
            println!(
                "{}  {:<18} MSE={:.2} RMSE={:.2} MAE={:.2} R2={:.4}  sha256={}  ({})",
                run.started_at.format("%Y-%m-%d %H:%M:%S"),
                run.run_name,
                run.metrics.mse,
                run.metrics.rmse,
                run.metrics.mae,
                run.metrics.r2,
                run.artifact_sha256,
                run.id
            );
        }
        return Ok(());
    }

    let test_set = TestSet::load(
        &args.models_dir.join("X_test.csv"),
        &args.models_dir.join("y_test.csv"),
    )
    .context("Failed to load the test set")?;
    info!(
        "Loaded {} test rows with {} features",
        test_set.len(),
        test_set.feature_names.len()
    );

    let candidates = if args.models.is_empty() {
        default_candidates(&args.models_dir)
    } else {
        args.models.clone()
    };

    let evaluator = ModelEvaluator::new(tracker, args.experiment.clone());
    let summary = evaluator.evaluate_all(&candidates, &test_set).await;

    for run in &summary.completed {
        println!("\n{} Metrics", run.run_name);
        for (key, value) in run.metrics.as_pairs() {
            println!("  {:<5} {:.4}", format!("{}:", key.to_uppercase()), value);
        }
        println!("  run:  {}", run.id);
    }

    if !summary.all_succeeded() {
        for (name, reason) in &summary.failed {
            warn!("{} was not recorded: {}", name, reason);
        }
        return Err(anyhow!(
            "{} of {} evaluations failed",
            summary.failed.len(),
            candidates.len()
        ));
    }

    info!(
        "Recorded {} runs under experiment '{}'",
        summary.completed.len(),
        args.experiment
    );
    Ok(())
}
