//! Fits the candidate price models and writes their artifacts.
//!
//! Produces `linear_regression_model.json`, `random_forest_model.json`,
//! `elasticnet_model.json` plus the held-out `X_test.csv` / `y_test.csv`
//! consumed by the `evaluate` binary.

use anyhow::{Context, Result};
use autoprice::application::ml::trainer::train;
use autoprice::application::ml::{Algorithm, Dataset, TrainingParams};
use autoprice::domain::ml::feature_registry::schema_diff;
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the labelled training CSV
    #[arg(long, default_value = "data/used_cars.csv")]
    input: PathBuf,

    /// Name of the target column
    #[arg(long, default_value = "price")]
    target: String,

    /// Directory the artifacts and test split are written to
    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    /// Share of rows held out for evaluation (taken from the end of the file)
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 10)]
    max_depth: u16,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 5)]
    min_split: usize,

    /// ElasticNet regularization strength
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// ElasticNet mix between L1 (1.0) and L2 (0.0)
    #[arg(long, default_value_t = 0.5)]
    l1_ratio: f64,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();

    let data = Dataset::load(&args.input, &args.target)
        .with_context(|| format!("Failed to load training data from {:?}", args.input))?;
    info!(
        "Loaded {} rows with {} features from {:?}",
        data.len(),
        data.feature_names.len(),
        args.input
    );

    let diff = schema_diff(&data.feature_names);
    if !diff.unknown.is_empty() {
        warn!(
            "Columns the prediction API cannot supply: {:?}. Models trained on them will not serve.",
            diff.unknown
        );
    }

    let (train_set, test_set) = data.split(args.test_fraction)?;
    info!(
        "Split: {} training rows, {} test rows",
        train_set.len(),
        test_set.len()
    );

    std::fs::create_dir_all(&args.models_dir)
        .with_context(|| format!("Failed to create {:?}", args.models_dir))?;
    test_set.write_csv(
        &args.models_dir.join("X_test.csv"),
        &args.models_dir.join("y_test.csv"),
    )?;

    let params = TrainingParams {
        n_trees: args.n_trees,
        max_depth: args.max_depth,
        min_split: args.min_split,
        alpha: args.alpha,
        l1_ratio: args.l1_ratio,
    };

    for algorithm in Algorithm::ALL {
        let artifact = train(algorithm, &train_set, &params)?;
        let path = args.models_dir.join(algorithm.artifact_filename());
        std::fs::write(&path, artifact.to_json()?)
            .with_context(|| format!("Failed to write {:?}", path))?;
        println!("{:<18} -> {}", algorithm.run_name(), path.display());
    }

    Ok(())
}
