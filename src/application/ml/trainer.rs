use super::smartcore_predictor::{ModelArtifact, Regressor};
use crate::application::evaluation::test_set::read_numeric_csv;
use anyhow::{Context, Result, anyhow, bail};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::elastic_net::{ElasticNet, ElasticNetParameters};
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use std::path::Path;
use tracing::info;

/// Hyperparameters for the three candidate regressors
#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_split: usize,
    pub alpha: f64,
    pub l1_ratio: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_split: 5,
            alpha: 1.0,
            l1_ratio: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    LinearRegression,
    RandomForest,
    ElasticNet,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::LinearRegression,
        Algorithm::RandomForest,
        Algorithm::ElasticNet,
    ];

    /// Artifact filename the evaluator and server look for
    pub fn artifact_filename(self) -> &'static str {
        match self {
            Algorithm::LinearRegression => "linear_regression_model.json",
            Algorithm::RandomForest => "random_forest_model.json",
            Algorithm::ElasticNet => "elasticnet_model.json",
        }
    }

    pub fn run_name(self) -> &'static str {
        match self {
            Algorithm::LinearRegression => "LinearRegression",
            Algorithm::RandomForest => "RandomForest",
            Algorithm::ElasticNet => "ElasticNet",
        }
    }
}

/// Labelled rows: feature columns plus one target column
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl Dataset {
    /// Reads a CSV whose `target` column is the label; every other column
    /// is a feature.
    pub fn load(path: &Path, target: &str) -> Result<Self> {
        let (headers, rows) = read_numeric_csv(path)?;
        let target_idx = headers
            .iter()
            .position(|h| h == target)
            .with_context(|| format!("{:?} has no '{}' column", path, target))?;

        let feature_names = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target_idx)
            .map(|(_, h)| h.clone())
            .collect();

        let mut features = Vec::with_capacity(rows.len());
        let mut targets = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                bail!("Row {} of {:?} has {} columns", i + 1, path, row.len());
            }
            targets.push(row[target_idx]);
            features.push(
                row.into_iter()
                    .enumerate()
                    .filter(|(j, _)| *j != target_idx)
                    .map(|(_, v)| v)
                    .collect(),
            );
        }

        if features.is_empty() {
            bail!("No rows in {:?}", path);
        }

        Ok(Self {
            feature_names,
            rows: features,
            targets,
        })
    }

    /// Ordered split: the last `test_fraction` of rows becomes the test set
    pub fn split(&self, test_fraction: f64) -> Result<(Dataset, Dataset)> {
        let n = self.rows.len();
        let test_len = ((n as f64) * test_fraction.clamp(0.0, 1.0)).round() as usize;
        let train_len = n - test_len;
        if train_len == 0 || test_len == 0 {
            bail!(
                "Cannot split {} rows with test fraction {}",
                n,
                test_fraction
            );
        }

        let part = |range: std::ops::Range<usize>| Dataset {
            feature_names: self.feature_names.clone(),
            rows: self.rows[range.clone()].to_vec(),
            targets: self.targets[range].to_vec(),
        };
        Ok((part(0..train_len), part(train_len..n)))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the features and the targets as two CSV files
    pub fn write_csv(&self, features_path: &Path, targets_path: &Path) -> Result<()> {
        let mut x = csv::Writer::from_path(features_path)
            .with_context(|| format!("Failed to create {:?}", features_path))?;
        x.write_record(&self.feature_names)?;
        for row in &self.rows {
            x.write_record(row.iter().map(|v| v.to_string()))?;
        }
        x.flush()?;

        let mut y = csv::Writer::from_path(targets_path)
            .with_context(|| format!("Failed to create {:?}", targets_path))?;
        y.write_record(["price"])?;
        for target in &self.targets {
            y.write_record([target.to_string()])?;
        }
        y.flush()?;
        Ok(())
    }
}

/// Fits one regressor on `data` and wraps it as a servable artifact
pub fn train(algorithm: Algorithm, data: &Dataset, params: &TrainingParams) -> Result<ModelArtifact> {
    let x = DenseMatrix::from_2d_vec(&data.rows).map_err(|e| anyhow!("Matrix error: {}", e))?;
    let y = &data.targets;

    let regressor = match algorithm {
        Algorithm::LinearRegression => Regressor::LinearRegression(
            LinearRegression::fit(&x, y, LinearRegressionParameters::default())
                .map_err(|e| anyhow!("Training error: {}", e))?,
        ),
        Algorithm::RandomForest => {
            let forest_params = RandomForestRegressorParameters::default()
                .with_n_trees(params.n_trees)
                .with_max_depth(params.max_depth)
                .with_min_samples_split(params.min_split);
            Regressor::RandomForest(
                RandomForestRegressor::fit(&x, y, forest_params)
                    .map_err(|e| anyhow!("Training error: {}", e))?,
            )
        }
        Algorithm::ElasticNet => {
            let net_params = ElasticNetParameters::default()
                .with_alpha(params.alpha)
                .with_l1_ratio(params.l1_ratio);
            Regressor::ElasticNet(
                ElasticNet::fit(&x, y, net_params).map_err(|e| anyhow!("Training error: {}", e))?,
            )
        }
    };

    info!(
        "Trained {} on {} rows x {} features",
        algorithm.run_name(),
        data.len(),
        data.feature_names.len()
    );
    Ok(ModelArtifact::new(data.feature_names.clone(), regressor))
}
