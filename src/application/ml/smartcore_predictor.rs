use super::predictor::PricePredictor;
use crate::domain::errors::ModelError;
use crate::domain::ml::feature_registry::default_feature_order;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::elastic_net::ElasticNet;
use smartcore::linear::linear_regression::LinearRegression;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use tracing::warn;

pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type ElasticNetModel = ElasticNet<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Fitted smartcore regressor, tagged by algorithm in the artifact
#[derive(Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "params", rename_all = "snake_case")]
pub enum Regressor {
    RandomForest(ForestModel),
    LinearRegression(LinearModel),
    ElasticNet(ElasticNetModel),
}

impl Regressor {
    pub fn algorithm(&self) -> &'static str {
        match self {
            Regressor::RandomForest(_) => "random_forest",
            Regressor::LinearRegression(_) => "linear_regression",
            Regressor::ElasticNet(_) => "elastic_net",
        }
    }

    fn predict_matrix(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>, String> {
        let result = match self {
            Regressor::RandomForest(m) => m.predict(x),
            Regressor::LinearRegression(m) => m.predict(x),
            Regressor::ElasticNet(m) => m.predict(x),
        };
        result.map_err(|e| e.to_string())
    }
}

/// On-disk model format: the fitted regressor plus its training-time
/// column order.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub regressor: Regressor,
}

impl ModelArtifact {
    pub fn new(feature_names: Vec<String>, regressor: Regressor) -> Self {
        Self {
            feature_names,
            regressor,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

pub struct SmartCorePredictor {
    regressor: Regressor,
    feature_names: Vec<String>,
    name: String,
}

impl SmartCorePredictor {
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        let feature_names = if artifact.feature_names.is_empty() {
            warn!("Model artifact carries no feature names. Assuming canonical feature order.");
            default_feature_order()
        } else {
            artifact.feature_names
        };
        let name = format!("SmartCore {}", artifact.regressor.algorithm());

        Self {
            regressor: artifact.regressor,
            feature_names,
            name,
        }
    }

    /// Deserialize a JSON artifact. `origin` only feeds the error message.
    pub fn from_slice(bytes: &[u8], origin: &Path) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            serde_json::from_slice(bytes).map_err(|e| ModelError::ModelLoadError {
                path: origin.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_artifact(artifact))
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|e| ModelError::ModelLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_slice(&bytes, path)
    }

    pub fn algorithm(&self) -> &'static str {
        self.regressor.algorithm()
    }

    /// Predict many rows at once, each aligned to `feature_names`.
    /// A panic inside the model is reported as an error.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, String> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = rows.iter().find(|r| r.len() != self.feature_names.len()) {
            return Err(format!(
                "Row has {} values, model expects {}",
                row.len(),
                self.feature_names.len()
            ));
        }

        let matrix = DenseMatrix::from_2d_vec(&rows.to_vec())
            .map_err(|e| format!("Matrix creation failed: {}", e))?;

        catch_unwind(AssertUnwindSafe(|| self.regressor.predict_matrix(&matrix)))
            .map_err(|_| "Model panicked during inference".to_string())?
    }
}

impl PricePredictor for SmartCorePredictor {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> Result<f64, String> {
        let predictions = self.predict_batch(&[row.to_vec()])?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| "No prediction returned".to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
