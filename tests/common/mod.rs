#![allow(dead_code)]

use autoprice::application::ml::{ModelArtifact, PricePredictor, Regressor};
use serde_json::{Value, json};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FIXTURE_FEATURES: [&str; 3] = ["car_age", "mileage_kmpl", "engine_cc"];

/// price = 20000 - 1000*age + 100*mileage + 2*engine
pub fn fixture_price(age: f64, mileage: f64, engine: f64) -> f64 {
    20_000.0 - 1_000.0 * age + 100.0 * mileage + 2.0 * engine
}

pub fn fixture_rows() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 20.0, 1000.0],
        vec![2.0, 15.0, 1200.0],
        vec![3.0, 18.0, 1500.0],
        vec![5.0, 12.0, 1300.0],
        vec![7.0, 25.0, 1800.0],
        vec![4.0, 10.0, 2000.0],
        vec![6.0, 16.0, 1100.0],
        vec![8.0, 22.0, 1600.0],
    ]
}

pub fn fixture_targets() -> Vec<f64> {
    fixture_rows()
        .iter()
        .map(|r| fixture_price(r[0], r[1], r[2]))
        .collect()
}

/// Linear model over three of the schema's features, serialized as an artifact
pub fn linear_artifact_json() -> Vec<u8> {
    let x = DenseMatrix::from_2d_vec(&fixture_rows()).unwrap();
    let model =
        LinearRegression::fit(&x, &fixture_targets(), LinearRegressionParameters::default())
            .unwrap();
    ModelArtifact::new(
        FIXTURE_FEATURES.iter().map(|s| s.to_string()).collect(),
        Regressor::LinearRegression(model),
    )
    .to_json()
    .unwrap()
}

pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// The record shown in the API documentation
pub fn example_payload() -> Value {
    json!({
        "car_age": 5,
        "mileage_kmpl": 15.0,
        "engine_cc": 1300,
        "owner_count": 1,
        "brand": 5,
        "accidents_reported": 0,
        "fuel_type_Electric": 0,
        "fuel_type_Petrol": 1,
        "transmission_Manual": 1,
        "color_Blue": 0,
        "color_Gray": 0,
        "color_Red": 0,
        "color_Silver": 0,
        "color_White": 1,
        "service_history_None": 0,
        "service_history_Partial": 0,
        "insurance_valid_Yes": 1
    })
}

/// Returns a fixed value (or an error) and counts invocations
pub struct MockPredictor {
    pub features: Vec<String>,
    pub calls: AtomicUsize,
    pub output: Result<f64, String>,
}

impl MockPredictor {
    pub fn returning(value: f64) -> Self {
        Self {
            features: autoprice::domain::ml::feature_registry::default_feature_order(),
            calls: AtomicUsize::new(0),
            output: Ok(value),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            output: Err(reason.to_string()),
            ..Self::returning(0.0)
        }
    }

    pub fn expecting(features: &[&str]) -> Self {
        Self {
            features: features.iter().map(|s| s.to_string()).collect(),
            ..Self::returning(1.0)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PricePredictor for MockPredictor {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, _row: &[f64]) -> Result<f64, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
