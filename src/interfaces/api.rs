//! HTTP surface of the prediction service.
//!
//! `GET /` answers a welcome message, `POST /predict` turns a Feature Record
//! into a price. Errors come back as `{"detail": "..."}`.

use crate::application::prediction_service::{PredictionResult, PredictionService};
use crate::domain::errors::PredictionError;
use crate::domain::ml::FeatureRecord;
use crate::infrastructure::observability::Metrics;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, warn};

pub const WELCOME_MESSAGE: &str = "Welcome to the Used Car Price Prediction API";

#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(service: PredictionService, metrics: Metrics) -> Self {
        metrics
            .model_features
            .set(service.expected_features().len() as f64);
        Self { service, metrics }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<FeatureRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, PredictionError> {
    let Json(record) = payload.map_err(|rejection| {
        state.metrics.inc_predictions(OUTCOME_INVALID);
        warn!("Rejected prediction request: {}", rejection.body_text());
        PredictionError::invalid(rejection.body_text())
    })?;

    let started = Instant::now();
    let result = state.service.predict(&record);
    state
        .metrics
        .observe_latency(state.service.model_name(), started.elapsed().as_secs_f64());

    match result {
        Ok(prediction) => {
            state.metrics.inc_predictions(OUTCOME_OK);
            debug!("Predicted price {:.2}", prediction.predicted_price);
            Ok(Json(prediction))
        }
        Err(e) => {
            state.metrics.inc_predictions(outcome(&e));
            warn!("Prediction request failed: {}", e);
            Err(e)
        }
    }
}

const OUTCOME_OK: &str = "ok";
const OUTCOME_INVALID: &str = "invalid_input";

fn outcome(error: &PredictionError) -> &'static str {
    match error {
        PredictionError::InvalidInput { .. } => OUTCOME_INVALID,
        PredictionError::FeatureMismatch { .. } => "feature_mismatch",
        PredictionError::PredictionFailure { .. } => "failure",
    }
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let detail = match &self {
            PredictionError::InvalidInput { reason } => reason.clone(),
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
