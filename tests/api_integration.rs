mod common;

use autoprice::application::ml::{PricePredictor, SmartCorePredictor};
use autoprice::application::prediction_service::PredictionService;
use autoprice::infrastructure::observability::Metrics;
use autoprice::interfaces::api::{AppState, WELCOME_MESSAGE, router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{MockPredictor, example_payload, fixture_price, linear_artifact_json};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(model: Arc<dyn PricePredictor>) -> (Router, Metrics) {
    let metrics = Metrics::new().unwrap();
    let state = AppState::new(PredictionService::new(model), metrics.clone());
    (router(state), metrics)
}

fn linear_app() -> Router {
    let predictor =
        SmartCorePredictor::from_slice(&linear_artifact_json(), Path::new("fixture.json")).unwrap();
    app_with(Arc::new(predictor)).0
}

async fn post_predict(app: &Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_returns_welcome_message() {
    let app = linear_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], WELCOME_MESSAGE);
}

#[tokio::test]
async fn test_example_record_yields_single_price() {
    let app = linear_app();
    let (status, body) = post_predict(&app, example_payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);

    let price = body["predicted_price"].as_f64().unwrap();
    assert!(price.is_finite());
    assert!(((price * 100.0).round() - price * 100.0).abs() < 1e-6);
    assert!((price - fixture_price(5.0, 15.0, 1300.0)).abs() < 1.0);
}

#[tokio::test]
async fn test_key_order_does_not_change_result() {
    let app = linear_app();
    let forward = example_payload().to_string();

    // Same fields, reversed order
    let map = example_payload().as_object().unwrap().clone();
    let reversed: Vec<String> = map
        .iter()
        .rev()
        .map(|(k, v)| format!("{}:{}", serde_json::to_string(k).unwrap(), v))
        .collect();
    let reversed = format!("{{{}}}", reversed.join(","));

    let (_, a) = post_predict(&app, forward).await;
    let (_, b) = post_predict(&app, reversed).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let app = linear_app();
    let (_, first) = post_predict(&app, example_payload().to_string()).await;
    for _ in 0..5 {
        let (_, again) = post_predict(&app, example_payload().to_string()).await;
        assert_eq!(first, again);
    }
}

#[tokio::test]
async fn test_malformed_payloads_never_reach_the_model() {
    let model = Arc::new(MockPredictor::returning(12_345.0));
    let (app, metrics) = app_with(model.clone());

    let mut missing = example_payload();
    missing.as_object_mut().unwrap().remove("brand");

    let mut wrong_type = example_payload();
    wrong_type["car_age"] = Value::String("five".to_string());

    let mut unknown = example_payload();
    unknown["wheel_count"] = Value::from(4);

    for payload in [missing, wrong_type, unknown] {
        let (status, body) = post_predict(&app, payload.to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    let (status, _) = post_predict(&app, "not json".to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(model.call_count(), 0);
    assert_eq!(metrics.predictions("invalid_input"), 4);
}

#[tokio::test]
async fn test_out_of_range_values_are_rejected() {
    let model = Arc::new(MockPredictor::returning(1.0));
    let (app, _) = app_with(model.clone());

    let mut payload = example_payload();
    payload["fuel_type_Electric"] = Value::from(1);

    let (status, body) = post_predict(&app, payload.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("fuel_type"));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_model_failure_is_500_and_service_keeps_serving() {
    let model = Arc::new(MockPredictor::failing("singular matrix"));
    let (app, metrics) = app_with(model.clone());

    let (status, body) = post_predict(&app, example_payload().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Prediction failed: singular matrix");

    let (status, _) = post_predict(&app, example_payload().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(model.call_count(), 2);
    assert_eq!(metrics.predictions("failure"), 2);
}

#[tokio::test]
async fn test_unknown_expected_feature_is_500() {
    let model = Arc::new(MockPredictor::expecting(&["car_age", "wheel_count"]));
    let (app, metrics) = app_with(model.clone());

    let (status, body) = post_predict(&app, example_payload().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("wheel_count"));
    assert_eq!(model.call_count(), 0);
    assert_eq!(metrics.predictions("feature_mismatch"), 1);
}
