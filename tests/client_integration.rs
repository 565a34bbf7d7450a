mod common;

use autoprice::application::client::PredictionClient;
use autoprice::application::prediction_service::PredictionService;
use autoprice::domain::errors::ClientError;
use autoprice::domain::vehicle::{CarDetails, FuelType};
use autoprice::infrastructure::HttpClientFactory;
use autoprice::infrastructure::observability::Metrics;
use autoprice::interfaces::api::{AppState, router};
use common::MockPredictor;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_server(model: Arc<MockPredictor>) -> String {
    let state = AppState::new(PredictionService::new(model), Metrics::new().unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn client(base_url: &str) -> PredictionClient {
    PredictionClient::new(
        HttpClientFactory::create_api_client(Duration::from_secs(5)),
        base_url,
    )
}

#[tokio::test]
async fn test_form_details_round_trip_through_server() {
    let model = Arc::new(MockPredictor::returning(8_765.4321));
    let base_url = spawn_server(model.clone()).await;

    let details = CarDetails {
        fuel_type: FuelType::Electric,
        ..Default::default()
    };
    let price = client(&base_url)
        .predict(&details.to_feature_record())
        .await
        .unwrap();

    assert_eq!(price, 8_765.43);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_server_rejection_carries_status_and_body() {
    let model = Arc::new(MockPredictor::returning(1.0));
    let base_url = spawn_server(model.clone()).await;

    let mut record = CarDetails::default().to_feature_record();
    record.brand = 42;

    let err = client(&base_url).predict(&record).await.unwrap_err();
    match err {
        ClientError::Server { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("brand"));
        }
        other => panic!("expected a server error, got {:?}", other),
    }
    assert_eq!(model.call_count(), 0);
}
