use crate::application::prediction_service::PredictionResult;
use crate::domain::errors::ClientError;
use crate::domain::ml::FeatureRecord;
use reqwest::Client;
use tracing::{info, warn};

/// HTTP client for the prediction service, used by the presentation layer.
/// Single attempt per call, no retries.
#[derive(Clone)]
pub struct PredictionClient {
    http: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    pub async fn predict(&self, record: &FeatureRecord) -> Result<f64, ClientError> {
        let url = self.predict_url();
        info!("Requesting price estimate from {}", url);

        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Prediction request rejected ({}): {}", status, body);
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let result: PredictionResult = response.json().await.map_err(|e| ClientError::Decode {
            reason: e.to_string(),
        })?;

        Ok(result.predicted_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_url_trims_trailing_slash() {
        let client = PredictionClient::new(Client::new(), "http://backend:8000/");
        assert_eq!(client.predict_url(), "http://backend:8000/predict");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Reserve a free port, then release it so nothing is listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = PredictionClient::new(Client::new(), format!("http://127.0.0.1:{}", port));
        let result = client.predict(&FeatureRecord::default()).await;
        assert!(matches!(result, Err(ClientError::Transport { .. })));
    }
}
