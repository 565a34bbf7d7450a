use super::predictor::PricePredictor;
use super::smartcore_predictor::SmartCorePredictor;
use crate::domain::errors::ModelError;
use crate::domain::experiment::sha256_hex;
use crate::domain::ml::feature_registry::schema_diff;
use crate::domain::ports::ArtifactFetcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// A model ready to serve, with the fingerprint of the artifact it came from
pub struct LoadedModel {
    pub predictor: Arc<dyn PricePredictor>,
    pub artifact_path: PathBuf,
    pub sha256: String,
}

/// Turns a local filename into a model handle, downloading the artifact
/// first when the local cache is empty.
pub struct ModelLoader {
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl ModelLoader {
    pub fn new(fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn load(&self, path: &Path) -> Result<LoadedModel, ModelError> {
        if !path.exists() {
            info!(
                "Model file {:?} not found locally. Downloading from {}",
                path,
                self.fetcher.source()
            );
            self.fetcher.fetch(path).await.map_err(|reason| {
                error!("Failed to download model: {}", reason);
                ModelError::ModelUnavailable {
                    source_url: self.fetcher.source().to_string(),
                    reason,
                }
            })?;
            info!("Model downloaded to {:?}", path);
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ModelError::ModelLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let sha256 = sha256_hex(&bytes);

        let predictor = SmartCorePredictor::from_slice(&bytes, path).inspect_err(|e| {
            error!("Failed to load model: {}", e);
        })?;

        info!(
            "Successfully loaded {} from {:?} (sha256 {})",
            predictor.name(),
            path,
            sha256
        );
        info!("Model expects: {:?}", predictor.feature_names());

        let diff = schema_diff(predictor.feature_names());
        if !diff.unknown.is_empty() {
            warn!(
                "Model expects features the request schema does not provide: {:?}. \
                 Predictions will fail with a feature mismatch.",
                diff.unknown
            );
        }
        if !diff.unused.is_empty() {
            warn!("Request fields ignored by the model: {:?}", diff.unused);
        }

        Ok(LoadedModel {
            predictor: Arc::new(predictor),
            artifact_path: path.to_path_buf(),
            sha256,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::smartcore_predictor::{ModelArtifact, Regressor};
    use async_trait::async_trait;
    use smartcore::linalg::basic::matrix::DenseMatrix;
    use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingFetcher;

    #[async_trait]
    impl ArtifactFetcher for FailingFetcher {
        fn source(&self) -> &str {
            "https://storage.invalid/model.json"
        }

        async fn fetch(&self, _destination: &Path) -> Result<(), String> {
            Err("connection refused".to_string())
        }
    }

    struct WritingFetcher {
        bytes: Vec<u8>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ArtifactFetcher for WritingFetcher {
        fn source(&self) -> &str {
            "memory"
        }

        async fn fetch(&self, destination: &Path) -> Result<(), String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::fs::write(destination, &self.bytes)
                .await
                .map_err(|e| e.to_string())
        }
    }

    fn artifact_bytes() -> Vec<u8> {
        let x = DenseMatrix::from_2d_vec(&vec![
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![3.0, 4.0],
            vec![4.0, 3.0],
            vec![5.0, 6.0],
        ])
        .unwrap();
        let y = vec![9.0, 8.0, 19.0, 18.0, 29.0];
        let model = LinearRegression::fit(&x, &y, LinearRegressionParameters::default()).unwrap();
        ModelArtifact::new(
            vec!["car_age".to_string(), "brand".to_string()],
            Regressor::LinearRegression(model),
        )
        .to_json()
        .unwrap()
    }

    fn temp_model_path() -> PathBuf {
        std::env::temp_dir().join(format!("autoprice_loader_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_file_and_failed_fetch_is_unavailable() {
        let loader = ModelLoader::new(Arc::new(FailingFetcher));
        let path = temp_model_path();

        let result = loader.load(&path).await;
        match result {
            Err(ModelError::ModelUnavailable { source_url, reason }) => {
                assert!(source_url.contains("storage.invalid"));
                assert_eq!(reason, "connection refused");
            }
            _ => panic!("expected ModelUnavailable"),
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_downloads_once_then_uses_cache() {
        let fetcher = Arc::new(WritingFetcher {
            bytes: artifact_bytes(),
            calls: AtomicUsize::new(0),
        });
        let loader = ModelLoader::new(fetcher.clone());
        let path = temp_model_path();

        let first = loader.load(&path).await.unwrap();
        let second = loader.load(&path).await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.sha256, second.sha256);
        assert_eq!(
            first.predictor.feature_names(),
            &["car_age".to_string(), "brand".to_string()]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_load_error() {
        let path = temp_model_path();
        std::fs::write(&path, b"{ truncated").unwrap();

        let loader = ModelLoader::new(Arc::new(FailingFetcher));
        let result = loader.load(&path).await;
        assert!(matches!(result, Err(ModelError::ModelLoadError { .. })));

        let _ = std::fs::remove_file(&path);
    }
}
