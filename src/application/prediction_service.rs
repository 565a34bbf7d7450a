use crate::application::ml::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::ml::{FeatureRecord, align_features};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Body of a successful `/predict` response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
}

/// Validate, align and invoke: the request path of the service.
///
/// Holds the model handle and its feature order, both captured once at
/// startup and never mutated.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn PricePredictor>,
    expected_features: Arc<[String]>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn PricePredictor>) -> Self {
        let expected_features: Arc<[String]> = model.feature_names().into();
        Self {
            model,
            expected_features,
        }
    }

    pub fn expected_features(&self) -> &[String] {
        &self.expected_features
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult, PredictionError> {
        record.validate()?;

        let row = align_features(record, &self.expected_features)?;

        let raw = self
            .model
            .predict(&row)
            .map_err(PredictionError::failure)?;

        let predicted_price = round_to_cents(raw);
        if !predicted_price.is_finite() {
            return Err(PredictionError::failure(format!(
                "model returned a non-finite value ({})",
                raw
            )));
        }
        debug!("Predicted {:.2} for {:?}", predicted_price, record);

        Ok(PredictionResult { predicted_price })
    }
}

/// Rounds on the exact decimal expansion, ties to even.
///
/// Scaling by 100 first would push values such as 2.67499... over the
/// half-cent boundary and overflow near `f64::MAX`.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::feature_registry::default_feature_order;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Weighted sum of the row; counts invocations
    struct MockPredictor {
        features: Vec<String>,
        calls: AtomicUsize,
        output: Option<f64>,
    }

    impl MockPredictor {
        fn new() -> Self {
            Self {
                features: default_feature_order(),
                calls: AtomicUsize::new(0),
                output: None,
            }
        }

        fn returning(value: f64) -> Self {
            Self {
                output: Some(value),
                ..Self::new()
            }
        }
    }

    impl PricePredictor for MockPredictor {
        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, row: &[f64]) -> Result<f64, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(value) = self.output {
                return Ok(value);
            }
            Ok(row
                .iter()
                .enumerate()
                .map(|(i, v)| v * (i as f64 + 1.0) * 1.001)
                .sum())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    struct FailingPredictor {
        features: Vec<String>,
    }

    impl PricePredictor for FailingPredictor {
        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, _row: &[f64]) -> Result<f64, String> {
            Err("numeric overflow".to_string())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn example_record() -> FeatureRecord {
        FeatureRecord {
            car_age: 5,
            mileage_kmpl: 15.0,
            engine_cc: 1300,
            owner_count: 1,
            brand: 5,
            accidents_reported: 0,
            fuel_type_petrol: 1,
            transmission_manual: 1,
            color_white: 1,
            insurance_valid_yes: 1,
            ..Default::default()
        }
    }

    fn has_at_most_two_decimals(value: f64) -> bool {
        ((value * 100.0).round() - value * 100.0).abs() < 1e-6
    }

    #[test]
    fn test_result_rounded_to_two_decimals() {
        let service = PredictionService::new(Arc::new(MockPredictor::new()));
        let result = service.predict(&example_record()).unwrap();

        assert!(result.predicted_price.is_finite());
        assert!(has_at_most_two_decimals(result.predicted_price));
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(12345.678), 12345.68);
        assert_eq!(round_to_cents(0.004), 0.0);
        assert_eq!(round_to_cents(-3.14159), -3.14);
    }

    #[test]
    fn test_round_to_cents_uses_stored_value_and_even_ties() {
        // 2.675 is stored just below the half cent
        assert_eq!(round_to_cents(2.675), 2.67);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(10000.125), 10000.12);
        assert_eq!(round_to_cents(12345.625), 12345.62);
    }

    #[test]
    fn test_service_rounds_model_output() {
        let service = PredictionService::new(Arc::new(MockPredictor::returning(2.675)));
        let result = service.predict(&example_record()).unwrap();
        assert_eq!(result.predicted_price, 2.67);
    }

    #[test]
    fn test_huge_finite_output_stays_finite() {
        let service = PredictionService::new(Arc::new(MockPredictor::returning(1e307)));
        let result = service.predict(&example_record()).unwrap();
        assert_eq!(result.predicted_price, 1e307);
        assert!(result.predicted_price.is_finite());
    }

    #[test]
    fn test_invalid_record_never_reaches_model() {
        let model = Arc::new(MockPredictor::new());
        let service = PredictionService::new(model.clone());

        let record = FeatureRecord {
            brand: 42,
            ..example_record()
        };
        let err = service.predict(&record).unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_error_becomes_prediction_failure() {
        let service = PredictionService::new(Arc::new(FailingPredictor {
            features: default_feature_order(),
        }));

        let err = service.predict(&example_record()).unwrap_err();
        assert_eq!(err, PredictionError::failure("numeric overflow"));
    }

    #[test]
    fn test_non_finite_output_is_failure() {
        let service = PredictionService::new(Arc::new(MockPredictor::returning(f64::NAN)));
        let err = service.predict(&example_record()).unwrap_err();
        assert!(matches!(err, PredictionError::PredictionFailure { .. }));
    }

    #[test]
    fn test_unknown_model_feature_is_mismatch() {
        let mut model = MockPredictor::new();
        model.features.push("seats".to_string());
        let model = Arc::new(model);
        let service = PredictionService::new(model.clone());

        let err = service.predict(&example_record()).unwrap_err();
        assert_eq!(
            err,
            PredictionError::FeatureMismatch {
                feature: "seats".to_string()
            }
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_repeated_requests_are_identical() {
        let service = PredictionService::new(Arc::new(MockPredictor::new()));
        let first = service.predict(&example_record()).unwrap();
        for _ in 0..10 {
            assert_eq!(service.predict(&example_record()).unwrap(), first);
        }
    }

    #[test]
    fn test_failure_does_not_poison_service() {
        let service = PredictionService::new(Arc::new(MockPredictor::new()));
        let bad = FeatureRecord {
            mileage_kmpl: -1.0,
            ..example_record()
        };
        assert!(service.predict(&bad).is_err());
        assert!(service.predict(&example_record()).is_ok());
    }
}
