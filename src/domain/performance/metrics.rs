use serde::{Deserialize, Serialize};

/// Regression error metrics for one model on one test set
///
/// Computed from paired predictions and actual targets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    /// Coefficient of determination. 0.0 when the target has no variance.
    pub r2: f64,
    pub samples: usize,
}

impl RegressionMetrics {
    /// Calculate metrics from predictions and actual values
    ///
    /// # Arguments
    /// * `predictions` - Model outputs, one per test row
    /// * `actuals` - Ground-truth targets, same length as `predictions`
    ///
    /// Returns `None` when the inputs are empty or of different lengths.
    pub fn calculate(predictions: &[f64], actuals: &[f64]) -> Option<Self> {
        if predictions.is_empty() || predictions.len() != actuals.len() {
            return None;
        }
        let n = predictions.len() as f64;

        let sq_err: f64 = predictions
            .iter()
            .zip(actuals.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum();
        let abs_err: f64 = predictions
            .iter()
            .zip(actuals.iter())
            .map(|(p, t)| (p - t).abs())
            .sum();

        let mse = sq_err / n;
        let mean_y = actuals.iter().sum::<f64>() / n;
        let var_y = actuals.iter().map(|t| (t - mean_y).powi(2)).sum::<f64>() / n;
        // Constant target: a perfect fit scores 1, anything else 0
        let r2 = if var_y > 0.0 {
            1.0 - mse / var_y
        } else if mse == 0.0 {
            1.0
        } else {
            0.0
        };

        Some(Self {
            mse,
            rmse: mse.sqrt(),
            mae: abs_err / n,
            r2,
            samples: predictions.len(),
        })
    }

    /// Named metric values in the order they are recorded
    pub fn as_pairs(&self) -> [(&'static str, f64); 4] {
        [
            ("mse", self.mse),
            ("rmse", self.rmse),
            ("mae", self.mae),
            ("r2", self.r2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let y = [1.0, 2.0, 3.0];
        let m = RegressionMetrics::calculate(&y, &y).unwrap();
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.r2, 1.0);
        assert_eq!(m.samples, 3);
    }

    #[test]
    fn test_known_errors() {
        let pred = [2.0, 2.0, 5.0, 5.0];
        let actual = [1.0, 3.0, 4.0, 6.0];
        let m = RegressionMetrics::calculate(&pred, &actual).unwrap();

        assert!((m.mse - 1.0).abs() < 1e-12);
        assert!((m.rmse - 1.0).abs() < 1e-12);
        assert!((m.mae - 1.0).abs() < 1e-12);
        // var(actual) = 3.25
        assert!((m.r2 - (1.0 - 1.0 / 3.25)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target_r2() {
        let m = RegressionMetrics::calculate(&[1.0, 2.0], &[5.0, 5.0]).unwrap();
        assert_eq!(m.r2, 0.0);

        let exact = RegressionMetrics::calculate(&[5.0, 5.0], &[5.0, 5.0]).unwrap();
        assert_eq!(exact.r2, 1.0);
    }

    #[test]
    fn test_rejects_mismatched_inputs() {
        assert!(RegressionMetrics::calculate(&[], &[]).is_none());
        assert!(RegressionMetrics::calculate(&[1.0], &[1.0, 2.0]).is_none());
    }
}
