//! Mock predictor for testing without an endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use agricure_core::models::PredictionResult;
use agricure_core::predict::{PredictionError, PredictionFeatures, PredictionOutcome, Predictor};
use async_trait::async_trait;

/// Predictor returning a fixed outcome and recording its calls.
pub struct MockPredictor {
    outcome: PredictionOutcome<PredictionResult>,
    calls: AtomicUsize,
    last_features: Mutex<Option<PredictionFeatures>>,
}

impl MockPredictor {
    /// Always predict `fertilizer` with `confidence`.
    pub fn returning(fertilizer: &str, confidence: f64) -> Self {
        Self::with_outcome(Ok(PredictionResult {
            fertilizer: fertilizer.to_string(),
            confidence,
        }))
    }

    /// Always fail as an unreachable endpoint would.
    pub fn failing(reason: &str) -> Self {
        Self::with_outcome(Err(PredictionError::Unavailable(reason.to_string())))
    }

    fn with_outcome(outcome: PredictionOutcome<PredictionResult>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_features: Mutex::new(None),
        }
    }

    /// Number of predictions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Features of the most recent call.
    pub fn last_features(&self) -> Option<PredictionFeatures> {
        self.last_features.lock().ok().and_then(|f| *f)
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(&self, features: &PredictionFeatures) -> PredictionOutcome<PredictionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_features.lock() {
            *last = Some(*features);
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> PredictionFeatures {
        PredictionFeatures {
            temperature: 25.0,
            humidity: 60.0,
            moisture: 45.0,
            soil_type_code: 2,
            crop_type_code: 10,
            nitrogen: 20.0,
            potassium: 150.0,
            phosphorus: 20.0,
        }
    }

    #[tokio::test]
    async fn test_returning() {
        let mock = MockPredictor::returning("Urea", 88.0);
        let result = mock.predict(&features()).await.unwrap();
        assert_eq!(result.fertilizer, "Urea");
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_features(), Some(features()));
    }

    #[tokio::test]
    async fn test_failing() {
        let mock = MockPredictor::failing("connection refused");
        assert_eq!(
            mock.predict(&features()).await,
            Err(PredictionError::Unavailable("connection refused".into()))
        );
        mock.predict(&features()).await.unwrap_err();
        assert_eq!(mock.calls(), 2);
    }
}
