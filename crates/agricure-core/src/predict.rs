//! Fertilizer prediction seam.
//!
//! The advisor only sees the [`Predictor`] trait. [`RulePredictor`] is the
//! built-in rule table; a hosted model can be plugged in without touching the
//! composer (see the `agricure-ml` crate).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PredictionResult;

/// Prediction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Prediction unavailable: {0}")]
    Unavailable(String),
}

pub type PredictionOutcome<T> = Result<T, PredictionError>;

/// Model input features.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionFeatures {
    pub temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    #[serde(rename = "soilType")]
    pub soil_type_code: i64,
    #[serde(rename = "cropType")]
    pub crop_type_code: i64,
    pub nitrogen: f64,
    pub potassium: f64,
    pub phosphorus: f64,
}

impl PredictionFeatures {
    /// Check that every numeric feature is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.temperature,
            self.humidity,
            self.moisture,
            self.nitrogen,
            self.potassium,
            self.phosphorus,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Something that maps soil/crop features to a fertilizer label.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &PredictionFeatures) -> PredictionOutcome<PredictionResult>;
}

/// Sufficiency thresholds (mg/kg) the rule table is anchored on.
const NITROGEN_REFERENCE: f64 = 30.0;
const PHOSPHORUS_REFERENCE: f64 = 15.0;
const POTASSIUM_REFERENCE: f64 = 120.0;

const BASE_CONFIDENCE: f64 = 70.0;
const MARGIN_WEIGHT: f64 = 25.0;
const MIN_CONFIDENCE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 98.0;

/// Deterministic rule-based predictor.
///
/// Picks a fertilizer grade from the set of nutrients below their sufficiency
/// reference. Confidence grows with how far the readings sit from the
/// references, since borderline samples are the ambiguous ones.
#[derive(Debug, Clone, Default)]
pub struct RulePredictor;

impl RulePredictor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of the rule table.
    pub fn evaluate(&self, features: &PredictionFeatures) -> PredictionOutcome<PredictionResult> {
        if !features.is_finite() {
            return Err(PredictionError::Unavailable(
                "features contain non-numeric values".into(),
            ));
        }

        let ratios = [
            features.nitrogen / NITROGEN_REFERENCE,
            features.phosphorus / PHOSPHORUS_REFERENCE,
            features.potassium / POTASSIUM_REFERENCE,
        ];
        let low_n = ratios[0] < 1.0;
        let low_p = ratios[1] < 1.0;
        let low_k = ratios[2] < 1.0;

        let fertilizer = match (low_n, low_p, low_k) {
            (false, false, false) => "20-20",
            (true, false, false) => "Urea",
            (false, true, false) => "14-35-14",
            (false, false, true) => "10-26-26",
            (true, true, false) => "DAP",
            (true, false, true) => "28-28",
            (false, true, true) => "10-26-26",
            (true, true, true) => "17-17-17",
        };

        let margin = (ratios.iter().map(|r| (r - 1.0).abs()).sum::<f64>() / 3.0).min(1.0);
        let confidence =
            (BASE_CONFIDENCE + MARGIN_WEIGHT * margin).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

        Ok(PredictionResult {
            fertilizer: fertilizer.to_string(),
            confidence: (confidence * 10.0).round() / 10.0,
        })
    }
}

#[async_trait]
impl Predictor for RulePredictor {
    async fn predict(&self, features: &PredictionFeatures) -> PredictionOutcome<PredictionResult> {
        let result = self.evaluate(features)?;
        tracing::debug!(
            fertilizer = %result.fertilizer,
            confidence = result.confidence,
            "Rule predictor result"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(nitrogen: f64, phosphorus: f64, potassium: f64) -> PredictionFeatures {
        PredictionFeatures {
            temperature: 26.0,
            humidity: 52.0,
            moisture: 45.0,
            soil_type_code: 2,
            crop_type_code: 3,
            nitrogen,
            potassium,
            phosphorus,
        }
    }

    #[test]
    fn test_rule_table() {
        let predictor = RulePredictor::new();
        let label = |n, p, k| predictor.evaluate(&features(n, p, k)).unwrap().fertilizer;

        assert_eq!(label(40.0, 20.0, 150.0), "20-20");
        assert_eq!(label(10.0, 20.0, 150.0), "Urea");
        assert_eq!(label(40.0, 5.0, 150.0), "14-35-14");
        assert_eq!(label(40.0, 20.0, 50.0), "10-26-26");
        assert_eq!(label(10.0, 5.0, 150.0), "DAP");
        assert_eq!(label(10.0, 20.0, 50.0), "28-28");
        assert_eq!(label(40.0, 5.0, 50.0), "10-26-26");
        assert_eq!(label(10.0, 5.0, 50.0), "17-17-17");
    }

    #[test]
    fn test_thresholds_are_sufficient() {
        let predictor = RulePredictor::new();
        let result = predictor.evaluate(&features(30.0, 15.0, 120.0)).unwrap();
        assert_eq!(result.fertilizer, "20-20");
        // All ratios exactly at the reference: no margin.
        assert_eq!(result.confidence, 70.0);
    }

    #[test]
    fn test_confidence_is_bounded() {
        let predictor = RulePredictor::new();
        let result = predictor.evaluate(&features(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(result.confidence, 95.0);

        let result = predictor.evaluate(&features(900.0, 900.0, 9000.0)).unwrap();
        assert!(result.confidence <= MAX_CONFIDENCE);
        assert!(result.confidence >= MIN_CONFIDENCE);
    }

    #[test]
    fn test_non_finite_features_fail() {
        let predictor = RulePredictor::new();
        let result = predictor.evaluate(&features(f64::NAN, 10.0, 10.0));
        assert!(matches!(result, Err(PredictionError::Unavailable(_))));
    }

    #[test]
    fn test_features_serialize_with_model_keys() {
        let json = serde_json::to_value(features(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json["soilType"], 2);
        assert_eq!(json["cropType"], 3);
        assert_eq!(json["phosphorus"], 2.0);
    }

    #[tokio::test]
    async fn test_predict_is_deterministic() {
        let predictor = RulePredictor::new();
        let a = predictor.predict(&features(12.0, 9.0, 100.0)).await.unwrap();
        let b = predictor.predict(&features(12.0, 9.0, 100.0)).await.unwrap();
        assert_eq!(a, b);
    }
}
