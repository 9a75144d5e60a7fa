//! Recommendation history records.

use serde::{Deserialize, Serialize};

use super::{PredictionResult, Recommendation};

/// A recommendation about to be saved to a user's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecommendation {
    pub field_name: String,
    pub field_size: f64,
    pub field_size_unit: String,
    /// Crop display name (or the raw code when unknown)
    pub crop_type: String,
    /// Soil display name (or the raw code when unknown)
    pub soil_type: String,
    pub soil_ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub ml_prediction: PredictionResult,
    pub recommendations: Recommendation,
}

/// A saved recommendation, as listed in the history view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecommendation {
    /// Record ID (UUID)
    pub id: String,
    /// Owning user
    pub user_id: String,
    pub field_name: String,
    pub field_size: f64,
    pub field_size_unit: String,
    pub crop_type: String,
    pub soil_type: String,
    pub soil_ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub ml_prediction: PredictionResult,
    pub recommendations: Recommendation,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

impl StoredRecommendation {
    /// Build a stored record from a new recommendation.
    pub fn from_new(
        id: String,
        user_id: String,
        created_at: String,
        input: NewRecommendation,
    ) -> Self {
        Self {
            id,
            user_id,
            field_name: input.field_name,
            field_size: input.field_size,
            field_size_unit: input.field_size_unit,
            crop_type: input.crop_type,
            soil_type: input.soil_type,
            soil_ph: input.soil_ph,
            nitrogen: input.nitrogen,
            phosphorus: input.phosphorus,
            potassium: input.potassium,
            temperature: input.temperature,
            humidity: input.humidity,
            soil_moisture: input.soil_moisture,
            ml_prediction: input.ml_prediction,
            recommendations: input.recommendations,
            created_at,
        }
    }

    /// Confidence band of the stored prediction.
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.ml_prediction.confidence)
    }
}

/// Coarse confidence band shown next to a history entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// 90% and above
    High,
    /// 80% to 90%
    Medium,
    /// Below 80%
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 90.0 {
            ConfidenceBand::High
        } else if confidence >= 80.0 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        }
    }
}

/// Current UTC time in the fixed-width format used for ordering records.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
