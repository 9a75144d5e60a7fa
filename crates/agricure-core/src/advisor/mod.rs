//! Fertilizer recommendation advisor.
//!
//! Pipeline: Unit Conversion → Prediction → Soil Classification → Plan Composition

mod catalog;
mod classifier;
mod currency;
mod plans;
mod units;

pub use catalog::*;
pub use classifier::*;
pub use currency::*;
pub use plans::*;
pub use units::*;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{
    crop_name, soil_name, FieldSpec, Recommendation, SoilConditionAnalysis, SoilSample,
};
use crate::predict::{PredictionError, PredictionFeatures, Predictor};

/// Advisor errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Composes recommendations from form input and a predictor.
#[derive(Clone)]
pub struct Advisor {
    predictor: Arc<dyn Predictor>,
}

impl Advisor {
    /// Create an advisor backed by the given predictor.
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    /// Build a full recommendation.
    ///
    /// The prediction call is the only failure point; its error is returned
    /// unchanged and no partial recommendation is produced.
    pub async fn compose(
        &self,
        field: &FieldSpec,
        soil: &SoilSample,
        crop_type_code: i64,
        soil_type_code: i64,
    ) -> AdvisorResult<Recommendation> {
        // Step 1: Normalize the field area
        let hectares = field.hectares();

        // Step 2: Ask the model for the primary fertilizer
        let features = PredictionFeatures {
            temperature: soil.temperature,
            humidity: soil.humidity,
            moisture: soil.moisture,
            soil_type_code,
            crop_type_code,
            nitrogen: soil.nitrogen,
            potassium: soil.potassium,
            phosphorus: soil.phosphorus,
        };
        let prediction = self.predictor.predict(&features).await?;

        // Step 3: Classify soil conditions
        let condition = classify_sample(soil);

        // Step 4: Assemble the plan
        let crop = crop_name(crop_type_code);
        let soil_kind = soil_name(soil_type_code);

        let recommendation = Recommendation {
            primary_fertilizer: primary_plan(&prediction, hectares, crop, soil_kind),
            secondary_fertilizer: secondary_plan(&condition, hectares),
            organic_options: organic_options(hectares),
            application_timing: application_timing(),
            cost_estimate: CostBreakdown::for_area(hectares).to_estimate(),
            soil_condition_analysis: SoilConditionAnalysis {
                ph_status: condition.ph_status,
                recommendations: soil_recommendations(&condition),
                nutrient_deficiency: condition.deficiencies,
                moisture_status: condition.moisture_status,
            },
            ml_prediction: prediction,
        };

        tracing::debug!(
            field = %field.name,
            hectares,
            primary = %recommendation.primary_fertilizer.name,
            secondary = %recommendation.secondary_fertilizer.name,
            "Composed recommendation"
        );

        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MoistureStatus, Nutrient, PhStatus, PredictionResult};
    use crate::predict::{PredictionOutcome, RulePredictor};
    use async_trait::async_trait;

    struct FixedPredictor(&'static str);

    #[async_trait]
    impl Predictor for FixedPredictor {
        async fn predict(
            &self,
            _features: &PredictionFeatures,
        ) -> PredictionOutcome<PredictionResult> {
            Ok(PredictionResult {
                fertilizer: self.0.into(),
                confidence: 91.5,
            })
        }
    }

    struct DownPredictor;

    #[async_trait]
    impl Predictor for DownPredictor {
        async fn predict(
            &self,
            _features: &PredictionFeatures,
        ) -> PredictionOutcome<PredictionResult> {
            Err(PredictionError::Unavailable("connection refused".into()))
        }
    }

    fn sample() -> SoilSample {
        SoilSample {
            ph: 5.5,
            nitrogen: 20.0,
            phosphorus: 10.0,
            potassium: 150.0,
            moisture: 35.0,
            temperature: 27.0,
            humidity: 65.0,
        }
    }

    #[tokio::test]
    async fn test_compose_full_recommendation() {
        let advisor = Advisor::new(Arc::new(FixedPredictor("Urea")));
        let field = FieldSpec::new("East field", 10.0, "acres");

        let rec = advisor.compose(&field, &sample(), 3, 2).await.unwrap();

        assert_eq!(rec.primary_fertilizer.name, "Urea");
        assert_eq!(rec.primary_fertilizer.amount, "405 kg");
        assert_eq!(rec.secondary_fertilizer.name, "DAP");
        assert_eq!(rec.secondary_fertilizer.amount, "202 kg");
        assert_eq!(rec.organic_options.len(), 3);
        assert_eq!(rec.cost_estimate.total, "₹34,398");
        assert_eq!(rec.soil_condition_analysis.ph_status, PhStatus::Acidic);
        assert_eq!(rec.soil_condition_analysis.moisture_status, MoistureStatus::Low);
        assert_eq!(
            rec.soil_condition_analysis.nutrient_deficiency,
            vec![Nutrient::Nitrogen, Nutrient::Phosphorus]
        );
        assert_eq!(rec.ml_prediction.confidence, 91.5);
    }

    #[tokio::test]
    async fn test_compose_unknown_label_uses_crop_and_soil_names() {
        let advisor = Advisor::new(Arc::new(FixedPredictor("Super Grow")));
        let field = FieldSpec::new("Plot 7", 1.0, "hectares");

        let rec = advisor.compose(&field, &sample(), 6, 1).await.unwrap();
        assert_eq!(
            rec.primary_fertilizer.reason,
            "ML model recommends this fertilizer for Paddy in Clayey soil"
        );

        let rec = advisor.compose(&field, &sample(), 99, 99).await.unwrap();
        assert_eq!(
            rec.primary_fertilizer.reason,
            "ML model recommends this fertilizer for Unknown in Unknown soil"
        );
    }

    #[tokio::test]
    async fn test_compose_propagates_prediction_failure() {
        let advisor = Advisor::new(Arc::new(DownPredictor));
        let field = FieldSpec::new("East field", 2.0, "hectares");

        let err = advisor.compose(&field, &sample(), 3, 2).await.unwrap_err();
        assert_eq!(
            err,
            AdvisorError::Prediction(PredictionError::Unavailable("connection refused".into()))
        );
    }

    #[tokio::test]
    async fn test_compose_with_rule_predictor() {
        let advisor = Advisor::new(Arc::new(RulePredictor::new()));
        let field = FieldSpec::new("Home field", 5.0, "bigha");

        let rec = advisor.compose(&field, &sample(), 10, 2).await.unwrap();
        assert_eq!(rec.ml_prediction.fertilizer, "DAP");
        assert_eq!(rec.primary_fertilizer.amount, "67 kg");
    }
}
