//! Shared test fixtures.

use crate::advisor::{
    application_timing, classify, organic_options, primary_plan, secondary_plan,
    soil_recommendations, CostBreakdown,
};
use crate::models::{NewRecommendation, PredictionResult, Recommendation, SoilConditionAnalysis};

/// A fully populated recommendation for a one-hectare wheat field.
pub fn sample_recommendation() -> Recommendation {
    let prediction = PredictionResult {
        fertilizer: "Urea".into(),
        confidence: 87.5,
    };
    let condition = classify(6.5, 50.0, 20.0, 20.0, 150.0);
    Recommendation {
        primary_fertilizer: primary_plan(&prediction, 1.0, "Wheat", "Loamy"),
        secondary_fertilizer: secondary_plan(&condition, 1.0),
        organic_options: organic_options(1.0),
        application_timing: application_timing(),
        cost_estimate: CostBreakdown::for_area(1.0).to_estimate(),
        soil_condition_analysis: SoilConditionAnalysis {
            ph_status: condition.ph_status,
            recommendations: soil_recommendations(&condition),
            nutrient_deficiency: condition.deficiencies.clone(),
            moisture_status: condition.moisture_status,
        },
        ml_prediction: prediction,
    }
}

/// History input wrapping [`sample_recommendation`].
pub fn sample_input(field_name: &str) -> NewRecommendation {
    let recommendations = sample_recommendation();
    NewRecommendation {
        field_name: field_name.into(),
        field_size: 1.0,
        field_size_unit: "hectares".into(),
        crop_type: "Wheat".into(),
        soil_type: "Loamy".into(),
        soil_ph: 6.5,
        nitrogen: 20.0,
        phosphorus: 20.0,
        potassium: 150.0,
        temperature: 24.0,
        humidity: 55.0,
        soil_moisture: 50.0,
        ml_prediction: recommendations.ml_prediction.clone(),
        recommendations,
    }
}
