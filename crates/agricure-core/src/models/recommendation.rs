//! Recommendation models produced by the advisor.
//!
//! These serialize with camelCase keys so that stored history records keep
//! the same JSON layout the dashboard renders.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output of the fertilizer prediction model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Predicted fertilizer label (e.g. "Urea", "DAP", "17-17-17")
    pub fertilizer: String,
    /// Confidence score (0 - 100), uncalibrated
    pub confidence: f64,
}

/// Soil pH classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PhStatus {
    Acidic,
    Optimal,
    Alkaline,
}

impl PhStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhStatus::Acidic => "Acidic",
            PhStatus::Optimal => "Optimal",
            PhStatus::Alkaline => "Alkaline",
        }
    }
}

impl fmt::Display for PhStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Soil moisture classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MoistureStatus {
    Low,
    Optimal,
    High,
}

impl MoistureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureStatus::Low => "Low",
            MoistureStatus::Optimal => "Optimal",
            MoistureStatus::High => "High",
        }
    }
}

impl fmt::Display for MoistureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary macronutrients tracked for deficiencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "Nitrogen",
            Nutrient::Phosphorus => "Phosphorus",
            Nutrient::Potassium => "Potassium",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output for one soil sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilCondition {
    pub ph_status: PhStatus,
    pub moisture_status: MoistureStatus,
    /// Deficient nutrients, always in N, P, K order
    pub deficiencies: Vec<Nutrient>,
}

impl SoilCondition {
    /// Check whether a nutrient is deficient.
    pub fn is_deficient(&self, nutrient: Nutrient) -> bool {
        self.deficiencies.contains(&nutrient)
    }
}

/// A fertilizer application plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerPlan {
    pub name: String,
    /// Amount for the whole field, e.g. "40 kg"
    pub amount: String,
    pub reason: String,
    pub application_method: String,
}

/// An organic amendment suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganicOption {
    pub name: String,
    pub amount: String,
    pub benefits: String,
    pub application_timing: String,
}

/// When to apply each part of the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationTiming {
    pub primary: String,
    pub secondary: String,
    pub organic: String,
}

/// Currency-formatted cost estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostEstimate {
    pub primary: String,
    pub secondary: String,
    pub organic: String,
    pub total: String,
}

/// Soil analysis section of a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoilConditionAnalysis {
    pub ph_status: PhStatus,
    pub nutrient_deficiency: Vec<Nutrient>,
    pub moisture_status: MoistureStatus,
    pub recommendations: Vec<String>,
}

/// A complete fertilizer recommendation for one form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub primary_fertilizer: FertilizerPlan,
    pub secondary_fertilizer: FertilizerPlan,
    pub organic_options: Vec<OrganicOption>,
    pub application_timing: ApplicationTiming,
    pub cost_estimate: CostEstimate,
    pub soil_condition_analysis: SoilConditionAnalysis,
    pub ml_prediction: PredictionResult,
}
