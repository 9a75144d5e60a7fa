//! Plan templates: amounts, costs and advice text scaled by field area.

use crate::models::{
    ApplicationTiming, CostEstimate, FertilizerPlan, MoistureStatus, Nutrient, OrganicOption,
    PhStatus, PredictionResult, SoilCondition,
};

use super::catalog::fertilizer_info;
use super::currency::{format_inr, round_half_up};

/// Application rates in kg per hectare.
pub const PRIMARY_RATE_KG: f64 = 100.0;
pub const DAP_RATE_KG: f64 = 50.0;
pub const POTASSIUM_SULFATE_RATE_KG: f64 = 40.0;
pub const COMPOST_RATE_KG: f64 = 1000.0;
pub const VERMICOMPOST_RATE_KG: f64 = 1000.0;
pub const NEEM_CAKE_RATE_KG: f64 = 200.0;
pub const BONE_MEAL_RATE_KG: f64 = 150.0;

/// Costs in rupees per hectare.
pub const PRIMARY_COST_PER_HA: f64 = 4000.0;
pub const SECONDARY_COST_PER_HA: f64 = 2500.0;
pub const ORGANIC_COST_PER_HA: f64 = 2000.0;

/// Whole-field amount string, e.g. "162 kg".
pub fn amount_kg(rate_per_ha: f64, hectares: f64) -> String {
    format!("{} kg", round_half_up(rate_per_ha * hectares))
}

/// Primary plan from the predicted fertilizer.
///
/// Labels missing from the reference table get generic text naming the crop
/// and soil.
pub fn primary_plan(
    prediction: &PredictionResult,
    hectares: f64,
    crop: &str,
    soil: &str,
) -> FertilizerPlan {
    let (reason, application_method) = match fertilizer_info(&prediction.fertilizer) {
        Some(info) => (info.description.to_string(), info.application.to_string()),
        None => {
            tracing::warn!(
                fertilizer = %prediction.fertilizer,
                "Predicted fertilizer missing from reference table, using generic text"
            );
            (
                format!("ML model recommends this fertilizer for {} in {} soil", crop, soil),
                "Apply as per standard agricultural practices".to_string(),
            )
        }
    };

    FertilizerPlan {
        name: prediction.fertilizer.clone(),
        amount: amount_kg(PRIMARY_RATE_KG, hectares),
        reason,
        application_method,
    }
}

/// Secondary plan: phosphorus deficiency first, then potassium, else compost.
pub fn secondary_plan(condition: &SoilCondition, hectares: f64) -> FertilizerPlan {
    if condition.is_deficient(Nutrient::Phosphorus) {
        FertilizerPlan {
            name: "DAP".into(),
            amount: amount_kg(DAP_RATE_KG, hectares),
            reason: "Addresses phosphorus deficiency identified in soil analysis".into(),
            application_method: "Apply as basal dose during soil preparation".into(),
        }
    } else if condition.is_deficient(Nutrient::Potassium) {
        FertilizerPlan {
            name: "Potassium sulfate".into(),
            amount: amount_kg(POTASSIUM_SULFATE_RATE_KG, hectares),
            reason: "Addresses potassium deficiency for better fruit quality".into(),
            application_method: "Apply during fruit development stage".into(),
        }
    } else {
        FertilizerPlan {
            name: "Organic Compost".into(),
            amount: amount_kg(COMPOST_RATE_KG, hectares),
            reason: "Improves soil structure and provides slow-release nutrients".into(),
            application_method: "Apply 2-3 weeks before planting and incorporate into soil".into(),
        }
    }
}

/// The three organic amendments suggested with every plan.
pub fn organic_options(hectares: f64) -> Vec<OrganicOption> {
    vec![
        OrganicOption {
            name: "Vermicompost".into(),
            amount: amount_kg(VERMICOMPOST_RATE_KG, hectares),
            benefits: "Rich in nutrients, improves soil structure and water retention".into(),
            application_timing: "Apply 3-4 weeks before planting".into(),
        },
        OrganicOption {
            name: "Neem Cake".into(),
            amount: amount_kg(NEEM_CAKE_RATE_KG, hectares),
            benefits: "Natural pest deterrent and slow-release nitrogen source".into(),
            application_timing: "Apply at the time of land preparation".into(),
        },
        OrganicOption {
            name: "Bone Meal".into(),
            amount: amount_kg(BONE_MEAL_RATE_KG, hectares),
            benefits: "Excellent source of phosphorus and calcium".into(),
            application_timing: "Apply as basal dose before sowing".into(),
        },
    ]
}

pub fn application_timing() -> ApplicationTiming {
    ApplicationTiming {
        primary: "Apply 1-2 weeks before planting for optimal nutrient availability".into(),
        secondary: "Apply during active growth phase or as recommended for specific fertilizer".into(),
        organic: "Apply 3-4 weeks before planting to allow decomposition".into(),
    }
}

/// Rounded rupee costs before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub primary: i64,
    pub secondary: i64,
    pub organic: i64,
}

impl CostBreakdown {
    pub fn for_area(hectares: f64) -> Self {
        Self {
            primary: round_half_up(hectares * PRIMARY_COST_PER_HA),
            secondary: round_half_up(hectares * SECONDARY_COST_PER_HA),
            organic: round_half_up(hectares * ORGANIC_COST_PER_HA),
        }
    }

    pub fn total(&self) -> i64 {
        self.primary + self.secondary + self.organic
    }

    pub fn to_estimate(&self) -> CostEstimate {
        CostEstimate {
            primary: format_inr(self.primary),
            secondary: format_inr(self.secondary),
            organic: format_inr(self.organic),
            total: format_inr(self.total()),
        }
    }
}

/// Advice lines for the soil analysis section.
pub fn soil_recommendations(condition: &SoilCondition) -> Vec<String> {
    let ph_line = match condition.ph_status {
        PhStatus::Acidic => "Adjust soil pH using lime".to_string(),
        PhStatus::Alkaline => "Adjust soil pH using sulfur".to_string(),
        PhStatus::Optimal => "Maintain current pH levels".to_string(),
    };

    let moisture_line = match condition.moisture_status {
        MoistureStatus::Low => "Increase irrigation frequency",
        MoistureStatus::High => "Improve drainage",
        MoistureStatus::Optimal => "Maintain current moisture levels",
    };

    let deficiency_line = if condition.deficiencies.is_empty() {
        "Nutrient levels are adequate".to_string()
    } else {
        let names: Vec<&str> = condition.deficiencies.iter().map(|n| n.as_str()).collect();
        format!("Address {} deficiency", names.join(", "))
    };

    vec![
        ph_line,
        moisture_line.to_string(),
        deficiency_line,
        "Regular soil testing every 6 months is recommended".to_string(),
        "Consider crop rotation to maintain soil health".to_string(),
    ]
}
