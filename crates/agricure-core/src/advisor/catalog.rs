//! Static fertilizer reference table.

/// Agronomic notes for a fertilizer grade the model can predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FertilizerInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub application: &'static str,
}

/// Every label the prediction model is known to emit.
pub const FERTILIZER_INFO: &[FertilizerInfo] = &[
    FertilizerInfo {
        name: "Urea",
        description: "High nitrogen content (46% N) for leafy growth and rapid green-up",
        application: "Split into 2-3 doses; apply as top dressing and irrigate lightly afterwards",
    },
    FertilizerInfo {
        name: "DAP",
        description: "Diammonium phosphate (18-46-0) supplies phosphorus for root development with some nitrogen",
        application: "Apply as basal dose and place 5 cm below the seed",
    },
    FertilizerInfo {
        name: "14-35-14",
        description: "Phosphorus-rich complex fertilizer for strong roots and early establishment",
        application: "Apply as basal dose at sowing, banded near the seed row",
    },
    FertilizerInfo {
        name: "28-28",
        description: "Balanced nitrogen and phosphorus for vegetative growth on potassium-rich soils",
        application: "Apply at sowing and incorporate into the top 10 cm of soil",
    },
    FertilizerInfo {
        name: "17-17-17",
        description: "Balanced NPK complex that corrects multiple nutrient deficiencies",
        application: "Apply half as basal dose and the rest 30 days after sowing",
    },
    FertilizerInfo {
        name: "20-20",
        description: "Maintenance nitrogen and phosphorus for soils with adequate nutrient levels",
        application: "Apply as basal dose during final land preparation",
    },
    FertilizerInfo {
        name: "10-26-26",
        description: "Phosphorus and potassium complex for flowering, fruiting and grain filling",
        application: "Apply as basal dose; avoid direct contact with seeds",
    },
];

/// Look up the reference entry for a predicted label (exact match).
pub fn fertilizer_info(label: &str) -> Option<&'static FertilizerInfo> {
    FERTILIZER_INFO.iter().find(|info| info.name == label)
}
