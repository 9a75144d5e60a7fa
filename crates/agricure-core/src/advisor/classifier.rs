//! Soil condition classification.
//!
//! Thresholds:
//! - pH: < 6.0 acidic, > 7.5 alkaline
//! - Moisture: < 40% low, > 80% high
//! - Nitrogen < 30, phosphorus < 15, potassium < 120 mg/kg are deficient

use crate::models::{MoistureStatus, Nutrient, PhStatus, SoilCondition, SoilSample};

pub const PH_ACIDIC_BELOW: f64 = 6.0;
pub const PH_ALKALINE_ABOVE: f64 = 7.5;
pub const MOISTURE_LOW_BELOW: f64 = 40.0;
pub const MOISTURE_HIGH_ABOVE: f64 = 80.0;
pub const NITROGEN_DEFICIENT_BELOW: f64 = 30.0;
pub const PHOSPHORUS_DEFICIENT_BELOW: f64 = 15.0;
pub const POTASSIUM_DEFICIENT_BELOW: f64 = 120.0;

/// Classify pH. The boundaries themselves are optimal.
pub fn ph_status(ph: f64) -> PhStatus {
    if ph < PH_ACIDIC_BELOW {
        PhStatus::Acidic
    } else if ph > PH_ALKALINE_ABOVE {
        PhStatus::Alkaline
    } else {
        PhStatus::Optimal
    }
}

/// Classify moisture. The boundaries themselves are optimal.
pub fn moisture_status(moisture: f64) -> MoistureStatus {
    if moisture < MOISTURE_LOW_BELOW {
        MoistureStatus::Low
    } else if moisture > MOISTURE_HIGH_ABOVE {
        MoistureStatus::High
    } else {
        MoistureStatus::Optimal
    }
}

/// Deficient nutrients in N, P, K order.
pub fn deficiencies(nitrogen: f64, phosphorus: f64, potassium: f64) -> Vec<Nutrient> {
    let mut deficient = Vec::new();
    if nitrogen < NITROGEN_DEFICIENT_BELOW {
        deficient.push(Nutrient::Nitrogen);
    }
    if phosphorus < PHOSPHORUS_DEFICIENT_BELOW {
        deficient.push(Nutrient::Phosphorus);
    }
    if potassium < POTASSIUM_DEFICIENT_BELOW {
        deficient.push(Nutrient::Potassium);
    }
    deficient
}

/// Classify a set of raw readings.
pub fn classify(
    ph: f64,
    moisture: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
) -> SoilCondition {
    SoilCondition {
        ph_status: ph_status(ph),
        moisture_status: moisture_status(moisture),
        deficiencies: deficiencies(nitrogen, phosphorus, potassium),
    }
}

/// Classify a soil sample.
pub fn classify_sample(sample: &SoilSample) -> SoilCondition {
    classify(
        sample.ph,
        sample.moisture,
        sample.nitrogen,
        sample.phosphorus,
        sample.potassium,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acidic_no_deficiencies() {
        let condition = classify(5.5, 50.0, 40.0, 20.0, 150.0);
        assert_eq!(condition.ph_status, PhStatus::Acidic);
        assert_eq!(condition.moisture_status, MoistureStatus::Optimal);
        assert!(condition.deficiencies.is_empty());
    }

    #[test]
    fn test_alkaline_all_deficient() {
        let condition = classify(8.0, 90.0, 10.0, 5.0, 50.0);
        assert_eq!(condition.ph_status, PhStatus::Alkaline);
        assert_eq!(condition.moisture_status, MoistureStatus::High);
        assert_eq!(
            condition.deficiencies,
            vec![Nutrient::Nitrogen, Nutrient::Phosphorus, Nutrient::Potassium]
        );
    }

    #[test]
    fn test_boundaries_are_optimal() {
        assert_eq!(ph_status(6.0), PhStatus::Optimal);
        assert_eq!(ph_status(7.5), PhStatus::Optimal);
        assert_eq!(moisture_status(40.0), MoistureStatus::Optimal);
        assert_eq!(moisture_status(80.0), MoistureStatus::Optimal);
    }

    #[test]
    fn test_just_outside_boundaries() {
        assert_eq!(ph_status(5.99), PhStatus::Acidic);
        assert_eq!(ph_status(7.51), PhStatus::Alkaline);
        assert_eq!(moisture_status(39.9), MoistureStatus::Low);
        assert_eq!(moisture_status(80.1), MoistureStatus::High);
    }

    #[test]
    fn test_deficiency_thresholds_exclusive() {
        assert!(deficiencies(30.0, 15.0, 120.0).is_empty());
        assert_eq!(deficiencies(29.9, 15.0, 120.0), vec![Nutrient::Nitrogen]);
        assert_eq!(
            deficiencies(30.0, 14.9, 119.9),
            vec![Nutrient::Phosphorus, Nutrient::Potassium]
        );
    }

    #[test]
    fn test_classify_sample() {
        let sample = SoilSample {
            ph: 6.8,
            nitrogen: 25.0,
            phosphorus: 18.0,
            potassium: 130.0,
            moisture: 35.0,
            temperature: 28.0,
            humidity: 60.0,
        };
        let condition = classify_sample(&sample);
        assert_eq!(condition.ph_status, PhStatus::Optimal);
        assert_eq!(condition.moisture_status, MoistureStatus::Low);
        assert_eq!(condition.deficiencies, vec![Nutrient::Nitrogen]);
    }

    #[test]
    fn test_classify_is_pure() {
        assert_eq!(classify(6.2, 55.0, 12.0, 30.0, 80.0), classify(6.2, 55.0, 12.0, 30.0, 80.0));
    }
}
