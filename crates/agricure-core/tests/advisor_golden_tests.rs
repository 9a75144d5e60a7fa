//! Golden tests for the recommendation advisor.
//!
//! These tests pin unit conversion, soil classification and the composed
//! plan against hand-checked values.

use std::sync::Arc;

use agricure_core::advisor::{classify, to_hectares, Advisor};
use agricure_core::models::{
    FieldSpec, MoistureStatus, Nutrient, PhStatus, PredictionResult, SoilSample,
};
use agricure_core::predict::{PredictionFeatures, PredictionOutcome, Predictor};
use async_trait::async_trait;

struct FixedPredictor(&'static str);

#[async_trait]
impl Predictor for FixedPredictor {
    async fn predict(&self, _features: &PredictionFeatures) -> PredictionOutcome<PredictionResult> {
        Ok(PredictionResult {
            fertilizer: self.0.to_string(),
            confidence: 87.5,
        })
    }
}

struct ConversionCase {
    id: &'static str,
    size: f64,
    unit: &'static str,
    expected: f64,
}

fn get_conversion_cases() -> Vec<ConversionCase> {
    vec![
        ConversionCase {
            id: "acres",
            size: 10.0,
            unit: "acres",
            expected: 4.04686,
        },
        ConversionCase {
            id: "acres-capitalized-unrecognized",
            size: 10.0,
            unit: "Acres",
            expected: 10.0,
        },
        ConversionCase {
            id: "acre-abbreviation-unrecognized",
            size: 10.0,
            unit: "ac",
            expected: 10.0,
        },
        ConversionCase {
            id: "bigha",
            size: 5.0,
            unit: "bigha",
            expected: 0.669,
        },
        ConversionCase {
            id: "hectares",
            size: 3.0,
            unit: "hectares",
            expected: 3.0,
        },
        ConversionCase {
            id: "unknown-unit",
            size: 7.0,
            unit: "guntha",
            expected: 7.0,
        },
        ConversionCase {
            id: "empty-unit",
            size: 2.5,
            unit: "",
            expected: 2.5,
        },
    ]
}

#[test]
fn test_conversion_golden_cases() {
    for case in get_conversion_cases() {
        let actual = to_hectares(case.size, case.unit);
        assert!(
            (actual - case.expected).abs() < 1e-9,
            "Case {}: expected {}, got {}",
            case.id,
            case.expected,
            actual
        );
    }
}

struct ClassifyCase {
    id: &'static str,
    input: [f64; 5],
    ph: PhStatus,
    moisture: MoistureStatus,
    deficiencies: Vec<Nutrient>,
}

fn get_classify_cases() -> Vec<ClassifyCase> {
    use MoistureStatus as M;
    use Nutrient::*;
    use PhStatus as P;
    vec![
        ClassifyCase {
            id: "acidic-adequate",
            input: [5.5, 50.0, 40.0, 20.0, 150.0],
            ph: P::Acidic,
            moisture: M::Optimal,
            deficiencies: vec![],
        },
        ClassifyCase {
            id: "alkaline-wet-all-deficient",
            input: [8.0, 90.0, 10.0, 5.0, 50.0],
            ph: P::Alkaline,
            moisture: M::High,
            deficiencies: vec![Nitrogen, Phosphorus, Potassium],
        },
        ClassifyCase {
            id: "lower-boundaries",
            input: [6.0, 40.0, 30.0, 15.0, 120.0],
            ph: P::Optimal,
            moisture: M::Optimal,
            deficiencies: vec![],
        },
        ClassifyCase {
            id: "upper-boundaries",
            input: [7.5, 80.0, 29.9, 30.0, 119.0],
            ph: P::Optimal,
            moisture: M::Optimal,
            deficiencies: vec![Nitrogen, Potassium],
        },
        ClassifyCase {
            id: "dry",
            input: [6.8, 39.9, 50.0, 14.0, 200.0],
            ph: P::Optimal,
            moisture: M::Low,
            deficiencies: vec![Phosphorus],
        },
    ]
}

#[test]
fn test_classify_golden_cases() {
    for case in get_classify_cases() {
        let [ph, moisture, n, p, k] = case.input;
        let condition = classify(ph, moisture, n, p, k);
        assert_eq!(condition.ph_status, case.ph, "Case {}: pH mismatch", case.id);
        assert_eq!(
            condition.moisture_status, case.moisture,
            "Case {}: moisture mismatch",
            case.id
        );
        assert_eq!(
            condition.deficiencies, case.deficiencies,
            "Case {}: deficiency mismatch",
            case.id
        );
    }
}

fn sample(phosphorus: f64, potassium: f64) -> SoilSample {
    SoilSample {
        ph: 6.5,
        nitrogen: 20.0,
        phosphorus,
        potassium,
        moisture: 50.0,
        temperature: 25.0,
        humidity: 60.0,
    }
}

#[tokio::test]
async fn test_ten_acre_urea_plan() {
    let advisor = Advisor::new(Arc::new(FixedPredictor("Urea")));
    let field = FieldSpec::new("North", 10.0, "acres");

    let rec = advisor.compose(&field, &sample(10.0, 150.0), 10, 2).await.unwrap();

    assert_eq!(rec.primary_fertilizer.name, "Urea");
    assert_eq!(rec.primary_fertilizer.amount, "405 kg");
    assert_eq!(rec.secondary_fertilizer.name, "DAP");
    assert_eq!(rec.secondary_fertilizer.amount, "202 kg");

    let amounts: Vec<&str> = rec.organic_options.iter().map(|o| o.amount.as_str()).collect();
    assert_eq!(amounts, vec!["4047 kg", "809 kg", "607 kg"]);

    assert_eq!(rec.cost_estimate.primary, "₹16,187");
    assert_eq!(rec.cost_estimate.secondary, "₹10,117");
    assert_eq!(rec.cost_estimate.organic, "₹8,094");
    assert_eq!(rec.cost_estimate.total, "₹34,398");

    assert_eq!(
        rec.soil_condition_analysis.recommendations[2],
        "Address Nitrogen, Phosphorus deficiency"
    );
    assert_eq!(rec.ml_prediction.confidence, 87.5);
}

#[tokio::test]
async fn test_secondary_priority() {
    let advisor = Advisor::new(Arc::new(FixedPredictor("DAP")));
    let field = FieldSpec::new("Plot", 1.0, "hectares");

    // Phosphorus outranks potassium
    let rec = advisor.compose(&field, &sample(10.0, 50.0), 0, 0).await.unwrap();
    assert_eq!(rec.secondary_fertilizer.name, "DAP");

    let rec = advisor.compose(&field, &sample(20.0, 50.0), 0, 0).await.unwrap();
    assert_eq!(rec.secondary_fertilizer.name, "Potassium sulfate");
    assert_eq!(rec.secondary_fertilizer.amount, "40 kg");

    let rec = advisor.compose(&field, &sample(20.0, 150.0), 0, 0).await.unwrap();
    assert_eq!(rec.secondary_fertilizer.name, "Organic Compost");
    assert_eq!(rec.secondary_fertilizer.amount, "1000 kg");
}

#[tokio::test]
async fn test_large_farm_uses_indian_grouping() {
    let advisor = Advisor::new(Arc::new(FixedPredictor("17-17-17")));
    let field = FieldSpec::new("Estate", 500.0, "hectares");

    let rec = advisor.compose(&field, &sample(20.0, 150.0), 8, 0).await.unwrap();
    assert_eq!(rec.cost_estimate.primary, "₹20,00,000");
    assert_eq!(rec.cost_estimate.total, "₹42,50,000");
    assert_eq!(rec.primary_fertilizer.amount, "50000 kg");
}
