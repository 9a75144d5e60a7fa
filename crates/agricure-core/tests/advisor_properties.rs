//! Property tests for the recommendation composer.

use agricure_core::advisor::{
    amount_kg, classify, round_half_up, secondary_plan, to_hectares, CostBreakdown,
};
use agricure_core::models::Nutrient;
use proptest::prelude::*;

fn unit() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("hectares"), Just("acres"), Just("bigha"), Just("guntha")]
}

proptest! {
    #[test]
    fn hectares_positive_for_positive_size(size in 0.001f64..100_000.0, unit in unit()) {
        prop_assert!(to_hectares(size, unit) > 0.0);
    }

    #[test]
    fn total_is_sum_of_parts(hectares in 0.0f64..50_000.0) {
        let costs = CostBreakdown::for_area(hectares);
        prop_assert_eq!(costs.total(), costs.primary + costs.secondary + costs.organic);
    }

    #[test]
    fn primary_amount_is_rounded_hundred_per_hectare(hectares in 0.0f64..50_000.0) {
        let expected = format!("{} kg", round_half_up(100.0 * hectares));
        prop_assert_eq!(amount_kg(100.0, hectares), expected);
    }

    #[test]
    fn secondary_follows_priority(
        ph in 3.0f64..10.0,
        moisture in 0.0f64..100.0,
        n in 0.0f64..200.0,
        p in 0.0f64..100.0,
        k in 0.0f64..400.0,
    ) {
        let condition = classify(ph, moisture, n, p, k);
        let plan = secondary_plan(&condition, 1.0);
        let expected = if condition.is_deficient(Nutrient::Phosphorus) {
            "DAP"
        } else if condition.is_deficient(Nutrient::Potassium) {
            "Potassium sulfate"
        } else {
            "Organic Compost"
        };
        prop_assert_eq!(plan.name.as_str(), expected);
    }

    #[test]
    fn classify_is_idempotent(
        ph in 3.0f64..10.0,
        moisture in 0.0f64..100.0,
        n in 0.0f64..200.0,
        p in 0.0f64..100.0,
        k in 0.0f64..400.0,
    ) {
        prop_assert_eq!(classify(ph, moisture, n, p, k), classify(ph, moisture, n, p, k));
    }
}
