//! Field-size conversion into hectares.

use crate::models::{FieldSpec, SizeUnit};

/// Convert a field size into hectares.
///
/// Labels other than the exact `hectares`, `acres` and `bigha` are treated
/// as hectares. The size is not validated here; callers reject non-positive
/// sizes.
pub fn to_hectares(size: f64, unit: &str) -> f64 {
    match SizeUnit::from_label(unit) {
        Some(unit) => size * unit.hectare_factor(),
        None => size,
    }
}

impl FieldSpec {
    /// Field size in hectares.
    pub fn hectares(&self) -> f64 {
        to_hectares(self.size, &self.size_unit)
    }
}
