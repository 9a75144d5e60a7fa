//! Field models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hectares per acre.
pub const HECTARES_PER_ACRE: f64 = 0.404686;

/// Hectares per bigha.
pub const HECTARES_PER_BIGHA: f64 = 0.1338;

/// Units a field size can be entered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    Hectares,
    Acres,
    Bigha,
}

impl SizeUnit {
    /// All supported units, in form order.
    pub const ALL: [SizeUnit; 3] = [SizeUnit::Hectares, SizeUnit::Acres, SizeUnit::Bigha];

    /// Parse a unit label. Only the exact form labels are recognized;
    /// anything else returns `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "hectares" => Some(SizeUnit::Hectares),
            "acres" => Some(SizeUnit::Acres),
            "bigha" => Some(SizeUnit::Bigha),
            _ => None,
        }
    }

    /// Canonical label, as stored in history records.
    pub fn label(&self) -> &'static str {
        match self {
            SizeUnit::Hectares => "hectares",
            SizeUnit::Acres => "acres",
            SizeUnit::Bigha => "bigha",
        }
    }

    /// Multiplier that converts this unit into hectares.
    pub fn hectare_factor(&self) -> f64 {
        match self {
            SizeUnit::Hectares => 1.0,
            SizeUnit::Acres => HECTARES_PER_ACRE,
            SizeUnit::Bigha => HECTARES_PER_BIGHA,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field as entered on the recommendation form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    /// Field name chosen by the farmer
    pub name: String,
    /// Field size in `size_unit` (must be > 0)
    pub size: f64,
    /// Unit label as entered; unknown labels are kept verbatim
    pub size_unit: String,
}

impl FieldSpec {
    /// Create a field spec.
    pub fn new(name: impl Into<String>, size: f64, size_unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            size_unit: size_unit.into(),
        }
    }

    /// The recognized unit, if any.
    pub fn unit(&self) -> Option<SizeUnit> {
        SizeUnit::from_label(&self.size_unit)
    }
}
