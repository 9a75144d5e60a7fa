//! Soil sample and crop/soil code tables.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Minimum similarity for a misspelled name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Name used when a crop or soil code has no table entry.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A soil test snapshot supplied with one recommendation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilSample {
    /// Soil pH
    pub ph: f64,
    /// Nitrogen (mg/kg)
    pub nitrogen: f64,
    /// Phosphorus (mg/kg)
    pub phosphorus: f64,
    /// Potassium (mg/kg)
    pub potassium: f64,
    /// Soil moisture (%)
    pub moisture: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
}

/// Crops the prediction model was trained on, with their label codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CropType {
    Barley,
    Cotton,
    GroundNuts,
    Maize,
    Millets,
    OilSeeds,
    Paddy,
    Pulses,
    Sugarcane,
    Tobacco,
    Wheat,
}

impl CropType {
    pub const ALL: [CropType; 11] = [
        CropType::Barley,
        CropType::Cotton,
        CropType::GroundNuts,
        CropType::Maize,
        CropType::Millets,
        CropType::OilSeeds,
        CropType::Paddy,
        CropType::Pulses,
        CropType::Sugarcane,
        CropType::Tobacco,
        CropType::Wheat,
    ];

    /// Model label code.
    pub fn code(&self) -> i64 {
        Self::ALL.iter().position(|c| c == self).unwrap_or_default() as i64
    }

    /// Look up a crop by label code.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            CropType::Barley => "Barley",
            CropType::Cotton => "Cotton",
            CropType::GroundNuts => "Ground Nuts",
            CropType::Maize => "Maize",
            CropType::Millets => "Millets",
            CropType::OilSeeds => "Oil seeds",
            CropType::Paddy => "Paddy",
            CropType::Pulses => "Pulses",
            CropType::Sugarcane => "Sugarcane",
            CropType::Tobacco => "Tobacco",
            CropType::Wheat => "Wheat",
        }
    }

    /// Look up a crop by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().to_lowercase() == lower)
    }

    /// Closest crop name for a misspelled input.
    pub fn suggest(name: &str) -> Option<Self> {
        best_match(name, Self::ALL.iter().map(|c| (*c, c.name())))
    }
}

/// Soil types the prediction model was trained on, with their label codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilType {
    Black,
    Clayey,
    Loamy,
    Red,
    Sandy,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Black,
        SoilType::Clayey,
        SoilType::Loamy,
        SoilType::Red,
        SoilType::Sandy,
    ];

    /// Model label code.
    pub fn code(&self) -> i64 {
        Self::ALL.iter().position(|s| s == self).unwrap_or_default() as i64
    }

    /// Look up a soil type by label code.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            SoilType::Black => "Black",
            SoilType::Clayey => "Clayey",
            SoilType::Loamy => "Loamy",
            SoilType::Red => "Red",
            SoilType::Sandy => "Sandy",
        }
    }

    /// Look up a soil type by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().to_lowercase() == lower)
    }

    /// Closest soil name for a misspelled input.
    pub fn suggest(name: &str) -> Option<Self> {
        best_match(name, Self::ALL.iter().map(|s| (*s, s.name())))
    }
}

/// Crop display name for a code, or "Unknown".
pub fn crop_name(code: i64) -> &'static str {
    CropType::from_code(code).map_or(UNKNOWN_NAME, |c| c.name())
}

/// Soil display name for a code, or "Unknown".
pub fn soil_name(code: i64) -> &'static str {
    SoilType::from_code(code).map_or(UNKNOWN_NAME, |s| s.name())
}

fn best_match<T: Copy>(input: &str, options: impl Iterator<Item = (T, &'static str)>) -> Option<T> {
    let lower = input.trim().to_lowercase();
    options
        .map(|(value, name)| (value, jaro_winkler(&lower, &name.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(value, _)| value)
}
