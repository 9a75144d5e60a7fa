//! Raw recommendation form input.
//!
//! Front-ends hand over the form exactly as typed. Parsing is strict: a value
//! that does not read as a finite number is rejected instead of flowing into
//! the calculations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    CropType, FieldSpec, NewRecommendation, Recommendation, SoilSample, SoilType,
};

/// Form errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Field size must be greater than zero")]
    NonPositiveSize,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

pub type FormResult<T> = Result<T, FormError>;

/// Recommendation form as entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationForm {
    pub field_name: String,
    pub field_size: String,
    pub size_unit: String,
    /// Crop code (see [`crate::models::CropType`])
    pub crop_type: String,
    /// Soil code (see [`crate::models::SoilType`])
    pub soil_type: String,
    pub soil_ph: String,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
}

/// Validated form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedForm {
    pub field: FieldSpec,
    pub soil: SoilSample,
    pub crop_type_code: i64,
    pub soil_type_code: i64,
}

impl RecommendationForm {
    pub fn parse(&self) -> FormResult<ParsedForm> {
        let field_name = self.field_name.trim();
        if field_name.is_empty() {
            return Err(FormError::MissingField("fieldName"));
        }

        let size = parse_number("fieldSize", &self.field_size)?;
        if size <= 0.0 {
            return Err(FormError::NonPositiveSize);
        }

        let soil = SoilSample {
            ph: parse_number("soilPH", &self.soil_ph)?,
            nitrogen: parse_number("nitrogen", &self.nitrogen)?,
            phosphorus: parse_number("phosphorus", &self.phosphorus)?,
            potassium: parse_number("potassium", &self.potassium)?,
            moisture: parse_number("soilMoisture", &self.soil_moisture)?,
            temperature: parse_number("temperature", &self.temperature)?,
            humidity: parse_number("humidity", &self.humidity)?,
        };

        Ok(ParsedForm {
            field: FieldSpec::new(field_name, size, self.size_unit.as_str()),
            soil,
            crop_type_code: parse_code("cropType", &self.crop_type)?,
            soil_type_code: parse_code("soilType", &self.soil_type)?,
        })
    }
}

impl ParsedForm {
    /// History input for this form and its recommendation.
    ///
    /// Known codes are stored by name; unknown codes are stored as typed.
    pub fn to_new_recommendation(&self, recommendation: Recommendation) -> NewRecommendation {
        NewRecommendation {
            field_name: self.field.name.clone(),
            field_size: self.field.size,
            field_size_unit: self.field.size_unit.clone(),
            crop_type: CropType::from_code(self.crop_type_code)
                .map_or_else(|| self.crop_type_code.to_string(), |c| c.name().to_string()),
            soil_type: SoilType::from_code(self.soil_type_code)
                .map_or_else(|| self.soil_type_code.to_string(), |s| s.name().to_string()),
            soil_ph: self.soil.ph,
            nitrogen: self.soil.nitrogen,
            phosphorus: self.soil.phosphorus,
            potassium: self.soil.potassium,
            temperature: self.soil.temperature,
            humidity: self.soil.humidity,
            soil_moisture: self.soil.moisture,
            ml_prediction: recommendation.ml_prediction.clone(),
            recommendations: recommendation,
        }
    }
}

fn parse_number(field: &'static str, raw: &str) -> FormResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_code(field: &'static str, raw: &str) -> FormResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| FormError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_recommendation;

    fn form() -> RecommendationForm {
        RecommendationForm {
            field_name: " North Field ".into(),
            field_size: "10".into(),
            size_unit: "acres".into(),
            crop_type: "10".into(),
            soil_type: "2".into(),
            soil_ph: "6.5".into(),
            nitrogen: "25".into(),
            phosphorus: "12".into(),
            potassium: "150".into(),
            temperature: "24".into(),
            humidity: "60".into(),
            soil_moisture: "45".into(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let parsed = form().parse().unwrap();
        assert_eq!(parsed.field.name, "North Field");
        assert_eq!(parsed.field.size, 10.0);
        assert_eq!(parsed.field.size_unit, "acres");
        assert_eq!(parsed.crop_type_code, 10);
        assert_eq!(parsed.soil_type_code, 2);
        assert_eq!(parsed.soil.moisture, 45.0);
        assert_eq!(parsed.soil.nitrogen, 25.0);
    }

    #[test]
    fn test_invalid_number_names_field() {
        let mut f = form();
        f.nitrogen = "lots".into();
        assert_eq!(
            f.parse(),
            Err(FormError::InvalidNumber {
                field: "nitrogen",
                value: "lots".into()
            })
        );

        let mut f = form();
        f.humidity = "NaN".into();
        assert!(matches!(f.parse(), Err(FormError::InvalidNumber { field: "humidity", .. })));

        let mut f = form();
        f.crop_type = "Wheat".into();
        assert!(matches!(f.parse(), Err(FormError::InvalidNumber { field: "cropType", .. })));
    }

    #[test]
    fn test_size_must_be_positive() {
        let mut f = form();
        f.field_size = "0".into();
        assert_eq!(f.parse(), Err(FormError::NonPositiveSize));
        f.field_size = "-2".into();
        assert_eq!(f.parse(), Err(FormError::NonPositiveSize));
    }

    #[test]
    fn test_missing_field_name() {
        let mut f = form();
        f.field_name = "   ".into();
        assert_eq!(f.parse(), Err(FormError::MissingField("fieldName")));
    }

    #[test]
    fn test_unknown_unit_kept_verbatim() {
        let mut f = form();
        f.size_unit = "guntha".into();
        let parsed = f.parse().unwrap();
        assert_eq!(parsed.field.size_unit, "guntha");
        assert_eq!(parsed.field.hectares(), 10.0);

        f.size_unit = "".into();
        let parsed = f.parse().unwrap();
        assert_eq!(parsed.field.size_unit, "");
        assert_eq!(parsed.field.hectares(), 10.0);

        f.size_unit = "Acres".into();
        assert_eq!(f.parse().unwrap().field.size_unit, "Acres");
    }

    #[test]
    fn test_history_input_uses_names() {
        let input = form().parse().unwrap().to_new_recommendation(sample_recommendation());
        assert_eq!(input.crop_type, "Wheat");
        assert_eq!(input.soil_type, "Loamy");
        assert_eq!(input.soil_moisture, 45.0);
        assert_eq!(input.ml_prediction, input.recommendations.ml_prediction);
    }

    #[test]
    fn test_history_input_keeps_unknown_codes() {
        let mut f = form();
        f.crop_type = "42".into();
        f.soil_type = "17".into();
        let input = f.parse().unwrap().to_new_recommendation(sample_recommendation());
        assert_eq!(input.crop_type, "42");
        assert_eq!(input.soil_type, "17");
    }
}
