//! Prediction reply parsing.

use agricure_core::models::PredictionResult;
use agricure_core::predict::PredictionError;
use serde::Deserialize;
use thiserror::Error;

/// Reply parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

impl From<ParseError> for PredictionError {
    fn from(e: ParseError) -> Self {
        PredictionError::Unavailable(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    fertilizer: String,
    confidence: f64,
}

/// Parse an endpoint reply into a prediction.
///
/// Text around the JSON object is ignored. The label must be non-empty and
/// the confidence a finite number in [0, 100].
pub fn parse_prediction_output(body: &str) -> ParseResult<PredictionResult> {
    let json_start = body
        .find('{')
        .ok_or_else(|| ParseError::InvalidFormat("No JSON object found in response".into()))?;
    let json_end = body
        .rfind('}')
        .ok_or_else(|| ParseError::InvalidFormat("No closing brace found in response".into()))?;
    if json_end < json_start {
        return Err(ParseError::InvalidFormat("Unbalanced braces in response".into()));
    }

    let raw: RawPrediction = serde_json::from_str(&body[json_start..=json_end])?;

    let fertilizer = raw.fertilizer.trim();
    if fertilizer.is_empty() {
        return Err(ParseError::InvalidFormat("Empty fertilizer label".into()));
    }
    if !raw.confidence.is_finite() || !(0.0..=100.0).contains(&raw.confidence) {
        return Err(ParseError::InvalidFormat(format!(
            "Confidence out of range: {}",
            raw.confidence
        )));
    }

    Ok(PredictionResult {
        fertilizer: fertilizer.to_string(),
        confidence: raw.confidence,
    })
}
