//! HTTP client for a hosted prediction endpoint.

use std::time::Duration;

use agricure_core::models::PredictionResult;
use agricure_core::predict::{PredictionError, PredictionFeatures, PredictionOutcome, Predictor};
use async_trait::async_trait;
use reqwest::Client;

use crate::parse::parse_prediction_output;

/// Predictor that POSTs features as JSON to an endpoint.
///
/// Transport errors, timeouts, non-success statuses and malformed replies all
/// surface as [`PredictionError::Unavailable`]. There are no retries.
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> PredictionOutcome<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::Unavailable(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn unavailable(e: reqwest::Error) -> PredictionError {
    if e.is_timeout() {
        PredictionError::Unavailable("prediction request timed out".into())
    } else {
        PredictionError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, features: &PredictionFeatures) -> PredictionOutcome<PredictionResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(features)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;
        let body = response.text().await.map_err(unavailable)?;

        let result = parse_prediction_output(&body)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            fertilizer = %result.fertilizer,
            confidence = result.confidence,
            "Endpoint prediction"
        );
        Ok(result)
    }
}
