// Remote energy forecasting model.
//
// `POST {base}/predict` takes a list of feature rows and returns one
// prediction per row, optionally with a confidence interval. We always
// send a single row.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::confidence::PredictionBounds;
use super::prediction::{
    EnergyPrediction, EnergyReading, DEFAULT_BOUND_FRACTION, DEFAULT_CONFIDENCE,
};
use super::traits::EnergyPredictor;
use crate::backend::client::{BackendClient, HealthResponse};
use crate::backend::AnalysisSource;

pub struct RemotePredictor {
    client: BackendClient,
}

impl RemotePredictor {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.client.get_json("health").await
    }
}

#[async_trait]
impl EnergyPredictor for RemotePredictor {
    fn name(&self) -> &str {
        self.client.base_url()
    }

    async fn predict(&self, reading: &EnergyReading) -> Result<EnergyPrediction> {
        let request = PredictRequest {
            features: vec![FeatureRow::from(reading)],
            include_confidence: true,
        };
        let response: PredictResponse = self.client.post_json("predict", &request).await?;
        let bounds = response.into_bounds()?;

        debug!(
            predicted = bounds.predicted,
            lower = bounds.lower_bound,
            upper = bounds.upper_bound,
            "Remote predictor answered"
        );

        Ok(EnergyPrediction {
            bounds,
            source: AnalysisSource::Live,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub features: Vec<FeatureRow>,
    pub include_confidence: bool,
}

/// One feature row in the model's naming, with calendar features derived
/// from the reading's timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
    pub occupancy: f64,
    pub renewable: f64,
    pub hvac_status: u8,
    pub lighting_status: u8,
    pub day_of_week: u32,
    pub is_holiday: u8,
    pub hour: u32,
    pub month: u32,
    pub day_of_month: u32,
    pub is_weekend: u8,
    pub is_business_hour: u8,
}

impl From<&EnergyReading> for FeatureRow {
    fn from(r: &EnergyReading) -> Self {
        use chrono::{Datelike, Timelike};

        Self {
            timestamp: r.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
            temperature: r.temperature,
            humidity: r.humidity,
            occupancy: r.occupancy,
            renewable: r.renewable_percent,
            hvac_status: r.hvac_on as u8,
            lighting_status: r.lighting_on as u8,
            day_of_week: r.day_of_week(),
            is_holiday: r.is_holiday as u8,
            hour: r.timestamp.hour(),
            month: r.timestamp.month(),
            day_of_month: r.timestamp.day(),
            is_weekend: r.is_weekend() as u8,
            is_business_hour: r.is_business_hour() as u8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub predictions: Vec<RemotePrediction>,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePrediction {
    pub predicted: f64,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl PredictResponse {
    /// First prediction as bounds, filling missing interval fields with the
    /// ±10% / 0.85 defaults.
    pub fn into_bounds(self) -> Result<PredictionBounds> {
        if !self.success {
            anyhow::bail!(
                "Predictor reported failure: {}",
                self.error.as_deref().unwrap_or("unknown error")
            );
        }
        let Some(first) = self.predictions.into_iter().next() else {
            anyhow::bail!("Predictor returned no predictions");
        };
        let p = first.predicted;
        Ok(PredictionBounds {
            predicted: p,
            lower_bound: first
                .lower_bound
                .unwrap_or(p * (1.0 - DEFAULT_BOUND_FRACTION)),
            upper_bound: first
                .upper_bound
                .unwrap_or(p * (1.0 + DEFAULT_BOUND_FRACTION)),
            confidence: first.confidence.unwrap_or(DEFAULT_CONFIDENCE),
        })
    }
}
