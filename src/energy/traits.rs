// Energy predictor trait: remote forecasting model or local simulation.

use anyhow::Result;
use async_trait::async_trait;

use super::prediction::{default_bounds, mock_prediction, EnergyPrediction, EnergyReading};
use crate::backend::AnalysisSource;

#[async_trait]
pub trait EnergyPredictor: Send + Sync {
    fn name(&self) -> &str;

    async fn predict(&self, reading: &EnergyReading) -> Result<EnergyPrediction>;
}

/// Local stand-in for the forecasting model. Never fails.
pub struct MockPredictor;

impl MockPredictor {
    pub fn predict_now(&self, reading: &EnergyReading) -> EnergyPrediction {
        EnergyPrediction {
            bounds: default_bounds(mock_prediction(reading)),
            source: AnalysisSource::Simulation,
        }
    }
}

#[async_trait]
impl EnergyPredictor for MockPredictor {
    fn name(&self) -> &str {
        "simulation"
    }

    async fn predict(&self, reading: &EnergyReading) -> Result<EnergyPrediction> {
        Ok(self.predict_now(reading))
    }
}
