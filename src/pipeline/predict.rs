// Energy prediction pipeline: remote model first, simulation on failure.

use tracing::{info, warn};

use crate::energy::prediction::{EnergyPrediction, EnergyReading};
use crate::energy::traits::{EnergyPredictor, MockPredictor};

/// Predict consumption for a reading. Never fails.
pub async fn predict_energy(
    remote: Option<&dyn EnergyPredictor>,
    reading: &EnergyReading,
) -> EnergyPrediction {
    if let Some(predictor) = remote {
        match predictor.predict(reading).await {
            Ok(prediction) => return prediction,
            Err(e) => {
                warn!(
                    predictor = predictor.name(),
                    error = %e,
                    "Remote predictor failed, using simulation"
                );
            }
        }
    }

    let prediction = MockPredictor.predict_now(reading);
    info!(
        predicted = format!("{:.2}", prediction.predicted()),
        "Simulated energy prediction"
    );
    prediction
}
