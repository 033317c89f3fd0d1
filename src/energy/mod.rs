// Energy consumption calculators: what-if scenario projection, prediction
// confidence tiers, and the simulated predictor used when the forecasting
// backend is down.

pub mod confidence;
pub mod hourly;
pub mod prediction;
pub mod remote;
pub mod scenario;
pub mod traits;
