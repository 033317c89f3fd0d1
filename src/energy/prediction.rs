// Energy readings, the simulated consumption formula, and the derived
// figures shown alongside any prediction.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::confidence::PredictionBounds;
use crate::backend::AnalysisSource;

/// Interval half-width used when a prediction arrives without bounds.
pub const DEFAULT_BOUND_FRACTION: f64 = 0.1;
/// Confidence used when a prediction arrives without one.
pub const DEFAULT_CONFIDENCE: f64 = 0.85;
/// Share of the prediction reported as the current load.
const CURRENT_LOAD_FRACTION: f64 = 0.95;

/// Building conditions at the moment being predicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub timestamp: NaiveDateTime,
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// People in the building
    pub occupancy: f64,
    /// Share of supply from renewables, %
    pub renewable_percent: f64,
    pub hvac_on: bool,
    pub lighting_on: bool,
    pub is_holiday: bool,
}

impl EnergyReading {
    /// Day index with Monday = 0.
    pub fn day_of_week(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.timestamp.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_business_hour(&self) -> bool {
        (8..=18).contains(&self.timestamp.hour())
    }
}

/// Simulated consumption in kWh, used when no model is reachable.
///
/// `50 + 1.5·temp + occupancy/50 + 15 (HVAC on) + 8 (lighting on) + (100 − renewable)/10`
pub fn mock_prediction(reading: &EnergyReading) -> f64 {
    let base_load = 50.0;
    let temperature = reading.temperature * 1.5;
    let occupancy = reading.occupancy / 50.0;
    let hvac = if reading.hvac_on { 15.0 } else { 0.0 };
    let lighting = if reading.lighting_on { 8.0 } else { 0.0 };
    let renewable = (100.0 - reading.renewable_percent) / 10.0;
    base_load + temperature + occupancy + hvac + lighting + renewable
}

/// ±10% interval at the default confidence.
pub fn default_bounds(predicted: f64) -> PredictionBounds {
    PredictionBounds {
        predicted,
        lower_bound: predicted * (1.0 - DEFAULT_BOUND_FRACTION),
        upper_bound: predicted * (1.0 + DEFAULT_BOUND_FRACTION),
        confidence: DEFAULT_CONFIDENCE,
    }
}

/// Qualitative consumption level for a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageLevel {
    Low,
    Normal,
    High,
    Critical,
}

impl UsageLevel {
    pub fn from_prediction(kwh: f64) -> Self {
        match kwh {
            k if k < 60.0 => UsageLevel::Low,
            k if k < 80.0 => UsageLevel::Normal,
            k if k < 100.0 => UsageLevel::High,
            _ => UsageLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageLevel::Low => "Low",
            UsageLevel::Normal => "Normal",
            UsageLevel::High => "High",
            UsageLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renewable share relative to predicted load, capped at 100.
pub fn efficiency_score(renewable_percent: f64, predicted: f64) -> f64 {
    if predicted <= 0.0 {
        return 0.0;
    }
    (renewable_percent / predicted * 100.0).min(100.0)
}

pub fn current_load(predicted: f64) -> f64 {
    predicted * CURRENT_LOAD_FRACTION
}

/// A prediction with its interval and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPrediction {
    pub bounds: PredictionBounds,
    pub source: AnalysisSource,
}

impl EnergyPrediction {
    pub fn predicted(&self) -> f64 {
        self.bounds.predicted
    }

    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_prediction(self.bounds.predicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading() -> EnergyReading {
        EnergyReading {
            // 2026-03-02 is a Monday
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            temperature: 24.3,
            humidity: 62.5,
            occupancy: 1800.0,
            renewable_percent: 55.0,
            hvac_on: true,
            lighting_on: true,
            is_holiday: false,
        }
    }

    #[test]
    fn test_mock_prediction_default_form() {
        // 50 + 36.45 + 36 + 15 + 8 + 4.5 = 149.95
        assert!((mock_prediction(&reading()) - 149.95).abs() < 1e-9);
    }

    #[test]
    fn test_mock_prediction_everything_off() {
        let r = EnergyReading {
            temperature: 0.0,
            occupancy: 0.0,
            renewable_percent: 100.0,
            hvac_on: false,
            lighting_on: false,
            ..reading()
        };
        assert_eq!(mock_prediction(&r), 50.0);
    }

    #[test]
    fn test_calendar_features() {
        let r = reading();
        assert_eq!(r.day_of_week(), 0);
        assert!(!r.is_weekend());
        assert!(r.is_business_hour());
    }

    #[test]
    fn test_usage_levels() {
        assert_eq!(UsageLevel::from_prediction(59.9), UsageLevel::Low);
        assert_eq!(UsageLevel::from_prediction(60.0), UsageLevel::Normal);
        assert_eq!(UsageLevel::from_prediction(80.0), UsageLevel::High);
        assert_eq!(UsageLevel::from_prediction(100.0), UsageLevel::Critical);
    }

    #[test]
    fn test_efficiency_capped() {
        assert_eq!(efficiency_score(55.0, 20.0), 100.0);
        assert!((efficiency_score(55.0, 110.0) - 50.0).abs() < 1e-9);
        assert_eq!(efficiency_score(55.0, 0.0), 0.0);
    }

    #[test]
    fn test_default_bounds_are_ten_percent() {
        let b = default_bounds(200.0);
        assert!((b.lower_bound - 180.0).abs() < 1e-9);
        assert!((b.upper_bound - 220.0).abs() < 1e-9);
        assert_eq!(b.confidence, DEFAULT_CONFIDENCE);
    }
}
