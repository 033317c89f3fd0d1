// Illustrative 24-hour projection for a scenario.
//
// This is sample data for display, not part of the scenario math: a
// sinusoidal daily load curve plus random jitter, scaled by the scenario
// factor. Pass a seeded RNG to reproduce a series.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

const MEAN_LOAD: f64 = 250.0;
const DAILY_SWING: f64 = 50.0;
/// Upper bound of the uniform jitter added to each hour
pub const MAX_JITTER: f64 = 20.0;

/// One hour of the projection, rounded to 0.1 kW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: String,
    pub baseline: f64,
    pub scenario: f64,
    pub savings: f64,
}

/// Smooth part of the daily load curve for `hour` (0-23).
pub fn baseline_load(hour: u32) -> f64 {
    MEAN_LOAD + (hour as f64 / 24.0 * PI * 2.0).sin() * DAILY_SWING
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the 24-point baseline/scenario series for a total percent change.
pub fn hourly_projection<R: Rng>(
    total_reduction_percent: f64,
    rng: &mut R,
) -> Vec<HourlyPoint> {
    let factor = 1.0 + total_reduction_percent / 100.0;
    (0..24)
        .map(|hour| {
            let base = baseline_load(hour) + rng.random::<f64>() * MAX_JITTER;
            let scenario = base * factor;
            HourlyPoint {
                hour: format!("{hour}:00"),
                baseline: round1(base),
                scenario: round1(scenario),
                savings: round1(base - scenario),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_curve_shape() {
        assert!((baseline_load(0) - 250.0).abs() < 1e-9);
        assert!((baseline_load(6) - 300.0).abs() < 1e-9);
        assert!((baseline_load(18) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_series_has_24_labelled_hours() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = hourly_projection(-20.0, &mut rng);
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].hour, "0:00");
        assert_eq!(series[23].hour, "23:00");
    }

    #[test]
    fn test_jitter_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for (hour, point) in hourly_projection(0.0, &mut rng).iter().enumerate() {
            let smooth = baseline_load(hour as u32);
            assert!(point.baseline >= round1(smooth) - 0.1);
            assert!(point.baseline <= round1(smooth + MAX_JITTER) + 0.1);
            assert_eq!(point.baseline, point.scenario);
            assert_eq!(point.savings, 0.0);
        }
    }

    #[test]
    fn test_seeded_series_is_reproducible() {
        let a = hourly_projection(-15.0, &mut StdRng::seed_from_u64(99));
        let b = hourly_projection(-15.0, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_scenario_scaled_by_factor() {
        let mut rng = StdRng::seed_from_u64(3);
        for point in hourly_projection(-50.0, &mut rng) {
            // Rounding happens after scaling, so allow one decimal of slack
            assert!((point.scenario - point.baseline * 0.5).abs() <= 0.11);
            assert!(point.savings > 0.0);
        }
    }
}
