// What-if scenario projection.
//
// Each adjustment contributes an independent linear term to a total
// percentage change in consumption. The same factor is applied to the
// consumption, cost and carbon baselines. No interaction terms and no
// clamping: extreme inputs can project more than a 100% reduction.

use serde::{Deserialize, Serialize};

/// Percent change in consumption per unit of each adjustment.
pub const TEMPERATURE_COEFFICIENT: f64 = -2.5;
pub const OCCUPANCY_COEFFICIENT: f64 = -0.8;
pub const RENEWABLE_COEFFICIENT: f64 = -0.5;
pub const HVAC_COEFFICIENT: f64 = -0.6;
pub const LIGHTING_COEFFICIENT: f64 = -0.4;

const HOURS_PER_MONTH: f64 = 24.0 * 30.0;
const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Allowed range and step of one adjustment control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
}

impl SliderRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Control ranges in field order: temperature, occupancy, renewable, HVAC,
/// lighting. The projector itself ignores them.
pub const SLIDER_RANGES: [SliderRange; 5] = [
    SliderRange {
        name: "temperature adjustment",
        min: -5.0,
        max: 5.0,
        step: 0.5,
        unit: "°C",
    },
    SliderRange {
        name: "occupancy reduction",
        min: 0.0,
        max: 50.0,
        step: 5.0,
        unit: "%",
    },
    SliderRange {
        name: "renewable increase",
        min: 0.0,
        max: 100.0,
        step: 10.0,
        unit: "%",
    },
    SliderRange {
        name: "HVAC efficiency",
        min: 0.0,
        max: 50.0,
        step: 5.0,
        unit: "%",
    },
    SliderRange {
        name: "lighting efficiency",
        min: 0.0,
        max: 60.0,
        step: 10.0,
        unit: "%",
    },
];

/// The five what-if adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Thermostat change in °C
    pub temperature_adjustment: f64,
    /// Percent fewer occupants
    pub occupancy_reduction: f64,
    /// Percentage points more renewable supply
    pub renewable_increase: f64,
    /// Percent HVAC efficiency gain
    pub hvac_efficiency: f64,
    /// Percent lighting efficiency gain
    pub lighting_efficiency: f64,
}

impl ScenarioParameters {
    fn values(&self) -> [f64; 5] {
        [
            self.temperature_adjustment,
            self.occupancy_reduction,
            self.renewable_increase,
            self.hvac_efficiency,
            self.lighting_efficiency,
        ]
    }

    /// Check every value against its control range.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (value, range) in self.values().iter().zip(SLIDER_RANGES.iter()) {
            if !range.contains(*value) {
                anyhow::bail!(
                    "{} must be between {} and {}{} (got {})",
                    range.name,
                    range.min,
                    range.max,
                    range.unit,
                    value
                );
            }
        }
        Ok(())
    }
}

/// Hourly averages the scenario is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// kW
    pub consumption: f64,
    /// currency units per hour
    pub cost: f64,
    /// kg CO2 per hour
    pub carbon: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            consumption: 285.0,
            cost: 42.75,
            carbon: 142.5,
        }
    }
}

/// Contribution of each adjustment, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBreakdown {
    pub temperature: f64,
    pub occupancy: f64,
    pub renewable: f64,
    pub hvac: f64,
    pub lighting: f64,
}

impl ScenarioBreakdown {
    pub fn total(&self) -> f64 {
        self.temperature + self.occupancy + self.renewable + self.hvac + self.lighting
    }
}

/// Projected effect of a scenario on the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Signed percent change; negative means less consumption
    pub total_reduction_percent: f64,
    pub breakdown: ScenarioBreakdown,
    pub new_consumption: f64,
    pub new_cost: f64,
    pub new_carbon: f64,
    /// kW saved against the baseline
    pub savings_kw: f64,
    /// Cost saved over a 30-day month
    pub monthly_cost_savings: f64,
    /// CO2 saved over a year, in tonnes
    pub annual_carbon_savings_tonnes: f64,
}

impl ScenarioResult {
    /// Multiplier applied to every baseline figure.
    pub fn factor(&self) -> f64 {
        1.0 + self.total_reduction_percent / 100.0
    }
}

/// Per-term contributions for a set of adjustments.
pub fn breakdown(params: &ScenarioParameters) -> ScenarioBreakdown {
    ScenarioBreakdown {
        temperature: params.temperature_adjustment * TEMPERATURE_COEFFICIENT,
        occupancy: params.occupancy_reduction * OCCUPANCY_COEFFICIENT,
        renewable: params.renewable_increase * RENEWABLE_COEFFICIENT,
        hvac: params.hvac_efficiency * HVAC_COEFFICIENT,
        lighting: params.lighting_efficiency * LIGHTING_COEFFICIENT,
    }
}

/// Project a scenario onto the baseline.
pub fn project(params: &ScenarioParameters, baseline: &Baseline) -> ScenarioResult {
    let breakdown = breakdown(params);
    let total = breakdown.total();
    let factor = 1.0 + total / 100.0;

    let new_consumption = baseline.consumption * factor;
    let new_cost = baseline.cost * factor;
    let new_carbon = baseline.carbon * factor;

    ScenarioResult {
        total_reduction_percent: total,
        breakdown,
        new_consumption,
        new_cost,
        new_carbon,
        savings_kw: baseline.consumption - new_consumption,
        monthly_cost_savings: (baseline.cost - new_cost) * HOURS_PER_MONTH,
        annual_carbon_savings_tonnes: (baseline.carbon - new_carbon) * HOURS_PER_YEAR / 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_is_identity() {
        let result = project(&ScenarioParameters::default(), &Baseline::default());
        assert_eq!(result.total_reduction_percent, 0.0);
        assert_eq!(result.new_consumption, 285.0);
        assert_eq!(result.new_cost, 42.75);
        assert_eq!(result.savings_kw, 0.0);
    }

    #[test]
    fn test_typical_scenario() {
        let params = ScenarioParameters {
            temperature_adjustment: 2.0,
            occupancy_reduction: 10.0,
            renewable_increase: 20.0,
            hvac_efficiency: 10.0,
            lighting_efficiency: 20.0,
        };
        let result = project(&params, &Baseline::default());
        // -5 - 8 - 10 - 6 - 8 = -37
        assert!((result.total_reduction_percent + 37.0).abs() < 1e-9);
        // 285 * 0.63 = 179.55
        assert!((result.new_consumption - 179.55).abs() < 1e-9);
        assert!((result.savings_kw - 105.45).abs() < 1e-9);
        // (42.75 - 26.9325) * 720 = 11388.6
        assert!((result.monthly_cost_savings - 11388.6).abs() < 1e-6);
        // (142.5 - 89.775) * 8760 / 1000 = 461.871
        assert!((result.annual_carbon_savings_tonnes - 461.871).abs() < 1e-6);
    }

    #[test]
    fn test_negative_temperature_increases_consumption() {
        let params = ScenarioParameters {
            temperature_adjustment: -4.0,
            ..Default::default()
        };
        let result = project(&params, &Baseline::default());
        assert!((result.total_reduction_percent - 10.0).abs() < 1e-9);
        assert!(result.new_consumption > 285.0);
        assert!(result.savings_kw < 0.0);
    }

    #[test]
    fn test_extreme_inputs_are_not_clamped() {
        let params = ScenarioParameters {
            temperature_adjustment: 50.0,
            ..Default::default()
        };
        let result = project(&params, &Baseline::default());
        // 50 * -2.5 = -125%, which drives consumption below zero
        assert!((result.total_reduction_percent + 125.0).abs() < 1e-9);
        assert!((result.new_consumption + 71.25).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let params = ScenarioParameters {
            lighting_efficiency: 75.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err().to_string();
        assert!(err.contains("lighting efficiency"), "{err}");
        assert!(ScenarioParameters::default().validate().is_ok());
    }
}
