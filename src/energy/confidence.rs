// Prediction confidence tiers.
//
// The width of the prediction interval relative to the point estimate is
// bucketed into three qualitative tiers. A zero or non-finite ratio is
// reported as Undefined rather than silently landing in the widest tier.

use serde::{Deserialize, Serialize};

/// Uncertainty below this percentage is Low.
pub const LOW_UNCERTAINTY_MAX: f64 = 10.0;
/// Uncertainty below this percentage (and not Low) is Medium.
pub const MEDIUM_UNCERTAINTY_MAX: f64 = 20.0;

/// A point prediction with its interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionBounds {
    pub predicted: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Model confidence as a fraction, 0-1
    pub confidence: f64,
}

impl PredictionBounds {
    /// Interval width as a percentage of the prediction.
    /// `None` when the prediction is zero or the result is not finite.
    pub fn uncertainty_percent(&self) -> Option<f64> {
        if self.predicted == 0.0 {
            return None;
        }
        let pct = (self.upper_bound - self.lower_bound) / self.predicted * 100.0;
        pct.is_finite().then_some(pct)
    }

    /// Where the prediction sits inside the interval, 0-100.
    /// `None` for a zero-width interval.
    pub fn marker_position(&self) -> Option<f64> {
        let range = self.upper_bound - self.lower_bound;
        if range == 0.0 {
            return None;
        }
        let pos = (self.predicted - self.lower_bound) / range * 100.0;
        pos.is_finite().then_some(pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UncertaintyLevel {
    Low,
    Medium,
    High,
    /// The ratio could not be computed
    Undefined,
}

impl UncertaintyLevel {
    pub fn from_uncertainty(uncertainty: Option<f64>) -> Self {
        match uncertainty {
            None => UncertaintyLevel::Undefined,
            Some(u) if u < LOW_UNCERTAINTY_MAX => UncertaintyLevel::Low,
            Some(u) if u < MEDIUM_UNCERTAINTY_MAX => UncertaintyLevel::Medium,
            Some(_) => UncertaintyLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UncertaintyLevel::Low => "Low Risk",
            UncertaintyLevel::Medium => "Medium Risk",
            UncertaintyLevel::High => "High Risk",
            UncertaintyLevel::Undefined => "Undefined",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UncertaintyLevel::Low => "High confidence prediction with minimal variance",
            UncertaintyLevel::Medium => "Moderate uncertainty in prediction range",
            UncertaintyLevel::High => "Significant uncertainty - use caution",
            UncertaintyLevel::Undefined => "Uncertainty cannot be computed for a zero prediction",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            UncertaintyLevel::Low => "Prediction is highly reliable for decision-making",
            UncertaintyLevel::Medium => "Consider additional validation before critical decisions",
            UncertaintyLevel::High => "Verify with additional data points or alternative models",
            UncertaintyLevel::Undefined => "Re-run the prediction before relying on this interval",
        }
    }
}

impl std::fmt::Display for UncertaintyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying a prediction interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    pub level: UncertaintyLevel,
    pub uncertainty_percent: Option<f64>,
    pub description: String,
    pub recommendation: String,
    pub marker_position: Option<f64>,
}

pub fn classify(bounds: &PredictionBounds) -> ConfidenceAssessment {
    let uncertainty = bounds.uncertainty_percent();
    let level = UncertaintyLevel::from_uncertainty(uncertainty);
    ConfidenceAssessment {
        level,
        uncertainty_percent: uncertainty,
        description: level.description().to_string(),
        recommendation: level.recommendation().to_string(),
        marker_position: bounds.marker_position(),
    }
}
