// Authenticity status and the score bands that select it.

use serde::{Deserialize, Serialize};

/// Lower edge of the Real band.
pub const REAL_MIN_SCORE: f64 = 70.0;
/// Lower edge of the Suspicious band.
pub const SUSPICIOUS_MIN_SCORE: f64 = 40.0;

/// Three-way verdict on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Real,
    Suspicious,
    Fake,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Real => "Real",
            AccountStatus::Suspicious => "Suspicious",
            AccountStatus::Fake => "Fake",
        }
    }

    /// Risk label shown next to a heuristic verdict.
    pub fn risk_level(&self) -> &'static str {
        match self {
            AccountStatus::Real => "Low Risk",
            AccountStatus::Suspicious => "High Risk",
            AccountStatus::Fake => "Critical Risk",
        }
    }

    /// Interpret a backend status string such as "Likely Fake" or "real".
    pub fn from_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label.contains("fake") {
            AccountStatus::Fake
        } else if label.contains("real") {
            AccountStatus::Real
        } else {
            AccountStatus::Suspicious
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the band table: scores at or above `min_score` map to `status`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusBand {
    pub min_score: f64,
    pub status: AccountStatus,
}

/// Ordered score bands, highest first. The last band catches everything
/// below the others, including NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    bands: Vec<StatusBand>,
    floor: AccountStatus,
}

impl StatusBands {
    /// Build the table from the two cut points.
    pub fn new(real_min: f64, suspicious_min: f64) -> anyhow::Result<Self> {
        if !(0.0..=100.0).contains(&real_min) || !(0.0..=100.0).contains(&suspicious_min) {
            anyhow::bail!("Status thresholds must lie in 0..=100 (got {real_min}, {suspicious_min})");
        }
        if suspicious_min >= real_min {
            anyhow::bail!(
                "Suspicious threshold ({suspicious_min}) must be below the Real threshold ({real_min})"
            );
        }
        Ok(Self {
            bands: vec![
                StatusBand {
                    min_score: real_min,
                    status: AccountStatus::Real,
                },
                StatusBand {
                    min_score: suspicious_min,
                    status: AccountStatus::Suspicious,
                },
            ],
            floor: AccountStatus::Fake,
        })
    }

    pub fn bands(&self) -> &[StatusBand] {
        &self.bands
    }

    /// Pick the status for a score.
    pub fn classify(&self, score: f64) -> AccountStatus {
        self.bands
            .iter()
            .find(|b| score >= b.min_score)
            .map(|b| b.status)
            .unwrap_or(self.floor)
    }
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            bands: vec![
                StatusBand {
                    min_score: REAL_MIN_SCORE,
                    status: AccountStatus::Real,
                },
                StatusBand {
                    min_score: SUSPICIOUS_MIN_SCORE,
                    status: AccountStatus::Suspicious,
                },
            ],
            floor: AccountStatus::Fake,
        }
    }
}
