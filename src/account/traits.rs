// Account classifier trait: the seam between the remote model and the
// local heuristic.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::features::AccountFeatures;
use super::heuristic::{self, ScoreFactors, ScoringConfig};
use super::status::AccountStatus;
use crate::backend::AnalysisSource;

/// A complete account verdict, whichever classifier produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAnalysis {
    pub username: String,
    pub status: AccountStatus,
    /// Confidence in the verdict, 0-100
    pub confidence: f64,
    pub real_probability: f64,
    pub fake_probability: f64,
    pub risk_level: String,
    pub details: ScoreFactors,
    pub source: AnalysisSource,
    pub analyzed_at: DateTime<Utc>,
}

/// Run the heuristic and wrap it in the shared report shape.
pub fn analyze_locally(features: &AccountFeatures, config: &ScoringConfig) -> AccountAnalysis {
    let result = heuristic::score(features, config);
    AccountAnalysis {
        username: features.username.clone(),
        status: result.status,
        confidence: result.score,
        real_probability: result.score,
        fake_probability: 100.0 - result.score,
        risk_level: result.status.risk_level().to_string(),
        details: result.factors,
        source: AnalysisSource::Simulation,
        analyzed_at: Utc::now(),
    }
}

/// Anything that can turn account features into a verdict.
#[async_trait]
pub trait AccountClassifier: Send + Sync {
    /// Short name for logs and status output.
    fn name(&self) -> &str;

    async fn classify(&self, features: &AccountFeatures) -> Result<AccountAnalysis>;
}

/// The local heuristic behind the classifier trait. Never fails.
pub struct HeuristicClassifier {
    pub config: ScoringConfig,
}

impl HeuristicClassifier {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AccountClassifier for HeuristicClassifier {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn classify(&self, features: &AccountFeatures) -> Result<AccountAnalysis> {
        Ok(analyze_locally(features, &self.config))
    }
}
