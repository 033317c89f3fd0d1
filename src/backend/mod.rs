// Remote backends: the ML services the local heuristics stand in for.
//
// Both backends speak plain JSON over HTTP. The account classifier lives at
// `{base}/api/analyze`, the energy predictor at `{base}/predict`. Neither is
// required: every caller falls back to a local estimate when they fail.

use serde::{Deserialize, Serialize};

pub mod client;

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    /// Answered by the remote service
    Live,
    /// Computed locally because the remote service was unavailable
    Simulation,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Live => "live",
            AnalysisSource::Simulation => "simulation",
        }
    }
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
