// Remote ML account classifier.
//
// The backend runs a trained classifier over a fixed feature vector and
// answers with a verdict plus class probabilities, or, in its older form,
// a status with a single score. This adapter only maps our features onto
// its field names and either answer onto AccountAnalysis.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::features::AccountFeatures;
use super::heuristic::ScoreFactors;
use super::status::AccountStatus;
use super::traits::{AccountAnalysis, AccountClassifier};
use crate::backend::client::{BackendClient, HealthResponse};
use crate::backend::AnalysisSource;

/// Verdicts below this confidence carry a warning.
const LOW_CONFIDENCE: f64 = 70.0;

/// Classifier backed by the remote `/api/analyze` endpoint.
pub struct RemoteClassifier {
    client: BackendClient,
}

impl RemoteClassifier {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.client.get_json("api/health").await
    }
}

#[async_trait]
impl AccountClassifier for RemoteClassifier {
    fn name(&self) -> &str {
        self.client.base_url()
    }

    async fn classify(&self, features: &AccountFeatures) -> Result<AccountAnalysis> {
        let request = AnalyzeRequest::from(features);
        let response: AnalyzeReply = self.client.post_json("api/analyze", &request).await?;

        debug!(
            username = %features.username,
            status = response.status(),
            "Remote classifier answered"
        );

        Ok(response.into_analysis(&features.username))
    }
}

/// Request body in the backend's feature naming.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "Profile Pic")]
    pub profile_pic: u8,
    #[serde(rename = "Nums/Length Username")]
    pub nums_length_username: f64,
    #[serde(rename = "Full Name Words")]
    pub full_name_words: usize,
    #[serde(rename = "Bio Length")]
    pub bio_length: u64,
    #[serde(rename = "External Url")]
    pub external_url: u8,
    #[serde(rename = "Private")]
    pub private: u8,
    #[serde(rename = "Verified")]
    pub verified: u8,
    #[serde(rename = "Business")]
    pub business: u8,
    #[serde(rename = "#Posts")]
    pub posts: u64,
    #[serde(rename = "#Followers")]
    pub followers: u64,
    #[serde(rename = "#Following")]
    pub following: u64,
}

impl From<&AccountFeatures> for AnalyzeRequest {
    fn from(f: &AccountFeatures) -> Self {
        Self {
            profile_pic: f.has_profile_picture as u8,
            nums_length_username: f.username_digit_density(),
            full_name_words: f.full_name_words(),
            bio_length: f.bio_length,
            external_url: f.has_external_url as u8,
            private: f.is_private as u8,
            verified: f.is_verified as u8,
            business: 0,
            posts: f.post_count,
            followers: f.follower_count,
            following: f.following_count,
        }
    }
}

/// Response from `/api/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(default)]
    pub is_fake: bool,
    pub confidence: f64,
    pub real_probability: f64,
    pub fake_probability: f64,
    pub risk_level: String,
    /// Naive ISO-8601 timestamp from the backend's local clock
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl AnalyzeResponse {
    pub fn into_analysis(self, username: &str) -> AccountAnalysis {
        let mut details = ScoreFactors::default();
        if self.is_fake {
            details
                .red_flags
                .push("Account flagged as fake by ML model".to_string());
        } else {
            details
                .positive_indicators
                .push("Account appears authentic".to_string());
        }
        if self.confidence < LOW_CONFIDENCE {
            details.warnings.push("Low confidence prediction".to_string());
        }

        let analyzed_at = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        AccountAnalysis {
            username: username.to_string(),
            status: AccountStatus::from_label(&self.status),
            confidence: self.confidence,
            real_probability: self.real_probability,
            fake_probability: self.fake_probability,
            risk_level: self.risk_level,
            details,
            source: AnalysisSource::Live,
            analyzed_at,
        }
    }
}

/// Score-only answer: `{status, score, details}` with `details` a run of
/// sentences explaining the score.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleAnalyzeResponse {
    pub status: String,
    pub score: f64,
    #[serde(default)]
    pub details: Option<String>,
}

impl SimpleAnalyzeResponse {
    pub fn into_analysis(self, username: &str) -> AccountAnalysis {
        let status = AccountStatus::from_label(&self.status);
        let score = self.score.clamp(0.0, 100.0);

        let reasons: Vec<String> = self
            .details
            .as_deref()
            .unwrap_or_default()
            .split(". ")
            .map(|s| s.trim().trim_end_matches('.').trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let mut details = ScoreFactors::default();
        match status {
            AccountStatus::Real => details.positive_indicators = reasons,
            AccountStatus::Suspicious => details.warnings = reasons,
            AccountStatus::Fake => details.red_flags = reasons,
        }

        AccountAnalysis {
            username: username.to_string(),
            status,
            confidence: score,
            real_probability: score,
            fake_probability: 100.0 - score,
            risk_level: status.risk_level().to_string(),
            details,
            source: AnalysisSource::Live,
            analyzed_at: Utc::now(),
        }
    }
}

/// Either answer shape the analyze endpoint produces.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeReply {
    Full(AnalyzeResponse),
    Simple(SimpleAnalyzeResponse),
}

impl AnalyzeReply {
    pub fn status(&self) -> &str {
        match self {
            AnalyzeReply::Full(r) => &r.status,
            AnalyzeReply::Simple(r) => &r.status,
        }
    }

    pub fn into_analysis(self, username: &str) -> AccountAnalysis {
        match self {
            AnalyzeReply::Full(r) => r.into_analysis(username),
            AnalyzeReply::Simple(r) => r.into_analysis(username),
        }
    }
}

/// Accept both RFC 3339 and the naive `datetime.isoformat()` form.
fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_isoformat() {
        let dt = parse_timestamp("2026-03-01T12:30:45.123456").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-03-01 12:30:45");
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2026-03-01T12:30:45Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn score_only_reply_maps_to_report() {
        let reply: AnalyzeReply = serde_json::from_str(
            r#"{"status": "fake", "score": 22, "details": "Very low follower/following ratio - possible fake account. Very new account - higher risk. "}"#,
        )
        .unwrap();
        assert!(matches!(reply, AnalyzeReply::Simple(_)));

        let analysis = reply.into_analysis("bot_4411");
        assert_eq!(analysis.status, AccountStatus::Fake);
        assert_eq!(analysis.real_probability, 22.0);
        assert_eq!(analysis.fake_probability, 78.0);
        assert_eq!(analysis.risk_level, "Critical Risk");
        assert_eq!(analysis.source, AnalysisSource::Live);
        assert_eq!(
            analysis.details.red_flags,
            vec![
                "Very low follower/following ratio - possible fake account",
                "Very new account - higher risk",
            ]
        );
    }

    #[test]
    fn full_reply_takes_precedence() {
        let reply: AnalyzeReply = serde_json::from_str(
            r#"{"status": "Likely Real", "is_fake": false, "confidence": 88.0,
                "real_probability": 88.0, "fake_probability": 12.0, "risk_level": "Low Risk"}"#,
        )
        .unwrap();
        assert!(matches!(reply, AnalyzeReply::Full(_)));
        assert_eq!(reply.status(), "Likely Real");
        assert_eq!(reply.into_analysis("x").status, AccountStatus::Real);
    }

    #[test]
    fn score_only_reply_without_details() {
        let reply: AnalyzeReply =
            serde_json::from_str(r#"{"status": "suspicious", "score": 55}"#).unwrap();
        let analysis = reply.into_analysis("someone");
        assert_eq!(analysis.status, AccountStatus::Suspicious);
        assert!(analysis.details.is_empty());
    }

    #[test]
    fn unrecognized_reply_is_an_error() {
        assert!(serde_json::from_str::<AnalyzeReply>(r#"{"error": "Model not loaded"}"#).is_err());
    }
}
