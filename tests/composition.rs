// Composition tests: the fallback pipelines wired to fake backends.
//
// These exercise the data flow between modules:
//   classifier/predictor -> fallback -> report -> confidence tier
// without reaching a real ML service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use appraise::account::features::AccountFeatures;
use appraise::account::heuristic::{ScoreFactors, ScoringConfig};
use appraise::account::remote::RemoteClassifier;
use appraise::account::status::AccountStatus;
use appraise::account::traits::{AccountAnalysis, AccountClassifier, HeuristicClassifier};
use appraise::backend::client::BackendClient;
use appraise::backend::AnalysisSource;
use appraise::energy::confidence::{classify, PredictionBounds, UncertaintyLevel};
use appraise::energy::prediction::{mock_prediction, EnergyPrediction, EnergyReading};
use appraise::energy::remote::RemotePredictor;
use appraise::energy::traits::{EnergyPredictor, MockPredictor};
use appraise::pipeline::analyze::{analyze_account, analyze_batch};
use appraise::pipeline::predict::predict_energy;
use appraise::quota::{MessageQuota, QuotaDecision};

// ============================================================
// Fakes
// ============================================================

struct FailingClassifier {
    calls: AtomicUsize,
}

#[async_trait]
impl AccountClassifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn classify(&self, _features: &AccountFeatures) -> Result<AccountAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        bail!("connection refused")
    }
}

/// Always answers "Real" at 91% after a per-username delay.
struct LiveClassifier;

#[async_trait]
impl AccountClassifier for LiveClassifier {
    fn name(&self) -> &str {
        "live"
    }

    async fn classify(&self, features: &AccountFeatures) -> Result<AccountAnalysis> {
        // Longer names finish first so completion order differs from input order
        let delay = 40u64.saturating_sub(features.username.len() as u64 * 4);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(AccountAnalysis {
            username: features.username.clone(),
            status: AccountStatus::Real,
            confidence: 91.0,
            real_probability: 91.0,
            fake_probability: 9.0,
            risk_level: AccountStatus::Real.risk_level().to_string(),
            details: ScoreFactors::default(),
            source: AnalysisSource::Live,
            analyzed_at: Utc::now(),
        })
    }
}

/// Fails for usernames starting with "x", answers otherwise.
struct FlakyClassifier;

#[async_trait]
impl AccountClassifier for FlakyClassifier {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn classify(&self, features: &AccountFeatures) -> Result<AccountAnalysis> {
        if features.username.starts_with('x') {
            bail!("HTTP 503")
        }
        LiveClassifier.classify(features).await
    }
}

struct FixedPredictor(PredictionBounds);

#[async_trait]
impl EnergyPredictor for FixedPredictor {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn predict(&self, _reading: &EnergyReading) -> Result<EnergyPrediction> {
        Ok(EnergyPrediction {
            bounds: self.0,
            source: AnalysisSource::Live,
        })
    }
}

struct FailingPredictor;

#[async_trait]
impl EnergyPredictor for FailingPredictor {
    fn name(&self) -> &str {
        "failing"
    }

    async fn predict(&self, _reading: &EnergyReading) -> Result<EnergyPrediction> {
        bail!("timed out")
    }
}

fn account(username: &str) -> AccountFeatures {
    AccountFeatures {
        username: username.to_string(),
        follower_count: 1500,
        following_count: 300,
        post_count: 45,
        bio_length: 80,
        has_profile_picture: true,
        average_likes: 60.0,
        ..Default::default()
    }
}

fn reading() -> EnergyReading {
    EnergyReading {
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

/// A port nothing listens on; the connection is refused or times out.
fn unreachable_client() -> BackendClient {
    BackendClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap()
}

// ============================================================
// Chain: classifier -> fallback -> report
// ============================================================

#[tokio::test]
async fn no_remote_uses_heuristic() {
    let analysis = analyze_account(None, &account("marta.photos"), &ScoringConfig::default()).await;
    assert_eq!(analysis.source, AnalysisSource::Simulation);
    assert_eq!(analysis.status, AccountStatus::Real);
    assert_eq!(analysis.confidence, 100.0);
}

#[tokio::test]
async fn failing_remote_falls_back_once() {
    let remote = FailingClassifier {
        calls: AtomicUsize::new(0),
    };
    let analysis = analyze_account(
        Some(&remote),
        &account("marta.photos"),
        &ScoringConfig::default(),
    )
    .await;

    // No retries: one attempt, then the heuristic verdict
    assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    assert_eq!(analysis.source, AnalysisSource::Simulation);
    assert_eq!(analysis.real_probability + analysis.fake_probability, 100.0);
}

#[tokio::test]
async fn live_answer_is_passed_through() {
    let analysis = analyze_account(
        Some(&LiveClassifier),
        &AccountFeatures::default(),
        &ScoringConfig::default(),
    )
    .await;
    assert_eq!(analysis.source, AnalysisSource::Live);
    assert_eq!(analysis.confidence, 91.0);
}

#[tokio::test]
async fn unreachable_backend_degrades_to_simulation() {
    let remote = RemoteClassifier::new(unreachable_client());
    let analysis = analyze_account(
        Some(&remote),
        &account("marta.photos"),
        &ScoringConfig::default(),
    )
    .await;
    assert_eq!(analysis.source, AnalysisSource::Simulation);
}

#[tokio::test]
async fn heuristic_classifier_as_trait_object() {
    let classifier: Box<dyn AccountClassifier> =
        Box::new(HeuristicClassifier::new(ScoringConfig::default()));
    assert_eq!(classifier.name(), "heuristic");

    let analysis = analyze_account(
        Some(classifier.as_ref()),
        &account("marta.photos"),
        &ScoringConfig::default(),
    )
    .await;
    assert_eq!(analysis.source, AnalysisSource::Simulation);
    assert_eq!(analysis.status, AccountStatus::Real);
    assert!(!analysis.details.is_empty());
}

#[tokio::test]
async fn batch_preserves_input_order() {
    let names = ["a", "bb", "ccc", "dddd", "eeeee", "ffffff", "ggggggg"];
    let accounts: Vec<AccountFeatures> = names.iter().map(|n| account(n)).collect();

    let results = analyze_batch(
        Some(&LiveClassifier),
        &accounts,
        &ScoringConfig::default(),
        4,
        false,
    )
    .await;

    let got: Vec<&str> = results.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(got, names);
    assert!(results.iter().all(|a| a.source == AnalysisSource::Live));
}

#[tokio::test]
async fn batch_falls_back_per_account() {
    let accounts = vec![account("alice"), account("xavier"), account("bob")];
    let results = analyze_batch(
        Some(&FlakyClassifier),
        &accounts,
        &ScoringConfig::default(),
        2,
        false,
    )
    .await;

    let sources: Vec<AnalysisSource> = results.iter().map(|a| a.source).collect();
    assert_eq!(
        sources,
        vec![
            AnalysisSource::Live,
            AnalysisSource::Simulation,
            AnalysisSource::Live
        ]
    );
}

#[tokio::test]
async fn batch_of_nothing_is_empty() {
    let results = analyze_batch(None, &[], &ScoringConfig::default(), 0, false).await;
    assert!(results.is_empty());
}

// ============================================================
// Chain: predictor -> fallback -> confidence tier
// ============================================================

#[tokio::test]
async fn simulated_prediction_gets_default_interval() {
    let prediction = predict_energy(None, &reading()).await;
    assert_eq!(prediction.source, AnalysisSource::Simulation);
    assert!((prediction.predicted() - mock_prediction(&reading())).abs() < 1e-9);
    assert_eq!(prediction.bounds.confidence, 0.85);

    // ±10% is a 20% width, which lands in the high tier
    assert_eq!(classify(&prediction.bounds).level, UncertaintyLevel::High);
}

#[tokio::test]
async fn mock_predictor_as_trait_object() {
    let predictor: Box<dyn EnergyPredictor> = Box::new(MockPredictor);
    assert_eq!(predictor.name(), "simulation");

    let direct = predictor.predict(&reading()).await.unwrap();
    let piped = predict_energy(Some(predictor.as_ref()), &reading()).await;
    assert_eq!(direct, piped);
    assert_eq!(piped.source, AnalysisSource::Simulation);
}

#[tokio::test]
async fn failing_predictor_falls_back() {
    let prediction = predict_energy(Some(&FailingPredictor), &reading()).await;
    assert_eq!(prediction.source, AnalysisSource::Simulation);
}

#[tokio::test]
async fn unreachable_predictor_falls_back() {
    let remote = RemotePredictor::new(unreachable_client());
    let prediction = predict_energy(Some(&remote), &reading()).await;
    assert_eq!(prediction.source, AnalysisSource::Simulation);
}

#[tokio::test]
async fn live_interval_flows_into_classifier() {
    let remote = FixedPredictor(PredictionBounds {
        predicted: 100.0,
        lower_bound: 95.0,
        upper_bound: 105.0,
        confidence: 0.9,
    });
    let prediction = predict_energy(Some(&remote), &reading()).await;
    assert_eq!(prediction.source, AnalysisSource::Live);

    let assessment = classify(&prediction.bounds);
    assert_eq!(assessment.level, UncertaintyLevel::Medium);
    assert_eq!(assessment.marker_position, Some(50.0));
}

// ============================================================
// Chain: quota threaded through a session
// ============================================================

#[test]
fn quota_value_threads_through_a_session() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let mut quota = MessageQuota::default();
    let mut sent = 0;

    // One attempt every 600ms: every other attempt is too soon
    for i in 0..10 {
        let now = start + chrono::Duration::milliseconds(600 * i);
        match quota.check(now) {
            QuotaDecision::Allowed => {
                quota = quota.record(now);
                sent += 1;
            }
            QuotaDecision::TooSoon { wait_secs } => assert_eq!(wait_secs, 1),
            QuotaDecision::SessionLimit { .. } => panic!("limit reached early"),
        }
    }

    assert_eq!(sent, 5);
    assert_eq!(quota.count, 5);
    assert_eq!(quota.remaining(), 45);
}
