// Account analysis pipeline.
//
// Asks the remote classifier when one is configured and falls back to the
// local heuristic on any error (connection refused, timeout, non-2xx, bad
// JSON). There are no retries: a failed call degrades straight to the
// simulation result, which is tagged so the caller can say so.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::account::features::AccountFeatures;
use crate::account::heuristic::ScoringConfig;
use crate::account::traits::{analyze_locally, AccountAnalysis, AccountClassifier};
use crate::backend::AnalysisSource;

/// Analyze one account, falling back to the heuristic if the remote fails.
pub async fn analyze_account(
    remote: Option<&dyn AccountClassifier>,
    features: &AccountFeatures,
    config: &ScoringConfig,
) -> AccountAnalysis {
    let (analysis, failure) = classify_or_fallback(remote, features, config).await;
    if let Some(failure) = failure {
        failure.log();
    }
    if analysis.source == AnalysisSource::Simulation {
        info!(
            username = %features.username,
            score = format!("{:.1}", analysis.confidence),
            status = analysis.status.as_str(),
            "Scored account locally"
        );
    }
    analysis
}

/// A remote call that failed and was replaced by the heuristic.
struct RemoteFailure {
    classifier: String,
    username: String,
    error: anyhow::Error,
}

impl RemoteFailure {
    fn log(&self) {
        warn!(
            classifier = %self.classifier,
            username = %self.username,
            error = %self.error,
            "Remote classifier failed, using heuristic"
        );
    }
}

/// Remote verdict if there is one, otherwise the heuristic. Logging is left
/// to the caller so batch runs can keep it clear of the progress bar.
async fn classify_or_fallback(
    remote: Option<&dyn AccountClassifier>,
    features: &AccountFeatures,
    config: &ScoringConfig,
) -> (AccountAnalysis, Option<RemoteFailure>) {
    let failure = match remote {
        Some(classifier) => match classifier.classify(features).await {
            Ok(analysis) => return (analysis, None),
            Err(error) => Some(RemoteFailure {
                classifier: classifier.name().to_string(),
                username: features.username.clone(),
                error,
            }),
        },
        None => None,
    };
    (analyze_locally(features, config), failure)
}

/// Analyze many accounts with up to `concurrency` in flight.
///
/// Results come back in input order regardless of completion order.
pub async fn analyze_batch(
    remote: Option<&dyn AccountClassifier>,
    accounts: &[AccountFeatures],
    config: &ScoringConfig,
    concurrency: usize,
    show_progress: bool,
) -> Vec<AccountAnalysis> {
    let pb = if show_progress {
        let pb = ProgressBar::new(accounts.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  Analyzing [{bar:30}] {pos}/{len} ({eta})")
        {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results: Vec<(usize, AccountAnalysis)> =
        stream::iter(accounts.iter().enumerate().map(|(i, features)| {
            let pb = &pb;
            async move {
                let (analysis, failure) = classify_or_fallback(remote, features, config).await;
                if let Some(failure) = failure {
                    pb.suspend(|| failure.log());
                }
                debug!(
                    username = %features.username,
                    source = analysis.source.as_str(),
                    status = analysis.status.as_str(),
                    "Scored account"
                );
                pb.inc(1);
                (i, analysis)
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    pb.finish_and_clear();

    results.sort_by_key(|(i, _)| *i);
    results.into_iter().map(|(_, a)| a).collect()
}
