// Heuristic authenticity score.
//
// Starts from a neutral 50 and applies one independent adjustment per
// signal. Every adjustment that fires records a message, so the verdict
// can be explained line by line. The result is clamped to 0-100 and mapped
// to a status through the band table.

use serde::{Deserialize, Serialize};

use super::features::AccountFeatures;
use super::status::{AccountStatus, StatusBands};

/// Weights and cut points for the authenticity heuristic.
///
/// `Default` is the calibration the dashboard ships with. Penalties are
/// stored as positive magnitudes and subtracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Starting score before any adjustment (default 50)
    pub baseline: f64,

    pub profile_picture_bonus: f64,
    pub missing_profile_picture_penalty: f64,

    /// Follower/following ratio below this is a red flag (default 0.5)
    pub ratio_low_cut: f64,
    /// Ratio above this is a positive indicator (default 2.0)
    pub ratio_high_cut: f64,
    pub ratio_weight: f64,

    /// Engagement rate (%) below this is a red flag (default 1.0)
    pub engagement_low_cut: f64,
    /// Engagement rate (%) above this earns the high bonus (default 3.0)
    pub engagement_high_cut: f64,
    pub engagement_low_penalty: f64,
    pub engagement_normal_bonus: f64,
    pub engagement_high_bonus: f64,

    /// Bios shorter than this many characters count as "very short"
    pub bio_short_cut: u64,
    pub empty_bio_penalty: f64,
    pub short_bio_penalty: f64,
    pub detailed_bio_bonus: f64,

    /// Fewer posts than this is a warning (default 10)
    pub few_posts_cut: u64,
    pub no_posts_penalty: f64,
    pub few_posts_penalty: f64,
    pub active_posts_bonus: f64,

    pub verified_bonus: f64,

    /// Usernames longer than this many characters get a warning
    pub long_username_cut: usize,
    pub long_username_penalty: f64,

    /// Digit share of the username above which it is a red flag
    pub digit_density_cut: f64,
    pub digit_username_penalty: f64,

    pub bands: StatusBands,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline: 50.0,
            profile_picture_bonus: 5.0,
            missing_profile_picture_penalty: 10.0,
            ratio_low_cut: 0.5,
            ratio_high_cut: 2.0,
            ratio_weight: 15.0,
            engagement_low_cut: 1.0,
            engagement_high_cut: 3.0,
            engagement_low_penalty: 15.0,
            engagement_normal_bonus: 5.0,
            engagement_high_bonus: 15.0,
            bio_short_cut: 20,
            empty_bio_penalty: 10.0,
            short_bio_penalty: 5.0,
            detailed_bio_bonus: 10.0,
            few_posts_cut: 10,
            no_posts_penalty: 20.0,
            few_posts_penalty: 10.0,
            active_posts_bonus: 10.0,
            verified_bonus: 20.0,
            long_username_cut: 25,
            long_username_penalty: 5.0,
            digit_density_cut: 0.5,
            digit_username_penalty: 10.0,
            bands: StatusBands::default(),
        }
    }
}

/// Messages explaining which adjustments fired, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactors {
    pub red_flags: Vec<String>,
    pub positive_indicators: Vec<String>,
    pub warnings: Vec<String>,
}

impl ScoreFactors {
    pub fn is_empty(&self) -> bool {
        self.red_flags.is_empty() && self.positive_indicators.is_empty() && self.warnings.is_empty()
    }
}

/// Output of the heuristic: clamped score, verdict, and the reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub status: AccountStatus,
    pub factors: ScoreFactors,
}

/// Score an account's authenticity from 0 (fake) to 100 (real).
pub fn score(features: &AccountFeatures, config: &ScoringConfig) -> ScoreResult {
    let mut total = config.baseline;
    let mut factors = ScoreFactors::default();

    if features.has_profile_picture {
        factors.positive_indicators.push("Has profile picture".to_string());
        total += config.profile_picture_bonus;
    } else {
        factors.red_flags.push("No profile picture".to_string());
        total -= config.missing_profile_picture_penalty;
    }

    let ratio = features.follower_ratio();
    if ratio < config.ratio_low_cut {
        factors
            .red_flags
            .push(format!("Low follower/following ratio ({ratio:.2})"));
        total -= config.ratio_weight;
    } else if ratio > config.ratio_high_cut {
        factors
            .positive_indicators
            .push(format!("Good follower/following ratio ({ratio:.2})"));
        total += config.ratio_weight;
    } else {
        factors
            .warnings
            .push(format!("Average follower/following ratio ({ratio:.2})"));
    }

    let engagement = features.engagement_rate();
    if engagement < config.engagement_low_cut {
        factors
            .red_flags
            .push(format!("Very low engagement rate ({engagement:.2}%)"));
        total -= config.engagement_low_penalty;
    } else if engagement > config.engagement_high_cut {
        factors
            .positive_indicators
            .push(format!("High engagement rate ({engagement:.2}%)"));
        total += config.engagement_high_bonus;
    } else {
        factors
            .positive_indicators
            .push(format!("Normal engagement rate ({engagement:.2}%)"));
        total += config.engagement_normal_bonus;
    }

    if features.bio_length == 0 {
        factors.red_flags.push("Empty bio".to_string());
        total -= config.empty_bio_penalty;
    } else if features.bio_length < config.bio_short_cut {
        factors.warnings.push("Very short bio".to_string());
        total -= config.short_bio_penalty;
    } else {
        factors.positive_indicators.push("Detailed bio".to_string());
        total += config.detailed_bio_bonus;
    }

    if features.post_count == 0 {
        factors.red_flags.push("No posts".to_string());
        total -= config.no_posts_penalty;
    } else if features.post_count < config.few_posts_cut {
        factors.warnings.push("Few posts".to_string());
        total -= config.few_posts_penalty;
    } else {
        factors
            .positive_indicators
            .push(format!("{} posts available", features.post_count));
        total += config.active_posts_bonus;
    }

    if features.is_verified {
        factors.positive_indicators.push("Verified account".to_string());
        total += config.verified_bonus;
    }

    let name_len = features.username_len();
    if name_len > config.long_username_cut {
        factors.warnings.push("Unusually long username".to_string());
        total -= config.long_username_penalty;
    }
    if features.username_digits() as f64 > name_len as f64 * config.digit_density_cut {
        factors.red_flags.push("Username has many numbers".to_string());
        total -= config.digit_username_penalty;
    }

    let score = total.clamp(0.0, 100.0);
    let status = config.bands.classify(score);

    ScoreResult {
        score,
        status,
        factors,
    }
}
