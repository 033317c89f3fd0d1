use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use appraise::account::features::AccountFeatures;
use appraise::account::remote::RemoteClassifier;
use appraise::account::heuristic::ScoringConfig;
use appraise::account::traits::{AccountAnalysis, AccountClassifier, HeuristicClassifier};
use appraise::backend::client::BackendClient;
use appraise::config::Config;
use appraise::energy::confidence::{self, ConfidenceAssessment, PredictionBounds};
use appraise::energy::hourly::{self, HourlyPoint};
use appraise::energy::prediction::{
    current_load, efficiency_score, EnergyPrediction, EnergyReading, UsageLevel,
};
use appraise::energy::remote::RemotePredictor;
use appraise::energy::scenario::{self, Baseline, ScenarioParameters, ScenarioResult};
use appraise::energy::traits::{EnergyPredictor, MockPredictor};
use appraise::output::{self, terminal};
use appraise::pipeline;

/// Appraise: heuristic account authenticity and energy scenario scoring.
///
/// Each command asks the configured ML backend first and falls back to a
/// local heuristic ("simulation mode") when the backend can't be reached.
#[derive(Parser)]
#[command(name = "appraise", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single account for authenticity
    Analyze {
        #[command(flatten)]
        account: AccountArgs,

        /// Skip the remote classifier and use the heuristic only
        #[arg(long)]
        offline: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every account in a JSON file (an array of account records)
    Batch {
        /// Path to the JSON file
        file: PathBuf,

        /// Number of accounts to analyze in parallel (default: 8)
        #[arg(long, default_value = "8")]
        concurrency: usize,

        #[arg(long)]
        offline: bool,

        #[arg(long)]
        json: bool,
    },

    /// Project a what-if energy scenario
    Scenario {
        /// Thermostat adjustment in °C (-5 to 5)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        temperature: f64,

        /// Occupancy reduction in % (0 to 50)
        #[arg(long, default_value = "0")]
        occupancy: f64,

        /// Renewable increase in % (0 to 100)
        #[arg(long, default_value = "0")]
        renewable: f64,

        /// HVAC efficiency improvement in % (0 to 50)
        #[arg(long, default_value = "0")]
        hvac: f64,

        /// Lighting efficiency gain in % (0 to 60)
        #[arg(long, default_value = "0")]
        lighting: f64,

        /// Baseline consumption in kW
        #[arg(long, default_value = "285")]
        baseline_consumption: f64,

        /// Baseline cost per hour
        #[arg(long, default_value = "42.75")]
        baseline_cost: f64,

        /// Baseline carbon in kg CO2 per hour
        #[arg(long, default_value = "142.5")]
        baseline_carbon: f64,

        /// Also print the illustrative 24-hour projection
        #[arg(long)]
        hourly: bool,

        /// Seed for the hourly projection jitter (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Predict energy consumption for a set of building conditions
    Predict {
        /// Moment to predict, e.g. 2026-03-02T14:00 (default: now)
        #[arg(long, value_parser = parse_timestamp)]
        timestamp: Option<NaiveDateTime>,

        /// Outdoor temperature in °C
        #[arg(long, default_value = "24.3", allow_negative_numbers = true)]
        temperature: f64,

        /// Relative humidity in %
        #[arg(long, default_value = "62.5")]
        humidity: f64,

        /// Number of occupants
        #[arg(long, default_value = "1800")]
        occupancy: f64,

        /// Renewable share of supply in %
        #[arg(long, default_value = "55")]
        renewable: f64,

        /// HVAC is switched off
        #[arg(long)]
        hvac_off: bool,

        /// Lighting is switched off
        #[arg(long)]
        lighting_off: bool,

        /// The day is a public holiday
        #[arg(long)]
        holiday: bool,

        #[arg(long)]
        offline: bool,

        #[arg(long)]
        json: bool,
    },

    /// Classify the uncertainty of an existing prediction interval
    Confidence {
        #[arg(long, allow_negative_numbers = true)]
        predicted: f64,

        #[arg(long, allow_negative_numbers = true)]
        lower: f64,

        #[arg(long, allow_negative_numbers = true)]
        upper: f64,

        /// Model confidence as a fraction (0-1)
        #[arg(long, default_value = "0.85")]
        confidence: f64,

        #[arg(long)]
        json: bool,
    },

    /// Show configuration and backend health
    Status,
}

/// Account attributes as command-line flags.
#[derive(clap::Args)]
struct AccountArgs {
    /// Account username
    username: String,

    /// Display name
    #[arg(long, default_value = "")]
    full_name: String,

    #[arg(long, default_value = "0")]
    followers: u64,

    #[arg(long, default_value = "0")]
    following: u64,

    #[arg(long, default_value = "0")]
    posts: u64,

    /// Bio text (its length in characters is what gets scored)
    #[arg(long, default_value = "")]
    bio: String,

    /// The account has no profile picture
    #[arg(long)]
    no_profile_picture: bool,

    #[arg(long)]
    verified: bool,

    #[arg(long)]
    private: bool,

    /// The profile links to an external URL
    #[arg(long)]
    external_url: bool,

    /// Average likes per post
    #[arg(long, default_value = "0")]
    avg_likes: f64,

    /// Average comments per post
    #[arg(long, default_value = "0")]
    avg_comments: f64,
}

impl From<AccountArgs> for AccountFeatures {
    fn from(a: AccountArgs) -> Self {
        Self {
            username: a.username,
            full_name: a.full_name,
            follower_count: a.followers,
            following_count: a.following,
            post_count: a.posts,
            bio_length: a.bio.chars().count() as u64,
            has_profile_picture: !a.no_profile_picture,
            is_verified: a.verified,
            is_private: a.private,
            has_external_url: a.external_url,
            average_likes: a.avg_likes,
            average_comments: a.avg_comments,
        }
    }
}

#[derive(Serialize)]
struct ScenarioOutput<'a> {
    parameters: &'a ScenarioParameters,
    baseline: &'a Baseline,
    result: &'a ScenarioResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    hourly: Option<&'a [HourlyPoint]>,
}

#[derive(Serialize)]
struct PredictionOutput<'a> {
    reading: &'a EnergyReading,
    prediction: &'a EnergyPrediction,
    assessment: &'a ConfidenceAssessment,
    usage_level: UsageLevel,
    current_load: f64,
    efficiency_score: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("appraise=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            account,
            offline,
            json,
        } => {
            let config = Config::load()?;
            let scoring = config.scoring()?;
            let classifier = account_classifier(&config, &scoring, offline)?;
            let features = AccountFeatures::from(account);

            let analysis = pipeline::analyze::analyze_account(
                Some(classifier.as_ref()),
                &features,
                &scoring,
            )
            .await;

            if json {
                output::print_json(&analysis)?;
            } else {
                terminal::display_account_analysis(&analysis);
            }
        }

        Commands::Batch {
            file,
            concurrency,
            offline,
            json,
        } => {
            let config = Config::load()?;
            let scoring = config.scoring()?;
            let classifier = account_classifier(&config, &scoring, offline)?;

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let accounts: Vec<AccountFeatures> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of accounts", file.display()))?;

            info!(
                accounts = accounts.len(),
                concurrency = concurrency,
                "Starting batch analysis"
            );

            let results: Vec<AccountAnalysis> = pipeline::analyze::analyze_batch(
                Some(classifier.as_ref()),
                &accounts,
                &scoring,
                concurrency,
                !json,
            )
            .await;

            if json {
                output::print_json(&results)?;
            } else {
                terminal::display_batch(&results);
            }
        }

        Commands::Scenario {
            temperature,
            occupancy,
            renewable,
            hvac,
            lighting,
            baseline_consumption,
            baseline_cost,
            baseline_carbon,
            hourly: show_hourly,
            seed,
            json,
        } => {
            let params = ScenarioParameters {
                temperature_adjustment: temperature,
                occupancy_reduction: occupancy,
                renewable_increase: renewable,
                hvac_efficiency: hvac,
                lighting_efficiency: lighting,
            };
            params.validate()?;

            let baseline = Baseline {
                consumption: baseline_consumption,
                cost: baseline_cost,
                carbon: baseline_carbon,
            };
            let result = scenario::project(&params, &baseline);

            let series = if show_hourly {
                let points = match seed {
                    Some(seed) => hourly::hourly_projection(
                        result.total_reduction_percent,
                        &mut StdRng::seed_from_u64(seed),
                    ),
                    None => hourly::hourly_projection(
                        result.total_reduction_percent,
                        &mut rand::rng(),
                    ),
                };
                Some(points)
            } else {
                None
            };

            if json {
                output::print_json(&ScenarioOutput {
                    parameters: &params,
                    baseline: &baseline,
                    result: &result,
                    hourly: series.as_deref(),
                })?;
            } else {
                terminal::display_scenario(&result, series.as_deref());
            }
        }

        Commands::Predict {
            timestamp,
            temperature,
            humidity,
            occupancy,
            renewable,
            hvac_off,
            lighting_off,
            holiday,
            offline,
            json,
        } => {
            let config = Config::load()?;
            let predictor: Box<dyn EnergyPredictor> = if offline || config.offline {
                Box::new(MockPredictor)
            } else {
                Box::new(RemotePredictor::new(BackendClient::new(
                    &config.energy_api_url,
                    config.timeout,
                )?))
            };

            let reading = EnergyReading {
                timestamp: timestamp.unwrap_or_else(|| chrono::Local::now().naive_local()),
                temperature,
                humidity,
                occupancy,
                renewable_percent: renewable,
                hvac_on: !hvac_off,
                lighting_on: !lighting_off,
                is_holiday: holiday,
            };

            let prediction = pipeline::predict::predict_energy(
                Some(predictor.as_ref()),
                &reading,
            )
            .await;
            let assessment = confidence::classify(&prediction.bounds);

            if json {
                output::print_json(&PredictionOutput {
                    reading: &reading,
                    prediction: &prediction,
                    assessment: &assessment,
                    usage_level: prediction.usage_level(),
                    current_load: current_load(prediction.predicted()),
                    efficiency_score: efficiency_score(renewable, prediction.predicted()),
                })?;
            } else {
                terminal::display_prediction(&prediction, &assessment, renewable);
            }
        }

        Commands::Confidence {
            predicted,
            lower,
            upper,
            confidence: model_confidence,
            json,
        } => {
            if lower > upper {
                anyhow::bail!("--lower ({lower}) must not exceed --upper ({upper})");
            }
            let bounds = PredictionBounds {
                predicted,
                lower_bound: lower,
                upper_bound: upper,
                confidence: model_confidence,
            };
            let assessment = confidence::classify(&bounds);

            if json {
                output::print_json(&assessment)?;
            } else {
                println!(
                    "\n{}",
                    format!("=== Confidence for {predicted:.2} [{lower:.2}, {upper:.2}] ===").bold()
                );
                terminal::display_confidence(&assessment);
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            appraise::status::show(&config).await?;
        }
    }

    Ok(())
}

/// The remote classifier, or the heuristic itself in offline mode.
fn account_classifier(
    config: &Config,
    scoring: &ScoringConfig,
    offline: bool,
) -> Result<Box<dyn AccountClassifier>> {
    if offline || config.offline {
        info!("Offline mode: using heuristic classifier only");
        return Ok(Box::new(HeuristicClassifier::new(scoring.clone())));
    }
    let client = BackendClient::new(&config.account_api_url, config.timeout)?;
    Ok(Box::new(RemoteClassifier::new(client)))
}

/// Parse `YYYY-MM-DDTHH:MM` (seconds optional).
fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM ({e})"))
}
