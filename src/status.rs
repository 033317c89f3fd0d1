// Backend status display: configuration plus a health probe of each
// remote service.

use anyhow::Result;
use colored::Colorize;

use crate::account::remote::RemoteClassifier;
use crate::backend::client::{BackendClient, HealthResponse};
use crate::config::Config;
use crate::energy::remote::RemotePredictor;

/// Display configuration and backend health to the terminal.
pub async fn show(config: &Config) -> Result<()> {
    let scoring = config.scoring()?;
    let bands: Vec<String> = scoring
        .bands
        .bands()
        .iter()
        .map(|b| format!("{} >= {}", b.status, b.min_score))
        .collect();
    println!("Status bands: {}", bands.join(", "));
    println!("Request timeout: {}s", config.timeout.as_secs());

    if config.offline {
        println!("Mode: {}", "offline (remote calls disabled)".yellow());
        return Ok(());
    }

    let account = RemoteClassifier::new(BackendClient::new(&config.account_api_url, config.timeout)?);
    print_health(
        "Account classifier",
        &config.account_api_url,
        account.health().await,
    );

    let energy = RemotePredictor::new(BackendClient::new(&config.energy_api_url, config.timeout)?);
    print_health(
        "Energy predictor",
        &config.energy_api_url,
        energy.health().await,
    );

    Ok(())
}

fn print_health(label: &str, url: &str, health: Result<HealthResponse>) {
    match health {
        Ok(h) if h.is_healthy() => {
            let model = match h.model_loaded {
                Some(true) => "model loaded".green().to_string(),
                Some(false) => "model NOT loaded".yellow().to_string(),
                None => "model state unknown".dimmed().to_string(),
            };
            println!("{label}: {} at {url} ({model})", "up".green());
        }
        Ok(h) => {
            println!("{label}: {} at {url} (status: {})", "degraded".yellow(), h.status);
        }
        Err(e) => {
            println!("{label}: {} at {url}", "unreachable".red());
            println!("  {}", format!("{e:#}").dimmed());
            println!("  Results will be computed in simulation mode.");
        }
    }
}
