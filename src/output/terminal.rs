// Colored terminal output for account verdicts, scenarios and predictions.
//
// main.rs delegates here for everything that isn't --json.

use colored::Colorize;

use crate::account::status::AccountStatus;
use crate::account::traits::AccountAnalysis;
use crate::backend::AnalysisSource;
use crate::energy::confidence::{ConfidenceAssessment, UncertaintyLevel};
use crate::energy::hourly::HourlyPoint;
use crate::energy::prediction::{current_load, efficiency_score, EnergyPrediction, UsageLevel};
use crate::energy::scenario::ScenarioResult;

/// Display a single account verdict with its reasons.
pub fn display_account_analysis(analysis: &AccountAnalysis) {
    println!(
        "\n{}",
        format!("=== Analysis for @{} ===", analysis.username).bold()
    );
    println!("  Status:     {}", colorize_status(analysis.status));
    println!("  Confidence: {:.1}%", analysis.confidence);
    println!(
        "  Real/Fake:  {:.1}% / {:.1}%",
        analysis.real_probability, analysis.fake_probability
    );
    println!("  Risk level: {}", analysis.risk_level);
    println!("  Source:     {}", describe_source(analysis.source));

    let details = &analysis.details;
    if details.is_empty() {
        println!("\n  {}", "No factors reported.".dimmed());
        return;
    }
    if !details.red_flags.is_empty() {
        println!("\n  {}", "Red flags:".red().bold());
        for flag in &details.red_flags {
            println!("    {} {}", "x".red(), flag);
        }
    }
    if !details.warnings.is_empty() {
        println!("\n  {}", "Warnings:".yellow().bold());
        for warning in &details.warnings {
            println!("    {} {}", "~".yellow(), warning);
        }
    }
    if !details.positive_indicators.is_empty() {
        println!("\n  {}", "Positive indicators:".green().bold());
        for item in &details.positive_indicators {
            println!("    {} {}", "+".green(), item);
        }
    }
}

/// Display a ranked table of batch results (lowest confidence first).
pub fn display_batch(results: &[AccountAnalysis]) {
    if results.is_empty() {
        println!("No accounts in input.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Batch Analysis ({} accounts) ===", results.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<32} {:>6}  {:<11}  {:<14}  {:<10}",
        "Rank".dimmed(),
        "Username".dimmed(),
        "Score".dimmed(),
        "Status".dimmed(),
        "Risk".dimmed(),
        "Source".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    let mut ranked: Vec<&AccountAnalysis> = results.iter().collect();
    ranked.sort_by(|a, b| {
        a.real_probability
            .partial_cmp(&b.real_probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (i, a) in ranked.iter().enumerate() {
        println!(
            "  {:>4}. @{:<30} {:>6.1}  {:<11}  {:<14}  {:<10}",
            i + 1,
            super::truncate_chars(&a.username, 27),
            a.real_probability,
            colorize_status(a.status),
            a.risk_level,
            a.source.as_str(),
        );
    }
    println!();

    let count = |status: AccountStatus| results.iter().filter(|a| a.status == status).count();
    let fake = count(AccountStatus::Fake);
    let suspicious = count(AccountStatus::Suspicious);
    let simulated = results
        .iter()
        .filter(|a| a.source == AnalysisSource::Simulation)
        .count();

    if fake > 0 {
        println!("  {} {} likely fake accounts", "!!".red().bold(), fake);
    }
    if suspicious > 0 {
        println!("  {} {} suspicious accounts", "~".yellow(), suspicious);
    }
    if simulated > 0 {
        println!(
            "  {}",
            format!("{simulated} result(s) computed in simulation mode").dimmed()
        );
    }
}

/// Display a scenario projection and its term breakdown.
pub fn display_scenario(result: &ScenarioResult, hourly: Option<&[HourlyPoint]>) {
    println!("\n{}", "=== What-If Scenario ===".bold());

    let total = result.total_reduction_percent;
    let headline = super::signed_percent(total);
    let headline = if total <= 0.0 {
        headline.green().bold()
    } else {
        headline.red().bold()
    };
    println!("  Consumption change: {headline}");
    println!("  New consumption:    {:.1} kW", result.new_consumption);
    println!("  New cost:           {:.2} / h", result.new_cost);
    println!("  New carbon:         {:.1} kg CO2 / h", result.new_carbon);
    println!();
    println!("  Savings:            {:.1} kW", result.savings_kw);
    println!("  Monthly cost:       {:.2}", result.monthly_cost_savings);
    println!(
        "  Annual carbon:      {:.2} t CO2",
        result.annual_carbon_savings_tonnes
    );

    let b = &result.breakdown;
    println!("\n  {}", "Breakdown:".dimmed());
    for (name, value) in [
        ("Temperature", b.temperature),
        ("Occupancy", b.occupancy),
        ("Renewables", b.renewable),
        ("HVAC", b.hvac),
        ("Lighting", b.lighting),
    ] {
        println!("    {:<12} {:>7}", name, super::signed_percent(value));
    }

    if let Some(points) = hourly {
        println!("\n  {}", "Hourly projection (kW):".dimmed());
        println!(
            "    {:>5}  {:>8}  {:>8}  {:>7}",
            "Hour".dimmed(),
            "Baseline".dimmed(),
            "Scenario".dimmed(),
            "Savings".dimmed()
        );
        for p in points {
            println!(
                "    {:>5}  {:>8.1}  {:>8.1}  {:>7.1}",
                p.hour, p.baseline, p.scenario, p.savings
            );
        }
    }
}

/// Display a prediction with its confidence assessment.
pub fn display_prediction(
    prediction: &EnergyPrediction,
    assessment: &ConfidenceAssessment,
    renewable_percent: f64,
) {
    let predicted = prediction.predicted();
    println!("\n{}", "=== Energy Prediction ===".bold());
    println!(
        "  Predicted:    {:.2} kWh  ({})",
        predicted,
        describe_source(prediction.source)
    );
    println!(
        "  Range:        {:.2} - {:.2} kWh",
        prediction.bounds.lower_bound, prediction.bounds.upper_bound
    );
    println!(
        "  Confidence:   {:.0}%",
        prediction.bounds.confidence * 100.0
    );
    println!("  Usage level:  {}", colorize_usage(prediction.usage_level()));
    println!("  Current load: {:.2} kWh", current_load(predicted));
    println!(
        "  Efficiency:   {:.1}",
        efficiency_score(renewable_percent, predicted)
    );
    display_confidence(assessment);
}

/// Display a confidence assessment on its own.
pub fn display_confidence(assessment: &ConfidenceAssessment) {
    println!("\n  {}", "Risk assessment:".bold());
    println!("    Level:       {}", colorize_uncertainty(assessment.level));
    match assessment.uncertainty_percent {
        Some(u) => println!("    Uncertainty: {u:.1}%"),
        None => println!("    Uncertainty: {}", "n/a".dimmed()),
    }
    println!("    {}", assessment.description);
    println!("    {}", assessment.recommendation.dimmed());
}

fn describe_source(source: AnalysisSource) -> colored::ColoredString {
    match source {
        AnalysisSource::Live => "live model".green(),
        AnalysisSource::Simulation => "simulation mode".yellow(),
    }
}

fn colorize_status(status: AccountStatus) -> colored::ColoredString {
    match status {
        AccountStatus::Real => status.as_str().green(),
        AccountStatus::Suspicious => status.as_str().yellow(),
        AccountStatus::Fake => status.as_str().red().bold(),
    }
}

fn colorize_usage(level: UsageLevel) -> colored::ColoredString {
    match level {
        UsageLevel::Low => level.as_str().green(),
        UsageLevel::Normal => level.as_str().blue(),
        UsageLevel::High => level.as_str().yellow(),
        UsageLevel::Critical => level.as_str().red().bold(),
    }
}

fn colorize_uncertainty(level: UncertaintyLevel) -> colored::ColoredString {
    match level {
        UncertaintyLevel::Low => level.as_str().green(),
        UncertaintyLevel::Medium => level.as_str().yellow(),
        UncertaintyLevel::High => level.as_str().red(),
        UncertaintyLevel::Undefined => level.as_str().dimmed(),
    }
}
