//! Transaction risk scoring CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use ulinzi_risk::{
    scenarios, Config, Decision, LocationCategory, LoggingConfig, RiskAssessment, RiskScorer,
    TransactionInput,
};

#[derive(Parser)]
#[command(name = "ulinzi-score")]
#[command(about = "Score transactions with the Ulinzi financial sentinel", long_about = None)]
struct Cli {
    /// TOML config file (defaults come from the environment)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single transaction
    Assess {
        /// Amount in currency units
        #[arg(short, long)]
        amount: Decimal,

        /// Local hour of day (0-23)
        #[arg(long)]
        hour: u8,

        /// home, known-travel, anomalous, high-risk-international, late-night-anomaly
        #[arg(short, long, default_value = "home")]
        location: String,

        /// Telco reported a recent SIM swap
        #[arg(long)]
        sim_swap: bool,

        /// Behavioral analytics flagged the session
        #[arg(long)]
        behavioral_anomaly: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Score a named preset
    Scenario {
        /// Preset name
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List presets
    Scenarios,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env().context("loading config from environment")?,
    };

    init_tracing(&config.logging);
    tracing::debug!(service = %config.service_name, "Configuration loaded");

    let scorer = RiskScorer::new(config.scoring);

    match cli.command {
        Commands::Assess {
            amount,
            hour,
            location,
            sim_swap,
            behavioral_anomaly,
            json,
        } => {
            let location: LocationCategory = location.parse()?;
            let input = TransactionInput::new(amount, hour, location, sim_swap, behavioral_anomaly)?;
            report(&input, &scorer.assess(&input), json)?;
        }
        Commands::Scenario { name, json } => {
            let scenario = scenarios::find(&name)?;
            if !json {
                println!("{} {}", scenario.name.bold(), scenario.description.dimmed());
            }
            report(&scenario.input, &scorer.assess(&scenario.input), json)?;
        }
        Commands::Scenarios => {
            for scenario in scenarios::all()? {
                println!("{:<20} {}", scenario.name.cyan(), scenario.description);
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let mut rejected = None;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::try_new(&logging.level).unwrap_or_else(|e| {
            rejected = Some(e);
            tracing_subscriber::EnvFilter::new("info")
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }

    if let Some(e) = rejected {
        tracing::warn!(level = %logging.level, "Invalid log level, falling back to info: {}", e);
    }
}

fn report(input: &TransactionInput, assessment: &RiskAssessment, json: bool) -> Result<()> {
    if json {
        let body = serde_json::json!({
            "input": input,
            "assessment": assessment,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "  amount {}  hour {:02}:00  location {}  sim-swap {}  behavioral {}",
        input.amount(),
        input.hour_of_day(),
        input.location_category(),
        input.sim_swap_flag(),
        input.behavioral_anomaly_flag()
    );
    for factor in &assessment.factors {
        println!("  {:>4}  {:?}", format!("+{}", factor.points).yellow(), factor.code);
    }

    let decision = assessment.decision.to_string();
    let decision = match assessment.decision {
        Decision::Approve => decision.green().bold(),
        Decision::Challenge => decision.yellow().bold(),
        Decision::Block => decision.red().bold(),
    };
    println!("  risk score {}  ->  {}", assessment.score, decision);

    Ok(())
}
