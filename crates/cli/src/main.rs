//! `ability-cost`: prices ability documents from the command line.
//!
//! Reads one ability JSON document (the host's `system.ability` object) from a
//! file or stdin, sanitizes it against a rule catalog and prints the report
//! as JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! # Built-in rules, actor of rank B
//! ability-cost fireball.json --rank B
//!
//! # Campaign rules, stored form only
//! cat fireball.json | ability-cost --rules-dir ./campaign/rules --sanitize-only
//! ```

mod config;
mod logging;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ability_content::{RulesLoader, builtin_catalog};
use ability_core::RuleCatalog;

use crate::config::LogConfig;

/// Sanitize and price an ability document
#[derive(Parser)]
#[command(name = "ability-cost")]
#[command(about = "Sanitize and price ability documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Ability JSON file; reads stdin when omitted or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Campaign rules directory (missing files fall back to built-in tables)
    #[arg(short, long, value_name = "DIR", env = "ABILITY_RULES_DIR")]
    rules_dir: Option<PathBuf>,

    /// Actor rank (D, C, B, A, S) used to flag over-ranked levels
    #[arg(long, value_name = "RANK", env = "ACTOR_RANK")]
    rank: Option<String>,

    /// Print the sanitized ability without pricing it
    #[arg(long)]
    sanitize_only: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(&LogConfig::from_env())?;

    let catalog = load_catalog(&cli)?;
    let raw = read_input(&cli)?;

    let output = if cli.sanitize_only {
        to_json(&report::sanitize_report(&catalog, &raw), cli.compact)?
    } else {
        to_json(
            &report::cost_report(&catalog, &raw, cli.rank.as_deref()),
            cli.compact,
        )?
    };

    println!("{output}");
    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<RuleCatalog> {
    match &cli.rules_dir {
        Some(dir) => RulesLoader::load_dir(dir),
        None => {
            tracing::debug!("Using built-in rule tables");
            builtin_catalog()
        }
    }
}

fn read_input(cli: &Cli) -> Result<serde_json::Value> {
    let content = match &cli.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ability file: {}", path.display()))?,
        _ => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    serde_json::from_str(&content).context("Input is not valid JSON")
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
