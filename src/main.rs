//! Phishing-features main entry point
//!
//! This is the command-line interface for the URL feature extraction pipeline.

use anyhow::Context;
use clap::Parser;
use phishing_features::config::{load_config_with_hash, Config};
use phishing_features::extractor::extract;
use phishing_features::input::{read_labeled_urls, Label};
use phishing_features::output::print_statistics;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Phishing-features: URL feature extraction for phishing classifiers
///
/// Reads labeled URL lists, computes lexical features for every URL, fetches
/// each page once to compute content features, and writes the records of
/// every successfully fetched URL to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "phishing-features")]
#[command(version)]
#[command(about = "URL feature extraction for phishing classifiers", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and count input URLs without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Write features here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(output) = &cli.output {
        config.output.features_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_extract(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("phishing_features=info,warn"),
            1 => EnvFilter::new("phishing_features=debug,info"),
            2 => EnvFilter::new("phishing_features=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be extracted
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Phishing-features Dry Run ===\n");

    println!("Extractor Configuration:");
    println!("  Max workers: {}", config.extractor.max_workers);
    println!(
        "  Request timeout: {}s",
        config.extractor.request_timeout_secs
    );
    println!("  User agent: {}", config.extractor.user_agent);

    println!("\nLexical Vocabulary:");
    println!(
        "  Suspicious words: {}",
        config.lexical.suspicious_words.join(", ")
    );
    println!(
        "  Shortening services: {}",
        config.lexical.shortening_services.join(", ")
    );

    println!("\nInputs ({}):", config.input.len());
    let mut total = 0;
    for source in &config.input {
        let default_label = Label::try_from(source.default_label).unwrap_or(Label::Legitimate);
        let urls = read_labeled_urls(Path::new(&source.path), default_label)
            .with_context(|| format!("failed to read {}", source.path))?;
        let phishing = urls.iter().filter(|u| u.label == Label::Phishing).count();
        println!(
            "  - {} ({} URLs, {} labeled phishing)",
            source.path,
            urls.len(),
            phishing
        );
        total += urls.len();
    }

    println!("\nOutput:");
    println!("  Features: {}", config.output.features_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would extract features for {} URLs", total);

    Ok(())
}

/// Handles the main extraction
async fn handle_extract(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Inputs: {}, output: {}",
        config.input.len(),
        config.output.features_path
    );

    let report = extract(config).await.context("extraction failed")?;
    print_statistics(&report.stats);

    Ok(())
}
