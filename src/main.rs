//! Career-Scout main entry point
//!
//! This is the command-line interface for the Career-Scout link finder.

use anyhow::Context;
use career_scout::config::{load_config_with_hash, Config};
use career_scout::crawler::{fetch_seed_list, run_scout, HttpLinkFetcher};
use career_scout::output::print_summary;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Career-Scout: a polite company link finder
///
/// Career-Scout reads a directory page of company homepages and, for every
/// company whose robots.txt allows it, records the careers, internship,
/// about and contact links found on the homepage.
#[derive(Parser, Debug)]
#[command(name = "career-scout")]
#[command(version = "1.0.0")]
#[command(about = "A polite company link finder", long_about = None)]
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

    /// Validate config and print the seed list without crawling
    #[arg(long)]
    dry_run: bool,

    /// Write the JSON results here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(output) = &cli.output {
        config.output.json_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config).await
    } else {
        handle_scout(config, &config_hash, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("career_scout=info,warn"),
            1 => EnvFilter::new("career_scout=debug,info"),
            2 => EnvFilter::new("career_scout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and prints the seed list
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Career Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Seed selector: {}", config.crawler.seed_selector);
    println!("  Fetch timeout: {}ms", config.crawler.fetch_timeout_ms);
    println!(
        "  Max concurrent companies: {}",
        config.crawler.max_concurrent_companies
    );

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  JSON: {}", config.output.json_path);
    match &config.output.database_path {
        Some(path) => println!("  Database: {}", path),
        None => println!("  Database: (none)"),
    }

    println!("\nBlacklisted Domains ({}):", config.blacklist.len());
    for entry in &config.blacklist {
        println!("  - {}", entry.domain);
    }

    let fetcher = HttpLinkFetcher::new(&config.user_agent, config.crawler.fetch_timeout())?;
    let companies = fetch_seed_list(&fetcher, config).await?;

    println!("\nCompanies ({}):", companies.len());
    for company in &companies {
        println!("  - {} ({})", company.name, company.homepage);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} companies", companies.len());

    Ok(())
}

/// Handles the main scout run
async fn handle_scout(config: Config, config_hash: &str, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Seed: {}, blacklist: {} entries",
        config.crawler.seed_url,
        config.blacklist.len()
    );

    match run_scout(config, config_hash).await {
        Ok(report) => {
            tracing::info!("Scout completed successfully");
            if !quiet {
                print_summary(&report.summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scout failed: {}", e);
            Err(e.into())
        }
    }
}
