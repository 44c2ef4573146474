//! Sumi-Gleaner main entry point
//!
//! This is the command-line interface for the Sumi-Gleaner site gleaner.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use sumi_gleaner::config::{load_config_with_hash, validate, Config};
use sumi_gleaner::crawler::{CrawlOptions, LogProgress};
use sumi_gleaner::output::print_statistics;
use sumi_gleaner::{export_data, normalize_url, Coordinator, ExportFormat};
use tracing_subscriber::EnvFilter;

/// Sumi-Gleaner: A polite breadth-first site gleaner
///
/// Sumi-Gleaner crawls a single website breadth-first, extracts and classifies
/// its content, scores every page for use as AI training or retrieval data,
/// and exports the results.
#[derive(Parser, Debug)]
#[command(name = "sumi-gleaner")]
#[command(version)]
#[command(about = "A polite breadth-first site gleaner", long_about = None)]
struct Cli {
    /// Start URL of the site to crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to attempt
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Maximum link depth from the start URL
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Pause after every page (milliseconds)
    #[arg(long, value_name = "N")]
    delay_ms: Option<u64>,

    /// Minimum quality score for a page to be kept
    #[arg(long = "min-quality", value_name = "N")]
    min_quality: Option<u8>,

    /// Only keep pages of this type (repeatable)
    #[arg(long = "page-type", value_name = "TYPE")]
    page_types: Vec<String>,

    /// Export format: rag, json, markdown, csv, xml, vectordb
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<String>,

    /// Write the export to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Print crawl statistics to stderr after the export
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let options = config.crawl_options()?;
    let format = config.export_format()?;

    if cli.dry_run {
        handle_dry_run(&cli.url, &config, &options, format)?;
    } else {
        handle_crawl(&cli, &config, options, format).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_gleaner=info,warn"),
            1 => EnvFilter::new("sumi_gleaner=debug,info"),
            2 => EnvFilter::new("sumi_gleaner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so exports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), then applies command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, sumi_gleaner::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(min_quality) = cli.min_quality {
        config.crawler.min_quality_score = min_quality;
    }
    if !cli.page_types.is_empty() {
        config.crawler.page_types = cli.page_types.clone();
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.display().to_string());
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(
    url: &str,
    config: &Config,
    options: &CrawlOptions,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_url = normalize_url(url)?;

    println!("=== Sumi-Gleaner Dry Run ===\n");

    println!("Start URL: {}", start_url);
    println!("Site: {}", sumi_gleaner::base_domain(&start_url));

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", options.max_pages);
    println!("  Max depth: {}", options.max_depth);
    println!("  Delay: {}ms", options.delay_ms);
    println!("  Minimum quality score: {}", options.min_quality_score);
    match &options.page_types {
        Some(types) => {
            let names: Vec<String> = types.iter().map(ToString::to_string).collect();
            println!("  Page types: {}", names.join(", "));
        }
        None => println!("  Page types: all"),
    }
    let extractors: Vec<&str> = options.capabilities.iter().map(|c| c.as_str()).collect();
    println!("  Extractors: {}", extractors.join(", "));

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nFetcher:");
    println!("  Timeout: {}ms", config.fetcher.timeout_ms);
    println!("  Max retries: {}", config.fetcher.max_retries);
    println!("  Relays ({}):", config.fetcher.proxies.len());
    for proxy in &config.fetcher.proxies {
        println!("    - {} ({})", proxy.name, proxy.template);
    }

    if !options.extra_skip_paths.is_empty() || !options.extra_skip_extensions.is_empty() {
        println!("\nExtra Scope Rules:");
        for path in &options.extra_skip_paths {
            println!("  - skip path {}", path);
        }
        for ext in &options.extra_skip_extensions {
            println!("  - skip extension .{}", ext.trim_start_matches('.'));
        }
    }

    println!("\nOutput:");
    println!("  Format: {}", format);
    println!(
        "  Destination: {}",
        config.output.path.as_deref().unwrap_or("stdout")
    );

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    cli: &Cli,
    config: &Config,
    options: CrawlOptions,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = Coordinator::from_config(config)?.with_progress(Arc::new(LogProgress));

    // Ctrl-C stops the crawl; pages gathered so far are still exported
    let cancel = coordinator.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let result = match coordinator.crawl(&cli.url, options).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Crawl {} for {}: {} pages kept of {} scanned",
        result.status,
        result.domain,
        result.pages.len(),
        result.pages_scanned
    );

    let export = export_data(&result.pages, format, &result.domain)?;
    match config.output.path.as_deref() {
        Some(path) => {
            write_export(Path::new(path), &export)?;
            tracing::info!("Exported {} to {}", format, path);
        }
        None => print!("{}", export),
    }

    if cli.stats {
        print_statistics(&result.statistics);
    }

    Ok(())
}

fn write_export(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
