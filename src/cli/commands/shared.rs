//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, product discovery and the output
//! helpers used by more than one command.

use crate::cli::args::Args;
use crate::config::Config;
use crate::constants::PRODUCT_FILE_EXTENSION;
use crate::error::{ForecastError, Result};
use crate::models::RegionForecast;
use crate::parser::ParseStats;
use crate::product::{ProductEnvelope, is_parsed_output};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Products read and parsed
    pub products_parsed: usize,
    /// Products that could not be read or decoded
    pub products_failed: usize,
    /// Structural violations found by validation
    pub violations: usize,
    /// Parser counters summed over all products
    pub parse: ParseStats,
    /// Wall time spent in the command
    pub elapsed: Duration,
}

impl CommandStats {
    /// Whether the command found structural problems
    pub fn has_violations(&self) -> bool {
        self.violations > 0
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("marine_forecast={}", log_level)));

    // try_init: tests may run several commands in one process
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration using the layered approach (file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    info!(
        "Using cache directory {} with {} workers",
        config.cache_dir.display(),
        config.workers
    );
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(cache_dir) = &args.cache_dir {
        config.cache_dir = cache_dir.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
}

/// Product files under a directory, sorted, skipping parser outputs
pub fn discover_products(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ForecastError::configuration(format!(
            "Input path is not a directory: {}",
            dir.display()
        )));
    }

    let mut products = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file()
            && path.extension().and_then(|s| s.to_str()) == Some(PRODUCT_FILE_EXTENSION)
            && !is_parsed_output(path)
        {
            products.push(path.to_path_buf());
        }
    }
    products.sort();

    debug!(
        "Discovered {} product files in {}",
        products.len(),
        dir.display()
    );
    Ok(products)
}

/// Read a product from a file or stdin, as JSON or bare text
pub async fn read_product(file: Option<&Path>, raw: bool) -> Result<ProductEnvelope> {
    let (content, origin) = match file {
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ForecastError::ProductNotFound {
                        path: path.to_path_buf(),
                    }
                } else {
                    ForecastError::Io(e)
                }
            })?;
            (content, path.to_path_buf())
        }
        None => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            (content, PathBuf::from("<stdin>"))
        }
    };

    if raw {
        Ok(ProductEnvelope::from_text(content))
    } else {
        ProductEnvelope::from_json_str(&content, &origin)
    }
}

/// Serialize a value as JSON, pretty-printed when configured
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Create a progress bar with the standard styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a region forecast for people
pub fn print_region_human(region: &RegionForecast) {
    if let Some(title) = region.preamble.lines().find(|line| !line.trim().is_empty()) {
        println!("{}", title.bright_green().bold());
    }

    if !region.short_synopsis.is_empty() {
        println!("\n{} {}", "Synopsis:".bold(), region.short_synopsis);
    }

    for forecast in &region.forecasts {
        println!();
        let updated = if forecast.is_updated {
            " UPDATED".yellow().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "{} {}{}",
            forecast.code.bright_yellow().bold(),
            forecast.location.bold(),
            updated
        );

        let issued = match forecast.forecast_date {
            Some(date) => date.to_rfc3339(),
            None => format!("{} (unparsed)", forecast.forecast_date_original),
        };
        println!("   Issued: {}", issued.dimmed());

        for advisory in &forecast.advisories {
            println!("   {} {}", "!".red().bold(), advisory.red());
        }
        for sub in &forecast.sub_forecasts {
            println!("   {} {}", format!("{}:", sub.timeframe).cyan(), sub.forecast_text);
        }
        if !forecast.unprocessed.is_empty() {
            println!(
                "   {} {} unprocessed line(s)",
                "?".yellow(),
                forecast.unprocessed.len()
            );
        }
    }

    if !region.unprocessed.is_empty() {
        println!(
            "\n{} {} chunk(s) could not be parsed",
            "Warning:".yellow().bold(),
            region.unprocessed.len()
        );
    }
}

/// Print parser counters for people
pub fn print_parse_stats(stats: &ParseStats) {
    println!("📊 Parsing Summary:");
    println!("   • Chunks seen: {}", stats.chunks_seen);
    println!("   • Zone forecasts: {}", stats.forecasts_parsed);
    println!("   • Unprocessed chunks: {}", stats.chunks_unprocessed);
    println!("   • Empty chunks: {}", stats.empty_chunks);
    println!("   • Unparsed timestamps: {}", stats.timestamps_unparsed);
    println!("   • Unprocessed body lines: {}", stats.body_lines_unprocessed);
    println!("   • Success rate: {:.1}%", stats.success_rate());
}
