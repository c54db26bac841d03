//! Parse, latest and locations commands
//!
//! Single-product commands: parse one product from a file or stdin, parse the
//! newest cached product for a location, or list cached locations.

use super::shared::{CommandStats, print_parse_stats, print_region_human, read_product, to_json};
use crate::cli::args::{LatestArgs, LocationsArgs, OutputFormat, ParseArgs};
use crate::config::Config;
use crate::error::Result;
use crate::models::RegionForecast;
use crate::parser::ParseResult;
use crate::product::{CachedProductSource, ProductSource};
use colored::*;
use std::time::Instant;
use tracing::info;

/// Parse a single product and print it
pub async fn run_parse(args: &ParseArgs, config: &Config) -> Result<CommandStats> {
    let start_time = Instant::now();

    let product = read_product(args.file.as_deref(), args.raw).await?;
    let ParseResult { forecast, stats } = config.parser().parse_with_stats(&product.product_text);
    info!(
        "Parsed {} zone forecasts ({} unprocessed chunks)",
        stats.forecasts_parsed, stats.chunks_unprocessed
    );

    print_region(&forecast, args.format, config)?;
    if args.stats {
        match args.format {
            OutputFormat::Human => {
                println!();
                print_parse_stats(&stats);
            }
            OutputFormat::Json => eprintln!("{}", to_json(&stats, config.pretty_json)?),
        }
    }

    Ok(CommandStats {
        products_parsed: 1,
        parse: stats,
        elapsed: start_time.elapsed(),
        ..Default::default()
    })
}

/// Parse the newest cached product for a location
pub async fn run_latest(args: &LatestArgs, config: &Config) -> Result<CommandStats> {
    let start_time = Instant::now();
    let source = CachedProductSource::new(&config.cache_dir);

    let product = source.latest(&args.location).await?;
    let result = config.parser().parse_with_stats(&product.product_text);

    if let Some(issued) = &product.issuance_time {
        info!("Product for {} issued {}", args.location, issued);
    }
    print_region(&result.forecast, args.format, config)?;

    Ok(CommandStats {
        products_parsed: 1,
        parse: result.stats,
        elapsed: start_time.elapsed(),
        ..Default::default()
    })
}

/// List the locations with cached products
pub async fn run_locations(args: &LocationsArgs, config: &Config) -> Result<CommandStats> {
    let start_time = Instant::now();
    let source = CachedProductSource::new(&config.cache_dir);
    let locations = source.locations().await?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                "Cached locations in".bright_green().bold(),
                source.root().display()
            );
            if locations.is_empty() {
                println!("   (none)");
            }
            for (i, location) in locations.iter().enumerate() {
                let count = source.product_files(location)?.len();
                println!(
                    "  {}. {} ({} products)",
                    (i + 1).to_string().bright_yellow().bold(),
                    location.bold(),
                    count
                );
            }
        }
        OutputFormat::Json => println!("{}", to_json(&locations, config.pretty_json)?),
    }

    Ok(CommandStats {
        elapsed: start_time.elapsed(),
        ..Default::default()
    })
}

fn print_region(region: &RegionForecast, format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Human => print_region_human(region),
        OutputFormat::Json => println!("{}", to_json(region, config.pretty_json)?),
    }
    Ok(())
}
