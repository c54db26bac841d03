//! Import command: save a product into the cache

use super::shared::{CommandStats, read_product};
use crate::cli::args::ImportArgs;
use crate::config::Config;
use crate::error::{ForecastError, Result};
use crate::product::CachedProductSource;
use chrono::Utc;
use std::time::Instant;

/// Copy a product into the cache under the location's naming scheme
pub async fn run_import(args: &ImportArgs, config: &Config) -> Result<CommandStats> {
    let start_time = Instant::now();

    if args.location.is_empty() || !args.location.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ForecastError::configuration(format!(
            "Location must be alphanumeric, got '{}'",
            args.location
        )));
    }

    let product = read_product(Some(&args.file), args.raw).await?;
    let source = CachedProductSource::new(&config.cache_dir);
    let path = source
        .store(&args.location.to_uppercase(), &product, Utc::now())
        .await?;

    println!("{}", path.display());

    Ok(CommandStats {
        elapsed: start_time.elapsed(),
        ..Default::default()
    })
}
