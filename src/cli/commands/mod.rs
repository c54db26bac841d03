//! Command implementations for the marine forecast CLI
//!
//! Each command lives in its own module and returns [`CommandStats`] so the
//! binary can pick an exit code.

pub mod batch;
pub mod import;
pub mod parse;
pub mod shared;
pub mod validate;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use crate::error::{ForecastError, Result};
use shared::{load_configuration, setup_logging};
use tracing::debug;

/// Main command runner
///
/// Sets up logging and configuration, then dispatches to the subcommand.
pub async fn run(args: Args) -> Result<CommandStats> {
    setup_logging(&args);
    debug!("Arguments: {:?}", args);

    let Some(command) = &args.command else {
        return Err(ForecastError::configuration("No command given"));
    };
    let config = load_configuration(&args)?;
    let show_progress = args.show_progress();

    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args, &config).await,
        Commands::Latest(latest_args) => parse::run_latest(latest_args, &config).await,
        Commands::Locations(locations_args) => {
            parse::run_locations(locations_args, &config).await
        }
        Commands::Batch(batch_args) => batch::run_batch(batch_args, &config, show_progress).await,
        Commands::Validate(validate_args) => {
            validate::run_validate(validate_args, &config, show_progress).await
        }
        Commands::Import(import_args) => import::run_import(import_args, &config).await,
    }
}
