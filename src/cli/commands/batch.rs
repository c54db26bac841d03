//! Batch command: parse every product under a directory concurrently

use super::shared::{CommandStats, create_progress_bar, discover_products, print_parse_stats, to_json};
use crate::cli::args::{BatchArgs, OutputFormat};
use crate::config::Config;
use crate::constants::PARSED_FILE_SUFFIX;
use crate::error::Result;
use crate::parser::{BulletinParser, ParseResult};
use crate::product::ProductEnvelope;
use futures::stream::{self, StreamExt};
use indicatif::HumanDuration;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Outcome for one product in a batch
#[derive(Debug, Clone, Serialize)]
pub struct ProductReport {
    pub path: PathBuf,
    pub forecasts: usize,
    pub unprocessed_chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse all products under `args.input_dir`, bounded by the configured workers
pub async fn run_batch(args: &BatchArgs, config: &Config, show_progress: bool) -> Result<CommandStats> {
    let start_time = Instant::now();
    let products = discover_products(&args.input_dir)?;
    info!(
        "Parsing {} products from {} with {} workers",
        products.len(),
        args.input_dir.display(),
        config.workers
    );

    if let Some(output_dir) = &args.output_dir {
        tokio::fs::create_dir_all(output_dir).await?;
    }

    let pb = create_progress_bar(products.len() as u64, "Parsing products");
    if !show_progress {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let parser = config.parser();
    let output_dir = args.output_dir.as_deref();
    let pretty = config.pretty_json;

    let outcomes: Vec<(ProductReport, Option<ParseResult>)> = stream::iter(products.iter())
        .map(|path| {
            let parser = &parser;
            let pb = &pb;
            async move {
                if let Some(file_name) = path.file_name() {
                    pb.set_message(format!("Parsing: {}", file_name.to_string_lossy()));
                }
                let outcome = process_product(path, parser, output_dir, pretty).await;
                pb.inc(1);
                outcome
            }
        })
        .buffer_unordered(config.workers)
        .collect()
        .await;

    pb.finish_with_message("Batch complete");

    let mut stats = CommandStats::default();
    let mut reports = Vec::with_capacity(outcomes.len());
    for (report, result) in outcomes {
        match result {
            Some(result) => {
                stats.products_parsed += 1;
                stats.parse.merge(&result.stats);
            }
            None => stats.products_failed += 1,
        }
        reports.push(report);
    }
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    stats.elapsed = start_time.elapsed();

    match args.format {
        OutputFormat::Human => print_batch_summary(&stats, &reports),
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "products_parsed": stats.products_parsed,
                "products_failed": stats.products_failed,
                "processing_time_seconds": stats.elapsed.as_secs_f64(),
                "parse": stats.parse,
                "products": reports,
            });
            println!("{}", to_json(&summary, pretty)?);
        }
    }

    Ok(stats)
}

async fn process_product(
    path: &Path,
    parser: &BulletinParser,
    output_dir: Option<&Path>,
    pretty: bool,
) -> (ProductReport, Option<ParseResult>) {
    let mut report = ProductReport {
        path: path.to_path_buf(),
        forecasts: 0,
        unprocessed_chunks: 0,
        output: None,
        error: None,
    };

    let product = match ProductEnvelope::from_path(path).await {
        Ok(product) => product,
        Err(e) => {
            warn!("Skipping {}: {:#}", path.display(), e);
            report.error = Some(e.to_string());
            return (report, None);
        }
    };

    let result = parser.parse_with_stats(&product.product_text);
    report.forecasts = result.stats.forecasts_parsed;
    report.unprocessed_chunks = result.stats.chunks_unprocessed;

    if let Some(output_dir) = output_dir {
        match write_parsed(path, output_dir, &result, pretty).await {
            Ok(output) => {
                debug!("Wrote {}", output.display());
                report.output = Some(output);
            }
            Err(e) => {
                error!("Failed to write output for {}: {:#}", path.display(), e);
                report.error = Some(e.to_string());
            }
        }
    }

    (report, Some(result))
}

/// Path of the parsed output for a product file
pub fn parsed_output_path(product: &Path, output_dir: &Path) -> PathBuf {
    let stem = product
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{}.{}", stem, PARSED_FILE_SUFFIX))
}

async fn write_parsed(
    product: &Path,
    output_dir: &Path,
    result: &ParseResult,
    pretty: bool,
) -> Result<PathBuf> {
    let output = parsed_output_path(product, output_dir);
    tokio::fs::write(&output, to_json(&result.forecast, pretty)?).await?;
    Ok(output)
}

fn print_batch_summary(stats: &CommandStats, reports: &[ProductReport]) {
    println!("\n🎉 Batch Parsing Complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Products parsed: {}", stats.products_parsed);
    println!("   • Processing time: {}", HumanDuration(stats.elapsed));
    if stats.products_failed > 0 {
        println!("⚠️  Products failed: {}", stats.products_failed);
    }
    println!();
    print_parse_stats(&stats.parse);

    let failures: Vec<_> = reports.iter().filter(|r| r.error.is_some()).collect();
    if !failures.is_empty() {
        println!("\n❌ Failures:");
        for report in failures {
            println!(
                "   • {}: {}",
                report.path.display(),
                report.error.as_deref().unwrap_or_default()
            );
        }
    }
    println!();
}
