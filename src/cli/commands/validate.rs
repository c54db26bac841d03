//! Validate command: parse products and report structural violations

use super::shared::{CommandStats, create_progress_bar, discover_products, to_json};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::Result;
use crate::product::ProductEnvelope;
use crate::validation::check_region_forecast;
use colored::*;
use indicatif::HumanDuration;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Violations found in one product
#[derive(Debug, Clone, Serialize)]
pub struct ProductViolations {
    pub path: PathBuf,
    pub violations: Vec<String>,
}

/// Run the property checks over every product in a directory
pub async fn run_validate(
    args: &ValidateArgs,
    config: &Config,
    show_progress: bool,
) -> Result<CommandStats> {
    let start_time = Instant::now();
    let input_dir = args
        .input_dir
        .clone()
        .unwrap_or_else(|| config.cache_dir.clone());

    info!("Validating products in {}", input_dir.display());
    let products = discover_products(&input_dir)?;

    let pb = create_progress_bar(products.len() as u64, "Validating products");
    if !show_progress {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let parser = config.parser();
    let mut stats = CommandStats::default();
    let mut findings = Vec::new();

    for path in &products {
        pb.inc(1);
        let product = match ProductEnvelope::from_path(path).await {
            Ok(product) => product,
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                stats.products_failed += 1;
                continue;
            }
        };

        let result = parser.parse_with_stats(&product.product_text);
        stats.products_parsed += 1;
        stats.parse.merge(&result.stats);

        let violations = check_region_forecast(&result.forecast);
        debug!("{}: {} violations", path.display(), violations.len());
        if !violations.is_empty() {
            stats.violations += violations.len();
            findings.push(ProductViolations {
                path: path.clone(),
                violations: violations.iter().map(ToString::to_string).collect(),
            });
        }
    }

    pb.finish_and_clear();
    stats.elapsed = start_time.elapsed();

    match args.format {
        OutputFormat::Human => print_validation_report(&stats, &findings),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "products_checked": stats.products_parsed,
                "products_failed": stats.products_failed,
                "violations": stats.violations,
                "products": findings,
            });
            println!("{}", to_json(&report, config.pretty_json)?);
        }
    }

    Ok(stats)
}

fn print_validation_report(stats: &CommandStats, findings: &[ProductViolations]) {
    println!("{}", "Validation Report".bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Products checked: {}", stats.products_parsed);
    println!("   • Time: {}", HumanDuration(stats.elapsed));
    if stats.products_failed > 0 {
        println!(
            "   • {} {}",
            "Unreadable products:".yellow(),
            stats.products_failed
        );
    }

    if findings.is_empty() {
        println!("\n{}", "✅ No violations found".green().bold());
        return;
    }

    println!(
        "\n{} {} violation(s) in {} product(s)",
        "❌".red(),
        stats.violations,
        findings.len()
    );
    for finding in findings {
        println!("\n   {}", finding.path.display().to_string().bold());
        for violation in &finding.violations {
            println!("     - {}", violation);
        }
    }
}
