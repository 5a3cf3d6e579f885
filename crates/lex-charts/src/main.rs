//! CLI entry point for the chart recommendation engine.

use anyhow::{Result, anyhow};
use clap::Parser;
use lex_charts::{AdvisorConfig, AdvisorReport, AnalysisInput, ChartAdvisor, ReportGenerator};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Rule-based chart recommendations from column statistics",
    long_about = "Reads a JSON document of column and correlation statistics and \
                  recommends a chart, encoding and rendering strategy for each \
                  column and column pair.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  lex-charts -i stats.json\n\n  \
                  # Machine-readable output\n  \
                  lex-charts -i stats.json --json | jq '.columns[0].recommendation'\n\n  \
                  # Save a report next to other outputs\n  \
                  lex-charts -i stats.json -o results/ --emit-report"
)]
struct Args {
    /// Path to the JSON statistics document
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the summary)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logs; only the final JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_charts.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Maximum alternatives kept per recommendation (1 - 20)
    #[arg(long, default_value = "3")]
    max_alternatives: usize,

    /// Number of points a chart should draw after aggregation
    #[arg(long, default_value = "10000")]
    target_points: u64,

    /// Interaction complexity for the dataset-level plan (0 - 10)
    #[arg(long, default_value = "1")]
    interactions: u32,

    /// Prefer canvas rendering for the dataset-level plan
    #[arg(long)]
    prefer_canvas: bool,

    /// Rendering libraries to record in the report (repeatable)
    #[arg(long = "library")]
    libraries: Vec<String>,

    /// Evaluate columns one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading statistics from: {}", args.input);
    let raw = std::fs::read_to_string(&args.input)?;
    let input = AnalysisInput::from_json(&raw).map_err(|e| {
        error!("Invalid input: {}", e);
        anyhow!("Invalid input [{}]: {}", e.error_code(), e)
    })?;

    let config = AdvisorConfig::builder()
        .max_alternatives_per_chart(args.max_alternatives)
        .target_render_points(args.target_points)
        .interaction_complexity(args.interactions)
        .prefer_canvas(args.prefer_canvas)
        .target_rendering_libraries(args.libraries.iter().cloned())
        .parallel_batches(!args.sequential)
        .build()?;

    let advisor = ChartAdvisor::new(config)?;
    let report = advisor.analyze(&input)?.with_input_file(&args.input);

    handle_output(&report, &args)
}

/// Handle output based on CLI flags.
///
/// - Default: print a human-readable summary to stdout
/// - `--json`: print JSON to stdout only (no logs)
/// - `--emit-report`: also write the JSON report to a file
fn handle_output(report: &AdvisorReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", ReportGenerator::to_json(report)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let generator = ReportGenerator::new(PathBuf::from(&args.output), None);
        let report_path = generator.write_report_to_file(report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(report);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print the recommendation table and any warnings.
fn print_human_readable_summary(report: &AdvisorReport) {
    println!();
    println!("{}", "=".repeat(80));
    println!("CHART RECOMMENDATIONS");
    println!("{}", "=".repeat(80));
    println!();

    if let Some(ref input_file) = report.input_file {
        println!("Input: {}", input_file);
    }
    print!("{}", ReportGenerator::render_summary(report));
    println!();

    let performance = &report.dataset_performance;
    println!("Performance Plan:");
    println!(
        "  Size: {} ({} data points)",
        performance.data_size.category, performance.data_size.total_data_points
    );
    println!(
        "  Rendering: {} - {}",
        performance.rendering.technique, performance.rendering.reasoning
    );
    println!("  Estimated memory: {:.1} MB", performance.memory.total_mb);
    for strategy in &performance.adaptive_strategies {
        println!("  - {}", strategy);
    }
    for recommendation in &performance.optimization_recommendations {
        println!("  - {}", recommendation);
    }
    println!();

    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  ! {}: {}", warning.subject, warning.message);
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}
