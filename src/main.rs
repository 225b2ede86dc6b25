use analytics::{AnalyticsEngine, AnalyticsReport};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::settings::Settings;
use configuration::{init_tracing, load_config};
use core_types::{Metric, PriceSeries};
use std::path::PathBuf;

/// Decimal places used when printing derived values.
const DISPLAY_DECIMALS: i32 = 6;

/// The main entry point for the Tercile price-history service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load TERCILE_* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = load_config(cli.config.as_deref()).context("loading configuration")?;
    let _guard = init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                settings.server.host = host;
            }
            if let Some(port) = args.port {
                settings.server.port = port;
            }
            web_server::run_server(&settings).await?;
        }
        Commands::Preview(args) => handle_preview(&settings, args)?,
        Commands::Analyze(args) => handle_analyze(&settings, args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Serves a daily price history and its per-third window analytics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Print the first rows of the price history.
    Preview(PreviewArgs),
    /// Compute one metric over the three thirds of the history.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct PreviewArgs {
    /// Number of rows to print (defaults to `preview.default_rows`, or all rows).
    #[arg(long, short)]
    rows: Option<usize>,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The metric to compute: quarterly-return, ma180 or vol180.
    metric: Metric,

    /// Report vol180 as daily volatility instead of annualizing it.
    #[arg(long)]
    raw: bool,

    /// Print the report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load_series(settings: &Settings) -> anyhow::Result<PriceSeries> {
    let path = &settings.data.file_path;
    loader::load_price_series(path)
        .with_context(|| format!("loading price data from {}", path.display()))
}

/// Prints the head of the price history as a table.
fn handle_preview(settings: &Settings, args: PreviewArgs) -> anyhow::Result<()> {
    let series = load_series(settings)?;
    let shown = match args.rows.or(settings.preview.default_rows) {
        Some(rows) => series.head(rows),
        None => series,
    };

    let mut table = Table::new();
    table.set_header(vec!["Date", "Open", "High", "Low", "Close", "Volume"]);
    for r in &shown {
        table.add_row(vec![
            r.date.to_string(),
            r.open.to_string(),
            r.high.to_string(),
            r.low.to_string(),
            r.close.to_string(),
            r.volume.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Runs the analytics engine and prints its report.
fn handle_analyze(settings: &Settings, args: AnalyzeArgs) -> anyhow::Result<()> {
    let series = load_series(settings)?;
    let report = AnalyticsEngine::new()
        .run(&series, args.metric, !args.raw)
        .rounded(DISPLAY_DECIMALS);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalyticsReport) {
    for part in &report.parts {
        let span = match (part.start, part.end) {
            (Some(start), Some(end)) => format!("{start} .. {end}"),
            _ => "no records".to_string(),
        };
        println!(
            "{} {} ({} records, {}, {} points)",
            report.metric,
            part.part,
            part.records,
            span,
            part.series.len()
        );

        let mut table = Table::new();
        table.set_header(vec!["Date", "Value"]);
        for point in &part.series {
            table.add_row(vec![
                point.date.to_string(),
                format!("{:.*}", DISPLAY_DECIMALS as usize, point.value),
            ]);
        }
        println!("{table}");
    }
}
