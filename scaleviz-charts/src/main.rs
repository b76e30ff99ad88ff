//! scaleviz-charts - Chart generator
//!
//! Builds one chart (or all of them) and writes an interactive HTML page, a
//! static SVG image and the export figure JSON per chart into the output
//! directory.

use anyhow::{Context, Result};
use clap::Parser;
use scaleviz_charts::ChartKind;
use scaleviz_common::config::{self, ChartPaths};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "scaleviz-charts")]
#[command(about = "Generate ScaleViz charts (HTML + Plotly JSON)")]
#[command(version)]
struct Args {
    /// Chart to generate; all charts when omitted
    #[arg(value_enum)]
    chart: Option<ChartKind>,

    /// Output directory for generated artifacts
    #[arg(short, long, env = config::OUTPUT_DIR_ENV)]
    output_dir: Option<PathBuf>,

    /// Directory holding the CSV datasets
    #[arg(short, long, env = config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = config::CONFIG_FILE_ENV)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config first: it may carry the default log level
    let (toml_config, source) = config::load_or_default(args.config.as_deref());

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&toml_config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting ScaleViz charts (scaleviz-charts) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    source.log();

    let paths = ChartPaths::resolve(
        args.output_dir.as_deref(),
        args.data_dir.as_deref(),
        &toml_config,
    );
    info!("Data directory: {}", paths.data_dir.display());
    info!("Output directory: {}", paths.output_dir.display());

    let selected: Vec<ChartKind> = match args.chart {
        Some(kind) => vec![kind],
        None => ChartKind::ALL.to_vec(),
    };

    for kind in selected {
        info!("Generating {} chart", kind);
        let written = scaleviz_charts::generate(kind, &paths, &toml_config)
            .with_context(|| format!("Failed to generate {} chart", kind))?;
        info!("✓ {} chart: {} artifacts", kind, written.len());
    }

    info!("Done!");
    Ok(())
}
