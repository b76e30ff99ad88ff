//! scaleviz-build - Regenerate all charts
//!
//! Runs `scaleviz-charts <chart>` for every chart with a per-job timeout,
//! prints an OK/FAIL line per chart and a summary, and exits non-zero when
//! any chart failed.

use anyhow::{Context, Result};
use clap::Parser;
use scaleviz_build::{chart_jobs, run_all};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "scaleviz-build")]
#[command(about = "Regenerate every ScaleViz chart")]
#[command(version)]
struct Args {
    /// Chart generator binary (defaults to scaleviz-charts next to this executable)
    #[arg(long)]
    charts_bin: Option<PathBuf>,

    /// Per-chart timeout in seconds
    #[arg(long, default_value_t = scaleviz_build::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Arguments forwarded to every chart run (after `--`)
    #[arg(last = true)]
    forwarded: Vec<String>,
}

fn default_charts_bin() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Cannot locate current executable")?;
    let dir = exe
        .parent()
        .context("Current executable has no parent directory")?;
    Ok(dir.join(format!("scaleviz-charts{}", std::env::consts::EXE_SUFFIX)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting ScaleViz build (scaleviz-build) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let charts_bin = match args.charts_bin {
        Some(path) => path,
        None => default_charts_bin()?,
    };
    info!("Chart generator: {}", charts_bin.display());

    let jobs = chart_jobs(&charts_bin, &args.forwarded);
    let timeout = Duration::from_secs(args.timeout_secs);

    let mut stdout = std::io::stdout();
    let summary = run_all(&jobs, timeout, &mut stdout)
        .await
        .context("Failed to write build report")?;

    if !summary.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
