//! # ScaleViz Build
//!
//! Regenerates every chart by running the chart binary once per chart as a
//! child process, one at a time, and reports per-job and overall results.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default per-job timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Characters of child stderr shown on failure
pub const STDERR_EXCERPT_CHARS: usize = 200;

const RULE: &str = "============================================================";

/// Why a job did not succeed
#[derive(Error, Debug)]
pub enum JobError {
    /// Child could not be started
    #[error("Error: {0}")]
    Spawn(#[source] std::io::Error),

    /// Child ran past the timeout and was killed
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Child exited unsuccessfully
    #[error("Exited with {status}")]
    Exit {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

impl JobError {
    /// Line printed under a failed job
    pub fn report_line(&self) -> Option<String> {
        match self {
            JobError::Exit { stderr, .. } if stderr.is_empty() => None,
            JobError::Exit { stderr, .. } => Some(format!("STDERR: {}", stderr_excerpt(stderr))),
            other => Some(other.to_string()),
        }
    }
}

/// One child-process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartJob {
    /// Name printed in the report
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ChartJob {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
        }
    }

    /// Run the job, killing the child if it outlives `timeout`
    pub async fn run(&self, timeout: Duration) -> Result<(), JobError> {
        debug!("Running {} {:?}", self.program.display(), self.args);

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(JobError::Spawn)?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(JobError::Spawn)?,
            Err(_) => return Err(JobError::Timeout(timeout)),
        };

        if output.status.success() {
            Ok(())
        } else {
            Err(JobError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// First [`STDERR_EXCERPT_CHARS`] characters of child stderr
pub fn stderr_excerpt(stderr: &str) -> &str {
    match stderr.char_indices().nth(STDERR_EXCERPT_CHARS) {
        Some((index, _)) => &stderr[..index],
        None => stderr,
    }
}

/// Job for every chart, in build order
pub fn chart_jobs(charts_bin: &std::path::Path, forwarded: &[String]) -> Vec<ChartJob> {
    scaleviz_charts::ChartKind::ALL
        .iter()
        .map(|kind| {
            let mut args = vec![kind.name().to_string()];
            args.extend(forwarded.iter().cloned());
            ChartJob::new(kind.name(), charts_bin, args)
        })
        .collect()
}

/// Totals over a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BuildSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Run jobs sequentially, writing the report to `out`
pub async fn run_all<W: Write>(
    jobs: &[ChartJob],
    timeout: Duration,
    out: &mut W,
) -> std::io::Result<BuildSummary> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Building All Charts")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    let mut summary = BuildSummary::default();
    for job in jobs {
        match job.run(timeout).await {
            Ok(()) => {
                info!("{} succeeded", job.name);
                writeln!(out, "  {}: OK", job.name)?;
                summary.succeeded += 1;
            }
            Err(e) => {
                warn!("{} failed: {}", job.name, e);
                writeln!(out, "  {}: FAIL", job.name)?;
                if let Some(line) = e.report_line() {
                    writeln!(out, "    {}", line)?;
                }
                summary.failed += 1;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Summary: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    )?;
    writeln!(out, "{}", RULE)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_stderr_excerpt() {
        let long = "x".repeat(500);
        assert_eq!(stderr_excerpt(&long).len(), 200);
        assert_eq!(stderr_excerpt("short"), "short");

        let wide = "é".repeat(250);
        assert_eq!(stderr_excerpt(&wide).chars().count(), 200);
    }

    #[test]
    fn test_chart_jobs_forward_args() {
        let forwarded = vec!["--output-dir".to_string(), "out".to_string()];
        let jobs = chart_jobs(Path::new("/bin/scaleviz-charts"), &forwarded);

        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["ai-compute", "adoption", "energetic"]);
        assert_eq!(jobs[1].args, vec!["adoption", "--output-dir", "out"]);
        assert_eq!(jobs[2].program, PathBuf::from("/bin/scaleviz-charts"));
    }

    #[test]
    fn test_report_lines() {
        assert_eq!(
            JobError::Timeout(Duration::from_secs(120)).report_line().as_deref(),
            Some("Timeout after 120s")
        );
        let spawn = JobError::Spawn(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert_eq!(spawn.report_line().as_deref(), Some("Error: missing"));
    }
}
