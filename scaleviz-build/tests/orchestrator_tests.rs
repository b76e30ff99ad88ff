//! Orchestrator tests against ordinary Unix commands

#![cfg(unix)]

use scaleviz_build::{run_all, BuildSummary, ChartJob, JobError};
use std::time::{Duration, Instant};

fn sh(name: &str, script: &str) -> ChartJob {
    ChartJob::new(name, "sh", vec!["-c".to_string(), script.to_string()])
}

fn report(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[tokio::test]
async fn test_successful_job() {
    let job = ChartJob::new("ok", "true", vec![]);
    assert!(job.run(Duration::from_secs(10)).await.is_ok());
}

#[tokio::test]
async fn test_failed_job_keeps_stderr() {
    let job = sh("broken", "echo 'no such dataset' >&2; exit 3");
    match job.run(Duration::from_secs(10)).await {
        Err(JobError::Exit { status, stderr }) => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr.trim(), "no such dataset");
        }
        other => panic!("expected exit failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_kills_child() {
    let job = ChartJob::new("slow", "sleep", vec!["30".to_string()]);
    let started = Instant::now();
    let result = job.run(Duration::from_millis(200)).await;
    assert!(matches!(result, Err(JobError::Timeout(_))));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_missing_program_is_spawn_error() {
    let job = ChartJob::new("ghost", "/nonexistent/scaleviz-charts", vec![]);
    let result = job.run(Duration::from_secs(5)).await;
    assert!(matches!(result, Err(JobError::Spawn(_))));
}

#[tokio::test]
async fn test_run_all_report_and_summary() {
    let jobs = vec![
        ChartJob::new("ai-compute", "true", vec![]),
        sh("adoption", "printf '%0300d' 0 >&2; exit 1"),
        ChartJob::new("energetic", "sleep", vec!["30".to_string()]),
    ];

    let mut out = Vec::new();
    let summary = run_all(&jobs, Duration::from_millis(500), &mut out)
        .await
        .unwrap();
    assert_eq!(
        summary,
        BuildSummary {
            succeeded: 1,
            failed: 2
        }
    );
    assert!(!summary.all_succeeded());

    let text = report(out);
    assert!(text.contains("  ai-compute: OK\n"));
    assert!(text.contains("  adoption: FAIL\n"));
    assert!(text.contains(&format!("    STDERR: {}\n", "0".repeat(200))));
    assert!(!text.contains(&"0".repeat(201)));
    assert!(text.contains("  energetic: FAIL\n    Timeout after 500ms\n"));
    assert!(text.contains("Summary: 1 succeeded, 2 failed"));
}

#[tokio::test]
async fn test_run_all_empty_stderr_prints_no_detail() {
    let jobs = vec![ChartJob::new("quiet", "false", vec![])];
    let mut out = Vec::new();
    let summary = run_all(&jobs, Duration::from_secs(10), &mut out).await.unwrap();
    assert_eq!(summary.failed, 1);

    let text = report(out);
    assert!(text.contains("  quiet: FAIL\n\n"));
    assert!(text.contains("Summary: 0 succeeded, 1 failed"));
}
