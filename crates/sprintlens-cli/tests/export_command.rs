//! Integration tests for the sprintlens binary

use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn sprintlens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sprintlens"))
}

#[test]
fn check_reports_issue_counts() {
    let output = sprintlens()
        .arg("check")
        .arg(fixture("sprint.json"))
        .output()
        .expect("failed to execute sprintlens");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 issues"));
}

#[test]
fn check_fails_on_missing_file() {
    let output = sprintlens()
        .arg("check")
        .arg("no-such-file.json")
        .output()
        .expect("failed to execute sprintlens");

    assert!(!output.status.success());
}

#[test]
fn progress_prints_text_summary() {
    let output = sprintlens()
        .arg("progress")
        .arg("--sprint-file")
        .arg(fixture("sprint.json"))
        .output()
        .expect("failed to execute sprintlens");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Current Sprint"));
    assert!(stdout.contains("Auth Revamp"));
    // NG-4 has no points; its "No Epic" group is excluded
    assert!(!stdout.contains("No Epic"));
}

#[test]
fn progress_renders_svg() {
    let output = sprintlens()
        .arg("progress")
        .arg("--format")
        .arg("svg")
        .arg("--open-epics-file")
        .arg(fixture("sprint.json"))
        .output()
        .expect("failed to execute sprintlens");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<svg"));
    assert!(stdout.contains("Open Epics"));
}

#[test]
fn progress_rejects_unknown_format() {
    let output = sprintlens()
        .arg("progress")
        .arg("--format")
        .arg("pdf")
        .arg("--sprint-file")
        .arg(fixture("sprint.json"))
        .output()
        .expect("failed to execute sprintlens");

    assert!(!output.status.success());
}

#[test]
fn export_writes_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.xlsx");

    let output = sprintlens()
        .arg("export")
        .arg("--sprint-file")
        .arg(fixture("sprint.json"))
        .arg("--worklog-file")
        .arg(fixture("worklogs.json"))
        .arg("--start-date")
        .arg("2026-03-01")
        .arg("--end-date")
        .arg("2026-03-31")
        .arg("--output")
        .arg(&out)
        .output()
        .expect("failed to execute sprintlens");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Export complete"));
    assert!(stdout.contains("1 work logs"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn export_requires_paired_dates() {
    let output = sprintlens()
        .arg("export")
        .arg("--sprint-file")
        .arg(fixture("sprint.json"))
        .arg("--start-date")
        .arg("2026-03-01")
        .output()
        .expect("failed to execute sprintlens");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("provided together"));
}

#[test]
fn export_rejects_inverted_date_range() {
    let output = sprintlens()
        .arg("export")
        .arg("--sprint-file")
        .arg(fixture("sprint.json"))
        .arg("--start-date")
        .arg("2026-03-31")
        .arg("--end-date")
        .arg("2026-03-01")
        .output()
        .expect("failed to execute sprintlens");

    assert!(!output.status.success());
}

#[test]
fn worklog_files_require_a_date_range() {
    let output = sprintlens()
        .arg("export")
        .arg("--sprint-file")
        .arg(fixture("sprint.json"))
        .arg("--worklog-file")
        .arg(fixture("worklogs.json"))
        .output()
        .expect("failed to execute sprintlens");

    assert!(!output.status.success());
}
