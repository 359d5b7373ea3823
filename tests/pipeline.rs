use std::path::Path;
use std::process::{Command, Output};

fn galton(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_galton"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn assert_success(output: &Output, context: &str) {
    assert!(
        output.status.success(),
        "{context} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn end_to_end_pipeline_produces_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();

    // 1. Generate a small dataset
    let output = galton(
        dir.path(),
        &["generate", "--rows", "80", "--seed", "7", "--out", "data/repos.csv"],
    );
    assert_success(&output, "generate");
    assert!(dir.path().join("data/repos.csv").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dataset Characterization"), "stdout: {stdout}");

    // 2. Describe it as JSON
    let output = galton(
        dir.path(),
        &["describe", "--data", "data/repos.csv", "--format", "json"],
    );
    assert_success(&output, "describe");
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["totalRepositories"], 80);
    assert!(summary["languageCounts"].is_object());

    // 3. Group-wise statistics with a hypothesis test
    let output = galton(
        dir.path(),
        &[
            "stats",
            "--data",
            "data/repos.csv",
            "--group",
            "language",
            "--metric",
            "stars",
            "--test",
            "kruskal-wallis",
        ],
    );
    assert_success(&output, "stats");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stars by language"), "stdout: {stdout}");
    assert!(stdout.contains("kruskal-wallis across"), "stdout: {stdout}");

    // 4. Run the research questions and persist the result document
    let output = galton(
        dir.path(),
        &[
            "analyze",
            "--data",
            "data/repos.csv",
            "--out",
            "results/analysis.json",
        ],
    );
    assert_success(&output, "analyze");
    let content = std::fs::read_to_string(dir.path().join("results/analysis.json")).unwrap();
    let report: galton_stats::research::AnalysisReport = serde_json::from_str(&content).unwrap();
    assert_eq!(report.dataset.total_repositories, 80);
    assert_eq!(report.alpha, 0.05);

    // 5. Render the dashboard from the persisted results
    let output = galton(
        dir.path(),
        &[
            "report",
            "--data",
            "data/repos.csv",
            "--results",
            "results/analysis.json",
            "--out",
            "reports/dashboard.html",
        ],
    );
    assert_success(&output, "report");
    let html = std::fs::read_to_string(dir.path().join("reports/dashboard.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<svg"), "dashboard should inline charts");
    assert!(html.contains("</html>"));
}

#[test]
fn same_seed_reproduces_identical_csv() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(
        dir.path(),
        &["generate", "--rows", "60", "--seed", "9", "--out", "a.csv"],
    );
    assert_success(&output, "first generate");
    let output = galton(
        dir.path(),
        &["generate", "--rows", "60", "--seed", "9", "--out", "b.csv"],
    );
    assert_success(&output, "second generate");

    let a = std::fs::read(dir.path().join("a.csv")).unwrap();
    let b = std::fs::read(dir.path().join("b.csv")).unwrap();
    assert_eq!(a, b, "same rows/seed must reproduce the dataset byte for byte");
}

#[test]
fn different_seeds_produce_different_datasets() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(
        dir.path(),
        &["generate", "--rows", "60", "--seed", "1", "--out", "a.csv"],
    );
    assert_success(&output, "first generate");
    let output = galton(
        dir.path(),
        &["generate", "--rows", "60", "--seed", "2", "--out", "b.csv"],
    );
    assert_success(&output, "second generate");

    let a = std::fs::read(dir.path().join("a.csv")).unwrap();
    let b = std::fs::read(dir.path().join("b.csv")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn missing_dataset_is_fatal_without_flag() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(dir.path(), &["describe", "--data", "data/nope.csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Dataset not found"), "stderr: {stderr}");
}

#[test]
fn generate_missing_flag_synthesizes_dataset() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(
        dir.path(),
        &["describe", "--data", "data/fresh.csv", "--generate-missing"],
    );
    assert_success(&output, "describe --generate-missing");
    assert!(dir.path().join("data/fresh.csv").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("generating"), "stderr: {stderr}");

    // The configured default is 500 rows
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("500"), "stdout: {stdout}");
}

#[test]
fn zero_rows_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(dir.path(), &["generate", "--rows", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty dataset"), "stderr: {stderr}");
}

#[test]
fn report_recomputes_analysis_when_no_results_given() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(
        dir.path(),
        &["generate", "--rows", "40", "--seed", "3", "--out", "data/repos.csv"],
    );
    assert_success(&output, "generate");

    let output = galton(
        dir.path(),
        &[
            "report",
            "--data",
            "data/repos.csv",
            "--out",
            "reports/dashboard.html",
        ],
    );
    assert_success(&output, "report");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Analyzing"), "stderr: {stderr}");
    assert!(dir.path().join("reports/dashboard.html").exists());
}

#[test]
fn stats_json_document_carries_summaries_and_test() {
    let dir = tempfile::tempdir().unwrap();

    let output = galton(
        dir.path(),
        &["generate", "--rows", "50", "--seed", "11", "--out", "data/repos.csv"],
    );
    assert_success(&output, "generate");

    let output = galton(
        dir.path(),
        &[
            "stats",
            "--data",
            "data/repos.csv",
            "--group",
            "language",
            "--metric",
            "forks",
            "--test",
            "anova",
            "--format",
            "json",
        ],
    );
    assert_success(&output, "stats");

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["summaries"]["metric"], "forks");
    assert_eq!(document["test"]["kind"], "anova");
}
