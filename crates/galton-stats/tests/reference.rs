//! Integration test: statistical results against closed-form reference
//! values, and the full research pipeline over a generated dataset.

use chrono::NaiveDate;

use galton_core::Metric;
use galton_stats::correlation::CorrelationOutcome;
use galton_stats::hypothesis::{Alternative, TestOutcome};
use galton_stats::research::AnalysisReport;
use galton_synth::generator::{generate, GenerateOptions};

fn computed(outcome: &TestOutcome) -> (f64, f64, bool) {
    match outcome {
        TestOutcome::Computed {
            statistic,
            p_value,
            significant,
        } => (*statistic, *p_value, *significant),
        TestOutcome::NotApplicable { reason } => panic!("expected a result, got: {reason}"),
    }
}

#[test]
fn anova_matches_closed_form() {
    // Equal group sizes and spreads keep the arithmetic exact:
    // SSB = 600, SSW = 24, F = (600/2)/(24/6) = 75.
    let groups = vec![
        vec![10.0, 12.0, 14.0],
        vec![20.0, 22.0, 24.0],
        vec![30.0, 32.0, 34.0],
    ];
    let (f, p, significant) = computed(&galton_stats::hypothesis::anova(&groups, 0.05));

    assert!((f - 75.0).abs() < 1e-9, "F = {f}");
    // for d1 = 2 the F survival function is (1 + x/3)^-3 at d2 = 6
    let expected = 26.0_f64.powi(-3);
    assert!((p - expected).abs() < 1e-9, "p = {p}, expected {expected}");
    assert!(significant);
}

#[test]
fn kruskal_wallis_matches_closed_form() {
    // Fully separated groups, no ties: rank sums 6, 15, 24 give H = 7.2.
    let groups = vec![
        vec![10.0, 12.0, 14.0],
        vec![20.0, 22.0, 24.0],
        vec![30.0, 32.0, 34.0],
    ];
    let (h, p, significant) =
        computed(&galton_stats::hypothesis::kruskal_wallis(&groups, 0.05));

    assert!((h - 7.2).abs() < 1e-9, "H = {h}");
    // chi-square survival with 2 degrees of freedom is exp(-H/2)
    let expected = (-3.6_f64).exp();
    assert!((p - expected).abs() < 1e-9, "p = {p}, expected {expected}");
    assert!(significant);
}

#[test]
fn mann_whitney_matches_normal_approximation() {
    // Interleaved samples: U1 = 9, U2 = 7, sigma = sqrt(12),
    // z = (9 - 8 - 0.5)/sqrt(12), two-sided p ~ 0.885.
    let x = [1.0, 4.0, 6.0, 8.0];
    let y = [2.0, 3.0, 5.0, 7.0];
    let (u, p, significant) = computed(&galton_stats::hypothesis::mann_whitney(
        &x,
        &y,
        Alternative::TwoSided,
        0.05,
    ));

    assert!((u - 9.0).abs() < 1e-9, "U = {u}");
    assert!(p > 0.87 && p < 0.90, "p = {p}");
    assert!(!significant);
}

#[test]
fn pearson_matches_closed_form() {
    // r = 0.8, t^2 = 32/9 at 2 degrees of freedom, so p is exactly 0.2.
    let pairs = [(1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 4.0)];
    match galton_stats::correlation::pearson(&pairs, 0.05) {
        CorrelationOutcome::Computed {
            r,
            p_value,
            n,
            significant,
        } => {
            assert!((r - 0.8).abs() < 1e-12, "r = {r}");
            assert!((p_value - 0.2).abs() < 1e-6, "p = {p_value}");
            assert_eq!(n, 4);
            assert!(!significant);
        }
        CorrelationOutcome::NotApplicable { reason } => panic!("unexpected: {reason}"),
    }
}

#[test]
fn spearman_equals_pearson_on_ranks() {
    // Values already are their own ranks, so rho must equal r above.
    let pairs = [(1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 4.0)];
    match galton_stats::correlation::spearman(&pairs, 0.05) {
        CorrelationOutcome::Computed { r, p_value, .. } => {
            assert!((r - 0.8).abs() < 1e-12, "rho = {r}");
            assert!((p_value - 0.2).abs() < 1e-6, "p = {p_value}");
        }
        CorrelationOutcome::NotApplicable { reason } => panic!("unexpected: {reason}"),
    }
}

#[test]
fn research_pipeline_over_generated_dataset() {
    let records = generate(&GenerateOptions {
        rows: 200,
        seed: 7,
        ..GenerateOptions::default()
    })
    .unwrap();
    let report = galton_stats::research::analyze(&records, 0.05);

    // Dataset characterization
    assert_eq!(report.dataset.total_repositories, 200);
    assert!(report.dataset.languages <= 8);
    let counted: usize = report.dataset.language_counts.values().sum();
    assert_eq!(counted, 200);

    let now = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let start = report.dataset.period_start.unwrap();
    let end = report.dataset.period_end.unwrap();
    assert!(start >= now - chrono::Duration::days(1825), "start = {start}");
    assert!(end <= now - chrono::Duration::days(30), "end = {end}");

    // RQ1: the matrix covers five metrics, unit diagonal, symmetric
    let matrix = &report.rq1.matrix;
    assert_eq!(matrix.metrics.len(), 5);
    assert_eq!(matrix.metrics[0], Metric::Stars);
    for (i, row) in matrix.values.iter().enumerate() {
        assert_eq!(row[i], Some(1.0), "diagonal at {i}");
        for (j, value) in row.iter().enumerate() {
            assert_eq!(*value, matrix.values[j][i], "symmetry at ({i}, {j})");
        }
    }
    // forks are drawn as a fraction of stars, so this pair must correlate
    let stars_forks = matrix.values[0][1].unwrap();
    assert!(stars_forks > 0.5, "stars/forks r = {stars_forks}");

    // RQ2: eight languages over 200 rows always leaves enough groups
    let (_, p, _) = computed(&report.rq2.anova.outcome);
    assert!((0.0..=1.0).contains(&p), "anova p = {p}");
    let (_, p, _) = computed(&report.rq2.kruskal_wallis.outcome);
    assert!((0.0..=1.0).contains(&p), "kruskal p = {p}");

    // RQ3: every record lands in exactly one side of the README split
    let readme = &report.rq3.readme_stars;
    assert_eq!(readme.with_readme + readme.without_readme, 200);
    assert_eq!(readme.alternative, Alternative::Greater);

    // RQ4: license groups partition the dataset
    let licensed: usize = report
        .rq4
        .by_license
        .values()
        .map(|m| m.repositories)
        .sum();
    assert_eq!(licensed, 200);
}

#[test]
fn analysis_report_survives_disk_roundtrip() {
    let records = generate(&GenerateOptions {
        rows: 60,
        ..GenerateOptions::default()
    })
    .unwrap();
    let report = galton_stats::research::analyze(&records, 0.05);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results/analysis.json");
    galton_core::dataset::write_json(&path, &report).unwrap();
    let back: AnalysisReport = galton_core::dataset::read_json(&path).unwrap();

    assert_eq!(back.alpha, report.alpha);
    assert_eq!(
        back.dataset.total_repositories,
        report.dataset.total_repositories
    );
    assert_eq!(back.rq1.matrix.values, report.rq1.matrix.values);
}
