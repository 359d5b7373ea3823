//! The four research questions the pipeline answers, orchestrated into a
//! single serializable report.
//!
//! RQ1: popularity vs activity (correlations and a metric matrix).
//! RQ2: issue resolution rate across languages (ANOVA + Kruskal-Wallis).
//! RQ3: documentation vs engagement (medians + one-sided Mann-Whitney).
//! RQ4: license vs popularity and contribution (medians by license).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use galton_core::{GroupKey, Metric, RepoRecord};

use crate::correlation::{
    correlate, correlation_matrix, CorrelationMatrix, CorrelationMethod, MetricCorrelation,
};
use crate::describe::{group_summaries, summarize, GroupedSummaries};
use crate::hypothesis::{
    mann_whitney, test_by_group, Alternative, GroupTest, TestKind, TestOutcome,
};

/// Metrics that stand for community engagement in RQ3.
pub const ENGAGEMENT_METRICS: [Metric; 4] = [
    Metric::Stars,
    Metric::Forks,
    Metric::Contributors,
    Metric::PullRequests,
];

/// Metrics correlated pairwise in the RQ1 matrix.
const MATRIX_METRICS: [Metric; 5] = [
    Metric::Stars,
    Metric::Forks,
    Metric::Commits,
    Metric::Contributors,
    Metric::PullRequests,
];

/// High-level characterization of a dataset.
///
/// # Examples
///
/// ```
/// use galton_stats::research::characterize;
///
/// let summary = characterize(&[]);
/// assert_eq!(summary.total_repositories, 0);
/// assert!(summary.period_start.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Row count.
    pub total_repositories: usize,
    /// Distinct languages present.
    pub languages: usize,
    /// Distinct categories present.
    pub categories: usize,
    /// Earliest creation date, `None` for an empty dataset.
    pub period_start: Option<NaiveDate>,
    /// Latest creation date, `None` for an empty dataset.
    pub period_end: Option<NaiveDate>,
    /// Repositories per language, label-sorted.
    pub language_counts: BTreeMap<String, usize>,
    /// Median stars across the whole dataset.
    pub median_stars: f64,
    /// Median contributors across the whole dataset.
    pub median_contributors: f64,
}

/// Characterize a dataset: totals, creation period, language distribution.
pub fn characterize(records: &[RepoRecord]) -> DatasetSummary {
    let mut language_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut categories: BTreeSet<String> = BTreeSet::new();
    for record in records {
        *language_counts
            .entry(record.language.to_string())
            .or_default() += 1;
        categories.insert(record.category.to_string());
    }

    let stars: Vec<f64> = records.iter().map(|r| r.stars as f64).collect();
    let contributors: Vec<f64> = records.iter().map(|r| r.contributors as f64).collect();

    DatasetSummary {
        total_repositories: records.len(),
        languages: language_counts.len(),
        categories: categories.len(),
        period_start: records.iter().map(|r| r.created_at).min(),
        period_end: records.iter().map(|r| r.created_at).max(),
        language_counts,
        median_stars: summarize(&stars).map_or(0.0, |s| s.median),
        median_contributors: summarize(&contributors).map_or(0.0, |s| s.median),
    }
}

/// RQ1: how does popularity (stars) relate to activity (commits,
/// contributors)?
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rq1 {
    pub question: String,
    pub stars_vs_commits: MetricCorrelation,
    pub stars_vs_contributors: MetricCorrelation,
    pub matrix: CorrelationMatrix,
}

/// RQ2: does the issue resolution rate differ across languages?
///
/// ANOVA carries the parametric answer; Kruskal-Wallis double-checks it
/// without the normality assumption, which heavy-tailed repository data
/// rarely satisfies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rq2 {
    pub question: String,
    pub by_language: GroupedSummaries,
    pub anova: GroupTest,
    pub kruskal_wallis: GroupTest,
}

/// RQ3: do documented repositories show higher engagement?
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rq3 {
    pub question: String,
    /// Median of each engagement metric per documentation level.
    pub median_engagement: BTreeMap<String, BTreeMap<String, f64>>,
    /// One-sided Mann-Whitney: stars of README repositories against the
    /// rest, alternative "greater".
    pub readme_stars: ReadmeStarsTest,
}

/// The RQ3 Mann-Whitney comparison with its sample sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeStarsTest {
    pub with_readme: usize,
    pub without_readme: usize,
    pub alternative: Alternative,
    pub alpha: f64,
    pub outcome: TestOutcome,
}

/// RQ4: how does license choice relate to popularity and contribution?
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rq4 {
    pub question: String,
    pub by_license: BTreeMap<String, LicenseMedians>,
}

/// Median popularity metrics for one license.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseMedians {
    pub repositories: usize,
    pub stars: f64,
    pub forks: f64,
    pub contributors: f64,
}

/// The complete analysis result document.
///
/// This is the artifact `analyze` persists and the dashboard consumes;
/// it round-trips through JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Significance threshold every test in the report was judged against.
    pub alpha: f64,
    pub dataset: DatasetSummary,
    pub rq1: Rq1,
    pub rq2: Rq2,
    pub rq3: Rq3,
    pub rq4: Rq4,
}

/// Run the full research-question analysis over a dataset.
///
/// Total over any input: degenerate datasets (empty, one language, one
/// license) produce not-applicable outcomes instead of errors.
///
/// # Examples
///
/// ```
/// use galton_stats::research::analyze;
/// use galton_synth::generator::{generate, GenerateOptions};
///
/// let records = generate(&GenerateOptions { rows: 50, ..GenerateOptions::default() }).unwrap();
/// let report = analyze(&records, 0.05);
/// assert_eq!(report.dataset.total_repositories, 50);
/// ```
pub fn analyze(records: &[RepoRecord], alpha: f64) -> AnalysisReport {
    AnalysisReport {
        alpha,
        dataset: characterize(records),
        rq1: analyze_rq1(records, alpha),
        rq2: analyze_rq2(records, alpha),
        rq3: analyze_rq3(records, alpha),
        rq4: analyze_rq4(records),
    }
}

fn analyze_rq1(records: &[RepoRecord], alpha: f64) -> Rq1 {
    Rq1 {
        question: "How does repository popularity (stars) relate to activity \
                   (commits and contributors)?"
            .into(),
        stars_vs_commits: correlate(
            records,
            Metric::Stars,
            Metric::Commits,
            CorrelationMethod::Pearson,
            alpha,
        ),
        stars_vs_contributors: correlate(
            records,
            Metric::Stars,
            Metric::Contributors,
            CorrelationMethod::Pearson,
            alpha,
        ),
        matrix: correlation_matrix(records, &MATRIX_METRICS),
    }
}

fn analyze_rq2(records: &[RepoRecord], alpha: f64) -> Rq2 {
    Rq2 {
        question: "Does the issue resolution rate differ significantly across \
                   programming languages?"
            .into(),
        by_language: group_summaries(records, GroupKey::Language, Metric::IssueResolutionRate),
        anova: test_by_group(
            records,
            GroupKey::Language,
            Metric::IssueResolutionRate,
            TestKind::Anova,
            alpha,
        ),
        kruskal_wallis: test_by_group(
            records,
            GroupKey::Language,
            Metric::IssueResolutionRate,
            TestKind::KruskalWallis,
            alpha,
        ),
    }
}

fn analyze_rq3(records: &[RepoRecord], alpha: f64) -> Rq3 {
    let mut median_engagement: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for metric in ENGAGEMENT_METRICS {
        let grouped = group_summaries(records, GroupKey::DocLevel, metric);
        for (level, summary) in grouped.groups {
            median_engagement
                .entry(level)
                .or_default()
                .insert(metric.to_string(), summary.median);
        }
    }

    let with_readme: Vec<f64> = records
        .iter()
        .filter(|r| r.has_readme)
        .map(|r| r.stars as f64)
        .collect();
    let without_readme: Vec<f64> = records
        .iter()
        .filter(|r| !r.has_readme)
        .map(|r| r.stars as f64)
        .collect();

    Rq3 {
        question: "Do documented repositories (README, wiki) show higher community \
                   engagement?"
            .into(),
        median_engagement,
        readme_stars: ReadmeStarsTest {
            with_readme: with_readme.len(),
            without_readme: without_readme.len(),
            alternative: Alternative::Greater,
            alpha,
            outcome: mann_whitney(&with_readme, &without_readme, Alternative::Greater, alpha),
        },
    }
}

fn analyze_rq4(records: &[RepoRecord]) -> Rq4 {
    let stars = group_summaries(records, GroupKey::License, Metric::Stars);
    let forks = group_summaries(records, GroupKey::License, Metric::Forks);
    let contributors = group_summaries(records, GroupKey::License, Metric::Contributors);

    let mut by_license = BTreeMap::new();
    for (label, summary) in &stars.groups {
        by_license.insert(
            label.clone(),
            LicenseMedians {
                repositories: summary.count,
                stars: summary.median,
                forks: forks.groups.get(label).map_or(0.0, |s| s.median),
                contributors: contributors.groups.get(label).map_or(0.0, |s| s.median),
            },
        );
    }

    Rq4 {
        question: "How does license choice relate to repository popularity and \
                   contribution?"
            .into(),
        by_license,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::CorrelationOutcome;
    use galton_core::{Category, Language, License};
    use galton_synth::generator::{generate, GenerateOptions};

    fn make_record(language: Language, stars: u64, has_readme: bool) -> RepoRecord {
        RepoRecord {
            name: format!("{}-project-{stars:03}", language.slug()),
            language,
            stars,
            forks: stars / 8,
            issues_opened: stars / 20 + 1,
            issues_closed: stars / 5,
            pull_requests: 4,
            contributors: 3,
            commits: stars * 2,
            size_kb: 128,
            created_at: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            has_wiki: false,
            has_readme,
            license: License::Mit,
            category: Category::DataScience,
            age_days: 500,
            days_since_update: 100,
            issue_resolution_rate: 0.6,
            commits_per_month: 12.0,
        }
    }

    #[test]
    fn characterize_counts_and_period() {
        let records = vec![
            make_record(Language::Python, 10, true),
            make_record(Language::Python, 20, true),
            make_record(Language::Rust, 30, false),
        ];
        let summary = characterize(&records);
        assert_eq!(summary.total_repositories, 3);
        assert_eq!(summary.languages, 2);
        assert_eq!(summary.language_counts["Python"], 2);
        assert_eq!(
            summary.period_start,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(summary.median_stars, 20.0);
    }

    #[test]
    fn full_analysis_over_generated_data() {
        let records = generate(&GenerateOptions {
            rows: 120,
            ..GenerateOptions::default()
        })
        .unwrap();
        let report = analyze(&records, 0.05);

        assert_eq!(report.dataset.total_repositories, 120);
        let counted: usize = report.dataset.language_counts.values().sum();
        assert_eq!(counted, 120);

        assert!(matches!(
            report.rq1.stars_vs_commits.outcome,
            CorrelationOutcome::Computed { .. }
        ));
        assert_eq!(report.rq1.matrix.metrics.len(), 5);

        assert!(matches!(
            report.rq2.anova.outcome,
            TestOutcome::Computed { .. }
        ));
        assert!(matches!(
            report.rq2.kruskal_wallis.outcome,
            TestOutcome::Computed { .. }
        ));

        let rq3 = &report.rq3;
        assert_eq!(
            rq3.readme_stars.with_readme + rq3.readme_stars.without_readme,
            120
        );

        for medians in report.rq4.by_license.values() {
            assert!(medians.repositories > 0);
        }
    }

    #[test]
    fn empty_dataset_is_total() {
        let report = analyze(&[], 0.05);
        assert_eq!(report.dataset.total_repositories, 0);
        assert!(report.dataset.period_start.is_none());
        assert!(matches!(
            report.rq2.anova.outcome,
            TestOutcome::NotApplicable { .. }
        ));
        assert!(matches!(
            report.rq3.readme_stars.outcome,
            TestOutcome::NotApplicable { .. }
        ));
        assert!(report.rq4.by_license.is_empty());
    }

    #[test]
    fn single_language_yields_not_applicable_tests() {
        let records: Vec<_> = (1..=10)
            .map(|i| make_record(Language::Go, i * 10, true))
            .collect();
        let report = analyze(&records, 0.05);

        match &report.rq2.anova.outcome {
            TestOutcome::NotApplicable { reason } => {
                assert!(reason.contains("two"), "reason: {reason}");
            }
            TestOutcome::Computed { .. } => panic!("one language must not test"),
        }
        // every record has a README, so the comparison group is empty
        assert!(matches!(
            report.rq3.readme_stars.outcome,
            TestOutcome::NotApplicable { .. }
        ));
    }

    #[test]
    fn report_roundtrips_through_json() {
        let records = generate(&GenerateOptions {
            rows: 40,
            ..GenerateOptions::default()
        })
        .unwrap();
        let report = analyze(&records, 0.05);

        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dataset.total_repositories, 40);
        assert_eq!(back.alpha, report.alpha);
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = analyze(&[], 0.05);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["dataset"].get("totalRepositories").is_some());
        assert!(json["rq1"].get("starsVsCommits").is_some());
        assert!(json["rq3"]["readmeStars"].get("withReadme").is_some());
    }
}
