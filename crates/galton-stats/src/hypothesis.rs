//! Hypothesis tests over grouped samples: one-way ANOVA, Kruskal-Wallis,
//! and Mann-Whitney U.
//!
//! Degenerate inputs (fewer than two usable groups, zero variance, empty
//! samples) are data conditions, not programming errors, so every test
//! returns a [`TestOutcome`] and reserves `Err` for nothing: the
//! not-applicable state is part of the result type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal};

use galton_core::{GroupKey, Metric, RepoRecord};

use crate::describe::split_by_group;
use crate::rank::{average_ranks, tie_term};

/// Result of a hypothesis test: either a computed statistic with its
/// p-value, or a typed statement of why the test did not apply.
///
/// # Examples
///
/// ```
/// use galton_stats::hypothesis::{anova, TestOutcome};
///
/// let groups = vec![vec![1.0, 2.0, 3.0]];
/// match anova(&groups, 0.05) {
///     TestOutcome::NotApplicable { reason } => assert!(reason.contains("two")),
///     TestOutcome::Computed { .. } => panic!("one group must not test"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TestOutcome {
    /// The test ran; `significant` compares `p_value` against the alpha
    /// the test was called with.
    #[serde(rename_all = "camelCase")]
    Computed {
        statistic: f64,
        p_value: f64,
        significant: bool,
    },
    /// The test did not apply to this input.
    #[serde(rename_all = "camelCase")]
    NotApplicable { reason: String },
}

impl TestOutcome {
    fn computed(statistic: f64, p_value: f64, alpha: f64) -> Self {
        TestOutcome::Computed {
            statistic,
            p_value,
            significant: p_value < alpha,
        }
    }

    fn not_applicable(reason: impl Into<String>) -> Self {
        TestOutcome::NotApplicable {
            reason: reason.into(),
        }
    }

    /// `true` for a computed outcome with `p < alpha`.
    pub fn is_significant(&self) -> bool {
        matches!(self, TestOutcome::Computed { significant, .. } if *significant)
    }
}

/// Direction of a Mann-Whitney alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alternative {
    /// The two distributions differ.
    TwoSided,
    /// The first sample is stochastically greater.
    Greater,
    /// The first sample is stochastically smaller.
    Less,
}

/// One-way analysis of variance over two or more groups.
///
/// Empty groups are ignored. The p-value comes from the F distribution
/// with `(k - 1, N - k)` degrees of freedom.
///
/// Not applicable when fewer than two non-empty groups remain, when no
/// residual degrees of freedom exist (`N == k`), or when the within-group
/// variance is zero (the F statistic is unbounded there).
pub fn anova(groups: &[Vec<f64>], alpha: f64) -> TestOutcome {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|g| !g.is_empty()).collect();
    let k = groups.len();
    if k < 2 {
        return TestOutcome::not_applicable("fewer than two non-empty groups");
    }
    let n: usize = groups.iter().map(|g| g.len()).sum();
    if n <= k {
        return TestOutcome::not_applicable("no residual degrees of freedom");
    }

    let grand = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let mean = group.iter().sum::<f64>() / group.len() as f64;
        ss_between += group.len() as f64 * (mean - grand).powi(2);
        ss_within += group.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    }
    if ss_within <= 0.0 {
        return TestOutcome::not_applicable("zero within-group variance");
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let f = (ss_between / df_between) / (ss_within / df_within);

    let Ok(dist) = FisherSnedecor::new(df_between, df_within) else {
        return TestOutcome::not_applicable("degenerate degrees of freedom");
    };
    TestOutcome::computed(f, 1.0 - dist.cdf(f), alpha)
}

/// Kruskal-Wallis H test over two or more groups, tie-corrected.
///
/// The p-value comes from the chi-squared approximation with `k - 1`
/// degrees of freedom. Not applicable when fewer than two non-empty
/// groups remain or when every pooled value is identical (the tie
/// correction divides out).
pub fn kruskal_wallis(groups: &[Vec<f64>], alpha: f64) -> TestOutcome {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|g| !g.is_empty()).collect();
    let k = groups.len();
    if k < 2 {
        return TestOutcome::not_applicable("fewer than two non-empty groups");
    }

    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let n = pooled.len() as f64;
    let ranks = average_ranks(&pooled);

    let mut rank_square_sum = 0.0;
    let mut offset = 0;
    for group in &groups {
        let rank_sum: f64 = ranks[offset..offset + group.len()].iter().sum();
        rank_square_sum += rank_sum * rank_sum / group.len() as f64;
        offset += group.len();
    }
    let h = 12.0 / (n * (n + 1.0)) * rank_square_sum - 3.0 * (n + 1.0);

    let correction = 1.0 - tie_term(&pooled) / (n * n * n - n);
    if correction <= 0.0 {
        return TestOutcome::not_applicable("all values are identical");
    }
    let h = h / correction;

    let Ok(dist) = ChiSquared::new((k - 1) as f64) else {
        return TestOutcome::not_applicable("degenerate degrees of freedom");
    };
    TestOutcome::computed(h, 1.0 - dist.cdf(h), alpha)
}

/// Mann-Whitney U test between two samples.
///
/// Uses the normal approximation with tie and continuity corrections for
/// every sample size, so one code path serves the whole pipeline. The
/// reported statistic is `U` of the first sample regardless of
/// `alternative`. Not applicable when either sample is empty or when the
/// pooled values are all identical.
pub fn mann_whitney(x: &[f64], y: &[f64], alternative: Alternative, alpha: f64) -> TestOutcome {
    if x.is_empty() || y.is_empty() {
        return TestOutcome::not_applicable("one of the samples is empty");
    }
    let n1 = x.len() as f64;
    let n2 = y.len() as f64;
    let n = n1 + n2;

    let pooled: Vec<f64> = x.iter().chain(y.iter()).copied().collect();
    let ranks = average_ranks(&pooled);
    let r1: f64 = ranks[..x.len()].iter().sum();
    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;

    let mean = n1 * n2 / 2.0;
    let variance = n1 * n2 / 12.0 * ((n + 1.0) - tie_term(&pooled) / (n * (n - 1.0)));
    if variance <= 0.0 {
        return TestOutcome::not_applicable("all values are identical");
    }
    let sigma = variance.sqrt();

    let u = match alternative {
        Alternative::Greater => u1,
        Alternative::Less => u2,
        Alternative::TwoSided => u1.max(u2),
    };
    // continuity correction: U is discrete, the normal is not
    let z = (u - mean - 0.5) / sigma;

    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return TestOutcome::not_applicable("degenerate normal approximation");
    };
    let survival = 1.0 - normal.cdf(z);
    let p = match alternative {
        Alternative::TwoSided => (2.0 * survival).min(1.0),
        _ => survival,
    };
    TestOutcome::computed(u1, p, alpha)
}

/// Which hypothesis test to run over grouped data.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing.
///
/// # Examples
///
/// ```
/// use galton_stats::hypothesis::TestKind;
///
/// let kind: TestKind = "kruskal".parse().unwrap();
/// assert_eq!(kind, TestKind::KruskalWallis);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestKind {
    Anova,
    KruskalWallis,
    MannWhitney,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Anova => write!(f, "anova"),
            TestKind::KruskalWallis => write!(f, "kruskal-wallis"),
            TestKind::MannWhitney => write!(f, "mann-whitney"),
        }
    }
}

impl FromStr for TestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "anova" => Ok(TestKind::Anova),
            "kruskal-wallis" | "kruskal" => Ok(TestKind::KruskalWallis),
            "mann-whitney" | "mannwhitney" => Ok(TestKind::MannWhitney),
            other => Err(format!("unknown test: {other}")),
        }
    }
}

/// A hypothesis test run against records grouped by a categorical key.
///
/// `excluded` lists group labels that held rows but no usable metric
/// values; they took no part in the test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTest {
    /// Test that was run.
    pub kind: TestKind,
    /// Grouping key.
    pub key: GroupKey,
    /// Metric tested.
    pub metric: Metric,
    /// Significance threshold the outcome was judged against.
    pub alpha: f64,
    /// Group labels that entered the test, in label order.
    pub groups: Vec<String>,
    /// Group labels excluded for having no usable values.
    pub excluded: Vec<String>,
    /// The outcome.
    pub outcome: TestOutcome,
}

/// Group `metric` by `key` and run `kind` over the resulting samples.
///
/// Mann-Whitney is a two-sample test; a key that yields any other number
/// of usable groups produces a not-applicable outcome. The two samples
/// are taken in label order.
pub fn test_by_group(
    records: &[RepoRecord],
    key: GroupKey,
    metric: Metric,
    kind: TestKind,
    alpha: f64,
) -> GroupTest {
    let (split, _) = split_by_group(records, key, metric);

    let mut labels = Vec::new();
    let mut excluded = Vec::new();
    let mut samples = Vec::new();
    for (label, values) in split {
        if values.is_empty() {
            excluded.push(label);
        } else {
            labels.push(label);
            samples.push(values);
        }
    }

    let outcome = match kind {
        TestKind::Anova => anova(&samples, alpha),
        TestKind::KruskalWallis => kruskal_wallis(&samples, alpha),
        TestKind::MannWhitney => {
            if samples.len() == 2 {
                mann_whitney(&samples[0], &samples[1], Alternative::TwoSided, alpha)
            } else {
                TestOutcome::not_applicable(format!(
                    "mann-whitney requires exactly two groups, found {}",
                    samples.len()
                ))
            }
        }
    };

    GroupTest {
        kind,
        key,
        metric,
        alpha,
        groups: labels,
        excluded,
        outcome,
    }
}
