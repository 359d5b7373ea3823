//! Pearson and Spearman correlation over paired metric values.
//!
//! The p-values use the t approximation `t = r * sqrt((n-2) / (1-r^2))`
//! with `n - 2` degrees of freedom, two-sided. Spearman is the Pearson
//! coefficient of the average-rank transforms, which keeps tie handling
//! consistent with the nonparametric tests.

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use galton_core::{Metric, RepoRecord};

use crate::rank::average_ranks;

/// Result of a correlation: the coefficient with its p-value, or a typed
/// statement of why none exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CorrelationOutcome {
    #[serde(rename_all = "camelCase")]
    Computed {
        r: f64,
        p_value: f64,
        n: usize,
        significant: bool,
    },
    #[serde(rename_all = "camelCase")]
    NotApplicable { reason: String },
}

impl CorrelationOutcome {
    fn not_applicable(reason: impl Into<String>) -> Self {
        CorrelationOutcome::NotApplicable {
            reason: reason.into(),
        }
    }
}

/// Correlation coefficient flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorrelationMethod {
    /// Linear correlation of the raw values.
    Pearson,
    /// Rank correlation; robust to monotone nonlinearity.
    Spearman,
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationMethod::Pearson => write!(f, "pearson"),
            CorrelationMethod::Spearman => write!(f, "spearman"),
        }
    }
}

/// Pearson correlation over clean pairs.
///
/// Not applicable for fewer than three pairs or when either side has zero
/// variance. A numerically perfect correlation reports `p = 0.0`.
///
/// # Examples
///
/// ```
/// use galton_stats::correlation::{pearson, CorrelationOutcome};
///
/// let pairs: Vec<(f64, f64)> = (1..=5).map(|i| (i as f64, 2.0 * i as f64)).collect();
/// match pearson(&pairs, 0.05) {
///     CorrelationOutcome::Computed { r, .. } => assert!((r - 1.0).abs() < 1e-12),
///     CorrelationOutcome::NotApplicable { .. } => panic!("linear data must correlate"),
/// }
/// ```
pub fn pearson(pairs: &[(f64, f64)], alpha: f64) -> CorrelationOutcome {
    let n = pairs.len();
    let Some(r) = pearson_r(pairs) else {
        return if n < 3 {
            CorrelationOutcome::not_applicable("fewer than three paired observations")
        } else {
            CorrelationOutcome::not_applicable("zero variance in one of the samples")
        };
    };
    let Some(p_value) = two_sided_p(r, n) else {
        return CorrelationOutcome::not_applicable("degenerate t distribution");
    };
    CorrelationOutcome::Computed {
        r,
        p_value,
        n,
        significant: p_value < alpha,
    }
}

/// Spearman rank correlation over clean pairs.
pub fn spearman(pairs: &[(f64, f64)], alpha: f64) -> CorrelationOutcome {
    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let rank_pairs: Vec<(f64, f64)> = average_ranks(&xs)
        .into_iter()
        .zip(average_ranks(&ys))
        .collect();
    pearson(&rank_pairs, alpha)
}

/// A correlation between two metrics of the dataset.
///
/// `dropped` counts rows where either metric value was not finite; those
/// rows entered no pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCorrelation {
    /// First metric.
    pub x: Metric,
    /// Second metric.
    pub y: Metric,
    /// Coefficient flavor.
    pub method: CorrelationMethod,
    /// Rows dropped for a non-finite value on either side.
    pub dropped: usize,
    /// The outcome.
    pub outcome: CorrelationOutcome,
}

/// Correlate two metrics across all usable rows.
pub fn correlate(
    records: &[RepoRecord],
    x: Metric,
    y: Metric,
    method: CorrelationMethod,
    alpha: f64,
) -> MetricCorrelation {
    let (pairs, dropped) = metric_pairs(records, x, y);
    let outcome = match method {
        CorrelationMethod::Pearson => pearson(&pairs, alpha),
        CorrelationMethod::Spearman => spearman(&pairs, alpha),
    };
    MetricCorrelation {
        x,
        y,
        method,
        dropped,
        outcome,
    }
}

/// Symmetric Pearson correlation matrix over a metric list.
///
/// `values[i][j]` is the coefficient between `metrics[i]` and
/// `metrics[j]`, `None` where the coefficient is undefined. The diagonal
/// is `Some(1.0)` whenever the metric has any usable values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    /// Row/column order of the matrix.
    pub metrics: Vec<Metric>,
    /// Coefficients, row-major.
    pub values: Vec<Vec<Option<f64>>>,
}

/// Compute the pairwise Pearson matrix over `metrics`.
pub fn correlation_matrix(records: &[RepoRecord], metrics: &[Metric]) -> CorrelationMatrix {
    let m = metrics.len();
    let mut values = vec![vec![None; m]; m];
    for i in 0..m {
        for j in i..m {
            let (pairs, _) = metric_pairs(records, metrics[i], metrics[j]);
            let r = if i == j {
                // self-correlation is 1 wherever defined, even for a
                // constant column
                (!pairs.is_empty()).then_some(1.0)
            } else {
                pearson_r(&pairs)
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        metrics: metrics.to_vec(),
        values,
    }
}

fn metric_pairs(records: &[RepoRecord], x: Metric, y: Metric) -> (Vec<(f64, f64)>, usize) {
    let mut pairs = Vec::with_capacity(records.len());
    let mut dropped = 0;
    for record in records {
        let a = x.value(record);
        let b = y.value(record);
        if a.is_finite() && b.is_finite() {
            pairs.push((a, b));
        } else {
            dropped += 1;
        }
    }
    (pairs, dropped)
}

fn pearson_r(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

fn two_sided_p(r: f64, n: usize) -> Option<f64> {
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= f64::EPSILON {
        return Some(0.0);
    }
    let t = r.abs() * (df / denom).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t))).min(1.0))
}
