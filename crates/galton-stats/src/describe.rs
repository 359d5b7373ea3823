//! Descriptive statistics: five-number-style summaries and group-wise
//! aggregation over a categorical key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use galton_core::{GroupKey, Metric, RepoRecord};

/// Descriptive summary of one numeric sample.
///
/// `std` is the sample standard deviation (n-1 denominator) and is `None`
/// for samples of fewer than two values, where it is undefined.
///
/// # Examples
///
/// ```
/// use galton_stats::describe::summarize;
///
/// let summary = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(summary.count, 8);
/// assert_eq!(summary.mean, 5.0);
/// assert_eq!(summary.median, 4.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of values summarized.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile with linear interpolation.
    pub median: f64,
    /// Sample standard deviation, `None` when `count < 2`.
    pub std: Option<f64>,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Summarize a sample of finite values. Returns `None` for an empty slice.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = percentile_sorted(&sorted, 50.0);

    let std = if count < 2 {
        None
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    };

    Some(Summary {
        count,
        mean,
        median,
        std,
        min: sorted[0],
        max: sorted[count - 1],
    })
}

/// Percentile of an ascending-sorted slice, linearly interpolated between
/// the two nearest ranks. `pct` is in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use galton_stats::describe::percentile_sorted;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&sorted, 50.0), 2.5);
/// assert_eq!(percentile_sorted(&sorted, 25.0), 1.75);
/// assert_eq!(percentile_sorted(&sorted, 100.0), 4.0);
/// ```
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = idx - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Group-wise summaries of one metric over one categorical key.
///
/// Group labels are sorted, so iteration and serialization order is
/// deterministic. `dropped` counts rows whose metric value was not finite
/// and therefore entered no group; the per-group counts plus `dropped`
/// always add up to the input row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSummaries {
    /// The categorical key the rows were grouped by.
    pub key: GroupKey,
    /// The metric that was summarized.
    pub metric: Metric,
    /// Per-group summaries, keyed by group label.
    pub groups: BTreeMap<String, Summary>,
    /// Rows dropped for a non-finite metric value.
    pub dropped: usize,
}

/// Split records into per-group metric samples.
///
/// Rows with a non-finite metric value are dropped; the second element of
/// the pair counts them. A label whose rows were all dropped still appears,
/// with an empty sample, so callers can report it as excluded.
pub fn split_by_group(
    records: &[RepoRecord],
    key: GroupKey,
    metric: Metric,
) -> (BTreeMap<String, Vec<f64>>, usize) {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut dropped = 0;
    for record in records {
        let entry = groups.entry(key.label_of(record)).or_default();
        let value = metric.value(record);
        if value.is_finite() {
            entry.push(value);
        } else {
            dropped += 1;
        }
    }
    (groups, dropped)
}

/// Compute per-group summaries of `metric` grouped by `key`.
///
/// # Examples
///
/// ```no_run
/// use galton_core::{dataset, GroupKey, Metric};
/// use galton_stats::describe::group_summaries;
/// use std::path::Path;
///
/// let records = dataset::read_csv(Path::new("data/repositories.csv")).unwrap();
/// let grouped = group_summaries(&records, GroupKey::Language, Metric::Stars);
/// for (language, summary) in &grouped.groups {
///     println!("{language}: median {} stars", summary.median);
/// }
/// ```
pub fn group_summaries(records: &[RepoRecord], key: GroupKey, metric: Metric) -> GroupedSummaries {
    let (split, dropped) = split_by_group(records, key, metric);
    let mut groups = BTreeMap::new();
    for (label, values) in split {
        if let Some(summary) = summarize(&values) {
            groups.insert(label, summary);
        }
    }
    GroupedSummaries {
        key,
        metric,
        groups,
        dropped,
    }
}
