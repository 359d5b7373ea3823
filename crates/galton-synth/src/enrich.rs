//! Per-row derived metrics.
//!
//! Every derived field is a pure function of one record's base fields and
//! the pipeline reference date. Enrichment is a map over rows, never a
//! fold: no cross-row state, no clock reads, idempotent for a fixed date.

use chrono::NaiveDate;

use galton_core::RepoRecord;

/// Recompute the derived fields of a record from its base fields.
///
/// Overwrites whatever the derived fields held before, so enriching an
/// already-enriched record is a no-op for the same `now`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use galton_core::{Category, Language, License, RepoRecord};
/// use galton_synth::enrich::enrich;
///
/// let record = RepoRecord {
///     name: "rust-project-001".into(),
///     language: Language::Rust,
///     stars: 100,
///     forks: 10,
///     issues_opened: 10,
///     issues_closed: 30,
///     pull_requests: 5,
///     contributors: 3,
///     commits: 90,
///     size_kb: 400,
///     created_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     updated_at: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///     has_wiki: false,
///     has_readme: true,
///     license: License::Mit,
///     category: Category::Libraries,
///     age_days: 0,
///     days_since_update: 0,
///     issue_resolution_rate: 0.0,
///     commits_per_month: 0.0,
/// };
/// let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let enriched = enrich(&record, now);
/// assert_eq!(enriched.age_days, 151);
/// assert_eq!(enriched.issue_resolution_rate, 0.75);
/// assert_eq!(enrich(&enriched, now), enriched);
/// ```
pub fn enrich(record: &RepoRecord, now: NaiveDate) -> RepoRecord {
    let mut out = record.clone();
    out.age_days = (now - record.created_at).num_days();
    out.days_since_update = (now - record.updated_at).num_days();
    out.issue_resolution_rate = resolution_rate(record.issues_opened, record.issues_closed);
    out.commits_per_month = commits_per_month(record.commits, out.age_days);
    out
}

/// Enrich every record in a table against the same reference date.
pub fn enrich_all(records: &[RepoRecord], now: NaiveDate) -> Vec<RepoRecord> {
    records.iter().map(|r| enrich(r, now)).collect()
}

/// Fraction of tracked issues that were closed, in `[0, 1]`.
///
/// A repository with no issues at all resolves nothing and fails to
/// resolve nothing; the rate is defined as `0.0` there rather than NaN.
pub fn resolution_rate(issues_opened: u64, issues_closed: u64) -> f64 {
    let total = issues_opened + issues_closed;
    if total == 0 {
        0.0
    } else {
        issues_closed as f64 / total as f64
    }
}

/// Average commits per month of repository age.
///
/// The month count floors at 1 so very young repositories report their
/// whole commit count instead of dividing by a sliver of a month.
pub fn commits_per_month(commits: u64, age_days: i64) -> f64 {
    let months = (age_days as f64 / 30.0).max(1.0);
    commits as f64 / months
}
