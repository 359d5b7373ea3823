//! Single-file HTML dashboard.
//!
//! Everything is inlined: stylesheet, SVG charts, result tables. The output
//! opens from disk with no network access and no script dependencies.

use std::cmp::Ordering;

use chrono::NaiveDate;

use galton_core::{GroupKey, Metric, RepoRecord};
use galton_stats::correlation::{CorrelationMatrix, CorrelationOutcome, MetricCorrelation};
use galton_stats::describe::{group_summaries, split_by_group};
use galton_stats::hypothesis::{GroupTest, TestOutcome};
use galton_stats::research::{AnalysisReport, ENGAGEMENT_METRICS};

use crate::charts::{self, escape, ScatterPoint, Series};

/// Presentation knobs for [`render_dashboard`].
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Page and header title.
    pub title: String,
    /// Date stamped into the footer.
    pub generated_on: NaiveDate,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            title: "Synthetic Repository Analytics".to_string(),
            generated_on: NaiveDate::default(),
        }
    }
}

/// Render the complete dashboard for a dataset and its analysis report.
///
/// The caller is expected to pass the report computed from the same
/// records; nothing enforces that, the dashboard is a pure view.
pub fn render_dashboard(
    records: &[RepoRecord],
    report: &AnalysisReport,
    options: &DashboardOptions,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&options.title)));
    html.push_str("<style>");
    html.push_str(styles());
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str(&header_block(&options.title, report));
    html.push_str(&characterization_section(records));
    html.push_str(&research_section(records, report));

    html.push_str(&format!(
        "<div class=\"footer\">Generated on {}</div>\n",
        options.generated_on.format("%Y-%m-%d")
    ));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn header_block(title: &str, report: &AnalysisReport) -> String {
    let dataset = &report.dataset;
    let period = match (dataset.period_start, dataset.period_end) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        _ => "no data".to_string(),
    };

    let mut html = String::new();
    html.push_str("<div class=\"header\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    html.push_str(&format!(
        "<p>{} repositories | {} languages | created {}</p>\n",
        dataset.total_repositories, dataset.languages, period
    ));
    html.push_str("</div>\n");

    html.push_str("<div class=\"stats-grid\">\n");
    html.push_str(&stat_card(&dataset.total_repositories.to_string(), "Repositories"));
    html.push_str(&stat_card(&dataset.languages.to_string(), "Languages"));
    html.push_str(&stat_card(
        &format!("{:.0}", dataset.median_stars),
        "Stars (median)",
    ));
    html.push_str(&stat_card(
        &format!("{:.0}", dataset.median_contributors),
        "Contributors (median)",
    ));
    html.push_str("</div>\n");
    html
}

fn stat_card(value: &str, label: &str) -> String {
    format!(
        "<div class=\"stat-card\"><div class=\"stat-value\">{}</div><div>{}</div></div>\n",
        escape(value),
        escape(label)
    )
}

fn characterization_section(records: &[RepoRecord]) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"section\"><h2>Dataset characterization</h2></div>\n");

    html.push_str(&chart_block(
        "Repositories by language",
        &charts::bar_chart("Repositories by language", &counts_desc(records, GroupKey::Language)),
    ));

    let (labels, series) = median_series(
        records,
        GroupKey::Language,
        &[Metric::Stars, Metric::Forks, Metric::Contributors],
    );
    html.push_str(&chart_block(
        "Popularity by language (medians)",
        &charts::grouped_bar_chart("Popularity by language (medians)", &labels, &series),
    ));

    html.push_str(&chart_block(
        "Repositories by category",
        &charts::horizontal_bar_chart(
            "Repositories by category",
            &counts_desc(records, GroupKey::Category),
        ),
    ));

    html.push_str(&chart_block(
        "Repositories by license",
        &charts::bar_chart("Repositories by license", &counts_desc(records, GroupKey::License)),
    ));

    html
}

fn research_section(records: &[RepoRecord], report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"section\"><h2>Research questions</h2></div>\n");

    // RQ1
    html.push_str(&rq_box("RQ1", &report.rq1.question));
    let points: Vec<ScatterPoint> = records
        .iter()
        .map(|r| ScatterPoint {
            x: r.commits as f64,
            y: r.stars as f64,
            group: r.language.to_string(),
        })
        .collect();
    html.push_str(&chart_block(
        "Stars vs commits",
        &charts::scatter_chart("Stars vs commits", "commits", "stars", &points),
    ));
    html.push_str(&correlation_table(&[
        &report.rq1.stars_vs_commits,
        &report.rq1.stars_vs_contributors,
    ]));
    html.push_str(&matrix_table(&report.rq1.matrix));

    // RQ2
    html.push_str(&rq_box("RQ2", &report.rq2.question));
    let (split, _) = split_by_group(records, GroupKey::Language, Metric::IssueResolutionRate);
    let groups: Vec<(String, Vec<f64>)> = split.into_iter().collect();
    html.push_str(&chart_block(
        "Issue resolution rate by language",
        &charts::box_plot(
            "Issue resolution rate by language",
            "resolution rate",
            &groups,
        ),
    ));
    html.push_str(&test_table(&[&report.rq2.anova, &report.rq2.kruskal_wallis]));
    html.push_str(&language_summary_table(report));

    // RQ3
    html.push_str(&rq_box("RQ3", &report.rq3.question));
    html.push_str(&engagement_table(report));
    html.push_str(&readme_test_block(report));

    // RQ4
    html.push_str(&rq_box("RQ4", &report.rq4.question));
    let (labels, series) = median_series(
        records,
        GroupKey::License,
        &[Metric::Stars, Metric::Forks, Metric::Contributors],
    );
    html.push_str(&chart_block(
        "Popularity by license (medians)",
        &charts::grouped_bar_chart("Popularity by license (medians)", &labels, &series),
    ));
    html.push_str(&license_table(report));

    html
}

fn rq_box(tag: &str, question: &str) -> String {
    format!(
        "<div class=\"rq-box\"><h3>{}</h3><p>{}</p></div>\n",
        escape(tag),
        escape(question)
    )
}

fn chart_block(heading: &str, svg: &str) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"chart\">\n");
    html.push_str(&format!("<h3>{}</h3>\n", escape(heading)));
    html.push_str(svg);
    html.push_str("</div>\n");
    html
}

fn correlation_table(correlations: &[&MetricCorrelation]) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"results\">\n");
    html.push_str(
        "<tr><th>Pair</th><th>Method</th><th>r</th><th>p-value</th><th>n</th><th>Significant</th></tr>\n",
    );
    for c in correlations {
        let pair = format!("{} vs {}", c.x, c.y);
        match &c.outcome {
            CorrelationOutcome::Computed {
                r,
                p_value,
                n,
                significant,
            } => {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{r:.3}</td><td>{}</td><td>{n}</td><td>{}</td></tr>\n",
                    escape(&pair),
                    c.method,
                    fmt_p(*p_value),
                    yes_no(*significant)
                ));
            }
            CorrelationOutcome::NotApplicable { reason } => {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td colspan=\"4\">not applicable: {}</td></tr>\n",
                    escape(&pair),
                    c.method,
                    escape(reason)
                ));
            }
        }
    }
    html.push_str("</table>\n");
    html
}

fn matrix_table(matrix: &CorrelationMatrix) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"results\">\n<tr><th></th>");
    for metric in &matrix.metrics {
        html.push_str(&format!("<th>{metric}</th>"));
    }
    html.push_str("</tr>\n");
    for (i, metric) in matrix.metrics.iter().enumerate() {
        html.push_str(&format!("<tr><th>{metric}</th>"));
        for value in &matrix.values[i] {
            match value {
                Some(r) => html.push_str(&format!("<td>{r:.2}</td>")),
                None => html.push_str("<td>n/a</td>"),
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn test_table(tests: &[&GroupTest]) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"results\">\n");
    html.push_str(
        "<tr><th>Test</th><th>Statistic</th><th>p-value</th><th>Significant</th></tr>\n",
    );
    for test in tests {
        match &test.outcome {
            TestOutcome::Computed {
                statistic,
                p_value,
                significant,
            } => {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{statistic:.3}</td><td>{}</td><td>{}</td></tr>\n",
                    test.kind,
                    fmt_p(*p_value),
                    yes_no(*significant)
                ));
            }
            TestOutcome::NotApplicable { reason } => {
                html.push_str(&format!(
                    "<tr><td>{}</td><td colspan=\"3\">not applicable: {}</td></tr>\n",
                    test.kind,
                    escape(reason)
                ));
            }
        }
    }
    html.push_str("</table>\n");
    html
}

fn language_summary_table(report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"results\">\n");
    html.push_str(
        "<tr><th>Language</th><th>Repositories</th><th>Mean</th><th>Median</th><th>Std</th></tr>\n",
    );
    for (label, summary) in &report.rq2.by_language.groups {
        let std = summary
            .std
            .map_or_else(|| "n/a".to_string(), |s| format!("{s:.3}"));
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{std}</td></tr>\n",
            escape(label),
            summary.count,
            summary.mean,
            summary.median
        ));
    }
    html.push_str("</table>\n");
    html
}

fn engagement_table(report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"results\">\n<tr><th>Documentation</th>");
    for metric in ENGAGEMENT_METRICS {
        html.push_str(&format!("<th>{metric} (median)</th>"));
    }
    html.push_str("</tr>\n");
    for (level, medians) in &report.rq3.median_engagement {
        html.push_str(&format!("<tr><td>{}</td>", escape(level)));
        for metric in ENGAGEMENT_METRICS {
            let value = medians.get(&metric.to_string()).copied().unwrap_or(0.0);
            html.push_str(&format!("<td>{value:.1}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn readme_test_block(report: &AnalysisReport) -> String {
    let test = &report.rq3.readme_stars;
    let mut html = String::new();
    html.push_str(&format!(
        "<p class=\"note\">Mann-Whitney (stars, alternative: greater): {} with a README vs {} without. ",
        test.with_readme, test.without_readme
    ));
    match &test.outcome {
        TestOutcome::Computed {
            statistic,
            p_value,
            significant,
        } => {
            html.push_str(&format!(
                "U = {statistic:.1}, p = {}, significant: {}.",
                fmt_p(*p_value),
                yes_no(*significant)
            ));
        }
        TestOutcome::NotApplicable { reason } => {
            html.push_str(&format!("not applicable: {}.", escape(reason)));
        }
    }
    html.push_str("</p>\n");
    html
}

fn license_table(report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"results\">\n");
    html.push_str(
        "<tr><th>License</th><th>Repositories</th><th>Stars</th><th>Forks</th><th>Contributors</th></tr>\n",
    );
    for (label, medians) in &report.rq4.by_license {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>\n",
            escape(label),
            medians.repositories,
            medians.stars,
            medians.forks,
            medians.contributors
        ));
    }
    html.push_str("</table>\n");
    html
}

fn counts_desc(records: &[RepoRecord], key: GroupKey) -> Vec<(String, f64)> {
    let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    for record in records {
        *counts.entry(key.label_of(record)).or_default() += 1;
    }
    let mut data: Vec<(String, f64)> = counts
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .collect();
    data.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    data
}

fn median_series(
    records: &[RepoRecord],
    key: GroupKey,
    metrics: &[Metric],
) -> (Vec<String>, Vec<Series>) {
    let mut labels: Vec<String> = Vec::new();
    let mut series: Vec<Series> = Vec::new();
    for metric in metrics {
        let grouped = group_summaries(records, key, *metric);
        if labels.is_empty() {
            labels = grouped.groups.keys().cloned().collect();
        }
        let values = labels
            .iter()
            .map(|label| grouped.groups.get(label).map_or(0.0, |s| s.median))
            .collect();
        series.push(Series {
            name: metric.to_string(),
            values,
        });
    }
    (labels, series)
}

fn fmt_p(p: f64) -> String {
    if p < 0.0001 {
        "&lt; 0.0001".to_string()
    } else {
        format!("{p:.4}")
    }
}

fn yes_no(significant: bool) -> &'static str {
    if significant {
        "yes"
    } else {
        "no"
    }
}

fn styles() -> &'static str {
    r#"
    body {
        font-family: system-ui, 'Segoe UI', sans-serif;
        margin: 0;
        padding: 20px;
        background: #eef1f6;
        color: #2d2d2d;
    }
    .container {
        max-width: 1100px;
        margin: 0 auto;
    }
    .header {
        background: linear-gradient(135deg, #4e79a7 0%, #283b57 100%);
        padding: 32px;
        border-radius: 10px;
        color: white;
        text-align: center;
        margin-bottom: 24px;
    }
    .header h1 {
        margin: 0 0 8px 0;
    }
    .header p {
        margin: 0;
        opacity: 0.9;
    }
    .stats-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
        gap: 16px;
        margin-bottom: 24px;
    }
    .stat-card {
        background: white;
        padding: 18px;
        border-radius: 8px;
        text-align: center;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    .stat-value {
        font-size: 2em;
        font-weight: bold;
        color: #4e79a7;
    }
    .section {
        background: white;
        padding: 18px 24px;
        border-radius: 10px;
        margin-bottom: 24px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    .section h2 {
        color: #4e79a7;
        border-bottom: 3px solid #4e79a7;
        padding-bottom: 8px;
        margin: 0;
    }
    .rq-box {
        background: white;
        padding: 16px 20px;
        border-left: 4px solid #4e79a7;
        border-radius: 6px;
        margin-bottom: 16px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    .rq-box h3 {
        margin: 0 0 6px 0;
        color: #4e79a7;
    }
    .rq-box p {
        margin: 0;
    }
    .chart {
        background: white;
        padding: 16px;
        border-radius: 10px;
        margin-bottom: 24px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    .chart h3 {
        color: #4e79a7;
        border-bottom: 2px solid #e9ecef;
        padding-bottom: 8px;
        margin-top: 0;
    }
    .chart svg {
        width: 100%;
        height: auto;
    }
    table.results {
        border-collapse: collapse;
        width: 100%;
        background: white;
        margin-bottom: 24px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    table.results th, table.results td {
        border: 1px solid #ddd;
        padding: 8px;
        text-align: left;
    }
    table.results th {
        background: #4e79a7;
        color: white;
    }
    table.results tr:nth-child(even) {
        background: #f7f9fc;
    }
    .note {
        background: white;
        padding: 14px 18px;
        border-radius: 6px;
        margin-bottom: 24px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    .footer {
        margin-top: 12px;
        font-size: 0.85em;
        color: #777;
        text-align: center;
    }
    "#
}
