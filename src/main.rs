use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};

use galton_core::{GaltonConfig, GroupKey, Metric, OutputFormat, RepoRecord};
use galton_report::dashboard::DashboardOptions;
use galton_stats::correlation::{CorrelationOutcome, MetricCorrelation};
use galton_stats::describe::GroupedSummaries;
use galton_stats::hypothesis::{GroupTest, TestKind, TestOutcome};
use galton_stats::research::{AnalysisReport, DatasetSummary};
use galton_synth::generator::GenerateOptions;

#[derive(Parser)]
#[command(
    name = "galton",
    version,
    about = "Deterministic synthetic repository datasets and the statistics to study them",
    long_about = "Galton synthesizes GitHub-shaped repository datasets and runs the descriptive\n\
                   and inferential statistics of a repository-mining study over them.\n\n\
                   Composable subcommands for dataset generation, characterization, group-wise\n\
                   statistics, the four research questions, and a self-contained HTML dashboard.\n\n\
                   Examples:\n  \
                     galton generate --rows 500 --seed 42    Synthesize the dataset\n  \
                     galton describe                         Characterize it\n  \
                     galton stats --group language --metric stars\n  \
                     galton analyze                          Run RQ1-RQ4, persist JSON\n  \
                     galton report --generate-missing        Build the dashboard end to end\n  \
                     galton init                             Create a .galton.toml config file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .galton.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable tables and summaries (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a deterministic synthetic dataset
    #[command(long_about = "Generate a deterministic synthetic dataset.\n\n\
        Samples a GitHub-shaped population: log-normal popularity and activity,\n\
        Poisson arrival counts, weighted categorical fields. The same rows/seed\n\
        pair reproduces the dataset byte for byte.\n\n\
        Examples:\n  galton generate\n  galton generate --rows 1000 --seed 7\n  galton generate --out data/pilot.csv")]
    Generate {
        /// Number of records to synthesize (default: 500)
        #[arg(long)]
        rows: Option<usize>,

        /// RNG seed; the same seed reproduces the same dataset (default: 42)
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the dataset CSV (default: data/repositories.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Characterize a dataset: totals, period, language distribution
    #[command(long_about = "Characterize a dataset.\n\n\
        Prints totals, the creation period, the language distribution, and the\n\
        dataset-wide median stars and contributors. With --out the summary is\n\
        also persisted as JSON.\n\n\
        Examples:\n  galton describe\n  galton describe --data data/pilot.csv --format json\n  galton describe --out results/summary.json")]
    Describe {
        /// Dataset CSV to read (default: the configured data path)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Also write the summary as JSON to this path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Generate the dataset first if the file is missing
        #[arg(long)]
        generate_missing: bool,
    },
    /// Group-wise descriptive statistics, with an optional hypothesis test
    #[command(
        long_about = "Group-wise descriptive statistics, with an optional hypothesis test.\n\n\
        Groups a numeric metric by a categorical key and prints count, mean, median,\n\
        standard deviation, min, and max per group. --test runs ANOVA, Kruskal-Wallis,\n\
        or Mann-Whitney (exactly two groups) across the same split.\n\n\
        Examples:\n  galton stats --group language --metric stars\n  galton stats --group language --metric issue_resolution_rate --test anova\n  galton stats --group license --metric stars --test kruskal-wallis"
    )]
    Stats {
        /// Dataset CSV to read (default: the configured data path)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Categorical key to group by (language, license, category, doc_level)
        #[arg(long)]
        group: GroupKey,

        /// Numeric column to summarize (stars, forks, commits, ...)
        #[arg(long)]
        metric: Metric,

        /// Hypothesis test to run across the groups
        #[arg(
            long,
            long_help = "Hypothesis test to run across the groups.\n\n\
                Tests:\n  \
                  anova           One-way analysis of variance\n  \
                  kruskal-wallis  Rank-based, no normality assumption\n  \
                  mann-whitney    Two-sample rank test (needs exactly two groups)"
        )]
        test: Option<TestKind>,

        /// Generate the dataset first if the file is missing
        #[arg(long)]
        generate_missing: bool,
    },
    /// Run the full research-question analysis (RQ1-RQ4)
    #[command(long_about = "Run the full research-question analysis.\n\n\
        RQ1 correlates popularity with activity, RQ2 compares the issue resolution\n\
        rate across languages (ANOVA + Kruskal-Wallis), RQ3 tests engagement by\n\
        documentation level (one-sided Mann-Whitney), RQ4 compares medians by\n\
        license. Persists the result document as pretty-printed JSON.\n\n\
        Examples:\n  galton analyze\n  galton analyze --data data/pilot.csv --out results/pilot.json")]
    Analyze {
        /// Dataset CSV to read (default: the configured data path)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Where to write the result document (default: results/analysis.json)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Generate the dataset first if the file is missing
        #[arg(long)]
        generate_missing: bool,
    },
    /// Render the self-contained HTML dashboard
    #[command(long_about = "Render the self-contained HTML dashboard.\n\n\
        One file, no external assets: stat cards, characterization charts, and the\n\
        research-question tables with their test results. Reuses a persisted\n\
        analysis document when --results is given, otherwise recomputes it.\n\n\
        Examples:\n  galton report\n  galton report --results results/analysis.json --out reports/dashboard.html\n  galton report --generate-missing")]
    Report {
        /// Dataset CSV to read (default: the configured data path)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Reuse a persisted analysis document instead of recomputing
        #[arg(long)]
        results: Option<PathBuf>,

        /// Where to write the dashboard (default: reports/dashboard.html)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Generate the dataset first if the file is missing
        #[arg(long)]
        generate_missing: bool,
    },
    /// Create a default .galton.toml configuration file
    #[command(long_about = "Create a default .galton.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .galton.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        // Bold/bright header
        println!("\x1b[1m\x1b[33m📊\x1b[0m \x1b[1mgalton\x1b[0m v{version} — synthetic repository datasets and the statistics to study them\n");

        println!("Quick start:");
        println!("  \x1b[36mgalton init\x1b[0m                       Create a .galton.toml config file");
        println!("  \x1b[36mgalton generate\x1b[0m                   Synthesize the default 500-row dataset");
        println!(
            "  \x1b[36mgalton report --generate-missing\x1b[0m  Build the dashboard end to end\n"
        );

        println!("All commands:");
        println!("  \x1b[32mgenerate\x1b[0m  Deterministic synthetic dataset (CSV)");
        println!("  \x1b[32mdescribe\x1b[0m  Dataset characterization");
        println!("  \x1b[32mstats\x1b[0m     Group-wise summaries and hypothesis tests");
        println!("  \x1b[32manalyze\x1b[0m   Research questions RQ1-RQ4, persisted as JSON");
        println!("  \x1b[32mreport\x1b[0m    Self-contained HTML dashboard");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!(
            "galton v{version} — synthetic repository datasets and the statistics to study them\n"
        );

        println!("Quick start:");
        println!("  galton init                       Create a .galton.toml config file");
        println!("  galton generate                   Synthesize the default 500-row dataset");
        println!("  galton report --generate-missing  Build the dashboard end to end\n");

        println!("All commands:");
        println!("  generate  Deterministic synthetic dataset (CSV)");
        println!("  describe  Dataset characterization");
        println!("  stats     Group-wise summaries and hypothesis tests");
        println!("  analyze   Research questions RQ1-RQ4, persisted as JSON");
        println!("  report    Self-contained HTML dashboard");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'galton <command> --help' for details.");
}

fn load_dataset(
    path: &Path,
    generate_missing: bool,
    config: &GaltonConfig,
    verbose: bool,
) -> Result<Vec<RepoRecord>> {
    if !path.exists() {
        if !generate_missing {
            miette::bail!(miette::miette!(
                help = "run 'galton generate' first, or pass --generate-missing to synthesize it now",
                "Dataset not found: {}",
                path.display()
            ));
        }
        eprintln!(
            "Dataset not found at {}; generating {} rows (seed {})...",
            path.display(),
            config.generate.rows,
            config.generate.seed,
        );
        let options = GenerateOptions {
            rows: config.generate.rows,
            seed: config.generate.seed,
            now: Utc::now().date_naive(),
        };
        let records = galton_synth::generator::generate(&options)?;
        galton_core::dataset::write_csv(path, &records)?;
        eprintln!("Wrote {} records to {}", records.len(), path.display());
        return Ok(records);
    }

    let records = galton_core::dataset::read_csv(path)?;
    if verbose {
        eprintln!("Loaded {} records from {}", records.len(), path.display());
    }
    Ok(records)
}

#[derive(serde::Serialize)]
struct StatsDocument<'a> {
    summaries: &'a GroupedSummaries,
    #[serde(skip_serializing_if = "Option::is_none")]
    test: Option<&'a GroupTest>,
}

fn fmt_p(p: f64) -> String {
    if p < 0.0001 {
        "p<0.0001".into()
    } else {
        format!("p={p:.4}")
    }
}

fn fmt_std(std: Option<f64>) -> String {
    match std {
        Some(value) => format!("{value:.2}"),
        None => "n/a".into(),
    }
}

fn fmt_outcome(outcome: &TestOutcome) -> String {
    match outcome {
        TestOutcome::Computed {
            statistic,
            p_value,
            significant,
        } => format!(
            "statistic={statistic:.4}  {}  significant={significant}",
            fmt_p(*p_value)
        ),
        TestOutcome::NotApplicable { reason } => format!("not applicable: {reason}"),
    }
}

fn fmt_correlation(corr: &MetricCorrelation) -> String {
    match &corr.outcome {
        CorrelationOutcome::Computed {
            r,
            p_value,
            n,
            significant,
        } => format!(
            "({}, n={n})  r={r:.4}  {}  significant={significant}",
            corr.method,
            fmt_p(*p_value)
        ),
        CorrelationOutcome::NotApplicable { reason } => format!("not applicable: {reason}"),
    }
}

fn print_dataset_summary(summary: &DatasetSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(summary).into_diagnostic()?
            );
        }
        OutputFormat::Markdown => {
            println!("# Dataset Characterization\n");
            println!("- **Repositories:** {}", summary.total_repositories);
            println!("- **Languages:** {}", summary.languages);
            println!("- **Categories:** {}", summary.categories);
            match (summary.period_start, summary.period_end) {
                (Some(start), Some(end)) => println!("- **Created:** {start} to {end}"),
                _ => println!("- **Created:** no records"),
            }
            println!("- **Median stars:** {:.1}", summary.median_stars);
            println!(
                "- **Median contributors:** {:.1}\n",
                summary.median_contributors
            );

            if !summary.language_counts.is_empty() {
                println!("| Language | Repositories | Share |");
                println!("|----------|--------------|-------|");
                for (language, count) in counts_desc(&summary.language_counts) {
                    let share = *count as f64 / summary.total_repositories as f64 * 100.0;
                    println!("| {language} | {count} | {share:.1}% |");
                }
            }
        }
        OutputFormat::Text => {
            println!("Dataset Characterization:");
            println!("{:-<72}", "");
            println!("  Repositories:        {}", summary.total_repositories);
            println!("  Languages:           {}", summary.languages);
            println!("  Categories:          {}", summary.categories);
            match (summary.period_start, summary.period_end) {
                (Some(start), Some(end)) => println!("  Created:             {start} to {end}"),
                _ => println!("  Created:             no records"),
            }
            println!("  Median stars:        {:.1}", summary.median_stars);
            println!("  Median contributors: {:.1}", summary.median_contributors);

            if !summary.language_counts.is_empty() {
                println!("\n  Repositories per language:");
                for (language, count) in counts_desc(&summary.language_counts) {
                    let share = *count as f64 / summary.total_repositories as f64 * 100.0;
                    println!("    {language:<12} {count:>5}  ({share:.1}%)");
                }
            }
        }
    }

    Ok(())
}

/// Language counts ordered largest first, ties by label.
fn counts_desc(counts: &std::collections::BTreeMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut pairs: Vec<(&String, &usize)> = counts.iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    pairs
}

const DEFAULT_CONFIG: &str = r#"# Galton configuration
# See: https://github.com/Meru143/galton

[generate]
# Number of records to synthesize and the seed that reproduces them.
# rows = 500
# seed = 42
# path = "data/repositories.csv"

[analysis]
# Significance threshold every hypothesis test is judged against.
# alpha = 0.05
# path = "results/analysis.json"

[report]
# title = "Synthetic Repository Analytics"
# path = "reports/dashboard.html"
"#;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GaltonConfig::from_file(path)?,
        None => {
            let default_path = Path::new(".galton.toml");
            if default_path.exists() {
                GaltonConfig::from_file(default_path)?
            } else {
                GaltonConfig::default()
            }
        }
    };

    let alpha = config.analysis.alpha;
    if alpha <= 0.0 || alpha >= 1.0 {
        miette::bail!(miette::miette!(
            help = "set alpha in (0, 1) under [analysis] in .galton.toml",
            "Invalid significance threshold: {}",
            alpha
        ));
    }

    if cli.verbose {
        eprintln!("format: {}", cli.format);
        eprintln!(
            "config: rows={} seed={} alpha={}",
            config.generate.rows, config.generate.seed, config.analysis.alpha,
        );
    }

    match cli.command {
        None => {
            let use_color = std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err();
            print_welcome(use_color);
            return Ok(());
        }
        Some(Command::Generate {
            rows,
            seed,
            ref out,
        }) => {
            let rows = rows.unwrap_or(config.generate.rows);
            let seed = seed.unwrap_or(config.generate.seed);
            let out = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.generate.path));

            if rows == 0 {
                miette::bail!(miette::miette!(
                    help = "pass --rows with a positive count, or set rows under [generate] in .galton.toml",
                    "Cannot generate an empty dataset (rows = 0)"
                ));
            }

            eprintln!("Generating {rows} records (seed {seed})...");
            let options = GenerateOptions {
                rows,
                seed,
                now: Utc::now().date_naive(),
            };
            let records = galton_synth::generator::generate(&options)?;
            galton_core::dataset::write_csv(&out, &records)?;
            eprintln!("Wrote {} records to {}", records.len(), out.display());

            let summary = galton_stats::research::characterize(&records);
            print_dataset_summary(&summary, cli.format)?;
        }
        Some(Command::Describe {
            ref data,
            ref out,
            generate_missing,
        }) => {
            let data = data
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.generate.path));
            let records = load_dataset(&data, generate_missing, &config, cli.verbose)?;
            let summary = galton_stats::research::characterize(&records);

            if let Some(out) = out {
                galton_core::dataset::write_json(out, &summary)?;
                eprintln!("Summary written to {}", out.display());
            }

            print_dataset_summary(&summary, cli.format)?;
        }
        Some(Command::Stats {
            ref data,
            group,
            metric,
            test,
            generate_missing,
        }) => {
            let data = data
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.generate.path));
            let records = load_dataset(&data, generate_missing, &config, cli.verbose)?;

            let summaries = galton_stats::describe::group_summaries(&records, group, metric);
            let test_result = test.map(|kind| {
                galton_stats::hypothesis::test_by_group(&records, group, metric, kind, alpha)
            });

            match cli.format {
                OutputFormat::Json => {
                    let document = StatsDocument {
                        summaries: &summaries,
                        test: test_result.as_ref(),
                    };
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&document).into_diagnostic()?
                    );
                }
                OutputFormat::Markdown => {
                    println!("# {metric} by {group}\n");
                    println!("| Group | Count | Mean | Median | Std | Min | Max |");
                    println!("|-------|-------|------|--------|-----|-----|-----|");
                    for (label, s) in &summaries.groups {
                        println!(
                            "| {} | {} | {:.2} | {:.2} | {} | {:.2} | {:.2} |",
                            label,
                            s.count,
                            s.mean,
                            s.median,
                            fmt_std(s.std),
                            s.min,
                            s.max,
                        );
                    }
                    if summaries.dropped > 0 {
                        println!("\n{} rows dropped for non-finite values.", summaries.dropped);
                    }
                    if let Some(result) = &test_result {
                        println!("\n## {} (alpha {})\n", result.kind, result.alpha);
                        println!("- {}", fmt_outcome(&result.outcome));
                        if !result.excluded.is_empty() {
                            println!("- excluded: {}", result.excluded.join(", "));
                        }
                    }
                }
                OutputFormat::Text => {
                    println!("{metric} by {group}:");
                    println!("{:-<72}", "");
                    for (label, s) in &summaries.groups {
                        println!(
                            "  {:<22} n={:<5} mean={:<10.2} median={:<10.2} std={:<8} min={:<10.2} max={:.2}",
                            label,
                            s.count,
                            s.mean,
                            s.median,
                            fmt_std(s.std),
                            s.min,
                            s.max,
                        );
                    }
                    if summaries.dropped > 0 {
                        println!(
                            "  ({} rows dropped for non-finite values)",
                            summaries.dropped
                        );
                    }
                    if let Some(result) = &test_result {
                        println!(
                            "\n{} across {} groups (alpha {}):",
                            result.kind,
                            result.groups.len(),
                            result.alpha,
                        );
                        println!("  {}", fmt_outcome(&result.outcome));
                        if !result.excluded.is_empty() {
                            println!(
                                "  excluded (no usable values): {}",
                                result.excluded.join(", ")
                            );
                        }
                    }
                }
            }
        }
        Some(Command::Analyze {
            ref data,
            ref out,
            generate_missing,
        }) => {
            let data = data
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.generate.path));
            let records = load_dataset(&data, generate_missing, &config, cli.verbose)?;

            eprintln!("Analyzing {} records (alpha {alpha})...", records.len());
            let report = galton_stats::research::analyze(&records, alpha);

            let out = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.analysis.path));
            galton_core::dataset::write_json(&out, &report)?;
            eprintln!("Results written to {}", out.display());

            match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report).into_diagnostic()?
                    );
                }
                OutputFormat::Markdown => {
                    println!("# Research Questions\n");
                    println!(
                        "**Dataset:** {} repositories, {} languages | **Alpha:** {}\n",
                        report.dataset.total_repositories, report.dataset.languages, report.alpha,
                    );
                    println!("## RQ1: {}\n", report.rq1.question);
                    println!(
                        "- **stars vs commits:** {}",
                        fmt_correlation(&report.rq1.stars_vs_commits)
                    );
                    println!(
                        "- **stars vs contributors:** {}\n",
                        fmt_correlation(&report.rq1.stars_vs_contributors)
                    );
                    println!("## RQ2: {}\n", report.rq2.question);
                    println!("- **anova:** {}", fmt_outcome(&report.rq2.anova.outcome));
                    println!(
                        "- **kruskal-wallis:** {}\n",
                        fmt_outcome(&report.rq2.kruskal_wallis.outcome)
                    );
                    println!("## RQ3: {}\n", report.rq3.question);
                    let readme = &report.rq3.readme_stars;
                    println!(
                        "- **mann-whitney (stars, greater):** {} with a README vs {} without",
                        readme.with_readme, readme.without_readme,
                    );
                    println!("- {}\n", fmt_outcome(&readme.outcome));
                    println!("## RQ4: {}\n", report.rq4.question);
                    println!(
                        "| License | Repositories | Median stars | Median forks | Median contributors |"
                    );
                    println!(
                        "|---------|--------------|--------------|--------------|---------------------|"
                    );
                    for (license, medians) in &report.rq4.by_license {
                        println!(
                            "| {} | {} | {:.1} | {:.1} | {:.1} |",
                            license,
                            medians.repositories,
                            medians.stars,
                            medians.forks,
                            medians.contributors,
                        );
                    }
                }
                OutputFormat::Text => {
                    println!("Research Questions (alpha {}):", report.alpha);
                    println!("{:-<72}", "");
                    println!(
                        "Dataset: {} repositories across {} languages",
                        report.dataset.total_repositories, report.dataset.languages,
                    );
                    println!("\nRQ1: {}", report.rq1.question);
                    println!(
                        "  stars vs commits       {}",
                        fmt_correlation(&report.rq1.stars_vs_commits)
                    );
                    println!(
                        "  stars vs contributors  {}",
                        fmt_correlation(&report.rq1.stars_vs_contributors)
                    );
                    println!("\nRQ2: {}", report.rq2.question);
                    println!(
                        "  anova           {}",
                        fmt_outcome(&report.rq2.anova.outcome)
                    );
                    println!(
                        "  kruskal-wallis  {}",
                        fmt_outcome(&report.rq2.kruskal_wallis.outcome)
                    );
                    println!("\nRQ3: {}", report.rq3.question);
                    let readme = &report.rq3.readme_stars;
                    println!(
                        "  mann-whitney (stars, greater), {} with a README vs {} without:",
                        readme.with_readme, readme.without_readme,
                    );
                    println!("    {}", fmt_outcome(&readme.outcome));
                    println!("\nRQ4: {}", report.rq4.question);
                    for (license, medians) in &report.rq4.by_license {
                        println!(
                            "  {:<14} repos={:<5} stars={:<8.1} forks={:<8.1} contributors={:.1}",
                            license,
                            medians.repositories,
                            medians.stars,
                            medians.forks,
                            medians.contributors,
                        );
                    }
                }
            }
        }
        Some(Command::Report {
            ref data,
            ref results,
            ref out,
            generate_missing,
        }) => {
            let data = data
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.generate.path));
            let records = load_dataset(&data, generate_missing, &config, cli.verbose)?;

            let report: AnalysisReport = match results {
                Some(path) => {
                    let report = galton_core::dataset::read_json(path)
                        .into_diagnostic()
                        .wrap_err(format!("reading analysis results from {}", path.display()))?;
                    if cli.verbose {
                        eprintln!("Loaded analysis results from {}", path.display());
                    }
                    report
                }
                None => {
                    eprintln!("Analyzing {} records (alpha {alpha})...", records.len());
                    galton_stats::research::analyze(&records, alpha)
                }
            };

            let out = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.report.path));
            let options = DashboardOptions {
                title: config.report.title.clone(),
                generated_on: Utc::now().date_naive(),
            };
            let html = galton_report::dashboard::render_dashboard(&records, &report, &options);

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).into_diagnostic()?;
            }
            std::fs::write(&out, &html)
                .into_diagnostic()
                .wrap_err(format!("writing {}", out.display()))?;
            println!("Dashboard written to {}", out.display());
        }
        Some(Command::Init) => {
            let path = Path::new(".galton.toml");
            if path.exists() {
                miette::bail!(".galton.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .galton.toml with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "galton", &mut std::io::stdout());
        }
    }

    Ok(())
}
