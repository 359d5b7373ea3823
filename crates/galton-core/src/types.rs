use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Programming language of a synthetic repository.
///
/// The variant set and sampling weights follow the population studied by the
/// pipeline; [`Language::weight`] gives the draw probability and
/// [`Language::activity_multiplier`] scales activity metrics (stars, commits,
/// contributors) per language.
///
/// # Examples
///
/// ```
/// use galton_core::Language;
///
/// assert_eq!(Language::Python.to_string(), "Python");
/// assert_eq!(Language::Cpp.to_string(), "C++");
/// assert_eq!(Language::Python.weight(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    Java,
    TypeScript,
    Go,
    Rust,
    #[serde(rename = "C++")]
    Cpp,
    Ruby,
}

impl Language {
    /// All languages, in draw order.
    pub const ALL: [Language; 8] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::TypeScript,
        Language::Go,
        Language::Rust,
        Language::Cpp,
        Language::Ruby,
    ];

    /// Probability of drawing this language when generating a record.
    ///
    /// The weights sum to 1.0 across [`Language::ALL`].
    pub fn weight(self) -> f64 {
        match self {
            Language::Python => 0.25,
            Language::JavaScript => 0.20,
            Language::Java => 0.15,
            Language::TypeScript => 0.15,
            Language::Go => 0.10,
            Language::Rust => 0.05,
            Language::Cpp => 0.05,
            Language::Ruby => 0.05,
        }
    }

    /// Scaling factor applied to activity metrics for this language.
    pub fn activity_multiplier(self) -> f64 {
        match self {
            Language::Python => 1.5,
            Language::JavaScript => 1.4,
            Language::TypeScript => 1.3,
            Language::Go => 1.2,
            Language::Rust => 1.1,
            Language::Java => 1.0,
            Language::Cpp => 0.9,
            Language::Ruby => 0.8,
        }
    }

    /// Lowercase identifier-safe form, used in generated repository names.
    ///
    /// # Examples
    ///
    /// ```
    /// use galton_core::Language;
    ///
    /// assert_eq!(Language::TypeScript.slug(), "typescript");
    /// assert_eq!(Language::Cpp.slug(), "cpp");
    /// ```
    pub fn slug(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::Ruby => "ruby",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "Python"),
            Language::JavaScript => write!(f, "JavaScript"),
            Language::Java => write!(f, "Java"),
            Language::TypeScript => write!(f, "TypeScript"),
            Language::Go => write!(f, "Go"),
            Language::Rust => write!(f, "Rust"),
            Language::Cpp => write!(f, "C++"),
            Language::Ruby => write!(f, "Ruby"),
        }
    }
}

/// Software license of a synthetic repository.
///
/// `None` is a real population value (unlicensed repositories), not a missing
/// field, so it is a variant rather than an `Option`.
///
/// # Examples
///
/// ```
/// use galton_core::License;
///
/// assert_eq!(License::Apache2.to_string(), "Apache-2.0");
/// assert_eq!(License::None.to_string(), "None");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause")]
    Bsd3Clause,
    None,
}

impl License {
    /// All licenses, in draw order.
    pub const ALL: [License; 5] = [
        License::Mit,
        License::Apache2,
        License::Gpl3,
        License::Bsd3Clause,
        License::None,
    ];

    /// Probability of drawing this license when generating a record.
    pub fn weight(self) -> f64 {
        match self {
            License::Mit => 0.45,
            License::Apache2 => 0.25,
            License::Gpl3 => 0.15,
            License::Bsd3Clause => 0.10,
            License::None => 0.05,
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            License::Mit => write!(f, "MIT"),
            License::Apache2 => write!(f, "Apache-2.0"),
            License::Gpl3 => write!(f, "GPL-3.0"),
            License::Bsd3Clause => write!(f, "BSD-3-Clause"),
            License::None => write!(f, "None"),
        }
    }
}

/// Project category of a synthetic repository. Drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    DevOps,
    Mobile,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "System Tools")]
    SystemTools,
    Libraries,
    Games,
}

impl Category {
    /// All categories, in draw order.
    pub const ALL: [Category; 8] = [
        Category::WebDevelopment,
        Category::DataScience,
        Category::DevOps,
        Category::Mobile,
        Category::MachineLearning,
        Category::SystemTools,
        Category::Libraries,
        Category::Games,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::WebDevelopment => write!(f, "Web Development"),
            Category::DataScience => write!(f, "Data Science"),
            Category::DevOps => write!(f, "DevOps"),
            Category::Mobile => write!(f, "Mobile"),
            Category::MachineLearning => write!(f, "Machine Learning"),
            Category::SystemTools => write!(f, "System Tools"),
            Category::Libraries => write!(f, "Libraries"),
            Category::Games => write!(f, "Games"),
        }
    }
}

/// Documentation level derived from the `has_readme` / `has_wiki` flags.
///
/// A wiki without a README still counts as [`DocLevel::None`]: the README is
/// the entry point, so undocumented-but-wikied repositories group with the
/// undocumented ones.
///
/// # Examples
///
/// ```
/// use galton_core::DocLevel;
///
/// assert_eq!(DocLevel::of(true, true), DocLevel::ReadmeWiki);
/// assert_eq!(DocLevel::of(true, false), DocLevel::Readme);
/// assert_eq!(DocLevel::of(false, true), DocLevel::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocLevel {
    None,
    Readme,
    ReadmeWiki,
}

impl DocLevel {
    /// Classify a repository from its documentation flags.
    pub fn of(has_readme: bool, has_wiki: bool) -> Self {
        match (has_readme, has_wiki) {
            (true, true) => DocLevel::ReadmeWiki,
            (true, false) => DocLevel::Readme,
            (false, _) => DocLevel::None,
        }
    }
}

impl fmt::Display for DocLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocLevel::None => write!(f, "None"),
            DocLevel::Readme => write!(f, "README"),
            DocLevel::ReadmeWiki => write!(f, "README+Wiki"),
        }
    }
}

/// One synthetic repository: the unit row of the dataset.
///
/// Field order is the CSV column order. The last four fields are derived from
/// the base fields by the enrichment pass and carry no information of their
/// own; they are stored so the persisted CSV is self-contained.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use galton_core::{Category, Language, License, RepoRecord};
///
/// let record = RepoRecord {
///     name: "rust-project-001".into(),
///     language: Language::Rust,
///     stars: 120,
///     forks: 14,
///     issues_opened: 10,
///     issues_closed: 30,
///     pull_requests: 8,
///     contributors: 4,
///     commits: 250,
///     size_kb: 1024,
///     created_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     updated_at: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     has_wiki: false,
///     has_readme: true,
///     license: License::Mit,
///     category: Category::SystemTools,
///     age_days: 0,
///     days_since_update: 0,
///     issue_resolution_rate: 0.0,
///     commits_per_month: 0.0,
/// };
/// assert!(record.forks <= record.stars);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Unique repository name, `{language-slug}-project-{index:03}`.
    pub name: String,
    /// Primary programming language.
    pub language: Language,
    /// Stargazer count.
    pub stars: u64,
    /// Fork count, at most `stars` by construction.
    pub forks: u64,
    /// Issues opened over the repository lifetime.
    pub issues_opened: u64,
    /// Issues closed over the repository lifetime. May exceed `issues_opened`
    /// when a backlog predating the observation window was cleared.
    pub issues_closed: u64,
    /// Pull requests opened over the repository lifetime.
    pub pull_requests: u64,
    /// Distinct contributors.
    pub contributors: u64,
    /// Total commits.
    pub commits: u64,
    /// Working tree size in kilobytes.
    pub size_kb: u64,
    /// Creation date.
    pub created_at: NaiveDate,
    /// Date of the most recent update, between `created_at` and the pipeline
    /// reference date.
    pub updated_at: NaiveDate,
    /// Whether the repository has a wiki.
    pub has_wiki: bool,
    /// Whether the repository has a README.
    pub has_readme: bool,
    /// Software license.
    pub license: License,
    /// Project category.
    pub category: Category,
    /// Derived: days between `created_at` and the pipeline reference date.
    pub age_days: i64,
    /// Derived: days between `updated_at` and the pipeline reference date.
    pub days_since_update: i64,
    /// Derived: `issues_closed / (issues_opened + issues_closed)` as a
    /// fraction in `[0, 1]`; exactly `0.0` when no issues exist.
    pub issue_resolution_rate: f64,
    /// Derived: `commits / max(age_days / 30, 1)`.
    pub commits_per_month: f64,
}

impl RepoRecord {
    /// Documentation level of this repository.
    pub fn doc_level(&self) -> DocLevel {
        DocLevel::of(self.has_readme, self.has_wiki)
    }
}

/// A numeric column of the dataset, selectable by name.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing; names match the CSV headers, with `-` accepted for `_`.
///
/// # Examples
///
/// ```
/// use galton_core::Metric;
///
/// let m: Metric = "stars".parse().unwrap();
/// assert_eq!(m, Metric::Stars);
///
/// let m: Metric = "issue-resolution-rate".parse().unwrap();
/// assert_eq!(m, Metric::IssueResolutionRate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Stars,
    Forks,
    IssuesOpened,
    IssuesClosed,
    PullRequests,
    Contributors,
    Commits,
    SizeKb,
    AgeDays,
    DaysSinceUpdate,
    IssueResolutionRate,
    CommitsPerMonth,
}

impl Metric {
    /// Extract this metric's value from a record as `f64`.
    ///
    /// Counts convert losslessly for the magnitudes the generator produces;
    /// the two rate metrics are already `f64`.
    pub fn value(self, record: &RepoRecord) -> f64 {
        match self {
            Metric::Stars => record.stars as f64,
            Metric::Forks => record.forks as f64,
            Metric::IssuesOpened => record.issues_opened as f64,
            Metric::IssuesClosed => record.issues_closed as f64,
            Metric::PullRequests => record.pull_requests as f64,
            Metric::Contributors => record.contributors as f64,
            Metric::Commits => record.commits as f64,
            Metric::SizeKb => record.size_kb as f64,
            Metric::AgeDays => record.age_days as f64,
            Metric::DaysSinceUpdate => record.days_since_update as f64,
            Metric::IssueResolutionRate => record.issue_resolution_rate,
            Metric::CommitsPerMonth => record.commits_per_month,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Stars => "stars",
            Metric::Forks => "forks",
            Metric::IssuesOpened => "issues_opened",
            Metric::IssuesClosed => "issues_closed",
            Metric::PullRequests => "pull_requests",
            Metric::Contributors => "contributors",
            Metric::Commits => "commits",
            Metric::SizeKb => "size_kb",
            Metric::AgeDays => "age_days",
            Metric::DaysSinceUpdate => "days_since_update",
            Metric::IssueResolutionRate => "issue_resolution_rate",
            Metric::CommitsPerMonth => "commits_per_month",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "stars" => Ok(Metric::Stars),
            "forks" => Ok(Metric::Forks),
            "issues_opened" => Ok(Metric::IssuesOpened),
            "issues_closed" => Ok(Metric::IssuesClosed),
            "pull_requests" => Ok(Metric::PullRequests),
            "contributors" => Ok(Metric::Contributors),
            "commits" => Ok(Metric::Commits),
            "size_kb" => Ok(Metric::SizeKb),
            "age_days" => Ok(Metric::AgeDays),
            "days_since_update" => Ok(Metric::DaysSinceUpdate),
            "issue_resolution_rate" => Ok(Metric::IssueResolutionRate),
            "commits_per_month" => Ok(Metric::CommitsPerMonth),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}

/// A categorical column to group by.
///
/// # Examples
///
/// ```
/// use galton_core::GroupKey;
///
/// let key: GroupKey = "language".parse().unwrap();
/// assert_eq!(key, GroupKey::Language);
///
/// let key: GroupKey = "doc-level".parse().unwrap();
/// assert_eq!(key, GroupKey::DocLevel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Language,
    License,
    Category,
    DocLevel,
}

impl GroupKey {
    /// The group label a record falls under for this key.
    pub fn label_of(self, record: &RepoRecord) -> String {
        match self {
            GroupKey::Language => record.language.to_string(),
            GroupKey::License => record.license.to_string(),
            GroupKey::Category => record.category.to_string(),
            GroupKey::DocLevel => record.doc_level().to_string(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Language => write!(f, "language"),
            GroupKey::License => write!(f, "license"),
            GroupKey::Category => write!(f, "category"),
            GroupKey::DocLevel => write!(f, "doc_level"),
        }
    }
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "language" => Ok(GroupKey::Language),
            "license" => Ok(GroupKey::License),
            "category" => Ok(GroupKey::Category),
            "doc_level" | "docs" => Ok(GroupKey::DocLevel),
            other => Err(format!("unknown group key: {other}")),
        }
    }
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use galton_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and summaries.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
