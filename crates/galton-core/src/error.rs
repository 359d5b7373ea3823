use std::path::PathBuf;

/// Errors that can occur across the Galton pipeline.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate renders it through `miette`.
///
/// # Examples
///
/// ```
/// use galton_core::GaltonError;
///
/// let err = GaltonError::Config("alpha must be in (0, 1)".into());
/// assert!(err.to_string().contains("alpha"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GaltonError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A caller passed an argument outside its documented domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A dataset file exists but its content cannot be used.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
