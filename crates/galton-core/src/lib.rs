//! Core types, configuration, and error handling for the Galton pipeline.
//!
//! This crate provides the shared foundation used by all other Galton crates:
//! - [`GaltonError`] — unified error type using `thiserror`
//! - [`GaltonConfig`] — configuration loaded from `.galton.toml`
//! - Shared types: [`RepoRecord`], [`Language`], [`License`], [`Category`],
//!   [`DocLevel`], [`Metric`], [`GroupKey`], [`OutputFormat`]
//! - [`dataset`] — CSV and JSON persistence for the flat-file artifacts

mod config;
mod error;
mod types;

pub mod dataset;

pub use config::{AnalysisConfig, GaltonConfig, GenerateConfig, ReportConfig};
pub use error::GaltonError;
pub use types::{
    Category, DocLevel, GroupKey, Language, License, Metric, OutputFormat, RepoRecord,
};

/// A convenience `Result` type for Galton operations.
pub type Result<T> = std::result::Result<T, GaltonError>;
