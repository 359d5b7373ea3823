//! Descriptive and inferential statistics over repository datasets.
//!
//! Summaries and per-group breakdowns live in [`describe`], hypothesis
//! tests (ANOVA, Kruskal-Wallis, Mann-Whitney) in [`hypothesis`],
//! correlation in [`correlation`], and the research-question pipeline
//! that ties them together in [`research`].

pub mod correlation;
pub mod describe;
pub mod hypothesis;
pub mod rank;
pub mod research;
