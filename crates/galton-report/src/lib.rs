//! Reporting layer: SVG charts and the self-contained HTML dashboard.
//!
//! A pure view over the dataset and its analysis report; nothing here
//! computes statistics or touches the filesystem.

pub mod charts;
pub mod dashboard;
