//! Synthetic dataset generation: seeded sampling of repository records and
//! the pure per-row enrichment that derives rates and ages from base fields.
//!
//! The generator stands in for a real collection stage; everything
//! downstream treats its output as an immutable table.

pub mod enrich;
pub mod generator;
