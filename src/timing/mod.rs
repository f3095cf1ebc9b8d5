//! Timing extraction and frame-loading analysis.
//!
//! - [`record`] - projection of HAR entries to flat timing records and the
//!   timing CSV schema
//! - [`frames`] - per-group frame selection, Nth-frame arrival latency, and
//!   summary statistics

pub mod frames;
pub mod record;
