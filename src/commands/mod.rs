//! Command implementations for processing HAR capture files.
//!
//! Each module implements one subcommand. The core transformations live in
//! [`crate::har::sanitize`] and [`crate::timing`]; these modules only glue
//! files, arguments and output paths to them.
//!
//! - [`sanitize`] - Redact credentials, cookies and bodies from a capture
//! - [`timing_csv`] - Flatten a capture into the timing CSV table
//! - [`frame_analysis`] - Frame arrival latency and summary statistics
//!   from a timing table
//! - [`loading_time`] - Marker-based page-load time between a start and an
//!   end request

pub mod frame_analysis;
pub mod loading_time;
pub mod sanitize;
pub mod timing_csv;
