//! # HAR Timing Tools
//!
//! Command-line tools for working with HAR (HTTP Archive) capture files
//! produced by browser developer tools: redacting sensitive fields before
//! a capture is shared, and deriving timing/performance metrics from the
//! recorded request sequence.
//!
//! ## Overview
//!
//! Two independent pipelines share the same input shape (a parsed HAR
//! document) but have no runtime dependency on each other:
//!
//! - **Sanitization** walks a document's entry list and overwrites every
//!   credential-bearing or free-text field (Authorization headers, signed
//!   object-store URL parameters, cookies, request/response bodies,
//!   initiator URLs) with a fixed `REDACTED` sentinel. Redaction is
//!   idempotent, preserves entry order, and never drops fields - unknown
//!   fields round-trip untouched.
//! - **Timing extraction** projects each entry to a flat record (start
//!   instant, durations, size, status, URL, method), emits the records as
//!   a CSV table, and supports frame-loading analyses over that table:
//!   elapsed time to the Nth frame of a designated MIME type, and summary
//!   statistics (mean/median/min/max/population std, throughput, failure
//!   count) per source capture.
//!
//! Processing is single-threaded and synchronous; captures are small,
//! fully materialized documents, not streams. A parse failure or missing
//! required field aborts the whole invocation before any output is
//! written - partial redaction is more dangerous than failure.
//!
//! ## Architecture
//!
//! - [`har`] - HAR document model and the sanitization engine
//! - [`timing`] - timing record projection and frame statistics
//! - [`commands`] - CLI subcommand implementations
//! - [`utils`] - shared helpers (file reading, output, timestamps)
//! - [`error`] - typed engine errors
//!
//! ## Example Usage
//!
//! ```bash
//! # Redact a capture before sharing it
//! har-tools sanitize session.har -o shared/session.har
//!
//! # Flatten captures into a timing table (compressed input works too)
//! har-tools timing-csv day1.har.gz day2.har.gz --only-s3-path -o timings.csv
//!
//! # Frame arrival latency and statistics from the table
//! har-tools frame-analysis timings.csv -n 1 10 50 -o frames.csv
//!
//! # Page-load time between request markers
//! har-tools loading-time session.har
//! ```

pub mod commands;
pub mod error;
pub mod har;
pub mod timing;
pub mod utils;
