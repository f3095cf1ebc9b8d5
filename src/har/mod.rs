//! HAR (HTTP Archive) document model and sanitization.
//!
//! - [`types`] - serde data model mirroring the HAR JSON structure
//! - [`sanitize`] - credential/content redaction over a parsed document

pub mod sanitize;
pub mod types;
