//! HAR capture redaction command.
//!
//! Reads each capture, overwrites credential-bearing and free-text fields
//! with the `REDACTED` sentinel, and writes the sanitized document back
//! out as JSON. The document is sanitized fully in memory before a single
//! byte is written, so a failure can never leave a half-redacted file that
//! looks complete.
//!
//! # Usage
//!
//! ```bash
//! # Redact one capture to a file
//! har-tools sanitize session.har --output shared/session.har
//!
//! # Redact to stdout (also accepts .gz/.zst captures)
//! har-tools sanitize session.har.gz
//! ```

use anyhow::{bail, Context, Result};

use crate::har::sanitize::sanitize_har;
use crate::har::types::parse_har;
use crate::utils::format::format_number;
use crate::utils::output::write_output;
use crate::utils::reader::read_to_string;

pub fn run(har_files: &[String], output: Option<&str>) -> Result<()> {
    if output.is_some() && har_files.len() > 1 {
        bail!("--output requires a single input file");
    }

    // Sanitize the whole batch before writing anything: a failure on any
    // file must not leave earlier documents already emitted.
    let mut sanitized = Vec::with_capacity(har_files.len());
    for har_file in har_files {
        let text = read_to_string(har_file)?;
        let mut har = parse_har(&text)
            .with_context(|| format!("Failed to parse HAR file: {}", har_file))?;
        sanitize_har(&mut har)
            .with_context(|| format!("Failed to sanitize HAR file: {}", har_file))?;
        sanitized.push((har_file, har));
    }

    for (har_file, har) in &sanitized {
        let mut rendered = serde_json::to_string_pretty(har)?;
        rendered.push('\n');
        write_output(output, rendered.as_bytes())?;

        eprintln!(
            "Sanitized {} ({} entries) -> {}",
            har_file,
            format_number(har.log.entries.len()),
            output.unwrap_or("stdout")
        );
    }

    Ok(())
}
