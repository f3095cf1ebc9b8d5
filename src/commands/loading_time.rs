//! Marker-based page-load time measurement.
//!
//! Scans each capture in entry order for a start marker (a GET whose URL
//! begins with a configurable prefix - by default the 3D viewer's
//! `index.html` deployment) and an end marker (a POST whose URL ends with
//! a configurable suffix - by default the `validate-operation` API call).
//! The difference between the two start instants is reported as the time
//! to load all frames. Results are emitted as a JSON array, one object per
//! input file, with `null` values when a marker never occurs.
//!
//! # Usage
//!
//! ```bash
//! har-tools loading-time session.har
//! har-tools loading-time day1.har day2.har -o loadtimes.json
//! ```

use anyhow::{Context, Result};
use serde_json::json;

use crate::error::HarError;
use crate::har::types::{parse_har, Entry};
use crate::utils::output::write_output;
use crate::utils::reader::read_to_string;
use crate::utils::time::{parse_timestamp, seconds_between};

/// URL prefix of the viewer page whose request starts the measurement.
pub const DEFAULT_START_URL_PREFIX: &str =
    "https://d2rljy8mjgrfyd.cloudfront.net/3d-editor-latest/index.html";

/// URL suffix of the API call that ends the measurement.
pub const DEFAULT_END_URL_SUFFIX: &str = "validate-operation";

fn marker_time(entry: &Entry) -> Result<String, HarError> {
    entry
        .started_date_time
        .clone()
        .ok_or_else(|| HarError::MalformedInput("marker entry has no startedDateTime".to_string()))
}

pub fn run(
    har_files: &[String],
    output: Option<&str>,
    start_url_prefix: &str,
    end_url_suffix: &str,
) -> Result<()> {
    let mut results = Vec::new();

    for har_file in har_files {
        let text = read_to_string(har_file)?;
        let har = parse_har(&text)
            .with_context(|| format!("Failed to parse HAR file: {}", har_file))?;

        let mut start_time: Option<String> = None;
        let mut end_time: Option<String> = None;

        for entry in &har.log.entries {
            let (method, url) = match (entry.method(), entry.url()) {
                (Some(m), Some(u)) => (m, u),
                _ => continue,
            };
            // A later start match supersedes an earlier one; the first end
            // match stops the scan.
            if method == "GET" && url.starts_with(start_url_prefix) {
                start_time = Some(marker_time(entry)?);
                continue;
            }
            if method == "POST" && url.ends_with(end_url_suffix) {
                end_time = Some(marker_time(entry)?);
                break;
            }
        }

        let time_seconds = match (&start_time, &end_time) {
            (Some(start), Some(end)) => {
                let start_dt = parse_timestamp(start)
                    .with_context(|| format!("Bad start marker in {}", har_file))?;
                let end_dt = parse_timestamp(end)
                    .with_context(|| format!("Bad end marker in {}", har_file))?;
                Some(seconds_between(&start_dt, &end_dt))
            }
            _ => None,
        };

        results.push(json!({
            "start_request.startedDateTime": start_time,
            "end_request.startedDateTime": end_time,
            "time_seconds": time_seconds,
            "har_file": har_file,
        }));
    }

    let mut rendered = serde_json::to_string_pretty(&results)?;
    rendered.push('\n');
    write_output(output, rendered.as_bytes())?;

    Ok(())
}
