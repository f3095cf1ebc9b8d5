//! Flat timing records projected from HAR entries.
//!
//! A [`TimingRecord`] keeps only what the timing analyses need: the start
//! instant, durations, size, status, URL and method. Headers, bodies and
//! cookies are dropped. The CSV schema uses dotted column names
//! (`request.method`, `timings.receive`, ...) preserved from the original
//! tool's output format so existing consumers keep working.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::HarError;
use crate::har::types::Entry;

/// Fixed column order of the timing CSV. A trailing `har_file` column is
/// appended only when records from multiple capture files are combined.
pub const TIMING_COLUMNS: [&str; 15] = [
    "startedDateTime",
    "request.method",
    "request.url",
    "response.status",
    "response.content.size",
    "response.content.mimeType",
    "response.headers.contentLength",
    "time",
    "timings.blocked",
    "timings.dns",
    "timings.connect",
    "timings.send",
    "timings.wait",
    "timings.receive",
    "timings.ssl",
];

/// Name of the trailing source-file column.
pub const SOURCE_FILE_COLUMN: &str = "har_file";

/// Group key used when a timing table has no `har_file` column.
pub const DEFAULT_GROUP: &str = "default";

/// Matches requests served from object storage (pre-signed S3 URLs).
const OBJECT_STORAGE_PATTERN: &str = r"https://.*amazonaws\.com/";

/// One row of the timing table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimingRecord {
    #[serde(rename = "startedDateTime")]
    pub started_date_time: String,
    #[serde(rename = "request.method")]
    pub method: String,
    #[serde(rename = "request.url")]
    pub url: String,
    #[serde(rename = "response.status")]
    pub status: Option<i64>,
    #[serde(rename = "response.content.size")]
    pub content_size: Option<i64>,
    #[serde(rename = "response.content.mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "response.headers.contentLength")]
    pub content_length: Option<f64>,
    pub time: f64,
    #[serde(rename = "timings.blocked")]
    pub blocked: Option<f64>,
    #[serde(rename = "timings.dns")]
    pub dns: Option<f64>,
    #[serde(rename = "timings.connect")]
    pub connect: Option<f64>,
    #[serde(rename = "timings.send")]
    pub send: Option<f64>,
    #[serde(rename = "timings.wait")]
    pub wait: Option<f64>,
    #[serde(rename = "timings.receive")]
    pub receive: Option<f64>,
    #[serde(rename = "timings.ssl")]
    pub ssl: Option<f64>,
    /// Source capture file; absent in single-file tables.
    #[serde(default)]
    pub har_file: Option<String>,
}

impl TimingRecord {
    /// Projects a HAR entry to a timing record.
    ///
    /// `startedDateTime`, `time`, `request.method` and `request.url` are
    /// required; everything else degrades to an empty cell. A missing
    /// `response.content.mimeType` simply never matches a content-type
    /// filter downstream.
    pub fn from_entry(entry: &Entry) -> Result<Self, HarError> {
        let started_date_time = entry
            .started_date_time
            .clone()
            .ok_or_else(|| HarError::MalformedInput("entry has no startedDateTime".to_string()))?;
        let time = entry
            .time
            .ok_or_else(|| HarError::MalformedInput("entry has no time".to_string()))?;
        let request = entry
            .request
            .as_ref()
            .ok_or_else(|| HarError::MalformedInput("entry has no request".to_string()))?;
        let method = request
            .method
            .clone()
            .ok_or_else(|| HarError::MalformedInput("request has no method".to_string()))?;
        let url = request
            .url
            .clone()
            .ok_or_else(|| HarError::MalformedInput("request has no url".to_string()))?;
        let response = entry
            .response
            .as_ref()
            .ok_or_else(|| HarError::MalformedInput("entry has no response".to_string()))?;

        let content = response.content.as_ref();
        let content_length = entry
            .content_length_header()
            .and_then(|v| v.trim().parse::<f64>().ok());
        let timings = entry.timings.as_ref();

        Ok(Self {
            started_date_time,
            method,
            url,
            status: response.status,
            content_size: content.and_then(|c| c.size),
            mime_type: content.and_then(|c| c.mime_type.clone()),
            content_length,
            time,
            blocked: timings.and_then(|t| t.blocked),
            dns: timings.and_then(|t| t.dns),
            connect: timings.and_then(|t| t.connect),
            send: timings.and_then(|t| t.send),
            wait: timings.and_then(|t| t.wait),
            receive: timings.and_then(|t| t.receive),
            ssl: timings.and_then(|t| t.ssl),
            har_file: None,
        })
    }

    /// Serializes this record as CSV cells in [`TIMING_COLUMNS`] order
    /// (without the trailing `har_file` cell).
    pub fn csv_cells(&self) -> Vec<String> {
        use crate::utils::format::float_cell;

        vec![
            self.started_date_time.clone(),
            self.method.clone(),
            self.url.clone(),
            self.status.map(|s| s.to_string()).unwrap_or_default(),
            self.content_size.map(|s| s.to_string()).unwrap_or_default(),
            self.mime_type.clone().unwrap_or_default(),
            float_cell(self.content_length),
            float_cell(Some(self.time)),
            float_cell(self.blocked),
            float_cell(self.dns),
            float_cell(self.connect),
            float_cell(self.send),
            float_cell(self.wait),
            float_cell(self.receive),
            float_cell(self.ssl),
        ]
    }
}

/// True when the request URL points at object storage (the `--only-s3-path`
/// filter of the timing-csv command).
pub fn is_object_storage_url(url: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(OBJECT_STORAGE_PATTERN).expect("valid regex literal"));
    re.is_match(url)
}
