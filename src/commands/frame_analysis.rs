//! Frame arrival latency and summary statistics from a timing table.
//!
//! Consumes CSV files produced by `timing-csv`, groups rows by source
//! capture (`har_file` column, or one implicit group for a single-capture
//! table), and emits two tables per run:
//!
//! - per group, the elapsed seconds from the first request overall to the
//!   completion of each requested Nth frame (1-based)
//! - per group, summary statistics over all frames (count, failures,
//!   content length total, receive-timing statistics, total time span,
//!   throughput)
//!
//! # Usage
//!
//! ```bash
//! # First and tenth frame, stats appended to stdout
//! har-tools frame-analysis timings.csv -n 1 10
//!
//! # Write both tables; the summary lands next to the main output
//! har-tools frame-analysis timings.csv -n 1 -o frames.csv
//! ```

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use crate::timing::frames::{nth_frame_elapsed_seconds, sort_by_start, FrameStats};
use crate::timing::record::{TimingRecord, DEFAULT_GROUP};
use crate::utils::format::float_cell;
use crate::utils::output::write_output;
use crate::utils::reader::read_to_string;

/// Summary table column order.
const SUMMARY_COLUMNS: [&str; 11] = [
    "har_file",
    "frame_count",
    "fail_count",
    "total_content_length",
    "receive_mean",
    "receive_median",
    "receive_min",
    "receive_max",
    "receive_std",
    "total_time",
    "throughput",
];

pub fn run(
    csv_files: &[String],
    output: Option<&str>,
    nth_frames: &[usize],
    content_type: &str,
) -> Result<()> {
    let multi = csv_files.len() > 1;
    let mut groups: BTreeMap<String, Vec<TimingRecord>> = BTreeMap::new();

    for csv_file in csv_files {
        let text = read_to_string(csv_file)?;
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        for row in reader.deserialize() {
            let record: TimingRecord =
                row.with_context(|| format!("Failed to parse timing CSV: {}", csv_file))?;
            // Rows without a har_file column fall back to the implicit
            // group, or to the table's own path when several tables are
            // combined (keys must not collide across inputs).
            let key = record.har_file.clone().unwrap_or_else(|| {
                if multi {
                    csv_file.clone()
                } else {
                    DEFAULT_GROUP.to_string()
                }
            });
            groups.entry(key).or_default().push(record);
        }
    }

    for (key, group) in groups.iter_mut() {
        sort_by_start(group).with_context(|| format!("Bad timestamp in group {}", key))?;
    }

    let elapsed_table = render_elapsed_table(&groups, nth_frames, content_type)?;
    let summary_table = render_summary_table(&groups, content_type)?;

    match output {
        Some(path) => {
            write_output(Some(path), &elapsed_table)?;
            let summary_path = summary_sibling_path(path);
            write_output(Some(&summary_path), &summary_table)?;
            eprintln!("Frame analysis written to: {}", path);
            eprintln!("Summary written to: {}", summary_path);
        }
        None => {
            write_output(None, &elapsed_table)?;
            write_output(None, b"\n--- summary ---\n")?;
            write_output(None, &summary_table)?;
        }
    }

    Ok(())
}

fn render_elapsed_table(
    groups: &BTreeMap<String, Vec<TimingRecord>>,
    nth_frames: &[usize],
    content_type: &str,
) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);

    let mut header = vec!["har_file".to_string(), "first_startedDateTime".to_string()];
    for nth in nth_frames {
        header.push(format!("{}_frame_elapsed_seconds", nth));
    }
    writer.write_record(&header)?;

    for (key, group) in groups {
        let first_started = group
            .first()
            .map(|r| r.started_date_time.clone())
            .unwrap_or_default();
        let mut row = vec![key.clone(), first_started];
        for nth in nth_frames {
            let elapsed = nth_frame_elapsed_seconds(group, *nth, content_type)
                .with_context(|| format!("Bad timestamp in group {}", key))?;
            row.push(float_cell(elapsed));
        }
        writer.write_record(&row)?;
    }

    Ok(writer.into_inner()?)
}

fn render_summary_table(
    groups: &BTreeMap<String, Vec<TimingRecord>>,
    content_type: &str,
) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(SUMMARY_COLUMNS)?;

    for (key, group) in groups {
        let stats = FrameStats::compute(group, content_type)
            .with_context(|| format!("Bad timestamp in group {}", key))?;
        writer.write_record([
            key.clone(),
            stats.frame_count.to_string(),
            stats.fail_count.to_string(),
            float_cell(Some(stats.total_content_length)),
            float_cell(stats.receive_mean),
            float_cell(stats.receive_median),
            float_cell(stats.receive_min),
            float_cell(stats.receive_max),
            float_cell(stats.receive_std),
            float_cell(Some(stats.total_time)),
            float_cell(Some(stats.throughput)),
        ])?;
    }

    Ok(writer.into_inner()?)
}

/// `frames.csv` -> `frames_summary.csv`, next to the main output.
fn summary_sibling_path(path: &str) -> String {
    let p = Path::new(path);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = format!("{}_summary.csv", stem);
    match p.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(name).to_string_lossy().into_owned()
        }
        _ => name,
    }
}
