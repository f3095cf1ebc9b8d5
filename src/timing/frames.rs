//! Frame-loading latency and summary statistics over timing records.
//!
//! A "frame" here is one image resource request of a designated MIME type
//! (tiles rendered by a viewer application). Records are grouped by source
//! capture file, each group is sorted by start time, and two analyses run
//! per group: elapsed time until the Nth frame completes, and summary
//! statistics over all frames of the group.

use std::collections::BTreeMap;

use crate::error::HarError;
use crate::timing::record::TimingRecord;
use crate::utils::time::{parse_timestamp, seconds_between};

/// Groups records by their `har_file` column, falling back to
/// `fallback_key` for records without one. `BTreeMap` keeps group order
/// deterministic across runs.
pub fn group_records(
    records: Vec<TimingRecord>,
    fallback_key: &str,
) -> BTreeMap<String, Vec<TimingRecord>> {
    let mut groups: BTreeMap<String, Vec<TimingRecord>> = BTreeMap::new();
    for record in records {
        let key = record
            .har_file
            .clone()
            .unwrap_or_else(|| fallback_key.to_string());
        groups.entry(key).or_default().push(record);
    }
    groups
}

/// Sorts a group by `startedDateTime` ascending. The sort is stable, so
/// ties keep their original capture order. Any unparseable timestamp
/// aborts with `MalformedInput`.
pub fn sort_by_start(records: &mut Vec<TimingRecord>) -> Result<(), HarError> {
    let mut keyed = records
        .drain(..)
        .map(|r| parse_timestamp(&r.started_date_time).map(|t| (t, r)))
        .collect::<Result<Vec<_>, HarError>>()?;
    keyed.sort_by_key(|(t, _)| *t);
    *records = keyed.into_iter().map(|(_, r)| r).collect();
    Ok(())
}

/// The ordered subsequence of records whose MIME type equals
/// `content_type` exactly. Records without a MIME type never match.
/// Assumes the group is already sorted by start time.
pub fn frames_of<'a>(group: &'a [TimingRecord], content_type: &str) -> Vec<&'a TimingRecord> {
    group
        .iter()
        .filter(|r| r.mime_type.as_deref() == Some(content_type))
        .collect()
}

/// Wall-clock seconds from the group's chronologically first request to
/// the completion of the Nth frame (its start plus its own duration).
///
/// `nth` is 1-based. Returns `Ok(None)` when the group has fewer than
/// `nth` frames - an unavailable result, not an error. Assumes the group
/// is sorted by start time.
pub fn nth_frame_elapsed_seconds(
    group: &[TimingRecord],
    nth: usize,
    content_type: &str,
) -> Result<Option<f64>, HarError> {
    let Some(first) = group.first() else {
        return Ok(None);
    };
    let frames = frames_of(group, content_type);
    if nth == 0 || frames.len() < nth {
        return Ok(None);
    }
    let target = frames[nth - 1];

    let first_start = parse_timestamp(&first.started_date_time)?;
    let target_start = parse_timestamp(&target.started_date_time)?;
    Ok(Some(
        seconds_between(&first_start, &target_start) + target.time / 1000.0,
    ))
}

/// Summary statistics over the frames of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    pub frame_count: usize,
    /// Frames whose response status is not 200.
    pub fail_count: usize,
    /// Sum of the frames' `Content-Length` header values; absent values
    /// are excluded from the sum, not treated as zero.
    pub total_content_length: f64,
    pub receive_mean: Option<f64>,
    pub receive_median: Option<f64>,
    pub receive_min: Option<f64>,
    pub receive_max: Option<f64>,
    /// Population standard deviation (divide by N) of the receive timings.
    pub receive_std: Option<f64>,
    /// Seconds from the first frame's start to the last frame's completion;
    /// `0.0` when the group has no frames.
    pub total_time: f64,
    /// Bytes per second over `total_time`; NaN when `total_time` is zero
    /// (undefined, not an error).
    pub throughput: f64,
}

impl FrameStats {
    /// Computes statistics over the frames of `content_type` in a group
    /// sorted by start time.
    pub fn compute(group: &[TimingRecord], content_type: &str) -> Result<Self, HarError> {
        let frames = frames_of(group, content_type);
        let frame_count = frames.len();
        let fail_count = frames.iter().filter(|r| r.status != Some(200)).count();
        let total_content_length: f64 = frames.iter().filter_map(|r| r.content_length).sum();

        // The -1 sentinel means "not applicable" and is excluded along
        // with absent values.
        let receive: Vec<f64> = frames
            .iter()
            .filter_map(|r| r.receive)
            .filter(|v| *v >= 0.0)
            .collect();

        let total_time = match (frames.first(), frames.last()) {
            (Some(first), Some(last)) => {
                let first_start = parse_timestamp(&first.started_date_time)?;
                let last_start = parse_timestamp(&last.started_date_time)?;
                seconds_between(&first_start, &last_start) + last.time / 1000.0
            }
            _ => 0.0,
        };
        let throughput = if total_time > 0.0 {
            total_content_length / total_time
        } else {
            f64::NAN
        };

        Ok(Self {
            frame_count,
            fail_count,
            total_content_length,
            receive_mean: mean(&receive),
            receive_median: median(&receive),
            receive_min: receive.iter().copied().reduce(f64::min),
            receive_max: receive.iter().copied().reduce(f64::max),
            receive_std: population_std(&receive),
            total_time,
            throughput,
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}
