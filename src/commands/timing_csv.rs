//! HAR to timing-CSV conversion command.
//!
//! Projects every entry of one or more captures to a flat timing record
//! and writes the combined table as CSV. When more than one capture is
//! given, a trailing `har_file` column identifies the source of each row.
//!
//! # Usage
//!
//! ```bash
//! # Single capture to stdout
//! har-tools timing-csv session.har
//!
//! # Multiple captures, only object-storage requests, to a file
//! har-tools timing-csv day1.har day2.har --only-s3-path -o timings.csv
//! ```

use anyhow::{Context, Result};

use crate::har::types::parse_har;
use crate::timing::record::{is_object_storage_url, TimingRecord, SOURCE_FILE_COLUMN, TIMING_COLUMNS};
use crate::utils::format::format_number;
use crate::utils::output::write_output;
use crate::utils::reader::read_to_string;

pub fn run(har_files: &[String], output: Option<&str>, only_s3_path: bool) -> Result<()> {
    let multi = har_files.len() > 1;
    let mut records: Vec<TimingRecord> = Vec::new();
    let mut total_entries = 0;

    // Fail-fast: any bad file aborts the batch before output is written.
    for har_file in har_files {
        let text = read_to_string(har_file)?;
        let har = parse_har(&text)
            .with_context(|| format!("Failed to parse HAR file: {}", har_file))?;

        for entry in &har.log.entries {
            total_entries += 1;
            if only_s3_path && !entry.url().is_some_and(is_object_storage_url) {
                continue;
            }
            let mut record = TimingRecord::from_entry(entry)
                .with_context(|| format!("Malformed entry in {}", har_file))?;
            if multi {
                record.har_file = Some(har_file.clone());
            }
            records.push(record);
        }
    }

    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header: Vec<&str> = TIMING_COLUMNS.to_vec();
    if multi {
        header.push(SOURCE_FILE_COLUMN);
    }
    writer.write_record(&header)?;
    for record in &records {
        let mut cells = record.csv_cells();
        if multi {
            cells.push(record.har_file.clone().unwrap_or_default());
        }
        writer.write_record(&cells)?;
    }
    let data = writer.into_inner()?;
    write_output(output, &data)?;

    eprintln!(
        "Converted {} of {} entries from {} file(s)",
        format_number(records.len()),
        format_number(total_entries),
        har_files.len()
    );

    Ok(())
}
