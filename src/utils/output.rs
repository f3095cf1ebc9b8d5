//! Writing command output to a file path or standard output.
//!
//! Output is always materialized fully in memory first and written in one
//! pass, so a failing pipeline never leaves a partially written file.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Writes `contents` to `path`, or to stdout when no path is given.
/// Missing parent directories are created first.
pub fn write_output(path: Option<&str>, contents: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write output file: {}", path))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
