//! Utility functions and helpers.
//!
//! This module provides common functionality used across multiple commands:
//!
//! - [`format`] - Number formatting for stderr summaries
//! - [`output`] - Writing results to a path or standard output
//! - [`reader`] - Smart file reader with automatic decompression
//! - [`time`] - Timestamp parsing and arithmetic helpers

pub mod format;
pub mod output;
pub mod reader;
pub mod time;
