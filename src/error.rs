//! Typed errors raised by the HAR processing engines.
//!
//! Command-level code wraps these in `anyhow` with file context; the engine
//! layer keeps the error kinds distinct so callers can tell "the input was
//! not JSON" apart from "the JSON was missing a field we need".

use thiserror::Error;

/// Errors produced while parsing or transforming a HAR document.
#[derive(Debug, Error)]
pub enum HarError {
    /// Input was not valid JSON.
    #[error("failed to parse input as JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Structurally valid JSON that is missing a field the engine requires
    /// (e.g. no `log.entries`, an entry without `startedDateTime`).
    #[error("malformed HAR input: {0}")]
    MalformedInput(String),

    /// A URL that is subject to masking could not be parsed. The sanitizer
    /// refuses to pass an unparseable URL through unmasked.
    #[error("cannot sanitize unparseable URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
