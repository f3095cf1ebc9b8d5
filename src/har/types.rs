//! Data structures representing HAR (HTTP Archive) documents.
//!
//! These types closely mirror the JSON structure written by browser
//! developer tools, enabling deserialization with serde. Every struct
//! carries a flattened catch-all map so fields the model does not name
//! survive a parse/serialize round trip - the sanitizer must never drop
//! data it was not asked to redact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HarError;

/// Top-level HAR document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Har {
    pub log: Log,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `log` object: an ordered sequence of network transactions.
///
/// Entry order is chronological and significant; nothing in this crate
/// reorders it in place.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Log {
    pub entries: Vec<Entry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One logged request/response transaction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// ISO-8601 start instant with timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_date_time: Option<String>,
    /// Total duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<Timings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    /// Chrome's HAR exporter records the initiator on the entry as
    /// `_initiator`; other producers nest it under `request`.
    #[serde(rename = "_initiator", skip_serializing_if = "Option::is_none")]
    pub initiator: Option<InitiatorField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-phase timing breakdown. `-1` is the HAR sentinel for "not
/// applicable" and is preserved as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Timings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request half of a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<Vec<QueryParam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<PostData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiator: Option<InitiatorField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response half of a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ordered name/value pair (headers and query-string parameters share
/// this shape in HAR).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A structured query-string parameter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request post body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body metadata.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An initiator the sanitizer understands, or any other initiator shape
/// passed through untouched (Chrome also emits `preload` and `other`
/// variants that carry no URLs to mask).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum InitiatorField {
    Known(Initiator),
    Other(Value),
}

/// The initiator call-stack metadata, dispatched on the `type`
/// discriminator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Initiator {
    /// Emitted when the request was discovered by the HTML parser.
    Parser {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Emitted when a script issued the request; carries a call stack.
    Script {
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<Stack>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

/// Script initiator call stack.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub call_frames: Vec<CallFrame>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One frame of a script initiator call stack.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parses a HAR document from JSON text.
///
/// Invalid JSON is a [`HarError::Parse`]; valid JSON that does not have
/// the `log.entries` shape is a [`HarError::MalformedInput`]. The two-step
/// parse keeps those failure modes distinct.
pub fn parse_har(text: &str) -> Result<Har, HarError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(HarError::MalformedInput(
            "document root is not a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| HarError::MalformedInput(e.to_string()))
}

impl Entry {
    /// Get the request URL from this entry.
    pub fn url(&self) -> Option<&str> {
        self.request.as_ref()?.url.as_deref()
    }

    /// Get the request method from this entry.
    pub fn method(&self) -> Option<&str> {
        self.request.as_ref()?.method.as_deref()
    }

    /// Get the response status from this entry.
    #[allow(dead_code)]
    pub fn status(&self) -> Option<i64> {
        self.response.as_ref()?.status
    }

    /// Get the response content MIME type from this entry.
    #[allow(dead_code)]
    pub fn mime_type(&self) -> Option<&str> {
        self.response.as_ref()?.content.as_ref()?.mime_type.as_deref()
    }

    /// Get the value of the first `Content-Length` response header,
    /// matched case-insensitively.
    pub fn content_length_header(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .headers
            .as_ref()?
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case("content-length"))
            .map(|h| h.value.as_str())
    }
}
