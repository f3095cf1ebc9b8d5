//! Credential and content redaction for HAR documents.
//!
//! Captured HAR files routinely contain bearer tokens, signed object-store
//! URLs, cookies, and full request/response bodies. This module overwrites
//! every field that can leak credentials or free-text content with a fixed
//! sentinel so captures can be shared safely.
//!
//! The masking rule for URLs is a single shared function applied at every
//! location a URL can appear: the request URL, the structured query-string
//! parameters, and the initiator metadata (both the parser and script
//! variants). Redaction is idempotent and never removes fields or entries;
//! cookie lists are emptied, everything else is replaced in place.
//!
//! A failure anywhere aborts the whole operation. Partial redaction is
//! indistinguishable from complete redaction, so no partially sanitized
//! document is ever returned.

use url::Url;

use crate::error::HarError;
use crate::har::types::{Har, Initiator, InitiatorField, Request, Response};

/// The fixed redaction placeholder written over sensitive values.
pub const REDACTED: &str = "REDACTED";

/// Query-string keys that carry object-store credentials in signed URLs.
pub const SENSITIVE_QUERY_KEYS: [&str; 3] = [
    "X-Amz-Credential",
    "X-Amz-Signature",
    "X-Amz-Security-Token",
];

/// Masks the values of `sensitive_keys` in the query string of `url`.
///
/// Every value of a matching key is replaced (a key may repeat); all other
/// pairs keep their value and relative order. The query string is
/// re-serialized with standard percent-encoding. A URL without a query
/// string passes through unchanged.
///
/// An unparseable URL is an error rather than a pass-through: the contract
/// is "no leakage", and a URL we cannot parse cannot be assumed safe.
pub fn sanitize_url(url: &str, sensitive_keys: &[&str]) -> Result<String, HarError> {
    let mut parsed = Url::parse(url).map_err(|source| HarError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    if parsed.query().is_none() {
        return Ok(url.to_string());
    }

    let masked: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            if sensitive_keys.contains(&name.as_ref()) {
                (name.into_owned(), REDACTED.to_string())
            } else {
                (name.into_owned(), value.into_owned())
            }
        })
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(masked)
        .finish();

    Ok(parsed.into())
}

/// Redacts one request in place: post body text, cookies, `Authorization`
/// header values, sensitive structured query parameters, the URL itself,
/// and any initiator metadata nested under the request.
pub fn sanitize_request(request: &mut Request) -> Result<(), HarError> {
    if let Some(post_data) = &mut request.post_data {
        post_data.text = Some(REDACTED.to_string());
    }
    if let Some(cookies) = &mut request.cookies {
        cookies.clear();
    }
    if let Some(headers) = &mut request.headers {
        for header in headers.iter_mut() {
            if header.name.eq_ignore_ascii_case("authorization") {
                header.value = REDACTED.to_string();
            }
        }
    }
    if let Some(params) = &mut request.query_string {
        for param in params.iter_mut() {
            if SENSITIVE_QUERY_KEYS.contains(&param.name.as_str()) {
                param.value = REDACTED.to_string();
            }
        }
    }
    // Rewrite the raw URL with the same key set so the structured and
    // string forms of the query string stay consistent.
    if let Some(url) = &request.url {
        request.url = Some(sanitize_url(url, &SENSITIVE_QUERY_KEYS)?);
    }
    if let Some(InitiatorField::Known(initiator)) = &mut request.initiator {
        sanitize_initiator(initiator)?;
    }
    Ok(())
}

/// Redacts one response in place. Response bodies are not inspectable for
/// safety, so `content.text` is blanket-redacted regardless of media type.
pub fn sanitize_response(response: &mut Response) {
    if let Some(content) = &mut response.content {
        content.text = Some(REDACTED.to_string());
    }
    if let Some(cookies) = &mut response.cookies {
        cookies.clear();
    }
}

/// Applies URL masking inside initiator metadata: the `url` of a parser
/// initiator, or every call frame's `url` of a script initiator. All other
/// fields are left untouched.
pub fn sanitize_initiator(initiator: &mut Initiator) -> Result<(), HarError> {
    match initiator {
        Initiator::Parser { url, .. } => {
            if let Some(u) = url {
                *u = sanitize_url(u, &SENSITIVE_QUERY_KEYS)?;
            }
        }
        Initiator::Script { stack, .. } => {
            if let Some(stack) = stack {
                for frame in &mut stack.call_frames {
                    if let Some(u) = &mut frame.url {
                        *u = sanitize_url(u, &SENSITIVE_QUERY_KEYS)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Redacts every entry of a HAR document in place, preserving entry count
/// and order. An entry without a request or response is malformed and
/// aborts the whole operation.
pub fn sanitize_har(har: &mut Har) -> Result<(), HarError> {
    for (index, entry) in har.log.entries.iter_mut().enumerate() {
        let request = entry.request.as_mut().ok_or_else(|| {
            HarError::MalformedInput(format!("entry {} has no request", index))
        })?;
        sanitize_request(request)?;

        let response = entry.response.as_mut().ok_or_else(|| {
            HarError::MalformedInput(format!("entry {} has no response", index))
        })?;
        sanitize_response(response);

        if let Some(InitiatorField::Known(initiator)) = &mut entry.initiator {
            sanitize_initiator(initiator)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::types::parse_har;

    #[test]
    fn test_sanitize_url_masks_every_repeated_value() {
        let url = "https://x/y?a=1&X-Amz-Credential=123&a=2&X-Amz-Credential=456";
        let out = sanitize_url(url, &SENSITIVE_QUERY_KEYS).unwrap();
        assert_eq!(
            out,
            "https://x/y?a=1&X-Amz-Credential=REDACTED&a=2&X-Amz-Credential=REDACTED"
        );
    }

    #[test]
    fn test_sanitize_url_without_query_is_unchanged() {
        let url = "https://example.com/foo/bar";
        assert_eq!(sanitize_url(url, &SENSITIVE_QUERY_KEYS).unwrap(), url);
    }

    #[test]
    fn test_sanitize_url_rejects_unparseable_input() {
        let err = sanitize_url("not a url at all", &SENSITIVE_QUERY_KEYS).unwrap_err();
        assert!(matches!(err, HarError::InvalidUrl { .. }));
    }

    #[test]
    fn test_sanitize_url_key_match_is_case_sensitive() {
        let url = "https://x/y?x-amz-signature=123";
        let out = sanitize_url(url, &SENSITIVE_QUERY_KEYS).unwrap();
        assert_eq!(out, "https://x/y?x-amz-signature=123");
    }

    #[test]
    fn test_sanitize_initiator_parser_variant() {
        let json = r#"{"type": "parser", "url": "https://example.com/foo?X-Amz-Credential=123", "lineNumber": 6}"#;
        let mut initiator: Initiator = serde_json::from_str(json).unwrap();
        sanitize_initiator(&mut initiator).unwrap();

        let value = serde_json::to_value(&initiator).unwrap();
        assert_eq!(
            value["url"],
            "https://example.com/foo?X-Amz-Credential=REDACTED"
        );
        assert_eq!(value["lineNumber"], 6);
    }

    #[test]
    fn test_sanitize_initiator_script_variant() {
        let json = r#"{
            "type": "script",
            "stack": {
                "callFrames": [
                    {"functionName": "", "scriptId": "216",
                     "url": "https://example.com/foo?X-Amz-Credential=123",
                     "lineNumber": 25, "columnNumber": 23}
                ]
            }
        }"#;
        let mut initiator: Initiator = serde_json::from_str(json).unwrap();
        sanitize_initiator(&mut initiator).unwrap();

        let value = serde_json::to_value(&initiator).unwrap();
        let frame = &value["stack"]["callFrames"][0];
        assert_eq!(frame["url"], "https://example.com/foo?X-Amz-Credential=REDACTED");
        assert_eq!(frame["functionName"], "");
        assert_eq!(frame["scriptId"], "216");
        assert_eq!(frame["lineNumber"], 25);
        assert_eq!(frame["columnNumber"], 23);
    }

    fn sample_document() -> &'static str {
        r#"{
            "log": {
                "entries": [
                    {
                        "startedDateTime": "2025-06-01T10:00:00.000+09:00",
                        "time": 10.0,
                        "request": {
                            "method": "GET",
                            "url": "https://bucket.s3.amazonaws.com/tile.png?X-Amz-Signature=abc&page=2",
                            "headers": [
                                {"name": "Authorization", "value": "Bearer secret-token"},
                                {"name": "Accept", "value": "image/png"}
                            ],
                            "queryString": [
                                {"name": "X-Amz-Signature", "value": "abc"},
                                {"name": "page", "value": "2"}
                            ],
                            "cookies": [{"name": "session", "value": "xyz"}],
                            "postData": {"mimeType": "application/json", "text": "{\"secret\":1}"}
                        },
                        "response": {
                            "status": 200,
                            "cookies": [{"name": "session", "value": "xyz"}],
                            "content": {"size": 100, "mimeType": "image/png", "text": "base64data"}
                        }
                    }
                ]
            }
        }"#
    }

    #[test]
    fn test_sanitize_har_masks_credentials_and_empties_cookies() {
        let mut har = parse_har(sample_document()).unwrap();
        sanitize_har(&mut har).unwrap();

        let entry = &har.log.entries[0];
        let request = entry.request.as_ref().unwrap();
        let response = entry.response.as_ref().unwrap();

        assert_eq!(
            request.url.as_deref(),
            Some("https://bucket.s3.amazonaws.com/tile.png?X-Amz-Signature=REDACTED&page=2")
        );
        let headers = request.headers.as_ref().unwrap();
        assert_eq!(headers[0].value, REDACTED);
        // Non-sensitive header untouched.
        assert_eq!(headers[1].value, "image/png");
        let params = request.query_string.as_ref().unwrap();
        assert_eq!(params[0].value, REDACTED);
        assert_eq!(params[1].value, "2");
        assert!(request.cookies.as_ref().unwrap().is_empty());
        assert_eq!(request.post_data.as_ref().unwrap().text.as_deref(), Some(REDACTED));

        assert!(response.cookies.as_ref().unwrap().is_empty());
        assert_eq!(response.content.as_ref().unwrap().text.as_deref(), Some(REDACTED));
        // Method and status untouched.
        assert_eq!(request.method.as_deref(), Some("GET"));
        assert_eq!(response.status, Some(200));
    }

    #[test]
    fn test_sanitize_har_is_idempotent() {
        let mut once = parse_har(sample_document()).unwrap();
        sanitize_har(&mut once).unwrap();

        let mut twice = once.clone();
        sanitize_har(&mut twice).unwrap();

        assert_eq!(
            serde_json::to_value(&once).unwrap(),
            serde_json::to_value(&twice).unwrap()
        );
    }

    #[test]
    fn test_sanitize_har_entry_without_request_is_malformed() {
        let mut har = parse_har(
            r#"{"log": {"entries": [{"startedDateTime": "2025-06-01T10:00:00Z", "response": {"status": 200}}]}}"#,
        )
        .unwrap();
        let err = sanitize_har(&mut har).unwrap_err();
        assert!(matches!(err, HarError::MalformedInput(_)));
    }

    #[test]
    fn test_sanitize_har_preserves_unknown_fields() {
        let text = r#"{
            "log": {
                "creator": {"name": "devtools", "version": "1.0"},
                "entries": [
                    {
                        "startedDateTime": "2025-06-01T10:00:00Z",
                        "_resourceType": "image",
                        "request": {"method": "GET", "url": "https://example.com/a.png"},
                        "response": {"status": 200}
                    }
                ]
            }
        }"#;
        let mut har = parse_har(text).unwrap();
        sanitize_har(&mut har).unwrap();

        let value = serde_json::to_value(&har).unwrap();
        assert_eq!(value["log"]["creator"]["name"], "devtools");
        assert_eq!(value["log"]["entries"][0]["_resourceType"], "image");
        assert_eq!(value["log"]["entries"][0]["request"]["url"], "https://example.com/a.png");
    }

    #[test]
    fn test_sanitized_entry_level_initiator() {
        let text = r#"{
            "log": {
                "entries": [
                    {
                        "startedDateTime": "2025-06-01T10:00:00Z",
                        "_initiator": {"type": "parser", "url": "https://e.com/p?X-Amz-Signature=s", "lineNumber": 1},
                        "request": {"method": "GET", "url": "https://e.com/a.png"},
                        "response": {"status": 200}
                    }
                ]
            }
        }"#;
        let mut har = parse_har(text).unwrap();
        sanitize_har(&mut har).unwrap();

        let value = serde_json::to_value(&har).unwrap();
        assert_eq!(
            value["log"]["entries"][0]["_initiator"]["url"],
            "https://e.com/p?X-Amz-Signature=REDACTED"
        );
    }

    #[test]
    fn test_unknown_initiator_type_survives_sanitization() {
        let text = r#"{
            "log": {
                "entries": [
                    {
                        "startedDateTime": "2025-06-01T10:00:00Z",
                        "_initiator": {"type": "other"},
                        "request": {"method": "GET", "url": "https://e.com/"},
                        "response": {"status": 200}
                    }
                ]
            }
        }"#;
        let mut har = parse_har(text).unwrap();
        sanitize_har(&mut har).unwrap();
        let value = serde_json::to_value(&har).unwrap();
        assert_eq!(value["log"]["entries"][0]["_initiator"], serde_json::json!({"type": "other"}));
    }
}
