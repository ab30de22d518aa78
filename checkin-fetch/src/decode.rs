//! Tolerant JSON decoding of panel responses.
//!
//! The panel intermittently returns JSON under a mismatched
//! `Content-Encoding`, behind a byte-order mark, or with stray bytes around
//! the object. Decoding therefore runs in two passes:
//!
//! 1. A strict parse of the raw body.
//! 2. Decompress by header or magic bytes, strip the BOM, cut everything
//!    before the first `{`, cut everything after the first balanced
//!    top-level object, and parse what remains.
//!
//! Only a JSON object is ever returned. If no object survives the cleanup
//! the call fails with a [`DecodeError`] carrying a hex preview of the raw
//! bytes.

use serde_json::Value;
use tracing::debug;

use crate::compression::Compression;
use crate::error::DecodeError;
use crate::response::HttpResponse;

/// Raw bytes included in the hex preview of a failed decode.
const HEX_PREVIEW_BYTES: usize = 20;

const BOM: char = '\u{feff}';

// ============================================================================
// Public API
// ============================================================================

/// Decodes a response body into a JSON object.
pub fn decode_json(response: &HttpResponse) -> Result<Value, DecodeError> {
    decode_body(&response.body, response.content_encoding())
}

/// Decodes raw body bytes into a JSON object.
pub fn decode_body(body: &[u8], content_encoding: Option<&str>) -> Result<Value, DecodeError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => return Ok(value),
        Ok(_) => debug!("Body is JSON but not an object, cleaning up"),
        Err(e) => debug!(error = %e, "Strict JSON parse failed, cleaning up"),
    }

    if let Some(encoding) = content_encoding {
        debug!(content_encoding = encoding, "Response declares an encoding");
    }

    let compression = Compression::detect(content_encoding, body);

    // A body mislabeled as compressed can still hold plain JSON, so the raw
    // text is tried after the decompressed one.
    let mut texts = Vec::with_capacity(2);
    if let Some(text) = compression.decode_text(body) {
        texts.push(text);
    }
    if compression != Compression::Identity || texts.is_empty() {
        texts.push(String::from_utf8_lossy(body).into_owned());
    }

    let mut failure = None;
    for text in &texts {
        let candidate = isolate_object(text);
        debug!(candidate = candidate, "Cleaned body");

        match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => return Ok(value),
            Ok(_) => {
                failure = Some(DecodeError::NoJsonObject {
                    hex_preview: hex_preview(body),
                });
            }
            Err(source) => {
                failure = Some(DecodeError::Malformed {
                    source,
                    hex_preview: hex_preview(body),
                });
            }
        }
    }

    Err(failure.unwrap_or_else(|| DecodeError::NoJsonObject {
        hex_preview: hex_preview(body),
    }))
}

// ============================================================================
// Cleanup Steps
// ============================================================================

/// Narrows `text` to its first top-level JSON object.
///
/// Leading BOM and anything before the first `{` are dropped. If no `{`
/// exists the whitespace-trimmed text is returned. If the object never
/// closes, everything from the first `{` on is returned unchanged.
pub fn isolate_object(text: &str) -> &str {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let Some(start) = text.find('{') else {
        return text.trim();
    };
    let text = &text[start..];

    match balanced_end(text) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Byte offset just past the `}` closing the object that opens `text`.
///
/// Braces inside string literals do not count towards depth.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

/// Lowercase hex of the first raw bytes, or `empty`.
pub fn hex_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return "empty".to_string();
    }
    body.iter()
        .take(HEX_PREVIEW_BYTES)
        .map(|b| format!("{b:02x}"))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::{CONTENT_ENCODING, HeaderMap, HeaderValue};
    use serde_json::json;
    use std::io::Write;

    fn response_with(body: Vec<u8>, encoding: Option<&'static str>) -> HttpResponse {
        let mut headers = HeaderMap::new();
        if let Some(encoding) = encoding {
            headers.insert(CONTENT_ENCODING, HeaderValue::from_static(encoding));
        }
        HttpResponse::new(StatusCode::OK, headers, body)
    }

    // ========================================================================
    // Happy Paths
    // ========================================================================

    #[test]
    fn test_plain_object() {
        let value = decode_body(br#"{"ret":1,"msg":"ok"}"#, None).unwrap();
        assert_eq!(value, json!({"ret": 1, "msg": "ok"}));
    }

    #[test]
    fn test_bom_and_garbage_around_object() {
        let mut body = "\u{feff}xx{".as_bytes().to_vec();
        body.extend_from_slice(br#""ret":1,"msg":"ok"}"#);
        body.extend_from_slice(b"<!-- trailing junk -->");

        let value = decode_json(&response_with(body, None)).unwrap();
        assert_eq!(value, json!({"ret": 1, "msg": "ok"}));
    }

    #[test]
    fn test_first_of_two_objects() {
        let value = decode_body(br#"{"ret":1}{"ret":0}"#, None).unwrap();
        assert_eq!(value, json!({"ret": 1}));
    }

    #[test]
    fn test_nested_and_braces_in_strings() {
        let body = br#"  {"ret":0,"msg":"bad } brace","data":{"a":{"b":2}}} tail"#;
        let value = decode_body(body, None).unwrap();
        assert_eq!(value["msg"], "bad } brace");
        assert_eq!(value["data"]["a"]["b"], 2);
    }

    #[test]
    fn test_gzip_without_header() {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(br#"{"ret":1,"msg":"gz"}"#).unwrap();
        let body = encoder.finish().unwrap();

        let value = decode_json(&response_with(body, None)).unwrap();
        assert_eq!(value["msg"], "gz");
    }

    #[cfg(feature = "brotli")]
    #[test]
    fn test_brotli_with_header() {
        let mut body = Vec::new();
        {
            let mut writer = brotli::CompressorWriter::new(&mut body, 4096, 5, 22);
            writer.write_all(br#"{"ret":1}"#).unwrap();
        }

        let value = decode_json(&response_with(body, Some("br"))).unwrap();
        assert_eq!(value, json!({"ret": 1}));
    }

    #[test]
    fn test_mislabeled_brotli_falls_back_to_text() {
        let body = b"ok{\"ret\":1}\0\0".to_vec();
        let value = decode_json(&response_with(body, Some("br"))).unwrap();
        assert_eq!(value, json!({"ret": 1}));
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn test_unbalanced_object_fails() {
        let err = decode_body(br#"{"a":1"#, None).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
        assert_eq!(err.hex_preview(), "7b2261223a31");
    }

    #[test]
    fn test_html_body_fails() {
        let err = decode_body(b"<html><body>Login</body></html>", None).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn test_non_object_json_fails() {
        let err = decode_body(b"[1,2,3]", None).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. } | DecodeError::NoJsonObject { .. }));

        let err = decode_body(b" 42 ", None).unwrap_err();
        assert!(matches!(err, DecodeError::NoJsonObject { .. }));
    }

    #[test]
    fn test_empty_body_fails() {
        let err = decode_body(b"", None).unwrap_err();
        assert_eq!(err.hex_preview(), "empty");
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[test]
    fn test_isolate_object() {
        assert_eq!(isolate_object("\u{feff}junk{\"a\":1}junk"), "{\"a\":1}");
        assert_eq!(isolate_object("  no braces  "), "no braces");
        assert_eq!(isolate_object("x{\"a\":{"), "{\"a\":{");
        assert_eq!(isolate_object("{\"s\":\"\\\"}\"}"), "{\"s\":\"\\\"}\"}");
    }

    #[test]
    fn test_hex_preview_truncates() {
        let preview = hex_preview(&[0xab; 64]);
        assert_eq!(preview.len(), HEX_PREVIEW_BYTES * 2);
    }
}
