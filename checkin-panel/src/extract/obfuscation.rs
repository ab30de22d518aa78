//! Unwrapping of Base64-wrapped dashboard pages.
//!
//! Some panel themes ship the real dashboard as a Base64 string in a script
//! (`var originBody = "..."`) and rebuild the DOM client-side. The payload is
//! decoded here so extraction sees the same markup a browser would.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Variable holding the encoded page.
const PAYLOAD_VAR: &str = "originBody";

/// Decoder function the wrapper script calls.
const DECODER_FN: &str = "decodeBase64";

static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("Invalid selector"));

static PAYLOAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var originBody = "([^"]+)""#).expect("Invalid regex")
});

/// Returns the decoded page if `html` is a wrapper, `None` otherwise.
///
/// Only the first wrapper script is considered. A payload that is not valid
/// Base64 or not UTF-8 is logged and treated as no wrapper.
pub fn unwrap_payload(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let encoded = document.select(&SCRIPT).find_map(|script| {
        let source: String = script.text().collect();
        if !(source.contains(PAYLOAD_VAR) && source.contains(DECODER_FN)) {
            return None;
        }
        PAYLOAD_RE
            .captures(&source)
            .map(|caps| caps[1].to_string())
    })?;

    debug!(len = encoded.len(), "Found wrapped page payload");
    decode_payload(&encoded)
}

/// Decodes a Base64 payload to UTF-8 text.
pub fn decode_payload(encoded: &str) -> Option<String> {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Wrapped page payload is not valid Base64");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "Wrapped page payload is not UTF-8");
            None
        }
    }
}
