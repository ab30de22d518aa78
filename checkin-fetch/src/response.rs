//! HTTP response snapshot.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, LOCATION, SET_COOKIE};

use crate::compression::Compression;

/// A fully-read HTTP response.
///
/// The body is kept as raw bytes exactly as received; no transparent
/// decompression has been applied.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Final URL.
    pub url: String,
}

impl HttpResponse {
    /// Creates a response from parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url: String::new(),
        }
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body as text after undoing any compression.
    ///
    /// Falls back to [`text`](Self::text) when the body cannot be
    /// decompressed.
    pub fn decoded_text(&self) -> String {
        Compression::detect(self.content_encoding(), &self.body)
            .decode_text(&self.body)
            .unwrap_or_else(|| self.text())
    }

    /// A header value as a string, if present and printable.
    pub fn header(&self, name: impl reqwest::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION)
    }

    /// `Content-Encoding` header.
    pub fn content_encoding(&self) -> Option<&str> {
        self.header(CONTENT_ENCODING)
    }

    /// `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Number of `Set-Cookie` headers on this response.
    pub fn set_cookie_count(&self) -> usize {
        self.headers.get_all(SET_COOKIE).iter().count()
    }
}
