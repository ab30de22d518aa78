//! Content-encoding detection and decompression.
//!
//! The panel sometimes labels bodies with the wrong `Content-Encoding`, so
//! detection looks at the first raw bytes as well as the header.

use std::io::Read;

use flate2::read::{GzDecoder, ZlibDecoder};
use tracing::debug;

/// gzip magic number.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Leading byte pairs observed on Brotli bodies from the panel.
const BROTLI_PREFIXES: [[u8; 2]; 2] = [[0xce, 0xb2], [0x1b, 0x4a]];

/// Compression applied to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Brotli (`br`).
    Brotli,
    /// gzip.
    Gzip,
    /// zlib-wrapped deflate.
    Deflate,
    /// No compression.
    Identity,
}

impl Compression {
    /// Classifies a body from its `Content-Encoding` header and first bytes.
    pub fn detect(content_encoding: Option<&str>, body: &[u8]) -> Self {
        let encoding = content_encoding
            .map(|e| e.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let prefix = body.get(..2);

        if encoding == "br" || prefix.is_some_and(|p| BROTLI_PREFIXES.iter().any(|m| m == p)) {
            Self::Brotli
        } else if encoding == "gzip" || prefix == Some(&GZIP_MAGIC[..]) {
            Self::Gzip
        } else if encoding == "deflate" {
            Self::Deflate
        } else {
            Self::Identity
        }
    }

    /// Decompresses `body` and decodes it as UTF-8.
    ///
    /// Returns `None` if decompression fails or the support is not compiled
    /// in; callers then fall back to the raw text.
    pub fn decode_text(self, body: &[u8]) -> Option<String> {
        let bytes = match self {
            Self::Identity => return Some(String::from_utf8_lossy(body).into_owned()),
            Self::Gzip => read_all(GzDecoder::new(body)),
            Self::Deflate => read_all(ZlibDecoder::new(body)),
            Self::Brotli => brotli_decompress(body)?,
        };

        match bytes {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => {
                    debug!(compression = ?self, "Decompressed body");
                    Some(text)
                }
                Err(e) => {
                    debug!(compression = ?self, error = %e, "Decompressed body is not UTF-8");
                    None
                }
            },
            Err(e) => {
                debug!(compression = ?self, error = %e, "Decompression failed");
                None
            }
        }
    }
}

fn read_all(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(feature = "brotli")]
#[allow(clippy::unnecessary_wraps)]
fn brotli_decompress(body: &[u8]) -> Option<std::io::Result<Vec<u8>>> {
    Some(read_all(brotli::Decompressor::new(body, 4096)))
}

#[cfg(not(feature = "brotli"))]
fn brotli_decompress(_body: &[u8]) -> Option<std::io::Result<Vec<u8>>> {
    tracing::warn!("Brotli body received but Brotli support is not compiled in; using raw text");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_detect_by_header() {
        assert_eq!(Compression::detect(Some("br"), b"{}"), Compression::Brotli);
        assert_eq!(Compression::detect(Some("BR "), b"{}"), Compression::Brotli);
        assert_eq!(Compression::detect(Some("deflate"), b"{}"), Compression::Deflate);
        assert_eq!(Compression::detect(None, b"{}"), Compression::Identity);
    }

    #[test]
    fn test_detect_by_magic() {
        assert_eq!(Compression::detect(None, &[0x1f, 0x8b, 0x08]), Compression::Gzip);
        assert_eq!(Compression::detect(None, &[0xce, 0xb2, 0x00]), Compression::Brotli);
        assert_eq!(Compression::detect(None, &[0x1b, 0x4a, 0x00]), Compression::Brotli);
        assert_eq!(Compression::detect(Some(""), &[0x1f]), Compression::Identity);
    }

    #[test]
    fn test_gzip_roundtrip() {
        let body = gzip(br#"{"ret":1}"#);
        let kind = Compression::detect(None, &body);
        assert_eq!(kind.decode_text(&body).as_deref(), Some(r#"{"ret":1}"#));
    }

    #[test]
    fn test_deflate_roundtrip() {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(br#"{"ret":0,"msg":"ok"}"#).unwrap();
        let body = encoder.finish().unwrap();

        let kind = Compression::detect(Some("deflate"), &body);
        assert_eq!(kind, Compression::Deflate);
        assert_eq!(kind.decode_text(&body).as_deref(), Some(r#"{"ret":0,"msg":"ok"}"#));
    }

    #[test]
    fn test_bad_gzip_yields_none() {
        assert!(Compression::Gzip.decode_text(b"not gzip").is_none());
    }
}
