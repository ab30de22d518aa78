// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Fetch
//!
//! HTTP transport and response decoding for the check-in tool.
//!
//! ## Transport
//!
//! - [`request::RequestDescriptor`] - Plain-data description of a request
//! - [`transport::Transport`] - Executes descriptors with retry and backoff
//! - [`retry::RetryStrategy`] - Attempt budget and linear backoff
//! - [`response::HttpResponse`] - Fully-read response with raw body bytes
//!
//! ## Decoding
//!
//! - [`decode::decode_json`] - Recovers a JSON object from a messy body
//! - [`compression::Compression`] - Content-encoding detection
//!
//! ## Example
//!
//! ```ignore
//! use checkin_fetch::{decode_json, RequestDescriptor, Transport};
//!
//! let transport = Transport::new();
//! let response = transport
//!     .execute(&RequestDescriptor::post("https://panel.example/user/checkin"))
//!     .await?;
//! let json = decode_json(&response)?;
//! ```

pub mod compression;
pub mod decode;
pub mod error;
pub mod request;
pub mod response;
pub mod retry;
pub mod transport;

// Re-export key types at crate root
pub use compression::Compression;
pub use decode::{decode_body, decode_json};
pub use error::{DecodeError, TransportError};
pub use request::RequestDescriptor;
pub use response::HttpResponse;
pub use retry::RetryStrategy;
pub use transport::{browser_headers, Transport};

pub use reqwest::cookie::Jar;
pub use reqwest::{Method, StatusCode};
