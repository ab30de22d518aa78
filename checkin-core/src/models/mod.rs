//! Domain models for the check-in tool.
//!
//! ## Submodules
//!
//! - [`session`] - Session credential derived from login cookies
//! - [`outcome`] - Check-in outcome classification
//! - [`account`] - Account information scraped from the dashboard

mod account;
mod outcome;
mod session;

pub use account::{AccountInfo, ExtractionMode, InfoCategory, InfoField};
pub use outcome::{CheckinOutcome, FailureReason};
pub use session::SessionCredential;
