// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Core
//!
//! Core types, models, and configuration shared by the check-in crates.
//!
//! ## Key Types
//!
//! ### Session
//! - [`SessionCredential`] - Cookie-derived proof of an authenticated session
//!
//! ### Outcomes
//! - [`CheckinOutcome`] - Result of the daily check-in action
//! - [`FailureReason`] - Why a check-in did not succeed
//!
//! ### Account Info
//! - [`AccountInfo`] - Labeled fields scraped from the dashboard
//! - [`InfoField`] / [`InfoCategory`] - A single field and its classification
//! - [`ExtractionMode`] - Which extraction path produced the fields
//!
//! ### Configuration
//! - [`CheckinConfig`] - Run configuration built once at startup

pub mod config;
pub mod error;
pub mod models;

pub use config::{CheckinConfig, DEFAULT_DOMAIN, ENV_DOMAIN, ENV_EMAIL, ENV_PASSWORD};
pub use error::ConfigError;
pub use models::{
    AccountInfo, CheckinOutcome, ExtractionMode, FailureReason, InfoCategory, InfoField,
    SessionCredential,
};
