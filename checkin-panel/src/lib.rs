// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Panel
//!
//! The three stages of a check-in run against an SSPanel-style panel.
//!
//! - [`auth`] - Login page fetch, credential submission, success signals
//! - [`checkin`] - The check-in action and outcome classification
//! - [`info`] - Dashboard fetch and session-expiry detection
//! - [`extract`] - Account fields from dashboard HTML
//!
//! [`PanelClient`] bundles the configuration and transport so callers run
//! the stages in order:
//!
//! ```ignore
//! use checkin_core::CheckinConfig;
//! use checkin_panel::PanelClient;
//!
//! let client = PanelClient::new(CheckinConfig::from_env(None)?);
//! let credential = client.login().await?;
//! let outcome = client.checkin(&credential).await;
//! let info = client.account_info(&credential).await?;
//! ```

pub mod auth;
pub mod checkin;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod info;
pub mod reply;

pub use auth::{LoginSignals, LoginVerdict, extract_csrf_token, login};
pub use checkin::classify;
pub use client::PanelClient;
pub use error::PanelError;
pub use extract::extract;
pub use info::{fetch_account_info, is_login_page};
pub use reply::PanelReply;
