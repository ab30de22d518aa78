//! Account information scraped from the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Info Category
// ============================================================================

/// Classification of a dashboard field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoCategory {
    /// Membership duration or expiry.
    Membership,
    /// Remaining traffic quota.
    Traffic,
    /// Traffic used today.
    TodayUsage,
    /// Online device count.
    Devices,
    /// Wallet balance or points.
    Balance,
    /// Accumulated referral rebate.
    Rebate,
    /// Any other labeled card.
    Other,
    /// Number-plus-unit match from the text fallback.
    Numeric,
}

impl InfoCategory {
    /// Returns the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Membership => "Membership",
            Self::Traffic => "Remaining traffic",
            Self::TodayUsage => "Used today",
            Self::Devices => "Online devices",
            Self::Balance => "Balance",
            Self::Rebate => "Total rebate",
            Self::Other => "Other",
            Self::Numeric => "Detected value",
        }
    }
}

impl fmt::Display for InfoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Info Field
// ============================================================================

/// One labeled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoField {
    /// Classification.
    pub category: InfoCategory,
    /// Label as shown to the operator.
    pub label: String,
    /// Value text, whitespace-normalized.
    pub value: String,
}

impl InfoField {
    /// Creates a field labeled with its category's display name.
    pub fn new(category: InfoCategory, value: impl Into<String>) -> Self {
        Self {
            category,
            label: category.display_name().to_string(),
            value: value.into(),
        }
    }

    /// Creates an [`InfoCategory::Other`] field with a custom label.
    pub fn other(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: InfoCategory::Other,
            label: label.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// Extraction Mode
// ============================================================================

/// Which extraction path produced the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Dashboard cards were recognized.
    Cards,
    /// No cards; values come from the number-plus-unit text scan.
    NumericFallback,
    /// Nothing recognizable.
    #[default]
    Empty,
}

// ============================================================================
// Account Info
// ============================================================================

/// Ordered fields pulled from the dashboard.
///
/// Zero fields is a valid result, flagged as degraded rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Fields in page order.
    pub fields: Vec<InfoField>,
    /// Extraction path used.
    pub mode: ExtractionMode,
    /// Whether the page content had to be unwrapped from an encoded payload.
    pub unwrapped: bool,
}

impl AccountInfo {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true unless cards were recognized.
    pub fn is_degraded(&self) -> bool {
        self.mode != ExtractionMode::Cards
    }

    /// Returns true when no field was found.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(label, value)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
    }

    /// First field of a category.
    pub fn get(&self, category: InfoCategory) -> Option<&InfoField> {
        self.fields.iter().find(|f| f.category == category)
    }
}
