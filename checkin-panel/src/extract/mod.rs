//! Account information extraction from the dashboard HTML.
//!
//! Extraction never fails. The page is unwrapped if it carries a Base64
//! payload, then scanned for dashboard cards. With no cards, a
//! number-plus-unit text scan provides a degraded result; with nothing at
//! all, an empty [`AccountInfo`] is returned.

pub mod cards;
pub mod numeric;
pub mod obfuscation;
pub mod rules;

use checkin_core::{AccountInfo, ExtractionMode};
use scraper::Html;
use tracing::{debug, warn};

pub use cards::extract_cards;
pub use numeric::{MAX_NUMERIC_MATCHES, scan_numeric};
pub use obfuscation::unwrap_payload;
pub use rules::{HEADING_RULES, classify_heading};

/// Extracts account fields from a dashboard page.
pub fn extract(html: &str) -> AccountInfo {
    let unwrapped = unwrap_payload(html);
    if unwrapped.is_some() {
        debug!("Parsing unwrapped page content");
    }

    let document = Html::parse_document(unwrapped.as_deref().unwrap_or(html));

    let fields = extract_cards(&document);
    if !fields.is_empty() {
        return AccountInfo {
            fields,
            mode: ExtractionMode::Cards,
            unwrapped: unwrapped.is_some(),
        };
    }

    warn!("No account cards recognized, scanning page text");
    let fields = match &unwrapped {
        Some(decoded) => scan_numeric(decoded),
        None => scan_numeric(&visible_text(&document)),
    };

    if fields.is_empty() {
        warn!("No account values found; the page may be protected against scraping");
    }

    AccountInfo {
        mode: if fields.is_empty() {
            ExtractionMode::Empty
        } else {
            ExtractionMode::NumericFallback
        },
        fields,
        unwrapped: unwrapped.is_some(),
    }
}

/// Text content of the document outside `script` and `style` elements.
fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?;
            match parent.value().as_element().map(|e| e.name()) {
                Some("script" | "style") => None,
                _ => Some(&**text),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
