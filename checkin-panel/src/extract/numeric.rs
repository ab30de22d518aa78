//! Number-plus-unit text scan, used when no card was recognized.

use std::sync::LazyLock;

use checkin_core::{InfoCategory, InfoField};
use regex::Regex;

/// Matches reported at most.
pub const MAX_NUMERIC_MATCHES: usize = 5;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(GB|MB|天|个|USD|CNY)").expect("Invalid regex")
});

/// Returns up to [`MAX_NUMERIC_MATCHES`] distinct `value unit` matches in
/// first-seen order.
pub fn scan_numeric(text: &str) -> Vec<InfoField> {
    let mut seen: Vec<String> = Vec::new();

    for caps in NUMERIC_RE.captures_iter(text) {
        let found = format!("{} {}", &caps[1], &caps[2]);
        if !seen.contains(&found) {
            seen.push(found);
        }
        if seen.len() == MAX_NUMERIC_MATCHES {
            break;
        }
    }

    seen.into_iter()
        .map(|value| InfoField::new(InfoCategory::Numeric, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<String> {
        scan_numeric(text).into_iter().map(|f| f.value).collect()
    }

    #[test]
    fn test_dedups_in_order() {
        let text = "剩余 15.2 GB，会员 30 天，再次显示 15.2GB";
        assert_eq!(values(text), vec!["15.2 GB", "30 天"]);
    }

    #[test]
    fn test_caps_matches() {
        let text = "1 GB 2 GB 3 GB 4 GB 5 GB 6 GB";
        assert_eq!(values(text).len(), MAX_NUMERIC_MATCHES);
    }

    #[test]
    fn test_units() {
        assert_eq!(values("3个 12.50 USD 8 CNY 512MB"), vec!["3 个", "12.50 USD", "8 CNY", "512 MB"]);
        assert!(values("nothing here 42").is_empty());
    }
}
