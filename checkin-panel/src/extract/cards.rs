//! Dashboard card extraction.

use std::sync::LazyLock;

use checkin_core::{InfoCategory, InfoField};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::rules::{classify_heading, normalize};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid selector")
}

/// Card containers, most specific first. The first one that matches
/// anything is used for the whole page.
static CARD_SELECTORS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        selector("div.card-statistic-2"),
        selector("div.card-statistic"),
        selector("div.card"),
    ]
});

static HEADING_SELECTORS: LazyLock<[Selector; 3]> =
    LazyLock::new(|| [selector("h4"), selector("h3"), selector("h5")]);

static BODY_SELECTORS: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector("div.card-body"), selector("div.card-content")]);

static STATS_SELECTORS: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector("div.card-stats-title"), selector("div.card-stats")]);

/// Markers of a "used today" line under a traffic card.
const TODAY_MARKERS: [&str; 3] = ["今日", "已用", "today"];

/// Prefixes stripped from the "used today" line.
const TODAY_PREFIXES: [&str; 2] = ["今日已用 :", "今日已用:"];

/// Prefixes stripped from the rebate line under a balance card.
const REBATE_PREFIXES: [&str; 2] = ["累计获得返利金额:", "累计获得返利金额"];

/// Generic cards need a value longer than this many characters.
const MIN_GENERIC_VALUE_CHARS: usize = 3;

// ============================================================================
// Extraction
// ============================================================================

/// Extracts labeled fields from every recognized card, in page order.
pub fn extract_cards(document: &Html) -> Vec<InfoField> {
    let cards: Vec<ElementRef<'_>> = CARD_SELECTORS
        .iter()
        .map(|sel| document.select(sel).collect::<Vec<_>>())
        .find(|cards| !cards.is_empty())
        .unwrap_or_default();

    debug!(count = cards.len(), "Found dashboard cards");

    cards.into_iter().flat_map(card_fields).collect()
}

fn card_fields(card: ElementRef<'_>) -> Vec<InfoField> {
    let Some(heading) = first_match(card, HEADING_SELECTORS.as_slice()) else {
        return Vec::new();
    };
    let Some(body) = first_match(card, BODY_SELECTORS.as_slice()) else {
        return Vec::new();
    };

    let title = element_text(heading);
    let value = element_text(body);
    let stats = first_match(card, STATS_SELECTORS.as_slice()).map(element_text);

    let Some(category) = classify_heading(&title) else {
        if value.chars().count() > MIN_GENERIC_VALUE_CHARS {
            return vec![InfoField::other(title.replace(':', "").trim(), value)];
        }
        return Vec::new();
    };

    let mut fields = vec![InfoField::new(category, value.clone())];

    match (category, stats) {
        (InfoCategory::Traffic, Some(stats))
            if TODAY_MARKERS.iter().any(|m| stats.contains(m)) =>
        {
            let today = strip_all(&stats, &TODAY_PREFIXES);
            if !today.is_empty() {
                fields.push(InfoField::new(InfoCategory::TodayUsage, today));
            }
        }
        (InfoCategory::Balance, Some(stats)) if !stats.is_empty() && stats != value => {
            let rebate = strip_all(&stats, &REBATE_PREFIXES);
            if !rebate.is_empty() && rebate != value {
                fields.push(InfoField::new(InfoCategory::Rebate, rebate));
            }
        }
        _ => {}
    }

    fields
}

// ============================================================================
// Helpers
// ============================================================================

fn first_match<'a>(element: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|sel| element.select(sel).next())
}

/// Trimmed text nodes joined without separator, then whitespace-collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().map(str::trim).collect();
    normalize(&joined)
}

fn strip_all(text: &str, prefixes: &[&str]) -> String {
    prefixes
        .iter()
        .fold(text.to_string(), |acc, p| acc.replace(p, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(html: &str) -> Vec<(InfoCategory, String, String)> {
        extract_cards(&Html::parse_document(html))
            .into_iter()
            .map(|f| (f.category, f.label, f.value))
            .collect()
    }

    const DASHBOARD: &str = r#"
        <div class="card card-statistic-2">
          <div class="card-header"><h4>会员时长</h4></div>
          <div class="card-body">  328 天 </div>
        </div>
        <div class="card card-statistic-2">
          <div class="card-stats"><div class="card-stats-title">今日已用 : 1.25GB</div></div>
          <div class="card-header"><h4>剩余流量</h4></div>
          <div class="card-body"><span>156.3</span> <span>GB</span></div>
        </div>
        <div class="card card-statistic-2">
          <div class="card-header"><h4>在线设备数</h4></div>
          <div class="card-body">2 / 5</div>
        </div>
        <div class="card card-statistic-2">
          <div class="card-stats"><div class="card-stats-title">累计获得返利金额: ¥ 3.50</div></div>
          <div class="card-header"><h4>钱包余额</h4></div>
          <div class="card-body">¥ 0.00</div>
        </div>
        <div class="card card-statistic-2">
          <div class="card-header"><h4>用户等级:</h4></div>
          <div class="card-body">Lv. 1 VIP</div>
        </div>
        <div class="card card-statistic-2">
          <div class="card-header"><h4>Tiny</h4></div>
          <div class="card-body">ok</div>
        </div>
    "#;

    #[test]
    fn test_full_dashboard() {
        assert_eq!(
            fields(DASHBOARD),
            vec![
                (InfoCategory::Membership, "Membership".into(), "328 天".into()),
                (InfoCategory::Traffic, "Remaining traffic".into(), "156.3GB".into()),
                (InfoCategory::TodayUsage, "Used today".into(), "1.25GB".into()),
                (InfoCategory::Devices, "Online devices".into(), "2 / 5".into()),
                (InfoCategory::Balance, "Balance".into(), "¥ 0.00".into()),
                (InfoCategory::Rebate, "Total rebate".into(), "¥ 3.50".into()),
                (InfoCategory::Other, "用户等级".into(), "Lv. 1 VIP".into()),
            ]
        );
    }

    #[test]
    fn test_falls_back_to_plain_cards() {
        let html = r#"
            <div class="card">
              <h3>剩余流量</h3>
              <div class="card-content">10 GB</div>
            </div>"#;
        assert_eq!(
            fields(html),
            vec![(InfoCategory::Traffic, "Remaining traffic".into(), "10 GB".into())]
        );
    }

    #[test]
    fn test_card_without_body_skipped() {
        let html = r#"<div class="card-statistic"><h4>余额</h4><p>¥ 1</p></div>"#;
        assert!(fields(html).is_empty());
    }

    #[test]
    fn test_rebate_equal_to_value_dropped() {
        let html = r#"
            <div class="card-statistic-2">
              <div class="card-stats">¥ 2.00</div>
              <h4>余额</h4>
              <div class="card-body">¥ 2.00</div>
            </div>"#;
        assert_eq!(fields(html).len(), 1);
    }

    #[test]
    fn test_today_needs_marker() {
        let html = r#"
            <div class="card-statistic-2">
              <div class="card-stats-title">Updated hourly</div>
              <h4>剩余流量</h4>
              <div class="card-body">99 GB</div>
            </div>"#;
        assert_eq!(fields(html).len(), 1);
    }

    #[test]
    fn test_no_cards() {
        assert!(fields("<p>Welcome back</p>").is_empty());
    }
}
