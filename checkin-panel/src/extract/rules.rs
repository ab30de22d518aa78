//! Heading classification rules.

use checkin_core::InfoCategory;

/// Ordered `(category, keywords)` rules; the first rule with a keyword
/// contained in the heading wins.
pub const HEADING_RULES: &[(InfoCategory, &[&str])] = &[
    (InfoCategory::Membership, &["会员时长", "时长", "到期"]),
    (InfoCategory::Traffic, &["剩余流量", "流量", "可用"]),
    (InfoCategory::Devices, &["在线设备", "设备", "连接"]),
    (InfoCategory::Balance, &["钱包", "余额", "积分"]),
];

/// Classifies a card heading, or `None` for the generic bucket.
pub fn classify_heading(heading: &str) -> Option<InfoCategory> {
    let heading = normalize(heading);
    HEADING_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| heading.contains(k)))
        .map(|(category, _)| *category)
}

/// Collapses whitespace runs to one space and trims.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
