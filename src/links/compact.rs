// WHY: Navigation chrome has little room - labels are cut at a title separator and capped in length
// Limits live in a rules struct so sites with wider menus can loosen them

use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::content::{extract_text, squeeze_whitespace_into, RichValue};

/// " | ", " - " or " – " between title parts, e.g. "Services | Acme"
const LABEL_SEPARATOR_PATTERN: &str = r"\s\|\s|\s[-\x{2013}]\s";

static LABEL_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(LABEL_SEPARATOR_PATTERN).expect("built-in label separator pattern must compile")
});

/// Configuration for compact navigation labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompactLabelRules {
    /// Labels up to this many characters are kept whole
    pub max_chars: usize,
    /// Characters kept before the ellipsis when a label is too long
    pub keep_chars: usize,
    pub ellipsis: String,
}

impl Default for CompactLabelRules {
    fn default() -> Self {
        Self {
            max_chars: 28,
            keep_chars: 25,
            ellipsis: "...".to_string(),
        }
    }
}

impl CompactLabelRules {
    /// Cap a label at `max_chars`, counting Unicode scalar values
    pub fn truncate(&self, label: &str) -> String {
        if label.chars().count() <= self.max_chars {
            return label.to_string();
        }
        let mut shortened: String = label.chars().take(self.keep_chars).collect();
        shortened.push_str(&self.ellipsis);
        shortened
    }
}

/// Short label for menus and buttons
pub fn compact_label(label: &RichValue, rules: &CompactLabelRules) -> String {
    let raw = extract_text(label);
    if raw.is_empty() {
        return String::new();
    }

    let mut squeezed = String::with_capacity(raw.len());
    squeeze_whitespace_into(&raw, &mut squeezed);

    let prefix = LABEL_SEPARATOR
        .split(squeezed.as_str())
        .map(|span| &squeezed[span.range()])
        .find(|segment| !segment.is_empty())
        .unwrap_or(raw.as_str());

    let trimmed = prefix.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    rules.truncate(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compact(value: serde_json::Value) -> String {
        compact_label(&RichValue::from(value), &CompactLabelRules::default())
    }

    #[test]
    fn test_short_labels_unchanged() {
        assert_eq!(compact(json!("About")), "About");
        assert_eq!(compact(json!("  Our   Team ")), "Our Team");
        assert_eq!(compact(json!(null)), "");
        assert_eq!(compact(json!("   ")), "");
    }

    #[test]
    fn test_separator_cuts_label() {
        assert_eq!(compact(json!("Services | Acme Inc.")), "Services");
        assert_eq!(compact(json!("Blog - Latest news")), "Blog");
        assert_eq!(compact(json!("Careers \u{2013} Join us")), "Careers");
        assert_eq!(compact(json!(" | Pricing")), "Pricing");
        // hyphens inside words are not separators
        assert_eq!(compact(json!("Follow-up care")), "Follow-up care");
    }

    #[test]
    fn test_long_labels_truncated() {
        let exact = "abcdefghijklmnopqrstuvwxyz01";
        assert_eq!(compact(json!(exact)), exact);

        let long = "Comprehensive Managed Services Overview";
        assert_eq!(compact(json!(long)), "Comprehensive Managed Ser...");
    }

    #[test]
    fn test_truncation_counts_characters() {
        let rules = CompactLabelRules { max_chars: 4, keep_chars: 2, ellipsis: "\u{2026}".to_string() };
        assert_eq!(rules.truncate("\u{e9}t\u{e9}"), "\u{e9}t\u{e9}");
        assert_eq!(rules.truncate("\u{e9}t\u{e9}s!"), "\u{e9}t\u{2026}");
    }

    #[test]
    fn test_rich_label_input() {
        assert_eq!(compact(json!([{"_type": "block", "children": [{"text": "Contact us"}]}])), "Contact us");
    }

    #[test]
    fn test_rules_deserialize_with_defaults() {
        let rules: CompactLabelRules = serde_json::from_value(json!({"maxChars": 40})).unwrap();
        assert_eq!(rules.max_chars, 40);
        assert_eq!(rules.keep_chars, 25);
        assert_eq!(rules.ellipsis, "...");
    }
}
