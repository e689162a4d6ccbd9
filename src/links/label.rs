// WHY: Label resolution for navigation links
// Editors often leave a link label as the brand name; a page-derived label reads better

use crate::content::{collapse_whitespace, comparison_key, normalize_text, RichValue};

use super::LinkValue;

/// Shortest comparison key allowed to match the brand by prefix alone
pub const BRAND_PREFIX_MIN_LEN: usize = 10;

/// Pick the display label for a link
///
/// The explicit label wins unless it merely restates `site_title` and the
/// link itself points at a page with a more specific name.
pub fn resolve_link_label(label: &RichValue, link: &LinkValue, site_title: &str) -> String {
    let explicit = normalize_text(label);
    let inferred = collapse_whitespace(&fallback_label(link));

    if explicit.is_empty() {
        return inferred;
    }

    if is_brand_like(&explicit, site_title) && !inferred.is_empty() && !is_brand_like(&inferred, site_title) {
        return inferred;
    }

    explicit
}

/// Whether `label` is the site brand under a punctuation- and case-insensitive comparison
pub fn is_brand_like(label: &str, site_title: &str) -> bool {
    let label_key = comparison_key(label);
    let brand_key = comparison_key(site_title);

    if label_key.is_empty() || brand_key.is_empty() {
        return false;
    }
    if label_key == brand_key {
        return true;
    }

    // WHY: keys are ASCII so byte length is character count
    (label_key.len() >= BRAND_PREFIX_MIN_LEN && brand_key.starts_with(&label_key))
        || (brand_key.len() >= BRAND_PREFIX_MIN_LEN && label_key.starts_with(&brand_key))
}

/// Label derived from the link target: page title, else the humanized slug
fn fallback_label(link: &LinkValue) -> String {
    let LinkValue::Reference(reference) = link else {
        return String::new();
    };

    let title = normalize_text(&reference.internal_title);
    if !title.is_empty() {
        return title;
    }

    if let Some(slug) = &reference.internal_slug {
        let slug = normalize_text(slug);
        if !slug.is_empty() {
            return humanize_slug(&slug);
        }
    }

    if let Some(slug) = reference.slug.as_ref().or(reference.current.as_ref()) {
        let slug = normalize_text(slug);
        if !slug.is_empty() {
            return humanize_slug(&slug);
        }
    }

    String::new()
}

/// Readable title for a slug: "our-services" -> "Our Services", "home" -> "Home"
pub fn humanize_slug(slug: &str) -> String {
    let raw = slug.trim();
    if raw.is_empty() {
        return String::new();
    }

    let cleaned = match raw.trim_matches('/') {
        "" => "home",
        cleaned => cleaned,
    };
    if cleaned.eq_ignore_ascii_case("home") {
        return "Home".to_string();
    }

    let leaf = cleaned.split('/').rfind(|segment| !segment.is_empty()).unwrap_or(cleaned);

    capitalize_words(&separators_to_spaces(leaf))
}

/// Replace each run of `-` / `_` with one space
fn separators_to_spaces(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_run = false;

    for ch in text.chars() {
        if ch == '-' || ch == '_' {
            if !in_run {
                result.push(' ');
                in_run = true;
            }
        } else {
            result.push(ch);
            in_run = false;
        }
    }
    result
}

/// Uppercase the first character of every alphanumeric run
fn capitalize_words(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if in_word {
                result.push(ch);
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}
