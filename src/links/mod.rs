//! Link resolution for CMS link values of unknown shape.
//!
//! A link may be a raw string, an external URL object, an internal page
//! reference, a slug object, or an object with `href` / `current`. The value
//! is classified once into [`LinkValue`]; [`resolve_href`] then walks the
//! fields in a fixed order and always produces a usable string, with `"#"`
//! as the "no target" sentinel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::content::{is_truthy, RichValue};

pub mod compact;
pub mod label;

pub use compact::{compact_label, CompactLabelRules};
pub use label::{humanize_slug, is_brand_like, resolve_link_label};

/// Href meaning "nothing to navigate to"
pub const NO_TARGET: &str = "#";

/// A CMS link value, classified by shape
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum LinkValue {
    /// null, false, 0 or ""
    #[default]
    Unset,
    /// A raw string: URL, path, slug, `mailto:`, `tel:` or `#fragment`
    Url(String),
    Reference(Box<LinkReference>),
    /// true, non-zero numbers and arrays - nothing to resolve
    Opaque,
}

/// Fields of an object-shaped link
/// WHY: each field is kept only when truthy so resolution can stop at the first present one
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkReference {
    pub external: Option<RichValue>,
    /// `internal.slug.current`
    pub internal_slug: Option<RichValue>,
    /// `internal.title`, used for labels only
    pub internal_title: RichValue,
    /// `slug.current`
    pub slug: Option<RichValue>,
    pub href: Option<RichValue>,
    pub current: Option<RichValue>,
}

impl LinkReference {
    fn from_map(map: &Map<String, Value>) -> Self {
        let internal = map.get("internal");
        Self {
            external: truthy_field(map.get("external")),
            internal_slug: truthy_field(internal.and_then(slug_current)),
            internal_title: internal
                .and_then(|internal| internal.get("title"))
                .map(RichValue::from)
                .unwrap_or_default(),
            slug: truthy_field(map.get("slug").and_then(|slug| slug.get("current"))),
            href: truthy_field(map.get("href")),
            current: truthy_field(map.get("current")),
        }
    }

    fn resolve_href(&self) -> String {
        if let Some(external) = &self.external {
            return string_href(external);
        }
        if let Some(slug) = &self.internal_slug {
            return slug_href(slug);
        }
        if let Some(slug) = &self.slug {
            return slug_href(slug);
        }
        if let Some(href) = &self.href {
            return string_href(href);
        }
        if let Some(current) = &self.current {
            return slug_href(current);
        }
        NO_TARGET.to_string()
    }
}

fn slug_current(value: &Value) -> Option<&Value> {
    value.get("slug").and_then(|slug| slug.get("current"))
}

fn truthy_field(value: Option<&Value>) -> Option<RichValue> {
    value.filter(|value| is_truthy(value)).map(RichValue::from)
}

impl From<&Value> for LinkValue {
    fn from(value: &Value) -> Self {
        if !is_truthy(value) {
            return LinkValue::Unset;
        }
        match value {
            Value::String(raw) => LinkValue::Url(raw.clone()),
            Value::Object(map) => LinkValue::Reference(Box::new(LinkReference::from_map(map))),
            _ => LinkValue::Opaque,
        }
    }
}

impl From<Value> for LinkValue {
    fn from(value: Value) -> Self {
        LinkValue::from(&value)
    }
}

impl From<&str> for LinkValue {
    fn from(raw: &str) -> Self {
        LinkValue::from(&Value::String(raw.to_string()))
    }
}

/// Href together with whether it is worth rendering as a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub href: String,
    pub is_valid: bool,
}

impl ResolvedLink {
    pub fn resolve(link: &LinkValue) -> Self {
        Self::from_href(resolve_href(link))
    }

    pub fn from_href(href: String) -> Self {
        let is_valid = has_valid_href(&href);
        Self { href, is_valid }
    }
}

/// Resolve any link shape to an href; `"#"` when there is no usable target
pub fn resolve_href(link: &LinkValue) -> String {
    match link {
        LinkValue::Unset | LinkValue::Opaque => NO_TARGET.to_string(),
        LinkValue::Url(raw) => normalize_string_href(raw),
        LinkValue::Reference(reference) => reference.resolve_href(),
    }
}

/// Whether an href points anywhere
pub fn has_valid_href(href: &str) -> bool {
    !href.trim().is_empty() && href != NO_TARGET
}

/// Normalize a raw href string
/// WHY: fragments and mailto/tel are kept verbatim because URL parsing would rewrite them
pub fn normalize_string_href(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NO_TARGET.to_string();
    }
    if trimmed.starts_with('#') || has_scheme(trimmed, "mailto:") || has_scheme(trimmed, "tel:") {
        return trimmed.to_string();
    }

    match Url::parse(trimmed) {
        Ok(url) => url.to_string(),
        // not absolute - treat it as a site path
        Err(_) => path_from_slug(trimmed),
    }
}

/// Turn a CMS slug into a site-relative path
pub fn path_from_slug(slug: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        return NO_TARGET.to_string();
    }
    if trimmed == "home" {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        return trimmed.to_string();
    }
    format!("/{trimmed}")
}

fn has_scheme(text: &str, scheme: &str) -> bool {
    text.get(..scheme.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

fn string_href(value: &RichValue) -> String {
    value.as_str().map_or_else(|| NO_TARGET.to_string(), normalize_string_href)
}

fn slug_href(value: &RichValue) -> String {
    value.as_str().map_or_else(|| NO_TARGET.to_string(), path_from_slug)
}
