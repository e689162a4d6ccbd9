//! Site header model: brand, navigation entries, phone link and CTA button.
//!
//! Every label passes through [`resolve_link_label`] and [`compact_label`];
//! every link through [`ResolvedLink`]. Top-level entries without a usable
//! link are kept as plain text, child entries without one are dropped.
//! Menus are one level deep: children of children are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::SiteSettings;
use crate::content::{extract_text, is_truthy, lenient, RichValue};
use crate::links::{compact_label, resolve_link_label, CompactLabelRules, LinkValue, ResolvedLink};

/// Label for a navigation entry whose label resolves to nothing
pub const FALLBACK_NAV_LABEL: &str = "Page";
pub const FALLBACK_CTA_LABEL: &str = "Contact";
/// Brand text when there is no site title
pub const FALLBACK_BRAND: &str = "Home";

/// Navigation document as delivered by the CMS
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    #[serde(default, deserialize_with = "lenient::list")]
    pub header_links: Vec<NavLink>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub cta_button: Option<CtaButton>,
    #[serde(default)]
    pub phone: RichValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavLink {
    #[serde(rename = "_key", default, deserialize_with = "lenient::string")]
    pub key: Option<String>,
    #[serde(default)]
    pub label: RichValue,
    #[serde(default)]
    pub link: LinkValue,
    #[serde(default, deserialize_with = "lenient::list")]
    pub children: Vec<NavLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CtaButton {
    /// Kept raw: any truthy label shows the button, even one with no text
    #[serde(default)]
    pub label: Value,
    #[serde(default)]
    pub link: LinkValue,
}

/// Fully resolved header, ready to paint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderModel {
    pub brand_text: String,
    pub home_href: &'static str,
    pub background: String,
    pub links: Vec<NavEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<CtaLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntry {
    pub key: String,
    pub label: String,
    pub link: ResolvedLink,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaLink {
    pub href: String,
    pub label: String,
}

impl HeaderModel {
    /// Resolve the navigation document against the site settings
    pub fn build(navigation: &Navigation, settings: &SiteSettings, site_title: &str) -> Self {
        debug!("Building header model with {} top-level links", navigation.header_links.len());

        let rules = &settings.label_rules;
        let brand_text = if site_title.is_empty() { FALLBACK_BRAND.to_string() } else { site_title.to_string() };

        let links = navigation
            .header_links
            .iter()
            .enumerate()
            .map(|(index, item)| NavEntry::build(item, index, site_title, rules))
            .collect();

        let phone = Some(extract_text(&navigation.phone))
            .filter(|phone| !phone.is_empty())
            .map(|phone| PhoneLink { href: format!("tel:{phone}"), label: phone });

        let cta = navigation.cta_button.as_ref().and_then(|button| CtaLink::build(button, rules));

        Self {
            brand_text,
            home_href: "/",
            background: settings.header_background().to_string(),
            links,
            phone,
            cta,
        }
    }
}

impl NavEntry {
    fn build(item: &NavLink, index: usize, site_title: &str, rules: &CompactLabelRules) -> Self {
        let children = item
            .children
            .iter()
            .enumerate()
            .map(|(child_index, child)| Self::leaf(child, child_index, site_title, rules))
            // WHY: a dropdown item with nowhere to go is noise
            .filter(|child| child.link.is_valid)
            .collect();

        Self { children, ..Self::leaf(item, index, site_title, rules) }
    }

    fn leaf(item: &NavLink, index: usize, site_title: &str, rules: &CompactLabelRules) -> Self {
        Self {
            key: entry_key(item, index),
            label: nav_label(item, site_title, rules),
            link: ResolvedLink::resolve(&item.link),
            children: Vec::new(),
        }
    }
}

impl CtaLink {
    /// CTA only renders with both a label and somewhere to go
    fn build(button: &CtaButton, rules: &CompactLabelRules) -> Option<Self> {
        if !is_truthy(&button.label) {
            return None;
        }
        let link = ResolvedLink::resolve(&button.link);
        if !link.is_valid {
            return None;
        }

        let label = Some(compact_label(&RichValue::from(&button.label), rules))
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| FALLBACK_CTA_LABEL.to_string());
        Some(Self { href: link.href, label })
    }
}

fn nav_label(item: &NavLink, site_title: &str, rules: &CompactLabelRules) -> String {
    let resolved = resolve_link_label(&item.label, &item.link, site_title);
    let compact = compact_label(&RichValue::Text(resolved), rules);
    if compact.is_empty() {
        FALLBACK_NAV_LABEL.to_string()
    } else {
        compact
    }
}

fn entry_key(item: &NavLink, index: usize) -> String {
    item.key
        .clone()
        .or_else(|| Some(extract_text(&item.label)).filter(|label| !label.is_empty()))
        .unwrap_or_else(|| format!("nav-{index}"))
}
