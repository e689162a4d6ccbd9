//! FAQ block: accordion entries plus schema.org `FAQPage` structured data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::content::{lenient, plain_text};
use crate::render::{prepare_rich_text, RenderedText};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// FAQ block as delivered by the CMS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqBlock {
    #[serde(default)]
    pub heading: Value,
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqItem {
    #[serde(rename = "_key", default, deserialize_with = "lenient::string")]
    pub key: Option<String>,
    #[serde(default)]
    pub question: Value,
    #[serde(default)]
    pub answer: Value,
}

/// schema.org FAQPage document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "mainEntity")]
    pub main_entity: Vec<FaqQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqQuestion {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(rename = "acceptedAnswer")]
    pub accepted_answer: FaqAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqAnswer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

/// Structured data for the items with both a question and an answer
/// WHY: returns None when nothing qualifies so the page emits no empty script tag
pub fn faq_page_json_ld(items: &[FaqItem]) -> Option<FaqPage> {
    let main_entity: Vec<FaqQuestion> = items
        .iter()
        .map(|item| FaqQuestion {
            kind: "Question",
            name: plain_text(&item.question),
            accepted_answer: FaqAnswer {
                kind: "Answer",
                text: plain_text(&item.answer),
            },
        })
        .filter(|question| !question.name.is_empty() && !question.accepted_answer.text.is_empty())
        .collect();

    debug!("FAQ structured data: {} of {} items qualify", main_entity.len(), items.len());

    if main_entity.is_empty() {
        return None;
    }
    Some(FaqPage {
        context: SCHEMA_CONTEXT,
        kind: "FAQPage",
        main_entity,
    })
}

/// Everything the FAQ accordion renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqView {
    pub heading: RenderedText,
    pub entries: Vec<FaqEntry>,
    #[serde(rename = "structuredData", skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<FaqPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub key: String,
    pub question: RenderedText,
    pub answer: RenderedText,
}

impl FaqBlock {
    /// Accordion view; `None` when the block has no items at all
    pub fn prepare(&self) -> Option<FaqView> {
        if self.items.is_empty() {
            return None;
        }

        let entries = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let key = item.key.clone().unwrap_or_else(|| format!("faq-{index}"));
                FaqEntry {
                    question: prepare_rich_text(&item.question, &format!("{key}-q")),
                    answer: prepare_rich_text(&item.answer, &format!("{key}-a")),
                    key,
                }
            })
            .collect();

        Some(FaqView {
            heading: prepare_rich_text(&self.heading, "faq-heading"),
            entries,
            structured_data: faq_page_json_ld(&self.items),
        })
    }
}
