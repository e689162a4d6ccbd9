//! Email linkification for plain strings and portable-text documents.
//!
//! Plain strings become keyed fragments (or stay untouched when there is no
//! address). Portable-text blocks are rebuilt with each address split into
//! its own span carrying a `mailto:` link annotation. Inputs are never
//! modified; every pass returns new values.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{shared_detector, EmailDetector, PieceKind};
use crate::content::portable::parse_document;
use crate::content::{Block, Child, Entry, MarkDef, MarkDefEntry, Span};

/// Key prefix used when the caller has no better one
pub const DEFAULT_KEY_PREFIX: &str = "email";

/// One renderable piece of a linkified string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fragment {
    /// `mailto:` anchor around an email address
    Anchor { key: String, href: String, text: String },
    /// Plain text with no interaction
    Inert { key: String, text: String },
}

impl Fragment {
    pub fn key(&self) -> &str {
        match self {
            Fragment::Anchor { key, .. } | Fragment::Inert { key, .. } => key,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Fragment::Anchor { text, .. } | Fragment::Inert { text, .. } => text,
        }
    }
}

/// Result of linkifying a plain string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Linkified {
    /// No email found - the text is returned as-is
    Unchanged(String),
    Fragments(Vec<Fragment>),
}

impl Linkified {
    /// Text content with all markup dropped
    pub fn plain(&self) -> String {
        match self {
            Linkified::Unchanged(text) => text.clone(),
            Linkified::Fragments(fragments) => fragments.iter().map(Fragment::text).collect(),
        }
    }
}

/// Wrap each email address of `text` in a `mailto:` anchor
pub fn linkify_plain_text(text: &str, key_prefix: &str) -> Linkified {
    let pieces = shared_detector().split(text);
    if !pieces.iter().any(|piece| piece.is_email()) {
        return Linkified::Unchanged(text.to_string());
    }

    let fragments = pieces
        .iter()
        .enumerate()
        .map(|(index, piece)| match piece.kind {
            PieceKind::Email => Fragment::Anchor {
                key: format!("{key_prefix}-mail-{index}"),
                href: mailto(piece.value),
                text: piece.value.to_string(),
            },
            PieceKind::Text => Fragment::Inert {
                key: format!("{key_prefix}-text-{index}"),
                text: piece.value.to_string(),
            },
        })
        .collect();

    Linkified::Fragments(fragments)
}

/// Rewrite every block so plain-text email addresses carry a link annotation
pub fn linkify_portable_text(entries: &[Entry]) -> Vec<Entry> {
    debug!("Starting portable text linkification on {} entries", entries.len());

    let detector = shared_detector();
    let mut rewritten_blocks = 0usize;

    let linkified: Vec<Entry> = entries
        .iter()
        .map(|entry| match entry {
            Entry::Block(block) => {
                let linked = linkify_block(block, detector);
                if linked.children != block.children {
                    rewritten_blocks += 1;
                }
                Entry::Block(linked)
            }
            Entry::Other(value) => Entry::Other(value.clone()),
        })
        .collect();

    info!("Portable text linkification complete: {} of {} entries rewritten", rewritten_blocks, entries.len());
    linkified
}

/// JSON-level entry point; anything that is not an array comes back unchanged
pub fn linkify_portable_value(value: &Value) -> Value {
    let Some(entries) = parse_document(value) else {
        return value.clone();
    };

    let linkified = linkify_portable_text(&entries);
    serde_json::to_value(&linkified).unwrap_or_else(|err| {
        warn!("Failed to serialize linkified document, keeping original: {}", err);
        value.clone()
    })
}

fn linkify_block(block: &Block, detector: &EmailDetector) -> Block {
    let mut mark_defs = block.mark_defs.clone();
    let mut link_keys: HashSet<String> = mark_defs
        .iter()
        .filter_map(MarkDefEntry::as_link)
        .filter_map(|mark_def| mark_def.key.clone())
        .collect();

    let mut children = Vec::with_capacity(block.children.len());
    let mut added_links = 0usize;

    for child in &block.children {
        let span = match child {
            Child::Span(span) => span,
            Child::Other(_) => {
                children.push(child.clone());
                continue;
            }
        };

        // WHY: already-linked text is never split again, which keeps the pass idempotent
        if span.marks.iter().any(|mark| link_keys.contains(mark)) {
            children.push(child.clone());
            continue;
        }

        let pieces = detector.split(&span.text);
        if !pieces.iter().any(|piece| piece.is_email()) {
            children.push(child.clone());
            continue;
        }

        for piece in pieces {
            match piece.kind {
                PieceKind::Text => {
                    if piece.value.is_empty() {
                        continue;
                    }
                    children.push(Child::Span(span.derive(fresh_span_key(span), piece.value, span.marks.clone())));
                }
                PieceKind::Email => {
                    let before = mark_defs.len();
                    let mark_key = link_key_for_email(&mut mark_defs, &mut link_keys, piece.value);
                    added_links += mark_defs.len() - before;

                    let mut marks = span.marks.clone();
                    marks.push(mark_key);
                    children.push(Child::Span(span.derive(fresh_span_key(span), piece.value, marks)));
                }
            }
        }
    }

    if added_links > 0 {
        debug!("Added {} email link definitions to block {:?}", added_links, block.key_str());
    }

    Block {
        tag: block.tag,
        key: block.key.clone(),
        children,
        mark_defs,
        extra: block.extra.clone(),
    }
}

/// Reuse a matching link definition or append a new one
/// WHY: one address mentioned twice in a block should share a single definition
fn link_key_for_email(mark_defs: &mut Vec<MarkDefEntry>, link_keys: &mut HashSet<String>, email: &str) -> String {
    let href = mailto(email);
    let existing = mark_defs
        .iter()
        .filter_map(MarkDefEntry::as_link)
        .find(|mark_def| {
            mark_def
                .href
                .as_deref()
                .is_some_and(|existing| existing.to_lowercase() == href.to_lowercase())
        })
        .and_then(|mark_def| mark_def.key.clone());

    let key = existing.unwrap_or_else(|| format!("mail-{}", short_id(8)));

    if !mark_defs.iter().any(|mark_def| mark_def.key() == Some(key.as_str())) {
        mark_defs.push(MarkDefEntry::Def(MarkDef::link(key.clone(), href)));
        link_keys.insert(key.clone());
    }

    key
}

fn mailto(email: &str) -> String {
    format!("mailto:{email}")
}

fn fresh_span_key(span: &Span) -> String {
    format!("{}-{}", span.key_str().unwrap_or("span"), short_id(6))
}

/// Random hex id; only uniqueness within one document matters
fn short_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}
