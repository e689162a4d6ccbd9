// WHY: Email segmentation interface with dual API for borrowed vs owned pieces
// Borrowed pieces feed the portable-text rewrite without copying; owned pieces outlive the input

use serde::Serialize;

pub mod email_detector;
pub mod linkify;

// Re-export core types
pub use email_detector::{shared_detector, EmailDetector, EMAIL_PATTERN};
pub use linkify::{
    linkify_plain_text, linkify_portable_text, linkify_portable_value, Fragment, Linkified,
    DEFAULT_KEY_PREFIX,
};

/// Whether a piece of text is ordinary text or a detected email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Text,
    Email,
}

/// Borrowed variant - slice of the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextPiece<'a> {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub value: &'a str,
}

impl<'a> TextPiece<'a> {
    pub fn text(value: &'a str) -> Self {
        Self { kind: PieceKind::Text, value }
    }

    pub fn email(value: &'a str) -> Self {
        Self { kind: PieceKind::Email, value }
    }

    pub fn is_email(&self) -> bool {
        self.kind == PieceKind::Email
    }

    /// Copy into an owned piece
    pub fn to_owned_piece(&self) -> TextPieceOwned {
        TextPieceOwned {
            kind: self.kind,
            value: self.value.to_string(),
        }
    }
}

/// Owned variant - convenience when the source text is temporary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPieceOwned {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub value: String,
}

impl TextPieceOwned {
    pub fn is_email(&self) -> bool {
        self.kind == PieceKind::Email
    }
}

/// Split text around email addresses using the shared detector
pub fn split_text_with_emails(text: &str) -> Vec<TextPiece<'_>> {
    shared_detector().split(text)
}

/// Owned API for callers that drop the source text
pub fn split_text_with_emails_owned(text: &str) -> Vec<TextPieceOwned> {
    split_text_with_emails(text)
        .iter()
        .map(TextPiece::to_owned_piece)
        .collect()
}
