// WHY: regex-automata based email detection
// One compiled meta regex scans each text once, leftmost-first and non-overlapping

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use super::TextPiece;

/// local-part@domain.tld with a 2-63 letter final label
/// WHY: explicit upper/lower ranges keep the match ASCII-only, same as a case-insensitive [A-Z]
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,63}";

static SHARED_DETECTOR: LazyLock<EmailDetector> = LazyLock::new(|| {
    EmailDetector::new().expect("built-in email pattern must compile")
});

/// Process-wide detector, compiled on first use
pub fn shared_detector() -> &'static EmailDetector {
    &SHARED_DETECTOR
}

/// Compiled email matcher
pub struct EmailDetector {
    regex: Regex,
}

impl EmailDetector {
    /// Compile the email pattern
    pub fn new() -> Result<Self> {
        info!("Compiling email detection pattern");

        let regex = Regex::new(EMAIL_PATTERN).context("Failed to compile email pattern")?;

        debug!("Successfully compiled email pattern: {}", EMAIL_PATTERN);

        Ok(Self { regex })
    }

    /// Whether the text holds at least one email address
    pub fn contains_email(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// All email addresses in order of appearance
    pub fn find_emails<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.regex.find_iter(text).map(|found| &text[found.range()]).collect()
    }

    /// Split text into alternating text and email pieces
    /// WHY: pieces concatenate back to the input exactly - no gaps, no overlaps
    pub fn split<'a>(&self, text: &'a str) -> Vec<TextPiece<'a>> {
        if text.is_empty() {
            return vec![TextPiece::text("")];
        }

        let mut pieces = Vec::new();
        let mut cursor = 0;

        for found in self.regex.find_iter(text) {
            if found.start() > cursor {
                pieces.push(TextPiece::text(&text[cursor..found.start()]));
            }
            pieces.push(TextPiece::email(&text[found.range()]));
            cursor = found.end();
        }

        if cursor < text.len() {
            pieces.push(TextPiece::text(&text[cursor..]));
        }

        if pieces.is_empty() {
            return vec![TextPiece::text(text)];
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::PieceKind;

    fn values<'a>(pieces: &[TextPiece<'a>]) -> Vec<(PieceKind, &'a str)> {
        pieces.iter().map(|piece| (piece.kind, piece.value)).collect()
    }

    #[test]
    fn test_split_two_emails() {
        let detector = EmailDetector::new().unwrap();
        let pieces = detector.split("Contact a@b.com or c@d.org now");

        assert_eq!(
            values(&pieces),
            vec![
                (PieceKind::Text, "Contact "),
                (PieceKind::Email, "a@b.com"),
                (PieceKind::Text, " or "),
                (PieceKind::Email, "c@d.org"),
                (PieceKind::Text, " now"),
            ]
        );
    }

    #[test]
    fn test_split_without_email_returns_whole_text() {
        let detector = shared_detector();
        assert_eq!(values(&detector.split("No address here.")), vec![(PieceKind::Text, "No address here.")]);
        assert_eq!(values(&detector.split("")), vec![(PieceKind::Text, "")]);
    }

    #[test]
    fn test_split_email_only_and_adjacent() {
        let detector = shared_detector();
        assert_eq!(values(&detector.split("x@y.io")), vec![(PieceKind::Email, "x@y.io")]);
        assert_eq!(
            values(&detector.split("(x@y.io)")),
            vec![(PieceKind::Text, "("), (PieceKind::Email, "x@y.io"), (PieceKind::Text, ")")]
        );
    }

    #[test]
    fn test_pattern_edges() {
        let detector = shared_detector();

        assert_eq!(detector.find_emails("Mail First.Last+tag@Mail.Example.CO.UK."), vec!["First.Last+tag@Mail.Example.CO.UK"]);
        // final label must be letters only
        assert!(detector.find_emails("user@host.c0m").is_empty());
        assert!(!detector.contains_email("user@localhost"));
        assert!(detector.contains_email("reach HELLO@ACME.COM today"));
    }

    #[test]
    fn test_pieces_cover_input() {
        let detector = shared_detector();
        let text = "a@b.cd,e@f.gh; and ünïcödé i@j.kl tail";
        let joined: String = detector.split(text).iter().map(|piece| piece.value).collect();
        assert_eq!(joined, text);
    }
}
