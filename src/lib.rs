pub mod config;
pub mod content;
pub mod faq;
pub mod links;
pub mod navigation;
pub mod render;
pub mod segmenter;

// Re-export main types for convenient access
pub use content::{extract_text, normalize_text, plain_text, Entry, RichValue};

pub use segmenter::{
    linkify_plain_text, linkify_portable_text, linkify_portable_value, split_text_with_emails, Fragment, Linkified,
    TextPiece, TextPieceOwned,
};

pub use links::{
    compact_label, has_valid_href, humanize_slug, is_brand_like, resolve_href, resolve_link_label,
    CompactLabelRules, LinkValue, ResolvedLink,
};

pub use config::SiteSettings;
pub use faq::{faq_page_json_ld, FaqBlock, FaqView};
pub use navigation::{HeaderModel, Navigation};
pub use render::{prepare_rich_text, RenderedText};
