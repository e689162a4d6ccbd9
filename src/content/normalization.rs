// WHY: standalone whitespace collapsing shared by label resolution and compact labels
// Separated from extraction so callers can reuse one buffer across many labels

/// Collapse every whitespace run into a single space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    collapse_whitespace_into(text, &mut result);
    result
}

/// Collapse whitespace into supplied buffer to avoid allocation
/// WHY: navigation builds dozens of labels per render, one buffer serves them all
pub fn collapse_whitespace_into(text: &str, buffer: &mut String) {
    squeeze_whitespace_into(text, buffer);

    let trimmed = buffer.trim();
    if trimmed.len() != buffer.len() {
        let trimmed_content = trimmed.to_string();
        buffer.clear();
        buffer.push_str(&trimmed_content);
    }
}

/// Replace every whitespace run with a single space, keeping a leading or trailing one
/// WHY: separator detection in compact labels must still see " | " at the very start
pub fn squeeze_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            // \r\n, tabs and non-breaking spaces all become one space
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }
}

/// Comparison key for label equality: lowercase ASCII alphanumerics only
/// WHY: "Acme, Inc." and "acme inc" must compare equal when checking brand redundancy
pub fn comparison_key(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
