//! Text cleanup helpers shared across pipeline stages.

use unicode_normalization::UnicodeNormalization;

/// Normalize extracted text to a single NFC-composed line.
///
/// Non-breaking spaces become regular spaces and whitespace runs collapse
/// to a single space, so cell text and captions render cleanly in
/// markdown.
pub fn clean_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed
        .replace('\u{00a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape cell text for use inside a markdown table row.
pub fn escape_markdown_cell(text: &str) -> String {
    clean_text(text).replace('|', "\\|")
}

/// Escape alt text for use inside a markdown image reference.
pub fn escape_markdown_alt(text: &str) -> String {
    clean_text(text).replace('[', "\\[").replace(']', "\\]")
}
