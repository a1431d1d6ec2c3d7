//! Checkbox group resolution.
//!
//! Printed forms render choice sets with box glyphs, e.g.
//! `☐ Never ☑ Current ☐ Former`. Resolution returns the labels that follow
//! checked glyphs, in document order.

use std::sync::LazyLock;

use regex::Regex;

/// Empty box glyphs (U+2610, U+25A1).
pub const EMPTY_BOXES: &[char] = &['☐', '□'];

/// Checked or filled box glyphs (U+2611, U+25A0).
pub const CHECKED_BOXES: &[char] = &['☑', '■'];

/// A checked glyph followed by the run of text up to the next box glyph.
static CHECKED_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[☑■]\s*([^☐☑□■]+)").expect("Invalid checked option regex")
});

/// Returns true if `span` contains any box glyph.
pub fn is_checkbox_group(span: &str) -> bool {
    span.chars()
        .any(|c| EMPTY_BOXES.contains(&c) || CHECKED_BOXES.contains(&c))
}

/// Resolve the selected options of a checkbox group.
///
/// - Not a checkbox group: the span is returned trimmed.
/// - No checked glyph: empty string.
/// - Otherwise: the selected labels joined with `", "`.
pub fn resolve(span: &str) -> String {
    if !is_checkbox_group(span) {
        return span.trim().to_string();
    }
    selected_options(span).join(", ")
}

/// Labels following every checked glyph, trimmed, in span order.
/// A checked glyph with no label text contributes nothing.
pub fn selected_options(span: &str) -> Vec<&str> {
    CHECKED_OPTION
        .captures_iter(span)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|option| !option.is_empty())
        .collect()
}
