//! Value normalization for extracted form text.

use std::sync::LazyLock;

use crf_model::{CrfDocument, CrfNode, CrfValue};
use regex::Regex;

use crate::checkbox;

/// Three or more underscores: an unfilled blank line on the form.
static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{3,}").expect("Invalid blank line regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Clean one extracted string.
///
/// Checkbox resolution runs first, then blank-line underscores and arrow
/// glyphs are stripped, em-dashes become hyphens, whitespace runs collapse
/// to one space, and the result is trimmed.
pub fn clean_value(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let resolved = checkbox::resolve(value);
    let without_blanks = BLANK_LINE.replace_all(&resolved, "");
    let normalized = without_blanks.replace('→', "").replace('—', "-");
    WHITESPACE_RUN
        .replace_all(&normalized, " ")
        .trim()
        .to_string()
}

/// Clean a leaf value. Flags pass through unchanged.
pub fn clean_leaf(value: &CrfValue) -> CrfValue {
    match value {
        CrfValue::Text(text) => CrfValue::Text(clean_value(text)),
        CrfValue::Flag(flag) => CrfValue::Flag(*flag),
    }
}

/// Clean every leaf below `node`, keeping its shape.
pub fn clean_node(node: &CrfNode) -> CrfNode {
    match node {
        CrfNode::Leaf(value) => CrfNode::Leaf(clean_leaf(value)),
        CrfNode::List(items) => CrfNode::List(items.iter().map(clean_node).collect()),
        CrfNode::Container(doc) => CrfNode::Container(clean_document(doc)),
    }
}

/// Clean a whole document key by key, preserving key order.
pub fn clean_document(doc: &CrfDocument) -> CrfDocument {
    doc.iter()
        .map(|(key, node)| (key.to_string(), clean_node(node)))
        .collect()
}
