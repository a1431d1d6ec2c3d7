//! Labeled field lookup in raw document text.

use crf_model::{CrfError, Result};
use regex::Regex;

/// Compiled matcher for one field label.
///
/// Matches the label literally and case-insensitively, followed by a
/// separator of colons and horizontal whitespace, then captures the rest of
/// that line. The separator never crosses a line break.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    label: String,
    regex: Regex,
}

impl FieldPattern {
    pub fn new(label: &str) -> Result<Self> {
        let pattern = format!(r"(?i){}[\s:&&[^\r\n]]+([^\r\n]*)", regex::escape(label));
        let regex = Regex::new(&pattern).map_err(|e| CrfError::Pattern {
            label: label.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            label: label.to_string(),
            regex,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value following the first occurrence of the label, trimmed.
    /// Later occurrences are ignored.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

/// One-shot form of [`FieldPattern::extract`].
pub fn extract_field(text: &str, label: &str) -> Result<Option<String>> {
    Ok(FieldPattern::new(label)?.extract(text))
}
