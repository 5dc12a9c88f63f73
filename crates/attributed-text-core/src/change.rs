//! Change detection between two flat-text snapshots.
//!
//! The editable surface only reports the full text after every input event. The detector
//! localizes the edit by measuring the longest common prefix and suffix of the previous and
//! new text; whatever lies between them is the changed middle. Lengths are in characters
//! (Unicode scalar values); see [`crate::text`] for UTF-16 conversions.

use crate::config::BoundaryMode;
use crate::text::{char_offset_to_utf16, char_slice};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Coarse classification of an edit.
///
/// Informational only: a same-length replacement is reported as [`ChangeKind::Delete`], and
/// reconciliation never looks at this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// The new text is longer than the old text.
    Insert,
    /// The new text is not longer than the old text.
    Delete,
}

/// Description of one edit, produced by [`detect`] or [`ChangeTracker::track`].
///
/// Invariant: `common_prefix_len + common_suffix_len <= min(old_len, new_len)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    /// Insert or delete.
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Characters shared at the start of both texts.
    #[serde(rename = "commonPrefixLength")]
    pub common_prefix_len: usize,
    /// Characters shared at the end of both texts, not overlapping the prefix.
    #[serde(rename = "commonSuffixLength")]
    pub common_suffix_len: usize,
    /// Text before the edit.
    pub old_text: String,
    /// Text after the edit.
    pub new_text: String,
    /// Caret position reported with the edit, in UTF-16 code units.
    pub cursor_position: usize,
}

impl ChangeReport {
    /// Old text length in characters.
    pub fn old_len(&self) -> usize {
        self.old_text.chars().count()
    }

    /// New text length in characters.
    pub fn new_len(&self) -> usize {
        self.new_text.chars().count()
    }

    /// Number of characters in the new changed middle.
    pub fn inserted_len(&self) -> usize {
        self.new_len()
            .saturating_sub(self.common_prefix_len + self.common_suffix_len)
    }

    /// Number of characters removed from the old changed middle.
    pub fn deleted_len(&self) -> usize {
        self.old_len()
            .saturating_sub(self.common_prefix_len + self.common_suffix_len)
    }

    /// The changed middle of the new text.
    pub fn inserted_text(&self) -> &str {
        let start = self.common_prefix_len;
        char_slice(&self.new_text, start, start + self.inserted_len())
    }

    /// The changed middle of the old text.
    pub fn deleted_text(&self) -> &str {
        let start = self.common_prefix_len;
        char_slice(&self.old_text, start, start + self.deleted_len())
    }

    /// Whether both snapshots are identical.
    pub fn is_noop(&self) -> bool {
        self.old_text == self.new_text
    }

    /// The changed middle of the new text in UTF-16 code units.
    pub fn changed_range_utf16(&self) -> Range<usize> {
        let start = char_offset_to_utf16(&self.new_text, self.common_prefix_len);
        let end = char_offset_to_utf16(
            &self.new_text,
            self.common_prefix_len + self.inserted_len(),
        );
        start..end
    }
}

/// Compare two snapshots at scalar-value granularity.
pub fn detect(old_text: &str, new_text: &str, cursor_position: usize) -> ChangeReport {
    detect_with_mode(old_text, new_text, cursor_position, BoundaryMode::Scalar)
}

/// Compare two snapshots, snapping the prefix and suffix to `mode` boundaries.
pub fn detect_with_mode(
    old_text: &str,
    new_text: &str,
    cursor_position: usize,
    mode: BoundaryMode,
) -> ChangeReport {
    let old: Vec<char> = old_text.chars().collect();
    let new: Vec<char> = new_text.chars().collect();

    let mut prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    // Scanning only the tails after the prefix caps the suffix at min(old, new) - prefix.
    let mut suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    if mode == BoundaryMode::Grapheme && (prefix > 0 || suffix > 0) {
        let old_bounds = grapheme_boundaries(old_text);
        let new_bounds = grapheme_boundaries(new_text);
        let on_boundary = |old_at: usize, new_at: usize| {
            old_bounds.binary_search(&old_at).is_ok() && new_bounds.binary_search(&new_at).is_ok()
        };
        while prefix > 0 && !on_boundary(prefix, prefix) {
            prefix -= 1;
        }
        while suffix > 0 && !on_boundary(old.len() - suffix, new.len() - suffix) {
            suffix -= 1;
        }
    }

    let kind = if new.len() > old.len() {
        ChangeKind::Insert
    } else {
        ChangeKind::Delete
    };

    ChangeReport {
        kind,
        common_prefix_len: prefix,
        common_suffix_len: suffix,
        old_text: old_text.to_string(),
        new_text: new_text.to_string(),
        cursor_position,
    }
}

/// Character offsets at which extended grapheme clusters start, plus the end offset.
fn grapheme_boundaries(text: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut offset = 0;
    for grapheme in text.graphemes(true) {
        out.push(offset);
        offset += grapheme.chars().count();
    }
    out.push(offset);
    out
}

/// Per-widget change detector that remembers the previous snapshot.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    previous: String,
    cursor_position: usize,
    mode: BoundaryMode,
}

impl ChangeTracker {
    /// Create a tracker with an empty previous snapshot.
    pub fn new(mode: BoundaryMode) -> Self {
        Self {
            previous: String::new(),
            cursor_position: 0,
            mode,
        }
    }

    /// Reset the previous snapshot without producing a report.
    pub fn init(&mut self, text: impl Into<String>) {
        self.previous = text.into();
    }

    /// Compare `new_text` with the previous snapshot, then remember `new_text`.
    pub fn track(&mut self, new_text: &str, cursor_position: usize) -> ChangeReport {
        let report = detect_with_mode(&self.previous, new_text, cursor_position, self.mode);
        log::trace!(
            "change {:?}: prefix={} suffix={} cursor={} ({} -> {} chars)",
            report.kind,
            report.common_prefix_len,
            report.common_suffix_len,
            cursor_position,
            report.old_len(),
            report.new_len()
        );
        self.cursor_position = cursor_position;
        self.previous = new_text.to_string();
        report
    }

    /// The snapshot the next edit will be compared against.
    pub fn previous_text(&self) -> &str {
        &self.previous
    }

    /// Caret position of the last tracked edit.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Boundary policy in use.
    pub fn boundary_mode(&self) -> BoundaryMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_in_middle() {
        let report = detect("Helo", "Hello", 3);
        assert_eq!(report.kind, ChangeKind::Insert);
        assert_eq!(report.common_prefix_len, 3);
        assert_eq!(report.common_suffix_len, 1);
        assert_eq!(report.inserted_text(), "l");
        assert_eq!(report.deleted_text(), "");
    }

    #[test]
    fn same_length_replacement_is_delete() {
        let report = detect("cat", "cot", 2);
        assert_eq!(report.kind, ChangeKind::Delete);
        assert_eq!(report.inserted_text(), "o");
        assert_eq!(report.deleted_text(), "a");
    }

    #[test]
    fn suffix_never_overlaps_prefix() {
        let report = detect("aa", "aaa", 3);
        assert_eq!(report.common_prefix_len, 2);
        assert_eq!(report.common_suffix_len, 0);
        assert_eq!(report.inserted_len(), 1);

        let report = detect("aaa", "aa", 2);
        assert_eq!(report.common_prefix_len, 2);
        assert_eq!(report.common_suffix_len, 0);
        assert_eq!(report.deleted_len(), 1);
    }

    #[test]
    fn identical_texts_are_noop() {
        let report = detect("same", "same", 0);
        assert!(report.is_noop());
        assert_eq!(report.common_prefix_len, 4);
        assert_eq!(report.common_suffix_len, 0);
        assert_eq!(report.inserted_len(), 0);
        assert_eq!(report.deleted_len(), 0);
    }

    #[test]
    fn grapheme_mode_keeps_combining_mark_with_base() {
        // Adding U+0301 after "e" turns the last grapheme into "é".
        let scalar = detect("e", "e\u{301}", 2);
        assert_eq!(scalar.common_prefix_len, 1);

        let grapheme = detect_with_mode("e", "e\u{301}", 2, BoundaryMode::Grapheme);
        assert_eq!(grapheme.common_prefix_len, 0);
        assert_eq!(grapheme.common_suffix_len, 0);
        assert_eq!(grapheme.inserted_text(), "e\u{301}");
        assert_eq!(grapheme.deleted_text(), "e");
    }

    #[test]
    fn changed_range_is_reported_in_utf16() {
        let report = detect("a👋b", "a👋xb", 4);
        assert_eq!(report.common_prefix_len, 2);
        assert_eq!(report.changed_range_utf16(), 3..4);
    }

    #[test]
    fn report_serializes_with_host_field_names() {
        let report = detect("ab", "abc", 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "insert",
                "commonPrefixLength": 2,
                "commonSuffixLength": 0,
                "oldText": "ab",
                "newText": "abc",
                "cursorPosition": 3,
            })
        );
        let decoded: ChangeReport = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, report);
    }

    #[test]
    fn tracker_remembers_previous_snapshot() {
        let mut tracker = ChangeTracker::new(BoundaryMode::Scalar);
        tracker.init("ab");
        let report = tracker.track("abc", 3);
        assert_eq!(report.old_text, "ab");
        assert_eq!(tracker.previous_text(), "abc");
        assert_eq!(tracker.cursor_position(), 3);
    }
}
