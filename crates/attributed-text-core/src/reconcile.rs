//! Segment reconciliation.
//!
//! Every edit is handled as a three-way split of the old document:
//!
//! ```text
//! old:  [ common prefix ][ deleted middle  ][ common suffix ]
//! new:  [ common prefix ][ inserted middle ][ common suffix ]
//! ```
//!
//! Prefix and suffix characters keep their original author and color. Each inserted
//! character becomes a one-character segment owned by the active author. Authorship of
//! deleted characters is dropped.

use crate::author::{Author, AuthorPalette};
use crate::change::ChangeReport;
use crate::error::{AttributedTextError, Result};
use crate::segment::{AttributedSegment, flat_text};

/// Apply `report` to `old_segments`, crediting the changed middle to `new_author`.
///
/// Fails if `old_segments` do not concatenate to `report.old_text`, or if the report's
/// prefix and suffix overlap.
pub fn reconcile(
    report: &ChangeReport,
    old_segments: &[AttributedSegment],
    new_author: &Author,
    palette: &AuthorPalette,
) -> Result<Vec<AttributedSegment>> {
    let actual = flat_text(old_segments);
    if actual != report.old_text {
        return Err(AttributedTextError::Desynchronized {
            expected: report.old_text.clone(),
            actual,
        });
    }

    let old_len = report.old_len();
    let new_len = report.new_len();
    let prefix = report.common_prefix_len;
    let suffix = report.common_suffix_len;
    if prefix + suffix > old_len.min(new_len) {
        return Err(AttributedTextError::InvalidReport {
            prefix,
            suffix,
            old_len,
            new_len,
        });
    }

    let inserted_len = new_len - prefix - suffix;
    let mut out = Vec::with_capacity(old_segments.len() + inserted_len);

    copy_range(old_segments, 0, prefix, &mut out);

    if inserted_len > 0 {
        let color = palette.color_of(new_author);
        for ch in report.new_text.chars().skip(prefix).take(inserted_len) {
            out.push(AttributedSegment::with_color(
                ch.to_string(),
                color.clone(),
                new_author.clone(),
            ));
        }
    }

    copy_range(old_segments, old_len - suffix, old_len, &mut out);

    log::trace!(
        "reconciled {} segments into {} ({} new chars by {})",
        old_segments.len(),
        out.len(),
        inserted_len,
        new_author
    );
    Ok(out)
}

/// Append the attribution of characters `start..end` of `segments` to `out`.
///
/// Segments fully inside the range are cloned whole; boundary segments are split. Empty
/// segments carry no characters and are dropped.
fn copy_range(
    segments: &[AttributedSegment],
    start: usize,
    end: usize,
    out: &mut Vec<AttributedSegment>,
) {
    if start >= end {
        return;
    }
    let mut seg_start = 0;
    for segment in segments {
        let len = segment.char_len();
        if len == 0 {
            continue;
        }
        let seg_end = seg_start + len;
        if seg_end > start && seg_start < end {
            let from = start.max(seg_start) - seg_start;
            let to = end.min(seg_end) - seg_start;
            if from == 0 && to == len {
                out.push(segment.clone());
            } else {
                out.push(segment.slice(from, to));
            }
        }
        if seg_end >= end {
            break;
        }
        seg_start = seg_end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::Color;
    use crate::change::{ChangeKind, detect};
    use crate::segment::AttributedText;
    use pretty_assertions::assert_eq;

    fn seg(text: &str, user: &str) -> AttributedSegment {
        AttributedSegment::new(text, Author::new(user), &AuthorPalette::default())
    }

    fn authors(segments: &[AttributedSegment]) -> String {
        AttributedText::new(segments.to_vec())
            .chars()
            .map(|(_, s)| if s.user == Author::admin() { 'A' } else { 'c' })
            .collect()
    }

    #[test]
    fn splits_runs_that_straddle_the_edit() {
        let old = vec![seg("Hello", "client")];
        let report = detect("Hello", "HeXllo", 3);
        let out = reconcile(&report, &old, &Author::admin(), &AuthorPalette::default()).unwrap();
        assert_eq!(flat_text(&out), "HeXllo");
        assert_eq!(authors(&out), "ccAccc");
    }

    #[test]
    fn replacement_drops_deleted_authorship() {
        let old = vec![seg("ab", "client"), seg("cd", "admin"), seg("ef", "client")];
        let report = detect("abcdef", "abXYZef", 5);
        let out = reconcile(&report, &old, &Author::client(), &AuthorPalette::default()).unwrap();
        assert_eq!(flat_text(&out), "abXYZef");
        assert_eq!(authors(&out), "ccccccc");
    }

    #[test]
    fn rejects_desynchronized_segments() {
        let old = vec![seg("abc", "client")];
        let report = detect("abd", "abde", 4);
        let err = reconcile(&report, &old, &Author::client(), &AuthorPalette::default())
            .unwrap_err();
        assert!(matches!(err, AttributedTextError::Desynchronized { .. }));
    }

    #[test]
    fn rejects_overlapping_prefix_and_suffix() {
        let old = vec![seg("aa", "client")];
        let report = ChangeReport {
            kind: ChangeKind::Insert,
            common_prefix_len: 2,
            common_suffix_len: 2,
            old_text: "aa".to_string(),
            new_text: "aaa".to_string(),
            cursor_position: 3,
        };
        let err = reconcile(&report, &old, &Author::client(), &AuthorPalette::default())
            .unwrap_err();
        assert!(matches!(err, AttributedTextError::InvalidReport { .. }));
    }

    #[test]
    fn empty_input_segments_are_dropped() {
        let palette = AuthorPalette::default();
        let empty = AttributedSegment::with_color("", Color::reviewer(), Author::admin());
        let old = vec![seg("a", "client"), empty, seg("b", "client")];
        let report = detect("ab", "abc", 3);
        let out = reconcile(&report, &old, &Author::admin(), &palette).unwrap();
        assert!(out.iter().all(|s| !s.text.is_empty()));
        assert_eq!(flat_text(&out), "abc");
        assert_eq!(authors(&out), "ccA");

        let report = detect("ab", "b", 0);
        let out = reconcile(&report, &old, &Author::admin(), &palette).unwrap();
        assert_eq!(out, vec![seg("b", "client")]);
    }

    #[test]
    fn repeated_characters_append_once() {
        let old = vec![seg("aa", "client")];
        let report = detect("aa", "aaa", 3);
        let out = reconcile(&report, &old, &Author::admin(), &AuthorPalette::default()).unwrap();
        assert_eq!(flat_text(&out), "aaa");
        assert_eq!(authors(&out), "ccA");
    }
}
