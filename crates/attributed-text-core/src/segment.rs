//! Attributed segments and the document built from them.
//!
//! A document is an ordered list of [`AttributedSegment`]s. Concatenating their `text`
//! always yields the flat text shown in the editable surface. Adjacent segments may share an
//! author; nothing depends on runs being merged or split, only on the per-character authorship.

use crate::author::{Author, AuthorPalette, Color};
use crate::text::char_slice;
use serde::{Deserialize, Serialize};

/// A non-empty run of characters typed by a single author.
///
/// The serialized shape is `{"text": …, "color": …, "user": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedSegment {
    /// The characters of this run.
    pub text: String,
    /// Display color, derived from `user` through an [`AuthorPalette`].
    pub color: Color,
    /// The author of this run.
    pub user: Author,
}

impl AttributedSegment {
    /// Create a segment colored by `palette`.
    pub fn new(text: impl Into<String>, user: Author, palette: &AuthorPalette) -> Self {
        let color = palette.color_of(&user);
        Self {
            text: text.into(),
            color,
            user,
        }
    }

    /// Create a segment with an explicit color.
    pub fn with_color(text: impl Into<String>, color: Color, user: Author) -> Self {
        Self {
            text: text.into(),
            color,
            user,
        }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Copy of characters `start..end` with the same author and color.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            text: char_slice(&self.text, start, end).to_string(),
            color: self.color.clone(),
            user: self.user.clone(),
        }
    }

    fn same_attribution(&self, other: &Self) -> bool {
        self.user == other.user && self.color == other.color
    }
}

/// Concatenate the text of `segments`.
pub fn flat_text(segments: &[AttributedSegment]) -> String {
    let mut out = String::with_capacity(segments.iter().map(|s| s.text.len()).sum());
    for segment in segments {
        out.push_str(&segment.text);
    }
    out
}

/// An ordered segment list: the live document of a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributedText {
    segments: Vec<AttributedSegment>,
}

impl AttributedText {
    /// Wrap a segment list.
    pub fn new(segments: Vec<AttributedSegment>) -> Self {
        Self { segments }
    }

    /// A document holding `text` as one run by `author`. Empty text yields an empty document.
    pub fn single(text: &str, author: Author, palette: &AuthorPalette) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self::new(vec![AttributedSegment::new(text, author, palette)])
    }

    /// The segments in document order.
    pub fn segments(&self) -> &[AttributedSegment] {
        &self.segments
    }

    /// Consume the document, returning its segments.
    pub fn into_segments(self) -> Vec<AttributedSegment> {
        self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the document has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The flat text of the document.
    pub fn flat_text(&self) -> String {
        flat_text(&self.segments)
    }

    /// Document length in characters.
    pub fn char_len(&self) -> usize {
        self.segments.iter().map(AttributedSegment::char_len).sum()
    }

    /// Segment containing the character at `char_offset`.
    pub fn segment_at(&self, char_offset: usize) -> Option<&AttributedSegment> {
        let mut start = 0;
        for segment in &self.segments {
            let end = start + segment.char_len();
            if char_offset < end {
                return Some(segment);
            }
            start = end;
        }
        None
    }

    /// Author of the character at `char_offset`.
    pub fn author_at(&self, char_offset: usize) -> Option<&Author> {
        self.segment_at(char_offset).map(|s| &s.user)
    }

    /// Color of the character at `char_offset`.
    pub fn color_at(&self, char_offset: usize) -> Option<&Color> {
        self.segment_at(char_offset).map(|s| &s.color)
    }

    /// Every character paired with the segment it belongs to.
    pub fn chars(&self) -> impl Iterator<Item = (char, &AttributedSegment)> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| segment.text.chars().map(move |ch| (ch, segment)))
    }

    /// Merge adjacent segments with the same author and color, and drop empty ones.
    pub fn coalesce(&mut self) {
        let mut merged: Vec<AttributedSegment> = Vec::with_capacity(self.segments.len());
        for segment in self.segments.drain(..) {
            if segment.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.same_attribution(&segment) => last.text.push_str(&segment.text),
                _ => merged.push(segment),
            }
        }
        self.segments = merged;
    }

    /// Characters per author, in order of first appearance.
    pub fn contributions(&self) -> Vec<(Author, usize)> {
        let mut out: Vec<(Author, usize)> = Vec::new();
        for segment in &self.segments {
            let len = segment.char_len();
            match out.iter_mut().find(|(author, _)| *author == segment.user) {
                Some((_, count)) => *count += len,
                None => out.push((segment.user.clone(), len)),
            }
        }
        out
    }
}

impl From<Vec<AttributedSegment>> for AttributedText {
    fn from(segments: Vec<AttributedSegment>) -> Self {
        Self::new(segments)
    }
}
