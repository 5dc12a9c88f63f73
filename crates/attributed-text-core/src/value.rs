//! The string value exchanged with the host form.
//!
//! Outbound values are always a JSON array of `{text, color, user}` objects. Inbound values
//! are either such an array or arbitrary legacy text written before attribution existed.

use crate::author::{Author, AuthorPalette};
use crate::error::{AttributedTextError, Result};
use crate::segment::{AttributedSegment, AttributedText};

/// An inbound value after the parse-and-validate step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundValue {
    /// A well-formed segment array.
    Parsed(AttributedText),
    /// Anything else, kept verbatim.
    Raw(String),
}

impl InboundValue {
    /// Classify `value`. Never fails: malformed input becomes [`InboundValue::Raw`].
    pub fn parse(value: &str) -> Self {
        match parse_segments(value) {
            Ok(text) => Self::Parsed(text),
            Err(err) => {
                log::warn!("inbound value is not a segment list, treating as raw text: {err}");
                Self::Raw(value.to_string())
            }
        }
    }

    /// Turn the value into a document. Raw text becomes one run by `author`.
    pub fn into_text(self, author: &Author, palette: &AuthorPalette) -> AttributedText {
        match self {
            Self::Parsed(text) => text,
            Self::Raw(raw) => AttributedText::single(&raw, author.clone(), palette),
        }
    }
}

/// Decode a JSON segment array, rejecting segments with empty text.
pub fn parse_segments(value: &str) -> Result<AttributedText> {
    let segments: Vec<AttributedSegment> = serde_json::from_str(value)?;
    if let Some(index) = segments.iter().position(|s| s.text.is_empty()) {
        return Err(AttributedTextError::EmptySegment { index });
    }
    Ok(AttributedText::new(segments))
}

/// Encode segments as the outbound JSON value.
pub fn serialize_segments(segments: &[AttributedSegment]) -> Result<String> {
    Ok(serde_json::to_string(segments)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_matches_host_format() {
        let segments = vec![AttributedSegment::new(
            "Hi",
            Author::admin(),
            &AuthorPalette::default(),
        )];
        assert_eq!(
            serialize_segments(&segments).unwrap(),
            r##"[{"text":"Hi","color":"#d32f2f","user":"admin"}]"##
        );
    }

    #[test]
    fn malformed_values_fall_back_to_raw() {
        for value in [
            "legacy note",
            "{\"text\":\"a\"}",
            "[{\"text\":\"a\"}]",
            "[{\"text\":\"\",\"color\":\"#000000\",\"user\":\"client\"}]",
            "42",
        ] {
            assert_eq!(InboundValue::parse(value), InboundValue::Raw(value.to_string()));
        }
    }

    #[test]
    fn empty_array_parses_as_empty_document() {
        assert_eq!(
            InboundValue::parse("[]"),
            InboundValue::Parsed(AttributedText::default())
        );
    }
}
