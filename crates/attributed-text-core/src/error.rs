use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the attributed-text engine.
pub enum AttributedTextError {
    #[error("JSON error: {0}")]
    /// Encoding or decoding a JSON document failed.
    Json(#[from] serde_json::Error),

    #[error("segment {index} has empty text")]
    /// A decoded segment list contained a segment without any characters.
    EmptySegment {
        /// Position of the offending segment in the list.
        index: usize,
    },

    #[error(
        "segments are out of sync with the change report: expected {expected:?}, found {actual:?}"
    )]
    /// The segments handed to the reconciler do not concatenate to the report's old text.
    Desynchronized {
        /// The `old_text` recorded in the change report.
        expected: String,
        /// The actual concatenation of the segments.
        actual: String,
    },

    #[error(
        "change report overlaps: prefix {prefix} + suffix {suffix} (old {old_len}, new {new_len})"
    )]
    /// A change report whose common prefix and suffix overlap.
    InvalidReport {
        /// Common prefix length, in characters.
        prefix: usize,
        /// Common suffix length, in characters.
        suffix: usize,
        /// Old text length, in characters.
        old_len: usize,
        /// New text length, in characters.
        new_len: usize,
    },

    #[error("invalid color literal '{0}'")]
    /// A palette color is not a `#rgb` or `#rrggbb` literal.
    InvalidColor(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AttributedTextError>;
