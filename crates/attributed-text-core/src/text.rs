//! Offset conversions between `char`, byte and UTF-16 units.
//!
//! The engine measures text in Unicode scalar values (`char`). Browser text surfaces report
//! caret positions in UTF-16 code units, so hosts convert at the boundary with these helpers.

/// Byte offset of the `char_offset`-th character (clamped to the end of `text`).
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Substring covering characters `start..end` (both clamped).
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Convert a character offset into a UTF-16 code unit offset.
pub fn char_offset_to_utf16(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(|c| c.len_utf16()).sum()
}

/// Convert a UTF-16 code unit offset into a character offset.
///
/// An offset pointing into the middle of a surrogate pair rounds up to the next character.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut current_utf16 = 0;
    let mut char_offset = 0;
    for ch in text.chars() {
        if current_utf16 >= utf16_offset {
            break;
        }
        current_utf16 += ch.len_utf16();
        char_offset += 1;
    }
    char_offset
}
