//! Authors and the author → color mapping.
//!
//! An [`Author`] is the role credited with typing a character (`"admin"`, `"client"`, …).
//! Colors are never chosen per edit: they are always looked up through an [`AuthorPalette`],
//! which makes the color of a run a pure function of its author for the lifetime of a widget.

use crate::error::{AttributedTextError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Role name of the reviewer in the default palette.
pub const REVIEWER_ROLE: &str = "admin";
/// Color used for the reviewer role in the default palette.
pub const REVIEWER_COLOR: &str = "#d32f2f";
/// Color used for every other author in the default palette.
pub const DEFAULT_COLOR: &str = "#000000";

/// Identifier of the role that produced a run of text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Author(String);

impl Author {
    /// Create an author from any role name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reviewer role (`"admin"`).
    pub fn admin() -> Self {
        Self::new(REVIEWER_ROLE)
    }

    /// The client role (`"client"`).
    pub fn client() -> Self {
        Self::new("client")
    }

    /// Role name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::client()
    }
}

impl From<&str> for Author {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Author {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Author {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A CSS color string attached to a run.
///
/// Colors read back from stored values are kept verbatim so that a stored segment list
/// round-trips unchanged; [`Color::parse`] is used where a color is configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parse a `#rgb` / `#rrggbb` literal. The result is lowercased.
    pub fn parse(literal: &str) -> Result<Self> {
        let hex = literal
            .strip_prefix('#')
            .ok_or_else(|| AttributedTextError::InvalidColor(literal.to_string()))?;
        let valid_len = hex.len() == 3 || hex.len() == 6;
        if !valid_len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AttributedTextError::InvalidColor(literal.to_string()));
        }
        Ok(Self(literal.to_ascii_lowercase()))
    }

    /// The default reviewer color (`#d32f2f`).
    pub fn reviewer() -> Self {
        Self(REVIEWER_COLOR.to_string())
    }

    /// The default color for all other authors (`#000000`).
    pub fn default_text() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }

    /// The color as a CSS string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps authors to colors.
///
/// Lookup order: explicit `overrides`, then the reviewer role, then `default_color`.
/// The default palette reproduces the two-tier policy: `"admin"` is red, everyone else black.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorPalette {
    /// Role rendered with `reviewer_color`.
    pub reviewer_role: Author,
    /// Color of the reviewer role.
    pub reviewer_color: Color,
    /// Color of every author without a more specific entry.
    pub default_color: Color,
    /// Per-author colors that take precedence over the two-tier policy.
    pub overrides: BTreeMap<Author, Color>,
}

impl Default for AuthorPalette {
    fn default() -> Self {
        Self {
            reviewer_role: Author::admin(),
            reviewer_color: Color::reviewer(),
            default_color: Color::default_text(),
            overrides: BTreeMap::new(),
        }
    }
}

impl AuthorPalette {
    /// Color assigned to `author`.
    pub fn color_of(&self, author: &Author) -> Color {
        if let Some(color) = self.overrides.get(author) {
            return color.clone();
        }
        if *author == self.reviewer_role {
            self.reviewer_color.clone()
        } else {
            self.default_color.clone()
        }
    }

    /// Add or replace an explicit color for one author.
    pub fn with_override(mut self, author: impl Into<Author>, color: Color) -> Self {
        self.overrides.insert(author.into(), color);
        self
    }

    /// Re-parse every configured color through [`Color::parse`], so the palette only holds
    /// lowercase hex literals.
    pub fn normalized(self) -> Result<Self> {
        let overrides = self
            .overrides
            .into_iter()
            .map(|(author, color)| Ok((author, Color::parse(color.as_str())?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self {
            reviewer_role: self.reviewer_role,
            reviewer_color: Color::parse(self.reviewer_color.as_str())?,
            default_color: Color::parse(self.default_color.as_str())?,
            overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_two_tier() {
        let palette = AuthorPalette::default();
        assert_eq!(palette.color_of(&Author::admin()).as_str(), "#d32f2f");
        assert_eq!(palette.color_of(&Author::client()).as_str(), "#000000");
        assert_eq!(palette.color_of(&Author::new("paralegal")).as_str(), "#000000");
    }

    #[test]
    fn overrides_take_precedence() {
        let palette =
            AuthorPalette::default().with_override("admin", Color::parse("#1976D2").unwrap());
        assert_eq!(palette.color_of(&Author::admin()).as_str(), "#1976d2");
    }

    #[test]
    fn normalized_lowercases_configured_colors() {
        let palette = AuthorPalette {
            reviewer_color: Color("#D32F2F".to_string()),
            ..AuthorPalette::default()
        }
        .with_override("paralegal", Color("#ABC".to_string()))
        .normalized()
        .unwrap();
        assert_eq!(palette.reviewer_color, Color::parse("#d32f2f").unwrap());
        assert_eq!(palette.color_of(&Author::new("paralegal")).as_str(), "#abc");

        let invalid = AuthorPalette {
            default_color: Color("black".to_string()),
            ..AuthorPalette::default()
        };
        assert!(invalid.normalized().is_err());
    }

    #[test]
    fn color_parse_rejects_non_hex() {
        assert!(Color::parse("#abc").is_ok());
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#ggg").is_err());
    }
}
