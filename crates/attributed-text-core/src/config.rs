//! Widget construction parameters.
//!
//! The host form passes these when it mounts a widget. They can be built in code or loaded
//! from a JSON document that uses the web host's camelCase keys (`userType`, `readOnly`).

use crate::author::{Author, AuthorPalette};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Which boundaries an edit's common prefix/suffix may end on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Any Unicode scalar value boundary.
    #[default]
    Scalar,
    /// Extended grapheme cluster boundaries only, so a cluster is never split between authors.
    Grapheme,
}

/// Configuration of one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Name of the form field the widget is bound to.
    pub field: String,
    /// Author credited with edits made through this widget.
    pub user_type: Author,
    /// Reject all edits; only the colored overlay is meaningful.
    pub read_only: bool,
    /// Boundary policy of the change detector.
    pub boundary_mode: BoundaryMode,
    /// Author → color mapping.
    pub palette: AuthorPalette,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            field: String::new(),
            user_type: Author::client(),
            read_only: false,
            boundary_mode: BoundaryMode::Scalar,
            palette: AuthorPalette::default(),
        }
    }
}

impl WidgetConfig {
    /// Default configuration editing as `user_type`.
    pub fn new(user_type: impl Into<Author>) -> Self {
        Self {
            user_type: user_type.into(),
            ..Self::default()
        }
    }

    /// Set the bound form field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Set the read-only flag.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the change detector boundary policy.
    pub fn with_boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.boundary_mode = mode;
        self
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: AuthorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Load a configuration from JSON. Missing keys fall back to defaults; palette colors
    /// must be hex literals and are stored lowercased.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.palette = config.palette.normalized()?;
        Ok(config)
    }

    /// Encode the configuration as JSON, in the same spelling [`Self::from_json_str`] reads.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttributedTextError;

    #[test]
    fn accepts_camel_case_host_keys() {
        let json = r#"{
            "field": "draft",
            "userType": "admin",
            "readOnly": true,
            "boundaryMode": "grapheme"
        }"#;
        let config = WidgetConfig::from_json_str(json).unwrap();
        assert_eq!(config.field, "draft");
        assert_eq!(config.user_type, Author::admin());
        assert!(config.read_only);
        assert_eq!(config.boundary_mode, BoundaryMode::Grapheme);
        assert_eq!(config.palette, AuthorPalette::default());
    }

    #[test]
    fn palette_colors_are_normalized_on_load() {
        let config =
            WidgetConfig::from_json_str(r##"{"palette": {"reviewerColor": "#D32F2F"}}"##).unwrap();
        assert_eq!(config.palette.reviewer_color.as_str(), "#d32f2f");
        assert_eq!(config.palette, AuthorPalette::default());
    }

    #[test]
    fn round_trips_in_host_spelling() {
        let config = WidgetConfig::new("admin")
            .with_field("draft")
            .with_read_only(true)
            .with_boundary_mode(BoundaryMode::Grapheme);
        let json = config.to_json_string().unwrap();
        assert!(json.contains(r#""userType":"admin""#));
        assert!(json.contains(r#""readOnly":true"#));
        assert!(json.contains(r#""boundaryMode":"grapheme""#));
        assert!(json.contains(r#""reviewerColor":"#));
        assert_eq!(WidgetConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_palette_color() {
        let err =
            WidgetConfig::from_json_str(r#"{"palette": {"defaultColor": "black"}}"#).unwrap_err();
        assert!(matches!(err, AttributedTextError::InvalidColor(c) if c == "black"));
    }
}
