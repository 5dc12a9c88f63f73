//! Render model for the two-layer widget.
//!
//! The widget is drawn as an invisible editable surface holding the flat text (it owns the
//! caret and receives input) with a read-only overlay on top that paints every run in its
//! author's color. Both layers must use identical font metrics so glyphs line up.

use crate::author::{Author, Color};
use crate::segment::AttributedText;
use serde::Serialize;
use std::fmt::Write;

/// The editable layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSurface {
    /// Flat text backing the caret and selection.
    pub text: String,
    /// Whether the surface rejects input.
    pub read_only: bool,
    /// Caret color, the active author's color.
    pub caret_color: Color,
}

/// One colored run of the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlaySpan {
    /// Text of the run.
    pub text: String,
    /// Run color.
    pub color: Color,
    /// Author of the run.
    pub user: Author,
}

/// Everything a host needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    /// Editable layer.
    pub surface: TextSurface,
    /// Colored overlay, adjacent runs with equal attribution merged.
    pub overlay: Vec<OverlaySpan>,
}

impl RenderModel {
    /// Build the model for `text`.
    pub fn build(text: &AttributedText, caret_color: Color, read_only: bool) -> Self {
        let mut merged = text.clone();
        merged.coalesce();
        let overlay = merged
            .into_segments()
            .into_iter()
            .map(|segment| OverlaySpan {
                text: segment.text,
                color: segment.color,
                user: segment.user,
            })
            .collect();
        Self {
            surface: TextSurface {
                text: text.flat_text(),
                read_only,
                caret_color,
            },
            overlay,
        }
    }

    /// Render the overlay as HTML: one `<span>` per run inside a `pre-wrap` container.
    pub fn to_html(&self) -> String {
        let mut html = String::from(CONTAINER_OPEN);
        for span in &self.overlay {
            let _ = write!(
                html,
                r#"<span style="color: {}" data-user="{}">"#,
                escape_html(span.color.as_str()),
                escape_html(span.user.as_str())
            );
            html.push_str(&escape_html(&span.text));
            html.push_str("</span>");
        }
        html.push_str("</div>");
        html
    }
}

const CONTAINER_OPEN: &str =
    r#"<div class="attributed-text" style="white-space: pre-wrap; word-break: break-word;">"#;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
