//! The attributed-text widget state machine.
//!
//! A [`Widget`] owns one live document and the change tracker bound to it. It is hydrated
//! once from the host's stored value, then every input event goes through
//! [`Widget::on_edit`]: detect → reconcile → serialize → notify subscribers.
//!
//! # Example
//!
//! ```rust
//! use attributed_text_core::{Author, Widget, WidgetConfig};
//!
//! let mut widget = Widget::new(WidgetConfig::new("client"));
//! widget.on_edit("Hi", 2).unwrap();
//!
//! widget.set_user_type("admin");
//! let value = widget.on_edit("Hi!", 3).unwrap().unwrap();
//! assert!(value.contains(r#""user":"admin""#));
//! assert_eq!(widget.text().author_at(0), Some(&Author::client()));
//! assert_eq!(widget.text().author_at(2), Some(&Author::admin()));
//! ```

use crate::author::{Author, Color};
use crate::change::{ChangeReport, ChangeTracker};
use crate::config::WidgetConfig;
use crate::error::Result;
use crate::reconcile::reconcile;
use crate::render::RenderModel;
use crate::segment::{AttributedSegment, AttributedText};
use crate::value::{InboundValue, serialize_segments};
use std::fmt;

/// Hydration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// No non-empty value has been seen yet.
    Uninitialized,
    /// Hydrated; inbound values are ignored from now on.
    Ready,
}

/// Notification emitted after every accepted edit.
#[derive(Debug, Clone)]
pub struct ValueChange {
    /// Serialized segment list, the widget's new value.
    pub value: String,
    /// The edit that produced it.
    pub report: ChangeReport,
    /// Edit counter after this change (starts at 1).
    pub version: u64,
}

/// Value change callback function type
pub type ValueChangeCallback = Box<dyn FnMut(&ValueChange) + Send>;

/// Collaborative plain-text widget with per-character authorship.
pub struct Widget {
    config: WidgetConfig,
    state: WidgetState,
    text: AttributedText,
    tracker: ChangeTracker,
    callbacks: Vec<ValueChangeCallback>,
    last_report: Option<ChangeReport>,
    version: u64,
}

impl Widget {
    /// Create an uninitialized widget.
    pub fn new(config: WidgetConfig) -> Self {
        let tracker = ChangeTracker::new(config.boundary_mode);
        Self {
            config,
            state: WidgetState::Uninitialized,
            text: AttributedText::default(),
            tracker,
            callbacks: Vec::new(),
            last_report: None,
            version: 0,
        }
    }

    /// Create a widget and offer it an initial value.
    pub fn with_value(config: WidgetConfig, value: &str) -> Self {
        let mut widget = Self::new(config);
        widget.set_value(value);
        widget
    }

    /// Offer an inbound value from the host.
    ///
    /// Only the first non-empty value is used; returns `true` if this call hydrated the widget.
    pub fn set_value(&mut self, value: &str) -> bool {
        if self.state == WidgetState::Ready {
            log::debug!(
                "ignoring inbound value for hydrated field '{}'",
                self.config.field
            );
            return false;
        }
        if value.is_empty() {
            return false;
        }
        let text =
            InboundValue::parse(value).into_text(&self.config.user_type, &self.config.palette);
        self.hydrate(text);
        true
    }

    fn hydrate(&mut self, text: AttributedText) {
        self.tracker.init(text.flat_text());
        self.text = text;
        self.state = WidgetState::Ready;
    }

    /// Apply the text reported by the editable surface after an input event.
    ///
    /// Returns the new serialized value, or `None` when the widget is read-only.
    pub fn on_edit(
        &mut self,
        raw_new_text: &str,
        cursor_position: usize,
    ) -> Result<Option<String>> {
        if self.config.read_only {
            log::debug!("read-only field '{}' rejected an edit", self.config.field);
            return Ok(None);
        }
        if self.state == WidgetState::Uninitialized {
            self.hydrate(AttributedText::default());
        }

        let current = self.text.flat_text();
        if self.tracker.previous_text() != current {
            log::warn!(
                "tracked text of field '{}' diverged from its segments; resynchronizing",
                self.config.field
            );
            self.tracker.init(current);
        }

        let report = self.tracker.track(raw_new_text, cursor_position);
        let segments = reconcile(
            &report,
            self.text.segments(),
            &self.config.user_type,
            &self.config.palette,
        )?;
        self.text = AttributedText::new(segments);
        self.version += 1;

        let value = serialize_segments(self.text.segments())?;
        let change = ValueChange {
            value: value.clone(),
            report,
            version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
        self.last_report = Some(change.report);
        Ok(Some(value))
    }

    /// Subscribe to value changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ValueChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Switch the author credited with subsequent edits.
    pub fn set_user_type(&mut self, user_type: impl Into<Author>) {
        self.config.user_type = user_type.into();
    }

    /// Toggle read-only mode.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
    }

    /// Current configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Hydration state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// The live document.
    pub fn text(&self) -> &AttributedText {
        &self.text
    }

    /// The live segments.
    pub fn segments(&self) -> &[AttributedSegment] {
        self.text.segments()
    }

    /// Flat text of the live document.
    pub fn flat_text(&self) -> String {
        self.text.flat_text()
    }

    /// Current serialized value.
    pub fn value(&self) -> Result<String> {
        serialize_segments(self.text.segments())
    }

    /// Report of the last accepted edit.
    pub fn last_report(&self) -> Option<&ChangeReport> {
        self.last_report.as_ref()
    }

    /// Number of accepted edits.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Caret color for the active author.
    pub fn caret_color(&self) -> Color {
        self.config.palette.color_of(&self.config.user_type)
    }

    /// Build the render model for the current state.
    pub fn render(&self) -> RenderModel {
        RenderModel::build(&self.text, self.caret_color(), self.config.read_only)
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("text", &self.text)
            .field("version", &self.version)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
