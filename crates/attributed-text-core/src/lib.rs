#![warn(missing_docs)]
//! Attributed Text Core - headless collaborative plain-text editing with authorship
//!
//! # Overview
//!
//! `attributed-text-core` keeps track of *who typed which character* in a plain-text field
//! that several roles edit in turn (for example a reviewer and a client). The host only ever
//! reports the full text after each input event; the engine localizes the edit, preserves the
//! authorship of untouched characters, credits new characters to the active author, and hands
//! back an opaque JSON value for the host form to store.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  FormField (host submit interface)          │  ← Host API
//! ├─────────────────────────────────────────────┤
//! │  Widget (hydration, edits, notifications)   │  ← State
//! ├─────────────────────────────────────────────┤
//! │  Value codec  │  Render model               │  ← JSON / overlay
//! ├─────────────────────────────────────────────┤
//! │  Segment Reconciler                         │  ← Authorship
//! ├─────────────────────────────────────────────┤
//! │  Change Detector                            │  ← Diff
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use attributed_text_core::{Author, Widget, WidgetConfig};
//!
//! // A stored value from before attribution existed hydrates as one run.
//! let mut widget = Widget::with_value(WidgetConfig::new("admin"), "legacy note");
//! assert_eq!(widget.segments().len(), 1);
//! assert_eq!(widget.text().author_at(0), Some(&Author::admin()));
//!
//! widget.subscribe(|change| {
//!     println!("new value (v{}): {}", change.version, change.value);
//! });
//!
//! widget.set_user_type("client");
//! widget.on_edit("legacy note!", 12).unwrap();
//! assert_eq!(widget.text().author_at(11), Some(&Author::client()));
//! ```
//!
//! # Module Description
//!
//! - [`change`] - common prefix/suffix change detection
//! - [`reconcile`] - three-way segment reconciliation
//! - [`segment`] - segments and the attributed document
//! - [`author`] - authors, colors and the palette
//! - [`value`] - inbound/outbound JSON value codec
//! - [`render`] - surface + overlay render model
//! - [`widget`] - the widget state machine
//! - [`host`] - form submission interface
//! - [`config`] - construction parameters
//!
//! # Unicode Support
//!
//! - Offsets and lengths are counted in Unicode scalar values (`char`)
//! - [`text`] converts to and from UTF-16 code units for browser carets
//! - [`BoundaryMode::Grapheme`] keeps grapheme clusters with a single author

pub mod author;
pub mod change;
pub mod config;
pub mod error;
pub mod host;
pub mod reconcile;
pub mod render;
pub mod segment;
pub mod text;
pub mod value;
pub mod widget;

pub use author::{Author, AuthorPalette, Color, DEFAULT_COLOR, REVIEWER_COLOR, REVIEWER_ROLE};
pub use change::{ChangeKind, ChangeReport, ChangeTracker, detect, detect_with_mode};
pub use config::{BoundaryMode, WidgetConfig};
pub use error::{AttributedTextError, Result};
pub use host::{Contribution, FormField, SubmitContext, Submission};
pub use reconcile::reconcile;
pub use render::{OverlaySpan, RenderModel, TextSurface};
pub use segment::{AttributedSegment, AttributedText, flat_text};
pub use value::{InboundValue, parse_segments, serialize_segments};
pub use widget::{ValueChange, ValueChangeCallback, Widget, WidgetState};
