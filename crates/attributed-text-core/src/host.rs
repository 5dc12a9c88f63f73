//! Interface between the widget and the form that hosts it.
//!
//! The form collects a [`Submission`] from each of its fields through [`FormField::submit`]
//! and sends them to its backend; transport and persistence stay on the form side.

use crate::author::Author;
use crate::error::Result;
use crate::widget::Widget;
use serde::Serialize;

/// Context passed by the form when it submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitContext {
    /// Identifier of the case record being saved.
    pub case_id: u64,
    /// Author performing the submission.
    pub submitted_by: Author,
}

/// Characters attributed to one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// The author.
    pub user: Author,
    /// Number of characters.
    pub chars: usize,
}

/// Payload produced by a field on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Case the value belongs to.
    pub case_id: u64,
    /// Form field name.
    pub field: String,
    /// Serialized segment list.
    pub value: String,
    /// Flat text, for consumers that ignore attribution.
    pub flat_text: String,
    /// Per-author character counts.
    pub contributions: Vec<Contribution>,
    /// Author performing the submission.
    pub submitted_by: Author,
}

/// A form field the host can pull a value from.
pub trait FormField {
    /// Name of the field inside the form.
    fn field_name(&self) -> &str;

    /// Current serialized value.
    fn value(&self) -> Result<String>;

    /// Build the payload for a submission.
    fn submit(&self, context: &SubmitContext) -> Result<Submission>;
}

impl FormField for Widget {
    fn field_name(&self) -> &str {
        &self.config().field
    }

    fn value(&self) -> Result<String> {
        Widget::value(self)
    }

    fn submit(&self, context: &SubmitContext) -> Result<Submission> {
        let contributions = self
            .text()
            .contributions()
            .into_iter()
            .map(|(user, chars)| Contribution { user, chars })
            .collect();
        let submission = Submission {
            case_id: context.case_id,
            field: self.field_name().to_string(),
            value: Widget::value(self)?,
            flat_text: self.flat_text(),
            contributions,
            submitted_by: context.submitted_by.clone(),
        };
        log::info!(
            "submitting field '{}' for case {} ({} chars)",
            submission.field,
            submission.case_id,
            self.text().char_len()
        );
        Ok(submission)
    }
}
