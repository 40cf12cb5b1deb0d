//! ObjectID query builder.
//!
//! Turns a pasted list of IDs into `in(...)` filter expressions, one for
//! numeric ID columns and one for text ID columns. IDs are passed through
//! verbatim; nothing checks that they are numbers.

use crate::copy_button::{CopyButton, CopyButtonMessage};
use crate::text;
use areakit_core::{Command, State};
use serde::{Deserialize, Serialize};

/// Placeholder list used to derive the output placeholders.
const PLACEHOLDER_IDS: &str = "1\n2\n3\n4\n…";

/// Placeholder shown in the ID input.
pub const INPUT_PLACEHOLDER: &str = "1\n2\n3\n4\n⋮";

/// Split pasted text on runs of commas and whitespace.
///
/// Surrounding whitespace is trimmed first. Empty text yields one empty ID.
pub fn process_ids_text(text: &str) -> Vec<&str> {
    text::split_id_list(text::trim(text))
}

/// `in(1, 2, 3)`
pub fn make_numeric_query<S: AsRef<str>>(ids: &[S]) -> String {
    let joined = ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
    format!("in({joined})")
}

/// `in('1', '2', '3')`
pub fn make_string_query<S: AsRef<str>>(ids: &[S]) -> String {
    let joined = ids
        .iter()
        .map(|id| format!("'{}'", id.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("in({joined})")
}

/// Messages for [`QgisQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QgisQueryMessage {
    /// The ID text changed
    SetInput(String),
    /// Numeric output copy button message
    CopyNumeric(CopyButtonMessage),
    /// String output copy button message
    CopyString(CopyButtonMessage),
}

/// One labelled read-only output with its copy button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputField {
    label: String,
    value: Option<String>,
    placeholder: String,
    copy_button: CopyButton,
}

impl OutputField {
    fn new(label: &str, placeholder: String, feedback_ms: u64) -> Self {
        Self {
            label: label.to_string(),
            value: None,
            placeholder,
            copy_button: CopyButton::default().feedback_ms(feedback_ms),
        }
    }

    fn set_value(&mut self, value: Option<String>) {
        self.copy_button
            .set_text(value.clone().unwrap_or_default());
        self.value = value;
    }

    /// Field label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Query text, absent while the input is empty.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Placeholder shown while there is no value.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The field's copy button.
    #[must_use]
    pub const fn copy_button(&self) -> &CopyButton {
        &self.copy_button
    }
}

/// ObjectID query view-model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QgisQuery {
    input: Option<String>,
    numeric: OutputField,
    string: OutputField,
}

impl Default for QgisQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl QgisQuery {
    /// Create an empty query builder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_feedback_ms(crate::copy_button::DEFAULT_FEEDBACK_MS)
    }

    /// Create with a custom copy feedback delay.
    #[must_use]
    pub fn with_feedback_ms(feedback_ms: u64) -> Self {
        let ids = process_ids_text(PLACEHOLDER_IDS);
        Self {
            input: None,
            numeric: OutputField::new("Numeric", make_numeric_query(&ids), feedback_ms),
            string: OutputField::new("String", make_string_query(&ids), feedback_ms),
        }
    }

    /// Raw ID text, absent until the user types.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Placeholder for the ID input.
    #[must_use]
    pub const fn input_placeholder(&self) -> &'static str {
        INPUT_PLACEHOLDER
    }

    /// Numeric output field.
    #[must_use]
    pub const fn numeric(&self) -> &OutputField {
        &self.numeric
    }

    /// String output field.
    #[must_use]
    pub const fn string(&self) -> &OutputField {
        &self.string
    }

    fn recompute(&mut self) {
        let ids = self
            .input
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(process_ids_text);
        self.numeric
            .set_value(ids.as_deref().map(make_numeric_query));
        self.string.set_value(ids.as_deref().map(make_string_query));
    }
}

impl State for QgisQuery {
    type Message = QgisQueryMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            QgisQueryMessage::SetInput(text) => {
                self.input = Some(text);
                self.recompute();
                Command::None
            }
            QgisQueryMessage::CopyNumeric(msg) => self
                .numeric
                .copy_button
                .update(msg)
                .map(QgisQueryMessage::CopyNumeric),
            QgisQueryMessage::CopyString(msg) => self
                .string
                .copy_button
                .update(msg)
                .map(QgisQueryMessage::CopyString),
        }
    }
}
