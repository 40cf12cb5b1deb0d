//! Copy-to-clipboard button with a feedback tooltip.
//!
//! Pressing the button opens the tooltip and, when there is text, asks the
//! runtime to write it to the clipboard. The tooltip closes after the
//! feedback delay. Each press carries a sequence number so that the dismiss
//! scheduled by an earlier press cannot close the tooltip of a later one.

use crate::tooltip::{Tooltip, TooltipPlacement};
use areakit_core::{Command, State};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time the feedback tooltip stays open.
pub const DEFAULT_FEEDBACK_MS: u64 = 1600;

/// Tooltip label after copying text.
pub const COPIED_LABEL: &str = "Copied!";

/// Tooltip label when there was nothing to copy.
pub const NOTHING_TO_COPY_LABEL: &str = "Nothing to copy!";

/// Messages for [`CopyButton`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyButtonMessage {
    /// Button pressed
    Press,
    /// Feedback delay elapsed for the given press
    Dismiss {
        /// Sequence number of the press that scheduled the dismiss
        press: u64,
    },
}

/// Copy button state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyButton {
    text: String,
    feedback_ms: u64,
    presses: u64,
    tooltip: Tooltip,
}

impl Default for CopyButton {
    fn default() -> Self {
        Self {
            text: String::new(),
            feedback_ms: DEFAULT_FEEDBACK_MS,
            presses: 0,
            tooltip: Tooltip::new(NOTHING_TO_COPY_LABEL).placement(TooltipPlacement::Top),
        }
    }
}

impl CopyButton {
    /// Create a button that copies `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut button = Self::default();
        button.set_text(text);
        button
    }

    /// Set how long the tooltip stays open.
    #[must_use]
    pub const fn feedback_ms(mut self, ms: u64) -> Self {
        self.feedback_ms = ms;
        self
    }

    /// Replace the text to copy.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.tooltip.set_content(Self::label_for(&self.text));
    }

    /// Text that a press copies.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Feedback delay.
    #[must_use]
    pub const fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Check if the feedback tooltip is showing.
    #[must_use]
    pub const fn is_tooltip_open(&self) -> bool {
        self.tooltip.is_open()
    }

    /// Current tooltip label.
    #[must_use]
    pub fn tooltip_label(&self) -> &str {
        self.tooltip.get_content()
    }

    /// The feedback tooltip.
    #[must_use]
    pub const fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    fn label_for(text: &str) -> &'static str {
        if text.is_empty() {
            NOTHING_TO_COPY_LABEL
        } else {
            COPIED_LABEL
        }
    }
}

impl State for CopyButton {
    type Message = CopyButtonMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            CopyButtonMessage::Press => {
                self.presses += 1;
                self.tooltip.set_open(true);
                let copy = if self.text.is_empty() {
                    Command::None
                } else {
                    Command::copy(self.text.clone())
                };
                Command::batch([
                    copy,
                    Command::after(
                        self.feedback(),
                        CopyButtonMessage::Dismiss {
                            press: self.presses,
                        },
                    ),
                ])
            }
            CopyButtonMessage::Dismiss { press } => {
                if press == self.presses {
                    self.tooltip.set_open(false);
                }
                Command::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        let button = CopyButton::default();
        assert_eq!(button.tooltip_label(), "Nothing to copy!");
        assert!(!button.is_tooltip_open());
        assert_eq!(button.feedback(), Duration::from_millis(1600));
    }

    #[test]
    fn test_press_copies_and_schedules_dismiss() {
        let mut button = CopyButton::new("in(1, 2)");
        let cmd = button.update(CopyButtonMessage::Press);
        assert!(button.is_tooltip_open());
        assert_eq!(button.tooltip_label(), "Copied!");
        assert_eq!(
            cmd.into_leaves(),
            vec![
                Command::copy("in(1, 2)"),
                Command::after(
                    Duration::from_millis(1600),
                    CopyButtonMessage::Dismiss { press: 1 }
                ),
            ]
        );
    }

    #[test]
    fn test_press_with_empty_text_does_not_copy() {
        let mut button = CopyButton::default().feedback_ms(10);
        let cmd = button.update(CopyButtonMessage::Press);
        assert!(button.is_tooltip_open());
        assert_eq!(
            cmd.into_leaves(),
            vec![Command::after(
                Duration::from_millis(10),
                CopyButtonMessage::Dismiss { press: 1 }
            )]
        );
    }

    #[test]
    fn test_dismiss_closes_tooltip() {
        let mut button = CopyButton::new("x");
        button.update(CopyButtonMessage::Press);
        button.update(CopyButtonMessage::Dismiss { press: 1 });
        assert!(!button.is_tooltip_open());
    }

    #[test]
    fn test_stale_dismiss_is_ignored() {
        let mut button = CopyButton::new("x");
        button.update(CopyButtonMessage::Press);
        button.update(CopyButtonMessage::Press);
        button.update(CopyButtonMessage::Dismiss { press: 1 });
        assert!(button.is_tooltip_open());
        button.update(CopyButtonMessage::Dismiss { press: 2 });
        assert!(!button.is_tooltip_open());
    }

    #[test]
    fn test_set_text_updates_label() {
        let mut button = CopyButton::new("a");
        button.set_text("");
        assert_eq!(button.tooltip_label(), "Nothing to copy!");
        assert_eq!(button.text(), "");
    }
}
