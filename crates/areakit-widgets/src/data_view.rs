//! Labelled table view with Table/CSV tabs and a CSV copy button, plus the
//! matching labelled text input.

use crate::copy_button::{CopyButton, CopyButtonMessage};
use crate::tabs::{Tab, TabChanged, Tabs};
use areakit_core::{Command, Event, State, Table};
use serde::{Deserialize, Serialize};

/// Tab ID of the rendered table.
pub const TABLE_TAB: &str = "table";
/// Tab ID of the CSV text.
pub const CSV_TAB: &str = "csv";

/// Messages for [`TableDataView`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableDataViewMessage {
    /// Activate a tab by index
    SelectTab(usize),
    /// Keyboard event on the tab list
    TabKey(Event),
    /// Copy button message
    Copy(CopyButtonMessage),
}

/// A table with its CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDataView {
    label: String,
    table: Table,
    delimiter: String,
    csv: String,
    tabs: Tabs,
    copy_button: CopyButton,
}

impl TableDataView {
    /// Create a view with a label and an empty table.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            table: Table::default(),
            delimiter: ",".to_string(),
            csv: String::new(),
            tabs: Tabs::new().tabs([Tab::new(TABLE_TAB, "Table"), Tab::new(CSV_TAB, "CSV")]),
            copy_button: CopyButton::default(),
        }
    }

    /// Set the CSV delimiter.
    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self.refresh_csv();
        self
    }

    /// Set how long the copy tooltip stays open.
    #[must_use]
    pub fn feedback_ms(mut self, ms: u64) -> Self {
        self.copy_button = self.copy_button.feedback_ms(ms);
        self
    }

    /// Replace the table and recompute its CSV.
    pub fn set_table(&mut self, table: Table) {
        self.table = table;
        self.refresh_csv();
    }

    fn refresh_csv(&mut self) {
        self.csv = self.table.to_csv(&self.delimiter);
        self.copy_button.set_text(self.csv.clone());
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Get the CSV text.
    #[must_use]
    pub fn csv(&self) -> &str {
        &self.csv
    }

    /// Table rendered as HTML.
    #[must_use]
    pub fn html(&self) -> String {
        self.table.to_html()
    }

    /// Get the tabs.
    #[must_use]
    pub const fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    /// Check if the CSV tab is showing.
    #[must_use]
    pub fn is_showing_csv(&self) -> bool {
        self.tabs.get_active_id() == Some(CSV_TAB)
    }

    /// Get the copy button.
    #[must_use]
    pub const fn copy_button(&self) -> &CopyButton {
        &self.copy_button
    }

    fn log_tab(&self, changed: Option<TabChanged>) {
        if let Some(changed) = changed {
            tracing::trace!(view = %self.label, tab = %changed.tab_id, "tab changed");
        }
    }
}

impl State for TableDataView {
    type Message = TableDataViewMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            TableDataViewMessage::SelectTab(index) => {
                let changed = self.tabs.select(index);
                self.log_tab(changed);
                Command::None
            }
            TableDataViewMessage::TabKey(event) => {
                let changed = self.tabs.handle_event(&event);
                self.log_tab(changed);
                Command::None
            }
            TableDataViewMessage::Copy(msg) => {
                self.copy_button.update(msg).map(TableDataViewMessage::Copy)
            }
        }
    }
}

/// Labelled multi-line text input for pasted table data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDataInput {
    label: String,
    value: String,
    placeholder: String,
}

impl Default for TableDataInput {
    fn default() -> Self {
        Self {
            label: "Input".to_string(),
            value: String::new(),
            placeholder: "...".to_string(),
        }
    }
}

impl TableDataInput {
    /// Create an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the displayed value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the placeholder.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace the displayed value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}
