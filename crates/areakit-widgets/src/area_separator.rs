//! Region area calculator view-model.
//!
//! Holds the pasted text and the two derived table views. Every input change
//! reruns the whole pipeline from the text; no derived state survives it.

use crate::data_view::{TableDataInput, TableDataView, TableDataViewMessage};
use crate::region_area::{
    expand_regions, intermediate_table, parse_raw_input, result_table, sum_region_areas,
    ExpandedRow, ResultRow, SAMPLE_INPUT,
};
use crate::text;
use areakit_core::{Command, State};
use serde::{Deserialize, Serialize};

/// Page title.
pub const TITLE: &str = "Region Area Calculator";

/// Messages for [`AreaSeparator`].
#[derive(Debug, Clone, PartialEq)]
pub enum AreaSeparatorMessage {
    /// The input text changed
    SetInput(String),
    /// Message for the result table view
    Output(TableDataViewMessage),
    /// Message for the intermediate table view
    Intermediate(TableDataViewMessage),
}

/// Options for building an [`AreaSeparator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaSeparatorOptions {
    /// Start with [`SAMPLE_INPUT`] instead of empty text
    pub load_sample: bool,
    /// CSV delimiter for both tables
    pub delimiter: String,
    /// Copy tooltip duration in milliseconds
    pub feedback_ms: u64,
}

impl Default for AreaSeparatorOptions {
    fn default() -> Self {
        Self {
            load_sample: true,
            delimiter: ",".to_string(),
            feedback_ms: crate::copy_button::DEFAULT_FEEDBACK_MS,
        }
    }
}

/// Region area calculator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeparator {
    data: String,
    input: TableDataInput,
    expanded: Vec<ExpandedRow>,
    results: Vec<ResultRow>,
    output: TableDataView,
    intermediate: TableDataView,
}

impl Default for AreaSeparator {
    fn default() -> Self {
        Self::new(&AreaSeparatorOptions::default())
    }
}

impl AreaSeparator {
    /// Create the calculator.
    #[must_use]
    pub fn new(options: &AreaSeparatorOptions) -> Self {
        let view = |label: &str| {
            TableDataView::new(label)
                .delimiter(options.delimiter.clone())
                .feedback_ms(options.feedback_ms)
        };
        let mut separator = Self {
            data: String::new(),
            input: TableDataInput::new(),
            expanded: Vec::new(),
            results: Vec::new(),
            output: view("Output"),
            intermediate: view("Intermediate"),
        };
        let initial = if options.load_sample { SAMPLE_INPUT } else { "" };
        separator.set_data(initial.to_string());
        separator
    }

    fn set_data(&mut self, data: String) {
        let input = parse_raw_input(&data);
        self.expanded = expand_regions(&input.rows);
        self.results = sum_region_areas(&self.expanded);
        self.intermediate.set_table(intermediate_table(&self.expanded));
        self.output.set_table(result_table(&self.results));
        self.input.set_value(text::trim(&data));
        self.data = data;
    }

    /// Raw text as last entered.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The input box (shows the trimmed text).
    #[must_use]
    pub const fn input(&self) -> &TableDataInput {
        &self.input
    }

    /// Per-region contributions.
    #[must_use]
    pub fn expanded(&self) -> &[ExpandedRow] {
        &self.expanded
    }

    /// Per-region totals.
    #[must_use]
    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    /// Result table view.
    #[must_use]
    pub const fn output(&self) -> &TableDataView {
        &self.output
    }

    /// Intermediate table view.
    #[must_use]
    pub const fn intermediate(&self) -> &TableDataView {
        &self.intermediate
    }
}

impl State for AreaSeparator {
    type Message = AreaSeparatorMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            AreaSeparatorMessage::SetInput(text) => {
                self.set_data(text);
                Command::None
            }
            AreaSeparatorMessage::Output(msg) => {
                self.output.update(msg).map(AreaSeparatorMessage::Output)
            }
            AreaSeparatorMessage::Intermediate(msg) => self
                .intermediate
                .update(msg)
                .map(AreaSeparatorMessage::Intermediate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy_button::CopyButtonMessage;

    #[test]
    fn test_starts_with_sample() {
        let separator = AreaSeparator::default();
        assert_eq!(separator.input().value(), text::trim(SAMPLE_INPUT));
        assert_eq!(separator.expanded().len(), 15);
        assert_eq!(separator.results().len(), 7);
        assert!(separator
            .output()
            .csv()
            .starts_with("Region,Total Area (Ha)\n1.11.2a,"));
    }

    #[test]
    fn test_starts_empty_without_sample() {
        let separator = AreaSeparator::new(&AreaSeparatorOptions {
            load_sample: false,
            ..AreaSeparatorOptions::default()
        });
        assert_eq!(separator.data(), "");
        assert!(separator.results().is_empty());
        assert_eq!(separator.output().csv(), "Region,Total Area (Ha)");
    }

    #[test]
    fn test_set_input_recomputes() {
        let mut separator = AreaSeparator::default();
        separator.update(AreaSeparatorMessage::SetInput(
            "RE P A\n1.11.8 100 0.10\n1.11.8 100 0.05\n".to_string(),
        ));
        assert_eq!(separator.results().len(), 1);
        assert_eq!(separator.input().value(), "RE P A\n1.11.8 100 0.10\n1.11.8 100 0.05");
        assert_eq!(
            separator.intermediate().csv(),
            "Region,Row Number,Total Area (Ha),Proportion,Region Area (Ha)\n\
             1.11.8,1,0.1,100,0.1\n\
             1.11.8,2,0.05,100,0.05"
        );
    }

    #[test]
    fn test_delimiter_option() {
        let separator = AreaSeparator::new(&AreaSeparatorOptions {
            delimiter: "\t".to_string(),
            ..AreaSeparatorOptions::default()
        });
        assert!(separator.output().csv().starts_with("Region\tTotal Area (Ha)"));
    }

    #[test]
    fn test_copy_output_csv() {
        let mut separator = AreaSeparator::default();
        let csv = separator.output().csv().to_string();
        let cmd = separator.update(AreaSeparatorMessage::Output(TableDataViewMessage::Copy(
            CopyButtonMessage::Press,
        )));
        assert_eq!(cmd.into_leaves()[0], Command::copy(csv));
    }

    #[test]
    fn test_state_serializes() {
        let separator = AreaSeparator::default();
        let json = serde_json::to_string(&separator).unwrap();
        let back: AreaSeparator = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data(), separator.data());
        assert_eq!(
            back.results().iter().map(|r| &r.region).collect::<Vec<_>>(),
            separator.results().iter().map(|r| &r.region).collect::<Vec<_>>()
        );
    }
}
