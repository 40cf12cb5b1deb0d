//! Command palette: a searchable list of actions shown in a modal.
//!
//! The palette filters its items by a plain substring match, highlights one
//! result for keyboard navigation and reports the chosen item's ID. Opening
//! and closing is driven by the caller (usually through a global shortcut);
//! closing always clears the query.

use areakit_core::{Event, Key, Point, Rect};
use serde::{Deserialize, Serialize};

/// Placeholder shown in the search input.
pub const SEARCH_PLACEHOLDER: &str = "Search...";

/// Text shown when a query matches nothing.
pub const NO_RESULTS_TEXT: &str = "No results found";

/// An entry in the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPaletteItem {
    /// Value reported on activation
    pub id: String,
    /// Display name, matched case-insensitively
    pub name: String,
    /// Optional description, matched as written
    pub description: Option<String>,
}

impl CommandPaletteItem {
    /// Create an item without a description.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the item against an already lower-cased query.
    ///
    /// The name is lower-cased before matching; the description is not, so
    /// descriptions only match where they are written in lower case.
    #[must_use]
    pub fn matches(&self, lowered_query: &str) -> bool {
        self.name.to_lowercase().contains(lowered_query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.contains(lowered_query))
    }
}

/// Filter items by query, keeping their order.
///
/// An absent or empty query returns every item.
pub fn filter_items<'a>(
    items: &'a [CommandPaletteItem],
    query: Option<&str>,
) -> Vec<&'a CommandPaletteItem> {
    match query {
        None | Some("") => items.iter().collect(),
        Some(query) => {
            let lowered = query.to_lowercase();
            items.iter().filter(|item| item.matches(&lowered)).collect()
        }
    }
}

/// Reason the palette was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Closed via escape key
    Escape,
    /// Closed via backdrop click
    Backdrop,
    /// Closed via the toggle shortcut
    Toggle,
    /// Closed because an item was activated
    Activated,
}

/// Message emitted when an item is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteActivated {
    /// ID of the chosen item
    pub id: String,
}

/// Outcome of an event delivered to the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutput {
    /// The palette closed without a choice
    Closed(CloseReason),
    /// An item was chosen; the palette is now closed
    Activated(PaletteActivated),
}

/// Command palette state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandPalette {
    items: Vec<CommandPaletteItem>,
    open: bool,
    query: String,
    active: usize,
    /// Dialog bounds; clicks outside close the palette
    #[serde(skip)]
    content_bounds: Rect,
}

impl CommandPalette {
    /// Create a closed palette over `items`.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = CommandPaletteItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }

    /// All items.
    #[must_use]
    pub fn items(&self) -> &[CommandPaletteItem] {
        &self.items
    }

    /// Check if the palette is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Index of the highlighted result.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Items matching the current query.
    #[must_use]
    pub fn results(&self) -> Vec<&CommandPaletteItem> {
        filter_items(&self.items, Some(&self.query))
    }

    /// Highlighted result, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<&CommandPaletteItem> {
        self.results().get(self.active).copied()
    }

    /// Whether to show the "no results" notice.
    #[must_use]
    pub fn shows_no_results(&self) -> bool {
        !self.query.is_empty() && self.results().is_empty()
    }

    /// Set the dialog bounds used for backdrop hit testing.
    pub fn set_content_bounds(&mut self, bounds: Rect) {
        self.content_bounds = bounds;
    }

    /// Open the palette.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the palette and clear its query.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.active = 0;
    }

    /// Open if closed, close if open.
    ///
    /// Returns the close reason when this closed the palette.
    pub fn toggle(&mut self) -> Option<PaletteOutput> {
        if self.open {
            self.close();
            Some(PaletteOutput::Closed(CloseReason::Toggle))
        } else {
            self.open();
            None
        }
    }

    /// Replace the query and highlight the first result.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.active = 0;
    }

    /// Move the highlight down, wrapping.
    pub fn select_next(&mut self) {
        let count = self.results().len();
        if count > 0 {
            self.active = (self.active + 1) % count;
        }
    }

    /// Move the highlight up, wrapping.
    pub fn select_prev(&mut self) {
        let count = self.results().len();
        if count > 0 {
            self.active = (self.active + count - 1) % count;
        }
    }

    /// Choose the result at `index` and close.
    pub fn activate(&mut self, index: usize) -> Option<PaletteActivated> {
        let id = self.results().get(index)?.id.clone();
        self.close();
        tracing::debug!(%id, "palette item activated");
        Some(PaletteActivated { id })
    }

    /// Handle an input event while open.
    pub fn handle_event(&mut self, event: &Event) -> Option<PaletteOutput> {
        if !self.open {
            return None;
        }

        match event {
            Event::KeyDown {
                key: Key::Escape, ..
            } => {
                self.close();
                Some(PaletteOutput::Closed(CloseReason::Escape))
            }
            Event::KeyDown { key: Key::Down, .. } => {
                self.select_next();
                None
            }
            Event::KeyDown { key: Key::Up, .. } => {
                self.select_prev();
                None
            }
            Event::KeyDown {
                key: Key::Enter, ..
            } => self.activate(self.active).map(PaletteOutput::Activated),
            Event::KeyDown {
                key: Key::Backspace,
                ..
            } => {
                let mut query = std::mem::take(&mut self.query);
                query.pop();
                self.set_query(query);
                None
            }
            Event::TextInput { text } => {
                let query = format!("{}{text}", self.query);
                self.set_query(query);
                None
            }
            Event::MouseDown { position } if !self.hits_content(*position) => {
                self.close();
                Some(PaletteOutput::Closed(CloseReason::Backdrop))
            }
            _ => None,
        }
    }

    fn hits_content(&self, position: Point) -> bool {
        self.content_bounds.contains_point(&position)
    }
}
