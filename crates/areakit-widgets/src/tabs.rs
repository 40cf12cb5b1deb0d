//! Tabs for switching between views of the same data.

use areakit_core::{Event, Key};
use serde::{Deserialize, Serialize};

/// A single tab definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Tab ID
    pub id: String,
    /// Tab label
    pub label: String,
    /// Whether tab is disabled
    pub disabled: bool,
}

impl Tab {
    /// Create a new tab.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Set the tab as disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Message emitted when active tab changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabChanged {
    /// ID of the newly active tab
    pub tab_id: String,
    /// Index of the newly active tab
    pub index: usize,
}

/// Ordered tabs with one active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tabs {
    items: Vec<Tab>,
    active: usize,
}

impl Tabs {
    /// Create an empty tab list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab.
    #[must_use]
    pub fn tab(mut self, tab: Tab) -> Self {
        self.items.push(tab);
        self
    }

    /// Add multiple tabs.
    #[must_use]
    pub fn tabs(mut self, tabs: impl IntoIterator<Item = Tab>) -> Self {
        self.items.extend(tabs);
        self
    }

    /// Get tab count.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.items.len()
    }

    /// Get the tabs.
    #[must_use]
    pub fn get_tabs(&self) -> &[Tab] {
        &self.items
    }

    /// Get active tab index.
    #[must_use]
    pub const fn get_active(&self) -> usize {
        self.active
    }

    /// Get active tab ID.
    #[must_use]
    pub fn get_active_id(&self) -> Option<&str> {
        self.items.get(self.active).map(|t| t.id.as_str())
    }

    /// Check if a tab is active.
    #[must_use]
    pub const fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    /// Check if tabs are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Activate a tab, reporting the change.
    ///
    /// Out-of-range, disabled and already active tabs are ignored.
    pub fn select(&mut self, index: usize) -> Option<TabChanged> {
        let tab = self.items.get(index)?;
        if tab.disabled || index == self.active {
            return None;
        }
        self.active = index;
        Some(TabChanged {
            tab_id: tab.id.clone(),
            index,
        })
    }

    /// Activate a tab by ID, reporting the change.
    pub fn select_id(&mut self, id: &str) -> Option<TabChanged> {
        let index = self.items.iter().position(|t| t.id == id)?;
        self.select(index)
    }

    /// Navigate to next enabled tab, wrapping around.
    pub fn next_tab(&mut self) -> Option<TabChanged> {
        let len = self.items.len();
        let index = (1..len)
            .map(|step| (self.active + step) % len)
            .find(|&i| !self.items[i].disabled)?;
        self.select(index)
    }

    /// Navigate to previous enabled tab, wrapping around.
    pub fn prev_tab(&mut self) -> Option<TabChanged> {
        let len = self.items.len();
        let index = (1..len)
            .map(|step| (self.active + len - step) % len)
            .find(|&i| !self.items[i].disabled)?;
        self.select(index)
    }

    /// Handle arrow key navigation.
    pub fn handle_event(&mut self, event: &Event) -> Option<TabChanged> {
        match event {
            Event::KeyDown {
                key: Key::Right, ..
            } => self.next_tab(),
            Event::KeyDown { key: Key::Left, .. } => self.prev_tab(),
            _ => None,
        }
    }
}
