//! Keyboard shortcuts.
//!
//! This module provides:
//! - Modifier key state (Ctrl, Alt, Shift, Meta)
//! - Shortcuts where Ctrl and Meta are interchangeable (Ctrl on Linux/Windows, Cmd on Mac)
//! - A small registry resolving key events to application actions

use crate::event::{Event, Key};
use serde::{Deserialize, Serialize};

/// Modifier keys for keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Alt key (Option on Mac).
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
    /// Meta key (Windows key, Cmd on Mac).
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Meta only.
    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    /// Create custom modifiers.
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }

    /// Ctrl or Meta is held.
    pub const fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// How a shortcut treats the modifier state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierRule {
    /// Modifiers must match exactly.
    Exact(Modifiers),
    /// Ctrl or Meta must be held; Alt and Shift must not.
    Primary,
}

/// A keyboard shortcut (key + modifier rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shortcut {
    /// The key.
    pub key: Key,
    /// Modifier rule.
    pub rule: ModifierRule,
}

impl Shortcut {
    /// Create a shortcut with exact modifiers.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            rule: ModifierRule::Exact(modifiers),
        }
    }

    /// Create a shortcut fired by Ctrl+key or Meta+key.
    pub const fn primary(key: Key) -> Self {
        Self {
            key,
            rule: ModifierRule::Primary,
        }
    }

    /// Check a key press against this shortcut.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        if key != self.key {
            return false;
        }
        match self.rule {
            ModifierRule::Exact(expected) => modifiers == expected,
            ModifierRule::Primary => modifiers.primary() && !modifiers.alt && !modifiers.shift,
        }
    }

    /// Check an event against this shortcut.
    pub fn matches_event(&self, event: &Event) -> bool {
        match event {
            Event::KeyDown { key, modifiers } => self.matches(*key, *modifiers),
            _ => false,
        }
    }
}

/// A registered binding.
#[derive(Debug, Clone)]
pub struct ShortcutBinding<A> {
    /// Shortcut that fires the action.
    pub shortcut: Shortcut,
    /// Action identifier.
    pub action: A,
    /// Human-readable description.
    pub description: String,
}

/// Registry of global shortcuts.
///
/// Bindings are checked in registration order; the first match wins.
#[derive(Debug, Clone)]
pub struct ShortcutMap<A> {
    bindings: Vec<ShortcutBinding<A>>,
}

impl<A> Default for ShortcutMap<A> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<A> ShortcutMap<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shortcut.
    pub fn register(&mut self, shortcut: Shortcut, action: A, description: impl Into<String>) {
        self.bindings.push(ShortcutBinding {
            shortcut,
            action,
            description: description.into(),
        });
    }

    /// Resolve an event to the first matching action.
    pub fn resolve(&self, event: &Event) -> Option<&A> {
        self.bindings
            .iter()
            .find(|binding| binding.shortcut.matches_event(event))
            .map(|binding| &binding.action)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
