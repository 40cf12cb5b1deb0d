//! Input events delivered to widgets.

use crate::geometry::Point;
use crate::shortcut::Modifiers;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
        /// Modifier state at the time of the press
        modifiers: Modifiers,
    },
    /// Text input received
    TextInput {
        /// Input text
        text: String,
    },
}

impl Event {
    /// Key press without modifiers.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Key press with modifiers.
    #[must_use]
    pub const fn key_with(key: Key, modifiers: Modifiers) -> Self {
        Self::KeyDown { key, modifiers }
    }
}

/// Keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Letters
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    // Navigation and editing
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl Key {
    const LETTERS: [Self; 26] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
    ];

    /// Letter key for an ASCII letter, case-insensitive.
    #[must_use]
    pub fn from_letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        Self::LETTERS.get(index).copied()
    }

    /// Key for a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Enter),
            "Escape" | "Esc" => Some(Self::Escape),
            "Backspace" => Some(Self::Backspace),
            "Delete" => Some(Self::Delete),
            "Tab" => Some(Self::Tab),
            " " => Some(Self::Space),
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_letter(c),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_letter() {
        assert_eq!(Key::from_letter('k'), Some(Key::K));
        assert_eq!(Key::from_letter('K'), Some(Key::K));
        assert_eq!(Key::from_letter('a'), Some(Key::A));
        assert_eq!(Key::from_letter('z'), Some(Key::Z));
        assert_eq!(Key::from_letter('1'), None);
        assert_eq!(Key::from_letter('é'), None);
    }

    #[test]
    fn test_key_from_dom_key() {
        assert_eq!(Key::from_dom_key("k"), Some(Key::K));
        assert_eq!(Key::from_dom_key("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Space));
        assert_eq!(Key::from_dom_key("Shift"), None);
        assert_eq!(Key::from_dom_key("F1"), None);
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = Event::key_with(Key::K, Modifiers::CTRL);
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
