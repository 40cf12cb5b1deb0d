//! Browser event handling - converts DOM keyboard events to Areakit events.

use areakit_core::{Event, Key, Modifiers};
use web_sys::KeyboardEvent;

/// Modifier state of a keyboard event.
pub fn modifiers(event: &KeyboardEvent) -> Modifiers {
    Modifiers::new(
        event.ctrl_key(),
        event.alt_key(),
        event.shift_key(),
        event.meta_key(),
    )
}

/// Convert a `keydown` event; keys Areakit does not know yield `None`.
pub fn keyboard_event_to_areakit(event: &KeyboardEvent) -> Option<Event> {
    let key = Key::from_dom_key(&event.key())?;
    Some(Event::key_with(key, modifiers(event)))
}
