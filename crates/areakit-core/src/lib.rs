//! Core types and traits for the Areakit browser toolkit.
//!
//! This crate provides foundational types used throughout Areakit:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Events and keyboard shortcuts: [`Event`], [`Key`], [`Shortcut`]
//! - Tabular data: [`Table`], [`Header`], [`CellValue`], [`export_csv`]
//! - Lenient number handling: [`number::parse_float`], [`number::format_number`]
//! - Clipboard access: [`Clipboard`], [`ClipboardBackend`]
//! - Elm-style state: [`State`], [`Command`]

pub mod clipboard;
mod error;
mod event;
mod geometry;
pub mod number;
pub mod shortcut;
mod state;
pub mod table;

pub use clipboard::{
    Clipboard, ClipboardBackend, ClipboardResult, MemoryClipboard, UnavailableClipboard,
};
pub use error::TableError;
pub use event::{Event, Key};
pub use geometry::{Point, Rect, Size};
pub use shortcut::{ModifierRule, Modifiers, Shortcut, ShortcutBinding, ShortcutMap};
pub use state::{Command, State};
pub use table::{escape_html, export_csv, CellValue, Header, Table, TableRecord, TableRow};
