//! Clipboard abstraction for copy operations.
//!
//! This module provides:
//! - A [`ClipboardBackend`] trait implemented per platform
//! - An in-memory backend for native builds and tests
//! - A [`Clipboard`] that tries backends in order until one succeeds
//!
//! Copying is best effort: callers learn whether some backend accepted the
//! text, never why the others refused.

use std::sync::{Arc, RwLock};

/// Result of a clipboard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardResult {
    /// Operation succeeded.
    Success,
    /// Clipboard is not available.
    Unavailable,
    /// Permission denied.
    PermissionDenied,
    /// Other error.
    Error(String),
}

impl ClipboardResult {
    /// Check if operation was successful.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// A platform clipboard.
pub trait ClipboardBackend {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Write plain text.
    fn write_text(&self, text: &str) -> ClipboardResult;
}

/// In-memory clipboard.
///
/// Clones share the same storage, so a test can keep a handle while the
/// runtime owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<RwLock<Vec<String>>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently written text.
    pub fn text(&self) -> Option<String> {
        self.writes
            .read()
            .ok()
            .and_then(|writes| writes.last().cloned())
    }

    /// Every text written so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.writes
            .read()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write_text(&self, text: &str) -> ClipboardResult {
        match self.writes.write() {
            Ok(mut writes) => {
                writes.push(text.to_string());
                ClipboardResult::Success
            }
            Err(_) => ClipboardResult::Error("Lock error".to_string()),
        }
    }
}

/// Clipboard that refuses every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl ClipboardBackend for UnavailableClipboard {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn write_text(&self, _text: &str) -> ClipboardResult {
        ClipboardResult::Unavailable
    }
}

/// Ordered chain of clipboard backends.
#[derive(Default)]
pub struct Clipboard {
    backends: Vec<Box<dyn ClipboardBackend>>,
}

impl Clipboard {
    /// Create a clipboard with no backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard backed by a single in-memory store.
    pub fn memory(store: MemoryClipboard) -> Self {
        Self::new().with_backend(store)
    }

    /// Append a backend; earlier backends are tried first.
    #[must_use]
    pub fn with_backend(mut self, backend: impl ClipboardBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    /// Write text through the first backend that accepts it.
    ///
    /// Returns `true` when some backend reported success.
    pub fn write_text(&self, text: &str) -> bool {
        for backend in &self.backends {
            let result = backend.write_text(text);
            if result.is_success() {
                tracing::debug!(backend = backend.name(), bytes = text.len(), "copied to clipboard");
                return true;
            }
            tracing::debug!(backend = backend.name(), failure = ?result, "clipboard backend failed");
        }
        tracing::warn!(backends = self.backends.len(), "no clipboard backend accepted the text");
        false
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field(
                "backends",
                &self.backends.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
