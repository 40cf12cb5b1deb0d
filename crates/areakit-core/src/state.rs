//! State management for Areakit views.
//!
//! Views follow the Elm Architecture: `State + Message → (State, Command)`.
//! A view-model owns all of its UI state explicitly; side effects are
//! described as [`Command`]s and executed by the application runtime.
//!
//! # Examples
//!
//! ```
//! use areakit_core::{Command, State};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct SearchState {
//!     query: String,
//! }
//!
//! enum SearchMessage {
//!     SetQuery(String),
//!     Clear,
//! }
//!
//! impl State for SearchState {
//!     type Message = SearchMessage;
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         match msg {
//!             SearchMessage::SetQuery(q) => self.query = q,
//!             SearchMessage::Clear => self.query.clear(),
//!         }
//!         Command::None
//!     }
//! }
//!
//! let mut state = SearchState::default();
//! state.update(SearchMessage::SetQuery("alp".into()));
//! assert_eq!(state.query, "alp");
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// View state trait.
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects (clipboard writes, navigation, timers).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}

/// Commands for side effects.
#[derive(Debug, PartialEq)]
pub enum Command<M> {
    /// No command
    None,
    /// Execute multiple commands
    Batch(Vec<Command<M>>),
    /// Navigate to a route
    Navigate {
        /// Route path
        route: String,
    },
    /// Write text to the clipboard (best effort, result not reported back)
    CopyToClipboard {
        /// Text to copy
        text: String,
    },
    /// Deliver a message after a delay
    After {
        /// Delay before delivery
        delay: Duration,
        /// Message to deliver
        message: M,
    },
}

impl<M> Default for Command<M> {
    fn default() -> Self {
        Self::None
    }
}

impl<M> Command<M> {
    /// Create a batch of commands, dropping `None`s.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        let commands: Vec<Self> = commands.into_iter().filter(|c| !c.is_none()).collect();
        if commands.is_empty() {
            Self::None
        } else {
            Self::Batch(commands)
        }
    }

    /// Navigation command.
    pub fn navigate(route: impl Into<String>) -> Self {
        Self::Navigate {
            route: route.into(),
        }
    }

    /// Clipboard write command.
    pub fn copy(text: impl Into<String>) -> Self {
        Self::CopyToClipboard { text: text.into() }
    }

    /// Delayed message command.
    pub const fn after(delay: Duration, message: M) -> Self {
        Self::After { delay, message }
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Map the message type using a function.
    pub fn map<N, F>(self, f: F) -> Command<N>
    where
        F: Fn(M) -> N,
    {
        self.map_inner(&f)
    }

    fn map_inner<N, F>(self, f: &F) -> Command<N>
    where
        F: Fn(M) -> N,
    {
        match self {
            Self::None => Command::None,
            Self::Batch(cmds) => Command::Batch(cmds.into_iter().map(|c| c.map_inner(f)).collect()),
            Self::Navigate { route } => Command::Navigate { route },
            Self::CopyToClipboard { text } => Command::CopyToClipboard { text },
            Self::After { delay, message } => Command::After {
                delay,
                message: f(message),
            },
        }
    }

    /// Flatten nested batches into a list of leaf commands.
    pub fn into_leaves(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::into_leaves).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Inner {
        Tick,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Outer {
        Wrapped(Inner),
    }

    #[test]
    fn test_command_default_is_none() {
        let cmd: Command<Inner> = Command::default();
        assert!(cmd.is_none());
    }

    #[test]
    fn test_batch_drops_none() {
        let cmd: Command<Inner> = Command::batch([Command::None, Command::None]);
        assert!(cmd.is_none());

        let cmd: Command<Inner> = Command::batch([Command::None, Command::copy("x")]);
        assert_eq!(cmd, Command::Batch(vec![Command::copy("x")]));
    }

    #[test]
    fn test_map_wraps_delayed_messages() {
        let cmd = Command::batch([
            Command::copy("csv"),
            Command::after(Duration::from_millis(1600), Inner::Tick),
            Command::navigate("/qgis-query"),
        ]);
        let mapped = cmd.map(Outer::Wrapped);
        assert_eq!(
            mapped.into_leaves(),
            vec![
                Command::copy("csv"),
                Command::after(Duration::from_millis(1600), Outer::Wrapped(Inner::Tick)),
                Command::navigate("/qgis-query"),
            ]
        );
    }

    #[test]
    fn test_into_leaves_flattens_nested_batches() {
        let cmd: Command<Inner> = Command::Batch(vec![
            Command::Batch(vec![Command::copy("a"), Command::None]),
            Command::copy("b"),
        ]);
        assert_eq!(
            cmd.into_leaves(),
            vec![Command::copy("a"), Command::copy("b")]
        );
    }
}
