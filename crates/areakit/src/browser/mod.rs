//! Browser runtime for Areakit WASM applications.
//!
//! This module bridges the application view-model to the DOM: routing,
//! clipboard access and keyboard input.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod clipboard;
#[cfg(target_arch = "wasm32")]
pub mod events;

// Cross-platform modules
pub mod router;

#[cfg(target_arch = "wasm32")]
pub use app::App;
#[cfg(target_arch = "wasm32")]
pub use clipboard::{browser_clipboard, ExecCommandClipboard, NavigatorClipboard};
pub use router::{normalize_path, BrowserRouter};
