//! Areakit: browser toolkit for region-area tables and ObjectID queries.
//!
//! Two pages share one shell:
//! - the region area calculator, which splits multi-region rows into
//!   per-region areas and totals them per region
//! - the ObjectID query builder, which turns a pasted ID list into
//!   `in(...)` filter expressions
//!
//! A command palette (Ctrl+K / Cmd+K) switches between them.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { App } from './areakit.js';
//!
//! async function main() {
//!     await init();
//!     const app = new App('csv_delimiter: ","');
//!     app.listen();
//!     app.set_area_input(textarea.value);
//!     output.innerHTML = app.result_html();
//! }
//! ```
//!
//! # Native Usage
//!
//! ```
//! use areakit::{AppConfig, AppMessage, AppState, BrowserRouter, Runtime};
//! use areakit::{Clipboard, MemoryClipboard};
//!
//! let clipboard = MemoryClipboard::new();
//! let state = AppState::new(AppConfig::default(), "/");
//! let mut runtime = Runtime::new(state, BrowserRouter::new(), Clipboard::memory(clipboard));
//! runtime.dispatch(AppMessage::Navigate("/qgis-query".into()));
//! assert_eq!(runtime.router().pathname(), "/qgis-query");
//! ```

pub use areakit_core::*;
pub use areakit_widgets as widgets;

pub mod app;
pub mod browser;
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod runtime;

pub use app::{AppAction, AppMessage, AppState, Page};
#[cfg(target_arch = "wasm32")]
pub use browser::App;
pub use browser::BrowserRouter;
pub use config::{AppConfig, ConfigError};
pub use runtime::Runtime;
