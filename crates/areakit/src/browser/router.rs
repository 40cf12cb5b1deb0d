//! Browser router with History API integration.
//!
//! On `wasm32` the router reads and writes `window.location` and
//! `window.history`; moving back and forward is left to the browser, which
//! reports it through `popstate`. Elsewhere it keeps an in-memory list of
//! entries so the application can be driven from native tests.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;

/// Browser router that uses the History API.
#[derive(Debug)]
pub struct BrowserRouter {
    #[cfg(not(target_arch = "wasm32"))]
    state: Mutex<HistoryState>,
}

impl Default for BrowserRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl HistoryState {
    fn current(&self) -> String {
        self.entries
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }
}

impl BrowserRouter {
    /// Create a router starting at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    /// Create a router whose in-memory history starts at `path`.
    ///
    /// In the browser the starting point is the page URL and `path` is ignored.
    #[must_use]
    pub fn starting_at(path: &str) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = path;
            Self {}
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                state: Mutex::new(HistoryState {
                    entries: vec![path.to_string()],
                }),
            }
        }
    }

    /// Get the current pathname.
    #[must_use]
    pub fn pathname(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state
                .lock()
                .map(|s| s.current())
                .unwrap_or_else(|_| "/".to_string())
        }
    }

    /// Navigate to a new route, adding to history.
    pub fn push(&self, path: &str) {
        tracing::info!(path, "navigate");
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(mut state) = self.state.lock() {
                state.entries.push(path.to_string());
            }
        }
    }

    /// Replace the current route without adding to history.
    pub fn replace(&self, path: &str) {
        tracing::debug!(path, "replace route");
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(mut state) = self.state.lock() {
                if let Some(entry) = state.entries.last_mut() {
                    *entry = path.to_string();
                }
            }
        }
    }

    /// Get the history length.
    #[must_use]
    pub fn history_len(&self) -> usize {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.history().ok())
                .and_then(|h| h.length().ok())
                .unwrap_or(0) as usize
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
        }
    }
}

/// Strip query string, hash and trailing slashes from a path.
///
/// The root path stays `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // BrowserRouter Tests
    // =========================================================================

    #[test]
    fn test_router_new() {
        let router = BrowserRouter::new();
        assert_eq!(router.pathname(), "/");
        assert_eq!(router.history_len(), 1);
    }

    #[test]
    fn test_router_starting_at() {
        let router = BrowserRouter::starting_at("/qgis-query");
        assert_eq!(router.pathname(), "/qgis-query");
        assert_eq!(BrowserRouter::default().pathname(), "/");
    }

    #[test]
    fn test_router_push() {
        let router = BrowserRouter::new();
        router.push("/area-separator");
        router.push("/qgis-query");
        assert_eq!(router.pathname(), "/qgis-query");
        assert_eq!(router.history_len(), 3);
    }

    #[test]
    fn test_router_replace() {
        let router = BrowserRouter::new();
        router.push("/original");
        router.replace("/replaced");
        assert_eq!(router.pathname(), "/replaced");
        assert_eq!(router.history_len(), 2);
    }

    // =========================================================================
    // Path Normalisation Tests
    // =========================================================================

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/qgis-query"), "/qgis-query");
        assert_eq!(normalize_path("/qgis-query/"), "/qgis-query");
        assert_eq!(normalize_path("/qgis-query?x=1"), "/qgis-query");
        assert_eq!(normalize_path("/area-separator#top"), "/area-separator");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }
}
