//! Log subscriber setup for native builds.
//!
//! In the browser, diagnostics go through `web_sys::console` instead.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `filter`.
///
/// `RUST_LOG` takes precedence when set. An unparsable `filter` falls back to
/// `info`. Returns `false` if a global subscriber was already installed.
pub fn init(filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
