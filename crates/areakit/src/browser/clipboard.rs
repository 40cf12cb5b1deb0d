//! Browser clipboard backends.

use areakit_core::{Clipboard, ClipboardBackend, ClipboardResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

/// Async Clipboard API (`navigator.clipboard.writeText`).
///
/// The write is fire-and-forget: a rejected promise is logged, not reported.
#[derive(Debug, Default, Clone, Copy)]
pub struct NavigatorClipboard;

impl ClipboardBackend for NavigatorClipboard {
    fn name(&self) -> &'static str {
        "navigator.clipboard"
    }

    fn write_text(&self, text: &str) -> ClipboardResult {
        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            return ClipboardResult::Unavailable;
        };
        // Undefined outside secure contexts.
        let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false);
        if !present {
            return ClipboardResult::Unavailable;
        }

        let promise = navigator.clipboard().write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                tracing::warn!(?err, "clipboard write rejected");
                web_sys::console::warn_2(&"clipboard write rejected".into(), &err);
            }
        });
        ClipboardResult::Success
    }
}

/// Legacy `document.execCommand("copy")` through a hidden textarea.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecCommandClipboard;

impl ExecCommandClipboard {
    fn copy(text: &str) -> Result<bool, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let body = document.body().ok_or("No body")?;

        let textarea = document
            .create_element("textarea")?
            .dyn_into::<HtmlTextAreaElement>()?;
        textarea.set_value(text);
        textarea.set_attribute("readonly", "")?;
        textarea.set_attribute("style", "position:fixed;top:0;left:-9999px;opacity:0")?;
        body.append_child(&textarea)?;
        textarea.select();

        let copied = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| JsValue::from_str("Not an HTML document"))
            .and_then(|html| html.exec_command("copy"));
        textarea.remove();
        copied
    }
}

impl ClipboardBackend for ExecCommandClipboard {
    fn name(&self) -> &'static str {
        "execCommand"
    }

    fn write_text(&self, text: &str) -> ClipboardResult {
        match Self::copy(text) {
            Ok(true) => ClipboardResult::Success,
            Ok(false) => ClipboardResult::PermissionDenied,
            Err(err) => ClipboardResult::Error(format!("{err:?}")),
        }
    }
}

/// Clipboard trying the async API first and `execCommand` second.
pub fn browser_clipboard() -> Clipboard {
    Clipboard::new()
        .with_backend(NavigatorClipboard)
        .with_backend(ExecCommandClipboard)
}
