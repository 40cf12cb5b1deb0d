//! WASM application entry point.

use super::clipboard::browser_clipboard;
use super::events::keyboard_event_to_areakit;
use super::router::BrowserRouter;
use crate::app::{AppMessage, AppState};
use crate::config::AppConfig;
use crate::runtime::{host_time, Runtime};
use areakit_core::{Event, Point, Rect, Size};
use areakit_widgets::{
    filter_items, AreaSeparatorMessage, CopyButtonMessage, QgisQueryMessage, TableDataViewMessage,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, KeyboardEvent};

type SharedRuntime = Rc<RefCell<Runtime<AppState>>>;

/// Main application runner for browser.
///
/// The page shell renders from [`App::state_json`] and forwards user input
/// through the setters below, which stamp it with `performance.now()`.
/// Delayed effects need [`App::tick`] to be called with the same clock;
/// [`App::next_due_ms`] says when.
#[wasm_bindgen]
pub struct App {
    runtime: SharedRuntime,
    keydown_callback: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    popstate_callback: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl App {
    /// Create the app from optional YAML configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: Option<String>) -> Result<App, JsValue> {
        console_error_panic_hook::set_once();

        let config = AppConfig::from_yaml(config_yaml.as_deref().unwrap_or(""))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let router = BrowserRouter::new();
        let state = AppState::new(config, &router.pathname());
        if router.pathname() != state.page().path() {
            router.replace(state.page().path());
        }
        web_sys::console::info_1(&format!("areakit: {}", state.page().title()).into());

        Ok(Self {
            runtime: Rc::new(RefCell::new(Runtime::new(
                state,
                router,
                browser_clipboard(),
            ))),
            keydown_callback: None,
            popstate_callback: None,
        })
    }

    /// Listen for the palette shortcut, palette keys and back/forward.
    pub fn listen(&mut self) -> Result<(), JsValue> {
        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let runtime = Rc::clone(&self.runtime);
        let keydown: Closure<dyn FnMut(KeyboardEvent)> = Closure::new(move |e: KeyboardEvent| {
            let Some(event) = keyboard_event_to_areakit(&e) else {
                return;
            };
            let mut runtime = runtime.borrow_mut();
            if runtime.state().claims_key(&event) {
                e.prevent_default();
                runtime.dispatch_at(now(), AppMessage::Input(event));
            }
        });
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        self.keydown_callback = Some(keydown);

        let runtime = Rc::clone(&self.runtime);
        let popstate: Closure<dyn FnMut(web_sys::Event)> = Closure::new(move |_: web_sys::Event| {
            let mut runtime = runtime.borrow_mut();
            let path = runtime.router().pathname();
            runtime.dispatch_at(now(), AppMessage::RouteChanged(path));
        });
        window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())?;
        self.popstate_callback = Some(popstate);
        Ok(())
    }

    fn dispatch(&self, msg: AppMessage) {
        self.runtime.borrow_mut().dispatch_at(now(), msg);
    }

    /// Whole state as JSON, for rendering.
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.runtime.borrow().state())
            .map_err(|e| JsValue::from_str(&format!("JSON error: {}", e)))
    }

    // ===== Routing =====

    /// Current route path.
    pub fn page(&self) -> String {
        self.runtime.borrow().state().page().path().to_string()
    }

    /// Current page heading.
    pub fn title(&self) -> String {
        self.runtime.borrow().state().page().title().to_string()
    }

    /// Navigate to a route.
    pub fn navigate(&self, path: &str) {
        self.dispatch(AppMessage::Navigate(path.to_string()));
    }

    // ===== Area separator =====

    /// Replace the pasted region table.
    pub fn set_area_input(&self, text: &str) {
        self.dispatch(AppMessage::AreaSeparator(AreaSeparatorMessage::SetInput(
            text.to_string(),
        )));
    }

    /// Text shown in the input box.
    pub fn area_input(&self) -> String {
        self.runtime
            .borrow()
            .state()
            .area_separator()
            .input()
            .value()
            .to_string()
    }

    /// Per-region totals as CSV.
    pub fn result_csv(&self) -> String {
        self.runtime
            .borrow()
            .state()
            .area_separator()
            .output()
            .csv()
            .to_string()
    }

    /// Per-region totals as an HTML table.
    pub fn result_html(&self) -> String {
        self.runtime.borrow().state().area_separator().output().html()
    }

    /// Per-region contributions as CSV.
    pub fn intermediate_csv(&self) -> String {
        self.runtime
            .borrow()
            .state()
            .area_separator()
            .intermediate()
            .csv()
            .to_string()
    }

    /// Per-region contributions as an HTML table.
    pub fn intermediate_html(&self) -> String {
        self.runtime
            .borrow()
            .state()
            .area_separator()
            .intermediate()
            .html()
    }

    /// Switch the result view between its Table (0) and CSV (1) tabs.
    pub fn select_result_tab(&self, index: usize) {
        self.dispatch(AppMessage::AreaSeparator(AreaSeparatorMessage::Output(
            TableDataViewMessage::SelectTab(index),
        )));
    }

    /// Switch the intermediate view between its Table (0) and CSV (1) tabs.
    pub fn select_intermediate_tab(&self, index: usize) {
        self.dispatch(AppMessage::AreaSeparator(
            AreaSeparatorMessage::Intermediate(TableDataViewMessage::SelectTab(index)),
        ));
    }

    /// Copy the result CSV.
    pub fn copy_result(&self) {
        self.dispatch(AppMessage::AreaSeparator(AreaSeparatorMessage::Output(
            TableDataViewMessage::Copy(CopyButtonMessage::Press),
        )));
    }

    /// Copy the intermediate CSV.
    pub fn copy_intermediate(&self) {
        self.dispatch(AppMessage::AreaSeparator(
            AreaSeparatorMessage::Intermediate(TableDataViewMessage::Copy(
                CopyButtonMessage::Press,
            )),
        ));
    }

    // ===== Query builder =====

    /// Replace the pasted ID list.
    pub fn set_id_input(&self, text: &str) {
        self.dispatch(AppMessage::QgisQuery(QgisQueryMessage::SetInput(
            text.to_string(),
        )));
    }

    /// `in(...)` for numeric IDs, absent while the input is empty.
    pub fn numeric_query(&self) -> Option<String> {
        self.runtime
            .borrow()
            .state()
            .qgis_query()
            .numeric()
            .value()
            .map(str::to_string)
    }

    /// `in('...')` for text IDs, absent while the input is empty.
    pub fn string_query(&self) -> Option<String> {
        self.runtime
            .borrow()
            .state()
            .qgis_query()
            .string()
            .value()
            .map(str::to_string)
    }

    /// Copy the numeric query.
    pub fn copy_numeric(&self) {
        self.dispatch(AppMessage::QgisQuery(QgisQueryMessage::CopyNumeric(
            CopyButtonMessage::Press,
        )));
    }

    /// Copy the string query.
    pub fn copy_string(&self) {
        self.dispatch(AppMessage::QgisQuery(QgisQueryMessage::CopyString(
            CopyButtonMessage::Press,
        )));
    }

    // ===== Command palette =====

    /// Check if the palette is open.
    pub fn palette_open(&self) -> bool {
        self.runtime.borrow().state().palette().is_open()
    }

    /// Open or close the palette.
    pub fn toggle_palette(&self) {
        self.dispatch(AppMessage::TogglePalette);
    }

    /// Set the palette search text.
    pub fn set_palette_query(&self, query: &str) {
        self.dispatch(AppMessage::PaletteQuery(query.to_string()));
    }

    /// Choose a palette result by index.
    pub fn activate_palette_item(&self, index: usize) {
        self.dispatch(AppMessage::PaletteActivate(index));
    }

    /// Set the palette dialog bounds used for backdrop clicks.
    pub fn set_palette_bounds(&self, x: f32, y: f32, width: f32, height: f32) {
        self.runtime
            .borrow_mut()
            .state_mut()
            .set_palette_bounds(Rect::new(x, y, width, height));
    }

    /// Forward a pointer press to the palette.
    pub fn palette_pointer_down(&self, x: f32, y: f32) {
        self.dispatch(AppMessage::Input(Event::MouseDown {
            position: Point::new(x, y),
        }));
    }

    /// Palette items matching `query`, as JSON.
    pub fn filter_palette(&self, query: Option<String>) -> Result<String, JsValue> {
        let runtime = self.runtime.borrow();
        let items = filter_items(runtime.state().palette().items(), query.as_deref());
        serde_json::to_string(&items).map_err(|e| JsValue::from_str(&format!("JSON error: {}", e)))
    }

    // ===== Copy feedback =====

    /// Place a copy-button tooltip of `width`×`height` above the anchor
    /// rectangle, within a viewport of `viewport_width`×`viewport_height`.
    /// Returns the placement and bounds as JSON.
    #[allow(clippy::too_many_arguments)]
    pub fn place_tooltip(
        &self,
        anchor_x: f32,
        anchor_y: f32,
        anchor_width: f32,
        anchor_height: f32,
        width: f32,
        height: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<String, JsValue> {
        let runtime = self.runtime.borrow();
        let tooltip = runtime.state().area_separator().output().copy_button().tooltip();
        let placed = tooltip.compute_position(
            Rect::new(anchor_x, anchor_y, anchor_width, anchor_height),
            Size::new(width, height),
            Rect::new(0.0, 0.0, viewport_width, viewport_height),
        );
        serde_json::to_string(&placed).map_err(|e| JsValue::from_str(&format!("JSON error: {}", e)))
    }

    // ===== Timers =====

    /// Deliver delayed messages due by `now_ms`. Returns how many ran.
    pub fn tick(&self, now_ms: f64) -> u32 {
        self.runtime.borrow_mut().tick(host_time(now_ms)) as u32
    }

    /// Due time of the next delayed message, in milliseconds.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.runtime
            .borrow()
            .next_due()
            .map(|due| due.as_secs_f64() * 1000.0)
    }
}

/// `performance.now()` as a clock reading; zero without a window.
fn now() -> Duration {
    let now_ms = window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now());
    host_time(now_ms)
}

/// Log to browser console.
#[wasm_bindgen]
pub fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}
