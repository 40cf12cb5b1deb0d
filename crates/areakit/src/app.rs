//! Application view-model: pages, command palette and global shortcuts.

use crate::browser::router::normalize_path;
use crate::config::AppConfig;
use areakit_core::{Command, Event, Key, Rect, Shortcut, ShortcutMap, State};
use areakit_widgets::{
    AreaSeparator, AreaSeparatorMessage, AreaSeparatorOptions, CommandPalette,
    CommandPaletteItem, PaletteOutput, QgisQuery, QgisQueryMessage,
};
use serde::{Deserialize, Serialize};

/// Application pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    /// Region area calculator
    AreaSeparator,
    /// ObjectID query builder
    QgisQuery,
}

impl Page {
    /// Every page, in palette order.
    pub const ALL: [Self; 2] = [Self::AreaSeparator, Self::QgisQuery];

    /// Palette item ID.
    pub const fn id(self) -> &'static str {
        match self {
            Self::AreaSeparator => "area-separator",
            Self::QgisQuery => "qgis-query",
        }
    }

    /// Route path.
    pub const fn path(self) -> &'static str {
        match self {
            Self::AreaSeparator => "/area-separator",
            Self::QgisQuery => "/qgis-query",
        }
    }

    /// Page heading.
    pub const fn title(self) -> &'static str {
        match self {
            Self::AreaSeparator => areakit_widgets::area_separator::TITLE,
            Self::QgisQuery => "QGIS ObjectID Query",
        }
    }

    /// One-line summary shown in the palette.
    pub const fn description(self) -> &'static str {
        match self {
            Self::AreaSeparator => "Split multi-region rows and total the area of each region",
            Self::QgisQuery => "Turn a list of IDs into in(...) filter expressions",
        }
    }

    /// Page for a route path, ignoring query, hash and trailing slashes.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = normalize_path(path);
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    /// Page for a palette item ID.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.id() == id)
    }

    fn palette_item(self) -> CommandPaletteItem {
        CommandPaletteItem::new(self.id(), self.title()).description(self.description())
    }
}

/// Actions bound to global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Open or close the command palette
    TogglePalette,
}

/// Messages for [`AppState`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// Area separator page message
    AreaSeparator(AreaSeparatorMessage),
    /// Query builder page message
    QgisQuery(QgisQueryMessage),
    /// Keyboard or pointer input not claimed by a page widget
    Input(Event),
    /// Open or close the palette
    TogglePalette,
    /// Palette search text changed
    PaletteQuery(String),
    /// A palette result was clicked
    PaletteActivate(usize),
    /// Go to a route, adding a history entry
    Navigate(String),
    /// The URL changed outside the app (back/forward)
    RouteChanged(String),
}

/// Whole-application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    config: AppConfig,
    page: Page,
    area_separator: AreaSeparator,
    qgis_query: QgisQuery,
    palette: CommandPalette,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default(), "/")
    }
}

impl AppState {
    /// Create the application at `path`.
    #[must_use]
    pub fn new(config: AppConfig, path: &str) -> Self {
        let area_separator = AreaSeparator::new(&AreaSeparatorOptions {
            load_sample: config.load_sample_input,
            delimiter: config.csv_delimiter.clone(),
            feedback_ms: config.copy_feedback_ms,
        });
        let qgis_query = QgisQuery::with_feedback_ms(config.copy_feedback_ms);
        let mut state = Self {
            page: Page::AreaSeparator,
            area_separator,
            qgis_query,
            palette: CommandPalette::new(Page::ALL.map(Page::palette_item)),
            config,
        };
        state.page = state.resolve(path);
        state
    }

    /// Page for `path`, falling back to the default route.
    pub fn resolve(&self, path: &str) -> Page {
        Page::from_path(path)
            .or_else(|| Page::from_path(&self.config.default_route))
            .unwrap_or(Page::AreaSeparator)
    }

    /// Global shortcut bindings.
    pub fn shortcuts(&self) -> ShortcutMap<AppAction> {
        let mut map = ShortcutMap::new();
        map.register(
            Shortcut::primary(self.config.palette_key()),
            AppAction::TogglePalette,
            "Toggle command palette",
        );
        map
    }

    /// Check whether the app takes over a key press.
    ///
    /// The palette shortcut is always taken. While the palette is open so
    /// are its navigation keys (Escape, Up, Down, Enter); every other key is
    /// left to the focused element, so typing reaches the search box.
    pub fn claims_key(&self, event: &Event) -> bool {
        if self.shortcuts().resolve(event).is_some() {
            return true;
        }
        self.palette.is_open()
            && matches!(
                event,
                Event::KeyDown {
                    key: Key::Escape | Key::Up | Key::Down | Key::Enter,
                    ..
                }
            )
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Area separator page.
    #[must_use]
    pub const fn area_separator(&self) -> &AreaSeparator {
        &self.area_separator
    }

    /// Query builder page.
    #[must_use]
    pub const fn qgis_query(&self) -> &QgisQuery {
        &self.qgis_query
    }

    /// Command palette.
    #[must_use]
    pub const fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    /// Set the palette dialog bounds used for backdrop clicks.
    pub fn set_palette_bounds(&mut self, bounds: Rect) {
        self.palette.set_content_bounds(bounds);
    }

    fn show(&mut self, page: Page) {
        if page != self.page {
            tracing::debug!(from = self.page.id(), to = page.id(), "page changed");
            self.page = page;
        }
    }

    fn navigate(&mut self, path: &str) -> Command<AppMessage> {
        let page = self.resolve(path);
        self.show(page);
        Command::navigate(page.path())
    }

    fn palette_output(&mut self, output: Option<PaletteOutput>) -> Command<AppMessage> {
        match output {
            Some(PaletteOutput::Activated(activated)) => match Page::from_id(&activated.id) {
                Some(page) => self.navigate(page.path()),
                None => Command::None,
            },
            Some(PaletteOutput::Closed(reason)) => {
                tracing::trace!(?reason, "palette closed");
                Command::None
            }
            None => Command::None,
        }
    }

    fn handle_input(&mut self, event: &Event) -> Command<AppMessage> {
        if let Some(AppAction::TogglePalette) = self.shortcuts().resolve(event).copied() {
            let output = self.palette.toggle();
            return self.palette_output(output);
        }
        let output = self.palette.handle_event(event);
        self.palette_output(output)
    }
}

impl State for AppState {
    type Message = AppMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            AppMessage::AreaSeparator(msg) => self
                .area_separator
                .update(msg)
                .map(AppMessage::AreaSeparator),
            AppMessage::QgisQuery(msg) => self.qgis_query.update(msg).map(AppMessage::QgisQuery),
            AppMessage::Input(event) => self.handle_input(&event),
            AppMessage::TogglePalette => {
                let output = self.palette.toggle();
                self.palette_output(output)
            }
            AppMessage::PaletteQuery(query) => {
                self.palette.set_query(query);
                Command::None
            }
            AppMessage::PaletteActivate(index) => {
                let output = self.palette.activate(index).map(PaletteOutput::Activated);
                self.palette_output(output)
            }
            AppMessage::Navigate(path) => self.navigate(&path),
            AppMessage::RouteChanged(path) => {
                let page = self.resolve(&path);
                self.show(page);
                Command::None
            }
        }
    }
}
