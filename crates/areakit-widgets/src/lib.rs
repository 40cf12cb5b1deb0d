//! Widgets for the Areakit browser toolkit.
//!
//! Each widget is a view-model: plain state plus an `update` that returns
//! [`areakit_core::Command`]s for side effects. Rendering is left to the
//! application shell.

pub mod area_separator;
pub mod command_palette;
pub mod copy_button;
pub mod data_view;
pub mod id_query;
pub mod region_area;
pub mod tabs;
pub mod text;
pub mod tooltip;

pub use area_separator::{AreaSeparator, AreaSeparatorMessage, AreaSeparatorOptions};
pub use command_palette::{
    filter_items, CloseReason, CommandPalette, CommandPaletteItem, PaletteActivated, PaletteOutput,
};
pub use copy_button::{CopyButton, CopyButtonMessage};
pub use data_view::{TableDataInput, TableDataView, TableDataViewMessage};
pub use id_query::{
    make_numeric_query, make_string_query, process_ids_text, OutputField, QgisQuery,
    QgisQueryMessage,
};
pub use region_area::{
    expand_regions, group_region_areas, parse_raw_input, sum_region_areas, ExpandedRow, InputRow,
    InputTable, RegionGroup, RegionPart, ResultRow,
};
pub use tabs::{Tab, TabChanged, Tabs};
pub use tooltip::{Placed, Tooltip, TooltipPlacement};
