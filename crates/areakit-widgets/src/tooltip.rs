//! Tooltip state and floating placement.
//!
//! Placement runs three steps against the viewport:
//! 1. offset: keep a gap between anchor and tooltip
//! 2. flip: move to the opposite side if the preferred one overflows and
//!    the opposite side has more room
//! 3. shift: slide along the cross axis to stay inside the viewport

use areakit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Gap between anchor and tooltip in pixels.
pub const DEFAULT_OFFSET: f32 = 5.0;

/// Tooltip placement relative to the anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TooltipPlacement {
    /// Above the anchor
    #[default]
    Top,
    /// Below the anchor
    Bottom,
    /// Left of the anchor
    Left,
    /// Right of the anchor
    Right,
}

impl TooltipPlacement {
    /// The placement on the other side of the anchor.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the tooltip sits above or below the anchor.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// CSS-style name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Computed tooltip position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placed {
    /// Side actually used after flipping
    pub placement: TooltipPlacement,
    /// Tooltip bounds in viewport coordinates
    pub bounds: Rect,
}

/// Tooltip with open state and placement preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    content: String,
    placement: TooltipPlacement,
    offset: f32,
    open: bool,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            content: String::new(),
            placement: TooltipPlacement::Top,
            offset: DEFAULT_OFFSET,
            open: false,
        }
    }
}

impl Tooltip {
    /// Create a new tooltip.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the placement.
    #[must_use]
    pub const fn placement(mut self, placement: TooltipPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the gap between anchor and tooltip.
    #[must_use]
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    /// Get the content.
    #[must_use]
    pub fn get_content(&self) -> &str {
        &self.content
    }

    /// Replace the content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Get the preferred placement.
    #[must_use]
    pub const fn get_placement(&self) -> TooltipPlacement {
        self.placement
    }

    /// Check if the tooltip is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the tooltip.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Position a tooltip of `size` next to `anchor` inside `viewport`.
    #[must_use]
    pub fn compute_position(&self, anchor: Rect, size: Size, viewport: Rect) -> Placed {
        let preferred = self.placement;
        let preferred_bounds = Rect::from_origin_size(self.place(preferred, anchor, size), size);
        let placement = if overflow(preferred_bounds, viewport, preferred) > 0.0
            && room(preferred.opposite(), anchor, viewport) > room(preferred, anchor, viewport)
        {
            preferred.opposite()
        } else {
            preferred
        };

        let origin = shift(self.place(placement, anchor, size), size, viewport, placement);
        Placed {
            placement,
            bounds: Rect::from_origin_size(origin, size),
        }
    }

    fn place(&self, placement: TooltipPlacement, anchor: Rect, size: Size) -> Point {
        let center_x = anchor.x + (anchor.width - size.width) / 2.0;
        let center_y = anchor.y + (anchor.height - size.height) / 2.0;
        match placement {
            TooltipPlacement::Top => Point::new(center_x, anchor.y - size.height - self.offset),
            TooltipPlacement::Bottom => Point::new(center_x, anchor.bottom() + self.offset),
            TooltipPlacement::Left => Point::new(anchor.x - size.width - self.offset, center_y),
            TooltipPlacement::Right => Point::new(anchor.right() + self.offset, center_y),
        }
    }
}

/// How far a placed tooltip pokes out of the viewport on its main axis.
fn overflow(bounds: Rect, viewport: Rect, placement: TooltipPlacement) -> f32 {
    let amount = match placement {
        TooltipPlacement::Top => viewport.y - bounds.y,
        TooltipPlacement::Bottom => bounds.bottom() - viewport.bottom(),
        TooltipPlacement::Left => viewport.x - bounds.x,
        TooltipPlacement::Right => bounds.right() - viewport.right(),
    };
    amount.max(0.0)
}

/// Free space between the anchor and the viewport edge on one side.
fn room(placement: TooltipPlacement, anchor: Rect, viewport: Rect) -> f32 {
    match placement {
        TooltipPlacement::Top => anchor.y - viewport.y,
        TooltipPlacement::Bottom => viewport.bottom() - anchor.bottom(),
        TooltipPlacement::Left => anchor.x - viewport.x,
        TooltipPlacement::Right => viewport.right() - anchor.right(),
    }
}

/// Clamp the cross axis so the tooltip stays inside the viewport.
fn shift(origin: Point, size: Size, viewport: Rect, placement: TooltipPlacement) -> Point {
    let clamp = |value: f32, min: f32, max: f32| value.min(max).max(min);
    if placement.is_vertical() {
        Point::new(
            clamp(origin.x, viewport.x, viewport.right() - size.width),
            origin.y,
        )
    } else {
        Point::new(
            origin.x,
            clamp(origin.y, viewport.y, viewport.bottom() - size.height),
        )
    }
}
