//! Derived layout: per-image width, height, margin, border and shade.
//!
//! Everything here is a pure function of a store snapshot, the layout
//! settings, the measured container width and the drag state. Nothing is
//! cached; callers recompute after every event.
//!
//! Displayed images sit two to a row. When the count is odd and margins
//! are off, the last image takes the whole final row:
//!
//! ```text
//!   n = 5, margins off          n = 5, margins on
//!   ┌─────┬─────┐               ┌────┐ ┌────┐
//!   │ 0   │ 1   │               │ 0  │ │ 1  │
//!   ├─────┼─────┤               └────┘ └────┘
//!   │ 2   │ 3   │               ┌────┐ ┌────┐
//!   ├─────┴─────┤               │ 2  │ │ 3  │
//!   │ 4         │               └────┘ └────┘
//!   └───────────┘               ┌────┐
//!                               │ 4  │
//!                               └────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::EditorConfig;
use crate::drag::{DragMachine, SizeOverride};
use crate::settings::LayoutSettings;
use crate::store::{Entry, ImageKey, ImageRecord, VerticalAlign};

/// A length that may depend on the container width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// Percentage of the container width.
    Percent(f32),
    /// `percent` of the container width minus a fixed reservation.
    PercentLess { percent: f32, less: f32 },
    Units(f32),
}

impl Extent {
    pub const ZERO: Self = Self::Units(0.0);

    pub fn resolve(self, container_width: f32) -> f32 {
        let value = match self {
            Self::Percent(p) => p / 100.0 * container_width,
            Self::PercentLess { percent, less } => percent / 100.0 * container_width - less,
            Self::Units(u) => u,
        };
        value.max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Margin {
    pub top: Extent,
    pub right: Extent,
    pub bottom: Extent,
    pub left: Extent,
}

impl Margin {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(units: f32) -> Self {
        let e = Extent::Units(units);
        Self {
            top: e,
            right: e,
            bottom: e,
            left: e,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
}

/// Grayscale fill, `lightness` in percent (0 = black).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Shade {
    pub lightness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Geometry {
    pub width: Extent,
    pub height: Extent,
    pub margin: Margin,
    pub border: Option<Border>,
    /// Only displayed images carry a shade.
    pub shade: Option<Shade>,
    /// Removed thumbnails render behind a dark overlay.
    pub dimmed: bool,
    pub align: VerticalAlign,
}

/// Geometry with every length turned into units for one container width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBox {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub align: VerticalAlign,
}

impl ResolvedBox {
    pub fn outer_width(&self) -> f32 {
        self.margin_left + self.width + self.margin_right
    }

    pub fn outer_height(&self) -> f32 {
        self.margin_top + self.height + self.margin_bottom
    }
}

impl Geometry {
    pub fn resolve(&self, container_width: f32) -> ResolvedBox {
        ResolvedBox {
            width: self.width.resolve(container_width),
            height: self.height.resolve(container_width),
            margin_top: self.margin.top.resolve(container_width),
            margin_right: self.margin.right.resolve(container_width),
            margin_bottom: self.margin.bottom.resolve(container_width),
            margin_left: self.margin.left.resolve(container_width),
            align: self.align,
        }
    }
}

pub type GeometryMap = BTreeMap<ImageKey, Geometry>;

/// Everything the calculator reads, borrowed from the editor.
#[derive(Clone, Copy, Debug)]
pub struct LayoutInput<'a> {
    pub displayed: &'a [Entry],
    pub removed: &'a [Entry],
    pub settings: &'a LayoutSettings,
    pub container_width: f32,
    pub drag: &'a DragMachine,
    pub config: &'a EditorConfig,
}

pub fn compute_geometry(input: &LayoutInput<'_>) -> GeometryMap {
    let mut out = GeometryMap::new();
    let n = input.displayed.len();
    for (i, entry) in input.displayed.iter().enumerate() {
        let geometry = displayed_geometry(
            i,
            n,
            &entry.record,
            input.settings,
            input.drag.override_for(&entry.key),
            input.config,
        );
        out.insert(entry.key.clone(), geometry);
    }
    for (i, entry) in input.removed.iter().enumerate() {
        let geometry = removed_geometry(i, &entry.record, input.container_width, input.config);
        out.insert(entry.key.clone(), geometry);
    }
    out
}

/// Geometry of the `i`-th of `n` displayed images.
pub fn displayed_geometry(
    i: usize,
    n: usize,
    record: &ImageRecord,
    settings: &LayoutSettings,
    drag: Option<SizeOverride>,
    config: &EditorConfig,
) -> Geometry {
    let lone_last = n % 2 == 1 && !settings.margins_enabled && i + 1 == n;
    let base_width = if lone_last {
        Extent::Percent(100.0)
    } else if settings.margins_enabled {
        Extent::PercentLess {
            percent: 50.0,
            less: 2.0 * config.margin_gap,
        }
    } else {
        Extent::Percent(50.0)
    };
    let drag = drag.unwrap_or_default();

    Geometry {
        width: drag.width.map_or(base_width, Extent::Units),
        height: Extent::Units(drag.height.unwrap_or(config.reference_height)),
        margin: if settings.margins_enabled {
            Margin::uniform(config.margin_gap)
        } else {
            Margin::ZERO
        },
        border: settings.borders_enabled.then_some(Border {
            width: config.border_width,
        }),
        shade: shade(i, n, config.max_lightness),
        dimmed: false,
        align: record.align,
    }
}

/// Geometry of the `i`-th removed thumbnail.
pub fn removed_geometry(
    i: usize,
    record: &ImageRecord,
    container_width: f32,
    config: &EditorConfig,
) -> Geometry {
    let ends_row = (i + 1) % config.removed_per_row.max(1) == 0;
    Geometry {
        width: Extent::Percent(config.removed_width_percent),
        height: Extent::Units((container_width * config.removed_height_ratio).max(0.0)),
        margin: Margin {
            top: Extent::ZERO,
            right: if ends_row {
                Extent::ZERO
            } else {
                Extent::Percent(config.removed_gap_percent)
            },
            bottom: Extent::Units(config.removed_bottom_margin),
            left: Extent::ZERO,
        },
        border: None,
        shade: None,
        dimmed: true,
        align: record.align,
    }
}

/// Lightness falls linearly from `max_lightness` for the first image to
/// `max_lightness / n` for the last. `None` when there is nothing to shade.
pub fn shade(i: usize, n: usize, max_lightness: f32) -> Option<Shade> {
    if n == 0 || i >= n {
        return None;
    }
    Some(Shade {
        lightness: (n - i) as f32 * max_lightness / n as f32,
    })
}
