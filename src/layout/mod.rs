//! Layout strategies.
//!
//! Every layout implements [`LayoutStrategy`](crate::traits::LayoutStrategy)
//! and reports its result as an [`Arrangement`].
//!
//! | Layout                          | Addressing             |
//! |---------------------------------|------------------------|
//! | [`grid::GridLayout`]            | row / column / spans   |
//! | [`dock::DockLayout`]            | dock edge              |
//! | [`stack::StackLayout`]          | index along one axis   |
//! | [`slots::FixedSlotLayout`]      | named slot             |
//! | [`tiling::AutoTilingLayout`]    | derived grid position  |

pub mod dock;
pub mod grid;
pub mod slots;
pub mod stack;
pub mod tiling;
pub mod tracks;

use crate::config::Config;
use crate::context::HostContext;
use crate::geometry::{Axis, Rect};
use crate::placement::PanelId;
use crate::position::PositionRecord;
use crate::theme::DividerStyle;
use crate::traits::LayoutStrategy;
use serde::{Deserialize, Serialize};
use slots::{FixedSlotLayout, SlotPreset};
use std::fmt;
use tiling::TilingMode;

/// Which kind of layout a [`LayoutStrategy`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayoutKind {
    Grid,
    Dock,
    Stack,
    Slots(SlotPreset),
    Tiling,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Grid => write!(f, "grid"),
            LayoutKind::Dock => write!(f, "dock"),
            LayoutKind::Stack => write!(f, "stack"),
            LayoutKind::Slots(preset) => write!(f, "{}", preset.name()),
            LayoutKind::Tiling => write!(f, "tiling"),
        }
    }
}

/// Serializable description of a layout, used by configuration and by
/// [`Command::SwitchLayout`](crate::command::Command::SwitchLayout).
///
/// ```json
/// {"Grid": {"rows": 2, "columns": 3}}
/// {"Slots": "Dashboard"}
/// {"Tiling": {"mode": "Auto"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutSpec {
    Grid {
        rows: usize,
        columns: usize,
    },
    Dock,
    Stack {
        #[serde(default = "default_stack_axis")]
        axis: Axis,
    },
    Slots(SlotPreset),
    Tiling {
        #[serde(default)]
        mode: TilingMode,
    },
}

fn default_stack_axis() -> Axis {
    Axis::Vertical
}

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutSpec::Tiling {
            mode: TilingMode::Auto,
        }
    }
}

impl LayoutSpec {
    /// Construct the described layout with `ctx` and the matching config
    /// section.
    pub fn build(&self, ctx: HostContext, config: &Config) -> Box<dyn LayoutStrategy> {
        match *self {
            LayoutSpec::Grid { rows, columns } => Box::new(grid::GridLayout::from_config(
                rows,
                columns,
                &config.grid,
                ctx,
            )),
            LayoutSpec::Dock => Box::new(dock::DockLayout::from_config(&config.dock, ctx)),
            LayoutSpec::Stack { axis } => Box::new(stack::StackLayout::new(axis, ctx)),
            LayoutSpec::Slots(preset) => Box::new(FixedSlotLayout::new(preset, ctx)),
            LayoutSpec::Tiling { mode } => {
                let mut tiling = tiling::AutoTilingLayout::from_config(&config.tiling, ctx);
                tiling.set_mode(mode);
                Box::new(tiling)
            }
        }
    }
}

/// A panel's resolved rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelFrame {
    pub panel: PanelId,
    pub rect: Rect,
}

/// A divider's resolved rectangle.
///
/// `axis` is the axis the divider resizes along: a `Horizontal` divider is
/// a vertical bar between two columns.  `index` identifies the boundary in
/// the layout's own terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DividerFrame {
    pub axis: Axis,
    pub index: usize,
    pub rect: Rect,
    pub style: DividerStyle,
}

/// The output of [`LayoutStrategy::arrange`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Arrangement {
    /// Panel rectangles in addition order.
    pub frames: Vec<PanelFrame>,
    pub dividers: Vec<DividerFrame>,
}

impl Arrangement {
    pub fn frame_of(&self, panel: PanelId) -> Option<Rect> {
        self.frames.iter().find(|f| f.panel == panel).map(|f| f.rect)
    }
}

/// The rectangle covered by a grid record, given the track offsets on each
/// axis (see [`track_offsets`](crate::geometry::track_offsets)).
pub(crate) fn record_rect(record: PositionRecord, rows: &[f64], columns: &[f64]) -> Option<Rect> {
    let PositionRecord::Grid {
        row,
        column,
        row_span,
        column_span,
    } = record
    else {
        return None;
    };
    let top = *rows.get(row)?;
    let bottom = *rows.get(row.checked_add(row_span)?)?;
    let left = *columns.get(column)?;
    let right = *columns.get(column.checked_add(column_span)?)?;
    Some(Rect::new(left, top, right - left, bottom - top))
}
