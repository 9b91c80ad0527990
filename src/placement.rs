//! Panel handles, placement descriptors and placement errors.
//!
//! A [`PlacementParams`] says where a panel *wants* to live.  Each layout
//! reads the fields that match its addressing scheme (row/column for grids,
//! `slot` for fixed-slot presets, `dock` for the dock layout) and ignores
//! the rest.  The sizing hints (explicit size, bounds, margin, alignment)
//! are honoured by every layout through [`PlacementParams::fit`].

use crate::geometry::{Axis, Edge, Rect, Thickness};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a panel owned by the host.
///
/// Layouts only compare and hash handles; they never create or destroy the
/// panel behind one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u64);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Horizontal placement of a panel inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    #[default]
    Stretch,
}

/// Vertical placement of a panel inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    #[default]
    Stretch,
}

/// Where a panel wants to be placed and how it wants to be sized.
///
/// Every field has a default, so `{}` in JSON (or
/// `PlacementParams::default()`) means "row 0, column 0, span 1×1, no dock
/// edge, fill the cell".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub row_span: usize,
    pub column_span: usize,
    /// Explicit slot index for fixed-slot layouts.
    pub slot: Option<usize>,
    /// Edge to dock against; `None` means "fill".
    pub dock: Option<Edge>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    /// Proportional weight applied to the panel's column (grids) or to the
    /// panel itself along a horizontal stack.
    pub column_weight: f64,
    /// Proportional weight applied to the panel's row (grids) or to the
    /// panel itself along a vertical stack.
    pub row_weight: f64,
    pub margin: Thickness,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            row: None,
            column: None,
            row_span: 1,
            column_span: 1,
            slot: None,
            dock: None,
            width: None,
            height: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            column_weight: 1.0,
            row_weight: 1.0,
            margin: Thickness::default(),
            horizontal_alignment: HorizontalAlignment::Stretch,
            vertical_alignment: VerticalAlignment::Stretch,
        }
    }
}

impl PlacementParams {
    /// Place at `(row, column)` with a 1×1 span.
    pub fn at(row: usize, column: usize) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
            ..Self::default()
        }
    }

    /// Request a specific fixed slot.
    pub fn in_slot(slot: usize) -> Self {
        Self {
            slot: Some(slot),
            ..Self::default()
        }
    }

    /// Dock against `edge`.
    pub fn docked(edge: Edge) -> Self {
        Self {
            dock: Some(edge),
            ..Self::default()
        }
    }

    pub fn span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    pub fn weights(mut self, column_weight: f64, row_weight: f64) -> Self {
        self.column_weight = column_weight;
        self.row_weight = row_weight;
        self
    }

    pub fn size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_size(mut self, min_width: Option<f64>, min_height: Option<f64>) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn margin(mut self, margin: Thickness) -> Self {
        self.margin = margin;
        self
    }

    pub fn align(mut self, h: HorizontalAlignment, v: VerticalAlignment) -> Self {
        self.horizontal_alignment = h;
        self.vertical_alignment = v;
        self
    }

    /// Origin row, defaulting to 0.
    pub fn row_or_default(&self) -> usize {
        self.row.unwrap_or(0)
    }

    /// Origin column, defaulting to 0.
    pub fn column_or_default(&self) -> usize {
        self.column.unwrap_or(0)
    }

    /// Explicit size along `axis`, if any.
    pub fn explicit_extent(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// `(min, max)` along `axis`.  Missing bounds become `0` and infinity.
    pub fn bounds(&self, axis: Axis) -> (f64, f64) {
        let (min, max) = match axis {
            Axis::Horizontal => (self.min_width, self.max_width),
            Axis::Vertical => (self.min_height, self.max_height),
        };
        (min.unwrap_or(0.0), max.unwrap_or(f64::INFINITY))
    }

    /// Proportional weight along `axis`.
    pub fn weight(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.column_weight,
            Axis::Vertical => self.row_weight,
        }
    }

    /// Check the fields every layout relies on: spans are at least one and
    /// weights are finite and positive.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if self.row_span == 0 {
            return Err(PlacementError::InvalidSpan {
                bound: Bound::RowSpan,
            });
        }
        if self.column_span == 0 {
            return Err(PlacementError::InvalidSpan {
                bound: Bound::ColumnSpan,
            });
        }
        for w in [self.column_weight, self.row_weight] {
            if !w.is_finite() || w <= 0.0 {
                return Err(PlacementError::InvalidWeight(w));
            }
        }
        Ok(())
    }

    /// Resolve the rectangle a panel occupies inside `cell`.
    ///
    /// The margin is removed first.  On each axis the desired size is the
    /// explicit size (capped at what is available) or the full available
    /// size, then bounded by max and min; min wins when the two conflict.
    /// Alignment positions the result; `Stretch` centres a size that could
    /// not fill the cell.
    pub fn fit(&self, cell: Rect) -> Rect {
        let inner = cell.deflate(&self.margin);
        let width = self.fit_extent(Axis::Horizontal, inner.width);
        let height = self.fit_extent(Axis::Vertical, inner.height);

        let x = inner.x
            + match self.horizontal_alignment {
                HorizontalAlignment::Left => 0.0,
                HorizontalAlignment::Right => inner.width - width,
                HorizontalAlignment::Center | HorizontalAlignment::Stretch => {
                    (inner.width - width) / 2.0
                }
            };
        let y = inner.y
            + match self.vertical_alignment {
                VerticalAlignment::Top => 0.0,
                VerticalAlignment::Bottom => inner.height - height,
                VerticalAlignment::Center | VerticalAlignment::Stretch => {
                    (inner.height - height) / 2.0
                }
            };
        Rect::new(x, y, width, height)
    }

    fn fit_extent(&self, axis: Axis, available: f64) -> f64 {
        let (min, max) = self.bounds(axis);
        let desired = self
            .explicit_extent(axis)
            .map(|e| e.min(available))
            .unwrap_or(available);
        desired.min(max).max(min)
    }
}

/// The placement bound that a request violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Row,
    Column,
    RowSpan,
    ColumnSpan,
    Track,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Row => write!(f, "row"),
            Bound::Column => write!(f, "column"),
            Bound::RowSpan => write!(f, "row + row_span"),
            Bound::ColumnSpan => write!(f, "column + column_span"),
            Bound::Track => write!(f, "track"),
        }
    }
}

/// Why a panel could not be placed.
///
/// None of these are fatal: the layout is left untouched and the caller may
/// retry with corrected parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// A row/column/span exceeds the declared grid dimensions.
    #[error("{bound} = {value} is out of range for a {rows}x{columns} grid")]
    OutOfRange {
        bound: Bound,
        value: usize,
        rows: usize,
        columns: usize,
    },

    /// A span of zero was requested.
    #[error("{bound} must be at least 1")]
    InvalidSpan { bound: Bound },

    /// A weight was zero, negative or not finite.
    #[error("invalid proportional weight {0}")]
    InvalidWeight(f64),

    /// No slot was requested and every slot is taken.
    #[error("every slot of the {layout} layout is occupied")]
    SlotFull { layout: &'static str },

    /// The requested slot is held by another panel.
    #[error("slot {slot} of the {layout} layout is held by {occupant}")]
    SlotOccupied {
        layout: &'static str,
        slot: usize,
        occupant: PanelId,
    },

    /// The requested slot does not exist.
    #[error("the {layout} layout has no slot {slot} (it has {slots})")]
    UnknownSlot {
        layout: &'static str,
        slot: usize,
        slots: usize,
    },
}
