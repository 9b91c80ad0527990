//! Proportional grid layout.
//!
//! A [`GridLayout`] has a fixed number of weighted rows and columns.  Panels
//! are placed at `(row, column)` with optional spans; every placement is
//! validated against the declared dimensions and rejected (never clamped)
//! when it does not fit.
//!
//! Each interior boundary carries a divider.  Divider drags are applied in
//! absolute pixels, minimums are enforced when the drag completes, and the
//! result is folded back into proportional weights on the next idle tick
//! (see [`tracks`](super::tracks) for the algorithm).

use super::tracks::{TrackSize, Tracks, DEFAULT_MIN_COLUMN_WIDTH, DEFAULT_MIN_ROW_HEIGHT};
use super::{record_rect, Arrangement, DividerFrame, LayoutKind, PanelFrame};
use crate::command::Direction;
use crate::context::HostContext;
use crate::geometry::{track_offsets, Axis, Rect};
use crate::idle::{IdleQueue, IdleTask};
use crate::navigator::{self, DirectionalNavigator};
use crate::placement::{Bound, PanelId, PlacementError, PlacementParams};
use crate::position::{PositionRecord, PositionTable};
use crate::traits::LayoutStrategy;
use serde::{Deserialize, Serialize};

/// Grid layout settings.
///
/// ```json
/// { "min_row_height": 50.0, "min_column_width": 100.0,
///   "show_dividers": true, "divider_thickness": 4.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Minimum height of every row (px).
    pub min_row_height: f64,
    /// Minimum width of every column (px).
    pub min_column_width: f64,
    /// Whether boundaries carry draggable dividers.
    pub show_dividers: bool,
    /// Thickness of a divider's hit area (px).  Dividers overlay the
    /// boundary and take no space from the tracks.
    pub divider_thickness: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            show_dividers: true,
            divider_thickness: 4.0,
        }
    }
}

/// An `rows × columns` grid of weighted tracks.
#[derive(Debug)]
pub struct GridLayout {
    rows: Tracks,
    columns: Tracks,
    table: PositionTable,
    idle: IdleQueue,
    show_dividers: bool,
    divider_thickness: f64,
    ctx: HostContext,
}

impl GridLayout {
    /// Create a grid with default minimums.  Zero dimensions are raised to
    /// one.
    pub fn new(rows: usize, columns: usize, ctx: HostContext) -> Self {
        Self::from_config(rows, columns, &GridConfig::default(), ctx)
    }

    pub fn from_config(rows: usize, columns: usize, config: &GridConfig, ctx: HostContext) -> Self {
        Self {
            rows: Tracks::uniform(rows.max(1), config.min_row_height),
            columns: Tracks::uniform(columns.max(1), config.min_column_width),
            table: PositionTable::new(),
            idle: IdleQueue::new(),
            show_dividers: config.show_dividers,
            divider_thickness: config.divider_thickness,
            ctx,
        }
    }

    /// Grid dimensions as `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn tracks(&self, axis: Axis) -> &Tracks {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    fn tracks_mut(&mut self, axis: Axis) -> &mut Tracks {
        match axis {
            Axis::Horizontal => &mut self.columns,
            Axis::Vertical => &mut self.rows,
        }
    }

    pub fn set_show_dividers(&mut self, show: bool) {
        self.show_dividers = show;
    }

    /// Whether a renormalisation is waiting for the next idle tick.
    pub fn has_pending_idle(&self) -> bool {
        !self.idle.is_empty()
    }

    /// Resize track `index` on `axis`.
    pub fn set_track_size(&mut self, axis: Axis, index: usize, size: TrackSize) -> Result<(), PlacementError> {
        self.flush_idle();
        match size {
            TrackSize::Weight(w) if !w.is_finite() || w <= 0.0 => {
                return Err(PlacementError::InvalidWeight(w));
            }
            TrackSize::Pixels(px) if !px.is_finite() || px < 0.0 => {
                return Err(PlacementError::InvalidWeight(px));
            }
            _ => {}
        }
        let err = self.track_out_of_range(index);
        if !self.tracks_mut(axis).set_size(index, size) {
            return Err(err);
        }
        self.ctx
            .logger()
            .debug(&format!("grid {:?} track {} set to {:?}", axis, index, size));
        Ok(())
    }

    /// Change the minimum size of track `index` on `axis`.
    pub fn set_track_min(&mut self, axis: Axis, index: usize, min: f64) -> Result<(), PlacementError> {
        self.flush_idle();
        let err = self.track_out_of_range(index);
        if !self.tracks_mut(axis).set_min(index, min) {
            return Err(err);
        }
        Ok(())
    }

    /// Live drag of the divider after track `divider` on `axis`.
    ///
    /// `extent` is the container size along `axis`; it is only read on the
    /// first event of a drag.  Returns the delta actually applied.
    pub fn drag_divider(&mut self, axis: Axis, divider: usize, delta: f64, extent: f64) -> f64 {
        self.flush_idle();
        if divider + 1 >= self.tracks(axis).len() {
            self.ctx
                .logger()
                .warning(&format!("no {:?} divider {} in this grid", axis, divider));
            return 0.0;
        }
        self.tracks_mut(axis)
            .drag_boundary(divider, divider + 1, delta, extent)
    }

    /// Finish a divider drag: restore minimums on both sides of the
    /// divider and schedule renormalisation.
    pub fn complete_drag(&mut self, axis: Axis, divider: usize) {
        if divider + 1 >= self.tracks(axis).len() || !self.tracks(axis).is_live() {
            return;
        }
        if self.tracks_mut(axis).settle(divider, divider + 1) {
            self.ctx.logger().debug(&format!(
                "{:?} divider {} snapped to track minimum",
                axis, divider
            ));
        }
        self.idle.schedule(IdleTask::Renormalize(axis));
    }

    fn flush_idle(&mut self) {
        for task in self.idle.drain() {
            match task {
                IdleTask::Renormalize(axis) => {
                    if self.tracks_mut(axis).renormalize() {
                        self.ctx
                            .logger()
                            .debug(&format!("renormalized {:?} tracks", axis));
                    }
                }
            }
        }
    }

    fn track_out_of_range(&self, index: usize) -> PlacementError {
        let (rows, columns) = self.dimensions();
        PlacementError::OutOfRange {
            bound: Bound::Track,
            value: index,
            rows,
            columns,
        }
    }

    /// Check `params` against the grid and build the record it asks for.
    fn validate(&self, params: &PlacementParams) -> Result<PositionRecord, PlacementError> {
        params.validate()?;
        let (rows, columns) = self.dimensions();
        let row = params.row_or_default();
        let column = params.column_or_default();
        let out = |bound, value| PlacementError::OutOfRange {
            bound,
            value,
            rows,
            columns,
        };
        if row >= rows {
            return Err(out(Bound::Row, row));
        }
        if column >= columns {
            return Err(out(Bound::Column, column));
        }
        if params.row_span > rows - row {
            return Err(out(Bound::RowSpan, row.saturating_add(params.row_span)));
        }
        if params.column_span > columns - column {
            return Err(out(Bound::ColumnSpan, column.saturating_add(params.column_span)));
        }
        Ok(PositionRecord::Grid {
            row,
            column,
            row_span: params.row_span,
            column_span: params.column_span,
        })
    }
}

impl LayoutStrategy for GridLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Grid
    }

    fn context(&self) -> &HostContext {
        &self.ctx
    }

    fn add_panel(&mut self, panel: PanelId, params: PlacementParams) -> Result<(), PlacementError> {
        self.flush_idle();
        let record = self.validate(&params)?;
        if let PositionRecord::Grid { row, column, .. } = record {
            if params.row_weight != 1.0 {
                self.rows.set_size(row, TrackSize::Weight(params.row_weight));
            }
            if params.column_weight != 1.0 {
                self.columns
                    .set_size(column, TrackSize::Weight(params.column_weight));
            }
        }
        if self.table.contains(panel) {
            self.ctx
                .logger()
                .debug(&format!("re-placing {} at {:?}", panel, record));
        } else {
            self.ctx
                .logger()
                .debug(&format!("placed {} at {:?}", panel, record));
        }
        self.table.insert(panel, params, record);
        Ok(())
    }

    fn remove_panel(&mut self, panel: PanelId) {
        self.flush_idle();
        if self.table.remove(panel).is_some() {
            self.ctx.logger().debug(&format!("removed {}", panel));
        }
    }

    fn clear(&mut self) {
        self.flush_idle();
        self.table.clear();
    }

    fn panels(&self) -> Vec<PanelId> {
        self.table.panels()
    }

    fn position_of(&self, panel: PanelId) -> Option<PositionRecord> {
        self.table.record(panel)
    }

    fn params_of(&self, panel: PanelId) -> Option<PlacementParams> {
        self.table.params(panel).cloned()
    }

    fn swap_panels(&mut self, a: PanelId, b: PanelId) {
        self.flush_idle();
        navigator::swap(&mut self.table, a, b, self.ctx.logger());
    }

    fn find_in_direction(&self, panel: PanelId, direction: Direction) -> Option<PanelId> {
        DirectionalNavigator::new(&self.table, self.ctx.logger()).find(panel, direction)
    }

    fn arrange(&self, bounds: Rect) -> Arrangement {
        let rows = track_offsets(bounds.y, &self.rows.resolve(bounds.height));
        let columns = track_offsets(bounds.x, &self.columns.resolve(bounds.width));

        let frames = self
            .table
            .iter()
            .filter_map(|e| {
                let cell = record_rect(e.record, &rows, &columns)?;
                Some(PanelFrame {
                    panel: e.panel,
                    rect: e.params.fit(cell),
                })
            })
            .collect();

        let mut dividers = Vec::new();
        if self.show_dividers {
            let style = self.ctx.divider_style();
            let t = self.divider_thickness;
            let top = rows[0];
            let left = columns[0];
            let height = rows[rows.len() - 1] - top;
            let width = columns[columns.len() - 1] - left;
            for (index, &x) in columns[1..columns.len() - 1].iter().enumerate() {
                dividers.push(DividerFrame {
                    axis: Axis::Horizontal,
                    index,
                    rect: Rect::new(x - t / 2.0, top, t, height),
                    style,
                });
            }
            for (index, &y) in rows[1..rows.len() - 1].iter().enumerate() {
                dividers.push(DividerFrame {
                    axis: Axis::Vertical,
                    index,
                    rect: Rect::new(left, y - t / 2.0, width, t),
                    style,
                });
            }
        }

        Arrangement { frames, dividers }
    }

    fn on_idle(&mut self) {
        self.flush_idle();
    }

    fn as_grid_mut(&mut self) -> Option<&mut GridLayout> {
        Some(self)
    }
}

//  Tests
