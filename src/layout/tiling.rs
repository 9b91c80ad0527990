//! Automatic tiling.
//!
//! [`AutoTilingLayout`] keeps panels in a *tiling order* and derives every
//! position from that order and the current [`TilingMode`].  Any mutation
//! discards the tracks and records and rebuilds them from scratch.
//!
//! # Modes
//!
//! | Mode          | Arrangement                                               |
//! |---------------|-----------------------------------------------------------|
//! | `Tall`        | one row, one column per panel                             |
//! | `Wide`        | one column, one row per panel                             |
//! | `Grid`        | `ceil(sqrt(n))` columns, filled row by row                |
//! | `MasterStack` | first panel on the left at `master_ratio` width, spanning |
//! |               | every row; the others stacked in the right column         |
//!
//! `Auto` picks one by panel count: 1 → `Grid`, 2 → `Tall`, 3 or 4 → `Grid`,
//! 5 or more → `MasterStack`.
//!
//! # Divider tracks
//!
//! The rebuilt grid interleaves a thin fixed track between every pair of
//! real tracks, so real track `k` lives at grid index `2k` and the seam
//! after it at `2k + 1`.  [`position_of`](LayoutStrategy::position_of)
//! reports these expanded records; [`AutoTilingLayout::logical_cell`]
//! reports positions in real tracks.

use super::tracks::{Track, Tracks, DEFAULT_MIN_COLUMN_WIDTH, DEFAULT_MIN_ROW_HEIGHT};
use super::{record_rect, Arrangement, DividerFrame, LayoutKind, PanelFrame};
use crate::command::Direction;
use crate::context::HostContext;
use crate::geometry::{track_offsets, Axis, Rect};
use crate::idle::{IdleQueue, IdleTask};
use crate::navigator::DirectionalNavigator;
use crate::placement::{PanelId, PlacementError, PlacementParams};
use crate::position::{PositionRecord, PositionTable};
use crate::traits::LayoutStrategy;
use serde::{Deserialize, Serialize};

/// How the auto-tiler arranges its panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TilingMode {
    /// Choose by panel count.
    #[default]
    Auto,
    MasterStack,
    Wide,
    Tall,
    Grid,
}

impl TilingMode {
    /// The concrete mode `Auto` selects for `count` panels.
    pub fn for_count(count: usize) -> TilingMode {
        match count {
            0 | 1 => TilingMode::Grid,
            2 => TilingMode::Tall,
            3 | 4 => TilingMode::Grid,
            _ => TilingMode::MasterStack,
        }
    }
}

/// Auto-tiling settings.
///
/// ```json
/// { "master_ratio": 0.6, "divider_thickness": 4.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    /// Share of the width given to the master column (clamped to
    /// `0.1..=0.9`).
    pub master_ratio: f64,
    /// Thickness of the synthetic divider tracks (px).
    pub divider_thickness: f64,
    pub min_row_height: f64,
    pub min_column_width: f64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            master_ratio: 0.6,
            divider_thickness: 4.0,
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
        }
    }
}

/// A divider cell in the expanded grid.
///
/// `index` is the seam in real tracks: seam `k` separates real tracks `k`
/// and `k + 1` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerCell {
    pub axis: Axis,
    pub index: usize,
    pub row: usize,
    pub column: usize,
}

/// The arrangement for one mode, in real tracks.
struct Plan {
    columns: Vec<f64>,
    rows: Vec<f64>,
    /// Logical records, parallel to the tiling order.
    cells: Vec<PositionRecord>,
}

impl Plan {
    fn new(mode: TilingMode, count: usize, master_ratio: f64) -> Self {
        match mode {
            _ if count == 0 => Plan {
                columns: Vec::new(),
                rows: Vec::new(),
                cells: Vec::new(),
            },
            TilingMode::Tall => Plan {
                columns: vec![1.0; count],
                rows: vec![1.0],
                cells: (0..count).map(|i| PositionRecord::cell(0, i)).collect(),
            },
            TilingMode::Wide => Plan {
                columns: vec![1.0],
                rows: vec![1.0; count],
                cells: (0..count).map(|i| PositionRecord::cell(i, 0)).collect(),
            },
            TilingMode::MasterStack if count > 1 => {
                let stack = count - 1;
                let master = PositionRecord::Grid {
                    row: 0,
                    column: 0,
                    row_span: stack,
                    column_span: 1,
                };
                Plan {
                    columns: vec![master_ratio, 1.0 - master_ratio],
                    rows: vec![1.0; stack],
                    cells: std::iter::once(master)
                        .chain((0..stack).map(|i| PositionRecord::cell(i, 1)))
                        .collect(),
                }
            }
            TilingMode::MasterStack | TilingMode::Grid | TilingMode::Auto => {
                let mut columns = 1;
                while columns * columns < count {
                    columns += 1;
                }
                let rows = count.div_ceil(columns);
                Plan {
                    columns: vec![1.0; columns],
                    rows: vec![1.0; rows],
                    cells: (0..count)
                        .map(|i| PositionRecord::cell(i / columns, i % columns))
                        .collect(),
                }
            }
        }
    }
}

/// Map a record in real tracks into the expanded grid.
fn expand(record: PositionRecord) -> PositionRecord {
    match record {
        PositionRecord::Grid {
            row,
            column,
            row_span,
            column_span,
        } => PositionRecord::Grid {
            row: 2 * row,
            column: 2 * column,
            row_span: 2 * row_span - 1,
            column_span: 2 * column_span - 1,
        },
        other => other,
    }
}

/// Inverse of [`expand`].
fn contract(record: PositionRecord) -> PositionRecord {
    match record {
        PositionRecord::Grid {
            row,
            column,
            row_span,
            column_span,
        } => PositionRecord::Grid {
            row: row / 2,
            column: column / 2,
            row_span: (row_span + 1) / 2,
            column_span: (column_span + 1) / 2,
        },
        other => other,
    }
}

fn covers(record: PositionRecord, r: usize, c: usize) -> bool {
    match record {
        PositionRecord::Grid {
            row,
            column,
            row_span,
            column_span,
        } => (row..row + row_span).contains(&r) && (column..column + column_span).contains(&c),
        _ => false,
    }
}

/// Real tracks interleaved with fixed divider tracks.
fn interleave(weights: &[f64], min: f64, divider: f64) -> Tracks {
    let mut tracks = Tracks::new();
    for (k, &w) in weights.iter().enumerate() {
        if k > 0 {
            tracks.push(Track::fixed(divider));
        }
        tracks.push(Track::weighted(w, min));
    }
    tracks
}

/// Tiles panels automatically from their order and a [`TilingMode`].
#[derive(Debug)]
pub struct AutoTilingLayout {
    mode: TilingMode,
    order: Vec<PanelId>,
    table: PositionTable,
    rows: Tracks,
    columns: Tracks,
    divider_cells: Vec<DividerCell>,
    idle: IdleQueue,
    master_ratio: f64,
    divider_thickness: f64,
    min_row_height: f64,
    min_column_width: f64,
    ctx: HostContext,
}

impl AutoTilingLayout {
    pub fn new(ctx: HostContext) -> Self {
        Self::from_config(&TilingConfig::default(), ctx)
    }

    pub fn from_config(config: &TilingConfig, ctx: HostContext) -> Self {
        Self {
            mode: TilingMode::Auto,
            order: Vec::new(),
            table: PositionTable::new(),
            rows: Tracks::new(),
            columns: Tracks::new(),
            divider_cells: Vec::new(),
            idle: IdleQueue::new(),
            master_ratio: config.master_ratio.clamp(0.1, 0.9),
            divider_thickness: config.divider_thickness.max(0.0),
            min_row_height: config.min_row_height,
            min_column_width: config.min_column_width,
            ctx,
        }
    }

    /// The requested mode (possibly `Auto`).
    pub fn mode(&self) -> TilingMode {
        self.mode
    }

    /// The mode actually used for the current panel count.
    pub fn effective_mode(&self) -> TilingMode {
        match self.mode {
            TilingMode::Auto => TilingMode::for_count(self.order.len()),
            mode => mode,
        }
    }

    pub fn set_mode(&mut self, mode: TilingMode) {
        if mode != self.mode {
            self.ctx
                .logger()
                .info(&format!("tiling mode {:?} -> {:?}", self.mode, mode));
        }
        self.mode = mode;
        self.relayout();
    }

    /// Panels in tiling order.  The first one is the master.
    pub fn order(&self) -> &[PanelId] {
        &self.order
    }

    /// A panel's position in real tracks, ignoring divider tracks.
    pub fn logical_cell(&self, panel: PanelId) -> Option<PositionRecord> {
        self.table.record(panel).map(contract)
    }

    /// Number of real `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        ((self.rows.len() + 1) / 2, (self.columns.len() + 1) / 2)
    }

    /// Expanded tracks along `axis`, divider tracks included.
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

    pub fn divider_cells(&self) -> &[DividerCell] {
        &self.divider_cells
    }

    /// Move `panel` to the master position by swapping it with the current
    /// master.  Returns `false` for an unknown panel.
    pub fn promote(&mut self, panel: PanelId) -> bool {
        let Some(index) = self.order.iter().position(|&p| p == panel) else {
            self.ctx
                .logger()
                .warning(&format!("promote failed: {} not found", panel));
            return false;
        };
        if index != 0 {
            self.order.swap(0, index);
            self.relayout();
        }
        true
    }

    /// Rebuild tracks, records and divider cells from the tiling order.
    ///
    /// Drag adjustments and pending renormalisation are discarded.
    pub fn relayout(&mut self) {
        self.idle.clear();
        let mode = self.effective_mode();
        let plan = Plan::new(mode, self.order.len(), self.master_ratio);

        self.columns = interleave(&plan.columns, self.min_column_width, self.divider_thickness);
        self.rows = interleave(&plan.rows, self.min_row_height, self.divider_thickness);
        for (&panel, &cell) in self.order.iter().zip(&plan.cells) {
            self.table.set_record(panel, expand(cell));
        }
        self.divider_cells = self.seam_cells(&plan);

        self.ctx.logger().debug(&format!(
            "tiled {} panel(s) as {:?} ({}x{})",
            self.order.len(),
            mode,
            plan.rows.len(),
            plan.columns.len()
        ));
    }

    /// One divider cell per seam and crossing real track, skipping cells a
    /// panel spans over.
    fn seam_cells(&self, plan: &Plan) -> Vec<DividerCell> {
        let records: Vec<PositionRecord> = plan.cells.iter().map(|&c| expand(c)).collect();
        let free = |row: usize, column: usize| !records.iter().any(|&r| covers(r, row, column));
        let (rows, columns) = (plan.rows.len(), plan.columns.len());

        let mut cells = Vec::new();
        for index in 0..columns.saturating_sub(1) {
            for r in 0..rows {
                let (row, column) = (2 * r, 2 * index + 1);
                if free(row, column) {
                    cells.push(DividerCell {
                        axis: Axis::Horizontal,
                        index,
                        row,
                        column,
                    });
                }
            }
        }
        for index in 0..rows.saturating_sub(1) {
            for c in 0..columns {
                let (row, column) = (2 * index + 1, 2 * c);
                if free(row, column) {
                    cells.push(DividerCell {
                        axis: Axis::Vertical,
                        index,
                        row,
                        column,
                    });
                }
            }
        }
        cells
    }

    fn seam_exists(&self, axis: Axis, seam: usize) -> bool {
        let real = (self.tracks(axis).len() + 1) / 2;
        seam + 1 < real
    }

    /// Live drag of real seam `seam` on `axis`.  Returns the delta applied.
    pub fn drag_divider(&mut self, axis: Axis, seam: usize, delta: f64, extent: f64) -> f64 {
        self.flush_idle();
        if !self.seam_exists(axis, seam) {
            self.ctx
                .logger()
                .warning(&format!("no {:?} seam {} in this tiling", axis, seam));
            return 0.0;
        }
        self.tracks_mut(axis)
            .drag_boundary(2 * seam, 2 * seam + 2, delta, extent)
    }

    /// Finish a drag on `seam`: restore minimums and schedule
    /// renormalisation.
    pub fn complete_drag(&mut self, axis: Axis, seam: usize) {
        if !self.seam_exists(axis, seam) || !self.tracks(axis).is_live() {
            return;
        }
        self.tracks_mut(axis).settle(2 * seam, 2 * seam + 2);
        self.idle.schedule(IdleTask::Renormalize(axis));
    }

    pub fn has_pending_idle(&self) -> bool {
        !self.idle.is_empty()
    }

    fn flush_idle(&mut self) {
        for task in self.idle.drain() {
            match task {
                IdleTask::Renormalize(axis) => {
                    self.tracks_mut(axis).renormalize();
                }
            }
        }
    }
}

impl LayoutStrategy for AutoTilingLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Tiling
    }

    fn context(&self) -> &HostContext {
        &self.ctx
    }

    fn add_panel(&mut self, panel: PanelId, params: PlacementParams) -> Result<(), PlacementError> {
        params.validate()?;
        if !self.order.contains(&panel) {
            self.order.push(panel);
        }
        self.table
            .insert(panel, params, PositionRecord::cell(0, 0));
        self.relayout();
        Ok(())
    }

    fn remove_panel(&mut self, panel: PanelId) {
        if self.table.remove(panel).is_none() {
            return;
        }
        self.order.retain(|&p| p != panel);
        self.relayout();
    }

    fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
        self.relayout();
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
        let ia = self.order.iter().position(|&p| p == a);
        let ib = self.order.iter().position(|&p| p == b);
        match (ia, ib) {
            (Some(ia), Some(ib)) => {
                self.order.swap(ia, ib);
                self.relayout();
            }
            (None, _) => self
                .ctx
                .logger()
                .warning(&format!("swap failed: {} not found", a)),
            (_, None) => self
                .ctx
                .logger()
                .warning(&format!("swap failed: {} not found", b)),
        }
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

        let style = self.ctx.divider_style();
        let dividers = self
            .divider_cells
            .iter()
            .filter_map(|d| {
                let rect = record_rect(PositionRecord::cell(d.row, d.column), &rows, &columns)?;
                Some(DividerFrame {
                    axis: d.axis,
                    index: d.index,
                    rect,
                    style,
                })
            })
            .collect();

        Arrangement { frames, dividers }
    }

    fn on_idle(&mut self) {
        self.flush_idle();
    }

    fn as_tiling_mut(&mut self) -> Option<&mut AutoTilingLayout> {
        Some(self)
    }
}

//  Tests
