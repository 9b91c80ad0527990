//! Directional navigation over a [`PositionTable`].
//!
//! Written once against [`PositionRecord`], so every layout gets the same
//! behaviour for the same addressing scheme:
//!
//! | Record  | "Nearest panel to the left/right/up/down" means            |
//! |---------|-------------------------------------------------------------|
//! | `Grid`  | closest cell centre in that direction (metric below)       |
//! | `Slot`  | the occupant of the neighbour slot from a static table     |
//! | `Dock`  | nothing: dock adjacency is implicit                        |
//! | `Stack` | nothing: stack adjacency is implicit                       |
//!
//! # Grid metric
//!
//! A cell's centre is `(row + row_span / 2, column + column_span / 2)`.  A
//! candidate qualifies when its centre lies strictly further along the
//! requested axis *and* its span overlaps the origin's span on the cross
//! axis.  Among qualifiers the smallest `primary + 0.5 × cross` wins, which
//! prefers straight lines over diagonal jumps.  Ties go to the panel added
//! first, so the result only depends on the table's contents and order.

use crate::command::Direction;
use crate::geometry::Axis;
use crate::placement::PanelId;
use crate::position::{PositionRecord, PositionTable};
use crate::traits::Logger;

/// Weight of the cross-axis distance in the grid metric.
const CROSS_AXIS_WEIGHT: f64 = 0.5;

/// Neighbour table for fixed-slot layouts: `neighbours[slot][direction]`
/// with directions indexed by [`Direction::index`].
pub type SlotNeighbours = [[Option<usize>; 4]];

/// Finds panels by direction in one layout's table.
pub struct DirectionalNavigator<'a> {
    table: &'a PositionTable,
    logger: &'a dyn Logger,
    slots: Option<&'a SlotNeighbours>,
}

impl<'a> DirectionalNavigator<'a> {
    pub fn new(table: &'a PositionTable, logger: &'a dyn Logger) -> Self {
        Self {
            table,
            logger,
            slots: None,
        }
    }

    /// Use `neighbours` to resolve `Slot` records.
    pub fn with_slot_neighbours(mut self, neighbours: &'a SlotNeighbours) -> Self {
        self.slots = Some(neighbours);
        self
    }

    /// The nearest other panel from `panel` in `direction`.
    ///
    /// An unknown `panel` is logged at warning level and yields `None`;
    /// hitting the edge of the layout yields `None` silently.
    pub fn find(&self, panel: PanelId, direction: Direction) -> Option<PanelId> {
        let Some(record) = self.table.record(panel) else {
            self.logger
                .warning(&format!("find {}: {} is not in this layout", direction, panel));
            return None;
        };
        match record {
            PositionRecord::Grid { .. } => self.nearest_cell(panel, CellSpan::of(record)?, direction),
            PositionRecord::Slot { index } => {
                let target = self.slots?.get(index)?[direction.index()]?;
                self.table.occupant(PositionRecord::Slot { index: target })
            }
            PositionRecord::Dock { .. } | PositionRecord::Stack { .. } => {
                self.logger
                    .debug(&format!("find {}: no spatial adjacency for {}", direction, panel));
                None
            }
        }
    }

    fn nearest_cell(&self, origin: PanelId, from: CellSpan, direction: Direction) -> Option<PanelId> {
        let mut best: Option<(PanelId, f64)> = None;
        for entry in self.table.iter() {
            if entry.panel == origin {
                continue;
            }
            let Some(candidate) = CellSpan::of(entry.record) else {
                continue;
            };
            let Some(score) = from.score(&candidate, direction) else {
                continue;
            };
            let better = match best {
                Some((_, best_score)) => score < best_score,
                None => true,
            };
            if better {
                best = Some((entry.panel, score));
            }
        }
        best.map(|(panel, _)| panel)
    }
}

/// Exchange the records of `a` and `b`.
///
/// Returns `false`, logs a warning and changes nothing when either panel
/// is unknown.
pub fn swap(table: &mut PositionTable, a: PanelId, b: PanelId, logger: &dyn Logger) -> bool {
    if a == b {
        return table.contains(a);
    }
    if !table.swap_records(a, b) {
        let missing = if table.contains(a) { b } else { a };
        logger.warning(&format!("swap failed: {} not found", missing));
        return false;
    }
    logger.debug(&format!("swapped {} and {}", a, b));
    true
}

/// The rows and columns a grid record covers.
#[derive(Debug, Clone, Copy)]
struct CellSpan {
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
}

impl CellSpan {
    fn of(record: PositionRecord) -> Option<Self> {
        match record {
            PositionRecord::Grid {
                row,
                column,
                row_span,
                column_span,
            } => Some(Self {
                row,
                column,
                row_span,
                column_span,
            }),
            _ => None,
        }
    }

    fn centre(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.row as f64 + self.row_span as f64 / 2.0,
            Axis::Horizontal => self.column as f64 + self.column_span as f64 / 2.0,
        }
    }

    fn range(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::Vertical => (self.row, self.row.saturating_add(self.row_span)),
            Axis::Horizontal => (self.column, self.column.saturating_add(self.column_span)),
        }
    }

    fn overlaps(&self, other: &CellSpan, axis: Axis) -> bool {
        let (a0, a1) = self.range(axis);
        let (b0, b1) = other.range(axis);
        a0 < b1 && b0 < a1
    }

    /// Metric for `candidate` seen from `self`, or `None` if it does not lie
    /// in `direction`.
    fn score(&self, candidate: &CellSpan, direction: Direction) -> Option<f64> {
        let axis = direction.axis();
        let cross = axis.cross();
        let delta = candidate.centre(axis) - self.centre(axis);
        let primary = if direction.is_forward() { delta } else { -delta };
        if primary <= 0.0 || !self.overlaps(candidate, cross) {
            return None;
        }
        let cross_delta = (candidate.centre(cross) - self.centre(cross)).abs();
        Some(primary + CROSS_AXIS_WEIGHT * cross_delta)
    }
}
