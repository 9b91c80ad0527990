//! The position model shared by every layout.
//!
//! Each layout keeps a [`PositionTable`]: one entry per panel, in the order
//! panels were added, holding the caller's [`PlacementParams`] and the
//! layout's own [`PositionRecord`].  The
//! [`navigator`](crate::navigator) only ever reads this table, which is
//! what lets direction finding and swapping be written once.

use crate::geometry::Edge;
use crate::placement::{PanelId, PlacementParams};
use serde::Serialize;

/// Where a panel currently sits, in the addressing scheme of its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionRecord {
    /// Grid-addressable layouts (grid, auto-tiling).
    Grid {
        row: usize,
        column: usize,
        row_span: usize,
        column_span: usize,
    },
    /// Fixed-slot presets.
    Slot { index: usize },
    /// Dock layout.  `None` is the fill region.
    Dock { edge: Option<Edge> },
    /// Linear stack.
    Stack { index: usize },
}

impl PositionRecord {
    /// A 1×1 grid record.
    pub fn cell(row: usize, column: usize) -> Self {
        PositionRecord::Grid {
            row,
            column,
            row_span: 1,
            column_span: 1,
        }
    }
}

/// One row of a [`PositionTable`].
#[derive(Debug, Clone)]
pub struct Entry {
    pub panel: PanelId,
    pub params: PlacementParams,
    pub record: PositionRecord,
}

/// Ordered `panel -> (params, record)` table.
///
/// Iteration order is addition order.  Panel counts are small, so lookups
/// are linear scans over a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    entries: Vec<Entry>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or re-place a panel.
    ///
    /// A panel that is already present keeps its place in the order; only
    /// its params and record are replaced.
    pub fn insert(&mut self, panel: PanelId, params: PlacementParams, record: PositionRecord) {
        match self.entries.iter_mut().find(|e| e.panel == panel) {
            Some(entry) => {
                entry.params = params;
                entry.record = record;
            }
            None => self.entries.push(Entry {
                panel,
                params,
                record,
            }),
        }
    }

    /// Remove a panel, returning its entry if it was present.
    pub fn remove(&mut self, panel: PanelId) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.panel == panel)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, panel: PanelId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.panel == panel)
    }

    pub fn record(&self, panel: PanelId) -> Option<PositionRecord> {
        self.get(panel).map(|e| e.record)
    }

    pub fn params(&self, panel: PanelId) -> Option<&PlacementParams> {
        self.get(panel).map(|e| &e.params)
    }

    /// Overwrite the record of a present panel.  Returns `false` if the
    /// panel is unknown.
    pub fn set_record(&mut self, panel: PanelId, record: PositionRecord) -> bool {
        match self.entries.iter_mut().find(|e| e.panel == panel) {
            Some(entry) => {
                entry.record = record;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        self.get(panel).is_some()
    }

    /// Exchange the records of two panels.  Params stay with their panel.
    ///
    /// Returns `false` and changes nothing if either panel is missing.
    pub fn swap_records(&mut self, a: PanelId, b: PanelId) -> bool {
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        let ra = self.entries[ia].record;
        self.entries[ia].record = self.entries[ib].record;
        self.entries[ib].record = ra;
        true
    }

    /// The panel whose record equals `record`, if any.
    pub fn occupant(&self, record: PositionRecord) -> Option<PanelId> {
        self.entries
            .iter()
            .find(|e| e.record == record)
            .map(|e| e.panel)
    }

    pub fn panels(&self) -> Vec<PanelId> {
        self.entries.iter().map(|e| e.panel).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, panel: PanelId) -> Option<usize> {
        self.entries.iter().position(|e| e.panel == panel)
    }
}
