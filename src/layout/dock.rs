//! Dock-to-edge layout.
//!
//! Panels are processed in addition order.  Each docked panel cuts a band
//! off its edge of the space that is still free; the last panel without an
//! edge fills whatever is left.  Earlier panels without an edge dock to
//! the left.

use super::{Arrangement, LayoutKind, PanelFrame};
use crate::context::HostContext;
use crate::geometry::{Edge, Rect};
use crate::placement::{PanelId, PlacementError, PlacementParams};
use crate::position::{PositionRecord, PositionTable};
use crate::traits::LayoutStrategy;
use serde::{Deserialize, Serialize};

/// Dock layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Band thickness for a docked panel that gives neither an explicit
    /// size nor a minimum along its edge's axis (px).
    pub default_extent: f64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            default_extent: 200.0,
        }
    }
}

#[derive(Debug)]
pub struct DockLayout {
    table: PositionTable,
    default_extent: f64,
    ctx: HostContext,
}

impl DockLayout {
    pub fn new(ctx: HostContext) -> Self {
        Self::from_config(&DockConfig::default(), ctx)
    }

    pub fn from_config(config: &DockConfig, ctx: HostContext) -> Self {
        Self {
            table: PositionTable::new(),
            default_extent: config.default_extent.max(0.0),
            ctx,
        }
    }

    /// Index of the panel that fills the remaining space.
    fn fill_index(&self) -> Option<usize> {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, e)| e.params.dock.is_none())
            .map(|(i, _)| i)
            .last()
    }

    fn band_extent(&self, params: &PlacementParams, edge: Edge) -> f64 {
        let axis = edge.axis();
        params
            .explicit_extent(axis)
            .or_else(|| Some(params.bounds(axis).0).filter(|&min| min > 0.0))
            .unwrap_or(self.default_extent)
    }
}

impl LayoutStrategy for DockLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Dock
    }

    fn context(&self) -> &HostContext {
        &self.ctx
    }

    fn add_panel(&mut self, panel: PanelId, params: PlacementParams) -> Result<(), PlacementError> {
        params.validate()?;
        let record = PositionRecord::Dock { edge: params.dock };
        self.ctx
            .logger()
            .debug(&format!("docked {} at {:?}", panel, params.dock));
        self.table.insert(panel, params, record);
        Ok(())
    }

    fn remove_panel(&mut self, panel: PanelId) {
        if self.table.remove(panel).is_some() {
            self.ctx.logger().debug(&format!("removed {}", panel));
        }
    }

    fn clear(&mut self) {
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

    fn arrange(&self, bounds: Rect) -> Arrangement {
        let fill = self.fill_index();
        let mut rest = bounds;
        let mut bands = Vec::with_capacity(self.table.len());
        for (i, entry) in self.table.iter().enumerate() {
            if Some(i) == fill {
                bands.push(None);
                continue;
            }
            let edge = entry.params.dock.unwrap_or(Edge::Left);
            let (band, remainder) = rest.split_edge(edge, self.band_extent(&entry.params, edge));
            rest = remainder;
            bands.push(Some(band));
        }
        let frames = self
            .table
            .iter()
            .zip(bands)
            .map(|(entry, band)| PanelFrame {
                panel: entry.panel,
                rect: entry.params.fit(band.unwrap_or(rest)),
            })
            .collect();
        Arrangement {
            frames,
            dividers: Vec::new(),
        }
    }
}

//  Tests
