//! Linear stack layout.
//!
//! Panels are laid end to end along one axis in addition order.  A panel
//! with an explicit size along the axis gets exactly that many pixels; the
//! others share the rest by their weight on that axis.  Size bounds become
//! the track's minimum and maximum.

use super::tracks::{Track, Tracks};
use super::{Arrangement, LayoutKind, PanelFrame};
use crate::context::HostContext;
use crate::geometry::{track_offsets, Axis, Rect};
use crate::placement::{PanelId, PlacementError, PlacementParams};
use crate::position::{PositionRecord, PositionTable};
use crate::traits::LayoutStrategy;

#[derive(Debug)]
pub struct StackLayout {
    axis: Axis,
    table: PositionTable,
    ctx: HostContext,
}

impl StackLayout {
    /// A stack running along `axis` (`Vertical` stacks top to bottom).
    pub fn new(axis: Axis, ctx: HostContext) -> Self {
        Self {
            axis,
            table: PositionTable::new(),
            ctx,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn tracks(&self) -> Tracks {
        let mut tracks = Tracks::new();
        for entry in self.table.iter() {
            let (min, max) = entry.params.bounds(self.axis);
            let mut track = match entry.params.explicit_extent(self.axis) {
                Some(px) => Track::fixed(px),
                None => Track::weighted(entry.params.weight(self.axis), 0.0),
            };
            track.min = min;
            track.max = max;
            tracks.push(track);
        }
        tracks
    }

    fn reindex(&mut self) {
        for (index, entry) in self.table.iter_mut().enumerate() {
            entry.record = PositionRecord::Stack { index };
        }
    }
}

impl LayoutStrategy for StackLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Stack
    }

    fn context(&self) -> &HostContext {
        &self.ctx
    }

    fn add_panel(&mut self, panel: PanelId, params: PlacementParams) -> Result<(), PlacementError> {
        params.validate()?;
        let index = self
            .table
            .iter()
            .position(|e| e.panel == panel)
            .unwrap_or(self.table.len());
        self.table
            .insert(panel, params, PositionRecord::Stack { index });
        self.ctx
            .logger()
            .debug(&format!("stacked {} at {}", panel, index));
        Ok(())
    }

    fn remove_panel(&mut self, panel: PanelId) {
        if self.table.remove(panel).is_some() {
            self.reindex();
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
        let (origin, extent) = match self.axis {
            Axis::Horizontal => (bounds.x, bounds.width),
            Axis::Vertical => (bounds.y, bounds.height),
        };
        let offsets = track_offsets(origin, &self.tracks().resolve(extent));
        let frames = self
            .table
            .iter()
            .zip(offsets.windows(2))
            .map(|(entry, w)| {
                let cell = match self.axis {
                    Axis::Horizontal => Rect::new(w[0], bounds.y, w[1] - w[0], bounds.height),
                    Axis::Vertical => Rect::new(bounds.x, w[0], bounds.width, w[1] - w[0]),
                };
                PanelFrame {
                    panel: entry.panel,
                    rect: entry.params.fit(cell),
                }
            })
            .collect();
        Arrangement {
            frames,
            dividers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(axis: Axis) -> StackLayout {
        StackLayout::new(axis, HostContext::default())
    }

    #[test]
    fn equal_share_by_default() {
        let mut s = stack(Axis::Vertical);
        for id in 1..=3 {
            s.add_panel(PanelId(id), PlacementParams::default()).unwrap();
        }
        let a = s.arrange(Rect::new(0.0, 0.0, 200.0, 300.0));
        assert_eq!(a.frame_of(PanelId(1)), Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
        assert_eq!(a.frame_of(PanelId(3)), Some(Rect::new(0.0, 200.0, 200.0, 100.0)));
    }

    #[test]
    fn explicit_size_is_fixed_and_rest_is_weighted() {
        let mut s = stack(Axis::Horizontal);
        s.add_panel(PanelId(1), PlacementParams::default().size(Some(100.0), None))
            .unwrap();
        s.add_panel(PanelId(2), PlacementParams::default().weights(3.0, 1.0))
            .unwrap();
        s.add_panel(PanelId(3), PlacementParams::default()).unwrap();
        let a = s.arrange(Rect::new(0.0, 0.0, 500.0, 50.0));
        assert_eq!(a.frame_of(PanelId(1)), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(a.frame_of(PanelId(2)), Some(Rect::new(100.0, 0.0, 300.0, 50.0)));
        assert_eq!(a.frame_of(PanelId(3)), Some(Rect::new(400.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn minimum_is_respected() {
        let mut s = stack(Axis::Vertical);
        s.add_panel(PanelId(1), PlacementParams::default().min_size(None, Some(250.0)))
            .unwrap();
        s.add_panel(PanelId(2), PlacementParams::default()).unwrap();
        let a = s.arrange(Rect::new(0.0, 0.0, 100.0, 300.0));
        assert_eq!(a.frame_of(PanelId(1)).unwrap().height, 250.0);
        assert_eq!(a.frame_of(PanelId(2)).unwrap().height, 50.0);
    }

    #[test]
    fn removal_reindexes() {
        let mut s = stack(Axis::Vertical);
        for id in 1..=3 {
            s.add_panel(PanelId(id), PlacementParams::default()).unwrap();
        }
        s.remove_panel(PanelId(1));
        s.remove_panel(PanelId(1));
        assert_eq!(s.position_of(PanelId(2)), Some(PositionRecord::Stack { index: 0 }));
        assert_eq!(s.position_of(PanelId(3)), Some(PositionRecord::Stack { index: 1 }));
    }

    #[test]
    fn re_adding_keeps_index() {
        let mut s = stack(Axis::Vertical);
        s.add_panel(PanelId(1), PlacementParams::default()).unwrap();
        s.add_panel(PanelId(2), PlacementParams::default()).unwrap();
        s.add_panel(PanelId(1), PlacementParams::default().weights(1.0, 2.0))
            .unwrap();
        assert_eq!(s.panels(), vec![PanelId(1), PanelId(2)]);
        assert_eq!(s.position_of(PanelId(1)), Some(PositionRecord::Stack { index: 0 }));
        assert_eq!(s.params_of(PanelId(1)).unwrap().row_weight, 2.0);
    }
}
