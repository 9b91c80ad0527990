//! Fixed-slot presets.
//!
//! A preset is a static [`SlotTemplate`]: column and row proportions, a
//! list of named slots laid over that grid, and a neighbour table used for
//! directional navigation.  One [`FixedSlotLayout`] drives all of them.
//!
//! | Preset          | Slots (canonical order)                              |
//! |-----------------|------------------------------------------------------|
//! | `Focus`         | Main 80% · Sidebar 20%                               |
//! | `Communication` | List 40% full height · Detail / Compose stacked 60%  |
//! | `Coding`        | Explorer 30% · Editor / Terminal 40% · Inspector 30% |
//! | `Dashboard`     | TopLeft · TopRight · BottomLeft · BottomRight        |
//! | `Monitoring`    | TopLeft · TopCenter · TopRight · Bottom (full width) |

use super::tracks::Tracks;
use super::{record_rect, Arrangement, LayoutKind, PanelFrame};
use crate::command::Direction;
use crate::context::HostContext;
use crate::geometry::{track_offsets, Rect};
use crate::navigator::{self, DirectionalNavigator, SlotNeighbours};
use crate::placement::{PanelId, PlacementError, PlacementParams};
use crate::position::{PositionRecord, PositionTable};
use crate::traits::LayoutStrategy;
use serde::{Deserialize, Serialize};

/// The built-in slot presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotPreset {
    Focus,
    Communication,
    Coding,
    Dashboard,
    Monitoring,
}

impl SlotPreset {
    pub const ALL: [SlotPreset; 5] = [
        SlotPreset::Focus,
        SlotPreset::Communication,
        SlotPreset::Coding,
        SlotPreset::Dashboard,
        SlotPreset::Monitoring,
    ];

    pub fn name(self) -> &'static str {
        self.template().name
    }

    pub fn template(self) -> &'static SlotTemplate {
        match self {
            SlotPreset::Focus => &FOCUS,
            SlotPreset::Communication => &COMMUNICATION,
            SlotPreset::Coding => &CODING,
            SlotPreset::Dashboard => &DASHBOARD,
            SlotPreset::Monitoring => &MONITORING,
        }
    }
}

/// One named region of a template, in template grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl SlotSpec {
    const fn new(name: &'static str, row: usize, column: usize) -> Self {
        Self {
            name,
            row,
            column,
            row_span: 1,
            column_span: 1,
        }
    }

    const fn span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    fn record(&self) -> PositionRecord {
        PositionRecord::Grid {
            row: self.row,
            column: self.column,
            row_span: self.row_span,
            column_span: self.column_span,
        }
    }
}

/// Static description of a preset.
#[derive(Debug)]
pub struct SlotTemplate {
    pub name: &'static str,
    /// Column proportions.
    pub columns: &'static [f64],
    /// Row proportions.
    pub rows: &'static [f64],
    pub slots: &'static [SlotSpec],
    /// `neighbours[slot][direction]`, see [`Direction::index`].
    pub neighbours: &'static SlotNeighbours,
}

const L: usize = 0;
const R: usize = 1;
const U: usize = 2;
const D: usize = 3;

/// Build a neighbour row from `(direction, slot)` pairs.
const fn links<const N: usize>(pairs: [(usize, usize); N]) -> [Option<usize>; 4] {
    let mut row = [None; 4];
    let mut i = 0;
    while i < N {
        row[pairs[i].0] = Some(pairs[i].1);
        i += 1;
    }
    row
}

static FOCUS: SlotTemplate = SlotTemplate {
    name: "focus",
    columns: &[80.0, 20.0],
    rows: &[1.0],
    slots: &[SlotSpec::new("Main", 0, 0), SlotSpec::new("Sidebar", 0, 1)],
    neighbours: &[links([(R, 1)]), links([(L, 0)])],
};

static COMMUNICATION: SlotTemplate = SlotTemplate {
    name: "communication",
    columns: &[40.0, 60.0],
    rows: &[1.0, 1.0],
    slots: &[
        SlotSpec::new("List", 0, 0).span(2, 1),
        SlotSpec::new("Detail", 0, 1),
        SlotSpec::new("Compose", 1, 1),
    ],
    neighbours: &[
        links([(R, 1)]),
        links([(L, 0), (D, 2)]),
        links([(L, 0), (U, 1)]),
    ],
};

static CODING: SlotTemplate = SlotTemplate {
    name: "coding",
    columns: &[30.0, 40.0, 30.0],
    rows: &[1.0, 1.0],
    slots: &[
        SlotSpec::new("Explorer", 0, 0).span(2, 1),
        SlotSpec::new("Editor", 0, 1),
        SlotSpec::new("Terminal", 1, 1),
        SlotSpec::new("Inspector", 0, 2).span(2, 1),
    ],
    neighbours: &[
        links([(R, 1)]),
        links([(L, 0), (R, 3), (D, 2)]),
        links([(L, 0), (R, 3), (U, 1)]),
        links([(L, 1)]),
    ],
};

static DASHBOARD: SlotTemplate = SlotTemplate {
    name: "dashboard",
    columns: &[1.0, 1.0],
    rows: &[1.0, 1.0],
    slots: &[
        SlotSpec::new("TopLeft", 0, 0),
        SlotSpec::new("TopRight", 0, 1),
        SlotSpec::new("BottomLeft", 1, 0),
        SlotSpec::new("BottomRight", 1, 1),
    ],
    neighbours: &[
        links([(R, 1), (D, 2)]),
        links([(L, 0), (D, 3)]),
        links([(R, 3), (U, 0)]),
        links([(L, 2), (U, 1)]),
    ],
};

static MONITORING: SlotTemplate = SlotTemplate {
    name: "monitoring",
    columns: &[1.0, 1.0, 1.0],
    rows: &[1.0, 1.0],
    slots: &[
        SlotSpec::new("TopLeft", 0, 0),
        SlotSpec::new("TopCenter", 0, 1),
        SlotSpec::new("TopRight", 0, 2),
        SlotSpec::new("Bottom", 1, 0).span(1, 3),
    ],
    neighbours: &[
        links([(R, 1), (D, 3)]),
        links([(L, 0), (R, 2), (D, 3)]),
        links([(L, 1), (D, 3)]),
        links([(U, 1)]),
    ],
};

/// A layout with a fixed set of named slots.
#[derive(Debug)]
pub struct FixedSlotLayout {
    preset: SlotPreset,
    template: &'static SlotTemplate,
    table: PositionTable,
    ctx: HostContext,
}

impl FixedSlotLayout {
    pub fn new(preset: SlotPreset, ctx: HostContext) -> Self {
        Self {
            preset,
            template: preset.template(),
            table: PositionTable::new(),
            ctx,
        }
    }

    pub fn preset(&self) -> SlotPreset {
        self.preset
    }

    /// Slot names in canonical order.
    pub fn slot_names(&self) -> Vec<&'static str> {
        self.template.slots.iter().map(|s| s.name).collect()
    }

    pub fn slot_of(&self, panel: PanelId) -> Option<usize> {
        match self.table.record(panel)? {
            PositionRecord::Slot { index } => Some(index),
            _ => None,
        }
    }

    pub fn occupant(&self, slot: usize) -> Option<PanelId> {
        self.table.occupant(PositionRecord::Slot { index: slot })
    }

    /// Occupant of `slot` other than `panel`.
    fn held_by_other(&self, slot: usize, panel: PanelId) -> Option<PanelId> {
        self.occupant(slot).filter(|&p| p != panel)
    }

    /// Choose the slot for `panel`, or say why there is none.
    fn choose_slot(&self, panel: PanelId, params: &PlacementParams) -> Result<usize, PlacementError> {
        let layout = self.template.name;
        let slots = self.template.slots;

        if let Some(slot) = params.slot {
            if slot >= slots.len() {
                return Err(PlacementError::UnknownSlot {
                    layout,
                    slot,
                    slots: slots.len(),
                });
            }
            if let Some(occupant) = self.held_by_other(slot, panel) {
                return Err(PlacementError::SlotOccupied {
                    layout,
                    slot,
                    occupant,
                });
            }
            return Ok(slot);
        }

        if let (Some(row), Some(column)) = (params.row, params.column) {
            let hit = slots
                .iter()
                .position(|s| s.row == row && s.column == column)
                .filter(|&i| self.held_by_other(i, panel).is_none());
            if let Some(slot) = hit {
                return Ok(slot);
            }
        }

        if let Some(current) = self.slot_of(panel) {
            return Ok(current);
        }

        (0..slots.len())
            .find(|&i| self.occupant(i).is_none())
            .ok_or(PlacementError::SlotFull { layout })
    }
}

impl LayoutStrategy for FixedSlotLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Slots(self.preset)
    }

    fn context(&self) -> &HostContext {
        &self.ctx
    }

    fn add_panel(&mut self, panel: PanelId, params: PlacementParams) -> Result<(), PlacementError> {
        params.validate()?;
        let slot = self.choose_slot(panel, &params)?;
        self.ctx.logger().debug(&format!(
            "{} -> {} slot {}",
            panel, self.template.name, self.template.slots[slot].name
        ));
        self.table
            .insert(panel, params, PositionRecord::Slot { index: slot });
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

    fn swap_panels(&mut self, a: PanelId, b: PanelId) {
        navigator::swap(&mut self.table, a, b, self.ctx.logger());
    }

    fn find_in_direction(&self, panel: PanelId, direction: Direction) -> Option<PanelId> {
        DirectionalNavigator::new(&self.table, self.ctx.logger())
            .with_slot_neighbours(self.template.neighbours)
            .find(panel, direction)
    }

    fn arrange(&self, bounds: Rect) -> Arrangement {
        let rows = track_offsets(
            bounds.y,
            &Tracks::from_weights(self.template.rows, 0.0).resolve(bounds.height),
        );
        let columns = track_offsets(
            bounds.x,
            &Tracks::from_weights(self.template.columns, 0.0).resolve(bounds.width),
        );
        let frames = self
            .table
            .iter()
            .filter_map(|e| {
                let PositionRecord::Slot { index } = e.record else {
                    return None;
                };
                let spec = self.template.slots.get(index)?;
                let cell = record_rect(spec.record(), &rows, &columns)?;
                Some(PanelFrame {
                    panel: e.panel,
                    rect: e.params.fit(cell),
                })
            })
            .collect();
        Arrangement {
            frames,
            dividers: Vec::new(),
        }
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::recording_context;

    fn layout(preset: SlotPreset) -> FixedSlotLayout {
        FixedSlotLayout::new(preset, HostContext::default())
    }

    fn fill(l: &mut FixedSlotLayout) {
        for slot in 0..l.slot_names().len() {
            l.add_panel(PanelId(slot as u64 + 1), PlacementParams::default())
                .unwrap();
        }
    }

    #[test]
    fn templates_are_consistent() {
        for preset in SlotPreset::ALL {
            let t = preset.template();
            assert_eq!(t.slots.len(), t.neighbours.len(), "{}", t.name);
            for s in t.slots {
                assert!(s.row + s.row_span <= t.rows.len(), "{}", s.name);
                assert!(s.column + s.column_span <= t.columns.len(), "{}", s.name);
            }
            for row in t.neighbours {
                for target in row.iter().flatten() {
                    assert!(*target < t.slots.len());
                }
            }
        }
    }

    #[test]
    fn fills_slots_in_canonical_order_then_reports_full() {
        let mut l = layout(SlotPreset::Focus);
        fill(&mut l);
        assert_eq!(l.slot_of(PanelId(1)), Some(0));
        assert_eq!(l.slot_of(PanelId(2)), Some(1));
        assert_eq!(
            l.add_panel(PanelId(3), PlacementParams::default()),
            Err(PlacementError::SlotFull { layout: "focus" })
        );
        assert_eq!(l.panels().len(), 2);
    }

    #[test]
    fn explicit_slot_errors() {
        let mut l = layout(SlotPreset::Dashboard);
        l.add_panel(PanelId(1), PlacementParams::in_slot(2)).unwrap();
        assert_eq!(
            l.add_panel(PanelId(2), PlacementParams::in_slot(2)),
            Err(PlacementError::SlotOccupied {
                layout: "dashboard",
                slot: 2,
                occupant: PanelId(1)
            })
        );
        assert_eq!(
            l.add_panel(PanelId(2), PlacementParams::in_slot(4)),
            Err(PlacementError::UnknownSlot {
                layout: "dashboard",
                slot: 4,
                slots: 4
            })
        );
        assert_eq!(l.panels(), vec![PanelId(1)]);
    }

    #[test]
    fn row_column_hint_selects_matching_slot() {
        let mut l = layout(SlotPreset::Coding);
        l.add_panel(PanelId(1), PlacementParams::at(1, 1)).unwrap();
        assert_eq!(l.slot_names()[l.slot_of(PanelId(1)).unwrap()], "Terminal");
        // The matching slot is taken: fall back to the first empty one.
        l.add_panel(PanelId(2), PlacementParams::at(1, 1)).unwrap();
        assert_eq!(l.slot_of(PanelId(2)), Some(0));
    }

    #[test]
    fn dashboard_top_left_right_is_top_right_occupant() {
        let mut l = layout(SlotPreset::Dashboard);
        fill(&mut l);
        assert_eq!(l.find_in_direction(PanelId(1), Direction::Right), Some(PanelId(2)));
        assert_eq!(l.find_in_direction(PanelId(1), Direction::Down), Some(PanelId(3)));
        assert_eq!(l.find_in_direction(PanelId(4), Direction::Up), Some(PanelId(2)));
        assert_eq!(l.find_in_direction(PanelId(1), Direction::Left), None);
    }

    #[test]
    fn dashboard_lookup_follows_current_occupants() {
        let mut l = layout(SlotPreset::Dashboard);
        fill(&mut l);
        l.swap_panels(PanelId(1), PanelId(2));
        assert_eq!(l.find_in_direction(PanelId(2), Direction::Right), Some(PanelId(1)));
        assert_eq!(l.find_in_direction(PanelId(1), Direction::Left), Some(PanelId(2)));

        l.remove_panel(PanelId(1));
        assert_eq!(l.find_in_direction(PanelId(2), Direction::Right), None);

        l.add_panel(PanelId(5), PlacementParams::default()).unwrap();
        assert_eq!(l.slot_of(PanelId(5)), Some(1));
        assert_eq!(l.find_in_direction(PanelId(2), Direction::Right), Some(PanelId(5)));
        assert_eq!(l.find_in_direction(PanelId(5), Direction::Down), Some(PanelId(4)));
    }

    #[test]
    fn empty_neighbour_slot_yields_none() {
        let mut l = layout(SlotPreset::Dashboard);
        l.add_panel(PanelId(1), PlacementParams::in_slot(0)).unwrap();
        assert_eq!(l.find_in_direction(PanelId(1), Direction::Right), None);
    }

    #[test]
    fn monitoring_bottom_goes_up_to_centre() {
        let mut l = layout(SlotPreset::Monitoring);
        fill(&mut l);
        assert_eq!(l.find_in_direction(PanelId(4), Direction::Up), Some(PanelId(2)));
        assert_eq!(l.find_in_direction(PanelId(3), Direction::Down), Some(PanelId(4)));
    }

    #[test]
    fn coding_geometry() {
        let mut l = layout(SlotPreset::Coding);
        fill(&mut l);
        let a = l.arrange(Rect::new(0.0, 0.0, 1000.0, 600.0));
        assert_eq!(a.frame_of(PanelId(1)), Some(Rect::new(0.0, 0.0, 300.0, 600.0)));
        assert_eq!(a.frame_of(PanelId(2)), Some(Rect::new(300.0, 0.0, 400.0, 300.0)));
        assert_eq!(a.frame_of(PanelId(3)), Some(Rect::new(300.0, 300.0, 400.0, 300.0)));
        assert_eq!(a.frame_of(PanelId(4)), Some(Rect::new(700.0, 0.0, 300.0, 600.0)));
    }

    #[test]
    fn focus_and_communication_geometry() {
        let mut f = layout(SlotPreset::Focus);
        fill(&mut f);
        let a = f.arrange(Rect::new(0.0, 0.0, 1000.0, 500.0));
        assert_eq!(a.frame_of(PanelId(1)), Some(Rect::new(0.0, 0.0, 800.0, 500.0)));
        assert_eq!(a.frame_of(PanelId(2)), Some(Rect::new(800.0, 0.0, 200.0, 500.0)));

        let mut c = layout(SlotPreset::Communication);
        fill(&mut c);
        let a = c.arrange(Rect::new(0.0, 0.0, 1000.0, 500.0));
        assert_eq!(a.frame_of(PanelId(1)), Some(Rect::new(0.0, 0.0, 400.0, 500.0)));
        assert_eq!(a.frame_of(PanelId(3)), Some(Rect::new(400.0, 250.0, 600.0, 250.0)));
    }

    #[test]
    fn swap_exchanges_slots() {
        let mut l = layout(SlotPreset::Focus);
        fill(&mut l);
        l.swap_panels(PanelId(1), PanelId(2));
        assert_eq!(l.slot_of(PanelId(1)), Some(1));
        assert_eq!(l.occupant(0), Some(PanelId(2)));
        let a = l.arrange(Rect::new(0.0, 0.0, 1000.0, 500.0));
        assert_eq!(a.frame_of(PanelId(2)).unwrap().width, 800.0);
    }

    #[test]
    fn swap_with_unknown_panel_warns() {
        let (ctx, logger) = recording_context();
        let mut l = FixedSlotLayout::new(SlotPreset::Focus, ctx);
        l.add_panel(PanelId(1), PlacementParams::default()).unwrap();
        l.swap_panels(PanelId(1), PanelId(9));
        assert_eq!(l.slot_of(PanelId(1)), Some(0));
        assert_eq!(logger.warnings().len(), 1);
    }

    #[test]
    fn removal_frees_the_slot() {
        let mut l = layout(SlotPreset::Focus);
        fill(&mut l);
        l.remove_panel(PanelId(1));
        l.remove_panel(PanelId(1));
        l.add_panel(PanelId(7), PlacementParams::default()).unwrap();
        assert_eq!(l.slot_of(PanelId(7)), Some(0));
    }
}
