//! The host-side orchestrator.
//!
//! [`Workspace`] owns the active layout and the focused panel and reacts to
//! [`Command`]s by calling into the [`LayoutStrategy`].  Layout-specific
//! commands (tiling modes, track sizes, divider drags) are routed through
//! the strategy's downcasts and fail with [`WorkspaceError::Unsupported`]
//! when the active layout has no such notion.

use crate::command::{Command, Direction};
use crate::config::Config;
use crate::context::HostContext;
use crate::geometry::{Axis, Rect};
use crate::layout::tracks::TrackSize;
use crate::layout::{Arrangement, LayoutKind, LayoutSpec};
use crate::placement::{PanelId, PlacementError};
use crate::traits::LayoutStrategy;
use log::{debug, info, warn};

/// Possible errors from the workspace.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// The layout rejected a placement.
    #[error("placement rejected: {0}")]
    Placement(#[from] PlacementError),

    /// The command has no meaning for the active layout.
    #[error("{command} is not supported by the {layout} layout")]
    Unsupported {
        command: &'static str,
        layout: LayoutKind,
    },
}

/// Owns the active layout and the focused panel.
///
/// # Typical usage
///
/// ```
/// use panegrid::command::{Command, Direction};
/// use panegrid::config::Config;
/// use panegrid::context::HostContext;
/// use panegrid::placement::{PanelId, PlacementParams};
/// use panegrid::workspace::Workspace;
///
/// let mut ws = Workspace::from_config(&Config::default(), HostContext::default());
/// ws.handle(Command::Add { panel: PanelId(1), params: PlacementParams::default() }).unwrap();
/// ws.handle(Command::Add { panel: PanelId(2), params: PlacementParams::default() }).unwrap();
/// ws.handle(Command::FocusDirection(Direction::Right)).unwrap();
/// assert_eq!(ws.focused(), Some(PanelId(2)));
/// ```
pub struct Workspace {
    layout: Box<dyn LayoutStrategy>,
    focused: Option<PanelId>,
    ctx: HostContext,
    config: Config,
}

impl Workspace {
    /// Create a workspace around an existing layout.
    pub fn new(layout: Box<dyn LayoutStrategy>, config: Config) -> Self {
        let ctx = layout.context().clone();
        Self {
            layout,
            focused: None,
            ctx,
            config,
        }
    }

    /// Build the layout named by `config.layout`.
    pub fn from_config(config: &Config, ctx: HostContext) -> Self {
        let layout = config.layout.build(ctx.clone(), config);
        Self {
            layout,
            focused: None,
            ctx,
            config: config.clone(),
        }
    }

    pub fn layout(&self) -> &dyn LayoutStrategy {
        self.layout.as_ref()
    }

    pub fn layout_mut(&mut self) -> &mut dyn LayoutStrategy {
        self.layout.as_mut()
    }

    pub fn focused(&self) -> Option<PanelId> {
        self.focused
    }

    /// Resolve the active layout inside `bounds`.
    pub fn arrange(&self, bounds: Rect) -> Arrangement {
        self.layout.arrange(bounds)
    }

    /// Resolve the active layout inside the configured viewport.
    pub fn arrange_viewport(&self) -> Arrangement {
        self.layout.arrange(Rect::from_size(self.config.viewport))
    }

    /// Process a single [`Command`].
    ///
    /// A failed command leaves the layout unchanged.
    pub fn handle(&mut self, cmd: Command) -> Result<(), WorkspaceError> {
        match cmd {
            Command::Add { panel, params } => {
                info!("add {}", panel);
                self.layout.add_panel(panel, params)?;
                if self.focused.is_none() {
                    self.focused = Some(panel);
                }
            }

            Command::Remove(panel) => {
                info!("remove {}", panel);
                self.layout.remove_panel(panel);
                if self.focused == Some(panel) {
                    self.focused = self.layout.panels().first().copied();
                }
            }

            Command::Clear => {
                info!("clear");
                self.layout.clear();
                self.focused = None;
            }

            Command::Focus(panel) => {
                if self.layout.position_of(panel).is_some() {
                    debug!("focus {}", panel);
                    self.focused = Some(panel);
                } else {
                    warn!("focus: {} is not in the {} layout", panel, self.layout.kind());
                }
            }

            Command::FocusDirection(dir) => {
                if let Some(target) = self.neighbour(dir) {
                    debug!("focus {} -> {}", dir, target);
                    self.focused = Some(target);
                }
            }

            Command::MoveDirection(dir) => {
                if let (Some(focused), Some(target)) = (self.focused, self.neighbour(dir)) {
                    info!("move {} {} (swap with {})", focused, dir, target);
                    self.layout.swap_panels(focused, target);
                }
            }

            Command::Swap { a, b } => {
                info!("swap {} and {}", a, b);
                self.layout.swap_panels(a, b);
            }

            Command::SetMode(mode) => {
                let layout = self.layout.kind();
                let tiling = self.layout.as_tiling_mut().ok_or(WorkspaceError::Unsupported {
                    command: "SetMode",
                    layout,
                })?;
                tiling.set_mode(mode);
            }

            Command::Promote(panel) => {
                let layout = self.layout.kind();
                let tiling = self.layout.as_tiling_mut().ok_or(WorkspaceError::Unsupported {
                    command: "Promote",
                    layout,
                })?;
                if tiling.promote(panel) {
                    self.focused = Some(panel);
                }
            }

            Command::SetTrackSize { axis, index, size } => self.set_track_size(axis, index, size)?,

            Command::DragDivider {
                axis,
                divider,
                delta,
                extent,
            } => {
                let layout = self.layout.kind();
                if let Some(grid) = self.layout.as_grid_mut() {
                    grid.drag_divider(axis, divider, delta, extent);
                } else if let Some(tiling) = self.layout.as_tiling_mut() {
                    tiling.drag_divider(axis, divider, delta, extent);
                } else {
                    return Err(WorkspaceError::Unsupported {
                        command: "DragDivider",
                        layout,
                    });
                }
            }

            Command::CompleteDrag { axis, divider } => {
                debug!("complete {:?} drag on divider {}", axis, divider);
                let layout = self.layout.kind();
                if let Some(grid) = self.layout.as_grid_mut() {
                    grid.complete_drag(axis, divider);
                } else if let Some(tiling) = self.layout.as_tiling_mut() {
                    tiling.complete_drag(axis, divider);
                } else {
                    return Err(WorkspaceError::Unsupported {
                        command: "CompleteDrag",
                        layout,
                    });
                }
            }

            Command::SwitchLayout(spec) => self.switch_layout(&spec),

            Command::Idle => self.layout.on_idle(),
        }
        Ok(())
    }

    fn neighbour(&self, dir: Direction) -> Option<PanelId> {
        let Some(focused) = self.focused else {
            debug!("{}: nothing is focused", dir);
            return None;
        };
        let target = self.layout.find_in_direction(focused, dir);
        if target.is_none() {
            debug!("no panel {} of {}", dir, focused);
        }
        target
    }

    fn set_track_size(&mut self, axis: Axis, index: usize, size: TrackSize) -> Result<(), WorkspaceError> {
        let layout = self.layout.kind();
        let grid = self.layout.as_grid_mut().ok_or(WorkspaceError::Unsupported {
            command: "SetTrackSize",
            layout,
        })?;
        grid.set_track_size(axis, index, size)?;
        Ok(())
    }

    /// Replace the active layout and carry every panel over with the params
    /// it was added with.  Panels the new layout rejects are dropped.
    fn switch_layout(&mut self, spec: &LayoutSpec) {
        let carried: Vec<_> = self
            .layout
            .panels()
            .into_iter()
            .filter_map(|p| Some((p, self.layout.params_of(p)?)))
            .collect();

        let mut next = spec.build(self.ctx.clone(), &self.config);
        for (panel, params) in carried {
            if let Err(e) = next.add_panel(panel, params) {
                warn!("{} dropped while switching to {}: {}", panel, next.kind(), e);
            }
        }
        info!("switched {} -> {}", self.layout.kind(), next.kind());
        self.layout = next;

        if let Some(f) = self.focused {
            if self.layout.position_of(f).is_none() {
                self.focused = self.layout.panels().first().copied();
            }
        }
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::GridLayout;
    use crate::layout::slots::SlotPreset;
    use crate::layout::tiling::TilingMode;
    use crate::placement::PlacementParams;
    use crate::position::PositionRecord;

    fn grid_workspace(rows: usize, columns: usize) -> Workspace {
        let layout = GridLayout::new(rows, columns, HostContext::default());
        Workspace::new(Box::new(layout), Config::default())
    }

    fn add(ws: &mut Workspace, id: u64, params: PlacementParams) {
        ws.handle(Command::Add {
            panel: PanelId(id),
            params,
        })
        .unwrap();
    }

    fn tiling_workspace(n: u64) -> Workspace {
        let mut ws = Workspace::from_config(&Config::default(), HostContext::default());
        for id in 1..=n {
            add(&mut ws, id, PlacementParams::default());
        }
        ws
    }

    #[test]
    fn first_added_panel_is_focused() {
        let mut ws = grid_workspace(2, 2);
        add(&mut ws, 1, PlacementParams::at(0, 0));
        add(&mut ws, 2, PlacementParams::at(0, 1));
        assert_eq!(ws.focused(), Some(PanelId(1)));
    }

    #[test]
    fn focus_direction_walks_the_grid() {
        let mut ws = grid_workspace(2, 2);
        add(&mut ws, 1, PlacementParams::at(0, 0));
        add(&mut ws, 2, PlacementParams::at(0, 1));
        add(&mut ws, 3, PlacementParams::at(1, 0));

        ws.handle(Command::FocusDirection(Direction::Right)).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(2)));
        // Edge hit: focus stays.
        ws.handle(Command::FocusDirection(Direction::Down)).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(2)));
        ws.handle(Command::FocusDirection(Direction::Left)).unwrap();
        ws.handle(Command::FocusDirection(Direction::Down)).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(3)));
    }

    #[test]
    fn move_direction_swaps_and_focus_follows() {
        let mut ws = grid_workspace(1, 2);
        add(&mut ws, 1, PlacementParams::at(0, 0));
        add(&mut ws, 2, PlacementParams::at(0, 1));
        ws.handle(Command::MoveDirection(Direction::Right)).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(1)));
        assert_eq!(ws.layout().position_of(PanelId(1)), Some(PositionRecord::cell(0, 1)));
    }

    #[test]
    fn out_of_range_add_is_an_error() {
        let mut ws = grid_workspace(2, 2);
        let err = ws
            .handle(Command::Add {
                panel: PanelId(1),
                params: PlacementParams::at(5, 0),
            })
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Placement(PlacementError::OutOfRange { .. })));
        assert!(ws.layout().panels().is_empty());
        assert_eq!(ws.focused(), None);
    }

    #[test]
    fn removing_focused_panel_refocuses() {
        let mut ws = tiling_workspace(3);
        ws.handle(Command::Remove(PanelId(1))).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(2)));
        ws.handle(Command::Clear).unwrap();
        assert_eq!(ws.focused(), None);
    }

    #[test]
    fn focus_unknown_panel_keeps_focus() {
        let mut ws = tiling_workspace(2);
        ws.handle(Command::Focus(PanelId(9))).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(1)));
        ws.handle(Command::Focus(PanelId(2))).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(2)));
    }

    #[test]
    fn tiling_commands_need_a_tiling_layout() {
        let mut ws = grid_workspace(1, 1);
        let err = ws.handle(Command::SetMode(TilingMode::Wide)).unwrap_err();
        assert_eq!(err.to_string(), "SetMode is not supported by the grid layout");

        let mut ws = tiling_workspace(3);
        ws.handle(Command::SetMode(TilingMode::Wide)).unwrap();
        let tiling = ws.layout.as_tiling_mut().unwrap();
        assert_eq!(tiling.dimensions(), (3, 1));
    }

    #[test]
    fn promote_focuses_new_master() {
        let mut ws = tiling_workspace(5);
        ws.handle(Command::Promote(PanelId(4))).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(4)));
        let tiling = ws.layout.as_tiling_mut().unwrap();
        assert_eq!(tiling.order()[0], PanelId(4));
    }

    #[test]
    fn track_size_is_grid_only() {
        let mut ws = grid_workspace(1, 2);
        ws.handle(Command::SetTrackSize {
            axis: Axis::Horizontal,
            index: 0,
            size: TrackSize::Pixels(300.0),
        })
        .unwrap();
        let err = ws
            .handle(Command::SetTrackSize {
                axis: Axis::Horizontal,
                index: 7,
                size: TrackSize::Pixels(300.0),
            })
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Placement(_)));

        ws.handle(Command::SwitchLayout(LayoutSpec::Dock)).unwrap();
        assert!(matches!(
            ws.handle(Command::SetTrackSize {
                axis: Axis::Horizontal,
                index: 0,
                size: TrackSize::Pixels(1.0),
            }),
            Err(WorkspaceError::Unsupported { .. })
        ));
    }

    #[test]
    fn drag_sequence_through_commands() {
        let mut ws = grid_workspace(1, 2);
        add(&mut ws, 1, PlacementParams::at(0, 0));
        add(&mut ws, 2, PlacementParams::at(0, 1));
        for cmd in [
            Command::DragDivider {
                axis: Axis::Horizontal,
                divider: 0,
                delta: 350.0,
                extent: 800.0,
            },
            Command::CompleteDrag {
                axis: Axis::Horizontal,
                divider: 0,
            },
            Command::Idle,
        ] {
            ws.handle(cmd).unwrap();
        }
        let a = ws.arrange(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(a.frame_of(PanelId(2)).unwrap().width, 100.0);

        ws.handle(Command::SwitchLayout(LayoutSpec::Dock)).unwrap();
        assert!(ws
            .handle(Command::CompleteDrag {
                axis: Axis::Horizontal,
                divider: 0
            })
            .is_err());
    }

    #[test]
    fn switch_layout_carries_panels_and_drops_rejects() {
        let mut ws = tiling_workspace(5);
        ws.handle(Command::Focus(PanelId(5))).unwrap();
        ws.handle(Command::SwitchLayout(LayoutSpec::Slots(SlotPreset::Dashboard)))
            .unwrap();
        assert_eq!(ws.layout().kind(), LayoutKind::Slots(SlotPreset::Dashboard));
        assert_eq!(
            ws.layout().panels(),
            vec![PanelId(1), PanelId(2), PanelId(3), PanelId(4)]
        );
        // Panel 5 did not fit, focus falls back to the first panel.
        assert_eq!(ws.focused(), Some(PanelId(1)));
        ws.handle(Command::FocusDirection(Direction::Right)).unwrap();
        assert_eq!(ws.focused(), Some(PanelId(2)));
    }

    #[test]
    fn arrange_viewport_uses_configured_size() {
        let ws = tiling_workspace(1);
        let a = ws.arrange_viewport();
        assert_eq!(a.frame_of(PanelId(1)), Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)));
    }

    #[test]
    fn full_command_sequence_from_json() {
        let script = r#"
            {"Add":{"panel":1}}
            {"Add":{"panel":2}}
            {"Add":{"panel":3}}
            {"FocusDirection":"right"}
            {"MoveDirection":"left"}
            {"SetMode":"Wide"}
        "#;
        let mut ws = Workspace::from_config(&Config::default(), HostContext::default());
        for line in script.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let cmd: Command = serde_json::from_str(line).unwrap();
            ws.handle(cmd).unwrap();
        }
        assert_eq!(ws.focused(), Some(PanelId(2)));
        let tiling = ws.layout.as_tiling_mut().unwrap();
        assert_eq!(tiling.order(), &[PanelId(2), PanelId(1), PanelId(3)]);
        assert_eq!(tiling.logical_cell(PanelId(1)), Some(PositionRecord::cell(1, 0)));
    }
}
