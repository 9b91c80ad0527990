//! Core traits that decouple the layout engine from its host.
//!
//! * [`LayoutStrategy`]: the contract every layout implements, so a host
//!   can drive a grid, a dock, a fixed-slot preset or the auto-tiler the
//!   same way.
//! * [`Logger`] and [`ThemeProvider`]: capabilities the host hands to a
//!   layout at construction (see [`HostContext`](crate::context::HostContext)).
//! * [`CommandSource`]: abstracts the transport that delivers
//!   [`Command`]s to a [`Workspace`](crate::workspace::Workspace).

use crate::command::{Command, Direction};
use crate::context::HostContext;
use crate::geometry::Rect;
use crate::layout::grid::GridLayout;
use crate::layout::tiling::AutoTilingLayout;
use crate::layout::{Arrangement, LayoutKind};
use crate::placement::{PanelId, PlacementError, PlacementParams};
use crate::position::PositionRecord;
use crate::theme::Color;
use std::fmt;
use std::sync::mpsc;

//  Capabilities

/// Severity of a diagnostic emitted through a [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warning => write!(f, "warning"),
        }
    }
}

/// Sink for non-fatal diagnostics.
///
/// Layouts never depend on a logger for correctness; a logger that drops
/// everything is a valid implementation.
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }
}

/// Source of divider colours.  `None` means "use the built-in default".
pub trait ThemeProvider {
    fn border_color(&self) -> Option<Color>;
    fn hover_color(&self) -> Option<Color>;
}

//  Layouts

/// The contract shared by every layout.
///
/// A layout owns a position table and nothing else: panels are referenced by
/// [`PanelId`] and are never created or destroyed here.  All calls are
/// synchronous and expected on a single thread.
///
/// # Contract
///
/// * [`add_panel`](Self::add_panel) either places the panel or returns an
///   error and leaves the layout untouched.
/// * [`remove_panel`](Self::remove_panel) is idempotent.
/// * [`panels`](Self::panels) lists panels in addition order.
/// * Every listed panel has exactly one [`PositionRecord`].
pub trait LayoutStrategy {
    fn kind(&self) -> LayoutKind;

    /// The capabilities this layout was constructed with.
    fn context(&self) -> &HostContext;

    fn add_panel(&mut self, panel: PanelId, params: PlacementParams) -> Result<(), PlacementError>;

    fn remove_panel(&mut self, panel: PanelId);

    fn clear(&mut self);

    fn panels(&self) -> Vec<PanelId>;

    fn position_of(&self, panel: PanelId) -> Option<PositionRecord>;

    /// The params a panel was added with.
    fn params_of(&self, panel: PanelId) -> Option<PlacementParams>;

    /// Exchange the positions of two panels.
    ///
    /// Layouts without explicit adjacency do not support this; the default
    /// logs a warning and does nothing.
    fn swap_panels(&mut self, a: PanelId, b: PanelId) {
        self.context().logger().warning(&format!(
            "{} layout cannot swap {} and {}",
            self.kind(),
            a,
            b
        ));
    }

    /// The nearest other panel in `direction`, if any.
    fn find_in_direction(&self, _panel: PanelId, _direction: Direction) -> Option<PanelId> {
        None
    }

    /// Resolve every panel (and divider) to a rectangle inside `bounds`.
    fn arrange(&self, bounds: Rect) -> Arrangement;

    /// Run deferred work.  Called by the host when its event loop is idle.
    fn on_idle(&mut self) {}

    fn as_grid_mut(&mut self) -> Option<&mut GridLayout> {
        None
    }

    fn as_tiling_mut(&mut self) -> Option<&mut AutoTilingLayout> {
        None
    }
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations read some transport (standard input, a socket, an
/// in-memory list in tests) and forward parsed commands into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start reading and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
