//! Commands and directions.
//!
//! [`Command`] is the vocabulary a host uses to drive a
//! [`Workspace`](crate::workspace::Workspace): panel lifecycle, spatial
//! navigation, tiling modes and divider drags.  On the wire every command
//! is one line of externally tagged JSON:
//!
//! ```json
//! {"Add":{"panel":1,"params":{"row":0,"column":1}}}
//! {"FocusDirection":"left"}
//! {"SetMode":"MasterStack"}
//! "Clear"
//! ```
//!
//! Direction strings are parsed case-insensitively.

use crate::geometry::Axis;
use crate::layout::tiling::TilingMode;
use crate::layout::tracks::TrackSize;
use crate::layout::LayoutSpec;
use crate::placement::{PanelId, PlacementParams};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction for spatial navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Stable index (`Left = 0, Right = 1, Up = 2, Down = 3`) used by
    /// lookup tables.
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// The axis this direction moves along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Whether moving this way increases the row/column index.
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Parse a direction string (case-insensitive, surrounding whitespace
/// ignored).
fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_ascii_lowercase().as_str() {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| DeError::custom(format!("invalid direction: {:?}", s)))
    }
}

/// Every action a workspace can perform.
///
/// Commands are produced by [`CommandSource`](crate::traits::CommandSource)
/// implementations and consumed by
/// [`Workspace::handle`](crate::workspace::Workspace::handle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Place a panel in the active layout.
    Add {
        panel: PanelId,
        #[serde(default)]
        params: PlacementParams,
    },

    /// Detach a panel.  Unknown panels are ignored.
    Remove(PanelId),

    /// Detach every panel.
    Clear,

    /// Focus a specific panel.
    Focus(PanelId),

    /// Move focus to the nearest panel in the given direction.
    FocusDirection(Direction),

    /// Swap the focused panel with its nearest neighbour in the given
    /// direction.  Focus follows the panel.
    MoveDirection(Direction),

    /// Swap two panels.
    Swap { a: PanelId, b: PanelId },

    /// Pin the auto-tiler to a mode (or back to `Auto`).
    SetMode(TilingMode),

    /// Move a panel into the auto-tiler's master position.
    Promote(PanelId),

    /// Resize one track of a grid layout.
    SetTrackSize {
        axis: Axis,
        index: usize,
        size: TrackSize,
    },

    /// Live divider drag: move boundary `divider` by `delta` pixels.
    /// `extent` is the container size along `axis`.
    DragDivider {
        axis: Axis,
        divider: usize,
        delta: f64,
        extent: f64,
    },

    /// The divider drag finished.
    CompleteDrag { axis: Axis, divider: usize },

    /// Replace the active layout, carrying every panel over.
    SwitchLayout(LayoutSpec),

    /// Run deferred work now.
    Idle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn direction_parses_case_insensitively() {
        let d: Direction = serde_json::from_str(r#"" Left ""#).unwrap();
        assert_eq!(d, Direction::Left);
        let d: Direction = serde_json::from_str(r#""DOWN""#).unwrap();
        assert_eq!(d, Direction::Down);
        assert!(serde_json::from_str::<Direction>(r#""up-left""#).is_err());
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Left.axis(), Direction::Right.axis());
        assert_eq!(Direction::Up.axis(), Axis::Vertical);
        assert_eq!(
            Direction::ALL.map(Direction::is_forward),
            [false, true, false, true]
        );
        assert_eq!(Direction::ALL.map(Direction::index), [0, 1, 2, 3]);
    }

    #[test]
    fn add_command_from_json() {
        let cmd: Command =
            serde_json::from_str(r#"{"Add":{"panel":3,"params":{"row":1,"column":0}}}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                panel: PanelId(3),
                params: PlacementParams::at(1, 0),
            }
        );
    }

    #[test]
    fn add_command_without_params() {
        let cmd: Command = serde_json::from_str(r#"{"Add":{"panel":3}}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                panel: PanelId(3),
                params: PlacementParams::default(),
            }
        );
    }

    #[test]
    fn unit_and_newtype_commands_from_json() {
        assert_eq!(serde_json::from_str::<Command>(r#""Clear""#).unwrap(), Command::Clear);
        assert_eq!(
            serde_json::from_str::<Command>(r#"{"FocusDirection":"up"}"#).unwrap(),
            Command::FocusDirection(Direction::Up)
        );
        assert_eq!(
            serde_json::from_str::<Command>(r#"{"SetMode":"MasterStack"}"#).unwrap(),
            Command::SetMode(TilingMode::MasterStack)
        );
    }

    #[test]
    fn drag_command_from_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"DragDivider":{"axis":"Horizontal","divider":0,"delta":-40.5,"extent":800}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::DragDivider {
                axis: Axis::Horizontal,
                divider: 0,
                delta: -40.5,
                extent: 800.0,
            }
        );
    }

    #[test]
    fn track_size_command_from_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"SetTrackSize":{"axis":"Vertical","index":1,"size":{"Pixels":120}}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::SetTrackSize {
                axis: Axis::Vertical,
                index: 1,
                size: TrackSize::Pixels(120.0),
            }
        );
    }
}
