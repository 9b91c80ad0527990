//! **panegrid**: a spatial layout and tiling engine for visual panels.
//!
//! Panels are opaque handles owned by the host.  A layout decides where
//! each one goes inside a container and answers spatial questions about
//! them ("what is to the left of this panel?").  Nothing here paints
//! pixels: the output is a list of resolved rectangles for panels and
//! divider cells.
//!
//! # Architecture
//!
//! The crate is organised around the [`traits::LayoutStrategy`] trait,
//! implemented by every layout in [`layout`]:
//!
//! * [`layout::grid`]: proportional rows and columns with draggable
//!   dividers and minimum track sizes.
//! * [`layout::dock`] and [`layout::stack`]: dock-to-edge and linear
//!   stacking.
//! * [`layout::slots`]: five fixed-slot presets with static navigation.
//! * [`layout::tiling`]: automatic tiling driven by panel count.
//!
//! Every layout records each panel's position in a shared
//! [`position::PositionTable`], which lets [`navigator`] implement
//! directional search and swapping once for all of them.
//!
//! Host capabilities (logging and theme colours) are passed explicitly
//! through [`context::HostContext`].  [`workspace::Workspace`] is a small
//! host that drives a layout from [`command::Command`]s delivered by a
//! [`traits::CommandSource`] such as [`source::StreamSource`].

pub mod command;
pub mod config;
pub mod context;
pub mod geometry;
pub mod idle;
pub mod layout;
pub mod navigator;
pub mod placement;
pub mod position;
pub mod source;
pub mod theme;
pub mod traits;
pub mod workspace;
