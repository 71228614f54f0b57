//! Layout primitives for spatial and flat presentation
//!
//! Spatial presentation places content in movable, resizable panels with
//! orbiters attached to their edges. Flat presentation arranges two panes
//! depending on the window size class. [`Rect`] maps either arrangement
//! onto the normalized render surface.

mod panel;
mod orbiter;
mod pane;
mod rect;

pub use panel::{MovePolicy, Padding, PanelSize, ResizePolicy, SpatialPanel};
pub use orbiter::{ContentEdge, Orbiter, OrbiterAlignment};
pub use pane::PaneArrangement;
pub use rect::Rect;
