//! Orbiters: controls floating just outside a panel edge

/// Panel edge an orbiter attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEdge {
    Top,
    Bottom,
    Start,
    End,
}

/// Alignment of an orbiter along its edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbiterAlignment {
    Start,
    Center,
    End,
}

/// An orbiter attached to a panel.
///
/// In flat presentation orbiters collapse back into the regular layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbiter {
    pub edge: ContentEdge,
    /// Distance from the edge in dp
    pub offset_dp: f32,
    pub alignment: OrbiterAlignment,
}

impl Orbiter {
    pub fn new(edge: ContentEdge, offset_dp: f32, alignment: OrbiterAlignment) -> Self {
        Self { edge, offset_dp, alignment }
    }
}
