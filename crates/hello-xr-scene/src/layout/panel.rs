//! Spatial panels

/// How a panel is sized inside its row or column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelSize {
    /// Fixed size in dp
    Fixed { width: f32, height: f32 },
    /// Share of the remaining space along the parent axis
    Weight(f32),
    /// Fill all remaining space
    Fill,
}

/// Panel padding in dp
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn left(dp: f32) -> Self {
        Self { left: dp, ..Self::default() }
    }

    pub fn bottom(dp: f32) -> Self {
        Self { bottom: dp, ..Self::default() }
    }
}

/// Whether the user can drag a panel around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePolicy {
    pub enabled: bool,
}

/// Whether the user can resize a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePolicy {
    pub enabled: bool,
}

/// A panel placed in the user's space
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialPanel {
    pub size: PanelSize,
    pub padding: Padding,
    pub alpha: f32,
    pub move_policy: MovePolicy,
    pub resize_policy: ResizePolicy,
}

impl SpatialPanel {
    /// A movable, resizable, fully opaque panel
    pub fn new(size: PanelSize) -> Self {
        Self {
            size,
            padding: Padding::default(),
            alpha: 1.0,
            move_policy: MovePolicy { enabled: true },
            resize_policy: ResizePolicy { enabled: true },
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.move_policy.enabled = false;
        self.resize_policy.enabled = false;
        self
    }
}
