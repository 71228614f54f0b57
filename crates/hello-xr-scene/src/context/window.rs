//! Window size classes for adaptive flat layouts

/// Width breakpoint below which a window is compact (dp)
pub const COMPACT_MAX_WIDTH_DP: f32 = 600.0;
/// Width breakpoint below which a window is medium (dp)
pub const MEDIUM_MAX_WIDTH_DP: f32 = 840.0;
/// dp covered by one terminal column in the simulation
pub const DP_PER_COLUMN: f32 = 8.0;

/// Width class of the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowWidthClass {
    Compact,
    Medium,
    Expanded,
}

/// Size class of the current window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSizeClass {
    pub width_dp: f32,
    pub width_class: WindowWidthClass,
}

impl WindowSizeClass {
    pub fn from_width_dp(width_dp: f32) -> Self {
        let width_class = if width_dp < COMPACT_MAX_WIDTH_DP {
            WindowWidthClass::Compact
        } else if width_dp < MEDIUM_MAX_WIDTH_DP {
            WindowWidthClass::Medium
        } else {
            WindowWidthClass::Expanded
        };
        Self { width_dp, width_class }
    }

    /// Size class of a terminal of the given column count
    pub fn from_columns(columns: u32) -> Self {
        Self::from_width_dp(columns as f32 * DP_PER_COLUMN)
    }

    pub fn is_compact(&self) -> bool {
        self.width_class == WindowWidthClass::Compact
    }
}

impl Default for WindowSizeClass {
    fn default() -> Self {
        Self::from_width_dp(1280.0)
    }
}
