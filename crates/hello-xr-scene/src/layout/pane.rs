//! Two-pane arrangements for flat presentation

use crate::context::WindowSizeClass;

/// Width of the secondary pane when shown side by side (dp)
pub const SECONDARY_PANE_WIDTH_DP: f32 = 400.0;
/// Height of each pane when stacked (dp)
pub const STACKED_PANE_HEIGHT_DP: f32 = 500.0;

/// How the primary and secondary panes share a flat window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneArrangement {
    /// Secondary pane on the left at a fixed width, primary fills the rest
    SideBySide { secondary_width_dp: f32 },
    /// Primary on top, secondary below, each at a fixed height, scrollable
    TopAndBottom { pane_height_dp: f32 },
}

impl PaneArrangement {
    pub fn for_window(window: &WindowSizeClass) -> Self {
        if window.is_compact() {
            PaneArrangement::TopAndBottom {
                pane_height_dp: STACKED_PANE_HEIGHT_DP,
            }
        } else {
            PaneArrangement::SideBySide {
                secondary_width_dp: SECONDARY_PANE_WIDTH_DP,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_windows_stack_panes() {
        let compact = WindowSizeClass::from_width_dp(411.0);
        assert_eq!(
            PaneArrangement::for_window(&compact),
            PaneArrangement::TopAndBottom { pane_height_dp: 500.0 }
        );
        let wide = WindowSizeClass::from_width_dp(1920.0);
        assert_eq!(
            PaneArrangement::for_window(&wide),
            PaneArrangement::SideBySide { secondary_width_dp: 400.0 }
        );
    }
}
