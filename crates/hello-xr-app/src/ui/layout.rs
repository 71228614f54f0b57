//! Maps a composition onto normalized screen rectangles

use hello_xr_scene::layout::{PaneArrangement, Rect};
use hello_xr_scene::WindowSizeClass;

use crate::composition::{
    Arrangement, Composition, CONTROLS_PANEL_SIZE_DP, LEFT_COLUMN_WIDTH_DP, PANEL_GAP_DP,
    SPATIAL_ROW_HEIGHT_DP,
};

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub top_bar: Rect,
    pub primary: Rect,
    pub controls: Rect,
    pub sliders: Rect,
    pub status: Rect,
}

const CONTENT: Rect = Rect {
    x: 0.01,
    y: 0.07,
    width: 0.98,
    height: 0.85,
};
const VERTICAL_GAP: f32 = 0.02;

fn width_share(dp: f32, window: &WindowSizeClass) -> f32 {
    if window.width_dp <= 0.0 {
        return 0.5;
    }
    dp / window.width_dp
}

pub fn screen_layout(composition: &Composition, window: &WindowSizeClass) -> ScreenLayout {
    let gap = width_share(PANEL_GAP_DP, window).min(0.02);
    let status = Rect::new(0.01, 0.94, 0.98, 0.04);

    match &composition.arrangement {
        Arrangement::Spatial(_) => {
            let share = width_share(LEFT_COLUMN_WIDTH_DP, window).clamp(0.2, 0.45);
            let (left, primary) = CONTENT.split_horizontal(share, gap);
            let (controls, sliders) =
                left.split_vertical(CONTROLS_PANEL_SIZE_DP / SPATIAL_ROW_HEIGHT_DP, VERTICAL_GAP);
            // Orbiters float above the primary panel
            let top_bar = Rect::new(primary.x, 0.01, primary.width, 0.04);
            ScreenLayout { top_bar, primary, controls, sliders, status }
        }
        Arrangement::Flat(flat) => {
            let top_bar = Rect::new(0.01, 0.01, 0.98, 0.04);
            match flat.panes {
                PaneArrangement::SideBySide { secondary_width_dp } => {
                    let share = width_share(secondary_width_dp, window).clamp(0.25, 0.5);
                    let (secondary, primary) = CONTENT.split_horizontal(share, gap);
                    let (controls, sliders) = secondary.split_vertical(0.35, VERTICAL_GAP);
                    ScreenLayout { top_bar, primary, controls, sliders, status }
                }
                PaneArrangement::TopAndBottom { .. } => {
                    let (primary, secondary) = CONTENT.split_vertical(0.4, VERTICAL_GAP);
                    let (controls, sliders) = secondary.split_vertical(0.4, VERTICAL_GAP);
                    ScreenLayout { top_bar, primary, controls, sliders, status }
                }
            }
        }
    }
}
