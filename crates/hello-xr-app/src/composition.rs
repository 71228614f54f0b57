//! Presentation composition
//!
//! [`compose`] is a pure function of the UI state, the platform's spatial
//! capabilities and the window size class. It decides which arrangement
//! is used (spatial panels or a flat two-pane layout) and what each block
//! of content shows. Rendering and input both work from its output.

use std::time::Duration;

use hello_xr_scene::animation::{Easing, Tween};
use hello_xr_scene::layout::{
    ContentEdge, Orbiter, OrbiterAlignment, Padding, PaneArrangement, PanelSize, SpatialPanel,
};
use hello_xr_scene::{SpatialCapabilities, WindowSizeClass};

use crate::model::{
    ModelTransform, SliderGroup, UiState, ValueRange, MATERIAL_COLOR_RANGE,
    MATERIAL_PROPERTY_RANGE, OFFSET_RANGE, ROTATION_W_RANGE, ROTATION_X_RANGE, ROTATION_Y_RANGE,
    ROTATION_Z_RANGE, SCALE_RANGE,
};

pub const SPATIAL_ROW_HEIGHT_DP: f32 = 816.0;
pub const LEFT_COLUMN_WIDTH_DP: f32 = 400.0;
pub const CONTROLS_PANEL_SIZE_DP: f32 = 400.0;
/// Gap between panels and panes
pub const PANEL_GAP_DP: f32 = 16.0;
/// Height of the controls block inside the flat secondary pane
pub const FLAT_CONTROLS_HEIGHT_DP: f32 = 240.0;
pub const TOP_ORNAMENT_PADDING_DP: f32 = 16.0;

pub const PRIMARY_TEXT: &str =
    "Spatial panels let content live in your space. Enter full space to meet the droid.";
pub const BLOCK_ONE_TEXT: &str =
    "Supporting content. On an XR device, show the droid to adjust its transform here.";
pub const BLOCK_TWO_TEXT: &str =
    "More supporting content. Slider controls appear here while the droid is shown.";

/// Alpha fade applied to the whole layout when it first appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeIn {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub easing: Easing,
}

impl FadeIn {
    pub const SPATIAL: Self = Self {
        from: 0.5,
        to: 1.0,
        duration: Duration::from_millis(400),
        easing: Easing::FastOutSlowIn,
    };

    pub const FLAT: Self = Self {
        from: 0.5,
        to: 1.0,
        duration: Duration::from_millis(300),
        easing: Easing::FastOutSlowIn,
    };

    pub fn tween(&self) -> Tween {
        Tween::new(self.from, self.to, self.duration).with_easing(self.easing)
    }
}

/// Something a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleShowModel,
    ToggleAnimate,
    SelectGroup(SliderGroup),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub action: Action,
    pub label: &'static str,
}

impl Button {
    fn new(action: Action, label: &'static str) -> Self {
        Self { action, label }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryContent {
    /// Show/hide button, the animate button while shown, and the model slot
    Model {
        buttons: Vec<Button>,
        model_visible: bool,
    },
    Text(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlsBlock {
    Buttons(Vec<Button>),
    Text(&'static str),
}

/// One slider with its range and current value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub range: ValueRange,
    pub value: f32,
}

impl Slider {
    fn new(label: &'static str, range: ValueRange, value: f32) -> Self {
        Self { label, range, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliderBlock {
    Sliders {
        group: SliderGroup,
        title: &'static str,
        sliders: Vec<Slider>,
    },
    Text(&'static str),
}

/// Controls of the top app bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarItem {
    Search,
    EnvironmentControls,
}

/// A top bar control; detached into an orbiter when spatial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopBarEntry {
    pub item: TopBarItem,
    pub orbiter: Option<Orbiter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialArrangement {
    pub row_height_dp: f32,
    pub left_column_width_dp: f32,
    pub controls_panel: SpatialPanel,
    pub sliders_panel: SpatialPanel,
    pub primary_panel: SpatialPanel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatArrangement {
    pub panes: PaneArrangement,
    pub controls_height_dp: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arrangement {
    Spatial(SpatialArrangement),
    Flat(FlatArrangement),
}

/// Everything needed to present one frame of UI
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub arrangement: Arrangement,
    pub top_bar: Vec<TopBarEntry>,
    pub primary: PrimaryContent,
    pub controls: ControlsBlock,
    pub sliders: SliderBlock,
    pub fade: FadeIn,
}

impl Composition {
    pub fn is_spatial(&self) -> bool {
        matches!(self.arrangement, Arrangement::Spatial(_))
    }

    /// Height available to the model, when a model slot is composed
    pub fn model_slot_height_dp(&self) -> Option<f32> {
        match (&self.arrangement, &self.primary) {
            (Arrangement::Spatial(s), PrimaryContent::Model { model_visible: true, .. }) => {
                Some(s.row_height_dp)
            }
            _ => None,
        }
    }

    /// All buttons in reading order: primary content first, then controls
    pub fn buttons(&self) -> Vec<Button> {
        let mut buttons = Vec::new();
        if let PrimaryContent::Model { buttons: primary, .. } = &self.primary {
            buttons.extend(primary.iter().copied());
        }
        if let ControlsBlock::Buttons(controls) = &self.controls {
            buttons.extend(controls.iter().copied());
        }
        buttons
    }

    pub fn sliders(&self) -> &[Slider] {
        match &self.sliders {
            SliderBlock::Sliders { sliders, .. } => sliders,
            SliderBlock::Text(_) => &[],
        }
    }
}

/// Sliders of `group` with the values from `transform`
pub fn sliders_for(group: SliderGroup, transform: &ModelTransform) -> Vec<Slider> {
    let r = &transform.rotation;
    let o = &transform.offset;
    let c = &transform.material_color;
    let p = &transform.material_properties;
    match group {
        SliderGroup::None => Vec::new(),
        SliderGroup::Scale => vec![Slider::new("Scale", SCALE_RANGE, transform.scale)],
        SliderGroup::Rotation => vec![
            Slider::new("X rotation", ROTATION_X_RANGE, r.x),
            Slider::new("Y rotation", ROTATION_Y_RANGE, r.y),
            Slider::new("Z rotation", ROTATION_Z_RANGE, r.z),
            Slider::new("W rotation", ROTATION_W_RANGE, r.w),
        ],
        SliderGroup::Offset => vec![
            Slider::new("X offset", OFFSET_RANGE, o.x),
            Slider::new("Y offset", OFFSET_RANGE, o.y),
            Slider::new("Z offset", OFFSET_RANGE, o.z),
        ],
        SliderGroup::MaterialColors => vec![
            Slider::new("Red", MATERIAL_COLOR_RANGE, c.x),
            Slider::new("Green", MATERIAL_COLOR_RANGE, c.y),
            Slider::new("Blue", MATERIAL_COLOR_RANGE, c.z),
            Slider::new("Alpha", MATERIAL_COLOR_RANGE, c.w),
        ],
        SliderGroup::MaterialProperties => vec![
            Slider::new("Ambient occlusion", MATERIAL_PROPERTY_RANGE, p.ambient_occlusion),
            Slider::new("Metallic", MATERIAL_PROPERTY_RANGE, p.metallic),
            Slider::new("Roughness", MATERIAL_PROPERTY_RANGE, p.roughness),
        ],
    }
}

fn primary_content(state: &UiState, spatial: bool) -> PrimaryContent {
    if !spatial {
        return PrimaryContent::Text(PRIMARY_TEXT);
    }

    let show_label = if state.show_model { "Hide droid" } else { "Show droid" };
    let mut buttons = vec![Button::new(Action::ToggleShowModel, show_label)];
    if state.show_model {
        let animate_label = if state.animate { "Stop animation" } else { "Animate droid" };
        buttons.push(Button::new(Action::ToggleAnimate, animate_label));
    }

    PrimaryContent::Model {
        buttons,
        model_visible: state.show_model,
    }
}

fn controls_block(state: &UiState, caps: &SpatialCapabilities) -> ControlsBlock {
    if !(caps.has_xr_spatial_feature && state.show_model) {
        return ControlsBlock::Text(BLOCK_ONE_TEXT);
    }

    let mut buttons: Vec<Button> = SliderGroup::SELECTABLE
        .iter()
        .map(|&group| Button::new(Action::SelectGroup(group), group.label()))
        .collect();
    buttons.push(Button::new(Action::Reset, "Reset"));
    ControlsBlock::Buttons(buttons)
}

fn slider_block(state: &UiState, caps: &SpatialCapabilities) -> SliderBlock {
    if !(caps.has_xr_spatial_feature && state.show_model) {
        return SliderBlock::Text(BLOCK_TWO_TEXT);
    }

    let group = state.visible_slider_group;
    SliderBlock::Sliders {
        group,
        title: group.title(),
        sliders: sliders_for(group, &state.transform),
    }
}

fn top_bar(spatial: bool) -> Vec<TopBarEntry> {
    let orbiter = |alignment| {
        spatial.then(|| Orbiter::new(ContentEdge::Top, TOP_ORNAMENT_PADDING_DP, alignment))
    };
    vec![
        TopBarEntry {
            item: TopBarItem::Search,
            orbiter: orbiter(OrbiterAlignment::Start),
        },
        TopBarEntry {
            item: TopBarItem::EnvironmentControls,
            orbiter: orbiter(OrbiterAlignment::End),
        },
    ]
}

/// Compose the screen for the given state, capabilities and window
pub fn compose(state: &UiState, caps: &SpatialCapabilities, window: &WindowSizeClass) -> Composition {
    let spatial = caps.spatial_ui_enabled;

    let (arrangement, fade) = if spatial {
        let arrangement = SpatialArrangement {
            row_height_dp: SPATIAL_ROW_HEIGHT_DP,
            left_column_width_dp: LEFT_COLUMN_WIDTH_DP,
            controls_panel: SpatialPanel::new(PanelSize::Fixed {
                width: CONTROLS_PANEL_SIZE_DP,
                height: CONTROLS_PANEL_SIZE_DP,
            })
            .with_padding(Padding::bottom(PANEL_GAP_DP)),
            sliders_panel: SpatialPanel::new(PanelSize::Weight(1.0)),
            primary_panel: SpatialPanel::new(PanelSize::Fill)
                .with_padding(Padding::left(PANEL_GAP_DP)),
        };
        (Arrangement::Spatial(arrangement), FadeIn::SPATIAL)
    } else {
        let arrangement = FlatArrangement {
            panes: PaneArrangement::for_window(window),
            controls_height_dp: FLAT_CONTROLS_HEIGHT_DP,
        };
        (Arrangement::Flat(arrangement), FadeIn::FLAT)
    };

    Composition {
        arrangement,
        top_bar: top_bar(spatial),
        primary: primary_content(state, spatial),
        controls: controls_block(state, caps),
        sliders: slider_block(state, caps),
        fade,
    }
}
