//! UI state model: transform records, slider groups and clamp ranges

use hello_xr_scene::spatial::dp_to_meters;
use hello_xr_scene::{Pose, Quaternion, Vector3};

/// Inclusive range a slider value is clamped to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp into the range; NaN maps to the minimum
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Keyboard nudge size: one fiftieth of the span
    pub fn step(&self) -> f32 {
        (self.max - self.min) / 50.0
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Position of `value` within the range, 0 to 1
    pub fn fraction(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / span).clamp(0.0, 1.0)
    }
}

pub const SCALE_RANGE: ValueRange = ValueRange::new(0.1, 5.0);
pub const ROTATION_X_RANGE: ValueRange = ValueRange::new(-0.5, 0.5);
pub const ROTATION_Y_RANGE: ValueRange = ValueRange::new(-1.0, 1.0);
pub const ROTATION_Z_RANGE: ValueRange = ValueRange::new(-0.25, 0.25);
pub const ROTATION_W_RANGE: ValueRange = ValueRange::new(0.0, 1.0);
pub const OFFSET_RANGE: ValueRange = ValueRange::new(-1500.0, 1500.0);
pub const MATERIAL_COLOR_RANGE: ValueRange = ValueRange::new(0.0, 1.0);
pub const MATERIAL_PROPERTY_RANGE: ValueRange = ValueRange::new(0.0, 1.0);

/// Quaternion-shaped rotation; not required to be unit length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

impl Rotation {
    pub fn clamped(&self) -> Self {
        Self {
            x: ROTATION_X_RANGE.clamp(self.x),
            y: ROTATION_Y_RANGE.clamp(self.y),
            z: ROTATION_Z_RANGE.clamp(self.z),
            w: ROTATION_W_RANGE.clamp(self.w),
        }
    }

    /// Normalized orientation; an all-zero rotation becomes identity
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::new(self.x, self.y, self.z, self.w).normalize()
    }
}

/// Translation relative to the primary panel, in dp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Offset {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 400.0 }
    }
}

impl Offset {
    pub fn clamped(&self) -> Self {
        Self {
            x: OFFSET_RANGE.clamp(self.x),
            y: OFFSET_RANGE.clamp(self.y),
            z: OFFSET_RANGE.clamp(self.z),
        }
    }

    pub fn to_meters(&self) -> Vector3 {
        Vector3::new(dp_to_meters(self.x), dp_to_meters(self.y), dp_to_meters(self.z))
    }
}

/// RGBA-like base color factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialColor {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for MaterialColor {
    fn default() -> Self {
        Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 }
    }
}

impl MaterialColor {
    pub fn clamped(&self) -> Self {
        Self {
            x: MATERIAL_COLOR_RANGE.clamp(self.x),
            y: MATERIAL_COLOR_RANGE.clamp(self.y),
            z: MATERIAL_COLOR_RANGE.clamp(self.z),
            w: MATERIAL_COLOR_RANGE.clamp(self.w),
        }
    }

    pub fn to_rgba(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    pub ambient_occlusion: f32,
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            ambient_occlusion: 0.5,
            metallic: 0.0,
            roughness: 0.0,
        }
    }
}

impl MaterialProperties {
    pub fn clamped(&self) -> Self {
        Self {
            ambient_occlusion: MATERIAL_PROPERTY_RANGE.clamp(self.ambient_occlusion),
            metallic: MATERIAL_PROPERTY_RANGE.clamp(self.metallic),
            roughness: MATERIAL_PROPERTY_RANGE.clamp(self.roughness),
        }
    }
}

/// Everything the sliders control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub scale: f32,
    pub rotation: Rotation,
    pub offset: Offset,
    pub material_color: MaterialColor,
    pub material_properties: MaterialProperties,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Rotation::default(),
            offset: Offset::default(),
            material_color: MaterialColor::default(),
            material_properties: MaterialProperties::default(),
        }
    }
}

impl ModelTransform {
    /// Pose of the model entity relative to its panel
    pub fn pose(&self) -> Pose {
        Pose::new(self.offset.to_meters(), self.rotation.to_quaternion())
    }
}

/// The slider group currently shown; exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderGroup {
    #[default]
    None,
    Scale,
    Rotation,
    Offset,
    MaterialColors,
    MaterialProperties,
}

impl SliderGroup {
    /// Groups with sliders, in button order
    pub const SELECTABLE: [SliderGroup; 5] = [
        SliderGroup::Scale,
        SliderGroup::Rotation,
        SliderGroup::Offset,
        SliderGroup::MaterialColors,
        SliderGroup::MaterialProperties,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SliderGroup::None => "None",
            SliderGroup::Scale => "Scale",
            SliderGroup::Rotation => "Rotation",
            SliderGroup::Offset => "Offset",
            SliderGroup::MaterialColors => "Material Color",
            SliderGroup::MaterialProperties => "Material Properties",
        }
    }

    /// Heading shown above the group's sliders
    pub fn title(&self) -> &'static str {
        match self {
            SliderGroup::None => "Please select a control",
            SliderGroup::Scale => "Change the scale",
            SliderGroup::Rotation => "Change the rotation",
            SliderGroup::Offset => "Change the offset",
            SliderGroup::MaterialColors => "Change the material color",
            SliderGroup::MaterialProperties => "Change the material properties",
        }
    }

    /// Number of sliders in the group
    pub fn slider_count(&self) -> usize {
        match self {
            SliderGroup::None => 0,
            SliderGroup::Scale => 1,
            SliderGroup::Offset | SliderGroup::MaterialProperties => 3,
            SliderGroup::Rotation | SliderGroup::MaterialColors => 4,
        }
    }
}

/// The single state record for the whole screen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiState {
    pub show_model: bool,
    pub animate: bool,
    pub visible_slider_group: SliderGroup,
    pub transform: ModelTransform,
}
