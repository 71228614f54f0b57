//! Render backend trait definition

use crate::spatial::{Pose, Vector3};
use super::surface::Color;

/// Error type for rendering operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("Init error: {0}")]
    Init(String),
    #[error("Frame error: {0}")]
    Frame(String),
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// A glyph to render at a scene-space position
#[derive(Debug, Clone)]
pub struct RenderGlyph {
    pub symbol: String,
    pub position: Vector3,
    pub color: Color,
    /// Alpha/opacity (0.0 - 1.0)
    pub alpha: f32,
}

impl RenderGlyph {
    pub fn new(symbol: impl Into<String>, position: Vector3) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            color: Color::White,
            alpha: 1.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Backend rendering trait.
///
/// HUD coordinates are normalized to the surface (0.0 - 1.0 on both axes).
pub trait RenderBackend: Send {
    /// Surface size in cells
    fn size(&self) -> (u32, u32);

    /// Begin a new render frame
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// End frame and present to display
    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// Clear the render surface with a color
    fn clear(&mut self, color: Color);

    /// Render a glyph positioned in the scene
    fn draw_glyph(&mut self, glyph: &RenderGlyph);

    /// Render a line between two scene points
    fn draw_line(&mut self, from: Vector3, to: Vector3, color: Color, alpha: f32);

    /// Render a screen-space rectangle outline
    fn draw_hud_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Render text at a screen-space position
    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color);

    /// Current camera pose
    fn camera(&self) -> &Pose;

    fn set_camera(&mut self, camera: Pose);
}
