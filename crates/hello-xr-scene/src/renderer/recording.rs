//! In-memory backend that records draw calls

use crate::spatial::{Pose, Vector3};
use super::backend::{RenderBackend, RenderError, RenderGlyph};
use super::surface::Color;

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Glyph { symbol: String, position: Vector3, color: Color },
    Line { from: Vector3, to: Vector3, color: Color },
    Rect { x: f32, y: f32, width: f32, height: f32, color: Color },
    Text { x: f32, y: f32, text: String, color: Color },
}

/// Backend that keeps the draw calls of the last frame.
///
/// Used for headless composition dumps and for asserting on rendered
/// output in tests.
#[derive(Debug)]
pub struct RecordingBackend {
    width: u32,
    height: u32,
    camera: Pose,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            camera: Pose::IDENTITY,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// All HUD text of the frame, top to bottom then left to right
    pub fn text_lines(&self) -> Vec<String> {
        let mut texts: Vec<(f32, f32, &str)> = self
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, text, .. } => Some((*y, *x, text.as_str())),
                _ => None,
            })
            .collect();
        texts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        texts.into_iter().map(|(_, _, t)| t.to_string()).collect()
    }

    /// True when any HUD text contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.commands.iter().any(|c| matches!(c, DrawCommand::Text { text, .. } if text.contains(needle)))
    }

    /// Number of scene-space primitives (glyphs and lines) drawn
    pub fn scene_primitives(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { .. } | DrawCommand::Line { .. }))
            .count()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(120, 40)
    }
}

impl RenderBackend for RecordingBackend {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.commands.clear();
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.frames += 1;
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_glyph(&mut self, glyph: &RenderGlyph) {
        self.commands.push(DrawCommand::Glyph {
            symbol: glyph.symbol.clone(),
            position: glyph.position,
            color: glyph.color,
        });
    }

    fn draw_line(&mut self, from: Vector3, to: Vector3, color: Color, _alpha: f32) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_hud_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect { x, y, width, height, color });
    }

    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn camera(&self) -> &Pose {
        &self.camera
    }

    fn set_camera(&mut self, camera: Pose) {
        self.camera = camera;
    }
}
