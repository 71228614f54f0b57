//! Terminal backend implementation

use std::io::{self, Write};
use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use unicode_width::UnicodeWidthChar;

use crate::spatial::{Pose, Vector3};
use crate::renderer::{Color, RenderBackend, RenderError, RenderGlyph};
use super::Projection;

#[derive(Clone, PartialEq)]
struct Cell {
    symbol: String,
    fg: Color,
    bg: Color,
    depth: f32,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            symbol: " ".to_string(),
            fg: Color::White,
            bg,
            depth: f32::MAX,
        }
    }
}

/// Terminal rendering backend with a depth buffer and diffed output
pub struct TerminalBackend {
    width: u32,
    height: u32,
    buffer: Vec<Cell>,
    prev_buffer: Vec<Cell>,
    projection: Projection,
    camera: Pose,
    clear_color: Color,
}

impl TerminalBackend {
    pub fn new() -> Result<Self, RenderError> {
        let (width, height) = terminal::size().map_err(|e| RenderError::Init(e.to_string()))?;
        let clear_color = Color::SURFACE;
        let size = width as usize * height as usize;

        Ok(Self {
            width: width as u32,
            height: height as u32,
            buffer: vec![Cell::blank(clear_color); size],
            prev_buffer: vec![Cell::blank(Color::Reset); size],
            projection: Projection::perspective(70.0, cell_aspect(width, height)),
            camera: Pose::IDENTITY,
            clear_color,
        })
    }

    fn refresh_size(&mut self) -> Result<(), RenderError> {
        let (width, height) = terminal::size().map_err(|e| RenderError::Terminal(e.to_string()))?;

        if width as u32 != self.width || height as u32 != self.height {
            self.width = width as u32;
            self.height = height as u32;
            let size = width as usize * height as usize;
            self.buffer = vec![Cell::blank(self.clear_color); size];
            // Force a full redraw after a resize
            self.prev_buffer = vec![Cell::blank(Color::Reset); size];
            self.projection.aspect = cell_aspect(width, height);
        }
        Ok(())
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if (x as u32) < self.width && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    fn set_cell(&mut self, x: u16, y: u16, symbol: String, fg: Color, depth: f32) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            if depth < cell.depth {
                cell.symbol = symbol;
                cell.fg = fg;
                cell.depth = depth;
            }
        }
    }

    /// HUD cells ignore the depth test and always land on top
    fn set_cell_hud(&mut self, x: u16, y: u16, symbol: String, fg: Color) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            cell.symbol = symbol;
            cell.fg = fg;
            cell.depth = 0.0;
        }
    }

    fn to_cells(&self, x: f32, y: f32) -> (u16, u16) {
        (
            (x.clamp(0.0, 1.0) * self.width as f32) as u16,
            (y.clamp(0.0, 1.0) * self.height as f32) as u16,
        )
    }
}

/// Terminal cells are about twice as tall as they are wide
fn cell_aspect(width: u16, height: u16) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / (height as f32 * 2.0)
    }
}

impl RenderBackend for TerminalBackend {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.refresh_size()?;
        std::mem::swap(&mut self.buffer, &mut self.prev_buffer);
        let blank = Cell::blank(self.clear_color);
        for cell in &mut self.buffer {
            *cell = blank.clone();
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let mut stdout = io::stdout();
        let frame_err = |e: io::Error| RenderError::Frame(e.to_string());

        queue!(stdout, cursor::Hide).map_err(frame_err)?;

        for y in 0..self.height as u16 {
            for x in 0..self.width as u16 {
                if let Some(idx) = self.index(x, y) {
                    let cell = &self.buffer[idx];
                    let prev = &self.prev_buffer[idx];
                    if cell.symbol != prev.symbol || cell.fg != prev.fg || cell.bg != prev.bg {
                        queue!(
                            stdout,
                            cursor::MoveTo(x, y),
                            SetForegroundColor(cell.fg.to_crossterm()),
                            SetBackgroundColor(cell.bg.to_crossterm()),
                            Print(&cell.symbol)
                        )
                        .map_err(frame_err)?;
                    }
                }
            }
        }

        stdout.flush().map_err(frame_err)?;
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        for cell in &mut self.buffer {
            *cell = Cell::blank(color);
        }
    }

    fn draw_glyph(&mut self, glyph: &RenderGlyph) {
        if glyph.alpha <= 0.3 {
            return;
        }
        if let Some((x, y, depth)) =
            self.projection
                .project_to_screen(glyph.position, &self.camera, self.width, self.height)
        {
            let color = if glyph.alpha < 0.7 { glyph.color.dim(glyph.alpha) } else { glyph.color };
            self.set_cell(x, y, glyph.symbol.clone(), color, depth);
        }
    }

    fn draw_line(&mut self, from: Vector3, to: Vector3, color: Color, alpha: f32) {
        let a = self.projection.project_to_screen(from, &self.camera, self.width, self.height);
        let b = self.projection.project_to_screen(to, &self.camera, self.width, self.height);
        let (Some((x1, y1, d1)), Some((x2, y2, d2))) = (a, b) else {
            return;
        };
        let color = if alpha < 0.7 { color.dim(alpha) } else { color };

        // Bresenham
        let (x1, y1, x2, y2) = (x1 as i32, y1 as i32, x2 as i32, y2 as i32);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let steps = dx.max(-dy).max(1) as f32;
        let symbol = if dx > -dy { "─" } else if -dy > dx { "│" } else { "·" };
        let (mut x, mut y, mut err) = (x1, y1, dx + dy);

        loop {
            let t = ((x - x1).abs().max((y - y1).abs())) as f32 / steps;
            if x >= 0 && y >= 0 {
                self.set_cell(x as u16, y as u16, symbol.to_string(), color, d1 + (d2 - d1) * t);
            }
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_hud_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (sx, sy) = self.to_cells(x, y);
        let sw = (width * self.width as f32) as u16;
        let sh = (height * self.height as f32) as u16;
        if sw < 2 || sh < 2 {
            return;
        }

        for dy in 0..sh {
            for dx in 0..sw {
                let top = dy == 0;
                let bottom = dy == sh - 1;
                let left = dx == 0;
                let right = dx == sw - 1;
                let symbol = match (top, bottom, left, right) {
                    (true, _, true, _) => "┌",
                    (true, _, _, true) => "┐",
                    (_, true, true, _) => "└",
                    (_, true, _, true) => "┘",
                    (true, _, _, _) | (_, true, _, _) => "─",
                    (_, _, true, _) | (_, _, _, true) => "│",
                    _ => continue,
                };
                self.set_cell_hud(sx + dx, sy + dy, symbol.to_string(), color);
            }
        }
    }

    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        let (sx, sy) = self.to_cells(x, y);
        let mut col = sx;
        for ch in text.chars() {
            if col as u32 >= self.width {
                break;
            }
            self.set_cell_hud(col, sy, ch.to_string(), color);
            col += ch.width().unwrap_or(0).max(1) as u16;
        }
    }

    fn camera(&self) -> &Pose {
        &self.camera
    }

    fn set_camera(&mut self, camera: Pose) {
        self.camera = camera;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_aspect_accounts_for_tall_cells() {
        assert_eq!(cell_aspect(80, 20), 2.0);
        assert_eq!(cell_aspect(80, 0), 1.0);
    }
}
