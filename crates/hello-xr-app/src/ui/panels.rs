//! Panel content: text panes, buttons and sliders

use hello_xr_scene::layout::Rect;
use hello_xr_scene::renderer::{Color, RenderBackend};

use crate::composition::{Action, Button, ControlsBlock, PrimaryContent, SliderBlock};

/// Character cell size in normalized units
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub width: f32,
    pub height: f32,
}

impl Cell {
    pub fn for_backend(backend: &dyn RenderBackend) -> Self {
        let (cols, rows) = backend.size();
        Self {
            width: 1.0 / cols.max(1) as f32,
            height: 1.0 / rows.max(1) as f32,
        }
    }

    fn columns(&self, rect: &Rect) -> usize {
        (rect.width / self.width).floor().max(0.0) as usize
    }

    fn rows(&self, rect: &Rect) -> usize {
        (rect.height / self.height).floor().max(0.0) as usize
    }
}

/// Key that triggers a button
pub fn key_hint(action: Action) -> String {
    match action {
        Action::ToggleShowModel => "s".to_string(),
        Action::ToggleAnimate => "a".to_string(),
        Action::Reset => "r".to_string(),
        Action::SelectGroup(group) => crate::model::SliderGroup::SELECTABLE
            .iter()
            .position(|g| *g == group)
            .map(|i| (i + 1).to_string())
            .unwrap_or_default(),
    }
}

pub fn draw_panel(
    backend: &mut dyn RenderBackend,
    rect: &Rect,
    title: &str,
    border: Color,
    cell: Cell,
) {
    backend.draw_hud_rect(rect.x, rect.y, rect.width, rect.height, border);
    if !title.is_empty() {
        backend.draw_hud_text(rect.x + 2.0 * cell.width, rect.y, &format!(" {title} "), border);
    }
}

/// Inner area of a panel, one cell in from the border
fn body(rect: &Rect, cell: Cell) -> Rect {
    rect.inset(2.0 * cell.width, cell.height)
}

/// Greedy word wrap
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if line.is_empty() {
            word_len
        } else {
            line.chars().count() + 1 + word_len
        };
        if needed > columns && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn draw_text_pane(
    backend: &mut dyn RenderBackend,
    rect: &Rect,
    text: &str,
    color: Color,
    cell: Cell,
) {
    let area = body(rect, cell);
    let rows = cell.rows(&area);
    for (i, line) in wrap(text, cell.columns(&area)).iter().take(rows).enumerate() {
        backend.draw_hud_text(area.x, area.y + i as f32 * cell.height, line, color);
    }
}

fn draw_buttons(
    backend: &mut dyn RenderBackend,
    area: &Rect,
    buttons: &[Button],
    color: Color,
    cell: Cell,
) -> f32 {
    let mut y = area.y;
    for button in buttons {
        let text = format!("[{}] {}", key_hint(button.action), button.label);
        backend.draw_hud_text(area.x, y, &text, color);
        y += cell.height;
    }
    y
}

pub fn draw_primary(
    backend: &mut dyn RenderBackend,
    rect: &Rect,
    primary: &PrimaryContent,
    color: Color,
    cell: Cell,
) {
    match primary {
        PrimaryContent::Text(text) => draw_text_pane(backend, rect, text, color, cell),
        PrimaryContent::Model { buttons, model_visible } => {
            let area = body(rect, cell);
            let y = draw_buttons(backend, &area, buttons, color, cell);
            if !model_visible {
                backend.draw_hud_text(area.x, y + cell.height, "The droid is hidden", Color::MUTED);
            }
        }
    }
}

pub fn draw_controls(
    backend: &mut dyn RenderBackend,
    rect: &Rect,
    controls: &ControlsBlock,
    color: Color,
    cell: Cell,
) {
    match controls {
        ControlsBlock::Text(text) => draw_text_pane(backend, rect, text, color, cell),
        ControlsBlock::Buttons(buttons) => {
            draw_buttons(backend, &body(rect, cell), buttons, color, cell);
        }
    }
}

/// Text bar of `width` cells filled to `fraction`
pub fn slider_bar(fraction: f32, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f32).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

pub fn draw_sliders(
    backend: &mut dyn RenderBackend,
    rect: &Rect,
    sliders: &SliderBlock,
    focused: usize,
    colors: (Color, Color),
    cell: Cell,
) {
    let (color, focus) = colors;
    match sliders {
        SliderBlock::Text(text) => draw_text_pane(backend, rect, text, color, cell),
        SliderBlock::Sliders { title, sliders, .. } => {
            let area = body(rect, cell);
            backend.draw_hud_text(area.x, area.y, title, color);

            let bar_width = cell.columns(&area).saturating_sub(30).clamp(4, 24);
            for (i, slider) in sliders.iter().enumerate() {
                let selected = i == focused;
                let marker = if selected { '▸' } else { ' ' };
                let text = format!(
                    "{marker} {:<18} {} {:>8.2}",
                    slider.label,
                    slider_bar(slider.range.fraction(slider.value), bar_width),
                    slider.value
                );
                let y = area.y + (i as f32 + 2.0) * cell.height;
                backend.draw_hud_text(area.x, y, &text, if selected { focus } else { color });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SliderGroup;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.5, 4), "██░░");
        assert_eq!(slider_bar(2.0, 3), "███");
    }

    #[test]
    fn test_key_hints() {
        assert_eq!(key_hint(Action::SelectGroup(SliderGroup::Scale)), "1");
        assert_eq!(key_hint(Action::SelectGroup(SliderGroup::MaterialProperties)), "5");
        assert_eq!(key_hint(Action::Reset), "r");
    }
}
