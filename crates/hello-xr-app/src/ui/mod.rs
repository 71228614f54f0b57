//! Renders the composed screen
//!
//! Layout:
//! - Spatial: left column (controls panel above sliders panel) next to the
//!   primary panel, with the top bar detached into orbiters above it
//! - Flat: top bar across the screen, primary pane plus a secondary pane
//!   either side by side or stacked, depending on the window width

mod droid;
mod layout;
mod panels;

pub use droid::{anchor_for, droid_segments, PANEL_DEPTH_M};
pub use layout::{screen_layout, ScreenLayout};
pub use panels::{key_hint, slider_bar, wrap};

use hello_xr_scene::layout::{OrbiterAlignment, Rect};
use hello_xr_scene::renderer::{Color, RenderBackend};
use hello_xr_scene::XrSession;

use crate::composition::{PrimaryContent, TopBarEntry, TopBarItem};
use crate::state::AppState;
use panels::Cell;

/// Render one frame of the app
pub fn render<S: XrSession + 'static>(state: &AppState<S>, backend: &mut dyn RenderBackend) {
    backend.clear(Color::SURFACE);

    let alpha = state.fade.value();
    let cell = Cell::for_backend(backend);
    let screen = screen_layout(&state.composition, &state.window);
    let spatial = state.composition.is_spatial();

    let border = Color::PANEL_BORDER.dim(alpha);
    let text = Color::White.dim(alpha);
    let focus = Color::PANEL_FOCUS.dim(alpha);

    render_top_bar(state, backend, &screen.top_bar, cell, alpha);

    let primary_title = if spatial { "Spatial panel" } else { "Primary pane" };
    panels::draw_panel(backend, &screen.primary, primary_title, border, cell);
    panels::draw_primary(backend, &screen.primary, &state.composition.primary, text, cell);
    render_model(state, backend, &screen.primary);

    panels::draw_panel(backend, &screen.controls, "Controls", border, cell);
    panels::draw_controls(backend, &screen.controls, &state.composition.controls, text, cell);

    panels::draw_panel(backend, &screen.sliders, "Sliders", border, cell);
    panels::draw_sliders(
        backend,
        &screen.sliders,
        &state.composition.sliders,
        state.focused_slider,
        (text, focus),
        cell,
    );

    render_status(state, backend, &screen.status);
}

fn top_bar_label(entry: &TopBarEntry, spatial_enabled: bool) -> &'static str {
    match entry.item {
        TopBarItem::Search => "⌕ Search",
        TopBarItem::EnvironmentControls if spatial_enabled => "[Tab] Home space",
        TopBarItem::EnvironmentControls => "[Tab] Full space",
    }
}

fn render_top_bar<S: XrSession + 'static>(
    state: &AppState<S>,
    backend: &mut dyn RenderBackend,
    rect: &Rect,
    cell: Cell,
    alpha: f32,
) {
    let color = Color::ACCENT.dim(alpha);
    let spatial_enabled = state.capabilities.spatial_ui_enabled;

    let mut inline_x = rect.x + cell.width;
    for entry in &state.composition.top_bar {
        let label = top_bar_label(entry, spatial_enabled);
        match entry.orbiter {
            Some(orbiter) => {
                let width = label.chars().count() as f32 * cell.width;
                let x = match orbiter.alignment {
                    OrbiterAlignment::Start => rect.x,
                    OrbiterAlignment::Center => rect.x + (rect.width - width) / 2.0,
                    OrbiterAlignment::End => rect.x + rect.width - width,
                };
                backend.draw_hud_text(x, rect.y, label, color);
            }
            None => {
                backend.draw_hud_text(inline_x, rect.y, label, color);
                inline_x += (label.chars().count() + 4) as f32 * cell.width;
            }
        }
    }

    if !state.composition.is_spatial() {
        let title_x = rect.x + rect.width / 2.0;
        backend.draw_hud_text(title_x, rect.y, "Hello Android XR", Color::White.dim(alpha));
    }
}

fn render_model<S: XrSession + 'static>(
    state: &AppState<S>,
    backend: &mut dyn RenderBackend,
    rect: &Rect,
) {
    let PrimaryContent::Model { model_visible: true, .. } = state.composition.primary else {
        return;
    };
    let Some(entity) = state.controller.entity() else {
        return;
    };

    // Without a material the asset keeps its own green
    let color = match state.controller.material() {
        Some(_) => {
            let [r, g, b, _] = state.ui.transform.material_color.to_rgba();
            Color::from_factors(r, g, b)
        }
        None => Color::PANEL_FOCUS,
    };
    droid::draw_droid(backend, entity, rect, color.dim(state.fade.value()), state.tick);
}

fn render_status<S: XrSession + 'static>(
    state: &AppState<S>,
    backend: &mut dyn RenderBackend,
    rect: &Rect,
) {
    let mode = if state.composition.is_spatial() { "spatial" } else { "flat" };
    let line = format!(
        "model: {} │ mode: {} │ state v{} │ s a 1-5 0 r ↑↓←→ Tab q",
        state.controller.status().label(),
        mode,
        state.ui_version,
    );
    backend.draw_hud_text(rect.x, rect.y, &line, Color::MUTED);

    if let Some(message) = &state.status_message {
        backend.draw_hud_text(rect.x, rect.y + rect.height / 2.0, message, Color::Yellow);
    }
}
