//! Wireframe stand-in for the droid model
//!
//! The simulated session has no mesh renderer, so the entity is drawn as a
//! handful of line segments sized like the real asset (2.08 m tall, origin
//! at the center) and placed with the entity's pose and scale.

use hello_xr_scene::layout::Rect;
use hello_xr_scene::renderer::{Color, RenderBackend, RenderGlyph};
use hello_xr_scene::session::AnimationState;
use hello_xr_scene::{ModelEntity, Pose, Vector3};

/// Depth of the panel surface the model is placed on, in meters
pub const PANEL_DEPTH_M: f32 = 2.0;
const HALF_FOV_TAN: f32 = 0.700_207_5; // tan(35°)

type Segment = (Vector3, Vector3);

/// Box with possibly different top and bottom footprints
fn frustum(bottom_y: f32, bottom: (f32, f32), top_y: f32, top: (f32, f32)) -> Vec<Segment> {
    let corners = |y: f32, (hx, hz): (f32, f32)| {
        [
            Vector3::new(-hx, y, -hz),
            Vector3::new(hx, y, -hz),
            Vector3::new(hx, y, hz),
            Vector3::new(-hx, y, hz),
        ]
    };
    let b = corners(bottom_y, bottom);
    let t = corners(top_y, top);

    let mut segments = Vec::with_capacity(12);
    for i in 0..4 {
        let j = (i + 1) % 4;
        segments.push((b[i], b[j]));
        segments.push((t[i], t[j]));
        segments.push((b[i], t[i]));
    }
    segments
}

/// Model-space segments; `wave` is the right arm's angle from hanging
pub fn droid_segments(wave: f32) -> Vec<Segment> {
    let mut segments = frustum(-0.75, (0.55, 0.45), 0.35, (0.55, 0.45));
    segments.extend(frustum(0.45, (0.5, 0.4), 0.95, (0.35, 0.28)));

    for side in [-1.0, 1.0] {
        // Antenna and leg
        segments.push((Vector3::new(side * 0.25, 0.95, 0.0), Vector3::new(side * 0.4, 1.04, 0.0)));
        segments.push((Vector3::new(side * 0.25, -0.75, 0.0), Vector3::new(side * 0.25, -1.04, 0.0)));
    }

    let left_shoulder = Vector3::new(-0.68, 0.25, 0.0);
    segments.push((left_shoulder, left_shoulder + Vector3::new(0.0, -0.7, 0.0)));

    let right_shoulder = Vector3::new(0.68, 0.25, 0.0);
    let hand = Vector3::new(wave.sin() * 0.7, -wave.cos() * 0.7, 0.0);
    segments.push((right_shoulder, right_shoulder + hand));

    segments
}

/// Arm angle for the waving animation at `tick`
pub fn wave_angle(state: &AnimationState, tick: u64) -> f32 {
    match state {
        AnimationState::Playing { .. } => 2.4 + 0.45 * (tick as f32 * 0.35).sin(),
        AnimationState::Stopped => 0.0,
    }
}

/// Scene point behind the center of a normalized screen rect
pub fn anchor_for(rect: &Rect, size: (u32, u32)) -> Vector3 {
    let (cols, rows) = size;
    let aspect = if rows == 0 { 1.0 } else { cols as f32 / (rows as f32 * 2.0) };
    let x_ndc = (rect.x + rect.width / 2.0) * 2.0 - 1.0;
    let y_ndc = 1.0 - (rect.y + rect.height / 2.0) * 2.0;

    Vector3::new(
        x_ndc * PANEL_DEPTH_M * HALF_FOV_TAN * aspect,
        y_ndc * PANEL_DEPTH_M * HALF_FOV_TAN,
        PANEL_DEPTH_M,
    )
}

/// Draw `entity` in front of the panel at `rect`
pub fn draw_droid<E: ModelEntity>(
    backend: &mut dyn RenderBackend,
    entity: &E,
    rect: &Rect,
    color: Color,
    tick: u64,
) {
    if entity.is_disposed() {
        return;
    }

    let anchor = anchor_for(rect, backend.size());
    let local = entity.pose();
    // Positive z moves the model out of the panel towards the viewer
    let offset = Vector3::new(local.position.x, local.position.y, -local.position.z);
    let pose = Pose::new(anchor + offset, local.rotation);
    let scale = entity.scale();

    for (from, to) in droid_segments(wave_angle(&entity.animation_state(), tick)) {
        backend.draw_line(
            pose.transform_point(from, scale),
            pose.transform_point(to, scale),
            color,
            1.0,
        );
    }

    for eye in [Vector3::new(-0.2, 0.7, -0.41), Vector3::new(0.2, 0.7, -0.41)] {
        let glyph = RenderGlyph::new("●", pose.transform_point(eye, scale)).with_color(Color::White);
        backend.draw_glyph(&glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_droid_spans_model_height() {
        let segments = droid_segments(0.0);
        let (min, max) = segments
            .iter()
            .flat_map(|(a, b)| [a.y, b.y])
            .fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));

        assert!((min + 1.04).abs() < 1e-6);
        assert!((max - 1.04).abs() < 1e-6);
    }

    #[test]
    fn test_wave_raises_arm() {
        let hanging = droid_segments(0.0);
        let waving = droid_segments(wave_angle(
            &AnimationState::Playing { name: "wave".into(), looping: true },
            0,
        ));

        let hand_y = |s: &[Segment]| s.last().map(|(_, to)| to.y).unwrap_or_default();
        assert!(hand_y(&waving) > hand_y(&hanging));
    }

    #[test]
    fn test_anchor_for_centered_rect() {
        let anchor = anchor_for(&Rect::new(0.25, 0.25, 0.5, 0.5), (120, 40));
        assert!(anchor.x.abs() < 1e-6);
        assert!(anchor.y.abs() < 1e-6);
        assert_eq!(anchor.z, PANEL_DEPTH_M);
    }
}
