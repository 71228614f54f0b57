//! Event handlers
//!
//! Keys stand in for pointer input on the composed buttons and sliders.
//! An action only fires when the current composition offers it, so the
//! keyboard can never reach a control that is not on screen.

use crossterm::event::KeyCode;
use hello_xr_scene::{XrEvent, XrSession};

use crate::composition::{Action, Slider};
use crate::model::{MaterialColor, MaterialProperties, Offset, Rotation, SliderGroup};
use crate::state::AppState;
use crate::view_model::ViewModel;

pub fn handle_event<S: XrSession + 'static>(event: XrEvent, state: &mut AppState<S>) -> bool {
    match event.pressed_key() {
        Some(code) => handle_key(code, state),
        None => true,
    }
}

fn handle_key<S: XrSession + 'static>(code: KeyCode, state: &mut AppState<S>) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
        KeyCode::Char('s') | KeyCode::Char('S') => trigger(Action::ToggleShowModel, state),
        KeyCode::Char('a') | KeyCode::Char('A') => trigger(Action::ToggleAnimate, state),
        KeyCode::Char('r') | KeyCode::Char('R') => trigger(Action::Reset, state),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            trigger(Action::SelectGroup(SliderGroup::SELECTABLE[index]), state);
        }
        KeyCode::Char('0') => {
            if has_controls(state) {
                state.view_model.set_visible_slider_group(SliderGroup::None);
            }
        }
        KeyCode::Up => move_focus(state, -1),
        KeyCode::Down => move_focus(state, 1),
        KeyCode::Left => nudge(state, -1.0),
        KeyCode::Right => nudge(state, 1.0),
        KeyCode::Tab => state.toggle_spatial(),
        _ => {}
    }
    true
}

fn has_controls<S: XrSession + 'static>(state: &AppState<S>) -> bool {
    state
        .composition
        .buttons()
        .iter()
        .any(|b| matches!(b.action, Action::SelectGroup(_)))
}

/// Perform `action` if a button for it is on screen
fn trigger<S: XrSession + 'static>(action: Action, state: &mut AppState<S>) {
    let available = state.composition.buttons().iter().any(|b| b.action == action);
    if !available {
        state.status_message = Some("Not available here".to_string());
        return;
    }

    let vm = &state.view_model;
    match action {
        Action::ToggleShowModel => vm.toggle_show_model(),
        Action::ToggleAnimate => vm.toggle_animate(),
        Action::SelectGroup(group) => {
            vm.set_visible_slider_group(group);
            state.focused_slider = 0;
        }
        Action::Reset => vm.reset_model(),
    }
    state.status_message = None;
}

fn move_focus<S: XrSession + 'static>(state: &mut AppState<S>, delta: isize) {
    let count = state.composition.sliders().len() as isize;
    if count == 0 {
        return;
    }
    let next = (state.focused_slider as isize + delta).rem_euclid(count);
    state.focused_slider = next as usize;
}

fn nudge<S: XrSession + 'static>(state: &mut AppState<S>, direction: f32) {
    let Some(slider) = state.composition.sliders().get(state.focused_slider).copied() else {
        return;
    };
    let group = state.ui.visible_slider_group;
    let value = slider.value + direction * slider.range.step();
    set_slider(&state.view_model, group, state.focused_slider, slider, value);
}

/// Write one slider's value back through the matching setter.
///
/// Sibling components are read inside the store update, so concurrent
/// writers to other fields of the same group are not overwritten.
pub fn set_slider(vm: &ViewModel, group: SliderGroup, index: usize, slider: Slider, value: f32) {
    let value = slider.range.clamp(value);
    match group {
        SliderGroup::None => {}
        SliderGroup::Scale => vm.set_scale(value),
        SliderGroup::Rotation => vm.update_rotation(|r| match index {
            0 => Rotation { x: value, ..*r },
            1 => Rotation { y: value, ..*r },
            2 => Rotation { z: value, ..*r },
            _ => Rotation { w: value, ..*r },
        }),
        SliderGroup::Offset => vm.update_offset(|o| match index {
            0 => Offset { x: value, ..*o },
            1 => Offset { y: value, ..*o },
            _ => Offset { z: value, ..*o },
        }),
        SliderGroup::MaterialColors => vm.update_material_color(|c| match index {
            0 => MaterialColor { x: value, ..*c },
            1 => MaterialColor { y: value, ..*c },
            2 => MaterialColor { z: value, ..*c },
            _ => MaterialColor { w: value, ..*c },
        }),
        SliderGroup::MaterialProperties => vm.update_material_properties(|p| match index {
            0 => MaterialProperties { ambient_occlusion: value, ..*p },
            1 => MaterialProperties { metallic: value, ..*p },
            _ => MaterialProperties { roughness: value, ..*p },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ModelCache;
    use crate::controller::{ModelController, ModelSettings};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use hello_xr_scene::session::EmbeddedSource;
    use hello_xr_scene::sim::SimSession;
    use hello_xr_scene::{FrameContext, SpatialCapabilities, WindowSizeClass};
    use std::sync::Arc;
    use std::time::Duration;

    fn app_state(caps: SpatialCapabilities) -> AppState<SimSession> {
        let controller = ModelController::new(
            Some(Arc::new(SimSession::new())),
            Arc::new(ModelCache::new("BUGDROID")),
            Arc::new(EmbeddedSource::new("droid", crate::DEFAULT_ASSET)),
            ModelSettings::default(),
        );
        AppState::new(ViewModel::new(), caps, WindowSizeClass::default(), controller)
    }

    fn press(state: &mut AppState<SimSession>, code: KeyCode) -> bool {
        let keep_going = handle_event(XrEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)), state);
        let frame = FrameContext::new(state.window, Duration::from_millis(16), state.tick + 2);
        state.update(&frame);
        keep_going
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut state = app_state(SpatialCapabilities::spatial());
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert!(!press(&mut state, KeyCode::Esc));
        assert!(press(&mut state, KeyCode::Char('x')));
    }

    #[tokio::test]
    async fn test_show_then_select_group() {
        let mut state = app_state(SpatialCapabilities::spatial());

        // Controls are not composed until the model is shown
        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.ui.visible_slider_group, SliderGroup::None);

        press(&mut state, KeyCode::Char('s'));
        assert!(state.ui.show_model);

        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.ui.visible_slider_group, SliderGroup::Rotation);

        press(&mut state, KeyCode::Char('0'));
        assert_eq!(state.ui.visible_slider_group, SliderGroup::None);
    }

    #[tokio::test]
    async fn test_animate_requires_shown_model() {
        let mut state = app_state(SpatialCapabilities::spatial());
        press(&mut state, KeyCode::Char('a'));
        assert!(!state.ui.animate);
        assert!(state.status_message.is_some());

        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Char('a'));
        assert!(state.ui.animate);
    }

    #[tokio::test]
    async fn test_flat_mode_has_no_model_buttons() {
        let mut state = app_state(SpatialCapabilities::home_space());
        press(&mut state, KeyCode::Char('s'));
        assert!(!state.ui.show_model);

        press(&mut state, KeyCode::Tab);
        assert!(state.capabilities.spatial_ui_enabled);
        press(&mut state, KeyCode::Char('s'));
        assert!(state.ui.show_model);
    }

    #[tokio::test]
    async fn test_tab_is_ignored_without_xr_feature() {
        let mut state = app_state(SpatialCapabilities::flat());
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.capabilities, SpatialCapabilities::flat());
    }

    #[tokio::test]
    async fn test_nudge_focused_slider() {
        let mut state = app_state(SpatialCapabilities::spatial());
        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Char('1'));

        press(&mut state, KeyCode::Right);
        let expected = 1.0 + (5.0 - 0.1) / 50.0;
        assert!((state.ui.transform.scale - expected).abs() < 1e-5);

        press(&mut state, KeyCode::Char('3'));
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.focused_slider, 2);
        press(&mut state, KeyCode::Left);
        assert!((state.ui.transform.offset.z - 340.0).abs() < 1e-3);

        // Focus wraps around
        press(&mut state, KeyCode::Down);
        assert_eq!(state.focused_slider, 0);
    }

    #[test]
    fn test_set_slider_keeps_sibling_written_since_read() {
        let vm = ViewModel::new();
        let stale = Slider {
            label: "Y rotation",
            range: crate::model::ROTATION_Y_RANGE,
            value: 0.0,
        };

        // Another writer changes x after the slider value was read
        vm.update_rotation(|r| Rotation { x: 0.3, ..*r });
        set_slider(&vm, SliderGroup::Rotation, 1, stale, 0.6);

        let rotation = vm.current().transform.rotation;
        assert_eq!(rotation.x, 0.3);
        assert_eq!(rotation.y, 0.6);
    }

    #[test]
    fn test_concurrent_slider_writers_keep_both_fields() {
        let vm = ViewModel::new();
        let slider = Slider {
            label: "Offset",
            range: crate::model::OFFSET_RANGE,
            value: 0.0,
        };

        std::thread::scope(|scope| {
            for index in 0..2 {
                let vm = vm.clone();
                scope.spawn(move || {
                    for step in 1..=200 {
                        set_slider(&vm, SliderGroup::Offset, index, slider, step as f32);
                    }
                });
            }
        });

        let offset = vm.current().transform.offset;
        assert_eq!(offset.x, 200.0);
        assert_eq!(offset.y, 200.0);
        assert_eq!(vm.version(), 400);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_and_hides_sliders() {
        let mut state = app_state(SpatialCapabilities::spatial());
        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Char('1'));
        press(&mut state, KeyCode::Right);

        press(&mut state, KeyCode::Char('r'));
        assert_eq!(state.ui.transform, crate::model::ModelTransform::default());
        assert_eq!(state.ui.visible_slider_group, SliderGroup::None);
        assert!(state.ui.show_model);
    }
}
