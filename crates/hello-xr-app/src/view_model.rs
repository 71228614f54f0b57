//! State-update surface over the UI state store

use crate::model::{
    MaterialColor, MaterialProperties, ModelTransform, Offset, Rotation, SliderGroup, UiState,
    SCALE_RANGE,
};
use crate::store::{Snapshot, StateStore, StateSubscription};

/// Owns the screen's [`UiState`] and exposes the only ways to change it.
///
/// Every setter clamps its input into the canonical range and publishes
/// a whole new snapshot. Setters never block on I/O.
#[derive(Clone)]
pub struct ViewModel {
    store: StateStore<UiState>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        Self::with_state(UiState::default())
    }

    pub fn with_state(state: UiState) -> Self {
        Self {
            store: StateStore::new(state),
        }
    }

    pub fn current(&self) -> UiState {
        self.store.current()
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn subscribe(&self) -> StateSubscription<UiState> {
        self.store.subscribe()
    }

    fn update_transform(&self, f: impl FnOnce(&ModelTransform) -> ModelTransform) -> Snapshot<UiState> {
        self.store.update(|state| UiState {
            transform: f(&state.transform),
            ..*state
        })
    }

    pub fn set_visible_slider_group(&self, group: SliderGroup) {
        self.store.update(|state| UiState {
            visible_slider_group: group,
            ..*state
        });
    }

    pub fn toggle_show_model(&self) {
        self.store.update(|state| UiState {
            show_model: !state.show_model,
            ..*state
        });
    }

    pub fn toggle_animate(&self) {
        self.store.update(|state| UiState {
            animate: !state.animate,
            ..*state
        });
    }

    pub fn set_scale(&self, scale: f32) {
        self.update_transform(|t| ModelTransform {
            scale: SCALE_RANGE.clamp(scale),
            ..*t
        });
    }

    pub fn set_rotation(&self, rotation: Rotation) {
        self.update_rotation(|_| rotation);
    }

    pub fn set_offset(&self, offset: Offset) {
        self.update_offset(|_| offset);
    }

    pub fn set_material_color(&self, color: MaterialColor) {
        self.update_material_color(|_| color);
    }

    pub fn set_material_properties(&self, properties: MaterialProperties) {
        self.update_material_properties(|_| properties);
    }

    /// Derive the rotation from the current one under the store lock
    pub fn update_rotation(&self, f: impl FnOnce(&Rotation) -> Rotation) {
        self.update_transform(|t| ModelTransform {
            rotation: f(&t.rotation).clamped(),
            ..*t
        });
    }

    pub fn update_offset(&self, f: impl FnOnce(&Offset) -> Offset) {
        self.update_transform(|t| ModelTransform {
            offset: f(&t.offset).clamped(),
            ..*t
        });
    }

    pub fn update_material_color(&self, f: impl FnOnce(&MaterialColor) -> MaterialColor) {
        self.update_transform(|t| ModelTransform {
            material_color: f(&t.material_color).clamped(),
            ..*t
        });
    }

    pub fn update_material_properties(
        &self,
        f: impl FnOnce(&MaterialProperties) -> MaterialProperties,
    ) {
        self.update_transform(|t| ModelTransform {
            material_properties: f(&t.material_properties).clamped(),
            ..*t
        });
    }

    /// Restore the default transform; flags and slider group are kept
    pub fn reset_transform(&self) {
        self.update_transform(|_| ModelTransform::default());
    }

    /// The reset button: default transform, then hide all sliders
    pub fn reset_model(&self) {
        self.reset_transform();
        self.set_visible_slider_group(SliderGroup::None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_flip_only_their_flag() {
        let vm = ViewModel::new();
        vm.toggle_show_model();
        let state = vm.current();
        assert!(state.show_model);
        assert!(!state.animate);

        vm.toggle_animate();
        vm.toggle_show_model();
        let state = vm.current();
        assert!(!state.show_model);
        assert!(state.animate);
    }

    #[test]
    fn test_setters_clamp_silently() {
        let vm = ViewModel::new();
        vm.set_scale(100.0);
        assert_eq!(vm.current().transform.scale, 5.0);
        vm.set_scale(-3.0);
        assert_eq!(vm.current().transform.scale, 0.1);
        vm.set_scale(f32::NAN);
        assert_eq!(vm.current().transform.scale, 0.1);

        vm.set_offset(Offset { x: 2000.0, y: -2000.0, z: 12.5 });
        assert_eq!(vm.current().transform.offset, Offset { x: 1500.0, y: -1500.0, z: 12.5 });

        vm.set_material_color(MaterialColor { x: 1.2, y: -0.1, z: 0.3, w: f32::NAN });
        assert_eq!(
            vm.current().transform.material_color,
            MaterialColor { x: 1.0, y: 0.0, z: 0.3, w: 0.0 }
        );

        vm.set_material_properties(MaterialProperties {
            ambient_occlusion: 9.0,
            metallic: 0.4,
            roughness: -1.0,
        });
        assert_eq!(
            vm.current().transform.material_properties,
            MaterialProperties { ambient_occlusion: 1.0, metallic: 0.4, roughness: 0.0 }
        );
    }

    #[test]
    fn test_in_range_values_are_stored_exactly() {
        let vm = ViewModel::new();
        let rotation = Rotation { x: 0.25, y: -0.75, z: 0.125, w: 0.5 };
        vm.set_rotation(rotation);
        assert_eq!(vm.current().transform.rotation, rotation);
    }

    #[test]
    fn test_setter_sequence_matches_fieldwise_clamp() {
        use crate::model::{
            MATERIAL_COLOR_RANGE, MATERIAL_PROPERTY_RANGE, OFFSET_RANGE, ROTATION_W_RANGE,
            ROTATION_X_RANGE, ROTATION_Y_RANGE, ROTATION_Z_RANGE,
        };

        let inputs = [-2000.0, -1.0, -0.3, 0.0, 0.2, 0.75, 1.0, 3.0, 1600.0, f32::NAN, 0.45];
        let at = |i: usize| inputs[i % inputs.len()];
        let vm = ViewModel::new();

        for i in 0..inputs.len() {
            let (a, b, c, d) = (at(i), at(i + 3), at(i + 5), at(i + 7));
            vm.set_scale(a);
            vm.set_rotation(Rotation { x: a, y: b, z: c, w: d });
            vm.set_offset(Offset { x: b, y: c, z: d });
            vm.set_material_color(MaterialColor { x: c, y: d, z: a, w: b });
            vm.set_material_properties(MaterialProperties {
                ambient_occlusion: d,
                metallic: a,
                roughness: b,
            });

            let t = vm.current().transform;
            assert_eq!(t.scale, SCALE_RANGE.clamp(a), "scale for input {i}");
            assert_eq!(
                t.rotation,
                Rotation {
                    x: ROTATION_X_RANGE.clamp(a),
                    y: ROTATION_Y_RANGE.clamp(b),
                    z: ROTATION_Z_RANGE.clamp(c),
                    w: ROTATION_W_RANGE.clamp(d),
                },
                "rotation for input {i}"
            );
            assert_eq!(
                t.offset,
                Offset {
                    x: OFFSET_RANGE.clamp(b),
                    y: OFFSET_RANGE.clamp(c),
                    z: OFFSET_RANGE.clamp(d),
                },
                "offset for input {i}"
            );
            assert_eq!(
                t.material_color,
                MaterialColor {
                    x: MATERIAL_COLOR_RANGE.clamp(c),
                    y: MATERIAL_COLOR_RANGE.clamp(d),
                    z: MATERIAL_COLOR_RANGE.clamp(a),
                    w: MATERIAL_COLOR_RANGE.clamp(b),
                },
                "material color for input {i}"
            );
            assert_eq!(
                t.material_properties,
                MaterialProperties {
                    ambient_occlusion: MATERIAL_PROPERTY_RANGE.clamp(d),
                    metallic: MATERIAL_PROPERTY_RANGE.clamp(a),
                    roughness: MATERIAL_PROPERTY_RANGE.clamp(b),
                },
                "material properties for input {i}"
            );
        }
    }

    #[test]
    fn test_update_derives_from_current_and_clamps() {
        let vm = ViewModel::new();
        vm.set_rotation(Rotation { x: 0.25, y: 0.5, z: 0.1, w: 0.9 });

        vm.update_rotation(|r| Rotation { y: 7.0, ..*r });
        assert_eq!(
            vm.current().transform.rotation,
            Rotation { x: 0.25, y: 1.0, z: 0.1, w: 0.9 }
        );

        vm.update_offset(|o| Offset { z: o.z + 10.0, ..*o });
        vm.update_offset(|o| Offset { z: o.z + 10.0, ..*o });
        assert_eq!(vm.current().transform.offset.z, Offset::default().z + 20.0);
    }

    #[test]
    fn test_setters_leave_other_fields_alone() {
        let vm = ViewModel::new();
        vm.toggle_show_model();
        vm.set_visible_slider_group(SliderGroup::Offset);
        vm.set_scale(2.0);

        let state = vm.current();
        assert!(state.show_model);
        assert_eq!(state.visible_slider_group, SliderGroup::Offset);
        assert_eq!(state.transform.rotation, Rotation::default());
        assert_eq!(state.transform.scale, 2.0);
    }

    #[test]
    fn test_reset_transform_keeps_flags() {
        let vm = ViewModel::new();
        vm.toggle_show_model();
        vm.toggle_animate();
        vm.set_visible_slider_group(SliderGroup::Rotation);
        vm.set_scale(3.0);
        vm.set_offset(Offset { x: 10.0, y: 20.0, z: 30.0 });

        vm.reset_transform();
        let state = vm.current();
        assert_eq!(state.transform, ModelTransform::default());
        assert!(state.show_model);
        assert!(state.animate);
        assert_eq!(state.visible_slider_group, SliderGroup::Rotation);
    }

    #[test]
    fn test_reset_model_publishes_twice() {
        let vm = ViewModel::new();
        vm.set_visible_slider_group(SliderGroup::Scale);
        vm.set_scale(4.0);
        let mut sub = vm.subscribe();
        let _ = sub.try_next();

        vm.reset_model();

        let first = sub.try_next().unwrap().value;
        assert_eq!(first.transform, ModelTransform::default());
        assert_eq!(first.visible_slider_group, SliderGroup::Scale);

        let second = sub.try_next().unwrap().value;
        assert_eq!(second.visible_slider_group, SliderGroup::None);
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_subscriber_sees_each_setter() {
        let vm = ViewModel::new();
        let mut sub = vm.subscribe();
        vm.set_visible_slider_group(SliderGroup::Scale);
        vm.set_scale(2.5);
        vm.toggle_show_model();

        let versions: Vec<u64> = std::iter::from_fn(|| sub.try_next()).map(|s| s.version).collect();
        assert_eq!(versions, vec![0, 1, 2, 3]);
        assert_eq!(vm.version(), 3);
    }
}
