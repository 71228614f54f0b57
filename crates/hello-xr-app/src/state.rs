//! Application state for the hello-xr sample

use hello_xr_scene::animation::Tween;
use hello_xr_scene::spatial::dp_to_meters;
use hello_xr_scene::{FrameContext, SpatialCapabilities, WindowSizeClass, XrSession};

use crate::composition::{compose, Composition};
use crate::controller::ModelController;
use crate::model::UiState;
use crate::store::StateSubscription;
use crate::view_model::ViewModel;

/// Everything the app tracks between frames
pub struct AppState<S: XrSession> {
    pub view_model: ViewModel,
    subscription: StateSubscription<UiState>,
    /// Latest snapshot picked up from the view model
    pub ui: UiState,
    pub ui_version: u64,
    pub capabilities: SpatialCapabilities,
    pub window: WindowSizeClass,
    pub composition: Composition,
    pub controller: ModelController<S>,
    /// Index of the focused slider within the visible group
    pub focused_slider: usize,
    pub fade: Tween,
    pub status_message: Option<String>,
    pub tick: u64,
}

impl<S: XrSession + 'static> AppState<S> {
    pub fn new(
        view_model: ViewModel,
        capabilities: SpatialCapabilities,
        window: WindowSizeClass,
        controller: ModelController<S>,
    ) -> Self {
        let mut subscription = view_model.subscribe();
        let snapshot = subscription.latest();
        let (ui, ui_version) = snapshot
            .map(|s| (s.value, s.version))
            .unwrap_or_else(|| (view_model.current(), view_model.version()));
        let composition = compose(&ui, &capabilities, &window);
        let fade = composition.fade.tween();

        let mut state = Self {
            view_model,
            subscription,
            ui,
            ui_version,
            capabilities,
            window,
            composition,
            controller,
            focused_slider: 0,
            fade,
            status_message: None,
            tick: 0,
        };
        state.track_model_slot();
        state
    }

    /// Pull new state, finish background work and recompose
    pub fn update(&mut self, frame: &FrameContext) {
        self.window = frame.window;

        let fresh = match self.subscription.latest() {
            Some(snapshot) => {
                self.ui = snapshot.value;
                self.ui_version = snapshot.version;
                true
            }
            None => false,
        };
        let arrived = self.controller.poll();

        self.recompose();
        self.fade.update(frame.delta);

        if let Some(height_dp) = self.composition.model_slot_height_dp() {
            self.controller.set_layout_height_m(dp_to_meters(height_dp));
        }
        if fresh || arrived || frame.frame == 1 {
            self.controller.sync(&self.ui);
        }
    }

    fn recompose(&mut self) {
        let composition = compose(&self.ui, &self.capabilities, &self.window);
        if composition.is_spatial() != self.composition.is_spatial() {
            // Switching presentation fades the new layout in
            self.fade = composition.fade.tween();
        }
        self.composition = composition;

        let count = self.composition.sliders().len();
        if count == 0 {
            self.focused_slider = 0;
        } else if self.focused_slider >= count {
            self.focused_slider = count - 1;
        }

        self.track_model_slot();
    }

    /// Only the spatial layout hosts the model; leaving it releases the asset
    fn track_model_slot(&mut self) {
        if self.composition.is_spatial() {
            self.controller.resume();
        } else {
            self.controller.suspend();
        }
    }

    /// Switch between full space and home space
    pub fn toggle_spatial(&mut self) {
        let next = self.capabilities.toggled();
        if next == self.capabilities {
            self.status_message = Some("Spatial UI is not supported on this device".to_string());
            return;
        }
        self.capabilities = next;
        self.recompose();
        self.status_message = Some(
            if next.spatial_ui_enabled { "Entered full space" } else { "Entered home space" }
                .to_string(),
        );
        tracing::info!(spatial = next.spatial_ui_enabled, "Spatial mode changed");
    }

    pub fn shutdown(&mut self) {
        self.controller.dispose();
    }
}
