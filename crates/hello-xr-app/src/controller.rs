//! Model controller: binds UI state to the scene entity
//!
//! The controller owns the background load of the droid model, the entity
//! created from it and the PBR material override. Background results come
//! back over one-shot channels and are picked up by [`ModelController::poll`]
//! on the UI tick; nothing here blocks.

use std::sync::Arc;

use hello_xr_config::ModelConfig;
use hello_xr_scene::session::AnimationState;
use hello_xr_scene::spatial::dp_to_meters;
use hello_xr_scene::{MaterialSpec, ModelEntity, PbrMaterial, ResourceSource, SceneError, XrSession};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::cache::ModelCache;
use crate::composition::SPATIAL_ROW_HEIGHT_DP;
use crate::model::UiState;

/// Model-specific settings
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub animation: String,
    pub mesh: String,
    /// Height of the asset in meters
    pub model_height_m: f32,
    /// Share of the layout height the model fills
    pub fill_ratio: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::from(&ModelConfig::default())
    }
}

impl From<&ModelConfig> for ModelSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            animation: config.animation.clone(),
            mesh: config.mesh.clone(),
            model_height_m: config.height_m,
            fill_ratio: config.fill_ratio,
        }
    }
}

/// Where the model is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// No session, or the load failed
    Unavailable,
    /// Out of the composition; the model reloads on resume
    Suspended,
    Disposed,
}

impl LoadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Loading => "loading",
            LoadStatus::Ready => "ready",
            LoadStatus::Unavailable => "unavailable",
            LoadStatus::Suspended => "suspended",
            LoadStatus::Disposed => "disposed",
        }
    }
}

enum MaterialSlot<M> {
    NotRequested,
    Pending(oneshot::Receiver<Result<Arc<M>, SceneError>>),
    Ready(Arc<M>),
    Failed,
}

/// Drives one model entity from [`UiState`] snapshots
pub struct ModelController<S: XrSession> {
    session: Option<Arc<S>>,
    cache: Arc<ModelCache<S::Model>>,
    source: Arc<dyn ResourceSource>,
    settings: ModelSettings,
    pending: Option<oneshot::Receiver<Option<Arc<S::Model>>>>,
    load_task: Option<JoinHandle<()>>,
    model: Option<Arc<S::Model>>,
    entity: Option<S::Entity>,
    material: MaterialSlot<S::Material>,
    override_bound: bool,
    layout_height_m: f32,
    suspended: bool,
    disposed: bool,
}

impl<S: XrSession + 'static> ModelController<S> {
    /// Create the controller and start loading the model in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        session: Option<Arc<S>>,
        cache: Arc<ModelCache<S::Model>>,
        source: Arc<dyn ResourceSource>,
        settings: ModelSettings,
    ) -> Self {
        let mut controller = Self {
            session,
            cache,
            source,
            settings,
            pending: None,
            load_task: None,
            model: None,
            entity: None,
            material: MaterialSlot::NotRequested,
            override_bound: false,
            layout_height_m: dp_to_meters(SPATIAL_ROW_HEIGHT_DP),
            suspended: false,
            disposed: false,
        };
        controller.start_load();
        controller
    }

    fn start_load(&mut self) {
        let (tx, rx) = oneshot::channel();
        let session = self.session.clone();
        let cache = Arc::clone(&self.cache);
        let source = Arc::clone(&self.source);
        let task = tokio::spawn(async move {
            let model = cache.get_or_load(session.as_deref(), source.as_ref()).await;
            if tx.send(model).is_err() {
                tracing::debug!("Model load finished after teardown, result dropped");
            }
        });
        self.pending = Some(rx);
        self.load_task = Some(task);
    }

    /// Drop the pending load, the entity, the material and the cached model
    fn release(&mut self) {
        self.pending = None;
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        self.dispose_entity();
        self.model = None;
        self.cache.clear();
    }

    pub fn status(&self) -> LoadStatus {
        if self.disposed {
            LoadStatus::Disposed
        } else if self.session.is_none() {
            LoadStatus::Unavailable
        } else if self.suspended {
            LoadStatus::Suspended
        } else if self.pending.is_some() {
            LoadStatus::Loading
        } else if self.model.is_some() {
            LoadStatus::Ready
        } else {
            LoadStatus::Unavailable
        }
    }

    pub fn model(&self) -> Option<&Arc<S::Model>> {
        self.model.as_ref()
    }

    pub fn entity(&self) -> Option<&S::Entity> {
        self.entity.as_ref()
    }

    pub fn material(&self) -> Option<&Arc<S::Material>> {
        match &self.material {
            MaterialSlot::Ready(material) => Some(material),
            _ => None,
        }
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Height of the layout slot the model is placed in
    pub fn set_layout_height_m(&mut self, height_m: f32) {
        if height_m.is_finite() && height_m > 0.0 {
            self.layout_height_m = height_m;
        }
    }

    /// Scale that makes the model fill its share of the layout height
    pub fn fit_scale(&self) -> f32 {
        self.layout_height_m / self.settings.model_height_m * self.settings.fill_ratio
    }

    /// Pick up finished background work; returns true if anything arrived
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        if let Some(rx) = self.pending.as_mut() {
            match rx.try_recv() {
                Ok(model) => {
                    if model.is_some() {
                        tracing::info!("Model '{}' ready", self.cache.model_name());
                    }
                    self.model = model;
                    self.pending = None;
                    self.load_task = None;
                    changed = true;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    tracing::error!("Model load task ended without a result");
                    self.pending = None;
                    self.load_task = None;
                    changed = true;
                }
            }
        }

        if let MaterialSlot::Pending(rx) = &mut self.material {
            let next = match rx.try_recv() {
                Ok(Ok(material)) => Some(MaterialSlot::Ready(material)),
                Ok(Err(e)) => {
                    tracing::error!("Failed to create model material: {}", e);
                    Some(MaterialSlot::Failed)
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(MaterialSlot::Failed),
            };
            if let Some(next) = next {
                self.material = next;
                changed = true;
            }
        }

        changed
    }

    /// Bring the entity in line with `state`
    pub fn sync(&mut self, state: &UiState) {
        if self.disposed || self.suspended {
            return;
        }

        if !state.show_model {
            self.dispose_entity();
            return;
        }

        if self.entity.is_none() {
            self.create_entity();
        }

        let fit_scale = self.fit_scale();
        let Some(entity) = self.entity.as_mut() else {
            return;
        };

        let playing = matches!(entity.animation_state(), AnimationState::Playing { .. });
        if state.animate && !playing {
            if let Err(e) = entity.start_animation(true, &self.settings.animation) {
                tracing::warn!("Cannot start animation '{}': {}", self.settings.animation, e);
            }
        } else if !state.animate && playing {
            entity.stop_animation();
        }

        entity.set_pose(state.transform.pose());
        entity.set_scale(state.transform.scale * fit_scale);

        self.apply_material(state);
    }

    fn create_entity(&mut self) {
        let (Some(session), Some(model)) = (self.session.as_ref(), self.model.as_ref()) else {
            return;
        };

        match session.create_model_entity(model) {
            Ok(entity) => {
                tracing::debug!("Created entity for model '{}'", self.cache.model_name());
                self.entity = Some(entity);
                self.override_bound = false;
            }
            Err(e) => tracing::error!("Failed to create model entity: {}", e),
        }
    }

    fn request_material(&mut self) {
        let Some(session) = self.session.clone() else {
            self.material = MaterialSlot::Failed;
            return;
        };

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let material = session.create_material(MaterialSpec::LIT_OPAQUE).await;
            let _ = tx.send(material);
        });
        self.material = MaterialSlot::Pending(rx);
    }

    fn apply_material(&mut self, state: &UiState) {
        if matches!(self.material, MaterialSlot::NotRequested) {
            self.request_material();
        }

        let (MaterialSlot::Ready(material), Some(entity)) = (&self.material, self.entity.as_mut()) else {
            return;
        };

        let color = state.transform.material_color;
        let properties = state.transform.material_properties;
        material.set_base_color_factor(color.to_rgba());
        material.set_metallic_factor(properties.metallic);
        material.set_roughness_factor(properties.roughness);
        material.set_ambient_occlusion_factor(properties.ambient_occlusion);

        if !self.override_bound {
            // Attempted once per entity; a missing mesh just leaves the asset's material
            if let Err(e) = entity.set_material_override(material, &self.settings.mesh) {
                tracing::warn!("Cannot override material of mesh '{}': {}", self.settings.mesh, e);
            }
            self.override_bound = true;
        }
    }

    fn dispose_entity(&mut self) {
        if let Some(mut entity) = self.entity.take() {
            entity.stop_animation();
            entity.dispose();
            tracing::debug!("Disposed model entity");
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// The model left the composition: remove the entity and clear the cache
    pub fn suspend(&mut self) {
        if self.disposed || self.suspended {
            return;
        }
        self.release();
        self.material = MaterialSlot::NotRequested;
        self.suspended = true;
        tracing::debug!("Model '{}' suspended", self.cache.model_name());
    }

    /// The model is back in the composition: load it again
    pub fn resume(&mut self) {
        if self.disposed || !self.suspended {
            return;
        }
        self.suspended = false;
        self.start_load();
        tracing::debug!("Model '{}' resumed", self.cache.model_name());
    }

    /// Tear down: ignore any late load, remove the entity, clear the cache
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.release();
        self.material = MaterialSlot::Failed;
        self.disposed = true;
    }
}

impl<S: XrSession> Drop for ModelController<S> {
    fn drop(&mut self) {
        if !self.disposed {
            self.pending = None;
            if let Some(task) = self.load_task.take() {
                task.abort();
            }
            if let Some(mut entity) = self.entity.take() {
                entity.dispose();
            }
            self.cache.clear();
        }
    }
}
