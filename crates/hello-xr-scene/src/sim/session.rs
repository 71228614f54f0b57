//! Simulated session, model, entity and material

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::session::{
    AnimationState, GltfModel, MaterialSpec, ModelEntity, PbrMaterial, SceneError, XrSession,
};
use crate::spatial::Pose;
use super::gltf;

/// Model constructed by [`SimSession`]
#[derive(Debug)]
pub struct SimModel {
    name: String,
    meshes: Vec<String>,
    animations: Vec<String>,
}

impl GltfModel for SimModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn animation_names(&self) -> &[String] {
        &self.animations
    }

    fn mesh_names(&self) -> &[String] {
        &self.meshes
    }
}

/// Current factor values of a [`SimMaterial`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialValues {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub ambient_occlusion: f32,
}

impl Default for MaterialValues {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 0.0,
            roughness: 1.0,
            ambient_occlusion: 1.0,
        }
    }
}

/// Material whose factors can be read back
#[derive(Debug)]
pub struct SimMaterial {
    spec: MaterialSpec,
    values: Mutex<MaterialValues>,
}

impl SimMaterial {
    pub fn spec(&self) -> MaterialSpec {
        self.spec
    }

    pub fn values(&self) -> MaterialValues {
        *self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut MaterialValues)) {
        f(&mut self.values.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

impl PbrMaterial for SimMaterial {
    fn set_base_color_factor(&self, rgba: [f32; 4]) {
        self.update(|v| v.base_color = rgba);
    }

    fn set_metallic_factor(&self, metallic: f32) {
        self.update(|v| v.metallic = metallic);
    }

    fn set_roughness_factor(&self, roughness: f32) {
        self.update(|v| v.roughness = roughness);
    }

    fn set_ambient_occlusion_factor(&self, ambient_occlusion: f32) {
        self.update(|v| v.ambient_occlusion = ambient_occlusion);
    }
}

/// Entity rendering a [`SimModel`]
#[derive(Debug)]
pub struct SimEntity {
    model: Arc<SimModel>,
    animation: AnimationState,
    overrides: HashMap<String, Arc<SimMaterial>>,
    pose: Pose,
    scale: f32,
    disposed: bool,
}

impl SimEntity {
    pub fn model(&self) -> &Arc<SimModel> {
        &self.model
    }

    /// Material override currently bound to `mesh_name`
    pub fn material_override(&self, mesh_name: &str) -> Option<&Arc<SimMaterial>> {
        self.overrides.get(mesh_name)
    }
}

impl ModelEntity for SimEntity {
    type Material = SimMaterial;

    fn start_animation(&mut self, looping: bool, name: &str) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Disposed);
        }
        if !self.model.animations.iter().any(|a| a == name) {
            return Err(SceneError::UnknownAnimation(name.to_string()));
        }
        self.animation = AnimationState::Playing {
            name: name.to_string(),
            looping,
        };
        Ok(())
    }

    fn stop_animation(&mut self) {
        self.animation = AnimationState::Stopped;
    }

    fn animation_state(&self) -> AnimationState {
        self.animation.clone()
    }

    fn set_material_override(
        &mut self,
        material: &Arc<SimMaterial>,
        mesh_name: &str,
    ) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Disposed);
        }
        if !self.model.meshes.iter().any(|m| m == mesh_name) {
            return Err(SceneError::UnknownMesh(mesh_name.to_string()));
        }
        self.overrides.insert(mesh_name.to_string(), Arc::clone(material));
        Ok(())
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.animation = AnimationState::Stopped;
        self.overrides.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Session backed by the terminal simulation.
///
/// Counts constructions so callers can observe caching behaviour.
#[derive(Debug, Default)]
pub struct SimSession {
    models_created: AtomicUsize,
    entities_created: AtomicUsize,
    materials_created: AtomicUsize,
    fail_materials: AtomicBool,
}

impl SimSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn models_created(&self) -> usize {
        self.models_created.load(Ordering::SeqCst)
    }

    pub fn entities_created(&self) -> usize {
        self.entities_created.load(Ordering::SeqCst)
    }

    pub fn materials_created(&self) -> usize {
        self.materials_created.load(Ordering::SeqCst)
    }

    /// Make subsequent material creation fail, as on runtimes without PBR support
    pub fn set_fail_materials(&self, fail: bool) {
        self.fail_materials.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl XrSession for SimSession {
    type Model = SimModel;
    type Material = SimMaterial;
    type Entity = SimEntity;

    async fn create_gltf_model(
        &self,
        bytes: Vec<u8>,
        name: &str,
    ) -> Result<Arc<SimModel>, SceneError> {
        let summary = gltf::parse(&bytes)?;
        self.models_created.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            model = name,
            meshes = summary.meshes.len(),
            animations = summary.animations.len(),
            "Constructed glTF model"
        );
        Ok(Arc::new(SimModel {
            name: name.to_string(),
            meshes: summary.meshes,
            animations: summary.animations,
        }))
    }

    fn create_model_entity(&self, model: &Arc<SimModel>) -> Result<SimEntity, SceneError> {
        self.entities_created.fetch_add(1, Ordering::SeqCst);
        Ok(SimEntity {
            model: Arc::clone(model),
            animation: AnimationState::Stopped,
            overrides: HashMap::new(),
            pose: Pose::IDENTITY,
            scale: 1.0,
            disposed: false,
        })
    }

    async fn create_material(&self, spec: MaterialSpec) -> Result<Arc<SimMaterial>, SceneError> {
        if self.fail_materials.load(Ordering::SeqCst) {
            return Err(SceneError::Material("PBR materials unavailable".to_string()));
        }
        self.materials_created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(SimMaterial {
            spec,
            values: Mutex::new(MaterialValues::default()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "asset": {"version": "2.0"},
        "accessors": [{"componentType": 5126, "count": 1, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [0.0, 0.0, 0.0]}],
        "meshes": [{"name": "Body", "primitives": [{"attributes": {"POSITION": 0}}]}],
        "animations": [{"name": "Wave", "channels": [], "samplers": []}]
    }"#;

    async fn entity(session: &SimSession) -> SimEntity {
        let model = session.create_gltf_model(DOC.as_bytes().to_vec(), "DROID").await.unwrap();
        session.create_model_entity(&model).unwrap()
    }

    #[tokio::test]
    async fn test_animation_must_exist() {
        let session = SimSession::new();
        let mut entity = entity(&session).await;

        assert!(matches!(
            entity.start_animation(true, "Dance"),
            Err(SceneError::UnknownAnimation(_))
        ));
        entity.start_animation(true, "Wave").unwrap();
        assert_eq!(
            entity.animation_state(),
            AnimationState::Playing { name: "Wave".to_string(), looping: true }
        );
        entity.stop_animation();
        assert_eq!(entity.animation_state(), AnimationState::Stopped);
    }

    #[tokio::test]
    async fn test_material_override_binds_to_mesh() {
        let session = SimSession::new();
        let mut entity = entity(&session).await;
        let material = session.create_material(MaterialSpec::LIT_OPAQUE).await.unwrap();
        material.set_metallic_factor(0.75);

        assert!(entity.set_material_override(&material, "Wheels").is_err());
        entity.set_material_override(&material, "Body").unwrap();
        let bound = entity.material_override("Body").unwrap();
        assert_eq!(bound.values().metallic, 0.75);
        assert_eq!(bound.spec(), MaterialSpec::LIT_OPAQUE);
    }

    #[tokio::test]
    async fn test_disposed_entity_rejects_changes() {
        let session = SimSession::new();
        let mut entity = entity(&session).await;
        entity.start_animation(false, "Wave").unwrap();
        entity.dispose();

        assert!(entity.is_disposed());
        assert_eq!(entity.animation_state(), AnimationState::Stopped);
        assert_eq!(entity.start_animation(true, "Wave"), Err(SceneError::Disposed));
    }

    #[tokio::test]
    async fn test_failing_materials() {
        let session = SimSession::new();
        session.set_fail_materials(true);
        assert!(session.create_material(MaterialSpec::LIT_OPAQUE).await.is_err());
        assert_eq!(session.materials_created(), 0);
    }

    #[tokio::test]
    async fn test_invalid_bytes_do_not_count() {
        let session = SimSession::new();
        assert!(session.create_gltf_model(b"junk".to_vec(), "X").await.is_err());
        assert_eq!(session.models_created(), 0);
    }
}
