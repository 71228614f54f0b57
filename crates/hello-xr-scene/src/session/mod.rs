//! Scene-graph toolkit boundary
//!
//! The host platform owns rendering, tracking and composition. The
//! application only sees these traits: a session capable of constructing
//! glTF models, model entities and PBR materials, and the handles those
//! calls return.

mod source;

use std::sync::Arc;

use async_trait::async_trait;

use crate::spatial::Pose;

pub use source::{EmbeddedSource, FileSource, ResourceSource};

/// Errors raised by the scene toolkit
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("resource read failed: {0}")]
    Resource(String),
    #[error("invalid glTF asset: {0}")]
    InvalidAsset(String),
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
    #[error("unknown mesh '{0}'")]
    UnknownMesh(String),
    #[error("entity already disposed")]
    Disposed,
    #[error("material creation failed: {0}")]
    Material(String),
}

/// Lighting model of a PBR material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingModel {
    Lit,
    Unlit,
}

/// Blend mode of a PBR material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Opaque,
    Transparent,
}

/// Specification passed to the material factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialSpec {
    pub lighting: LightingModel,
    pub blend: BlendMode,
}

impl MaterialSpec {
    pub const LIT_OPAQUE: Self = Self {
        lighting: LightingModel::Lit,
        blend: BlendMode::Opaque,
    };
}

/// Playback state of a model entity's animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Playing { name: String, looping: bool },
}

/// A loaded glTF model, shareable across entities
pub trait GltfModel: Send + Sync {
    /// Identifying name given at construction
    fn name(&self) -> &str;

    fn animation_names(&self) -> &[String];

    fn mesh_names(&self) -> &[String];
}

/// A PBR material handle
pub trait PbrMaterial: Send + Sync {
    fn set_base_color_factor(&self, rgba: [f32; 4]);

    fn set_metallic_factor(&self, metallic: f32);

    fn set_roughness_factor(&self, roughness: f32);

    fn set_ambient_occlusion_factor(&self, ambient_occlusion: f32);
}

/// A renderable, animatable entity created from a [`GltfModel`]
pub trait ModelEntity: Send {
    type Material: PbrMaterial;

    /// Start a named animation
    fn start_animation(&mut self, looping: bool, name: &str) -> Result<(), SceneError>;

    fn stop_animation(&mut self);

    fn animation_state(&self) -> AnimationState;

    /// Replace the material of a named mesh within the model
    fn set_material_override(
        &mut self,
        material: &Arc<Self::Material>,
        mesh_name: &str,
    ) -> Result<(), SceneError>;

    fn set_pose(&mut self, pose: Pose);

    fn pose(&self) -> Pose;

    fn set_scale(&mut self, scale: f32);

    fn scale(&self) -> f32;

    /// Remove the entity from the scene; later calls are no-ops
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// An XR session: the capability required to create scene content
#[async_trait]
pub trait XrSession: Send + Sync {
    type Model: GltfModel + 'static;
    type Material: PbrMaterial + 'static;
    type Entity: ModelEntity<Material = Self::Material> + 'static;

    /// Construct a model from raw asset bytes
    async fn create_gltf_model(
        &self,
        bytes: Vec<u8>,
        name: &str,
    ) -> Result<Arc<Self::Model>, SceneError>;

    /// Create an entity rendering `model` in the scene
    fn create_model_entity(&self, model: &Arc<Self::Model>) -> Result<Self::Entity, SceneError>;

    /// Create a material
    async fn create_material(&self, spec: MaterialSpec) -> Result<Arc<Self::Material>, SceneError>;
}
