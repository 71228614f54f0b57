//! Pose: position plus orientation of an entity or camera

use super::{Quaternion, Vector3};

/// Position and orientation in scene space (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3,
    pub rotation: Quaternion,
}

impl Pose {
    /// Identity pose (origin, no rotation)
    pub const IDENTITY: Self = Self {
        position: Vector3::ZERO,
        rotation: Quaternion::IDENTITY,
    };

    pub fn new(position: Vector3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vector3) -> Self {
        Self::new(position, Quaternion::IDENTITY)
    }

    /// Transform a local-space point into scene space with a uniform scale
    pub fn transform_point(&self, local: Vector3, scale: f32) -> Vector3 {
        self.position + self.rotation.normalize().rotate_vector(local * scale)
    }

    /// Transform a scene-space point into this pose's local space
    pub fn inverse_transform_point(&self, world: Vector3) -> Vector3 {
        let relative = world - self.position;
        self.rotation.normalize().inverse().rotate_vector(relative)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
