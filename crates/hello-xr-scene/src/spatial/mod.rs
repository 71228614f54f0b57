//! Spatial primitives for placing entities in the scene
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)
//!
//! Panel offsets are expressed in dp; the scene converts them to meters
//! with [`DP_PER_METER`].

mod vector3;
mod quaternion;
mod pose;

pub use vector3::Vector3;
pub use quaternion::Quaternion;
pub use pose::Pose;

/// Density-independent pixels per meter at the default panel distance.
pub const DP_PER_METER: f32 = 1142.9;

/// Convert a dp length into meters.
pub fn dp_to_meters(dp: f32) -> f32 {
    dp / DP_PER_METER
}
