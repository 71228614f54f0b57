//! Quaternion representation for entity orientation

use super::Vector3;

/// A quaternion for representing 3D rotations.
///
/// Values coming from UI sliders are not guaranteed to be unit length;
/// call [`Quaternion::normalize`] before using one as an orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vector3, angle_radians: f32) -> Self {
        let half = angle_radians / 2.0;
        let axis = axis.normalize();
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Unit-length copy; a zero quaternion normalizes to identity
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > f32::EPSILON && mag.is_finite() {
            Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
        } else {
            Self::IDENTITY
        }
    }

    pub fn inverse(&self) -> Self {
        let mag_sq = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        if mag_sq > 0.0 {
            let inv = 1.0 / mag_sq;
            Self::new(-self.x * inv, -self.y * inv, -self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let q = Vector3::new(self.x, self.y, self.z);
        let uv = q.cross(&v);
        let uuv = q.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_quarter_turn_about_up() {
        let q = Quaternion::from_axis_angle(Vector3::UP, PI / 2.0);
        let rotated = q.rotate_vector(Vector3::FORWARD);
        assert!((rotated.x - 1.0).abs() < 1e-4);
        assert!(rotated.z.abs() < 1e-4);
    }

    #[test]
    fn test_zero_normalizes_to_identity() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q.normalize(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Vector3::RIGHT, 0.7);
        let back = q.inverse().rotate_vector(q.rotate_vector(Vector3::UP));
        assert!((back.y - 1.0).abs() < 1e-4);
        assert!(back.z.abs() < 1e-4);
    }
}
