//! 3D to 2D projection for terminal rendering

use crate::spatial::{Pose, Vector3};

/// Perspective projection settings
#[derive(Debug, Clone)]
pub struct Projection {
    /// Field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height); terminal cells are roughly twice as tall as wide
    pub aspect: f32,
}

impl Projection {
    pub fn perspective(fov_degrees: f32, aspect: f32) -> Self {
        Self {
            fov: fov_degrees.to_radians(),
            near: 0.05,
            far: 100.0,
            aspect,
        }
    }

    /// Project a scene point to normalized device coordinates and depth
    pub fn project(&self, point: Vector3, camera: &Pose) -> Option<(f32, f32, f32)> {
        let local = camera.inverse_transform_point(point);

        if local.z <= self.near || local.z >= self.far {
            return None;
        }

        let tan_half_fov = (self.fov / 2.0).tan();
        let x_ndc = local.x / (local.z * tan_half_fov * self.aspect);
        let y_ndc = local.y / (local.z * tan_half_fov);

        if x_ndc.abs() > 1.0 || y_ndc.abs() > 1.0 {
            return None;
        }

        let depth = (local.z - self.near) / (self.far - self.near);
        Some((x_ndc, y_ndc, depth))
    }

    /// Convert normalized device coordinates to cell coordinates
    pub fn ndc_to_screen(&self, x_ndc: f32, y_ndc: f32, width: u32, height: u32) -> (u16, u16) {
        let x = ((x_ndc + 1.0) / 2.0 * width as f32).round() as u16;
        let y = ((1.0 - y_ndc) / 2.0 * height as f32).round() as u16;
        (
            x.min(width.saturating_sub(1) as u16),
            y.min(height.saturating_sub(1) as u16),
        )
    }

    pub fn project_to_screen(
        &self,
        point: Vector3,
        camera: &Pose,
        width: u32,
        height: u32,
    ) -> Option<(u16, u16, f32)> {
        let (x_ndc, y_ndc, depth) = self.project(point, camera)?;
        let (x, y) = self.ndc_to_screen(x_ndc, y_ndc, width, height);
        Some((x, y, depth))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(60.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ahead_projects_to_center() {
        let proj = Projection::perspective(90.0, 1.0);
        let (x, y, _) = proj.project(Vector3::new(0.0, 0.0, 5.0), &Pose::IDENTITY).unwrap();
        assert!(x.abs() < 0.001);
        assert!(y.abs() < 0.001);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let proj = Projection::default();
        assert!(proj.project(Vector3::new(0.0, 0.0, -5.0), &Pose::IDENTITY).is_none());
    }

    #[test]
    fn test_ndc_corners() {
        let proj = Projection::default();
        assert_eq!(proj.ndc_to_screen(0.0, 0.0, 100, 50), (50, 25));
        assert_eq!(proj.ndc_to_screen(-1.0, 1.0, 100, 50), (0, 0));
        assert_eq!(proj.ndc_to_screen(1.0, -1.0, 100, 50), (99, 49));
    }
}
