//! Platform context: spatial capabilities and window size classes
//!
//! The capability signal drives the branch between spatial and flat
//! presentation. A device can report the XR spatial feature while spatial
//! UI is currently disabled (e.g. the user collapsed to home space), so
//! the two flags are tracked separately.

mod window;

pub use window::{WindowSizeClass, WindowWidthClass};

/// Spatial capabilities reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpatialCapabilities {
    /// Spatial panels and 3D content are currently shown
    pub spatial_ui_enabled: bool,
    /// The device supports XR spatial features at all
    pub has_xr_spatial_feature: bool,
}

impl SpatialCapabilities {
    /// Full space on an XR device
    pub fn spatial() -> Self {
        Self {
            spatial_ui_enabled: true,
            has_xr_spatial_feature: true,
        }
    }

    /// XR device presenting in a flat (home space) window
    pub fn home_space() -> Self {
        Self {
            spatial_ui_enabled: false,
            has_xr_spatial_feature: true,
        }
    }

    /// Phone, tablet or any device without XR support
    pub fn flat() -> Self {
        Self::default()
    }

    /// Capabilities given the presence of a session.
    ///
    /// Without a session nothing spatial can be created, so spatial UI is
    /// forced off regardless of the requested mode.
    pub fn resolve(has_session: bool, spatial_requested: bool) -> Self {
        Self {
            spatial_ui_enabled: has_session && spatial_requested,
            has_xr_spatial_feature: has_session,
        }
    }

    /// Flip between full space and home space; no-op without XR support
    pub fn toggled(&self) -> Self {
        if !self.has_xr_spatial_feature {
            return *self;
        }
        Self {
            spatial_ui_enabled: !self.spatial_ui_enabled,
            has_xr_spatial_feature: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_session_is_flat() {
        assert_eq!(SpatialCapabilities::resolve(false, true), SpatialCapabilities::flat());
        assert_eq!(SpatialCapabilities::resolve(true, true), SpatialCapabilities::spatial());
        assert_eq!(SpatialCapabilities::resolve(true, false), SpatialCapabilities::home_space());
    }

    #[test]
    fn test_toggle_requires_xr_feature() {
        assert_eq!(SpatialCapabilities::flat().toggled(), SpatialCapabilities::flat());
        assert_eq!(SpatialCapabilities::spatial().toggled(), SpatialCapabilities::home_space());
        assert_eq!(SpatialCapabilities::home_space().toggled(), SpatialCapabilities::spatial());
    }
}
