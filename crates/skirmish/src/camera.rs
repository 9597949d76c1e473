//! # Camera
//!
//! The 2D camera/viewport descriptor and the concrete screen-to-world
//! transform the selection helper consumes.
//!
//! The simulation renders at a fixed virtual resolution and scales to the
//! physical window, so a screen point passes through two mappings: window
//! pixels to virtual pixels, then virtual pixels through the camera
//! (offset, zoom, target) into world units.

use skirmish_core::ScreenToWorld;
use skirmish_shared::{Rect, Vec2, VIRTUAL_HEIGHT, VIRTUAL_WIDTH};

/// 2D camera over the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World position the camera looks at.
    pub target: Vec2,
    /// Screen-space anchor of the target, in virtual pixels. Centered by
    /// default.
    pub offset: Vec2,
    /// Zoom factor; 1.0 means one world unit per virtual pixel.
    pub zoom: f32,
    /// Physical window size in pixels.
    pub window: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::new(VIRTUAL_WIDTH * 0.5, VIRTUAL_HEIGHT * 0.5),
            zoom: 1.0,
            window: Vec2::new(VIRTUAL_WIDTH, VIRTUAL_HEIGHT),
        }
    }
}

impl Camera {
    /// Creates a centered camera for a physical window size.
    #[must_use]
    pub fn new(window: Vec2) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    /// Maps a window-pixel point to virtual-resolution pixels.
    #[must_use]
    fn window_to_virtual(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x * (VIRTUAL_WIDTH / self.window.x),
            point.y * (VIRTUAL_HEIGHT / self.window.y),
        )
    }

    /// The world-space rectangle currently visible through this camera.
    ///
    /// Feed this to `SpatialGrid::cells_overlapping` to cull a grid debug
    /// overlay to the visible cells.
    #[must_use]
    pub fn world_view(&self) -> Rect {
        Rect::from_corners(
            self.point_to_world(Vec2::ZERO),
            self.point_to_world(self.window),
        )
    }
}

impl ScreenToWorld for Camera {
    fn point_to_world(&self, point: Vec2) -> Vec2 {
        let virtual_point = self.window_to_virtual(point);
        (virtual_point - self.offset) * (1.0 / self.zoom) + self.target
    }
}
