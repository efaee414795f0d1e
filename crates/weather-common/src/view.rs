//! Screen/world conversion for a camera looking straight down at the map.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Window geometry and field of view of the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fovy_deg: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fovy_deg: 50.0,
        }
    }
}

impl Viewport {
    /// Convert a pixel position (origin top-left, y down) to the world point
    /// it shows on the plane `z = world_z`, for a camera at `eye`.
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64, eye: [f64; 3], world_z: f64) -> Point {
        // Half extent of the visible plane, vertically then horizontally.
        let half_h = (eye[2] - world_z).abs() * (self.fovy_deg.to_radians() / 2.0).tan();
        let half_w = half_h * self.aspect();

        let half_width = self.width as f64 / 2.0;
        let half_height = self.height as f64 / 2.0;

        let dx = (screen_x - half_width) / half_width * half_w;
        let dy = (screen_y - half_height) / half_height * half_h;

        Point::new(eye[0] + dx, eye[1] - dy)
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Length of an on-screen line in pixels.
pub fn pixel_length(start: (f64, f64), end: (f64, f64)) -> f64 {
    (end.0 - start.0).hypot(end.1 - start.1)
}
