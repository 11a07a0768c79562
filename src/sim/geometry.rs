//! Plane geometry for the wrapped playfield
//!
//! Everything is in screen pixels with +Y pointing down. Collisions are
//! plain radius tests between entity centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SHIP_HEIGHT;
use crate::heading;

/// Visible playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Wrap a position around the viewport edges
///
/// A negative coordinate jumps to the far edge, a coordinate at or past the
/// far edge jumps to zero. Each axis is handled independently.
#[inline]
pub fn wrap(pos: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, viewport.width),
        wrap_axis(pos.y, viewport.height),
    )
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    if v < 0.0 {
        extent
    } else if v >= extent {
        0.0
    } else {
        v
    }
}

/// True if the two points are strictly closer than `threshold`
#[inline]
pub fn collides(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// True if the point lies inside the open viewport rectangle
#[inline]
pub fn in_viewport(pos: Vec2, viewport: Viewport) -> bool {
    pos.x > 0.0 && pos.x < viewport.width && pos.y > 0.0 && pos.y < viewport.height
}

/// Nose of the ship, where projectiles are launched from
#[inline]
pub fn tip_position(ship_pos: Vec2, rotation_degrees: f32) -> Vec2 {
    ship_pos + heading(rotation_degrees) * SHIP_HEIGHT
}
