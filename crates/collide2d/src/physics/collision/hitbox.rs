//! Axis-aligned box collider

use crate::foundation::math::Vec2;
use crate::physics::geometry;
use super::primitives::Aabb;

/// An axis-aligned box whose top-left corner sits at the collider's origin
#[derive(Debug, Clone, PartialEq)]
pub struct Hitbox {
    size: Vec2,
}

impl Hitbox {
    /// Creates a hitbox with the given size
    ///
    /// Negative components are clamped to zero.
    pub fn new(size: Vec2) -> Self {
        let mut hitbox = Self { size: Vec2::zeros() };
        hitbox.set_size(size);
        hitbox
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize the box, clamping negative components to zero
    pub fn set_size(&mut self, size: Vec2) {
        if size.x < 0.0 || size.y < 0.0 {
            log::warn!("Hitbox size {:?} has negative components, clamping to zero", size);
        }
        self.size = Vec2::new(size.x.max(0.0), size.y.max(0.0));
    }

    /// World-space box for a given frame origin
    pub fn bounds_at(&self, origin: Vec2) -> Aabb {
        Aabb::from_position_size(origin, self.size)
    }
}

/// Hitbox against circle
///
/// True when the circle center is strictly inside the box, or when any box
/// edge touches the circle. Together these cover center-inside,
/// edge-overlap and corner-overlap configurations.
pub fn hitbox_intersects_circle(bounds: &Aabb, center: Vec2, radius: f32) -> bool {
    if bounds.contains_point(center) {
        return true;
    }

    bounds
        .edges()
        .iter()
        .any(|&(start, end)| geometry::circle_intersects_segment(center, radius, start, end))
}

/// Hitbox against an arbitrary segment
pub fn hitbox_intersects_segment(bounds: &Aabb, start: Vec2, end: Vec2) -> bool {
    if bounds.contains_point(start) || bounds.contains_point(end) {
        return true;
    }

    bounds
        .edges()
        .iter()
        .any(|&(edge_start, edge_end)| geometry::segments_intersect(start, end, edge_start, edge_end))
}
