//! Circle collider

use crate::foundation::math::Vec2;
use super::primitives::Aabb;

/// A circle centered on the collider's origin
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    /// Creates a circle with the given radius (negative values clamp to zero)
    pub fn new(radius: f32) -> Self {
        let mut circle = Self { radius: 0.0 };
        circle.set_radius(radius);
        circle
    }

    /// Circle radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Change the radius, clamping negative values to zero
    pub fn set_radius(&mut self, radius: f32) {
        if radius < 0.0 {
            log::warn!("Circle radius {} is negative, clamping to zero", radius);
        }
        self.radius = radius.max(0.0);
    }

    /// Inclusive point test: a point on the circumference collides
    ///
    /// Hitboxes use an exclusive test, so boundary behaviour depends on the
    /// shape being queried.
    pub fn contains_point(&self, center: Vec2, point: Vec2) -> bool {
        (point - center).norm_squared() <= self.radius * self.radius
    }

    /// Strict overlap with another circle; tangent circles do not collide
    pub fn intersects(&self, center: Vec2, other: &Circle, other_center: Vec2) -> bool {
        let radius_sum = self.radius + other.radius;
        (center - other_center).norm_squared() < radius_sum * radius_sum
    }

    /// Bounding box around the circle
    pub fn bounds_at(&self, center: Vec2) -> Aabb {
        let extent = Vec2::new(self.radius, self.radius);
        Aabb::new(center - extent, center + extent)
    }
}
