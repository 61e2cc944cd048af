//! Debug drawing primitives and system

use std::collections::HashMap;

use crate::foundation::math::{Vec2, Vec4};

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// 2D debug primitives, outlines only
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Start point
        start: Vec2,
        /// End point
        end: Vec2,
        /// RGBA color
        color: Vec4,
        /// Seconds left to live
        duration: f32,
    },

    /// Axis-aligned rectangle outline
    Rect {
        /// Top-left corner
        min: Vec2,
        /// Bottom-right corner
        max: Vec2,
        /// RGBA color
        color: Vec4,
        /// Seconds left to live
        duration: f32,
    },

    /// Circle outline
    Circle {
        /// Center
        center: Vec2,
        /// Radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds left to live
        duration: f32,
    },

    /// Point marker
    Point {
        /// Position
        position: Vec2,
        /// RGBA color
        color: Vec4,
        /// Marker size in pixels
        size: f32,
        /// Seconds left to live
        duration: f32,
    },
}

impl DebugShape {
    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            Self::Line { duration, .. }
            | Self::Rect { duration, .. }
            | Self::Circle { duration, .. }
            | Self::Point { duration, .. } => *duration,
        }
    }

    /// Color of the shape
    pub fn color(&self) -> Vec4 {
        match self {
            Self::Line { color, .. }
            | Self::Rect { color, .. }
            | Self::Circle { color, .. }
            | Self::Point { color, .. } => *color,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        *self.duration_mut() = new_duration;
        self
    }

    /// Decrease duration by `delta_time`, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = self.duration_mut();
        *duration -= delta_time;
        *duration <= 0.0
    }

    fn duration_mut(&mut self) -> &mut f32 {
        match self {
            Self::Line { duration, .. }
            | Self::Rect { duration, .. }
            | Self::Circle { duration, .. }
            | Self::Point { duration, .. } => duration,
        }
    }
}

/// Debug drawing system for rendering debug shapes
///
/// Temporary shapes expire after their duration (a duration of zero lives
/// for exactly one frame); persistent shapes stay until removed by id.
pub struct DebugDrawSystem {
    /// Temporary shapes that expire after their duration
    temporary_shapes: Vec<DebugShape>,

    /// Persistent shapes that remain until manually removed
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Queue a temporary shape
    pub fn draw(&mut self, shape: DebugShape) {
        if self.enabled {
            self.temporary_shapes.push(shape);
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Vec4, duration: f32) {
        self.draw(DebugShape::Line { start, end, color, duration });
    }

    /// Draw a rectangle outline (temporary)
    pub fn draw_rect(&mut self, min: Vec2, max: Vec2, color: Vec4, duration: f32) {
        self.draw(DebugShape::Rect { min, max, color, duration });
    }

    /// Draw a circle outline (temporary)
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, color: Vec4, duration: f32) {
        self.draw(DebugShape::Circle { center, radius, color, duration });
    }

    /// Draw a point (temporary)
    pub fn draw_point(&mut self, position: Vec2, color: Vec4, size: f32, duration: f32) {
        self.draw(DebugShape::Point { position, color, size, duration });
    }

    /// Draw a persistent shape that remains until explicitly removed
    pub fn draw_persistent(&mut self, id: impl Into<String>, shape: DebugShape) {
        if !self.enabled {
            return;
        }

        self.persistent_shapes.insert(id.into(), shape);
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Update shape lifetimes and remove expired temporary shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Get all shapes for rendering (both temporary and persistent)
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
            .collect()
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Vec4 {
        Vec4::new(1.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn test_temporary_shape_expiration() {
        let mut system = DebugDrawSystem::new();
        system.draw_circle(Vec2::zeros(), 1.0, red(), 1.0);

        assert_eq!(system.shape_count(), 1);

        system.update(0.5);
        assert_eq!(system.shape_count(), 1);

        system.update(0.6);
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_single_frame_shape() {
        let mut system = DebugDrawSystem::new();
        system.draw_rect(Vec2::zeros(), Vec2::new(2.0, 2.0), red(), 0.0);

        assert_eq!(system.get_shapes().len(), 1);
        system.update(1.0 / 60.0);
        assert!(system.get_shapes().is_empty());
    }

    #[test]
    fn test_persistent_shapes() {
        let mut system = DebugDrawSystem::new();
        system.draw_persistent(
            "spawn_point",
            DebugShape::Point {
                position: Vec2::new(4.0, 4.0),
                color: red(),
                size: 3.0,
                duration: 0.0,
            }
            .with_duration(f32::INFINITY),
        );

        for _ in 0..100 {
            system.update(1.0);
        }
        assert_eq!(system.shape_count(), 1);

        system.clear_persistent("spawn_point");
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_disabled_system_collects_nothing() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;
        system.draw_line(Vec2::zeros(), Vec2::new(1.0, 1.0), red(), 1.0);

        assert_eq!(system.shape_count(), 0);
        assert!(system.get_shapes().is_empty());
    }
}
