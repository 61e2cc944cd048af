//! Collider outlines for the debug draw system

use crate::debug::draw::DebugDrawSystem;
use crate::ecs::World;
use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec4;
use crate::physics::collision::{
    ColliderSet, ColliderShape, CollisionError, CollisionQuery, PlacedCollider, PositionSource,
};
use crate::physics::collision_system::ContactTracker;

/// Push the outline of a collider into `draw`, in world space
///
/// Boxes become rectangles and circles circles. Grids draw the perimeter of
/// their solid cells, skipping edges shared by two solid cells. Lists draw
/// every child in the list's frame. Shapes last one frame.
pub fn render_debug<P: PositionSource + ?Sized>(
    query: &CollisionQuery<'_, P>,
    handle: ColliderHandle,
    color: Vec4,
    draw: &mut DebugDrawSystem,
) -> Result<(), CollisionError> {
    let placed = query.place(handle)?;
    render_placed(query, placed, color, draw)
}

fn render_placed<'a, P: PositionSource + ?Sized>(
    query: &CollisionQuery<'a, P>,
    placed: PlacedCollider<'a>,
    color: Vec4,
    draw: &mut DebugDrawSystem,
) -> Result<(), CollisionError> {
    let origin = placed.origin;
    match placed.collider.shape() {
        ColliderShape::Box(hitbox) => {
            let bounds = hitbox.bounds_at(origin);
            draw.draw_rect(bounds.min, bounds.max, color, 0.0);
        }
        ColliderShape::Circle(circle) => draw.draw_circle(origin, circle.radius(), color, 0.0),
        ColliderShape::Grid(grid) => {
            for (start, end) in grid.outline_edges(origin) {
                draw.draw_line(start, end, color, 0.0);
            }
        }
        ColliderShape::List(_) => {
            for child in query.children(placed)? {
                render_placed(query, child, color, draw)?;
            }
        }
    }
    Ok(())
}

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Color for collision shapes (not colliding)
    pub shape_default: Vec4,

    /// Color for collision shapes (currently colliding)
    pub shape_colliding: Vec4,

    /// Color for aggregate bounds
    pub bounds: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Vec4::new(0.0, 1.0, 0.0, 0.3),   // Green, semi-transparent
            shape_colliding: Vec4::new(1.0, 0.0, 0.0, 0.5), // Red, semi-transparent
            bounds: Vec4::new(0.5, 0.8, 1.0, 0.15),         // Light blue, transparent
        }
    }
}

/// Draws every collider in a world, colored by contact state
pub struct CollisionDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: CollisionDebugColors,

    /// Show collider outlines
    pub show_shapes: bool,

    /// Show each collider's absolute bounds
    pub show_bounds: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: CollisionDebugColors::default(),
            show_shapes: true,
            show_bounds: false,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Visualize a single collider
    pub fn draw_collider<P: PositionSource + ?Sized>(
        &mut self,
        query: &CollisionQuery<'_, P>,
        handle: ColliderHandle,
        is_colliding: bool,
    ) -> Result<(), CollisionError> {
        if self.show_shapes {
            let color = if is_colliding {
                self.colors.shape_colliding
            } else {
                self.colors.shape_default
            };
            render_debug(query, handle, color, &mut self.debug_draw)?;
        }

        if self.show_bounds {
            let bounds = query.bounds(handle)?;
            self.debug_draw.draw_rect(bounds.min, bounds.max, self.colors.bounds, 0.0);
        }

        Ok(())
    }

    /// Visualize every entity's collider; entities in contact are highlighted
    pub fn draw_world(
        &mut self,
        world: &World,
        colliders: &ColliderSet,
        contacts: &ContactTracker,
    ) -> Result<(), CollisionError> {
        let query = world.query(colliders);
        for (entity, handle) in world.collision_entries(colliders) {
            if let Some(handle) = handle {
                let touching = !contacts.contacts_of(entity).is_empty();
                self.draw_collider(&query, handle, touching)?;
            }
        }
        Ok(())
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.debug_draw.clear();
    }

    /// Update debug system (expire temporary shapes)
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Enable/disable the entire debug system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
    }

    /// Get reference to underlying debug draw system
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
