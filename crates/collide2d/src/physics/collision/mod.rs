//! Collider shapes and the pairwise test matrix
//!
//! Shapes are stored in model space (an offset plus extents) and placed in
//! world space on demand when a [`CollisionQuery`] runs a test. The set of
//! shapes is closed: [`ColliderShape`] is matched exhaustively, so adding a
//! shape is a compile error until every pairing is handled.

pub mod circle;
pub mod grid;
pub mod hitbox;
pub mod list;
pub mod primitives;
pub mod query;
pub mod set;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::ecs::Entity;
use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec2;
use crate::physics::collision_layers::CollisionLayers;

pub use circle::Circle;
pub use grid::Grid;
pub use hitbox::Hitbox;
pub use list::ColliderList;
pub use primitives::Aabb;
pub use query::{CollisionQuery, PlacedCollider};
pub use set::ColliderSet;

/// Type tag of a collider shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned box
    Box,
    /// Circle
    Circle,
    /// Tile grid
    Grid,
    /// Composite list
    List,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Box => "box",
            Self::Circle => "circle",
            Self::Grid => "grid",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// Collision errors
///
/// Unsupported shape pairings are reported as errors rather than a `false`
/// result: asking for them is a caller bug.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// The pairing exists in principle but has no implementation
    #[error("collision test between {first} and {second} is not implemented")]
    NotImplemented {
        /// Shape on the left of the test
        first: ShapeKind,
        /// Shape on the right of the test
        second: ShapeKind,
    },

    /// The pairing is not a meaningful operation
    #[error("invalid operation: {first} cannot be tested against {second}")]
    InvalidOperation {
        /// Shape on the left of the test
        first: ShapeKind,
        /// Shape on the right of the test
        second: ShapeKind,
    },

    /// Handle does not refer to a live collider
    #[error("unknown collider {0:?}")]
    UnknownCollider(ColliderHandle),

    /// The position source has no position for the collider's base entity
    #[error("no position for {0}")]
    MissingPosition(Entity),

    /// Grid dimensions, tile size or cell data are malformed
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The collider is not a list
    #[error("collider {0:?} is not a list")]
    NotAList(ColliderHandle),

    /// Adding the child would make the list contain itself
    #[error("adding {child:?} to list {list:?} would create a cycle")]
    CyclicList {
        /// The list being extended
        list: ColliderHandle,
        /// The child that was rejected
        child: ColliderHandle,
    },
}

/// Source of world positions for colliders attached to entities
///
/// Read on every query; colliders never own or cache the position.
pub trait PositionSource {
    /// Current world position of `entity`, if it has one
    fn position(&self, entity: Entity) -> Option<Vec2>;
}

impl PositionSource for HashMap<Entity, Vec2> {
    fn position(&self, entity: Entity) -> Option<Vec2> {
        self.get(&entity).copied()
    }
}

/// A source with no positions, for colliders that only use offsets
impl PositionSource for () {
    fn position(&self, _entity: Entity) -> Option<Vec2> {
        None
    }
}

/// Concrete shape data
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box
    Box(Hitbox),
    /// Circle
    Circle(Circle),
    /// Tile grid
    Grid(Grid),
    /// Composite list of other colliders
    List(ColliderList),
}

impl ColliderShape {
    /// Type tag
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box(_) => ShapeKind::Box,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Grid(_) => ShapeKind::Grid,
            Self::List(_) => ShapeKind::List,
        }
    }
}

/// A shape plus its placement and ownership data
///
/// `actual position = base position + offset`, or just the offset when no
/// base entity is set. The base position is looked up through a
/// [`PositionSource`] at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
    offset: Vec2,
    base: Option<Entity>,
    entity: Option<Entity>,
    /// Layers this collider is on
    pub layers: CollisionLayers,
    /// Layers this collider reacts to
    pub mask: CollisionLayers,
}

impl Collider {
    /// Creates a collider at `offset` with no owner
    pub fn new(shape: ColliderShape, offset: Vec2) -> Self {
        Self {
            shape,
            offset,
            base: None,
            entity: None,
            layers: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
        }
    }

    /// Box collider with its top-left corner at `offset`
    pub fn hitbox(size: Vec2, offset: Vec2) -> Self {
        Self::new(ColliderShape::Box(Hitbox::new(size)), offset)
    }

    /// Circle collider centered at `offset`
    pub fn circle(radius: f32, offset: Vec2) -> Self {
        Self::new(ColliderShape::Circle(Circle::new(radius)), offset)
    }

    /// Grid collider with its top-left corner at `offset`
    pub fn grid(grid: Grid, offset: Vec2) -> Self {
        Self::new(ColliderShape::Grid(grid), offset)
    }

    /// Empty list collider; add children through [`ColliderSet::add_child`]
    pub fn list(offset: Vec2) -> Self {
        Self::new(ColliderShape::List(ColliderList::new()), offset)
    }

    /// Set the collision layers and mask
    pub fn with_layers(mut self, layers: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layers = layers;
        self.mask = mask;
        self
    }

    /// Type tag
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Shape data
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Mutable shape data (resize, toggle cells, ...)
    ///
    /// List membership goes through [`ColliderSet`] so cycles can be checked.
    pub fn shape_mut(&mut self) -> Option<&mut ColliderShape> {
        match self.shape {
            ColliderShape::List(_) => None,
            _ => Some(&mut self.shape),
        }
    }

    pub(crate) fn list_mut(&mut self) -> Option<&mut ColliderList> {
        match &mut self.shape {
            ColliderShape::List(list) => Some(list),
            _ => None,
        }
    }

    /// Local offset from the base position
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Move the collider relative to its base position
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Entity whose position this collider follows
    pub fn base(&self) -> Option<Entity> {
        self.base
    }

    /// Follow `entity`'s position, or stay at the bare offset with `None`
    pub fn set_base(&mut self, base: Option<Entity>) {
        self.base = base;
    }

    /// Owning entity, if attached
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    /// Set the owning entity back-reference
    pub fn set_entity(&mut self, entity: Option<Entity>) {
        self.entity = entity;
    }

    /// World position: base position plus offset
    pub fn actual_position<P: PositionSource + ?Sized>(&self, positions: &P) -> Result<Vec2, CollisionError> {
        match self.base {
            Some(entity) => positions
                .position(entity)
                .map(|base| base + self.offset)
                .ok_or(CollisionError::MissingPosition(entity)),
            None => Ok(self.offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actual_position_without_base_is_offset() {
        let collider = Collider::hitbox(Vec2::new(1.0, 1.0), Vec2::new(3.0, 4.0));

        assert_eq!(collider.actual_position(&()).unwrap(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_actual_position_follows_base() {
        let entity = Entity::new(7);
        let mut positions = HashMap::new();
        positions.insert(entity, Vec2::new(100.0, 50.0));

        let mut collider = Collider::circle(2.0, Vec2::new(3.0, 4.0));
        collider.set_base(Some(entity));
        assert_eq!(collider.actual_position(&positions).unwrap(), Vec2::new(103.0, 54.0));

        positions.insert(entity, Vec2::new(0.0, 0.0));
        assert_eq!(collider.actual_position(&positions).unwrap(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_missing_base_position_is_an_error() {
        let entity = Entity::new(3);
        let mut collider = Collider::circle(2.0, Vec2::zeros());
        collider.set_base(Some(entity));

        assert_eq!(
            collider.actual_position(&()),
            Err(CollisionError::MissingPosition(entity))
        );
    }

    #[test]
    fn test_list_shape_is_not_mutable_directly() {
        let mut list = Collider::list(Vec2::zeros());
        let mut hitbox = Collider::hitbox(Vec2::new(1.0, 1.0), Vec2::zeros());

        assert!(list.shape_mut().is_none());
        assert!(hitbox.shape_mut().is_some());
        assert_eq!(list.kind(), ShapeKind::List);
    }
}
