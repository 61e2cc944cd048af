//! Physics module for 2D collision detection
//!
//! Shape tests live in [`collision`], the all-pairs broad-phase scan in
//! [`collision_system`], and layer filtering in [`collision_layers`].

pub mod collision;
pub mod collision_layers;
pub mod collision_system;
pub mod geometry;

pub use collision::{
    Aabb,
    Circle,
    Collider,
    ColliderList,
    ColliderSet,
    ColliderShape,
    CollisionError,
    CollisionQuery,
    Grid,
    Hitbox,
    PositionSource,
    ShapeKind,
};
pub use collision_layers::CollisionLayers;
pub use collision_system::{scan, CollisionPair, ContactTracker};
