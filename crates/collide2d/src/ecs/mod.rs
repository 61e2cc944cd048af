//! Minimal entity layer
//!
//! Entities are plain ids; the [`World`] owns their positions and the
//! entity-to-collider attachment that the collision code reads from.

pub mod world;
pub mod entity;

pub use world::World;
pub use entity::Entity;
