//! Debug visualization for colliders
//!
//! Nothing here renders: shapes are collected as 2D primitives for whatever
//! renderer the game uses.

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugShape, DebugDrawSystem, DebugShapeId};
pub use collision_debug::{render_debug, CollisionDebugColors, CollisionDebugVisualizer};
