//! # collide2d
//!
//! 2D collision detection for a small game engine.
//!
//! ## Features
//!
//! - **Shapes**: axis-aligned hitboxes, circles, tile grids and composite
//!   collider lists, tested against each other through one exhaustive
//!   `(shape, shape)` match
//! - **Broad-phase scan**: all-pairs scan with layer/mask filtering and a
//!   contact tracker for enter/exit events
//! - **Scenes**: TOML/RON scene descriptions spawned into a [`World`](ecs::World)
//! - **Debug drawing**: collider outlines as 2D debug primitives
//!
//! ## Quick Start
//!
//! ```rust
//! use collide2d::prelude::*;
//!
//! let mut world = World::new();
//! let mut colliders = ColliderSet::new();
//!
//! let player = world.create_entity(Vec2::new(0.0, 0.0));
//! let crate_box = world.create_entity(Vec2::new(3.0, 0.0));
//!
//! let handle = colliders.insert(Collider::circle(2.0, Vec2::zeros()));
//! world.attach_collider(player, handle, &mut colliders)?;
//! let handle = colliders.insert(Collider::hitbox(Vec2::new(4.0, 4.0), Vec2::new(-2.0, -2.0)));
//! world.attach_collider(crate_box, handle, &mut colliders)?;
//!
//! let mut pairs = Vec::new();
//! world.scan(&colliders, |a, b| pairs.push((a, b)))?;
//! assert_eq!(pairs, vec![(player, crate_box)]);
//! # Ok::<(), collide2d::physics::CollisionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        debug::{render_debug, CollisionDebugVisualizer, DebugDrawSystem, DebugShape},
        ecs::{Entity, World},
        foundation::{
            collections::ColliderHandle,
            math::{Vec2, Vec4},
        },
        physics::{
            scan, Aabb, Circle, Collider, ColliderSet, ColliderShape, CollisionError, CollisionLayers,
            CollisionPair, CollisionQuery, ContactTracker, Grid, Hitbox, PositionSource, ShapeKind,
        },
        scene::{SceneDescription, SceneError},
    };
}
