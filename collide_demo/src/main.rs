//! Broad-phase scan demo
//!
//! Loads a scene, drifts every movable entity for a number of ticks and
//! logs contacts as they start and end.
//!
//! ```text
//! scan_demo [SCENE] [TICKS] [SEED]
//! ```
//!
//! Set `RUST_LOG=debug` to see per-tick scan statistics.

use std::collections::HashMap;

use collide2d::foundation::logging;
use collide2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

const DEFAULT_SCENE: &str = "collide_demo/scenes/arena.toml";
const DEFAULT_TICKS: u32 = 240;
const DEFAULT_SEED: u64 = 7;
const TICK_SECONDS: f32 = 1.0 / 30.0;
const MAX_SPEED: f32 = 60.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Collision(#[from] CollisionError),

    #[error("invalid argument '{0}'")]
    BadArgument(String),
}

struct Args {
    scene: String,
    ticks: u32,
    seed: u64,
}

impl Args {
    fn parse() -> Result<Self, DemoError> {
        let mut args = std::env::args().skip(1);
        let scene = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
        let ticks = parse_or(args.next(), DEFAULT_TICKS)?;
        let seed = parse_or(args.next(), DEFAULT_SEED)?;
        Ok(Self { scene, ticks, seed })
    }
}

fn parse_or<T: std::str::FromStr>(arg: Option<String>, default: T) -> Result<T, DemoError> {
    match arg {
        Some(text) => text.parse().map_err(|_| DemoError::BadArgument(text)),
        None => Ok(default),
    }
}

fn main() {
    logging::init_with_filter("info");

    if let Err(e) = run() {
        log::error!("scan_demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let args = Args::parse()?;
    log::info!("Loading scene from {}", args.scene);

    let scene = SceneDescription::load(&args.scene)?;
    let mut world = World::new();
    let mut colliders = ColliderSet::new();
    let entities = scene.spawn(&mut world, &mut colliders)?;

    let names: HashMap<Entity, &str> = entities
        .iter()
        .zip(&scene.entities)
        .map(|(&entity, description)| (entity, description.name.as_str()))
        .collect();

    // Everything except tile maps drifts
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut velocities = HashMap::new();
    for &entity in &entities {
        let is_static = world
            .collider(entity)
            .and_then(|handle| colliders.get(handle))
            .map_or(true, |collider| collider.kind() == ShapeKind::Grid);
        if !is_static {
            let velocity = Vec2::new(
                rng.gen_range(-MAX_SPEED..MAX_SPEED),
                rng.gen_range(-MAX_SPEED..MAX_SPEED),
            );
            velocities.insert(entity, velocity);
        }
    }

    let arena = arena_bounds(&world, &colliders)?;
    let mut contacts = ContactTracker::new();
    let mut debug = CollisionDebugVisualizer::new();
    let mut total_entered = 0usize;

    for tick in 0..args.ticks {
        for (&entity, velocity) in &mut velocities {
            world.translate(entity, *velocity * TICK_SECONDS);
            bounce(&world, &colliders, entity, velocity, &arena)?;
        }

        contacts.update(&world.query(&colliders), &world.collision_entries(&colliders))?;

        for pair in contacts.entered() {
            total_entered += 1;
            log::info!(
                "tick {:>4}: {} touched {}",
                tick,
                name_of(&names, pair.entity_a),
                name_of(&names, pair.entity_b)
            );
        }
        for pair in contacts.exited() {
            log::info!(
                "tick {:>4}: {} separated from {}",
                tick,
                name_of(&names, pair.entity_a),
                name_of(&names, pair.entity_b)
            );
        }

        debug.draw_world(&world, &colliders, &contacts)?;
        log::trace!("tick {}: {} debug shapes", tick, debug.debug_draw().shape_count());
        debug.update(TICK_SECONDS);
    }

    log::info!(
        "Ran {} ticks over {} entities: {} contacts started, {} still touching",
        args.ticks,
        world.entity_count(),
        total_entered,
        contacts.current().len()
    );

    Ok(())
}

fn name_of<'a>(names: &HashMap<Entity, &'a str>, entity: Entity) -> &'a str {
    names.get(&entity).copied().unwrap_or("<unnamed>")
}

/// Union of every collider's bounds; movers bounce off its edges
fn arena_bounds(world: &World, colliders: &ColliderSet) -> Result<Aabb, CollisionError> {
    let query = world.query(colliders);
    let mut bounds: Option<Aabb> = None;
    for (_, handle) in world.collision_entries(colliders) {
        if let Some(handle) = handle {
            let collider_bounds = query.bounds(handle)?;
            bounds = Some(bounds.map_or(collider_bounds, |acc| acc.union(&collider_bounds)));
        }
    }
    Ok(bounds.unwrap_or_else(|| Aabb::point(Vec2::zeros())))
}

/// Flip the velocity component that carries the collider out of the arena
fn bounce(
    world: &World,
    colliders: &ColliderSet,
    entity: Entity,
    velocity: &mut Vec2,
    arena: &Aabb,
) -> Result<(), CollisionError> {
    let Some(handle) = world.collider(entity) else {
        return Ok(());
    };
    let bounds = world.query(colliders).bounds(handle)?;

    if (bounds.left() < arena.left() && velocity.x < 0.0) || (bounds.right() > arena.right() && velocity.x > 0.0) {
        velocity.x = -velocity.x;
    }
    if (bounds.top() < arena.top() && velocity.y < 0.0) || (bounds.bottom() > arena.bottom() && velocity.y > 0.0) {
        velocity.y = -velocity.y;
    }
    Ok(())
}
