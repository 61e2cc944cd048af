//! Scene descriptions
//!
//! A scene file lists entities with a position and an optional collider.
//! Loading goes through [`Config`], so scenes can be written in TOML or RON:
//!
//! ```toml
//! name = "arena"
//!
//! [[entities]]
//! name = "walls"
//! position = [0.0, 0.0]
//! collider = { shape = { kind = "grid", tile_size = [16.0, 16.0], cells = ["1111", "1001", "1111"] } }
//!
//! [[entities]]
//! name = "ball"
//! position = [24.0, 24.0]
//! collider = { layers = ["PLAYER"], shape = { kind = "circle", radius = 4.0 } }
//! ```

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::config::{Config, ConfigError, Deserialize, Serialize};
use crate::ecs::{Entity, World};
use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::utils::vec2;
use crate::physics::collision::{Collider, ColliderSet, CollisionError, Grid};
use crate::physics::collision_layers::CollisionLayers;

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Reading or parsing the scene file failed
    #[error("failed to load scene: {0}")]
    Config(#[from] ConfigError),

    /// Building or attaching a collider failed
    #[error("collider setup failed: {0}")]
    Collision(#[from] CollisionError),

    /// The description is well-formed but not usable
    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// A named set of entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name, used in logs
    pub name: String,
    /// Entities in spawn order
    #[serde(default)]
    pub entities: Vec<EntityDescription>,
}

/// One entity in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    /// Unique name within the scene
    pub name: String,
    /// World position
    #[serde(default)]
    pub position: [f32; 2],
    /// Collider attached at spawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<ColliderDescription>,
}

/// A collider and its placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDescription {
    /// Offset from the owning entity, or from the parent list for children
    #[serde(default)]
    pub offset: [f32; 2],
    /// Layer flag names; all layers when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<String>,
    /// Mask flag names; all layers when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mask: Vec<String>,
    /// Shape parameters
    pub shape: ShapeDescription,
}

/// Shape parameters, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDescription {
    /// Axis-aligned box hanging from the offset
    Hitbox {
        /// Width and height
        size: [f32; 2],
    },
    /// Circle centered on the offset
    Circle {
        /// Radius
        radius: f32,
    },
    /// Tile grid, one string of `0`/`1` per row
    Grid {
        /// Size of one tile
        tile_size: [f32; 2],
        /// Occupancy rows
        cells: Vec<String>,
    },
    /// Composite of child colliders sharing the list's frame
    List {
        /// Child colliders
        #[serde(default)]
        children: Vec<ColliderDescription>,
    },
}

impl Config for SceneDescription {}

impl SceneDescription {
    /// Load and validate a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let scene = Self::load_from_file(path)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check names, extents, layer names and grid rows
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut names = HashSet::new();

        for entity in &self.entities {
            if entity.name.is_empty() {
                return Err(SceneError::Invalid("entity with an empty name".to_string()));
            }
            if !names.insert(entity.name.as_str()) {
                return Err(SceneError::Invalid(format!("duplicate entity name '{}'", entity.name)));
            }
            if let Some(collider) = &entity.collider {
                collider
                    .validate()
                    .map_err(|reason| SceneError::Invalid(format!("entity '{}': {}", entity.name, reason)))?;
            }
        }

        Ok(())
    }

    /// Create every entity and its collider
    ///
    /// Returns the entities in description order. The scene should have
    /// passed [`SceneDescription::validate`]; a failure part-way leaves the
    /// entities spawned so far in the world.
    pub fn spawn(&self, world: &mut World, colliders: &mut ColliderSet) -> Result<Vec<Entity>, SceneError> {
        let mut spawned = Vec::with_capacity(self.entities.len());
        let colliders_before = colliders.len();

        for description in &self.entities {
            let entity = world.create_entity(vec2(description.position));
            if let Some(collider) = &description.collider {
                let handle = collider.build(colliders)?;
                world.attach_collider(entity, handle, colliders)?;
            }
            log::trace!("Spawned '{}' as {}", description.name, entity);
            spawned.push(entity);
        }

        log::info!(
            "Spawned scene '{}': {} entities, {} colliders",
            self.name,
            spawned.len(),
            colliders.len() - colliders_before
        );

        Ok(spawned)
    }
}

impl ColliderDescription {
    /// Insert this collider (and any children) into the set
    pub fn build(&self, colliders: &mut ColliderSet) -> Result<ColliderHandle, SceneError> {
        let offset = vec2(self.offset);
        let collider = match &self.shape {
            ShapeDescription::Hitbox { size } => Collider::hitbox(vec2(*size), offset),
            ShapeDescription::Circle { radius } => Collider::circle(*radius, offset),
            ShapeDescription::Grid { tile_size, cells } => {
                Collider::grid(Grid::from_bitstring(&cells.join("\n"), vec2(*tile_size))?, offset)
            }
            ShapeDescription::List { .. } => Collider::list(offset),
        };

        let handle = colliders.insert(collider.with_layers(
            resolve_layers(&self.layers)?,
            resolve_layers(&self.mask)?,
        ));

        if let ShapeDescription::List { children } = &self.shape {
            for child in children {
                let child_handle = child.build(colliders)?;
                colliders.add_child(handle, child_handle)?;
            }
        }

        Ok(handle)
    }

    fn validate(&self) -> Result<(), String> {
        for name in self.layers.iter().chain(&self.mask) {
            if CollisionLayers::from_name(name).is_none() {
                return Err(format!("unknown collision layer '{}'", name));
            }
        }

        match &self.shape {
            ShapeDescription::Hitbox { size } => {
                if !size.iter().all(|v| v.is_finite() && *v >= 0.0) {
                    return Err(format!("hitbox size must be non-negative, got {:?}", size));
                }
            }
            ShapeDescription::Circle { radius } => {
                if !(radius.is_finite() && *radius >= 0.0) {
                    return Err(format!("circle radius must be non-negative, got {}", radius));
                }
            }
            ShapeDescription::Grid { tile_size, cells } => {
                Grid::from_bitstring(&cells.join("\n"), vec2(*tile_size)).map_err(|e| e.to_string())?;
            }
            ShapeDescription::List { children } => {
                for child in children {
                    child.validate()?;
                }
            }
        }

        Ok(())
    }
}

fn resolve_layers(names: &[String]) -> Result<CollisionLayers, SceneError> {
    if names.is_empty() {
        return Ok(CollisionLayers::ALL);
    }
    CollisionLayers::from_names(names)
        .ok_or_else(|| SceneError::Invalid(format!("unknown collision layer in {:?}", names)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use crate::foundation::math::Vec2;
    use crate::physics::collision::{ColliderShape, ShapeKind};

    const ARENA: &str = r#"
name = "arena"

[[entities]]
name = "walls"
collider = { layers = ["ENVIRONMENT"], shape = { kind = "grid", tile_size = [10.0, 10.0], cells = ["1111", "1001", "1111"] } }

[[entities]]
name = "ship"
position = [20.0, 15.0]

[entities.collider]
layers = ["PLAYER"]

[entities.collider.shape]
kind = "list"

[[entities.collider.shape.children]]
offset = [-2.0, -2.0]
shape = { kind = "hitbox", size = [4.0, 4.0] }

[[entities.collider.shape.children]]
offset = [6.0, 0.0]
shape = { kind = "circle", radius = 1.5 }

[[entities]]
name = "marker"
position = [100.0, 100.0]
"#;

    fn arena() -> SceneDescription {
        SceneDescription::from_str_as(ARENA, ConfigFormat::Toml).unwrap()
    }

    #[test]
    fn test_parse_scene() {
        let scene = arena();

        assert_eq!(scene.name, "arena");
        assert_eq!(scene.entities.len(), 3);
        assert!(scene.entities[2].collider.is_none());
        assert_eq!(scene.entities[0].position, [0.0, 0.0]);
        match &scene.entities[1].collider.as_ref().unwrap().shape {
            ShapeDescription::List { children } => assert_eq!(children.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
        scene.validate().unwrap();
    }

    #[test]
    fn test_spawn_scene() {
        let mut world = World::new();
        let mut colliders = ColliderSet::new();
        let entities = arena().spawn(&mut world, &mut colliders).unwrap();

        assert_eq!(entities.len(), 3);
        // walls, ship list and its two children
        assert_eq!(colliders.len(), 4);
        assert_eq!(world.collider(entities[2]), None);

        let ship = world.collider(entities[1]).unwrap();
        let query = world.query(&colliders);
        assert_eq!(colliders.get(ship).unwrap().kind(), ShapeKind::List);
        assert_eq!(colliders.get(ship).unwrap().layers, CollisionLayers::PLAYER);
        assert!(query.check_point(ship, Vec2::new(19.0, 14.0)).unwrap());
        assert!(query.check_point(ship, Vec2::new(26.0, 15.0)).unwrap());
        assert!(!query.check_point(ship, Vec2::new(23.0, 15.0)).unwrap());
    }

    #[test]
    fn test_spawned_scene_scans() {
        let mut world = World::new();
        let mut colliders = ColliderSet::new();
        let entities = arena().spawn(&mut world, &mut colliders).unwrap();

        // Walls against the ship's circle child is grid against circle
        let mut hits = Vec::new();
        world.scan(&colliders, |a, b| hits.push((a, b))).unwrap_err();
        assert!(hits.is_empty());

        // Drop the circle child, then push the box child into the right wall
        let ship = world.collider(entities[1]).unwrap();
        let circle_child = match colliders.get(ship).unwrap().shape() {
            ColliderShape::List(list) => list.children()[1],
            other => panic!("expected list, got {:?}", other),
        };
        colliders.remove(circle_child);
        world.set_position(entities[1], Vec2::new(29.0, 15.0));

        world.scan(&colliders, |a, b| hits.push((a, b))).unwrap();
        assert_eq!(hits, vec![(entities[0], entities[1])]);
    }

    #[test]
    fn test_validation_errors() {
        let mut scene = arena();
        scene.entities[2].name = "walls".to_string();
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));

        let mut scene = arena();
        scene.entities[0].collider.as_mut().unwrap().layers = vec!["WIZARD".to_string()];
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));

        let mut scene = arena();
        scene.entities[0].collider.as_mut().unwrap().shape = ShapeDescription::Grid {
            tile_size: [10.0, 10.0],
            cells: vec!["11".to_string(), "1".to_string()],
        };
        assert!(scene.validate().is_err());

        let mut scene = arena();
        scene.entities[2].collider = Some(ColliderDescription {
            offset: [0.0, 0.0],
            layers: Vec::new(),
            mask: Vec::new(),
            shape: ShapeDescription::Circle { radius: -1.0 },
        });
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_scene_file_round_trip() {
        let path = std::env::temp_dir().join(format!("collide2d-scene-{}.toml", std::process::id()));
        let scene = arena();

        scene.save_to_file(&path).unwrap();
        let loaded = SceneDescription::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("collide2d-does-not-exist.toml");

        assert!(matches!(
            SceneDescription::load(&path),
            Err(SceneError::Config(ConfigError::Io(_)))
        ));
    }
}
