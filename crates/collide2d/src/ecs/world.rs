//! World holding entity positions and collider attachments

use std::collections::HashMap;

use super::Entity;
use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec2;
use crate::physics::collision::{ColliderSet, CollisionError, CollisionQuery, PositionSource};
use crate::physics::collision_system;

/// Entities, their world positions, and the collider each one owns
///
/// The world never owns colliders: they live in a [`ColliderSet`] and the
/// world keeps the handle. Every method that changes an attachment takes
/// the set so the collider's back-references stay in sync.
pub struct World {
    next_entity_id: u32,
    entities: Vec<Entity>,
    positions: HashMap<Entity, Vec2>,
    colliders: HashMap<Entity, ColliderHandle>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            positions: HashMap::new(),
            colliders: HashMap::new(),
        }
    }

    /// Create a new entity at `position`
    pub fn create_entity(&mut self, position: Vec2) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        self.positions.insert(entity, position);
        entity
    }

    /// Remove an entity and the collider attached to it
    ///
    /// Returns `false` if the entity was not alive.
    pub fn despawn(&mut self, entity: Entity, colliders: &mut ColliderSet) -> bool {
        let Some(index) = self.entities.iter().position(|&e| e == entity) else {
            return false;
        };

        self.entities.remove(index);
        self.positions.remove(&entity);
        if let Some(handle) = self.colliders.remove(&entity) {
            colliders.remove(handle);
        }
        true
    }

    /// Whether the entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.positions.contains_key(&entity)
    }

    /// Current world position
    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.positions.get(&entity).copied()
    }

    /// Move an entity; returns `false` if it is not alive
    pub fn set_position(&mut self, entity: Entity, position: Vec2) -> bool {
        match self.positions.get_mut(&entity) {
            Some(current) => {
                *current = position;
                true
            }
            None => false,
        }
    }

    /// Move an entity by `delta`; returns `false` if it is not alive
    pub fn translate(&mut self, entity: Entity, delta: Vec2) -> bool {
        match self.positions.get_mut(&entity) {
            Some(current) => {
                *current += delta;
                true
            }
            None => false,
        }
    }

    /// Give `entity` a collider
    ///
    /// The collider follows the entity's position from now on and reports
    /// the entity as its owner. A collider the entity already had is
    /// detached but left in the set. A collider owned by another entity is
    /// taken from it, so a handle is never attached twice.
    pub fn attach_collider(
        &mut self,
        entity: Entity,
        handle: ColliderHandle,
        colliders: &mut ColliderSet,
    ) -> Result<(), CollisionError> {
        if !self.contains(entity) {
            return Err(CollisionError::MissingPosition(entity));
        }

        let collider = colliders
            .get_mut(handle)
            .ok_or(CollisionError::UnknownCollider(handle))?;
        if let Some(owner) = collider.entity() {
            if owner != entity && self.colliders.get(&owner) == Some(&handle) {
                self.colliders.remove(&owner);
            }
        }
        collider.set_entity(Some(entity));
        collider.set_base(Some(entity));

        if let Some(previous) = self.colliders.insert(entity, handle) {
            if previous != handle {
                clear_owner(colliders, previous);
            }
        }
        Ok(())
    }

    /// Take the collider off `entity`, leaving it in the set at its bare offset
    pub fn detach_collider(&mut self, entity: Entity, colliders: &mut ColliderSet) -> Option<ColliderHandle> {
        let handle = self.colliders.remove(&entity)?;
        clear_owner(colliders, handle);
        Some(handle)
    }

    /// Collider attached to `entity`
    pub fn collider(&self, entity: Entity) -> Option<ColliderHandle> {
        self.colliders.get(&entity).copied()
    }

    /// Get an iterator over all entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Every entity with its collider, in creation order, ready for a scan
    ///
    /// A handle that has since been removed from `colliders` is reported as
    /// no collider, so the scan skips that entity.
    pub fn collision_entries(&self, colliders: &ColliderSet) -> Vec<(Entity, Option<ColliderHandle>)> {
        self.entities
            .iter()
            .map(|&entity| {
                let handle = self.collider(entity).filter(|&handle| colliders.contains(handle));
                (entity, handle)
            })
            .collect()
    }

    /// A query reading base positions from this world
    pub fn query<'a>(&'a self, colliders: &'a ColliderSet) -> CollisionQuery<'a, Self> {
        CollisionQuery::new(colliders, self)
    }

    /// Run the broad-phase scan over every entity
    pub fn scan<F>(&self, colliders: &ColliderSet, on_collision: F) -> Result<usize, CollisionError>
    where
        F: FnMut(Entity, Entity),
    {
        collision_system::scan(&self.query(colliders), &self.collision_entries(colliders), on_collision)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSource for World {
    fn position(&self, entity: Entity) -> Option<Vec2> {
        Self::position(self, entity)
    }
}

fn clear_owner(colliders: &mut ColliderSet, handle: ColliderHandle) {
    if let Some(collider) = colliders.get_mut(handle) {
        collider.set_entity(None);
        collider.set_base(None);
    }
}
