//! Broad-phase collision scan
//!
//! The scan is a plain all-pairs loop: every call tests every unordered pair
//! of colliders that passes the layer filter and reports each intersecting
//! pair to the caller. [`ContactTracker`] sits on top and remembers the
//! previous tick's pairs so game logic can react to contacts starting and
//! ending.

use std::collections::HashSet;

use crate::ecs::Entity;
use crate::foundation::collections::ColliderHandle;
use crate::physics::collision::{Collider, CollisionError, CollisionQuery, PositionSource};
use crate::physics::collision_layers::CollisionLayers;

/// Collision pair representing two entities that are colliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Entity with the smaller id
    pub entity_a: Entity,
    /// Entity with the larger id
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores smaller entity ID first for consistency)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a.id() < entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self { entity_a: entity_b, entity_b: entity_a }
        }
    }

    /// Whether `entity` is one side of the pair
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }

    /// The side of the pair that is not `entity`
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

/// Test every pair of colliding entities and report each hit
///
/// `entries` pairs each owner with its collider, if any; entries without a
/// collider are skipped. Pairs are visited in entry order (`i < j`) and
/// `on_collision` receives the owners in that order. An entity is never
/// paired with itself.
///
/// Returns the number of reported pairs, or the first error raised by a
/// pair test. Pairs reported before the error have already been delivered.
pub fn scan<P, F>(
    query: &CollisionQuery<'_, P>,
    entries: &[(Entity, Option<ColliderHandle>)],
    mut on_collision: F,
) -> Result<usize, CollisionError>
where
    P: PositionSource + ?Sized,
    F: FnMut(Entity, Entity),
{
    let candidates = entries
        .iter()
        .filter_map(|&(entity, handle)| handle.map(|handle| (entity, handle)))
        .map(|(entity, handle)| Ok((entity, handle, query.colliders().try_get(handle)?)))
        .collect::<Result<Vec<(Entity, ColliderHandle, &Collider)>, CollisionError>>()?;

    let mut tested = 0usize;
    let mut reported = 0usize;

    for (i, &(entity_a, handle_a, collider_a)) in candidates.iter().enumerate() {
        for &(entity_b, handle_b, collider_b) in &candidates[i + 1..] {
            if entity_a == entity_b {
                continue;
            }
            if !CollisionLayers::should_collide(
                collider_a.layers,
                collider_a.mask,
                collider_b.layers,
                collider_b.mask,
            ) {
                continue;
            }

            tested += 1;
            if query.check(handle_a, handle_b)? {
                log::trace!("{} intersects {}", entity_a, entity_b);
                on_collision(entity_a, entity_b);
                reported += 1;
            }
        }
    }

    log::debug!(
        "Broad-phase scan: {} colliders, {} pairs tested, {} reported",
        candidates.len(),
        tested,
        reported
    );

    Ok(reported)
}

/// Tracks which pairs are touching across consecutive scans
#[derive(Debug, Default)]
pub struct ContactTracker {
    /// Collision pairs from the current tick
    current: HashSet<CollisionPair>,

    /// Collision pairs from the previous tick
    previous: HashSet<CollisionPair>,
}

impl ContactTracker {
    /// Create a tracker with no contacts
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a scan and make its result the current tick
    ///
    /// On error the tracker keeps its previous state.
    pub fn update<P: PositionSource + ?Sized>(
        &mut self,
        query: &CollisionQuery<'_, P>,
        entries: &[(Entity, Option<ColliderHandle>)],
    ) -> Result<&HashSet<CollisionPair>, CollisionError> {
        let mut found = HashSet::new();
        scan(query, entries, |a, b| {
            found.insert(CollisionPair::new(a, b));
        })?;

        self.previous = std::mem::replace(&mut self.current, found);
        Ok(&self.current)
    }

    /// Pairs touching now that were not touching last tick, sorted
    pub fn entered(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<_> = self.current.difference(&self.previous).copied().collect();
        pairs.sort();
        pairs
    }

    /// Pairs touching last tick that are no longer touching, sorted
    pub fn exited(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<_> = self.previous.difference(&self.current).copied().collect();
        pairs.sort();
        pairs
    }

    /// All pairs touching this tick
    pub fn current(&self) -> &HashSet<CollisionPair> {
        &self.current
    }

    /// Whether `a` and `b` are touching this tick
    pub fn is_touching(&self, a: Entity, b: Entity) -> bool {
        self.current.contains(&CollisionPair::new(a, b))
    }

    /// Entities touching `entity` this tick, sorted by id
    pub fn contacts_of(&self, entity: Entity) -> Vec<Entity> {
        let mut contacts: Vec<_> = self.current.iter().filter_map(|pair| pair.other(entity)).collect();
        contacts.sort();
        contacts
    }

    /// Forget every contact
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::foundation::math::Vec2;
    use crate::physics::collision::{ColliderSet, Grid};

    fn entries(pairs: &[(u32, Option<ColliderHandle>)]) -> Vec<(Entity, Option<ColliderHandle>)> {
        pairs.iter().map(|&(id, handle)| (Entity::new(id), handle)).collect()
    }

    #[test]
    fn test_collision_pair_ordering() {
        let a = Entity::new(4);
        let b = Entity::new(2);
        let pair = CollisionPair::new(a, b);

        assert_eq!(pair.entity_a, b);
        assert_eq!(pair.entity_b, a);
        assert_eq!(pair, CollisionPair::new(b, a));
        assert_eq!(pair.other(a), Some(b));
        assert_eq!(pair.other(Entity::new(9)), None);
        assert!(pair.contains(a));
        assert!(pair.contains(b));
        assert!(!pair.contains(Entity::new(9)));
    }

    #[test]
    fn test_scan_reports_single_pair_once() {
        let mut set = ColliderSet::new();
        let a = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::new(0.0, 0.0)));
        let b = set.insert(Collider::circle(3.0, Vec2::new(12.0, 5.0)));
        let c = set.insert(Collider::hitbox(Vec2::new(5.0, 5.0), Vec2::new(100.0, 100.0)));
        let d = set.insert(Collider::circle(2.0, Vec2::new(-50.0, 0.0)));
        let query = CollisionQuery::new(&set, &());

        let entries = entries(&[(1, Some(a)), (2, Some(b)), (3, Some(c)), (4, Some(d))]);
        let mut hits = Vec::new();
        let count = scan(&query, &entries, |x, y| hits.push((x, y))).unwrap();

        assert_eq!(count, 1);
        assert_eq!(hits, vec![(Entity::new(1), Entity::new(2))]);
    }

    #[test]
    fn test_scan_skips_entries_without_colliders() {
        let mut set = ColliderSet::new();
        let a = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::zeros()));
        let b = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0)));
        let query = CollisionQuery::new(&set, &());

        let entries = entries(&[(1, None), (2, Some(a)), (3, None), (4, Some(b))]);
        let mut hits = Vec::new();
        scan(&query, &entries, |x, y| hits.push((x, y))).unwrap();

        assert_eq!(hits, vec![(Entity::new(2), Entity::new(4))]);
    }

    #[test]
    fn test_scan_never_pairs_entity_with_itself() {
        let mut set = ColliderSet::new();
        let a = set.insert(Collider::circle(5.0, Vec2::zeros()));
        let b = set.insert(Collider::circle(5.0, Vec2::new(1.0, 0.0)));
        let query = CollisionQuery::new(&set, &());

        let entries = entries(&[(1, Some(a)), (1, Some(b))]);
        let mut hits = 0;
        scan(&query, &entries, |x, y| {
            assert_ne!(x, y);
            hits += 1;
        })
        .unwrap();

        assert_eq!(hits, 0);
    }

    #[test]
    fn test_scan_applies_layer_filter() {
        let mut set = ColliderSet::new();
        let player = set.insert(
            Collider::circle(5.0, Vec2::zeros())
                .with_layers(CollisionLayers::PLAYER, CollisionLayers::ENEMY),
        );
        let scenery = set.insert(
            Collider::circle(5.0, Vec2::new(4.0, 0.0))
                .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL),
        );
        let enemy = set.insert(
            Collider::circle(5.0, Vec2::new(0.0, 4.0))
                .with_layers(CollisionLayers::ENEMY, CollisionLayers::PLAYER),
        );
        let query = CollisionQuery::new(&set, &());

        let entries = entries(&[(1, Some(player)), (2, Some(scenery)), (3, Some(enemy))]);
        let mut hits = Vec::new();
        scan(&query, &entries, |x, y| hits.push(CollisionPair::new(x, y))).unwrap();

        assert_eq!(hits, vec![CollisionPair::new(Entity::new(1), Entity::new(3))]);
    }

    #[test]
    fn test_scan_propagates_first_error() {
        let mut set = ColliderSet::new();
        let mut grid = Grid::new(2, 2, Vec2::new(8.0, 8.0)).unwrap();
        grid.set(0, 0, true);
        let map = set.insert(Collider::grid(grid, Vec2::zeros()));
        let ball = set.insert(Collider::circle(2.0, Vec2::new(4.0, 4.0)));
        let query = CollisionQuery::new(&set, &());

        let entries = entries(&[(1, Some(map)), (2, Some(ball))]);
        let result = scan(&query, &entries, |_, _| panic!("no pair should be reported"));

        assert!(matches!(result, Err(CollisionError::NotImplemented { .. })));
    }

    #[test]
    fn test_scan_reads_positions_every_call() {
        let owner_a = Entity::new(1);
        let owner_b = Entity::new(2);
        let mut positions = HashMap::new();
        positions.insert(owner_a, Vec2::new(0.0, 0.0));
        positions.insert(owner_b, Vec2::new(50.0, 0.0));

        let mut set = ColliderSet::new();
        let mut first = Collider::circle(5.0, Vec2::zeros());
        first.set_base(Some(owner_a));
        let mut second = Collider::circle(5.0, Vec2::zeros());
        second.set_base(Some(owner_b));
        let a = set.insert(first);
        let b = set.insert(second);
        let entries = vec![(owner_a, Some(a)), (owner_b, Some(b))];

        let count = scan(&CollisionQuery::new(&set, &positions), &entries, |_, _| {}).unwrap();
        assert_eq!(count, 0);

        positions.insert(owner_b, Vec2::new(8.0, 0.0));
        let count = scan(&CollisionQuery::new(&set, &positions), &entries, |_, _| {}).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_contact_tracker_entered_and_exited() {
        let mut set = ColliderSet::new();
        let a = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::zeros()));
        let b = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0)));
        let entries = entries(&[(1, Some(a)), (2, Some(b))]);
        let pair = CollisionPair::new(Entity::new(1), Entity::new(2));
        let mut tracker = ContactTracker::new();

        tracker.update(&CollisionQuery::new(&set, &()), &entries).unwrap();
        assert_eq!(tracker.entered(), vec![pair]);
        assert!(tracker.exited().is_empty());
        assert!(tracker.is_touching(Entity::new(2), Entity::new(1)));
        assert_eq!(tracker.contacts_of(Entity::new(1)), vec![Entity::new(2)]);

        tracker.update(&CollisionQuery::new(&set, &()), &entries).unwrap();
        assert!(tracker.entered().is_empty());
        assert_eq!(tracker.current().len(), 1);

        set.get_mut(b).unwrap().set_offset(Vec2::new(40.0, 0.0));
        tracker.update(&CollisionQuery::new(&set, &()), &entries).unwrap();
        assert!(tracker.entered().is_empty());
        assert_eq!(tracker.exited(), vec![pair]);
        assert!(tracker.contacts_of(Entity::new(1)).is_empty());
    }

    #[test]
    fn test_contact_tracker_keeps_state_on_error() {
        let mut set = ColliderSet::new();
        let a = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::zeros()));
        let b = set.insert(Collider::hitbox(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0)));
        let mut tracker = ContactTracker::new();
        tracker
            .update(&CollisionQuery::new(&set, &()), &entries(&[(1, Some(a)), (2, Some(b))]))
            .unwrap();

        let first_grid = set.insert(Collider::grid(Grid::new(1, 1, Vec2::new(1.0, 1.0)).unwrap(), Vec2::zeros()));
        let second_grid = set.insert(Collider::grid(Grid::new(1, 1, Vec2::new(1.0, 1.0)).unwrap(), Vec2::zeros()));
        let broken = entries(&[(3, Some(first_grid)), (4, Some(second_grid))]);

        assert!(tracker.update(&CollisionQuery::new(&set, &()), &broken).is_err());
        assert_eq!(tracker.entered(), vec![CollisionPair::new(Entity::new(1), Entity::new(2))]);
    }
}
