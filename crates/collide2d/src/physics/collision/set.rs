//! Arena owning every collider

use std::collections::HashSet;

use crate::foundation::collections::{ColliderHandle, HandleMap};
use super::{Collider, ColliderList, ColliderShape, CollisionError};

/// Slot-map arena of colliders
///
/// Handles stay valid until the collider is removed; a removed handle is
/// never reused for a different collider. Lists reference children by
/// handle, so the set is also where list membership is edited.
#[derive(Debug, Default)]
pub struct ColliderSet {
    colliders: HandleMap<ColliderHandle, Collider>,
}

impl ColliderSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a collider and return its handle
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        self.colliders.insert(collider)
    }

    /// Remove a collider, detaching it from every list that contains it
    ///
    /// Children of a removed list are left in the set.
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let removed = self.colliders.remove(handle)?;

        for collider in self.colliders.values_mut() {
            if let Some(list) = collider.list_mut() {
                list.remove(handle);
            }
        }

        Some(removed)
    }

    /// Look up a collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Look up a collider mutably
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// Look up a collider, failing with [`CollisionError::UnknownCollider`]
    pub fn try_get(&self, handle: ColliderHandle) -> Result<&Collider, CollisionError> {
        self.get(handle).ok_or(CollisionError::UnknownCollider(handle))
    }

    /// Whether the handle refers to a live collider
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains_key(handle)
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate over all colliders
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter()
    }

    /// Append `child` to the list collider `list`
    ///
    /// Fails if either handle is unknown, `list` is not a list, or the list
    /// would end up containing itself.
    pub fn add_child(&mut self, list: ColliderHandle, child: ColliderHandle) -> Result<(), CollisionError> {
        if !self.contains(child) {
            return Err(CollisionError::UnknownCollider(child));
        }
        if child == list || self.reaches(child, list) {
            return Err(CollisionError::CyclicList { list, child });
        }

        self.list_mut(list)?.push(child);
        Ok(())
    }

    /// Remove `child` from the list collider `list`
    ///
    /// Returns whether the child was a member. The child stays in the set.
    pub fn remove_child(&mut self, list: ColliderHandle, child: ColliderHandle) -> Result<bool, CollisionError> {
        Ok(self.list_mut(list)?.remove(child))
    }

    fn list_mut(&mut self, handle: ColliderHandle) -> Result<&mut ColliderList, CollisionError> {
        self.colliders
            .get_mut(handle)
            .ok_or(CollisionError::UnknownCollider(handle))?
            .list_mut()
            .ok_or(CollisionError::NotAList(handle))
    }

    /// Whether `target` is a descendant of `from` through list membership
    fn reaches(&self, from: ColliderHandle, target: ColliderHandle) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![from];

        while let Some(handle) = stack.pop() {
            if !visited.insert(handle) {
                continue;
            }
            let Some(ColliderShape::List(list)) = self.get(handle).map(Collider::shape) else {
                continue;
            };
            for &child in list.children() {
                if child == target {
                    return true;
                }
                stack.push(child);
            }
        }

        false
    }
}
