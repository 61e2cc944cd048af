//! Composite collider
//!
//! A list holds handles to other colliders in the same [`ColliderSet`](super::ColliderSet).
//! It never owns them: the set does, and removing a collider from the set
//! drops it from every list that referenced it.

use crate::foundation::collections::ColliderHandle;

/// Ordered collection of child collider handles sharing one offset frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColliderList {
    children: Vec<ColliderHandle>,
}

impl ColliderList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Child handles in test order
    pub fn children(&self) -> &[ColliderHandle] {
        &self.children
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the list has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether `handle` is a direct child
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.children.contains(&handle)
    }

    /// Append a child; membership checks live in `ColliderSet::add_child`
    pub(crate) fn push(&mut self, handle: ColliderHandle) {
        self.children.push(handle);
    }

    /// Remove every occurrence of `handle`, returning whether any was found
    pub(crate) fn remove(&mut self, handle: ColliderHandle) -> bool {
        let before = self.children.len();
        self.children.retain(|&child| child != handle);
        before != self.children.len()
    }
}
