//! Collision layers for filtering broad-phase pairs
//!
//! Every collider sits on one or more layers and carries a mask of the
//! layers it reacts to. A pair is only tested when each side's layers are
//! in the other side's mask.

use bitflags::bitflags;

bitflags! {
    /// Layer bits for collision filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static environment geometry, tile maps included
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes
        const TRIGGER = 1 << 4;
        /// Pickups and collectibles
        const PICKUP = 1 << 5;

        /// Every layer, including the user-defined bits 6-31
        const ALL = u32::MAX;
    }
}

impl CollisionLayers {
    /// No layer
    pub const NONE: Self = Self::empty();

    /// Check if two colliders should be tested against each other
    ///
    /// A's layers must be in B's mask and B's layers must be in A's mask.
    ///
    /// # Example
    /// ```
    /// use collide2d::physics::CollisionLayers;
    ///
    /// let player_mask = CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT;
    /// let enemy_mask = CollisionLayers::PLAYER | CollisionLayers::PROJECTILE;
    ///
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PLAYER, player_mask,
    ///     CollisionLayers::ENEMY, enemy_mask,
    /// ));
    /// ```
    pub fn should_collide(layers_a: Self, mask_a: Self, layers_b: Self, mask_b: Self) -> bool {
        layers_a.intersects(mask_b) && layers_b.intersects(mask_a)
    }

    /// Build a layer set from flag names such as `"PLAYER"` or `"ENEMY"`
    ///
    /// Returns `None` if any name is unknown.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Option<Self> {
        names
            .iter()
            .try_fold(Self::NONE, |acc, name| Some(acc | Self::from_name(name.as_ref())?))
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL
    }
}
