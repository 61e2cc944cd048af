//! Read-only collision queries and the shape-pair dispatch table
//!
//! A [`CollisionQuery`] borrows the collider arena and a position source for
//! its whole lifetime, so nothing can move or reshape a collider while a
//! test or a broad-phase scan is running.

use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec2;
use crate::physics::geometry::circle_intersects_segment;
use super::hitbox::{hitbox_intersects_circle, hitbox_intersects_segment};
use super::{Aabb, Collider, ColliderList, ColliderSet, ColliderShape, CollisionError, PositionSource};

/// A collider resolved to a world-space frame origin
///
/// For a top-level collider the origin is its actual position. A list child
/// hangs from its list: `child origin = list origin + child offset`, and its
/// own base position is not consulted.
#[derive(Debug, Clone, Copy)]
pub struct PlacedCollider<'a> {
    /// The collider being placed
    pub collider: &'a Collider,
    /// World-space origin of the collider's local frame
    pub origin: Vec2,
}

/// Pure collision queries over a [`ColliderSet`]
pub struct CollisionQuery<'a, P: PositionSource + ?Sized = ()> {
    colliders: &'a ColliderSet,
    positions: &'a P,
}

impl<'a, P: PositionSource + ?Sized> CollisionQuery<'a, P> {
    /// Create a query reading base positions from `positions`
    pub fn new(colliders: &'a ColliderSet, positions: &'a P) -> Self {
        Self { colliders, positions }
    }

    /// The collider arena being queried
    pub fn colliders(&self) -> &'a ColliderSet {
        self.colliders
    }

    /// World position of a collider: base position plus offset
    pub fn actual_position(&self, handle: ColliderHandle) -> Result<Vec2, CollisionError> {
        self.colliders.try_get(handle)?.actual_position(self.positions)
    }

    /// Resolve a top-level collider to its world frame
    pub fn place(&self, handle: ColliderHandle) -> Result<PlacedCollider<'a>, CollisionError> {
        let collider = self.colliders.try_get(handle)?;
        Ok(PlacedCollider {
            collider,
            origin: collider.actual_position(self.positions)?,
        })
    }

    /// Children of a placed list, each placed in the list's frame
    ///
    /// Returns an empty vector for non-list colliders.
    pub fn children(&self, placed: PlacedCollider<'a>) -> Result<Vec<PlacedCollider<'a>>, CollisionError> {
        let ColliderShape::List(list) = placed.collider.shape() else {
            return Ok(Vec::new());
        };

        list.children()
            .iter()
            .map(|&handle| {
                let collider = self.colliders.try_get(handle)?;
                Ok(PlacedCollider {
                    collider,
                    origin: placed.origin + collider.offset(),
                })
            })
            .collect()
    }

    /// Does the collider contain `point`?
    ///
    /// Boxes are exclusive at their edges, circles inclusive, grids
    /// half-open per cell; lists hit if any child does.
    pub fn check_point(&self, handle: ColliderHandle, point: Vec2) -> Result<bool, CollisionError> {
        let placed = self.place(handle)?;
        self.contains_point(placed, point)
    }

    /// Does the segment `start -> end` touch the collider?
    ///
    /// Useful for line-of-sight and hitscan checks. Supported by every shape.
    pub fn check_segment(&self, handle: ColliderHandle, start: Vec2, end: Vec2) -> Result<bool, CollisionError> {
        let placed = self.place(handle)?;
        self.crosses_segment(placed, start, end)
    }

    /// Do two colliders intersect?
    ///
    /// Symmetric for every supported pairing. Grid against circle fails with
    /// [`CollisionError::NotImplemented`] and grid against grid with
    /// [`CollisionError::InvalidOperation`], including when either grid is
    /// reached through a list.
    pub fn check(&self, a: ColliderHandle, b: ColliderHandle) -> Result<bool, CollisionError> {
        let first = self.place(a)?;
        let second = self.place(b)?;
        self.collide(first, second)
    }

    /// Absolute (world-space) bounds
    ///
    /// Lists report the union of their children; an empty list reports a
    /// zero-size box at its actual position.
    pub fn bounds(&self, handle: ColliderHandle) -> Result<Aabb, CollisionError> {
        let placed = self.place(handle)?;
        self.bounds_of(placed)
    }

    /// Bounds relative to the base position (the base is taken as the origin)
    pub fn local_bounds(&self, handle: ColliderHandle) -> Result<Aabb, CollisionError> {
        let collider = self.colliders.try_get(handle)?;
        self.bounds_of(PlacedCollider {
            collider,
            origin: collider.offset(),
        })
    }

    /// World-space center; for lists the average of the children's centers
    pub fn center(&self, handle: ColliderHandle) -> Result<Vec2, CollisionError> {
        let placed = self.place(handle)?;
        self.center_of(placed)
    }

    fn contains_point(&self, placed: PlacedCollider<'a>, point: Vec2) -> Result<bool, CollisionError> {
        let origin = placed.origin;
        match placed.collider.shape() {
            ColliderShape::Box(hitbox) => Ok(hitbox.bounds_at(origin).contains_point(point)),
            ColliderShape::Circle(circle) => Ok(circle.contains_point(origin, point)),
            ColliderShape::Grid(grid) => Ok(grid.contains_point(origin, point)),
            ColliderShape::List(list) => {
                self.any_child(list, origin, |child| self.contains_point(child, point))
            }
        }
    }

    fn crosses_segment(&self, placed: PlacedCollider<'a>, start: Vec2, end: Vec2) -> Result<bool, CollisionError> {
        let origin = placed.origin;
        match placed.collider.shape() {
            ColliderShape::Box(hitbox) => Ok(hitbox_intersects_segment(&hitbox.bounds_at(origin), start, end)),
            ColliderShape::Circle(circle) => Ok(circle_intersects_segment(origin, circle.radius(), start, end)),
            ColliderShape::Grid(grid) => Ok(grid.intersects_segment(origin, start, end)),
            ColliderShape::List(list) => {
                self.any_child(list, origin, |child| self.crosses_segment(child, start, end))
            }
        }
    }

    /// The dispatch table
    ///
    /// Each unordered pair is implemented once; the mirrored arm swaps the
    /// operands. A list on either side tests its children one by one against
    /// the other side as a whole, which also covers list against list.
    /// Children are tested in order and the first hit wins, so an
    /// unsupported child pairing only errors when it is reached. For two
    /// lists that can make the result depend on operand order.
    fn collide(&self, a: PlacedCollider<'a>, b: PlacedCollider<'a>) -> Result<bool, CollisionError> {
        use ColliderShape::{Box, Circle, Grid, List};

        match (a.collider.shape(), b.collider.shape()) {
            (List(list), _) => self.any_child(list, a.origin, |child| self.collide(child, b)),
            (_, List(_)) => self.collide(b, a),

            (Box(first), Box(second)) => {
                Ok(first.bounds_at(a.origin).overlaps(&second.bounds_at(b.origin)))
            }
            (Box(hitbox), Circle(circle)) => Ok(hitbox_intersects_circle(
                &hitbox.bounds_at(a.origin),
                b.origin,
                circle.radius(),
            )),
            (Circle(_), Box(_)) => self.collide(b, a),

            (Circle(first), Circle(second)) => Ok(first.intersects(a.origin, second, b.origin)),

            (Grid(grid), Box(hitbox)) => Ok(grid.overlaps_aabb(a.origin, &hitbox.bounds_at(b.origin))),
            (Box(_), Grid(_)) => self.collide(b, a),

            (Grid(_), Circle(_)) | (Circle(_), Grid(_)) => Err(CollisionError::NotImplemented {
                first: a.collider.kind(),
                second: b.collider.kind(),
            }),
            (Grid(_), Grid(_)) => Err(CollisionError::InvalidOperation {
                first: a.collider.kind(),
                second: b.collider.kind(),
            }),
        }
    }

    /// Short-circuiting any-of over a list's children placed at `origin`
    fn any_child<F>(&self, list: &'a ColliderList, origin: Vec2, mut test: F) -> Result<bool, CollisionError>
    where
        F: FnMut(PlacedCollider<'a>) -> Result<bool, CollisionError>,
    {
        for &handle in list.children() {
            let collider = self.colliders.try_get(handle)?;
            let child = PlacedCollider {
                collider,
                origin: origin + collider.offset(),
            };
            if test(child)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn bounds_of(&self, placed: PlacedCollider<'a>) -> Result<Aabb, CollisionError> {
        let origin = placed.origin;
        match placed.collider.shape() {
            ColliderShape::Box(hitbox) => Ok(hitbox.bounds_at(origin)),
            ColliderShape::Circle(circle) => Ok(circle.bounds_at(origin)),
            ColliderShape::Grid(grid) => Ok(grid.bounds_at(origin)),
            ColliderShape::List(_) => {
                let mut merged: Option<Aabb> = None;
                for child in self.children(placed)? {
                    let bounds = self.bounds_of(child)?;
                    merged = Some(merged.map_or(bounds, |acc| acc.union(&bounds)));
                }
                Ok(merged.unwrap_or_else(|| Aabb::point(origin)))
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn center_of(&self, placed: PlacedCollider<'a>) -> Result<Vec2, CollisionError> {
        if !matches!(placed.collider.shape(), ColliderShape::List(_)) {
            return Ok(self.bounds_of(placed)?.center());
        }

        let children = self.children(placed)?;
        if children.is_empty() {
            return Ok(placed.origin);
        }

        let mut sum = Vec2::zeros();
        for child in &children {
            sum += self.center_of(*child)?;
        }
        Ok(sum / children.len() as f32)
    }
}
