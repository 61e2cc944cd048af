//! World-space primitives shared by the shape tests

use crate::foundation::math::{utils, Vec2};

/// An axis-aligned box in world space
///
/// `min` is the top-left corner and `max` the bottom-right one (y grows
/// downwards). All containment and overlap tests on this type are
/// exclusive: touching edges do not count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Creates a box from its two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box from its top-left corner and size
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Zero-size box at a point
    pub fn point(position: Vec2) -> Self {
        Self {
            min: position,
            max: position,
        }
    }

    /// Left edge (smallest x)
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge (largest x)
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Top edge (smallest y)
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge (largest y)
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Exclusive point containment: `left < x < right && top < y < bottom`
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.min.x < point.x && point.x < self.max.x
            && self.min.y < point.y && point.y < self.max.y
    }

    /// Exclusive overlap; boxes sharing only an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x
            && self.min.y < other.max.y && other.min.y < self.max.y
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// The four edges as segments, clockwise from the top edge
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let [tl, tr, br, bl] = self.corners();
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }

    /// Coarse test: does this box contain any corner of `other`?
    ///
    /// Misses configurations where `other` encloses this box or where the
    /// boxes cross without any corner inside, so it only works as a quick
    /// accept, never as a rejection.
    pub fn contains_any_corner_of(&self, other: &Aabb) -> bool {
        other.corners().iter().any(|&corner| self.contains_point(corner))
    }

    /// Smallest box enclosing both
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: utils::min(self.min, other.min),
            max: utils::max(self.max, other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb {
        Aabb::from_position_size(Vec2::zeros(), Vec2::new(10.0, 10.0))
    }

    #[test]
    fn test_point_containment_is_exclusive() {
        let aabb = unit_box();

        assert!(aabb.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!aabb.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!aabb.contains_point(Vec2::new(0.0, 5.0)));
        assert!(!aabb.contains_point(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_edge_touching_boxes_do_not_overlap() {
        let a = unit_box();
        let touching = Aabb::from_position_size(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        let overlapping = Aabb::from_position_size(Vec2::new(9.5, 9.5), Vec2::new(5.0, 5.0));

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn test_corner_test_misses_enclosing_box() {
        let small = Aabb::from_position_size(Vec2::new(4.0, 4.0), Vec2::new(2.0, 2.0));
        let large = unit_box();

        assert!(large.contains_any_corner_of(&small));
        assert!(!small.contains_any_corner_of(&large));
        assert!(small.overlaps(&large));
    }

    #[test]
    fn test_union_and_center() {
        let a = unit_box();
        let b = Aabb::from_position_size(Vec2::new(20.0, -5.0), Vec2::new(10.0, 5.0));
        let merged = a.union(&b);

        assert_eq!(merged.min, Vec2::new(0.0, -5.0));
        assert_eq!(merged.max, Vec2::new(30.0, 10.0));
        assert_relative_eq!(merged.center(), Vec2::new(15.0, 2.5));
    }

    #[test]
    fn test_edges_are_closed_loop() {
        let edges = unit_box().edges();

        for i in 0..4 {
            assert_eq!(edges[i].1, edges[(i + 1) % 4].0);
        }
    }
}
