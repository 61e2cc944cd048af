//! Stateless segment intersection routines
//!
//! Used by the shape tests: hitbox edges against circles, and arbitrary
//! segments against hitbox edges.

use crate::foundation::math::{utils, Vec2};

/// Test whether segment `p1 -> p2` intersects the circle at `center`
///
/// Parametrizes the segment as `p1 + t * (p2 - p1)` with `t` in `[0, 1]`
/// and works on the half-b form of the quadratic, so no square root is
/// taken. Covers a segment entering, leaving, or lying entirely inside the
/// circle. Tangency counts as an intersection.
pub fn circle_intersects_segment(center: Vec2, radius: f32, p1: Vec2, p2: Vec2) -> bool {
    let direction = p2 - p1;
    let to_start = p1 - center;

    let a = direction.dot(&direction);
    let half_b = to_start.dot(&direction);
    let c = to_start.dot(&to_start) - radius * radius;

    // Zero-length segment: a point test
    if a == 0.0 {
        return c <= 0.0;
    }

    // Line misses the circle entirely
    if half_b * half_b < a * c {
        return false;
    }

    // Some root at t <= 1, or the end point is inside the circle
    let reaches = -half_b <= a || c + 2.0 * half_b + a <= 0.0;
    // Some root at t >= 0, or the start point is inside the circle
    let starts = half_b <= 0.0 || c <= 0.0;

    reaches && starts
}

/// Test whether segments `a1 -> a2` and `b1 -> b2` intersect
///
/// Collinear overlapping segments and shared end points count as
/// intersecting.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Signed area of the triangle `(origin, end, point)`
fn orientation(origin: Vec2, end: Vec2, point: Vec2) -> f32 {
    utils::cross(end - origin, point - origin)
}

/// Whether a point known to be collinear with the segment lies within it
fn on_segment(start: Vec2, end: Vec2, point: Vec2) -> bool {
    point.x >= start.x.min(end.x)
        && point.x <= start.x.max(end.x)
        && point.y >= start.y.min(end.y)
        && point.y <= start.y.max(end.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_crossing_circle() {
        let center = Vec2::new(0.0, 0.0);

        assert!(circle_intersects_segment(center, 5.0, Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)));
        assert!(!circle_intersects_segment(center, 5.0, Vec2::new(-10.0, 6.0), Vec2::new(10.0, 6.0)));
    }

    #[test]
    fn test_segment_tangent_to_circle() {
        let center = Vec2::new(15.0, 5.0);

        // Right edge of a 10x10 box at the origin, circle touching it
        assert!(circle_intersects_segment(center, 5.0, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)));
        assert!(!circle_intersects_segment(Vec2::new(15.5, 5.0), 5.0, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_segment_fully_inside_circle() {
        assert!(circle_intersects_segment(
            Vec2::zeros(),
            10.0,
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn test_segment_pointing_away_from_circle() {
        let center = Vec2::zeros();

        // The infinite line passes through the circle, the segment stops short
        assert!(!circle_intersects_segment(center, 2.0, Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0)));
        assert!(!circle_intersects_segment(center, 2.0, Vec2::new(-10.0, 0.0), Vec2::new(-5.0, 0.0)));
        // One end inside
        assert!(circle_intersects_segment(center, 2.0, Vec2::new(1.0, 0.0), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_degenerate_segment_is_a_point() {
        let center = Vec2::zeros();

        assert!(circle_intersects_segment(center, 2.0, Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)));
        assert!(!circle_intersects_segment(center, 2.0, Vec2::new(3.0, 0.0), Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_crossing_segments() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        ));
    }

    #[test]
    fn test_touching_and_collinear_segments() {
        // Shared end point
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 5.0),
        ));
        // Collinear overlap
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(8.0, 0.0),
        ));
        // Collinear, disjoint
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(8.0, 0.0),
        ));
    }
}
