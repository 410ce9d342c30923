//! Line segments and the geometric queries collision is built from.

use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// Cross products smaller than this are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// The closest point on the segment.
    pub point: Vec2,
    /// True when the projection fell at or beyond an endpoint.
    pub at_end: bool,
}

/// A directed line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Vec2,
    /// End point.
    pub end: Vec2,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// The vector from start to end.
    #[must_use]
    pub fn delta(self) -> Vec2 {
        self.end - self.start
    }

    /// Vertical extent, end y minus start y.
    #[must_use]
    pub fn rise(self) -> f32 {
        self.end.y - self.start.y
    }

    /// Horizontal extent, end x minus start x.
    #[must_use]
    pub fn run(self) -> f32 {
        self.end.x - self.start.x
    }

    /// Segment length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.delta().length()
    }

    /// Squared segment length.
    #[must_use]
    pub fn length_sq(self) -> f32 {
        self.delta().length_sq()
    }

    /// The point on the segment closest to `point`, with a flag marking a
    /// projection that fell at or beyond an endpoint.
    ///
    /// A degenerate (zero-length) segment reports its start point, at end.
    #[must_use]
    pub fn closest_point(self, point: Vec2) -> ClosestPoint {
        let delta = self.delta();
        let len_sq = delta.length_sq();
        if len_sq <= 0.0 {
            return ClosestPoint {
                point: self.start,
                at_end: true,
            };
        }
        let t = (point - self.start).dot(delta) / len_sq;
        let clamped = t.clamp(0.0, 1.0);
        ClosestPoint {
            point: self.start + delta * clamped,
            at_end: t <= 0.0 || t >= 1.0,
        }
    }

    /// The intersection point of two segments, if they cross within both
    /// extents. Parallel (including collinear) segments yield none.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Vec2> {
        let d1 = self.delta();
        let d2 = other.delta();
        let denom = d1.x * d2.y - d1.y * d2.x;
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let offset = other.start - self.start;
        let t = (offset.x * d2.y - offset.y * d2.x) / denom;
        let u = (offset.x * d1.y - offset.y * d1.x) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.start + d1 * t)
        } else {
            None
        }
    }

    /// The normal on the walkable side: `(rise, -run)` normalized. For a
    /// left-to-right floor this points up. Zero for degenerate segments.
    #[must_use]
    pub fn directed_normal(self) -> Vec2 {
        Vec2::new(self.rise(), -self.run()).normalized()
    }

    /// Lengthens the segment by `amount` past its end, along its direction.
    /// No-op on degenerate segments.
    pub fn extend_at_end(&mut self, amount: f32) {
        let direction = self.delta().normalized();
        if direction != Vec2::ZERO {
            self.end.add_scaled(direction, amount);
        }
    }

    /// Lengthens the segment by `amount` past both endpoints.
    /// No-op on degenerate segments.
    pub fn extend_both(&mut self, amount: f32) {
        let direction = self.delta().normalized();
        if direction != Vec2::ZERO {
            self.start.add_scaled(direction, -amount);
            self.end.add_scaled(direction, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Segment {
        Segment::new(Vec2::new(0.0, 150.0), Vec2::new(200.0, 150.0))
    }

    #[test]
    fn test_rise_run() {
        let s = Segment::new(Vec2::new(10.0, 20.0), Vec2::new(40.0, 5.0));
        assert!((s.run() - 30.0).abs() < f32::EPSILON);
        assert!((s.rise() + 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_closest_point_interior() {
        let c = horizontal().closest_point(Vec2::new(50.0, 100.0));
        assert_eq!(c.point, Vec2::new(50.0, 150.0));
        assert!(!c.at_end);
    }

    #[test]
    fn test_closest_point_beyond_end() {
        let c = horizontal().closest_point(Vec2::new(250.0, 160.0));
        assert_eq!(c.point, Vec2::new(200.0, 150.0));
        assert!(c.at_end);
    }

    #[test]
    fn test_closest_point_before_start() {
        let c = horizontal().closest_point(Vec2::new(-30.0, 140.0));
        assert_eq!(c.point, Vec2::new(0.0, 150.0));
        assert!(c.at_end);
    }

    #[test]
    fn test_closest_point_degenerate() {
        let p = Vec2::new(7.0, 7.0);
        let c = Segment::new(p, p).closest_point(Vec2::new(0.0, 0.0));
        assert_eq!(c.point, p);
        assert!(c.at_end);
    }

    #[test]
    fn test_intersect_crossing() {
        let falling = Segment::new(Vec2::new(50.0, 100.0), Vec2::new(50.0, 200.0));
        let hit = horizontal().intersect(falling);
        assert_eq!(hit, Some(Vec2::new(50.0, 150.0)));
    }

    #[test]
    fn test_intersect_symmetric() {
        let falling = Segment::new(Vec2::new(50.0, 100.0), Vec2::new(50.0, 200.0));
        assert_eq!(horizontal().intersect(falling), falling.intersect(horizontal()));
    }

    #[test]
    fn test_intersect_disjoint() {
        let above = Segment::new(Vec2::new(50.0, 100.0), Vec2::new(50.0, 140.0));
        assert_eq!(horizontal().intersect(above), None);
    }

    #[test]
    fn test_intersect_parallel() {
        let offset = Segment::new(Vec2::new(0.0, 140.0), Vec2::new(200.0, 140.0));
        assert_eq!(horizontal().intersect(offset), None);
    }

    #[test]
    fn test_directed_normal_floor_points_up() {
        assert_eq!(horizontal().directed_normal(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_directed_normal_slope() {
        let slope = Segment::new(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0));
        let n = slope.directed_normal();
        // Outward of an uphill floor tilts up and left of travel.
        assert!(n.y < 0.0);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extend_at_end() {
        let mut s = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        s.extend_at_end(25.0);
        assert_eq!(s.start, Vec2::new(0.0, 0.0));
        assert_eq!(s.end, Vec2::new(35.0, 0.0));
    }

    #[test]
    fn test_extend_both() {
        let mut s = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        s.extend_both(5.0);
        assert_eq!(s.start, Vec2::new(-5.0, 0.0));
        assert_eq!(s.end, Vec2::new(15.0, 0.0));
    }

    #[test]
    fn test_extend_degenerate_is_noop() {
        let p = Vec2::new(3.0, 4.0);
        let mut s = Segment::new(p, p);
        s.extend_at_end(25.0);
        s.extend_both(5.0);
        assert_eq!(s, Segment::new(p, p));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_vec2() -> impl Strategy<Value = Vec2> {
            (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Vec2::new(x, y))
        }

        proptest! {
            #[test]
            fn closest_point_beats_endpoints(
                a in arb_vec2(), b in arb_vec2(), p in arb_vec2()
            ) {
                let c = Segment::new(a, b).closest_point(p);
                let slack = 1e-3;
                prop_assert!(c.point.distance(p) <= a.distance(p) + slack);
                prop_assert!(c.point.distance(p) <= b.distance(p) + slack);
            }

            #[test]
            fn intersection_is_symmetric(
                a in arb_vec2(), b in arb_vec2(), c in arb_vec2(), d in arb_vec2()
            ) {
                let s1 = Segment::new(a, b);
                let s2 = Segment::new(c, d);
                prop_assert_eq!(s1.intersect(s2).is_some(), s2.intersect(s1).is_some());
            }

            #[test]
            fn directed_normal_is_unit_or_zero(a in arb_vec2(), b in arb_vec2()) {
                let n = Segment::new(a, b).directed_normal();
                let len = n.length();
                prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
            }
        }
    }
}
