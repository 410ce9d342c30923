//! Platform terrain: immutable line segments classified by slope.
//!
//! Classification follows the sign of the run (Δx):
//! - positive run: a floor the player can stand on
//! - negative run: an inverted platform, acting only as a ceiling
//! - zero run: a vertical wall
//!
//! Platforms never change after construction; everything else in the
//! simulation treats them as read-only geometry.

use recoil_common::{Segment, Vec2};
use serde::{Deserialize, Serialize};

/// How a platform interacts with bodies, derived from its run sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Positive run: supports the player from above.
    Floor,
    /// Negative run: blocks upward motion only.
    Ceiling,
    /// Zero run: blocks horizontal motion.
    Wall,
}

impl Orientation {
    /// Whether a body can land and rest on this platform.
    #[must_use]
    pub const fn supports(self) -> bool {
        matches!(self, Self::Floor)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Wall => "wall",
        }
    }

    /// All orientations.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Floor, Self::Ceiling, Self::Wall]
    }
}

/// An immutable terrain segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    segment: Segment,
    orientation: Orientation,
}

impl Platform {
    /// Builds a platform from segment endpoints.
    ///
    /// Returns `None` for degenerate (zero-length) or non-finite segments;
    /// level validation turns that into a typed error with the index.
    #[must_use]
    pub fn new(start: Vec2, end: Vec2) -> Option<Self> {
        if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite()) {
            return None;
        }
        let segment = Segment::new(start, end);
        if segment.length_sq() <= 0.0 {
            return None;
        }
        let run = segment.run();
        let orientation = if run > 0.0 {
            Orientation::Floor
        } else if run < 0.0 {
            Orientation::Ceiling
        } else {
            Orientation::Wall
        };
        Some(Self {
            segment,
            orientation,
        })
    }

    /// The underlying segment.
    #[must_use]
    pub const fn segment(&self) -> Segment {
        self.segment
    }

    /// How this platform interacts with bodies.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Vertical extent, end y minus start y.
    #[must_use]
    pub fn rise(&self) -> f32 {
        self.segment.rise()
    }

    /// Horizontal extent, end x minus start x.
    #[must_use]
    pub fn run(&self) -> f32 {
        self.segment.run()
    }

    /// The normal on the walkable side.
    #[must_use]
    pub fn directed_normal(&self) -> Vec2 {
        self.segment.directed_normal()
    }

    /// Whether `x` lies within the platform's horizontal extent, inclusive.
    #[must_use]
    pub fn contains_x(&self, x: f32) -> bool {
        let (lo, hi) = if self.segment.start.x <= self.segment.end.x {
            (self.segment.start.x, self.segment.end.x)
        } else {
            (self.segment.end.x, self.segment.start.x)
        };
        (lo..=hi).contains(&x)
    }

    /// Whether `y` lies within the platform's vertical extent, inclusive.
    #[must_use]
    pub fn contains_y(&self, y: f32) -> bool {
        let (lo, hi) = if self.segment.start.y <= self.segment.end.y {
            (self.segment.start.y, self.segment.end.y)
        } else {
            (self.segment.end.y, self.segment.start.y)
        };
        (lo..=hi).contains(&y)
    }

    /// The y on the platform's line at `x`. `None` for vertical walls
    /// (zero run), which have no single y per x.
    #[must_use]
    pub fn y_for_x(&self, x: f32) -> Option<f32> {
        let run = self.run();
        if run == 0.0 {
            return None;
        }
        let t = (x - self.segment.start.x) / run;
        Some(self.segment.start.y + t * self.rise())
    }

    /// The x on the platform's line at `y`. `None` for horizontal platforms
    /// (zero rise), which have no single x per y.
    #[must_use]
    pub fn x_for_y(&self, y: f32) -> Option<f32> {
        let rise = self.rise();
        if rise == 0.0 {
            return None;
        }
        let t = (y - self.segment.start.y) / rise;
        Some(self.segment.start.x + t * self.run())
    }

    /// The intersection of a travel path with this platform, if any.
    #[must_use]
    pub fn intersect(&self, path: Segment) -> Option<Vec2> {
        self.segment.intersect(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_by_run_sign() {
        let floor = Platform::new(Vec2::new(0.0, 150.0), Vec2::new(200.0, 150.0)).unwrap();
        assert_eq!(floor.orientation(), Orientation::Floor);
        assert!(floor.orientation().supports());

        let ceiling = Platform::new(Vec2::new(200.0, 50.0), Vec2::new(0.0, 50.0)).unwrap();
        assert_eq!(ceiling.orientation(), Orientation::Ceiling);
        assert!(!ceiling.orientation().supports());

        let wall = Platform::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 300.0)).unwrap();
        assert_eq!(wall.orientation(), Orientation::Wall);
        assert!(!wall.orientation().supports());
    }

    #[test]
    fn test_degenerate_rejected() {
        let p = Vec2::new(5.0, 5.0);
        assert!(Platform::new(p, p).is_none());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Platform::new(Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 0.0)).is_none());
        assert!(Platform::new(Vec2::ZERO, Vec2::new(f32::INFINITY, 0.0)).is_none());
    }

    #[test]
    fn test_y_for_x_flat() {
        let floor = Platform::new(Vec2::new(0.0, 150.0), Vec2::new(200.0, 150.0)).unwrap();
        assert_eq!(floor.y_for_x(50.0), Some(150.0));
        assert_eq!(floor.x_for_y(150.0), None);
    }

    #[test]
    fn test_y_for_x_slope() {
        let slope = Platform::new(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)).unwrap();
        assert_eq!(slope.y_for_x(50.0), Some(50.0));
        assert_eq!(slope.x_for_y(25.0), Some(75.0));
    }

    #[test]
    fn test_wall_has_no_y_per_x() {
        let wall = Platform::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 300.0)).unwrap();
        assert_eq!(wall.y_for_x(100.0), None);
        assert_eq!(wall.x_for_y(150.0), Some(100.0));
    }

    #[test]
    fn test_extent_checks() {
        let ceiling = Platform::new(Vec2::new(200.0, 50.0), Vec2::new(0.0, 50.0)).unwrap();
        assert!(ceiling.contains_x(0.0));
        assert!(ceiling.contains_x(120.0));
        assert!(!ceiling.contains_x(200.1));
        assert!(ceiling.contains_y(50.0));
        assert!(!ceiling.contains_y(49.0));
    }

    #[test]
    fn test_floor_normal_points_up() {
        let floor = Platform::new(Vec2::new(0.0, 150.0), Vec2::new(200.0, 150.0)).unwrap();
        assert_eq!(floor.directed_normal(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_intersect_path() {
        let floor = Platform::new(Vec2::new(0.0, 150.0), Vec2::new(200.0, 150.0)).unwrap();
        let fall = Segment::new(Vec2::new(80.0, 100.0), Vec2::new(80.0, 200.0));
        assert_eq!(floor.intersect(fall), Some(Vec2::new(80.0, 150.0)));
    }
}
