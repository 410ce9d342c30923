//! Terrain: the platform list and the queries collision resolution uses.
//!
//! `Terrain` is handed to the player and rockets as a read-only capability;
//! nothing in the simulation mutates platforms after level load.

use recoil_common::{PlatformId, Segment, Vec2};

use crate::platform::{Orientation, Platform};

/// A platform crossed by a travel path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformHit {
    /// Which platform was hit.
    pub id: PlatformId,
    /// The intersection point.
    pub point: Vec2,
    /// Squared distance from the path start to the intersection.
    pub distance_sq: f32,
}

/// All platforms of the loaded level.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    platforms: Vec<Platform>,
}

impl Terrain {
    /// Builds terrain from validated platforms.
    #[must_use]
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self { platforms }
    }

    /// All platforms, indexable by `PlatformId`.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Looks up a platform by id.
    #[must_use]
    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id.index())
    }

    /// Number of platforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// Whether the terrain has no platforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// The platform intersection closest to `path.start` along the path,
    /// excluding `skip`. Ties keep the first platform found.
    #[must_use]
    pub fn closest_intersection(
        &self,
        path: Segment,
        skip: Option<PlatformId>,
    ) -> Option<PlatformHit> {
        let mut best: Option<PlatformHit> = None;
        for (index, platform) in self.platforms.iter().enumerate() {
            if skip.is_some_and(|s| s.index() == index) {
                continue;
            }
            let Some(point) = platform.intersect(path) else {
                continue;
            };
            let distance_sq = point.distance_sq(path.start);
            let closer = match &best {
                None => true,
                Some(hit) => distance_sq < hit.distance_sq,
            };
            if closer {
                best = Some(PlatformHit {
                    id: PlatformId::from_index(index),
                    point,
                    distance_sq,
                });
            }
        }
        best
    }

    /// The tightest horizontal clamp for a body of half-width `radius`
    /// centered at `center`, moving toward the sign of `direction`.
    ///
    /// Considers walls and slopes (nonzero rise) whose vertical extent
    /// contains `center.y`, within `radius` on the moving side. Returns the
    /// clamped center x, or `None` when nothing binds. Zero direction never
    /// binds.
    #[must_use]
    pub fn wall_check(&self, center: Vec2, radius: f32, direction: f32) -> Option<f32> {
        if direction == 0.0 {
            return None;
        }
        let mut bound: Option<f32> = None;
        for platform in &self.platforms {
            if platform.rise() == 0.0 || !platform.contains_y(center.y) {
                continue;
            }
            let Some(wall_x) = platform.x_for_y(center.y) else {
                continue;
            };
            if direction > 0.0 {
                if wall_x >= center.x && wall_x <= center.x + radius {
                    let clamped = wall_x - radius;
                    bound = Some(match bound {
                        None => clamped,
                        Some(b) => b.min(clamped),
                    });
                }
            } else if wall_x <= center.x && wall_x >= center.x - radius {
                let clamped = wall_x + radius;
                bound = Some(match bound {
                    None => clamped,
                    Some(b) => b.max(clamped),
                });
            }
        }
        bound
    }

    /// The corrected feet y for a body whose head crossed a ceiling, or
    /// `None` when no ceiling binds.
    ///
    /// Considers inverted platforms whose horizontal extent contains `x`.
    /// A ceiling binds when its line at `x` falls inside the body span
    /// `(bottom - height, bottom]`; the lowest such ceiling (greatest y)
    /// wins and the feet are placed at `ceiling + height`.
    #[must_use]
    pub fn ceiling_check(&self, x: f32, bottom: f32, height: f32) -> Option<f32> {
        let head = bottom - height;
        let mut lowest: Option<f32> = None;
        for platform in &self.platforms {
            if platform.orientation() != Orientation::Ceiling || !platform.contains_x(x) {
                continue;
            }
            let Some(ceiling_y) = platform.y_for_x(x) else {
                continue;
            };
            if ceiling_y > head && ceiling_y <= bottom {
                lowest = Some(match lowest {
                    None => ceiling_y,
                    Some(b) => b.max(ceiling_y),
                });
            }
        }
        lowest.map(|y| y + height)
    }
}
