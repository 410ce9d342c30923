//! Player: an explicit-Euler point mass that moves by rocket recoil.
//!
//! The player has no walk input. All locomotion comes from gravity and
//! from blast forces its own rockets feed back into its acceleration.
//! Collision is resolved against the tick's travel path, never the
//! endpoint alone, so fast motion cannot step over a platform.

use recoil_common::{PlatformId, Segment, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enemy::Enemy;
use crate::events::{EventBus, SimEvent};
use crate::input::TickInput;
use crate::rocket::{BlastAccumulator, Rocket, RocketTuning};
use crate::terrain::Terrain;

/// Sweep passes per tick before resolution gives up.
const MAX_RESOLVE_PASSES: usize = 8;

// ============================================================================
// States
// ============================================================================

/// What holds the player up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Standing on, or sliding along, a platform.
    Grounded {
        /// The supporting platform.
        platform: PlatformId,
    },
    /// Ballistic; nothing underfoot.
    Airborne,
}

impl Support {
    /// Whether the player has a platform underfoot.
    #[must_use]
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Grounded { .. })
    }

    /// Whether the player is in the air.
    #[must_use]
    pub fn is_airborne(self) -> bool {
        matches!(self, Self::Airborne)
    }

    /// The supporting platform, if grounded.
    #[must_use]
    pub fn platform(self) -> Option<PlatformId> {
        match self {
            Self::Grounded { platform } => Some(platform),
            Self::Airborne => None,
        }
    }
}

/// Player lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vitality {
    /// Simulating normally.
    Alive,
    /// Death sequence playing. Physics continues; fire input is ignored.
    Exploding {
        /// Milliseconds of playback elapsed.
        elapsed_ms: f32,
    },
    /// Sequence complete. The player no longer simulates.
    Dead,
}

impl Vitality {
    /// Whether the player acts and can be attacked.
    #[must_use]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Whether the death sequence has finished.
    #[must_use]
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// An active teleport blend toward a portal destination.
///
/// The world starts and paces the blend; the player only consumes it,
/// converging its feet toward the destination as `remaining` runs 1 → 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Teleport {
    /// Feet destination.
    pub destination: Vec2,
    /// Remaining blend fraction, 1 → 0.
    pub remaining: f32,
}

// ============================================================================
// Tuning
// ============================================================================

/// Player physics tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Body height in pixels; the centroid sits half this above the feet.
    pub height: f32,
    /// Body width in pixels, for wall clamping.
    pub width: f32,
    /// Horizontal damping per millisecond while airborne.
    pub wind_resistance: f32,
    /// Horizontal damping per millisecond while grounded.
    pub ground_friction: f32,
    /// Gun pivot height above the feet.
    pub gun_pivot_height: f32,
    /// Muzzle x offset from the feet.
    pub muzzle_offset_x: f32,
    /// Aim-to-velocity scale for launches.
    pub launch_scale: f32,
    /// Death sequence length in milliseconds.
    pub explosion_duration_ms: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            height: 100.0,
            width: 50.0,
            wind_resistance: 0.005,
            ground_friction: 0.015,
            gun_pivot_height: 55.5,
            muzzle_offset_x: 5.0,
            launch_scale: 0.01,
            explosion_duration_ms: 640.0,
        }
    }
}

// ============================================================================
// Player
// ============================================================================

/// The player entity.
#[derive(Debug, Clone)]
pub struct Player {
    /// Feet position.
    location: Vec2,
    /// Body center, half the height above the feet.
    centroid: Vec2,
    velocity: Vec2,
    /// Per-tick force accumulator; rebuilt from blasts plus gravity.
    acceleration: Vec2,
    /// This tick's travel, from pre-integration to post-integration feet.
    path: Segment,
    support: Support,
    vitality: Vitality,
    gun_angle: f32,
    rockets: Vec<Rocket>,
    tuning: PlayerTuning,
    rocket_tuning: RocketTuning,
}

impl Player {
    /// Creates a player at a spawn point, airborne until the first sweep
    /// finds ground.
    #[must_use]
    pub fn new(spawn: Vec2) -> Self {
        let tuning = PlayerTuning::default();
        Self {
            location: spawn,
            centroid: Vec2::new(spawn.x, spawn.y - tuning.height * 0.5),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            path: Segment::new(spawn, spawn),
            support: Support::Airborne,
            vitality: Vitality::Alive,
            gun_angle: 0.0,
            rockets: Vec::new(),
            tuning,
            rocket_tuning: RocketTuning::default(),
        }
    }

    /// This player with different physics tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: PlayerTuning) -> Self {
        self.tuning = tuning;
        self.update_centroid();
        self
    }

    /// This player with different rocket tuning for its launches.
    #[must_use]
    pub fn with_rocket_tuning(mut self, tuning: RocketTuning) -> Self {
        self.rocket_tuning = tuning;
        self
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// Feet position.
    #[must_use]
    pub const fn location(&self) -> Vec2 {
        self.location
    }

    /// Body center.
    #[must_use]
    pub const fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Support state.
    #[must_use]
    pub const fn support(&self) -> Support {
        self.support
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn vitality(&self) -> Vitality {
        self.vitality
    }

    /// Whether the player acts and can be attacked.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.vitality.is_alive()
    }

    /// Death sequence fraction while exploding, 0 to 1.
    #[must_use]
    pub fn explosion_progress(&self) -> Option<f32> {
        match self.vitality {
            Vitality::Exploding { elapsed_ms } => {
                Some(elapsed_ms / self.tuning.explosion_duration_ms)
            }
            _ => None,
        }
    }

    /// Gun orientation in radians, tracking the aim input.
    #[must_use]
    pub const fn gun_angle(&self) -> f32 {
        self.gun_angle
    }

    /// Rockets in flight or detonating.
    #[must_use]
    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// The gun muzzle, offset from the feet.
    #[must_use]
    pub fn muzzle(&self) -> Vec2 {
        self.location
            + Vec2::new(
                self.tuning.muzzle_offset_x,
                -self.tuning.gun_pivot_height,
            )
    }

    /// Physics tuning.
    #[must_use]
    pub const fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Starts the death sequence. Returns true if the player was alive.
    pub fn kill(&mut self) -> bool {
        if self.vitality.is_alive() {
            debug!("player killed");
            self.vitality = Vitality::Exploding { elapsed_ms: 0.0 };
            true
        } else {
            false
        }
    }

    /// Advances the player one tick: aim and fire, rockets, then physics.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        input: &TickInput,
        gravity: Vec2,
        terrain: &Terrain,
        enemies: &mut [Enemy],
        teleport: Option<Teleport>,
        events: &EventBus,
    ) {
        match self.vitality {
            Vitality::Dead => return,
            Vitality::Exploding { elapsed_ms } => {
                let next = elapsed_ms + dt;
                if next >= self.tuning.explosion_duration_ms {
                    self.vitality = Vitality::Dead;
                    return;
                }
                self.vitality = Vitality::Exploding { elapsed_ms: next };
            }
            Vitality::Alive => {}
        }

        if self.vitality.is_alive() {
            self.update_aim(input, teleport, events);
        }

        // Rockets run first and feed the accumulator; the total becomes
        // this tick's non-gravity acceleration, consumed by the
        // integration below. Injection is deferred, never retroactive.
        self.update_centroid();
        let mut accumulator = BlastAccumulator::new();
        for rocket in &mut self.rockets {
            rocket.update(
                dt,
                gravity,
                input.fire,
                terrain,
                enemies,
                self.centroid,
                &mut accumulator,
                events,
            );
        }
        self.rockets.retain(|rocket| !rocket.is_spent());
        self.acceleration = accumulator.take();

        self.integrate(dt, gravity, terrain, teleport);
    }

    // ------------------------------------------------------------------
    // Aim and fire
    // ------------------------------------------------------------------

    fn update_aim(&mut self, input: &TickInput, teleport: Option<Teleport>, events: &EventBus) {
        let muzzle = self.muzzle();
        let direction = (input.aim_world_pos - muzzle) * self.tuning.launch_scale;
        if direction != Vec2::ZERO {
            self.gun_angle = direction.angle();
        }
        // No launches mid-teleport; the fuse of rockets already out is
        // unaffected.
        if input.fire_just_pressed && teleport.is_none() {
            debug!(angle = self.gun_angle, "rocket launched");
            events.publish(SimEvent::RocketLaunched {
                origin: muzzle,
                velocity: direction,
            });
            self.rockets
                .push(Rocket::new(muzzle, direction, self.rocket_tuning));
        }
    }

    // ------------------------------------------------------------------
    // Physics
    // ------------------------------------------------------------------

    fn integrate(&mut self, dt: f32, gravity: Vec2, terrain: &Terrain, teleport: Option<Teleport>) {
        self.acceleration += gravity;
        self.path.start = self.location;
        self.velocity.add_scaled(self.acceleration, dt);

        // Wall pre-clamp: horizontal velocity that would enter a wall
        // this tick is zeroed before the move.
        self.update_centroid();
        let half_width = self.tuning.width * 0.5;
        if terrain
            .wall_check(self.centroid, half_width, self.velocity.x)
            .is_some()
        {
            self.velocity.x = 0.0;
        }

        self.location.add_scaled(self.velocity, dt);

        if let Some(blend) = teleport {
            // Converge the feet toward the destination as the blend runs out.
            let f = blend.remaining.clamp(0.0, 1.0);
            self.location = self.location * f + blend.destination * (1.0 - f);
        }

        let mut skip: Option<PlatformId> = None;
        let mut run_sweep = true;

        if let Support::Grounded { platform } = self.support {
            match terrain.get(platform) {
                None => self.support = Support::Airborne,
                Some(p) => {
                    let normal = p.directed_normal();
                    if normal.dot(self.velocity) > 0.0 {
                        // Moving off the surface: own velocity or a blast
                        // pushed the player away. Release support.
                        self.support = Support::Airborne;
                        skip = Some(platform);
                    } else {
                        let offset_x = self.location.x - self.path.start.x;
                        if offset_x == 0.0 {
                            // At rest: undo the gravity dip, stay put.
                            self.location.y = self.path.start.y;
                            self.velocity = Vec2::ZERO;
                            run_sweep = false;
                        } else {
                            let closest = p.segment().closest_point(self.location);
                            if closest.at_end {
                                // Slid past the end of the segment: release
                                // support, keep position and velocity.
                                self.support = Support::Airborne;
                                skip = Some(platform);
                            } else {
                                // Slide along the surface. The sweep still
                                // runs: the slide may have crossed another
                                // platform.
                                self.location = closest.point;
                                skip = Some(platform);
                            }
                        }
                    }
                }
            }
        }

        self.path.end = self.location;

        if run_sweep {
            self.sweep(terrain, skip);
        }

        if self.support.is_airborne() {
            if let Some(feet) =
                terrain.ceiling_check(self.location.x, self.location.y, self.tuning.height)
            {
                // Head bonk: push the feet back below the ceiling. Velocity
                // is kept; gravity wins next tick.
                self.location.y = feet;
                self.path.end.y = feet;
            }
        }

        let damping = match self.support {
            Support::Airborne => self.tuning.wind_resistance,
            Support::Grounded { .. } => self.tuning.ground_friction,
        };
        self.velocity.x *= 1.0 - damping * dt;

        self.update_centroid();
    }

    /// Resolve-and-recheck: intersect the travel path with platforms until
    /// nothing binds, landing on the first floor crossed.
    fn sweep(&mut self, terrain: &Terrain, mut skip: Option<PlatformId>) {
        for _ in 0..MAX_RESOLVE_PASSES {
            self.update_centroid();
            self.wall_bound(terrain);

            let Some(hit) = terrain.closest_intersection(self.path, skip) else {
                return;
            };
            let Some(platform) = terrain.get(hit.id) else {
                return;
            };

            if platform.orientation().supports() {
                self.support = Support::Grounded { platform: hit.id };
                self.velocity = Vec2::ZERO;
                self.location = hit.point;
                self.path.end = self.location;
                return;
            }

            // Wall or ceiling: clamp horizontally, exclude it, and keep
            // checking while vertical motion continues.
            self.location.x = hit.point.x;
            self.path.end.x = hit.point.x;
            skip = Some(hit.id);
            if self.velocity.y == 0.0 {
                self.update_centroid();
                self.wall_bound(terrain);
                return;
            }
        }
    }

    /// Applies the horizontal wall clamp to position, path, and motion.
    fn wall_bound(&mut self, terrain: &Terrain) {
        let offset = self.path.end.x - self.path.start.x;
        let half_width = self.tuning.width * 0.5;
        if let Some(bound) = terrain.wall_check(self.centroid, half_width, offset) {
            self.location.x = bound;
            self.path.end.x = bound;
            self.velocity.x = 0.0;
            self.acceleration.x = 0.0;
        }
    }

    fn update_centroid(&mut self) {
        self.centroid = Vec2::new(self.location.x, self.location.y - self.tuning.height * 0.5);
    }
}
