//! Rockets: thrust-decaying projectiles and their drifting detonations.
//!
//! A rocket flies under gravity plus a thrust that decays every tick, and
//! detonates on the first of: platform contact, fuse release, or passing
//! within an enemy's body radius. A detonation is not a point event: the
//! blast center drifts under residual velocity (re-clamped against terrain)
//! while its radial force plays out over a fixed duration, pushing the
//! player and pushing or killing enemies.

use recoil_common::{Segment, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enemy::Enemy;
use crate::events::{EventBus, SimEvent};
use crate::terrain::Terrain;

/// Below this squared distance a blast has no direction and exerts nothing.
const BLAST_EPSILON: f32 = 1e-6;

// ============================================================================
// Tuning
// ============================================================================

/// Flight and blast tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocketTuning {
    /// Warhead probe length in pixels past the nose.
    pub length: f32,
    /// Thrust magnitude at launch.
    pub initial_thrust: f32,
    /// Thrust decay rate; each tick `thrust *= dt * thrust_decay`.
    pub thrust_decay: f32,
    /// Detonation playback length in milliseconds.
    pub detonation_duration_ms: f32,
    /// Blast strength numerator.
    pub blast_strength: f32,
    /// Drag on a drifting blast center, per millisecond.
    pub blast_drag: f32,
    /// Cap on the applied blast force magnitude.
    pub max_blast_force: f32,
    /// Uncapped strength above which a living enemy dies outright.
    /// Kept below the force cap so the threshold is reachable.
    pub fatal_blast: f32,
    /// Drift longer than this re-probes terrain.
    pub drift_probe_threshold: f32,
    /// Symmetric probe extension while drifting.
    pub drift_probe_extension: f32,
}

impl Default for RocketTuning {
    fn default() -> Self {
        Self {
            length: 25.0,
            initial_thrust: 0.02,
            thrust_decay: 0.025,
            detonation_duration_ms: 640.0,
            blast_strength: 400.0,
            blast_drag: 0.015,
            max_blast_force: 0.03,
            fatal_blast: 0.02,
            drift_probe_threshold: 0.5,
            drift_probe_extension: 5.0,
        }
    }
}

// ============================================================================
// Rocket
// ============================================================================

/// Rocket lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RocketPhase {
    /// Under thrust and gravity, fuse lit.
    Flying,
    /// Blast playing back at (and drifting from) the contact point.
    Detonated {
        /// Blast center.
        contact: Vec2,
        /// Milliseconds of playback elapsed.
        elapsed_ms: f32,
    },
}

/// Collects the blast forces aimed at the player during one tick.
///
/// Rockets are owned by the player, so they cannot write the player's
/// acceleration while being iterated; the player takes the total afterwards
/// and folds it into the same tick's integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlastAccumulator {
    total: Vec2,
}

impl BlastAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a force.
    pub fn push(&mut self, force: Vec2) {
        self.total += force;
    }

    /// Returns the accumulated force and resets to zero.
    pub fn take(&mut self) -> Vec2 {
        let total = self.total;
        self.total = Vec2::ZERO;
        total
    }

    /// The accumulated force so far.
    #[must_use]
    pub const fn total(&self) -> Vec2 {
        self.total
    }
}

/// A sampled blast at one target point.
struct BlastSample {
    /// Capped, directed force.
    force: Vec2,
    /// Uncapped strength, for the fatal check.
    strength: f32,
}

/// One rocket, flying or detonating.
#[derive(Debug, Clone)]
pub struct Rocket {
    location: Vec2,
    velocity: Vec2,
    thrust: f32,
    path: Segment,
    phase: RocketPhase,
    tuning: RocketTuning,
}

impl Rocket {
    /// Launches a rocket.
    #[must_use]
    pub fn new(location: Vec2, velocity: Vec2, tuning: RocketTuning) -> Self {
        Self {
            location,
            velocity,
            thrust: tuning.initial_thrust,
            path: Segment::new(location, location),
            phase: RocketPhase::Flying,
            tuning,
        }
    }

    /// Nose position while flying; last flight position after detonation.
    #[must_use]
    pub const fn location(&self) -> Vec2 {
        self.location
    }

    /// Current velocity (residual drift once detonated).
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> RocketPhase {
        self.phase
    }

    /// Whether the rocket is still flying.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        matches!(self.phase, RocketPhase::Flying)
    }

    /// Orientation angle from the velocity, radians.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.velocity.angle()
    }

    /// Blast center once detonated.
    #[must_use]
    pub fn contact(&self) -> Option<Vec2> {
        match self.phase {
            RocketPhase::Detonated { contact, .. } => Some(contact),
            RocketPhase::Flying => None,
        }
    }

    /// Detonation playback fraction once detonated, 0 to 1.
    #[must_use]
    pub fn detonation_progress(&self) -> Option<f32> {
        match self.phase {
            RocketPhase::Detonated { elapsed_ms, .. } => {
                Some((elapsed_ms / self.tuning.detonation_duration_ms).min(1.0))
            }
            RocketPhase::Flying => None,
        }
    }

    /// Whether the detonation has played out; the owner drops spent rockets
    /// after its update loop.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        matches!(
            self.phase,
            RocketPhase::Detonated { elapsed_ms, .. }
                if elapsed_ms >= self.tuning.detonation_duration_ms
        )
    }

    /// Advances the rocket one tick.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        gravity: Vec2,
        fuse_held: bool,
        terrain: &Terrain,
        enemies: &mut [Enemy],
        player_centroid: Vec2,
        accumulator: &mut BlastAccumulator,
        events: &EventBus,
    ) {
        match self.phase {
            RocketPhase::Flying => self.fly(dt, gravity, fuse_held, terrain, enemies, events),
            RocketPhase::Detonated { .. } => {
                self.burn(dt, terrain, enemies, player_centroid, accumulator, events);
            }
        }
    }

    /// The radial blast force this rocket exerts at `target` right now.
    /// Zero while flying, at the exact blast center, and at or past
    /// playback completion.
    #[must_use]
    pub fn blast_force_at(&self, target: Vec2) -> Vec2 {
        match self.phase {
            RocketPhase::Detonated { contact, elapsed_ms } => {
                let progress = elapsed_ms / self.tuning.detonation_duration_ms;
                self.sample_blast(contact, progress, target)
                    .map_or(Vec2::ZERO, |sample| sample.force)
            }
            RocketPhase::Flying => Vec2::ZERO,
        }
    }

    // ------------------------------------------------------------------
    // Flight
    // ------------------------------------------------------------------

    fn fly(
        &mut self,
        dt: f32,
        gravity: Vec2,
        fuse_held: bool,
        terrain: &Terrain,
        enemies: &[Enemy],
        events: &EventBus,
    ) {
        self.path.start = self.location;
        // Zero velocity gives zero heading and therefore no thrust this tick.
        let heading = self.velocity.normalized();
        self.velocity.add_scaled(gravity, dt);
        self.velocity.add_scaled(heading, self.thrust * dt);
        self.location.add_scaled(self.velocity, dt);
        self.thrust *= dt * self.tuning.thrust_decay;
        self.path.end = self.location;
        // Probe past the nose so the warhead tip detonates, not the tail.
        self.path.extend_at_end(self.tuning.length);

        let contact = if let Some(hit) = terrain.closest_intersection(self.path, None) {
            self.velocity = Vec2::ZERO;
            Some(hit.point)
        } else if !fuse_held {
            // Fuse released: detonate in place, keeping drift velocity.
            Some(self.location)
        } else if let Some(point) = self.enemy_contact(enemies) {
            self.velocity = Vec2::ZERO;
            Some(point)
        } else {
            None
        };

        if let Some(contact) = contact {
            debug!(x = contact.x, y = contact.y, "rocket detonated");
            events.publish(SimEvent::RocketDetonated { contact });
            self.phase = RocketPhase::Detonated {
                contact,
                elapsed_ms: 0.0,
            };
        }
    }

    /// First living enemy whose body the flight path grazes.
    fn enemy_contact(&self, enemies: &[Enemy]) -> Option<Vec2> {
        for enemy in enemies {
            if !enemy.is_alive() {
                continue;
            }
            let closest = self.path.closest_point(enemy.location());
            let radius = enemy.kind().collision_radius();
            if closest.point.distance_sq(enemy.location()) < radius * radius {
                return Some(closest.point);
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Detonation
    // ------------------------------------------------------------------

    fn burn(
        &mut self,
        dt: f32,
        terrain: &Terrain,
        enemies: &mut [Enemy],
        player_centroid: Vec2,
        accumulator: &mut BlastAccumulator,
        events: &EventBus,
    ) {
        let RocketPhase::Detonated {
            mut contact,
            elapsed_ms,
        } = self.phase
        else {
            return;
        };

        // Drift the blast center under residual velocity.
        self.path.start = contact;
        self.velocity *= 1.0 - self.tuning.blast_drag * dt;
        contact.add_scaled(self.velocity, dt);
        self.path.end = contact;

        // A moving blast center must not cross terrain.
        if self.path.length() > self.tuning.drift_probe_threshold {
            self.path.extend_both(self.tuning.drift_probe_extension);
            if let Some(hit) = terrain.closest_intersection(self.path, None) {
                self.velocity = Vec2::ZERO;
                contact = hit.point;
            }
        }

        let next = elapsed_ms + dt;
        self.phase = RocketPhase::Detonated {
            contact,
            elapsed_ms: next,
        };
        if next >= self.tuning.detonation_duration_ms {
            // Spent; no forces on the completing tick.
            return;
        }

        let progress = next / self.tuning.detonation_duration_ms;
        if let Some(sample) = self.sample_blast(contact, progress, player_centroid) {
            accumulator.push(sample.force);
        }
        self.blast_enemies(dt, contact, progress, enemies, events);
    }

    fn blast_enemies(
        &self,
        dt: f32,
        contact: Vec2,
        progress: f32,
        enemies: &mut [Enemy],
        events: &EventBus,
    ) {
        for enemy in enemies.iter_mut() {
            if enemy.state().is_dead() {
                continue;
            }
            let Some(sample) = self.sample_blast(contact, progress, enemy.location()) else {
                continue;
            };
            if sample.strength > self.tuning.fatal_blast && enemy.is_alive() {
                let kind = enemy.kind();
                let location = enemy.location();
                if enemy.kill() {
                    events.publish(SimEvent::EnemyKilled { kind, location });
                }
            } else {
                enemy.apply_blast(sample.force, dt);
            }
        }
    }

    /// Inverse-square radial falloff, attenuated by playback progress,
    /// force capped. `None` when the target sits on the blast center.
    fn sample_blast(&self, contact: Vec2, progress: f32, target: Vec2) -> Option<BlastSample> {
        let delta = target - contact;
        let dist_sq = delta.length_sq();
        if dist_sq < BLAST_EPSILON {
            return None;
        }
        let attenuation = (1.0 - progress).max(0.0);
        let strength = self.tuning.blast_strength * attenuation * attenuation / dist_sq;
        let force = delta * (strength.min(self.tuning.max_blast_force) / dist_sq.sqrt());
        Some(BlastSample { force, strength })
    }
}
