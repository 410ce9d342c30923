//! Enemies: typed waypoint patrollers that lock onto and dive the player.
//!
//! The state machine only ever advances:
//! patrolling → pursuing → exploding → dead. Pursuit is sticky; nothing
//! short of a level reload returns an enemy to its patrol. Dead enemies
//! stay in the world's list but are inert and invisible to collision.

use recoil_common::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Death sequence length in milliseconds.
const EXPLOSION_DURATION_MS: f32 = 640.0;

// ============================================================================
// Enemy kinds
// ============================================================================

/// Enemy types. Adding one is a compile-time extension of these tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast flyer riding its waypoint loop.
    Glider,
    /// Slow hoverer with a wide sensor net.
    Drone,
}

impl EnemyKind {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Glider => "Glider",
            Self::Drone => "Drone",
        }
    }

    /// Base travel speed in pixels per millisecond.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Glider => 0.5,
            Self::Drone => 0.1,
        }
    }

    /// Body radius for rocket proximity hits.
    #[must_use]
    pub const fn collision_radius(self) -> f32 {
        match self {
            Self::Glider => 30.0,
            Self::Drone => 22.0,
        }
    }

    /// Distance at which the enemy locks onto the player.
    #[must_use]
    pub const fn follow_range(self) -> f32 {
        match self {
            Self::Glider => 240.0,
            Self::Drone => 380.0,
        }
    }

    /// Distance at which a pursuing enemy triggers its attack.
    #[must_use]
    pub const fn attack_range(self) -> f32 {
        match self {
            Self::Glider => 60.0,
            Self::Drone => 48.0,
        }
    }

    /// All enemy kinds.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Glider, Self::Drone]
    }
}

// ============================================================================
// Enemy state
// ============================================================================

/// Enemy lifecycle state. Transitions are monotonic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    /// Riding the waypoint loop.
    Patrolling,
    /// Locked onto the player.
    Pursuing,
    /// Death sequence playing; still physically present.
    Exploding {
        /// Milliseconds of playback elapsed.
        elapsed_ms: f32,
    },
    /// Sequence finished. Inert, excluded from every check.
    Dead,
}

impl EnemyState {
    /// Whether the enemy still acts and can be hit.
    #[must_use]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Patrolling | Self::Pursuing)
    }

    /// Whether the enemy is fully gone.
    #[must_use]
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// One enemy instance.
#[derive(Debug, Clone)]
pub struct Enemy {
    kind: EnemyKind,
    location: Vec2,
    /// Residual blast velocity; halves each tick.
    velocity: Vec2,
    patrol: Vec<Vec2>,
    /// Index of the waypoint currently steered toward.
    waypoint: usize,
    angle: f32,
    state: EnemyState,
}

impl Enemy {
    /// Spawns an enemy at the first waypoint, heading for the second.
    ///
    /// Level validation guarantees at least two waypoints.
    #[must_use]
    pub fn new(kind: EnemyKind, patrol: Vec<Vec2>) -> Self {
        let location = patrol.first().copied().unwrap_or(Vec2::ZERO);
        let waypoint = if patrol.len() > 1 { 1 } else { 0 };
        Self {
            kind,
            location,
            velocity: Vec2::ZERO,
            patrol,
            waypoint,
            angle: 0.0,
            state: EnemyState::Patrolling,
        }
    }

    /// Enemy type.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Current position.
    #[must_use]
    pub const fn location(&self) -> Vec2 {
        self.location
    }

    /// Residual blast velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Facing angle in radians, tracking the steering direction.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EnemyState {
        self.state
    }

    /// Whether the enemy still acts and can be hit.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Death sequence fraction while exploding, 0 to 1.
    #[must_use]
    pub fn explosion_progress(&self) -> Option<f32> {
        match self.state {
            EnemyState::Exploding { elapsed_ms } => Some(elapsed_ms / EXPLOSION_DURATION_MS),
            _ => None,
        }
    }

    /// Starts the death sequence. Returns true if the enemy was alive and
    /// is now exploding; no-op on exploding or dead enemies.
    pub fn kill(&mut self) -> bool {
        if self.state.is_alive() {
            debug!(kind = self.kind.display_name(), "enemy killed");
            self.state = EnemyState::Exploding { elapsed_ms: 0.0 };
            true
        } else {
            false
        }
    }

    /// Adds a blast impulse to the residual velocity. Dead enemies are
    /// beyond pushing; exploding ones still drift.
    pub fn apply_blast(&mut self, force: Vec2, dt: f32) {
        if !self.state.is_dead() {
            self.velocity.add_scaled(force, dt);
        }
    }

    /// Advances the enemy one tick. Returns true when the enemy closed to
    /// attack range and triggered its kamikaze: the caller kills the player
    /// in the same tick.
    pub fn update(&mut self, dt: f32, player_centroid: Vec2, player_alive: bool) -> bool {
        match self.state {
            EnemyState::Dead => return false,
            EnemyState::Exploding { elapsed_ms } => {
                self.drift(dt);
                self.advance_explosion(elapsed_ms, dt);
                return false;
            }
            EnemyState::Patrolling | EnemyState::Pursuing => {}
        }

        self.drift(dt);
        let dist_sq = self.location.distance_sq(player_centroid);

        if matches!(self.state, EnemyState::Patrolling) && player_alive {
            let follow = self.kind.follow_range();
            if dist_sq < follow * follow {
                debug!(kind = self.kind.display_name(), "enemy locked on");
                self.state = EnemyState::Pursuing;
            }
        }

        match self.state {
            EnemyState::Patrolling => {
                self.patrol_step(dt);
                false
            }
            EnemyState::Pursuing => {
                let attack = self.kind.attack_range();
                if player_alive && dist_sq < attack * attack {
                    debug!(kind = self.kind.display_name(), "enemy attack");
                    self.state = EnemyState::Exploding { elapsed_ms: 0.0 };
                    return true;
                }
                self.steer_toward(player_centroid, dt);
                false
            }
            EnemyState::Exploding { .. } | EnemyState::Dead => false,
        }
    }

    /// Applies residual blast velocity and halves it.
    fn drift(&mut self, dt: f32) {
        self.location.add_scaled(self.velocity, dt);
        self.velocity *= 0.5;
    }

    // Milliseconds are counted and the fraction derived: summing
    // dt / duration in f32 lands short of 1.0 and stretches the sequence.
    fn advance_explosion(&mut self, elapsed_ms: f32, dt: f32) {
        let next = elapsed_ms + dt;
        self.state = if next >= EXPLOSION_DURATION_MS {
            EnemyState::Dead
        } else {
            EnemyState::Exploding { elapsed_ms: next }
        };
    }

    fn steer_toward(&mut self, target: Vec2, dt: f32) {
        let direction = target - self.location;
        let distance = direction.length();
        if distance <= 0.0 {
            return;
        }
        self.angle = direction.angle();
        let travel = (self.kind.base_speed() * dt).min(distance);
        self.location.add_scaled(direction, travel / distance);
    }

    fn patrol_step(&mut self, dt: f32) {
        if self.patrol.is_empty() {
            return;
        }
        let target = self.patrol[self.waypoint % self.patrol.len()];
        let direction = target - self.location;
        let distance = direction.length();
        if distance > 0.0 {
            self.angle = direction.angle();
        }
        let travel = self.kind.base_speed() * dt;
        if distance <= travel {
            // Land exactly on the waypoint, then aim at the next one.
            self.location = target;
            self.waypoint = (self.waypoint + 1) % self.patrol.len();
        } else {
            self.location.add_scaled(direction, travel / distance);
        }
    }
}
