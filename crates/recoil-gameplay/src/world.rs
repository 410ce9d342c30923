//! World: the tick orchestrator.
//!
//! Owns the terrain, the player, and the enemy list, and fixes the order
//! systems run in. Per tick: enemies first, against the player's
//! start-of-tick centroid, then the player with its rockets, then the
//! portal. Blast forces recorded during the rocket pass reach the player
//! inside the same tick's integration, and enemies inside the same pass.

use recoil_common::{LevelError, LevelResult, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::enemy::Enemy;
use crate::events::{EventBus, SimEvent};
use crate::input::TickInput;
use crate::level::Level;
use crate::platform::Platform;
use crate::player::{Player, Teleport};
use crate::terrain::Terrain;

/// World-level tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldTuning {
    /// Constant downward acceleration, px/ms².
    pub gravity: Vec2,
    /// Largest tick delta simulated at once; bigger deltas clamp.
    pub max_tick_ms: f32,
    /// Portal capture radius around the player centroid.
    pub portal_radius: f32,
    /// Teleport blend length in milliseconds.
    pub teleport_duration_ms: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 0.0098),
            max_tick_ms: 100.0,
            portal_radius: 50.0,
            teleport_duration_ms: 640.0,
        }
    }
}

/// The live simulation built from a [`Level`].
///
/// # Examples
///
/// ```
/// use recoil_common::Vec2;
/// use recoil_gameplay::prelude::*;
///
/// let level = Level {
///     name: "demo".into(),
///     player_spawn: Vec2::new(100.0, 50.0),
///     platforms: vec![PlatformDef {
///         start: Vec2::new(0.0, 150.0),
///         end: Vec2::new(200.0, 150.0),
///     }],
///     enemies: Vec::new(),
///     portal: None,
/// };
///
/// let mut world = World::from_level(&level).unwrap();
/// world.update(16.0, &TickInput::new());
/// assert!(world.player.location().y > 50.0);
/// ```
#[derive(Debug)]
pub struct World {
    /// Static terrain.
    pub terrain: Terrain,
    /// The player entity.
    pub player: Player,
    /// Enemies in spawn order. Dead enemies stay listed; indices held by
    /// observers never shift.
    pub enemies: Vec<Enemy>,
    portal: Option<Vec2>,
    teleport: Option<Teleport>,
    tuning: WorldTuning,
    bus: EventBus,
    elapsed_ms: f64,
}

impl World {
    /// Validates a level and builds the live simulation from it.
    pub fn from_level(level: &Level) -> LevelResult<Self> {
        level.validate()?;
        let platforms = level
            .platforms
            .iter()
            .enumerate()
            .map(|(index, def)| {
                Platform::new(def.start, def.end)
                    .ok_or(LevelError::DegeneratePlatform { index })
            })
            .collect::<LevelResult<Vec<_>>>()?;
        let terrain = Terrain::new(platforms);
        let enemies: Vec<Enemy> = level
            .enemies
            .iter()
            .map(|def| Enemy::new(def.kind, def.patrol.clone()))
            .collect();
        info!(
            name = %level.name,
            platforms = terrain.len(),
            enemies = enemies.len(),
            portal = level.portal.is_some(),
            "level loaded"
        );
        Ok(Self {
            terrain,
            player: Player::new(level.player_spawn),
            enemies,
            portal: level.portal,
            teleport: None,
            tuning: WorldTuning::default(),
            bus: EventBus::default(),
            elapsed_ms: 0.0,
        })
    }

    /// This world with different tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: WorldTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Advances the whole simulation by `dt` milliseconds.
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        let dt = self.clamp_dt(dt);
        if dt <= 0.0 {
            return;
        }
        self.elapsed_ms += f64::from(dt);

        // Enemies read the start-of-tick centroid, so their order in the
        // list cannot change the outcome.
        let player_centroid = self.player.centroid();
        let player_alive = self.player.is_alive();
        let mut attacked = false;
        for enemy in &mut self.enemies {
            if enemy.update(dt, player_centroid, player_alive) {
                attacked = true;
                self.bus.publish(SimEvent::EnemyKilled {
                    kind: enemy.kind(),
                    location: enemy.location(),
                });
            }
        }
        if attacked && self.player.kill() {
            self.bus.publish(SimEvent::PlayerKilled {
                location: player_centroid,
            });
        }

        self.player.update(
            dt,
            input,
            self.tuning.gravity,
            &self.terrain,
            &mut self.enemies,
            self.teleport,
            &self.bus,
        );

        self.update_portal(dt);
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        if dt > self.tuning.max_tick_ms {
            warn!(dt, max = self.tuning.max_tick_ms, "tick delta clamped");
            return self.tuning.max_tick_ms;
        }
        dt
    }

    /// Advances an active teleport blend, or starts one on portal contact.
    /// Runs after the player so the blend consumed this tick is the one
    /// the pacing produced last tick.
    fn update_portal(&mut self, dt: f32) {
        if let Some(blend) = &mut self.teleport {
            if blend.remaining <= 0.0 {
                // The player consumed the zero blend this tick and now
                // sits exactly on the destination.
                let destination = blend.destination;
                self.teleport = None;
                info!(x = destination.x, y = destination.y, "teleport completed");
                self.bus.publish(SimEvent::TeleportCompleted { destination });
            } else {
                blend.remaining =
                    (blend.remaining - dt / self.tuning.teleport_duration_ms).max(0.0);
            }
            return;
        }

        let Some(portal) = self.portal else {
            return;
        };
        if !self.player.is_alive() {
            return;
        }
        let radius_sq = self.tuning.portal_radius * self.tuning.portal_radius;
        if self.player.centroid().distance_sq(portal) < radius_sq {
            debug!(x = portal.x, y = portal.y, "portal entered");
            self.teleport = Some(Teleport {
                destination: portal,
                remaining: 1.0,
            });
            self.bus.publish(SimEvent::PortalEntered { location: portal });
        }
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// Event outbox; drain it after each update.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Exit portal location, if the level has one.
    #[must_use]
    pub const fn portal(&self) -> Option<Vec2> {
        self.portal
    }

    /// Active teleport blend, if the player is mid-teleport.
    #[must_use]
    pub const fn teleport(&self) -> Option<Teleport> {
        self.teleport
    }

    /// World tuning.
    #[must_use]
    pub const fn tuning(&self) -> &WorldTuning {
        &self.tuning
    }

    /// Simulated time in milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Enemies still acting.
    #[must_use]
    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Whether the player's death sequence has finished.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.player.vitality().is_dead()
    }
}
