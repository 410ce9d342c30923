//! Level descriptions: the serializable input a world is built from.
//!
//! A [`Level`] is pure data in authoring order. Nothing here simulates;
//! [`crate::world::World::from_level`] validates a level and turns it into
//! live terrain and entities.

use recoil_common::{LevelError, LevelResult, Vec2};
use serde::{Deserialize, Serialize};

use crate::enemy::EnemyKind;

/// A platform to classify and place, as an endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    /// First endpoint, in authoring order.
    pub start: Vec2,
    /// Second endpoint. Authoring order decides which side supports.
    pub end: Vec2,
}

/// An enemy to place at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    /// Which behavior table the enemy uses.
    pub kind: EnemyKind,
    /// Patrol cycle. The enemy spawns at the first waypoint.
    pub patrol: Vec<Vec2>,
}

/// A complete level description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Display name for logs.
    #[serde(default)]
    pub name: String,
    /// Where the player's feet start.
    pub player_spawn: Vec2,
    /// Terrain segments.
    pub platforms: Vec<PlatformDef>,
    /// Enemies to spawn.
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    /// Exit portal location, if the level has one.
    #[serde(default)]
    pub portal: Option<Vec2>,
}

impl Level {
    /// Checks the level for data that cannot be simulated.
    ///
    /// Reports the first problem found, with the index of the offending
    /// entry in authoring order.
    pub fn validate(&self) -> LevelResult<()> {
        if !self.player_spawn.is_finite() {
            return Err(LevelError::NonFiniteSpawn);
        }
        for (index, def) in self.platforms.iter().enumerate() {
            if !def.start.is_finite() || !def.end.is_finite() {
                return Err(LevelError::NonFinitePlatform { index });
            }
            if def.start == def.end {
                return Err(LevelError::DegeneratePlatform { index });
            }
        }
        for (index, def) in self.enemies.iter().enumerate() {
            if def.patrol.len() < 2 {
                return Err(LevelError::PatrolTooShort {
                    index,
                    count: def.patrol.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_level() -> Level {
        Level {
            name: "proving grounds".to_string(),
            player_spawn: Vec2::new(100.0, 100.0),
            platforms: vec![PlatformDef {
                start: Vec2::new(0.0, 150.0),
                end: Vec2::new(200.0, 150.0),
            }],
            enemies: vec![EnemyDef {
                kind: EnemyKind::Glider,
                patrol: vec![Vec2::new(300.0, 50.0), Vec2::new(400.0, 50.0)],
            }],
            portal: Some(Vec2::new(500.0, 120.0)),
        }
    }

    #[test]
    fn test_valid_level_passes() {
        assert_eq!(valid_level().validate(), Ok(()));
    }

    #[test]
    fn test_degenerate_platform_rejected() {
        let mut level = valid_level();
        level.platforms.push(PlatformDef {
            start: Vec2::new(5.0, 5.0),
            end: Vec2::new(5.0, 5.0),
        });
        assert_eq!(
            level.validate(),
            Err(LevelError::DegeneratePlatform { index: 1 })
        );
    }

    #[test]
    fn test_non_finite_platform_rejected() {
        let mut level = valid_level();
        level.platforms[0].end.x = f32::NAN;
        assert_eq!(
            level.validate(),
            Err(LevelError::NonFinitePlatform { index: 0 })
        );
    }

    #[test]
    fn test_short_patrol_rejected() {
        let mut level = valid_level();
        level.enemies[0].patrol.truncate(1);
        assert_eq!(
            level.validate(),
            Err(LevelError::PatrolTooShort { index: 0, count: 1 })
        );
    }

    #[test]
    fn test_non_finite_spawn_rejected() {
        let mut level = valid_level();
        level.player_spawn.y = f32::INFINITY;
        assert_eq!(level.validate(), Err(LevelError::NonFiniteSpawn));
    }

    #[test]
    fn test_json_round_trip() {
        let level = valid_level();
        let json = serde_json::to_string(&level).unwrap();
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "player_spawn": { "x": 10.0, "y": 20.0 },
            "platforms": [
                { "start": { "x": 0.0, "y": 150.0 }, "end": { "x": 200.0, "y": 150.0 } }
            ]
        }"#;
        let level: Level = serde_json::from_str(json).unwrap();
        assert!(level.name.is_empty());
        assert!(level.enemies.is_empty());
        assert_eq!(level.portal, None);
        assert_eq!(level.validate(), Ok(()));
    }
}
