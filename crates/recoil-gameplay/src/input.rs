//! Processed input for the simulation.
//!
//! Device handling (keyboards, mice, touch) lives outside this crate; the
//! host reduces whatever it reads to one `TickInput` per tick.

use recoil_common::Vec2;

/// Input snapshot consumed by one world update.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Aim target in world coordinates.
    pub aim_world_pos: Vec2,
    /// Whether fire is held. Every flying rocket's fuse: releasing it
    /// detonates them.
    pub fire: bool,
    /// Whether fire was just pressed this tick. Launches a rocket.
    pub fire_just_pressed: bool,
}

impl TickInput {
    /// Create a new empty input snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot aiming at a world position, nothing pressed.
    #[must_use]
    pub fn aimed_at(aim: Vec2) -> Self {
        Self {
            aim_world_pos: aim,
            ..Self::default()
        }
    }

    /// This snapshot with fire newly pressed (and therefore held).
    #[must_use]
    pub fn with_fire_pressed(mut self) -> Self {
        self.fire = true;
        self.fire_just_pressed = true;
        self
    }

    /// This snapshot with fire held from a previous tick.
    #[must_use]
    pub fn with_fire_held(mut self) -> Self {
        self.fire = true;
        self.fire_just_pressed = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let input = TickInput::new();
        assert!(!input.fire);
        assert!(!input.fire_just_pressed);
        assert_eq!(input.aim_world_pos, Vec2::ZERO);
    }

    #[test]
    fn test_builders() {
        let aim = Vec2::new(300.0, 40.0);
        let pressed = TickInput::aimed_at(aim).with_fire_pressed();
        assert!(pressed.fire && pressed.fire_just_pressed);
        assert_eq!(pressed.aim_world_pos, aim);

        let held = TickInput::aimed_at(aim).with_fire_held();
        assert!(held.fire && !held.fire_just_pressed);
    }
}
