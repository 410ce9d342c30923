//! # Recoil Gameplay
//!
//! Simulation core for Project Recoil.
//!
//! This crate provides the fixed-order tick over one level:
//! - Terrain of classified line-segment platforms
//! - Player physics driven entirely by rocket recoil
//! - Rockets with contact, fuse-release, and proximity detonations
//! - Radial blasts feeding knockback into the same tick
//! - Enemy patrol and pursuit state machines
//! - Level descriptions with validation
//! - Event bus for host-facing cues (audio, level switching)
//!
//! Units: pixels, milliseconds, and y growing downward.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod enemy;
pub mod events;
pub mod input;
pub mod level;
pub mod platform;
pub mod player;
pub mod rocket;
pub mod terrain;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::enemy::*;
    pub use crate::events::*;
    pub use crate::input::*;
    pub use crate::level::*;
    pub use crate::platform::*;
    pub use crate::player::*;
    pub use crate::rocket::*;
    pub use crate::terrain::*;
    pub use crate::world::*;
}

pub use prelude::*;
