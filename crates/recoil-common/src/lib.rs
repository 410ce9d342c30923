//! # Recoil Common
//!
//! Common types and shared abstractions for Project Recoil.
//!
//! This crate provides the foundations the simulation crates build on:
//! - 2D vector math (screen convention, y grows downward)
//! - Line segments with closest-point, intersection, and extension queries
//! - ID types (PlatformId)
//! - Level validation error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod segment;
pub mod vec2;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::segment::*;
    pub use crate::vec2::*;
}

pub use prelude::*;
