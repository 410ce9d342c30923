//! Error types for Project Recoil.
//!
//! The tick itself never fails: degenerate geometry is guarded at the call
//! sites. Level validation is the one fallible boundary.

use thiserror::Error;

/// Errors found while validating level data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// A platform segment with coincident endpoints.
    #[error("platform {index} is degenerate (zero length)")]
    DegeneratePlatform {
        /// Index of the platform in the level definition.
        index: usize,
    },

    /// A platform with NaN or infinite coordinates.
    #[error("platform {index} has non-finite coordinates")]
    NonFinitePlatform {
        /// Index of the platform in the level definition.
        index: usize,
    },

    /// An enemy patrol path too short to cycle.
    #[error("enemy {index} patrol path has {count} waypoints, need at least 2")]
    PatrolTooShort {
        /// Index of the enemy in the level definition.
        index: usize,
        /// Number of waypoints supplied.
        count: usize,
    },

    /// A player spawn with NaN or infinite coordinates.
    #[error("player spawn has non-finite coordinates")]
    NonFiniteSpawn,
}

/// Result type alias for level validation.
pub type LevelResult<T> = Result<T, LevelError>;
