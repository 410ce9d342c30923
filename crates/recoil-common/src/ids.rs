//! ID types for world objects.

use serde::{Deserialize, Serialize};

/// Identifies a platform by its index within a terrain.
///
/// Stable for the lifetime of a loaded level; lets entity state name its
/// supporting platform without borrowing the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(u32);

impl PlatformId {
    /// Creates a platform ID from a terrain index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the terrain index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "platform#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let id = PlatformId::from_index(7);
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlatformId::from_index(3).to_string(), "platform#3");
    }
}
