use serde::{Deserialize, Serialize};

use crate::utils::RUNWAY_CARVE_MARGIN;

/// Flat, axis-aligned runway centred on the world origin and running along Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunwayConfig {
    pub width: f64,  // [m] along X
    pub length: f64, // [m] along Z
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            length: 300.0,
        }
    }
}

impl RunwayConfig {
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }

    /// Strictly inside the painted runway surface.
    pub fn contains(&self, x: f64, z: f64) -> bool {
        x.abs() < self.width / 2.0 && z.abs() < self.length / 2.0
    }

    /// Inside the footprint the terrain is flattened for, runway plus margin.
    pub fn carve_contains(&self, x: f64, z: f64) -> bool {
        x.abs() <= self.width / 2.0 + RUNWAY_CARVE_MARGIN
            && z.abs() <= self.length / 2.0 + RUNWAY_CARVE_MARGIN
    }

    /// Spawn point on the centre line, 15 m in from the south threshold.
    pub fn spawn_z(&self) -> f64 {
        -self.length / 2.0 + 15.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runway_zones_nest() {
        let runway = RunwayConfig::default();

        assert!(runway.contains(14.9, 149.9));
        assert!(!runway.contains(15.0, 0.0));
        assert!(runway.carve_contains(30.0, 165.0));
        assert!(!runway.carve_contains(30.1, 0.0));
    }

    #[test]
    fn test_spawn_is_on_runway() {
        let runway = RunwayConfig::new(100.0, 1000.0);
        assert_eq!(runway.spawn_z(), -485.0);
        assert!(runway.contains(0.0, runway.spawn_z()));
    }
}
