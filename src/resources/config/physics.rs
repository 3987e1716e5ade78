use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A row of probe points cast from the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbePattern {
    pub count: usize,
    pub spacing: f64, // [m] between consecutive points
}

/// Tuning shared by every aircraft; per-aircraft values live on `AircraftProfile`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Longest step the integrator will take [s]
    pub max_time_step: f64,
    pub velocity_damping: f64, // per step
    pub angular_damping: f64,  // per step

    pub runway_friction: f64,
    pub grass_friction: f64,
    pub rolling_resistance: f64, // per m/s of speed
    pub max_rolling_resistance: f64,
    /// Extra braking applied while rolling on the runway, per m/s of speed.
    pub rollout_friction: f64,

    pub density_scale_height: f64, // [m]
    pub min_air_density: f64,      // fraction of sea level
    pub gear_drag_multiplier: f64,
    pub min_lift_speed: f64,  // [m/s]
    pub min_lift_up_component: f64,

    pub auto_level_gain: f64,
    pub ground_angular_damping: f64, // [1/s]
    pub ground_contact_tolerance: f64, // [m]
    pub max_contact_climb_rate: f64,   // [m/s]

    pub terrain_look_ahead: ProbePattern,
    pub ground_proximity: ProbePattern,
    /// Belly corners below terrain needed to count as a crash.
    pub crash_corner_threshold: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_time_step: 0.05,
            velocity_damping: 0.98,
            angular_damping: 0.95,
            runway_friction: 0.02,
            grass_friction: 0.1,
            rolling_resistance: 0.01,
            max_rolling_resistance: 0.5,
            rollout_friction: 0.2,
            density_scale_height: 5000.0,
            min_air_density: 0.2,
            gear_drag_multiplier: 1.3,
            min_lift_speed: 1.0,
            min_lift_up_component: 0.1,
            auto_level_gain: 5.0,
            ground_angular_damping: 8.0,
            ground_contact_tolerance: 0.01,
            max_contact_climb_rate: 0.1,
            terrain_look_ahead: ProbePattern {
                count: 5,
                spacing: 100.0,
            },
            ground_proximity: ProbePattern {
                count: 5,
                spacing: 10.0,
            },
            crash_corner_threshold: 1,
        }
    }
}

impl PhysicsConfig {
    /// Frame time as the integrator will use it; hitches are capped.
    pub fn clamp_delta(&self, delta_time: f64) -> f64 {
        delta_time.clamp(0.0, self.max_time_step)
    }

    /// Fraction of sea-level air density at `altitude`.
    pub fn air_density_factor(&self, altitude: f64) -> f64 {
        (-altitude / self.density_scale_height)
            .exp()
            .max(self.min_air_density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_delta_is_clamped() {
        let config = PhysicsConfig::default();
        assert_eq!(config.clamp_delta(0.5), 0.05);
        assert_eq!(config.clamp_delta(0.016), 0.016);
        assert_eq!(config.clamp_delta(-1.0), 0.0);
    }

    #[test]
    fn test_air_density_floor() {
        let config = PhysicsConfig::default();
        assert_relative_eq!(config.air_density_factor(0.0), 1.0);
        assert_relative_eq!(config.air_density_factor(5000.0), (-1.0f64).exp());
        assert_eq!(config.air_density_factor(20_000.0), 0.2);
    }
}
