use nalgebra::Vector3;

use crate::components::{AircraftProfile, AircraftState, FlightWarnings};
use crate::resources::{PhysicsConfig, ProbePattern};
use crate::systems::collisions::CollisionProbe;
use crate::utils::GROUND_HUGGER_TIME;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarningOutcome {
    pub message: Option<String>,
    /// Proximity warning has been continuous for long enough to earn the milestone.
    pub ground_hugger: bool,
}

/// `count` points spaced along `direction`, starting one spacing out.
pub fn probe_points(
    origin: Vector3<f64>,
    direction: Vector3<f64>,
    pattern: ProbePattern,
) -> impl Iterator<Item = Vector3<f64>> {
    (1..=pattern.count).map(move |i| origin + direction * (i as f64 * pattern.spacing))
}

/// Updates the warning flags and proximity timer. Only airborne aircraft off
/// the runway are checked; otherwise every warning is cleared.
pub fn evaluate(
    state: &mut AircraftState,
    probe: &CollisionProbe,
    physics: &PhysicsConfig,
    profile: &AircraftProfile,
    on_runway: bool,
    dt: f64,
) -> WarningOutcome {
    let mut outcome = WarningOutcome::default();

    if state.flags.is_on_ground || on_runway {
        state.warnings = FlightWarnings::default();
        return outcome;
    }

    let forward = state.forward().normalize();
    state.warnings.terrain_ahead = probe
        .count_collisions(probe_points(state.position, forward, physics.terrain_look_ahead))
        > 0;
    if state.warnings.terrain_ahead {
        outcome.message = Some("Terrain ahead! PULL UP!".to_string());
    }

    state.warnings.sink_rate = state.velocity.y < -profile.sink_rate_threshold;
    if state.warnings.sink_rate {
        outcome.message = Some("Sink rate!".to_string());
    }

    let down = Vector3::new(0.0, -1.0, 0.0);
    state.warnings.ground_proximity = probe
        .count_collisions(probe_points(state.position, down, physics.ground_proximity))
        > 0;
    if state.warnings.ground_proximity {
        outcome.message = Some("Ground proximity warning!".to_string());
        state.timers.ground_proximity += dt;
        outcome.ground_hugger = state.timers.ground_proximity >= GROUND_HUGGER_TIME;
    } else {
        state.timers.ground_proximity = 0.0;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::terrain::{BiomeConfig, MapType, RunwayConfig};
    use crate::systems::terrain::{NoiseField, TerrainHeightModel};
    use nalgebra::UnitQuaternion;
    use std::f64::consts::PI;

    fn terrain() -> TerrainHeightModel {
        TerrainHeightModel::new(
            NoiseField::new(5),
            BiomeConfig::from_programmed(MapType::Desert),
            RunwayConfig::default(),
        )
    }

    fn steep_terrain() -> TerrainHeightModel {
        let biome = BiomeConfig {
            max_terrain_height: 2000.0,
            ..BiomeConfig::from_programmed(MapType::Hilly)
        };
        TerrainHeightModel::new(NoiseField::new(5), biome, RunwayConfig::default())
    }

    /// A point on an uphill slope along +Z: clear below and behind, ground
    /// rising above it somewhere in the look-ahead window.
    fn facing_rising_ground(model: &TerrainHeightModel, physics: &PhysicsConfig) -> Vector3<f64> {
        let ahead = physics.terrain_look_ahead;
        let below = physics.ground_proximity;
        let reach = below.count as f64 * below.spacing;

        for i in 0..200 {
            for j in 0..20 {
                let (x, z) = (3000.0 + i as f64 * 37.0, 3000.0 + j as f64 * 211.0);
                let y = model.height(x, z) + reach + 5.0;
                let row = |sign: f64| {
                    (1..=ahead.count)
                        .map(move |k| model.height(x, z + sign * k as f64 * ahead.spacing))
                };
                if row(1.0).any(|h| h > y) && row(-1.0).all(|h| h < y) {
                    return Vector3::new(x, y, z);
                }
            }
        }
        panic!("no rising slope found");
    }

    fn airborne_at(x: f64, y: f64, z: f64) -> (AircraftProfile, AircraftState) {
        let profile = AircraftProfile::default();
        let mut state = AircraftState::at_runway_start(&profile);
        state.flags.is_on_ground = false;
        state.position = Vector3::new(x, y, z);
        (profile, state)
    }

    #[test]
    fn test_probe_points() {
        let pattern = ProbePattern {
            count: 3,
            spacing: 10.0,
        };
        let points: Vec<_> = probe_points(Vector3::zeros(), Vector3::x(), pattern).collect();
        assert_eq!(
            points,
            vec![
                Vector3::new(10.0, 0.0, 0.0),
                Vector3::new(20.0, 0.0, 0.0),
                Vector3::new(30.0, 0.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_quiet_when_high() {
        let model = terrain();
        let probe = CollisionProbe::new(&model);
        let physics = PhysicsConfig::default();
        let (profile, mut state) = airborne_at(3000.0, 400.0, 3000.0);

        let outcome = evaluate(&mut state, &probe, &physics, &profile, false, 0.02);
        assert_eq!(outcome, WarningOutcome::default());
        assert!(!state.warnings.any());
    }

    #[test]
    fn test_proximity_timer_accumulates_and_resets() {
        let model = terrain();
        let probe = CollisionProbe::new(&model);
        let physics = PhysicsConfig::default();
        let (x, z) = (3000.0, 3000.0);
        let ground = model.height(x, z);
        let (profile, mut state) = airborne_at(x, ground + 15.0, z);

        let outcome = evaluate(&mut state, &probe, &physics, &profile, false, 0.5);
        assert_eq!(outcome.message.as_deref(), Some("Ground proximity warning!"));
        assert!(!outcome.ground_hugger);

        state.timers.ground_proximity = 59.9;
        let outcome = evaluate(&mut state, &probe, &physics, &profile, false, 0.5);
        assert!(outcome.ground_hugger);

        state.position.y = ground + 200.0;
        evaluate(&mut state, &probe, &physics, &profile, false, 0.5);
        assert_eq!(state.timers.ground_proximity, 0.0);
    }

    #[test]
    fn test_sink_rate_warning() {
        let model = terrain();
        let probe = CollisionProbe::new(&model);
        let physics = PhysicsConfig::default();
        let (profile, mut state) = airborne_at(3000.0, 400.0, 3000.0);
        state.velocity.y = -6.0;

        let outcome = evaluate(&mut state, &probe, &physics, &profile, false, 0.02);
        assert_eq!(outcome.message.as_deref(), Some("Sink rate!"));
        assert!(state.warnings.sink_rate);
    }

    #[test]
    fn test_no_warnings_over_runway() {
        let model = terrain();
        let probe = CollisionProbe::new(&model);
        let physics = PhysicsConfig::default();
        let (profile, mut state) = airborne_at(0.0, 5.0, 0.0);
        state.velocity.y = -20.0;
        state.warnings.sink_rate = true;

        let outcome = evaluate(&mut state, &probe, &physics, &profile, true, 0.02);
        assert!(outcome.message.is_none());
        assert!(!state.warnings.any());
    }

    #[test]
    fn test_terrain_ahead_pulls_up() {
        let model = steep_terrain();
        let probe = CollisionProbe::new(&model);
        let physics = PhysicsConfig::default();
        let point = facing_rising_ground(&model, &physics);
        let (profile, mut state) = airborne_at(point.x, point.y, point.z);

        let outcome = evaluate(&mut state, &probe, &physics, &profile, false, 0.02);
        assert!(state.warnings.terrain_ahead);
        assert!(!state.warnings.ground_proximity);
        assert_eq!(outcome.message.as_deref(), Some("Terrain ahead! PULL UP!"));
    }

    #[test]
    fn test_terrain_behind_is_ignored() {
        let model = steep_terrain();
        let probe = CollisionProbe::new(&model);
        let physics = PhysicsConfig::default();
        let point = facing_rising_ground(&model, &physics);
        let (profile, mut state) = airborne_at(point.x, point.y, point.z);
        state.orientation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI);

        let outcome = evaluate(&mut state, &probe, &physics, &profile, false, 0.02);
        assert!(!state.warnings.terrain_ahead);
        assert!(outcome.message.is_none());
    }
}
