use nalgebra::Vector3;

use crate::components::{AircraftProfile, AircraftState};
use crate::resources::PhysicsConfig;

/// Sum of thrust, ground friction, drag, lift and gravity for this frame.
pub fn net_force(
    state: &AircraftState,
    profile: &AircraftProfile,
    physics: &PhysicsConfig,
    on_runway: bool,
) -> Vector3<f64> {
    state.forward() * state.thrust
        + ground_friction(state, profile, physics, on_runway)
        + drag(state, profile, physics)
        + lift(state, profile, physics)
        + gravity(state, profile)
}

pub fn ground_friction(
    state: &AircraftState,
    profile: &AircraftProfile,
    physics: &PhysicsConfig,
    on_runway: bool,
) -> Vector3<f64> {
    let speed = state.speed();
    if !state.flags.is_on_ground || speed <= 0.01 {
        return Vector3::zeros();
    }

    let surface = if on_runway {
        physics.runway_friction
    } else {
        physics.grass_friction
    };
    let rolling = (physics.rolling_resistance * speed).min(physics.max_rolling_resistance);

    let horizontal = Vector3::new(state.velocity.x, 0.0, state.velocity.z);
    horizontal
        .try_normalize(f64::EPSILON)
        .map(|direction| -direction * (surface + rolling) * profile.gravity)
        .unwrap_or_else(Vector3::zeros)
}

pub fn drag(state: &AircraftState, profile: &AircraftProfile, physics: &PhysicsConfig) -> Vector3<f64> {
    let speed = state.speed();
    if state.flags.is_on_ground && speed <= 0.1 {
        return Vector3::zeros();
    }

    let density = physics.air_density_factor(state.altitude());
    let gear = if state.flags.gear_deployed {
        physics.gear_drag_multiplier
    } else {
        1.0
    };
    let magnitude = profile.drag_coefficient * speed * speed * density * gear;

    state
        .velocity
        .try_normalize(f64::EPSILON)
        .map(|direction| -direction * magnitude)
        .unwrap_or_else(Vector3::zeros)
}

/// Along the body up axis, only while moving and roughly upright.
pub fn lift(state: &AircraftState, profile: &AircraftProfile, physics: &PhysicsConfig) -> Vector3<f64> {
    let speed = state.speed();
    let up = state.up();
    if speed > physics.min_lift_speed && up.y > physics.min_lift_up_component {
        up * profile.lift_coefficient * speed * speed
    } else {
        Vector3::zeros()
    }
}

/// Suppressed while resting on the ground.
pub fn gravity(state: &AircraftState, profile: &AircraftProfile) -> Vector3<f64> {
    if !state.flags.is_on_ground || state.velocity.y > 0.0 {
        Vector3::new(0.0, -profile.gravity, 0.0)
    } else {
        Vector3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn setup() -> (AircraftProfile, PhysicsConfig, AircraftState) {
        let profile = AircraftProfile::default();
        let state = AircraftState::at_runway_start(&profile);
        (profile, PhysicsConfig::default(), state)
    }

    #[test]
    fn test_parked_aircraft_feels_nothing() {
        let (profile, physics, state) = setup();
        assert_eq!(net_force(&state, &profile, &physics, true), Vector3::zeros());
    }

    #[test]
    fn test_friction_depends_on_surface() {
        let (profile, physics, mut state) = setup();
        state.velocity = Vector3::new(0.0, 0.0, 10.0);

        let runway = ground_friction(&state, &profile, &physics, true);
        let grass = ground_friction(&state, &profile, &physics, false);

        // (0.02 + 0.1) * 20 and (0.1 + 0.1) * 20, both opposing motion
        assert_relative_eq!(runway.z, -2.4, epsilon = 1e-9);
        assert_relative_eq!(grass.z, -4.0, epsilon = 1e-9);
        assert_eq!(runway.y, 0.0);
    }

    #[test]
    fn test_rolling_resistance_is_capped() {
        let (profile, physics, mut state) = setup();
        state.velocity = Vector3::new(100.0, 0.0, 0.0);
        let friction = ground_friction(&state, &profile, &physics, true);
        assert_relative_eq!(friction.x, -(0.02 + 0.5) * 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_drag_thins_with_altitude_and_gear() {
        let (profile, physics, mut state) = setup();
        state.flags.is_on_ground = false;
        state.velocity = Vector3::new(0.0, 0.0, 10.0);

        let low = drag(&state, &profile, &physics);
        assert_relative_eq!(low.z, -0.08 * 100.0 * physics.air_density_factor(1.8) * 1.3, epsilon = 1e-9);

        state.flags.gear_deployed = false;
        state.position.y = 50_000.0;
        let high = drag(&state, &profile, &physics);
        assert_relative_eq!(high.z, -0.08 * 100.0 * 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_lift_needs_upright_attitude() {
        let (profile, physics, mut state) = setup();
        state.velocity = Vector3::new(0.0, 0.0, 20.0);
        assert_relative_eq!(lift(&state, &profile, &physics).y, 4.0, epsilon = 1e-9);

        state.orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::PI);
        assert_eq!(lift(&state, &profile, &physics), Vector3::zeros());
    }

    #[test]
    fn test_gravity_gating() {
        let (profile, _, mut state) = setup();
        assert_eq!(gravity(&state, &profile), Vector3::zeros());

        state.velocity.y = 0.5;
        assert_eq!(gravity(&state, &profile).y, -20.0);

        state.velocity.y = 0.0;
        state.flags.is_on_ground = false;
        assert_eq!(gravity(&state, &profile).y, -20.0);
    }
}
