use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{AircraftProfile, AircraftState, FlightCommand, ThrustIntent};

/// Applies one frame of pilot input: toggles, throttle, then attitude.
pub fn apply_command(
    state: &mut AircraftState,
    command: &FlightCommand,
    profile: &AircraftProfile,
    dt: f64,
) {
    if command.toggle_gear && profile.retractable_gear {
        state.flags.gear_deployed = !state.flags.gear_deployed;
    }
    if command.toggle_engine {
        state.flags.engine_off = !state.flags.engine_off;
    }
    if command.toggle_park_brakes {
        state.flags.park_brakes = !state.flags.park_brakes;
    }

    state.thrust = next_thrust(state.thrust, command.thrust, profile, dt);

    let pitch = command.pitch.clamp(-1.0, 1.0);
    if pitch != 0.0 {
        // Negative rotation about body X raises the nose
        let rotation =
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -profile.pitch_speed * pitch * dt);
        state.orientation *= rotation;
    }

    let roll = command.roll.clamp(-1.0, 1.0);
    if roll != 0.0 {
        // Turns about world vertical rather than banking
        let rotation =
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -profile.roll_speed * roll * dt);
        state.orientation = rotation * state.orientation;
    }
}

pub fn next_thrust(thrust: f64, intent: ThrustIntent, profile: &AircraftProfile, dt: f64) -> f64 {
    let thrust = match intent {
        ThrustIntent::Increase => (thrust + profile.thrust_force * 0.5 * dt).min(profile.max_thrust),
        ThrustIntent::Decrease => {
            thrust - (profile.thrust_force * 0.1 + profile.reverse_thrust_force) * dt
        }
        ThrustIntent::Hold => thrust,
    };
    thrust.max(-profile.reverse_thrust_force * 0.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (AircraftProfile, AircraftState) {
        let profile = AircraftProfile::default();
        let state = AircraftState::at_runway_start(&profile);
        (profile, state)
    }

    #[test]
    fn test_thrust_ramps_and_caps() {
        let profile = AircraftProfile::default();
        assert_relative_eq!(next_thrust(0.0, ThrustIntent::Increase, &profile, 1.0), 5.0);
        assert_eq!(next_thrust(299.0, ThrustIntent::Increase, &profile, 1.0), 300.0);
        assert_eq!(next_thrust(42.0, ThrustIntent::Hold, &profile, 1.0), 42.0);
    }

    #[test]
    fn test_reverse_thrust_floor() {
        let profile = AircraftProfile::default();
        assert_relative_eq!(next_thrust(20.0, ThrustIntent::Decrease, &profile, 1.0), 9.0);
        assert_eq!(next_thrust(0.0, ThrustIntent::Decrease, &profile, 10.0), -2.0);
    }

    #[test]
    fn test_pitch_up_raises_nose() {
        let (profile, mut state) = setup();
        let command = FlightCommand::default().with_pitch(1.0);
        apply_command(&mut state, &command, &profile, 0.5);

        assert!(state.forward().y > 0.0);
        assert_relative_eq!(state.nose_down_angle(), -0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_roll_turns_about_vertical() {
        let (profile, mut state) = setup();
        let command = FlightCommand::default().with_roll(1.0);
        apply_command(&mut state, &command, &profile, 1.0);

        // Right turn from +Z heads toward -X, up stays vertical
        assert!(state.forward().x < 0.0);
        assert_relative_eq!(state.up().y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(state.bearing(), 360.0 - 0.3f64.to_degrees(), epsilon = 1e-9);
    }

    #[test]
    fn test_toggles() {
        let (profile, mut state) = setup();
        let command = FlightCommand {
            toggle_gear: true,
            toggle_engine: true,
            toggle_park_brakes: true,
            ..Default::default()
        };

        apply_command(&mut state, &command, &profile, 0.016);
        assert!(state.flags.engine_off);
        assert!(state.flags.park_brakes);
        // Fixed gear stays down
        assert!(state.flags.gear_deployed);

        let jet = AircraftProfile::from_programmed(crate::components::AircraftType::Boeing787);
        apply_command(&mut state, &command, &jet, 0.016);
        assert!(!state.flags.gear_deployed);
        assert!(!state.flags.engine_off);
    }
}
