use nalgebra::Vector3;

use crate::components::{AircraftProfile, AircraftState, FlightWarnings};
use crate::resources::PhysicsConfig;
use crate::utils::DISPLAY_SPEED_FACTOR;

/// Belly at or below ground level and not climbing away.
pub fn is_touching_ground(
    state: &AircraftState,
    profile: &AircraftProfile,
    physics: &PhysicsConfig,
) -> bool {
    let belly = state.position.y - profile.body.half_height;
    belly <= profile.ground_level + physics.ground_contact_tolerance
        && state.velocity.y <= physics.max_contact_climb_rate
}

/// `Err` carries the crash reason when the touchdown exceeds either limit.
pub fn judge_landing(speed: f64, sink_rate: f64, profile: &AircraftProfile) -> Result<(), String> {
    let too_fast = speed > profile.max_speed_landing;
    let too_steep = sink_rate > profile.max_sink_rate_landing;
    if !too_fast && !too_steep {
        return Ok(());
    }

    let mut reason = String::from("Landing failed!");
    if too_fast {
        reason.push_str(&format!(
            " Speed too high ({:.1} > {})",
            speed * DISPLAY_SPEED_FACTOR,
            profile.max_speed_landing * DISPLAY_SPEED_FACTOR
        ));
    }
    if too_steep {
        reason.push_str(&format!(
            " Sink rate too high ({:.1} > {})",
            sink_rate, profile.max_sink_rate_landing
        ));
    }
    Err(reason)
}

/// Pins the aircraft to the runway surface and applies rollout behaviour.
pub fn settle_on_runway(
    state: &mut AircraftState,
    profile: &AircraftProfile,
    physics: &PhysicsConfig,
    speed: f64,
    dt: f64,
) {
    state.flags.is_on_ground = true;
    state.velocity.y = 0.0;
    state.position.y = profile.ground_level + profile.body.half_height;

    let horizontal = Vector3::new(state.velocity.x, 0.0, state.velocity.z);
    if horizontal.norm_squared() > 0.01 {
        state.velocity -= horizontal.normalize() * physics.rollout_friction * speed * dt;
    }

    if state.flags.park_brakes {
        state.velocity.x = 0.0;
        state.velocity.z = 0.0;
    }

    let nose_down = state.nose_down_angle();
    if nose_down > 0.0 {
        state.angular_velocity.x = -nose_down * physics.auto_level_gain;
    }

    let damping = 1.0 - dt * physics.ground_angular_damping;
    state.angular_velocity.x *= damping;
    state.angular_velocity.z *= damping;

    state.timers.airborne = 0.0;
    state.timers.ground_proximity = 0.0;
    state.warnings = FlightWarnings::default();
}
