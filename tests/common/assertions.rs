use skyward::{components::AircraftState, resources::RunwayConfig};

/// Assert that every vector in the state is finite and the attitude is a unit quaternion
#[track_caller]
pub fn assert_state_finite(state: &AircraftState) {
    assert!(
        state.position.iter().all(|x| x.is_finite()),
        "Position is not finite: {:?}",
        state.position
    );
    assert!(
        state.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite: {:?}",
        state.velocity
    );
    assert!(
        state.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite: {:?}",
        state.angular_velocity
    );
    assert!(state.thrust.is_finite(), "Thrust is not finite");
    let norm = state.orientation.quaternion().norm();
    assert!((norm - 1.0).abs() < 1e-9, "Orientation not normalised: {norm}");
}

#[track_caller]
pub fn assert_within_runway(state: &AircraftState, runway: &RunwayConfig) {
    assert!(
        runway.contains(state.position.x, state.position.z),
        "Aircraft at ({:.1}, {:.1}) is off the {}x{} runway",
        state.position.x,
        state.position.z,
        runway.width,
        runway.length
    );
}
