use bevy::prelude::*;

use super::FlightDynamics;
use crate::components::{AircraftProfile, AircraftState, FlightCommand, FlightEvent};
use crate::resources::{MilestoneLedger, PauseRequest, PhysicsConfig, RestartRequest, SessionState};
use crate::systems::collisions::CollisionProbe;
use crate::systems::terrain::TerrainHeightModel;

/// Advances every aircraft by the frame time and forwards what happened as events.
pub fn flight_step_system(
    time: Res<Time>,
    physics: Res<PhysicsConfig>,
    terrain: Res<TerrainHeightModel>,
    mut ledger: ResMut<MilestoneLedger>,
    mut aircraft: Query<(&AircraftProfile, &mut AircraftState, &mut FlightCommand)>,
    mut events: EventWriter<FlightEvent>,
) {
    let dt = time.delta_secs_f64();
    if dt <= 0.0 {
        return;
    }

    for (profile, mut state, mut command) in aircraft.iter_mut() {
        let dynamics = FlightDynamics::new(profile, &physics, CollisionProbe::new(&terrain));
        let report = dynamics.step(&mut state, &command, dt, &mut ledger);
        events.send_batch(report.events);
        // Toggles are edge-triggered, intents persist until the pilot changes them
        command.clear_toggles();
    }
}

/// Mirrors the simulated pose into the `Transform` the presentation layer reads.
pub fn sync_aircraft_transform(mut aircraft: Query<(&AircraftState, &mut Transform)>) {
    for (state, mut transform) in aircraft.iter_mut() {
        transform.translation = Vec3::new(
            state.position.x as f32,
            state.position.y as f32,
            state.position.z as f32,
        );
        let q = state.orientation.quaternion();
        transform.rotation = Quat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32);
    }
}

/// Puts every aircraft back on the runway and invalidates in-flight requests.
pub fn restart_system(
    mut requests: EventReader<RestartRequest>,
    mut session: ResMut<SessionState>,
    mut aircraft: Query<(&AircraftProfile, &mut AircraftState, &mut FlightCommand)>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let token = session.begin_new_generation();
    info!("Restarting session, generation {}", token.generation());
    for (profile, mut state, mut command) in aircraft.iter_mut() {
        state.reset(profile);
        *command = FlightCommand::default();
    }
}

pub fn pause_system(mut requests: EventReader<PauseRequest>, mut session: ResMut<SessionState>) {
    if let Some(request) = requests.read().last() {
        if session.paused != request.paused {
            info!("Simulation {}", if request.paused { "paused" } else { "resumed" });
        }
        session.paused = request.paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::AircraftType;
    use crate::resources::terrain::{BiomeConfig, MapType};
    use crate::systems::terrain::NoiseField;
    use nalgebra::{UnitQuaternion, Vector3};

    #[test]
    fn test_transform_follows_state() {
        let mut app = App::new();
        app.add_systems(Update, sync_aircraft_transform);

        let profile = AircraftProfile::from_programmed(AircraftType::Cessna);
        let mut state = AircraftState::at_runway_start(&profile);
        state.position = Vector3::new(1.0, 2.0, 3.0);
        state.orientation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.5);
        let entity = app.world_mut().spawn((state, Transform::default())).id();

        app.update();

        let transform = app.world().entity(entity).get::<Transform>().unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        let expected = Quat::from_rotation_y(0.5);
        assert!(transform.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_restart_resets_state_and_bumps_generation() {
        let mut app = App::new();
        app.add_event::<RestartRequest>()
            .init_resource::<SessionState>()
            .add_systems(Update, restart_system);

        let profile = AircraftProfile::from_programmed(AircraftType::Cessna);
        let mut state = AircraftState::at_runway_start(&profile);
        state.position.y = 300.0;
        state.flags.is_crashed = true;
        let entity = app
            .world_mut()
            .spawn((profile.clone(), state, FlightCommand::default().with_pitch(1.0)))
            .id();

        app.world_mut().send_event(RestartRequest);
        app.update();

        let world = app.world();
        assert_eq!(
            world.entity(entity).get::<AircraftState>(),
            Some(&AircraftState::at_runway_start(&profile))
        );
        assert_eq!(world.entity(entity).get::<FlightCommand>(), Some(&FlightCommand::default()));
        assert_eq!(world.resource::<SessionState>().generation(), 1);
    }

    #[test]
    fn test_last_pause_request_wins() {
        let mut app = App::new();
        app.add_event::<PauseRequest>()
            .init_resource::<SessionState>()
            .add_systems(Update, pause_system);

        app.world_mut().send_event(PauseRequest { paused: true });
        app.world_mut().send_event(PauseRequest { paused: false });
        app.world_mut().send_event(PauseRequest { paused: true });
        app.update();
        assert!(app.world().resource::<SessionState>().paused);
    }

    #[test]
    fn test_step_system_without_elapsed_time_is_a_no_op() {
        let mut app = App::new();
        let profile = AircraftProfile::from_programmed(AircraftType::Cessna);
        app.add_event::<FlightEvent>()
            .init_resource::<Time>()
            .init_resource::<PhysicsConfig>()
            .init_resource::<MilestoneLedger>()
            .insert_resource(TerrainHeightModel::new(
                NoiseField::new(1),
                BiomeConfig::from_programmed(MapType::Desert),
                profile.runway,
            ))
            .add_systems(Update, flight_step_system);

        let mut state = AircraftState::at_runway_start(&profile);
        state.thrust = 50.0;
        let entity = app
            .world_mut()
            .spawn((profile, state.clone(), FlightCommand::default()))
            .id();

        app.update();
        assert_eq!(app.world().entity(entity).get::<AircraftState>(), Some(&state));
    }
}
