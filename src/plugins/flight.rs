use bevy::prelude::*;

use crate::components::{AircraftProfile, AircraftState, FlightCommand};
use crate::plugins::{SimulationSet, StartupStage};
use crate::systems::flight::{
    flight_step_system, pause_system, restart_system, sync_aircraft_transform,
};

pub struct FlightPlugin {
    profile: AircraftProfile,
}

impl FlightPlugin {
    pub fn new(profile: AircraftProfile) -> Self {
        FlightPlugin { profile }
    }

    fn spawn_aircraft(mut commands: Commands, profile: AircraftProfile) {
        info!("Spawning {} on the runway", profile.name);
        commands.spawn((
            AircraftState::at_runway_start(&profile),
            FlightCommand::default(),
            Transform::default(),
            Name::new(profile.name.clone()),
            profile,
        ));
    }
}

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        let profile = self.profile.clone();

        app.add_systems(
            Startup,
            (move |commands: Commands| Self::spawn_aircraft(commands, profile.clone()))
                .in_set(StartupStage::BuildAircraft),
        )
        .add_systems(
            Update,
            (
                (pause_system, restart_system)
                    .chain()
                    .in_set(SimulationSet::Session),
                (flight_step_system, sync_aircraft_transform)
                    .chain()
                    .in_set(SimulationSet::Flight),
            ),
        );
    }
}
