use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use serde::Serialize;
use std::{env, time::Duration};

use skyward::{
    components::{
        AircraftProfile, AircraftState, CrashRecord, FlightCommand, FlightEvent, FlightPhase,
        ThrustIntent,
    },
    plugins::{SimulationPlugin, SimulationSet},
    resources::{simulation_running, MilestoneLedger, SimulationConfig, TerrainTileCache},
    systems::TerrainHeightModel,
    utils::{RngManager, SimError, DISPLAY_SPEED_FACTOR},
};

/// Altitude the scripted pilot levels off at [m].
const CRUISE_ALTITUDE: f64 = 150.0;

#[derive(Resource, Debug, Default)]
struct FlightLog {
    events: Vec<FlightEvent>,
    max_altitude: f64,
}

#[derive(Debug, Serialize)]
struct FlightSummary {
    aircraft: String,
    map: String,
    seed: u64,
    frames: usize,
    position: [f64; 3],
    bearing: f64,
    display_speed: f64,
    max_altitude: f64,
    phase: FlightPhase,
    message: Option<String>,
    crash: Option<CrashRecord>,
    events: Vec<FlightEvent>,
    milestones: Vec<String>,
    tiles_resident: usize,
    tiles_created: u64,
    tiles_released: u64,
}

/// Take off, climb out and hold a cruise altitude.
fn scripted_pilot(mut aircraft: Query<(&AircraftProfile, &AircraftState, &mut FlightCommand)>) {
    for (profile, state, mut command) in aircraft.iter_mut() {
        command.thrust = if state.thrust < profile.max_thrust * 0.6 {
            ThrustIntent::Increase
        } else {
            ThrustIntent::Hold
        };

        let target_climb = if state.flags.is_on_ground {
            if state.speed() > profile.takeoff_speed {
                0.15
            } else {
                0.0
            }
        } else if state.altitude() < CRUISE_ALTITUDE {
            0.1
        } else {
            0.0
        };
        let climb = -state.nose_down_angle();
        command.pitch = ((target_climb - climb) * 5.0).clamp(-1.0, 1.0);
    }
}

fn record_flight(
    mut events: EventReader<FlightEvent>,
    mut log: ResMut<FlightLog>,
    aircraft: Query<&AircraftState>,
) {
    log.events.extend(events.read().cloned());
    for state in aircraft.iter() {
        log.max_altitude = log.max_altitude.max(state.altitude());
    }
}

fn main() -> Result<(), SimError> {
    let config = match env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let frames = config.frame_count();
    let frame_time = Duration::from_secs_f64(config.frame_time);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame_time))
        .init_resource::<FlightLog>()
        .add_plugins(SimulationPlugin::new(config.clone()))
        .add_systems(
            Update,
            (
                scripted_pilot
                    .in_set(SimulationSet::Session)
                    .run_if(simulation_running),
                record_flight.after(SimulationSet::Flight),
            ),
        );
    app.finish();
    app.cleanup();

    info!("Flying {} frames of {:?}", frames, frame_time);
    for _ in 0..frames {
        app.update();
    }

    let world = app.world_mut();
    let mut query = world.query::<(&AircraftProfile, &AircraftState)>();
    let (profile, state) = query
        .get_single(world)
        .map_err(|e| SimError::StateError(format!("no single aircraft: {e}")))?;

    let model = world.resource::<TerrainHeightModel>();
    let cache = world.resource::<TerrainTileCache>();
    let ledger = world.resource::<MilestoneLedger>();
    let log = world.resource::<FlightLog>();

    let summary = FlightSummary {
        aircraft: profile.name.clone(),
        map: model.biome().name.clone(),
        seed: world.resource::<RngManager>().master_seed(),
        frames,
        position: [state.position.x, state.position.y, state.position.z],
        bearing: state.bearing(),
        display_speed: state.speed() * DISPLAY_SPEED_FACTOR,
        max_altitude: log.max_altitude,
        phase: state.flight_phase(&profile.runway),
        message: state.message.clone(),
        crash: state.crash.clone(),
        events: log.events.clone(),
        milestones: ledger.earned().iter().map(|m| m.title()).collect(),
        tiles_resident: cache.len(),
        tiles_created: cache.stats().created,
        tiles_released: cache.stats().released,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = &config.milestones_path {
        ledger.save(path)?;
        info!("Saved {} milestones to {:?}", ledger.earned().len(), path);
    }
    Ok(())
}
