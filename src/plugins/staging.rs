use bevy::prelude::*;

/// Startup ordering: the tile cache needs the height model, the aircraft
/// needs the runway, and presentation needs both.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum StartupStage {
    BuildTerrain,
    BuildAircraft,
    BuildPresentation,
}

/// Per-frame ordering. Everything after `Session` is skipped while paused.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SimulationSet {
    /// Pause and restart requests, pilot input.
    Session,
    /// Tile streaming around the aircraft.
    Terrain,
    /// One flight step per aircraft, then events.
    Flight,
}

pub struct StartupSequencePlugin;

impl Plugin for StartupSequencePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Startup,
            (
                StartupStage::BuildTerrain,
                StartupStage::BuildAircraft,
                StartupStage::BuildPresentation,
            )
                .chain(),
        );
    }
}
