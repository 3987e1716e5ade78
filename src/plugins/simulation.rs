use bevy::prelude::*;

use crate::components::{AircraftProfile, FlightEvent};
use crate::plugins::{FlightPlugin, SimulationSet, StartupSequencePlugin, TerrainPlugin};
use crate::resources::terrain::{BiomeConfig, MapType};
use crate::resources::{
    simulation_running, MilestoneLedger, PauseRequest, RestartRequest, SessionState,
    SimulationConfig,
};
use crate::systems::terrain::{NoiseField, TerrainHeightModel};
use crate::utils::RngManager;

/// Resolves the session from a `SimulationConfig` and installs the terrain and
/// flight plugins on top of it.
pub struct SimulationPlugin {
    config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        SimulationPlugin { config }
    }

    fn resolve_profile(&self) -> AircraftProfile {
        AircraftProfile::new(self.config.aircraft.clone()).unwrap_or_else(|e| {
            error!("Failed to load aircraft, using the default: {}", e);
            AircraftProfile::default()
        })
    }

    fn resolve_biome(&self) -> BiomeConfig {
        BiomeConfig::new(self.config.map.clone()).unwrap_or_else(|e| {
            error!("Failed to load map, using the default: {}", e);
            BiomeConfig::from_programmed(MapType::Mountain)
        })
    }

    fn load_ledger(&self) -> MilestoneLedger {
        match &self.config.milestones_path {
            Some(path) if path.exists() => MilestoneLedger::load(path).unwrap_or_else(|e| {
                warn!("Ignoring unreadable milestones at {:?}: {}", path, e);
                MilestoneLedger::default()
            }),
            _ => MilestoneLedger::default(),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.config.seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };

        let mut profile = self.resolve_profile();
        let biome = self.resolve_biome();
        profile.runway = biome.effective_runway(profile.runway);
        info!(
            "Session: {} over '{}' (seed {}), runway {}x{} m",
            profile.name,
            biome.name,
            rng.master_seed(),
            profile.runway.width,
            profile.runway.length
        );

        let model = TerrainHeightModel::new(NoiseField::new(rng.noise_seed()), biome, profile.runway);

        app.insert_resource(self.config.clone())
            .insert_resource(self.config.physics.clone())
            .insert_resource(rng)
            .insert_resource(model)
            .insert_resource(self.load_ledger())
            .init_resource::<SessionState>()
            .add_event::<RestartRequest>()
            .add_event::<PauseRequest>()
            .add_event::<FlightEvent>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Session,
                    SimulationSet::Terrain.run_if(simulation_running),
                    SimulationSet::Flight.run_if(simulation_running),
                )
                    .chain(),
            )
            .add_plugins((
                StartupSequencePlugin,
                TerrainPlugin,
                FlightPlugin::new(profile),
            ));
    }
}
