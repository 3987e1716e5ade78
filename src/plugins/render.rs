use bevy::prelude::*;

use crate::plugins::{SimulationSet, StartupStage};
use crate::systems::render::{request_aircraft_models, resolve_aircraft_models};
use crate::systems::terrain::{attach_tile_meshes, setup_terrain_materials};

/// Gives streamed tiles meshes and materials. Needs the asset and render
/// plugins, so it is left out of headless apps.
pub struct TerrainRenderPlugin;

impl Plugin for TerrainRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            setup_terrain_materials.in_set(StartupStage::BuildPresentation),
        )
        .add_systems(Update, attach_tile_meshes.after(SimulationSet::Terrain));
    }
}

/// Loads the selected aircraft's glTF scene, discarding loads that finish
/// after a restart.
pub struct AircraftRenderPlugin;

impl Plugin for AircraftRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (request_aircraft_models, resolve_aircraft_models)
                .chain()
                .after(SimulationSet::Session),
        );
    }
}
