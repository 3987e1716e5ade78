use bevy::prelude::*;

use crate::plugins::{SimulationSet, StartupStage};
use crate::resources::terrain::GroundTextureCatalog;
use crate::systems::terrain::{animate_surface_system, setup_tile_cache, stream_terrain_system};

/// Streams terrain tiles around the aircraft. Expects a `TerrainHeightModel`
/// resource; a custom `GroundTextureCatalog` may be inserted beforehand.
pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GroundTextureCatalog>()
            .add_systems(Startup, setup_tile_cache.in_set(StartupStage::BuildTerrain))
            .add_systems(
                Update,
                (stream_terrain_system, animate_surface_system)
                    .chain()
                    .in_set(SimulationSet::Terrain),
            );
    }
}
