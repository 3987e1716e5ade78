mod height;
mod mesh;
mod noise;
mod render;
mod streaming;

pub use height::{amplify, TerrainHeightModel};
pub use mesh::{TileGrid, TileMesh};
pub use self::noise::NoiseField;
pub use render::{
    attach_tile_meshes, fallback_material, setup_terrain_materials, surface_material,
    tile_mesh_to_bevy, TerrainMaterials,
};
pub use streaming::{animate_surface_system, setup_tile_cache, stream_terrain_system};
