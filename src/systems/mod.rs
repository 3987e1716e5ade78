pub mod collisions;
pub mod flight;
pub mod render;
pub mod terrain;

pub use collisions::CollisionProbe;
pub use flight::{
    flight_step_system, pause_system, restart_system, sync_aircraft_transform, FlightDynamics,
    StepReport,
};
pub use render::{request_aircraft_models, resolve_aircraft_models, AircraftModel, ModelRequest};
pub use terrain::{
    animate_surface_system, attach_tile_meshes, setup_terrain_materials, setup_tile_cache,
    stream_terrain_system, NoiseField, TerrainHeightModel, TerrainMaterials, TileGrid, TileMesh,
};
