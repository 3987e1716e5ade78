pub mod config;
pub mod milestones;
pub mod session;
pub mod terrain;

pub use config::{PhysicsConfig, ProbePattern, SimulationConfig};
pub use milestones::MilestoneLedger;
pub use session::{
    simulation_running, PauseRequest, RestartRequest, SessionState, SessionToken,
};
pub use terrain::{
    AssetError, BiomeConfig, GroundTextureCatalog, GroundTextureProvider, GroundTextures,
    LayerShaping, MapSource, MapType, RunwayConfig, TerrainLayerSpec, TerrainTile,
    TerrainTileCache, TileDiff, TileStats, TileSurface,
};
