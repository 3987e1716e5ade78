mod biome;
mod layer;
mod runway;

pub use biome::{BiomeConfig, MapSource, MapType};
pub use layer::{LayerShaping, TerrainLayerSpec};
pub use runway::RunwayConfig;
