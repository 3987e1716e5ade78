mod tile;

pub use tile::{TerrainLayerKind, TerrainTileComponent};
