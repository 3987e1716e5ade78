use bevy::prelude::*;

/// Which of a tile's height fields an entity draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainLayerKind {
    Primary,
    Secondary,
}

/// Marks an entity standing in for one layer of a streamed terrain tile.
///
/// The geometry itself lives in the `TerrainTileCache`; the entity carries the
/// key so the renderer can look it up and the streamer can despawn it when the
/// tile is released.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(Transform)]
pub struct TerrainTileComponent {
    pub key: IVec2,
    pub layer: TerrainLayerKind,
}

impl TerrainTileComponent {
    pub fn new(key: IVec2, layer: TerrainLayerKind) -> Self {
        Self { key, layer }
    }
}
