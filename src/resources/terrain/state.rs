use bevy::prelude::*;
use nalgebra::Vector3;
use std::collections::{HashMap, HashSet};

use super::{BiomeConfig, GroundTextureProvider, TileSurface};
use crate::systems::terrain::{TerrainHeightModel, TileGrid, TileMesh};

/// One streamed square of terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTile {
    pub key: IVec2,
    pub origin: Vec3,
    pub primary: TileMesh,
    pub secondary: Option<TileMesh>,
    alive: bool,
}

impl TerrainTile {
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    fn release(&mut self) {
        self.primary.release();
        if let Some(mesh) = self.secondary.as_mut() {
            mesh.release();
        }
        self.alive = false;
    }
}

/// Keys that appeared and disappeared during one `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDiff {
    pub created: Vec<IVec2>,
    pub removed: Vec<IVec2>,
}

impl TileDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileStats {
    pub created: u64,
    pub released: u64,
}

impl TileStats {
    pub fn resident(&self) -> u64 {
        self.created - self.released
    }
}

/// Keeps exactly the `(2r+1)²` tiles around the viewpoint resident.
#[derive(Resource, Debug)]
pub struct TerrainTileCache {
    tiles: HashMap<IVec2, TerrainTile>,
    tile_size: f64,
    active_range: i32,
    surface: TileSurface,
    secondary_surface: Option<TileSurface>,
    stats: TileStats,
}

impl TerrainTileCache {
    pub fn new(biome: &BiomeConfig, textures: &dyn GroundTextureProvider) -> Self {
        Self {
            tiles: HashMap::new(),
            tile_size: biome.tile_size,
            active_range: biome.active_range,
            surface: TileSurface::resolve(textures, &biome.ground),
            secondary_surface: biome
                .secondary
                .as_ref()
                .map(|layer| TileSurface::resolve(textures, &layer.ground)),
            stats: TileStats::default(),
        }
    }

    pub fn surface(&self) -> &TileSurface {
        &self.surface
    }

    pub fn secondary_surface(&self) -> Option<&TileSurface> {
        self.secondary_surface.as_ref()
    }

    /// Tile whose centre is nearest to `(x, z)`; halves round toward +∞.
    pub fn tile_key_for(&self, x: f64, z: f64) -> IVec2 {
        IVec2::new(
            (x / self.tile_size + 0.5).floor() as i32,
            (z / self.tile_size + 0.5).floor() as i32,
        )
    }

    pub fn needed_keys(&self, center: IVec2) -> Vec<IVec2> {
        let r = self.active_range;
        (-r..=r)
            .flat_map(|dx| (-r..=r).map(move |dz| center + IVec2::new(dx, dz)))
            .collect()
    }

    /// Creates missing tiles around `viewpoint` and releases the rest.
    pub fn update(&mut self, viewpoint: &Vector3<f64>, model: &TerrainHeightModel) -> TileDiff {
        let center = self.tile_key_for(viewpoint.x, viewpoint.z);
        let needed = self.needed_keys(center);
        let mut diff = TileDiff::default();

        for &key in &needed {
            if !self.tiles.contains_key(&key) {
                self.tiles.insert(key, Self::build_tile(key, model));
                self.stats.created += 1;
                diff.created.push(key);
            }
        }

        let needed: HashSet<IVec2> = needed.into_iter().collect();
        let stale: Vec<IVec2> = self
            .tiles
            .keys()
            .filter(|key| !needed.contains(key))
            .copied()
            .collect();
        for key in stale {
            self.release(key);
            diff.removed.push(key);
        }

        if !diff.is_empty() {
            debug!(
                "Terrain around {:?}: {} tiles created, {} released, {} resident",
                center,
                diff.created.len(),
                diff.removed.len(),
                self.tiles.len()
            );
        }

        diff
    }

    fn build_tile(key: IVec2, model: &TerrainHeightModel) -> TerrainTile {
        let grid = TileGrid::from_biome(key, model.biome());
        let primary = grid.build(|x, z| model.height(x, z), |h| model.snow_cover(h));
        let secondary = model
            .biome()
            .secondary
            .as_ref()
            .map(|layer| grid.build(|x, z| model.layer_height(layer, x, z), |_| None));

        TerrainTile {
            key,
            origin: grid.origin(),
            primary,
            secondary,
            alive: true,
        }
    }

    // Geometry is freed before the entry is dropped
    fn release(&mut self, key: IVec2) {
        if let Some(tile) = self.tiles.get_mut(&key) {
            tile.release();
            self.stats.released += 1;
        }
        self.tiles.remove(&key);
    }

    /// Releases every tile, e.g. when a session ends.
    pub fn clear(&mut self) -> Vec<IVec2> {
        let keys: Vec<IVec2> = self.tiles.keys().copied().collect();
        for &key in &keys {
            self.release(key);
        }
        keys
    }

    pub fn get(&self, key: IVec2) -> Option<&TerrainTile> {
        self.tiles.get(&key)
    }

    pub fn contains(&self, key: IVec2) -> bool {
        self.tiles.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &IVec2> {
        self.tiles.keys()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn stats(&self) -> TileStats {
        self.stats
    }
}
