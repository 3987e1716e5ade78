use bevy::prelude::*;

use crate::resources::terrain::BiomeConfig;

/// Renderer-agnostic vertex data for one layer of a tile, in tile-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    /// Per-vertex snow cover, empty when the biome has no snow line.
    pub snow: Vec<f32>,
}

impl TileMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Drops every buffer so the memory is returned before the tile goes away.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn is_released(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }
}

/// Regular grid covering one tile plus a small overlap to hide seams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    pub key: IVec2,
    pub tile_size: f64,
    pub segments: u32,
    pub overlap: f32,
    pub repeat: [f32; 2],
}

impl TileGrid {
    pub fn from_biome(key: IVec2, biome: &BiomeConfig) -> Self {
        Self {
            key,
            tile_size: biome.tile_size,
            segments: biome.segments,
            overlap: biome.overlap,
            repeat: biome.texture_repeat,
        }
    }

    /// World position of the tile centre; vertices are relative to it.
    pub fn origin(&self) -> Vec3 {
        Vec3::new(
            (self.key.x as f64 * self.tile_size) as f32,
            0.0,
            (self.key.y as f64 * self.tile_size) as f32,
        )
    }

    pub fn build<H, S>(&self, height: H, snow: S) -> TileMesh
    where
        H: Fn(f64, f64) -> f64,
        S: Fn(f64) -> Option<f32>,
    {
        let n = self.segments.max(1) as usize;
        let stride = n + 1;
        let extent = self.tile_size + self.overlap as f64;
        let step = extent / n as f64;
        let half = extent / 2.0;
        let world_x = self.key.x as f64 * self.tile_size;
        let world_z = self.key.y as f64 * self.tile_size;

        let local = |i: usize| -half + i as f64 * step;

        let mut heights = Vec::with_capacity(stride * stride);
        for row in 0..stride {
            for col in 0..stride {
                heights.push(height(world_x + local(col), world_z + local(row)));
            }
        }

        let mut positions = Vec::with_capacity(heights.len());
        let mut normals = Vec::with_capacity(heights.len());
        let mut uvs = Vec::with_capacity(heights.len());

        for row in 0..stride {
            for col in 0..stride {
                let h = heights[row * stride + col];
                positions.push([local(col) as f32, h as f32, local(row) as f32]);

                // Central differences, one-sided on the border
                let (left, right) = (col.saturating_sub(1), (col + 1).min(n));
                let (down, up) = (row.saturating_sub(1), (row + 1).min(n));
                let dhdx = (heights[row * stride + right] - heights[row * stride + left])
                    / ((right - left) as f64 * step);
                let dhdz = (heights[up * stride + col] - heights[down * stride + col])
                    / ((up - down) as f64 * step);
                let normal = Vec3::new(-dhdx as f32, 1.0, -dhdz as f32).normalize();
                normals.push(normal.to_array());

                uvs.push([
                    col as f32 / n as f32 * self.repeat[0],
                    row as f32 / n as f32 * self.repeat[1],
                ]);
            }
        }

        let mut indices = Vec::with_capacity(n * n * 6);
        for row in 0..n {
            for col in 0..n {
                let a = (row * stride + col) as u32;
                let b = a + 1;
                let c = a + stride as u32;
                let d = c + 1;
                // Counter-clockwise seen from above
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        let snow = heights
            .iter()
            .map(|&h| snow(h))
            .collect::<Option<Vec<f32>>>()
            .unwrap_or_default();

        TileMesh {
            positions,
            normals,
            uvs,
            indices,
            snow,
        }
    }
}
