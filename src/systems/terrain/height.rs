use bevy::prelude::*;

use super::noise::NoiseField;
use crate::resources::terrain::{BiomeConfig, LayerShaping, RunwayConfig, TerrainLayerSpec};
use crate::utils::{
    AMPLIFY_KNEE, CLIFF_STEEPNESS, ISLAND_MASK_SCALE, LAYER_RUNWAY_CLEARANCE, RIDGE_SHARPNESS,
    ROLLING_BAND_FACTOR, RUGGED_LACUNARITY, RUGGED_OCTAVES, RUGGED_PEAK_EXPONENT,
    RUGGED_PERSISTENCE, RUGGED_SMOOTH_RADIUS, RUNWAY_BED_HEIGHT,
};

/// Pure height field for one session: noise, biome and runway bound together.
///
/// Every query is a function of `(x, z)` only, so tiles, collision and
/// warnings all agree on the ground.
#[derive(Resource, Debug, Clone)]
pub struct TerrainHeightModel {
    noise: NoiseField,
    biome: BiomeConfig,
    runway: RunwayConfig,
}

impl TerrainHeightModel {
    pub fn new(noise: NoiseField, biome: BiomeConfig, runway: RunwayConfig) -> Self {
        Self {
            noise,
            biome,
            runway,
        }
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn biome(&self) -> &BiomeConfig {
        &self.biome
    }

    pub fn runway(&self) -> &RunwayConfig {
        &self.runway
    }

    /// Ground height at world `(x, z)`.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        if self.runway.carve_contains(x, z) {
            return RUNWAY_BED_HEIGHT;
        }

        if self.biome.rugged {
            self.rugged_height(x, z)
        } else {
            self.rolling_height(x, z)
        }
    }

    fn rugged_height(&self, x: f64, z: f64) -> f64 {
        let ridges = self.noise.ridged(
            x,
            z,
            self.biome.noise_scale,
            RUGGED_OCTAVES,
            RUGGED_PERSISTENCE,
            RUGGED_LACUNARITY,
        );
        let peaks = self.biome.max_terrain_height * ridges.powf(RUGGED_PEAK_EXPONENT);

        // Fade in with squared distance from the origin
        let smooth = ((x * x + z * z) / (RUGGED_SMOOTH_RADIUS * RUGGED_SMOOTH_RADIUS)).min(1.0);
        let height = peaks * smooth;

        if self.biome.amplify {
            amplify(height)
        } else {
            height
        }
    }

    fn rolling_height(&self, x: f64, z: f64) -> f64 {
        let scale = self.biome.noise_scale;
        let raw = self.noise.sample(x * scale, z * scale) * self.biome.max_terrain_height;

        let band = ROLLING_BAND_FACTOR * self.runway.width;
        let dx = (x.abs() - self.runway.width).max(0.0);
        let dz = (z.abs() - self.runway.length).max(0.0);
        let factor = (dx / band).min(1.0).max((dz / band).min(1.0));

        raw * factor
    }

    /// Height of the secondary layer at `(x, z)`, if the biome has one.
    pub fn secondary_height(&self, x: f64, z: f64) -> Option<f64> {
        self.biome
            .secondary
            .as_ref()
            .map(|layer| self.layer_height(layer, x, z))
    }

    pub fn layer_height(&self, layer: &TerrainLayerSpec, x: f64, z: f64) -> f64 {
        let carved = self.runway.carve_contains(x, z);
        if carved && layer.inverted {
            return layer.vertical_offset;
        }

        let surface = self.layer_surface(layer, x, z);
        let height = if layer.inverted {
            layer.vertical_offset - surface
        } else {
            layer.vertical_offset + surface
        };

        if carved {
            height.min(RUNWAY_BED_HEIGHT - LAYER_RUNWAY_CLEARANCE)
        } else {
            height
        }
    }

    fn layer_surface(&self, layer: &TerrainLayerSpec, x: f64, z: f64) -> f64 {
        let sx = (x + layer.noise_offset) * layer.noise_scale;
        let sz = (z + layer.noise_offset) * layer.noise_scale;

        match layer.shaping {
            LayerShaping::Static { height } | LayerShaping::AnimatedSurface { height, .. } => height,
            LayerShaping::IslandMask { threshold } => {
                let mask = self
                    .noise
                    .sample(sx * ISLAND_MASK_SCALE, sz * ISLAND_MASK_SCALE);
                let t = ((mask - threshold) / (1.0 - threshold)).clamp(0.0, 1.0);
                let relief = 0.5 + 0.5 * self.noise.sample(sx, sz);
                layer.max_height * smoothstep(t) * relief
            }
            LayerShaping::IcebergCliff { cliff_height } => {
                let n = self.noise.sample(sx, sz).max(0.0);
                (layer.max_height * n * CLIFF_STEEPNESS).min(cliff_height)
            }
            LayerShaping::RidgeClamp { ridge_height } => {
                let ridge = 1.0 - self.noise.sample(sx, sz).abs();
                (layer.max_height * ridge.powi(RIDGE_SHARPNESS)).min(ridge_height)
            }
        }
    }

    /// Snow cover in [0, 1] for a vertex at `height`, or `None` when the biome has no snow line.
    pub fn snow_cover(&self, height: f64) -> Option<f32> {
        let line = self.biome.snow_line?;
        let band = (line.abs() * 0.1).max(1.0);
        let t = ((height - (line - band)) / (2.0 * band)).clamp(0.0, 1.0);
        Some(smoothstep(t) as f32)
    }
}

/// Exaggerates everything above the knee quadratically; identity below it.
pub fn amplify(height: f64) -> f64 {
    if height > AMPLIFY_KNEE {
        AMPLIFY_KNEE + (height - AMPLIFY_KNEE).powi(2) / AMPLIFY_KNEE
    } else {
        height
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
