use serde::{Deserialize, Serialize};

/// How a secondary layer turns raw noise into a surface height above its offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerShaping {
    /// Flat sheet, e.g. a water table.
    Static { height: f64 },
    /// Flat sheet that bobs in presentation only; collision uses `height`.
    AnimatedSurface {
        height: f64,
        amplitude: f64,
        period: f64,
    },
    /// Smooth islands where a coarse mask exceeds `threshold`.
    IslandMask { threshold: f64 },
    /// Steep flanks with flat tops clamped at `cliff_height`.
    IcebergCliff { cliff_height: f64 },
    /// Sharp ridges whose crests are clamped at `ridge_height`.
    RidgeClamp { ridge_height: f64 },
}

impl LayerShaping {
    /// Presentation-only vertical offset of the layer at time `t` [s].
    pub fn surface_offset(&self, t: f64) -> f64 {
        match *self {
            LayerShaping::AnimatedSurface {
                amplitude, period, ..
            } if period > 0.0 => amplitude * (std::f64::consts::TAU * t / period).sin(),
            _ => 0.0,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, LayerShaping::AnimatedSurface { .. })
    }
}

/// A second height field drawn alongside the ground, optionally hanging from above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainLayerSpec {
    pub ground: String,
    pub max_height: f64,
    pub noise_scale: f64,
    /// Shifts the sample point so the layer does not mirror the primary terrain.
    #[serde(default)]
    pub noise_offset: f64,
    pub vertical_offset: f64,
    /// Surface hangs downward from `vertical_offset` and blocks from above.
    #[serde(default)]
    pub inverted: bool,
    pub shaping: LayerShaping,
}

impl TerrainLayerSpec {
    pub fn lava(vertical_offset: f64) -> Self {
        Self {
            ground: "lava".to_string(),
            max_height: 0.0,
            noise_scale: 0.0,
            noise_offset: 0.0,
            vertical_offset,
            inverted: false,
            shaping: LayerShaping::AnimatedSurface {
                height: 0.0,
                amplitude: 0.6,
                period: 6.0,
            },
        }
    }
}
