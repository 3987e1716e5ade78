use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{LayerShaping, RunwayConfig, TerrainLayerSpec};
use crate::utils::{ConfigError, DEFAULT_TILE_OVERLAP};

/// Built-in maps. `Custom` names a biome that was loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapType {
    Desert,
    Hilly,
    Mountain,
    Snowfield,
    Lagoon,
    Volcano,
    Cavern,
    Arctic,
    Dolomites,
    Custom(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MapSource {
    Programmed(MapType),
    File(PathBuf),
}

impl Default for MapSource {
    fn default() -> Self {
        MapSource::Programmed(MapType::Mountain)
    }
}

/// Everything the height model and tile cache need to know about a map.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub name: String,
    pub ground: String,
    pub max_terrain_height: f64,
    pub tile_size: f64,
    pub segments: u32,
    pub active_range: i32,
    pub noise_scale: f64,
    #[serde(default)]
    pub rugged: bool,
    #[serde(default)]
    pub amplify: bool,
    #[serde(default = "default_overlap")]
    pub overlap: f32,
    #[serde(default = "default_repeat")]
    pub texture_repeat: [f32; 2],
    #[serde(default)]
    pub tint: Option<[f32; 3]>,
    /// Height above which vertices are flagged as snow covered.
    #[serde(default)]
    pub snow_line: Option<f64>,
    /// Overrides the runway footprint the aircraft profile asks for.
    #[serde(default)]
    pub runway: Option<RunwayConfig>,
    #[serde(default)]
    pub secondary: Option<TerrainLayerSpec>,
}

fn default_overlap() -> f32 {
    DEFAULT_TILE_OVERLAP
}

fn default_repeat() -> [f32; 2] {
    [10.0, 10.0]
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self::from_programmed(MapType::Mountain)
    }
}

impl BiomeConfig {
    pub fn new(source: MapSource) -> Result<Self, ConfigError> {
        match source {
            MapSource::Programmed(map_type) => Ok(Self::from_programmed(map_type)),
            MapSource::File(path) => Self::from_file(path),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        let config: BiomeConfig = serde_yaml::from_str(&file_contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_programmed(map_type: MapType) -> Self {
        match map_type {
            MapType::Desert => Self::base("desert", "sand", 30.0, 64, 3, 0.003),
            MapType::Hilly => Self {
                texture_repeat: [20.0, 20.0],
                ..Self::base("hilly", "grass", 120.0, 128, 1, 0.002)
            },
            MapType::Mountain => Self {
                rugged: true,
                ..Self::base("mountain", "dirt", 200.0, 150, 2, 0.0005)
            },
            MapType::Snowfield => Self {
                texture_repeat: [5.0, 5.0],
                tint: Some([1.0, 1.0, 1.0]),
                ..Self::base("snowfield", "snow", 50.0, 64, 1, 0.003)
            },
            MapType::Lagoon => Self {
                secondary: Some(TerrainLayerSpec {
                    ground: "grass".to_string(),
                    max_height: 120.0,
                    noise_scale: 0.002,
                    noise_offset: 7919.0,
                    vertical_offset: -1.0,
                    inverted: false,
                    shaping: LayerShaping::IslandMask { threshold: 0.2 },
                }),
                ..Self::base("lagoon", "water", 4.0, 64, 1, 0.004)
            },
            MapType::Volcano => Self {
                secondary: Some(TerrainLayerSpec::lava(-10.0)),
                ..Self::base("volcano", "darkrock", 150.0, 96, 1, 0.002)
            },
            MapType::Cavern => Self {
                rugged: true,
                amplify: true,
                secondary: Some(TerrainLayerSpec {
                    ground: "rock2".to_string(),
                    max_height: 400.0,
                    noise_scale: 0.001,
                    noise_offset: 3571.0,
                    vertical_offset: 900.0,
                    inverted: true,
                    shaping: LayerShaping::RidgeClamp {
                        ridge_height: 300.0,
                    },
                }),
                ..Self::base("cavern", "rock", 300.0, 128, 1, 0.0005)
            },
            MapType::Arctic => Self {
                texture_repeat: [5.0, 5.0],
                snow_line: Some(20.0),
                secondary: Some(TerrainLayerSpec {
                    ground: "snow".to_string(),
                    max_height: 200.0,
                    noise_scale: 0.002,
                    noise_offset: 5003.0,
                    vertical_offset: -2.0,
                    inverted: false,
                    shaping: LayerShaping::IcebergCliff { cliff_height: 80.0 },
                }),
                ..Self::base("arctic", "snow", 30.0, 64, 1, 0.003)
            },
            MapType::Dolomites => Self {
                texture_repeat: [20.0, 20.0],
                snow_line: Some(600.0),
                secondary: Some(TerrainLayerSpec {
                    ground: "rock".to_string(),
                    max_height: 900.0,
                    noise_scale: 0.0008,
                    noise_offset: 1237.0,
                    vertical_offset: -10.0,
                    inverted: false,
                    shaping: LayerShaping::RidgeClamp {
                        ridge_height: 700.0,
                    },
                }),
                ..Self::base("dolomites", "grass", 60.0, 128, 1, 0.002)
            },
            MapType::Custom(name) => Self {
                name,
                ..Self::from_programmed(MapType::Mountain)
            },
        }
    }

    fn base(
        name: &str,
        ground: &str,
        max_terrain_height: f64,
        segments: u32,
        active_range: i32,
        noise_scale: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            ground: ground.to_string(),
            max_terrain_height,
            tile_size: 1500.0,
            segments,
            active_range,
            noise_scale,
            rugged: false,
            amplify: false,
            overlap: DEFAULT_TILE_OVERLAP,
            texture_repeat: default_repeat(),
            tint: None,
            snow_line: None,
            runway: None,
            secondary: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if self.segments == 0 {
            return Err(ConfigError::ValidationError(
                "segments must be at least 1".to_string(),
            ));
        }
        if self.active_range < 0 {
            return Err(ConfigError::ValidationError(format!(
                "active_range must not be negative, got {}",
                self.active_range
            )));
        }
        if self.max_terrain_height < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_terrain_height must not be negative, got {}",
                self.max_terrain_height
            )));
        }
        if let Some(layer) = &self.secondary {
            if let LayerShaping::IslandMask { threshold } = layer.shaping {
                if !(-1.0..1.0).contains(&threshold) {
                    return Err(ConfigError::ValidationError(format!(
                        "island threshold must lie in [-1, 1), got {threshold}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The runway this map flattens for, given what the aircraft asks for.
    pub fn effective_runway(&self, requested: RunwayConfig) -> RunwayConfig {
        self.runway.unwrap_or(requested)
    }

    /// Number of tiles resident around any viewpoint.
    pub fn resident_tiles(&self) -> usize {
        let side = (2 * self.active_range + 1) as usize;
        side * side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ALL_MAPS: [MapType; 9] = [
        MapType::Desert,
        MapType::Hilly,
        MapType::Mountain,
        MapType::Snowfield,
        MapType::Lagoon,
        MapType::Volcano,
        MapType::Cavern,
        MapType::Arctic,
        MapType::Dolomites,
    ];

    #[test]
    fn test_presets_are_valid() {
        for map in ALL_MAPS {
            let biome = BiomeConfig::from_programmed(map.clone());
            assert!(biome.validate().is_ok(), "{map:?} failed validation");
        }
    }

    #[test]
    fn test_classic_map_parameters() {
        let desert = BiomeConfig::from_programmed(MapType::Desert);
        assert_eq!(desert.segments, 64);
        assert_eq!(desert.active_range, 3);
        assert_eq!(desert.resident_tiles(), 49);

        let mountain = BiomeConfig::from_programmed(MapType::Mountain);
        assert!(mountain.rugged);
        assert_eq!(mountain.max_terrain_height, 200.0);
        assert_eq!(mountain.noise_scale, 0.0005);
    }

    #[test]
    fn test_custom_keeps_name() {
        let biome = BiomeConfig::from_programmed(MapType::Custom("canyon".into()));
        assert_eq!(biome.name, "canyon");
    }

    #[test]
    fn test_from_file_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "name: test\nground: grass\nmax_terrain_height: 40.0\ntile_size: 200.0\n\
             segments: 8\nactive_range: 1\nnoise_scale: 0.01\n"
        )?;

        let biome = BiomeConfig::new(MapSource::File(file.path().to_path_buf()))?;
        assert_eq!(biome.overlap, DEFAULT_TILE_OVERLAP);
        assert_eq!(biome.texture_repeat, [10.0, 10.0]);
        assert!(!biome.rugged);
        assert!(biome.secondary.is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "name: broken\nground: grass\nmax_terrain_height: 40.0\ntile_size: 0.0\n\
             segments: 8\nactive_range: 1\nnoise_scale: 0.01\n"
        )?;

        let result = BiomeConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        Ok(())
    }

    #[test]
    fn test_map_runway_overrides_aircraft() {
        let mut biome = BiomeConfig::from_programmed(MapType::Hilly);
        let requested = RunwayConfig::new(100.0, 1000.0);
        assert_eq!(biome.effective_runway(requested), requested);

        biome.runway = Some(RunwayConfig::new(40.0, 600.0));
        assert_eq!(biome.effective_runway(requested), RunwayConfig::new(40.0, 600.0));
    }
}
