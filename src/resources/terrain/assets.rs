use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("No ground textures registered for '{0}'")]
    MissingGround(String),
}

/// Texture set for one ground type, paths relative to the asset root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTextures {
    pub color: String,
    pub displacement: String,
    pub ambient_occlusion: Option<String>,
    pub roughness: String,
    pub normal: String,
    #[serde(default)]
    pub emissive: Option<String>,
}

impl GroundTextures {
    /// The usual `<stem>_1K-JPG_<Map>.jpg` layout under `textures/ground/<dir>`.
    fn standard(dir: &str, stem: &str) -> Self {
        let path = |map: &str| format!("textures/ground/{dir}/{stem}_1K-JPG_{map}.jpg");
        Self {
            color: path("Color"),
            displacement: path("Displacement"),
            ambient_occlusion: Some(path("AmbientOcclusion")),
            roughness: path("Roughness"),
            normal: path("NormalGL"),
            emissive: None,
        }
    }
}

/// Resolves a biome's ground-type identifier to textures.
pub trait GroundTextureProvider {
    fn ground_textures(&self, ground: &str) -> Result<GroundTextures, AssetError>;
}

#[derive(Resource, Debug, Clone)]
pub struct GroundTextureCatalog {
    entries: HashMap<String, GroundTextures>,
}

impl Default for GroundTextureCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert("sand", GroundTextures::standard("sand", "Ground079L"));
        catalog.insert("grass", GroundTextures::standard("grass", "Grass008"));
        catalog.insert("dirt", GroundTextures::standard("dirt", "Ground048"));
        catalog.insert("rock", GroundTextures::standard("rock", "Rock029"));
        catalog.insert("snow", GroundTextures::standard("snow", "Snow008A"));
        catalog.insert(
            "road2",
            GroundTextures {
                ambient_occlusion: None,
                ..GroundTextures::standard("road", "Road006")
            },
        );
        catalog.insert(
            "water",
            GroundTextures {
                color: "textures/ground/water/Water_002_COLOR.jpg".to_string(),
                displacement: "textures/ground/water/Water_002_DISP.png".to_string(),
                ambient_occlusion: Some("textures/ground/water/Water_002_OCC.jpg".to_string()),
                roughness: "textures/ground/water/Water_002_ROUGH.jpg".to_string(),
                normal: "textures/ground/water/Water_002_NORM.jpg".to_string(),
                emissive: None,
            },
        );
        catalog.insert("darkrock", GroundTextures::standard("darkrock", "Rock035"));
        catalog.insert(
            "lava",
            GroundTextures {
                color: "textures/ground/lava/Lava001_1K-JPG_Color.jpg".to_string(),
                ambient_occlusion: None,
                emissive: Some("textures/ground/lava/Lava002_1K-JPG_Emission.jpg".to_string()),
                ..GroundTextures::standard("lava", "Lava002")
            },
        );
        catalog.insert("rock2", GroundTextures::standard("rock2", "Rocks011"));
        catalog
    }
}

impl GroundTextureCatalog {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, ground: impl Into<String>, textures: GroundTextures) {
        self.entries.insert(ground.into(), textures);
    }

    pub fn contains(&self, ground: &str) -> bool {
        self.entries.contains_key(ground)
    }
}

impl GroundTextureProvider for GroundTextureCatalog {
    fn ground_textures(&self, ground: &str) -> Result<GroundTextures, AssetError> {
        self.entries
            .get(ground)
            .cloned()
            .ok_or_else(|| AssetError::MissingGround(ground.to_string()))
    }
}

/// What a tile layer is drawn with once its ground type has been looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum TileSurface {
    Textured(GroundTextures),
    /// Lookup failed; drawn in a flat warning colour.
    Fallback { ground: String },
}

impl TileSurface {
    pub fn resolve(provider: &dyn GroundTextureProvider, ground: &str) -> Self {
        match provider.ground_textures(ground) {
            Ok(textures) => TileSurface::Textured(textures),
            Err(err) => {
                error!("{err}; terrain falls back to a flat material");
                TileSurface::Fallback {
                    ground: ground.to_string(),
                }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TileSurface::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_builtin_grounds() {
        let catalog = GroundTextureCatalog::default();
        for ground in [
            "sand", "grass", "dirt", "rock", "snow", "road2", "water", "darkrock", "lava", "rock2",
        ] {
            assert!(catalog.contains(ground), "missing {ground}");
        }
    }

    #[test]
    fn test_standard_layout_paths() {
        let grass = GroundTextureCatalog::default()
            .ground_textures("grass")
            .unwrap();
        assert_eq!(
            grass.color,
            "textures/ground/grass/Grass008_1K-JPG_Color.jpg"
        );
        assert_eq!(
            grass.normal,
            "textures/ground/grass/Grass008_1K-JPG_NormalGL.jpg"
        );
    }

    #[test]
    fn test_lava_is_emissive_without_occlusion() {
        let lava = GroundTextureCatalog::default().ground_textures("lava").unwrap();
        assert!(lava.emissive.is_some());
        assert!(lava.ambient_occlusion.is_none());
        assert_eq!(lava.color, "textures/ground/lava/Lava001_1K-JPG_Color.jpg");
    }

    #[test]
    fn test_unknown_ground_falls_back() {
        let catalog = GroundTextureCatalog::default();
        assert_eq!(
            catalog.ground_textures("sand2"),
            Err(AssetError::MissingGround("sand2".to_string()))
        );

        let surface = TileSurface::resolve(&catalog, "sand2");
        assert!(surface.is_fallback());
        assert!(!TileSurface::resolve(&catalog, "sand").is_fallback());
    }
}
