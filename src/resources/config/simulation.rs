use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::physics::PhysicsConfig;
use crate::components::AircraftSource;
use crate::resources::terrain::MapSource;
use crate::utils::ConfigError;

/// Top-level session setup, loadable from YAML.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed world seed; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub aircraft: AircraftSource,
    #[serde(default)]
    pub map: MapSource,
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Where earned milestones are persisted between runs.
    #[serde(default)]
    pub milestones_path: Option<PathBuf>,
    pub frame_time: f64, // [s] per headless frame
    pub duration: f64,   // [s] of headless flight
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            aircraft: AircraftSource::default(),
            map: MapSource::default(),
            physics: PhysicsConfig::default(),
            milestones_path: None,
            frame_time: 1.0 / 60.0,
            duration: 120.0,
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: SimulationConfig = serde_yaml::from_reader(file)?;
        if !(config.frame_time > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "frame_time must be positive, got {}",
                config.frame_time
            )));
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        (self.duration / self.frame_time).round().max(0.0) as usize
    }
}
