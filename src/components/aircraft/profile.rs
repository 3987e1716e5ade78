use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::resources::terrain::RunwayConfig;
use crate::utils::ConfigError;

/// Built-in aircraft. `Custom` names a profile loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    Cessna,
    Boeing787,
    Custom(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AircraftSource {
    Programmed(AircraftType),
    File(PathBuf),
}

impl Default for AircraftSource {
    fn default() -> Self {
        AircraftSource::Programmed(AircraftType::Cessna)
    }
}

/// Half extents of the collision box, independent of the visual model [m].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDimensions {
    pub half_width: f64,
    pub half_height: f64,
    pub half_depth: f64,
}

impl Default for BodyDimensions {
    /// Plain 2 x 0.5 x 5 box used when no model is available.
    fn default() -> Self {
        Self {
            half_width: 1.0,
            half_height: 0.25,
            half_depth: 2.5,
        }
    }
}

/// Visual model to attach when a renderer is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub path: String,
    pub scale: f32,
    /// Euler XYZ rotation applied to the scene root [rad].
    pub rotation: [f32; 3],
    pub offset: [f32; 3],
}

/// Per-aircraft tuning for the arcade flight model.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub name: String,
    pub gravity: f64,
    pub thrust_force: f64,
    pub max_thrust: f64,
    pub reverse_thrust_force: f64,
    pub drag_coefficient: f64,
    pub lift_coefficient: f64,
    pub pitch_speed: f64,
    pub roll_speed: f64,
    pub max_speed_landing: f64,
    pub max_sink_rate_landing: f64,
    pub takeoff_speed: f64,
    pub airborne_confirmation_time: f64,
    pub ground_level: f64,
    pub runway: RunwayConfig,
    pub sink_rate_threshold: f64,
    /// Gear can be raised, so landing with it up is possible.
    #[serde(default)]
    pub retractable_gear: bool,
    #[serde(default)]
    pub body: BodyDimensions,
    #[serde(default)]
    pub model: Option<ModelSpec>,
}

impl Default for AircraftProfile {
    fn default() -> Self {
        Self::cessna()
    }
}

impl AircraftProfile {
    pub fn new(source: AircraftSource) -> Result<Self, ConfigError> {
        match source {
            AircraftSource::Programmed(aircraft_type) => Ok(Self::from_programmed(aircraft_type)),
            AircraftSource::File(path) => Self::from_file(path),
        }
    }

    pub fn from_programmed(aircraft_type: AircraftType) -> Self {
        match aircraft_type {
            AircraftType::Cessna => Self::cessna(),
            AircraftType::Boeing787 => Self::boeing_787(),
            AircraftType::Custom(name) => Self {
                name,
                model: None,
                body: BodyDimensions::default(),
                ..Self::cessna()
            },
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        let profile: AircraftProfile = serde_yaml::from_str(&file_contents)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    fn cessna() -> Self {
        Self {
            name: "Cessna".to_string(),
            gravity: 20.0,
            thrust_force: 10.0,
            max_thrust: 300.0,
            reverse_thrust_force: 10.0,
            drag_coefficient: 0.08,
            lift_coefficient: 0.01,
            pitch_speed: 0.2,
            roll_speed: 0.3,
            max_speed_landing: 18.0,
            max_sink_rate_landing: 2.5,
            takeoff_speed: 25.0,
            airborne_confirmation_time: 5.0,
            ground_level: 0.5,
            runway: RunwayConfig::new(30.0, 300.0),
            sink_rate_threshold: 5.0,
            retractable_gear: false,
            body: BodyDimensions {
                half_width: 5.5,
                half_height: 1.3,
                half_depth: 4.2,
            },
            model: Some(ModelSpec {
                path: "model/model.glb".to_string(),
                scale: 0.01,
                rotation: [
                    std::f32::consts::FRAC_PI_2,
                    std::f32::consts::PI,
                    std::f32::consts::FRAC_PI_2 + std::f32::consts::PI,
                ],
                offset: [0.0, -1.675, 0.0],
            }),
        }
    }

    fn boeing_787() -> Self {
        Self {
            name: "Boeing787".to_string(),
            gravity: 25.0,
            thrust_force: 200.0,
            max_thrust: 1000.0,
            reverse_thrust_force: 50.0,
            drag_coefficient: 0.05,
            lift_coefficient: 0.002,
            pitch_speed: 0.05,
            roll_speed: 0.2,
            max_speed_landing: 70.0,
            max_sink_rate_landing: 3.0,
            takeoff_speed: 60.0,
            airborne_confirmation_time: 3.0,
            ground_level: 1.0,
            runway: RunwayConfig::new(100.0, 1000.0),
            sink_rate_threshold: 10.0,
            retractable_gear: true,
            body: BodyDimensions {
                half_width: 30.0,
                half_height: 8.0,
                half_depth: 29.0,
            },
            model: Some(ModelSpec {
                path: "model4/model (2).glb".to_string(),
                scale: 0.03,
                rotation: [0.0, 0.0, 0.0],
                offset: [0.0, -11.95, 35.0],
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("thrust_force", self.thrust_force),
            ("max_thrust", self.max_thrust),
            ("max_speed_landing", self.max_speed_landing),
            ("max_sink_rate_landing", self.max_sink_rate_landing),
            ("airborne_confirmation_time", self.airborne_confirmation_time),
            ("runway.width", self.runway.width),
            ("runway.length", self.runway.length),
            ("body.half_width", self.body.half_width),
            ("body.half_height", self.body.half_height),
            ("body.half_depth", self.body.half_depth),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("reverse_thrust_force", self.reverse_thrust_force),
            ("drag_coefficient", self.drag_coefficient),
            ("lift_coefficient", self.lift_coefficient),
            ("pitch_speed", self.pitch_speed),
            ("roll_speed", self.roll_speed),
            ("sink_rate_threshold", self.sink_rate_threshold),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}
