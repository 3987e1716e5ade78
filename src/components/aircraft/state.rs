use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::{AircraftProfile, CrashKind};
use crate::resources::terrain::RunwayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightFlags {
    pub is_on_ground: bool,
    pub is_crashed: bool,
    /// Airborne for the full confirmation time since the last landing.
    pub confirmed_airborne: bool,
    pub has_been_airborne: bool,
    pub gear_deployed: bool,
    pub engine_off: bool,
    pub park_brakes: bool,
}

impl Default for FlightFlags {
    fn default() -> Self {
        Self {
            is_on_ground: true,
            is_crashed: false,
            confirmed_airborne: false,
            has_been_airborne: false,
            gear_deployed: true,
            engine_off: false,
            park_brakes: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightTimers {
    pub airborne: f64,         // [s] since the wheels last left the ground
    pub ground_proximity: f64, // [s] of continuous proximity warning
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightWarnings {
    pub terrain_ahead: bool,
    pub sink_rate: bool,
    pub ground_proximity: bool,
}

impl FlightWarnings {
    pub fn any(&self) -> bool {
        self.terrain_ahead || self.sink_rate || self.ground_proximity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashRecord {
    pub reason: String,
    pub kind: CrashKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    OnRunway,
    OnGround,
    AirborneUnconfirmed,
    AirborneConfirmed,
    Crashed,
}

/// Complete mutable state of one aircraft. Body frame is +Z forward, +Y up.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// Position in world space [m]
    pub position: Vector3<f64>,
    /// Attitude quaternion (rotation from body to world frame)
    pub orientation: UnitQuaternion<f64>,
    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,
    /// Angular velocity in body frame [rad/s]
    pub angular_velocity: Vector3<f64>,
    pub thrust: f64,
    pub flags: FlightFlags,
    pub timers: FlightTimers,
    pub warnings: FlightWarnings,
    pub crash: Option<CrashRecord>,
    /// Status line from the most recent step that produced one.
    pub message: Option<String>,
}

impl AircraftState {
    /// Parked on the runway centre line, facing along +Z.
    pub fn at_runway_start(profile: &AircraftProfile) -> Self {
        Self {
            position: Vector3::new(
                0.0,
                profile.ground_level + profile.body.half_height,
                profile.runway.spawn_z(),
            ),
            orientation: UnitQuaternion::identity(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            thrust: 0.0,
            flags: FlightFlags::default(),
            timers: FlightTimers::default(),
            warnings: FlightWarnings::default(),
            crash: None,
            message: None,
        }
    }

    pub fn reset(&mut self, profile: &AircraftProfile) {
        *self = Self::at_runway_start(profile);
    }

    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * Vector3::z()
    }

    pub fn up(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn horizontal_speed(&self) -> f64 {
        self.velocity.x.hypot(self.velocity.z)
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    /// Compass heading of the nose in degrees, 0..360, 0 along +Z.
    pub fn bearing(&self) -> f64 {
        let forward = self.forward();
        forward.x.atan2(forward.z).to_degrees().rem_euclid(360.0)
    }

    /// Positive when the nose points below the horizon [rad].
    pub fn nose_down_angle(&self) -> f64 {
        (-self.forward().y).clamp(-1.0, 1.0).asin()
    }

    pub fn flight_phase(&self, runway: &RunwayConfig) -> FlightPhase {
        if self.flags.is_crashed {
            FlightPhase::Crashed
        } else if self.flags.is_on_ground {
            if runway.contains(self.position.x, self.position.z) {
                FlightPhase::OnRunway
            } else {
                FlightPhase::OnGround
            }
        } else if self.flags.confirmed_airborne {
            FlightPhase::AirborneConfirmed
        } else {
            FlightPhase::AirborneUnconfirmed
        }
    }

    /// Bottom corners of the collision box in world space.
    pub fn belly_corners(&self, profile: &AircraftProfile) -> [Vector3<f64>; 4] {
        let hw = profile.body.half_width;
        let hh = profile.body.half_height;
        let hd = profile.body.half_depth;
        [
            Vector3::new(-hw, -hh, -hd),
            Vector3::new(hw, -hh, -hd),
            Vector3::new(-hw, -hh, hd),
            Vector3::new(hw, -hh, hd),
        ]
        .map(|corner| self.position + self.orientation * corner)
    }
}
