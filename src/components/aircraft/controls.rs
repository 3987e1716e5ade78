use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrustIntent {
    Increase,
    Decrease,
    #[default]
    Hold,
}

/// Pilot intent for the next step, already debounced by whatever produced it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightCommand {
    pub thrust: ThrustIntent,
    /// -1..1, positive raises the nose.
    pub pitch: f64,
    /// -1..1, positive turns right.
    pub roll: f64,
    // Edge-triggered; consumed by the step that applies them
    pub toggle_gear: bool,
    pub toggle_engine: bool,
    pub toggle_park_brakes: bool,
}

impl FlightCommand {
    pub fn clear_toggles(&mut self) {
        self.toggle_gear = false;
        self.toggle_engine = false;
        self.toggle_park_brakes = false;
    }

    pub fn with_thrust(mut self, thrust: ThrustIntent) -> Self {
        self.thrust = thrust;
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch.clamp(-1.0, 1.0);
        self
    }

    pub fn with_roll(mut self, roll: f64) -> Self {
        self.roll = roll.clamp(-1.0, 1.0);
        self
    }
}
