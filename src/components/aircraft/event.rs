use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrashKind {
    /// Came down inside the runway rectangle.
    RunwayCrashLanding,
    Terrain,
}

/// One-shot achievements, each awarded at most once per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    FirstFlight,
    FirstLanding,
    FirstCrash,
    FirstCrashLanding,
    GroundHugger,
    Altitude(u32),
    NoseDiver,
}

impl Milestone {
    pub fn id(&self) -> String {
        match self {
            Milestone::FirstFlight => "first_flight".to_string(),
            Milestone::FirstLanding => "first_landing".to_string(),
            Milestone::FirstCrash => "first_crash".to_string(),
            Milestone::FirstCrashLanding => "first_crash_landing".to_string(),
            Milestone::GroundHugger => "ground_hugger".to_string(),
            Milestone::Altitude(metres) => format!("altitude_{metres}"),
            Milestone::NoseDiver => "nose_diver".to_string(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Milestone::FirstFlight => "Wheels Up!".to_string(),
            Milestone::FirstLanding => "Touchdown Master".to_string(),
            Milestone::FirstCrash => "Mayday".to_string(),
            Milestone::FirstCrashLanding => "Crash Landing".to_string(),
            Milestone::GroundHugger => "Too Low? Never Heard of It".to_string(),
            Milestone::Altitude(500) => "Barely Airborne".to_string(),
            Milestone::Altitude(1000) => "Skybound".to_string(),
            Milestone::Altitude(2500) => "Cloud Surfer".to_string(),
            Milestone::Altitude(metres) => format!("Above {metres}m"),
            Milestone::NoseDiver => "Controlled-ish Descent".to_string(),
        }
    }
}

/// Discrete outcomes of a flight step.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlightEvent {
    Airborne,
    Landed { speed: f64, sink_rate: f64 },
    Crashed { reason: String, kind: CrashKind },
    Milestone(Milestone),
}
