mod controls;
mod event;
mod profile;
mod state;

pub use controls::{FlightCommand, ThrustIntent};
pub use event::{CrashKind, FlightEvent, Milestone};
pub use profile::{AircraftProfile, AircraftSource, AircraftType, BodyDimensions, ModelSpec};
pub use state::{
    AircraftState, CrashRecord, FlightFlags, FlightPhase, FlightTimers, FlightWarnings,
};
