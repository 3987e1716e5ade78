pub mod aircraft;
pub mod terrain;

pub use aircraft::{
    AircraftProfile, AircraftSource, AircraftState, AircraftType, BodyDimensions, CrashKind,
    CrashRecord, FlightCommand, FlightEvent, FlightFlags, FlightPhase, FlightTimers,
    FlightWarnings, Milestone, ModelSpec, ThrustIntent,
};
pub use terrain::{TerrainLayerKind, TerrainTileComponent};
