//! Arcade flight model: pilot input, forces, the ground/air state machine and
//! terrain warnings, plus the Bevy systems that drive it.

pub mod controls;
mod dynamics;
pub mod forces;
pub mod ground;
mod systems;
pub mod warnings;

pub use dynamics::{FlightDynamics, StepReport};
pub use systems::{flight_step_system, pause_system, restart_system, sync_aircraft_transform};
pub use warnings::WarningOutcome;
