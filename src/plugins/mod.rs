mod flight;
mod render;
mod simulation;
mod staging;
mod terrain;

pub use flight::FlightPlugin;
pub use render::{AircraftRenderPlugin, TerrainRenderPlugin};
pub use simulation::SimulationPlugin;
pub use staging::{SimulationSet, StartupSequencePlugin, StartupStage};
pub use terrain::TerrainPlugin;
