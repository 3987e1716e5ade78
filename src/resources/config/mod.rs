pub mod physics;
pub mod simulation;

pub use physics::{PhysicsConfig, ProbePattern};
pub use simulation::SimulationConfig;
