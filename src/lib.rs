//! Arcade flight simulation over procedurally streamed terrain, hosted in Bevy.

pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;
