pub mod assets;
pub mod config;
pub mod state;

pub use assets::*;
pub use config::*;
pub use state::*;
