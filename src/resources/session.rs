use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stamp carried by anything started during one session generation, e.g. an
/// in-flight asset load. Results bearing a stale stamp are discarded.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SessionState {
    generation: u64,
    pub paused: bool,
}

impl SessionState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> SessionToken {
        SessionToken(self.generation)
    }

    pub fn accepts(&self, token: SessionToken) -> bool {
        token.0 == self.generation
    }

    /// Invalidates every outstanding token and unpauses.
    pub fn begin_new_generation(&mut self) -> SessionToken {
        self.generation += 1;
        self.paused = false;
        self.token()
    }
}

/// Ask for the aircraft to be put back on the runway.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartRequest;

#[derive(Event, Debug, Clone, Copy)]
pub struct PauseRequest {
    pub paused: bool,
}

/// Run condition for everything that advances the world.
pub fn simulation_running(session: Res<SessionState>) -> bool {
    !session.paused
}
