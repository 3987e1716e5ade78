use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::components::Milestone;
use crate::utils::ConfigError;

/// Milestones earned so far. Outlives restarts so each is awarded once.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestoneLedger {
    earned: Vec<Milestone>,
    #[serde(skip)]
    index: HashSet<Milestone>,
}

impl MilestoneLedger {
    /// Records `milestone`; true only the first time.
    pub fn award(&mut self, milestone: Milestone) -> bool {
        if self.index.insert(milestone) {
            self.earned.push(milestone);
            info!("Milestone unlocked: {} ({})", milestone.title(), milestone.id());
            true
        } else {
            false
        }
    }

    pub fn has(&self, milestone: Milestone) -> bool {
        self.index.contains(&milestone)
    }

    /// In the order they were earned.
    pub fn earned(&self) -> &[Milestone] {
        &self.earned
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let mut ledger: MilestoneLedger = serde_yaml::from_reader(file)?;
        ledger.index = ledger.earned.iter().copied().collect();
        Ok(ledger)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}
