//! City Component
//!
//! A named location that aliens can occupy and destroy.

use serde::{Deserialize, Serialize};
use sim_graph::Identifiable;

use super::alien::AlienId;

/// A city on the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Unique name, doubles as the graph identity
    name: String,
    /// Aliens currently present, in arrival order
    occupants: Vec<AlienId>,
    destroyed: bool,
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            occupants: Vec::new(),
            destroyed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn occupants(&self) -> &[AlienId] {
        &self.occupants
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn has_alien(&self, alien: AlienId) -> bool {
        self.occupants.contains(&alien)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Record an alien as present. Returns the number of aliens now here.
    pub fn admit(&mut self, alien: AlienId) -> usize {
        if !self.has_alien(alien) {
            self.occupants.push(alien);
        }
        self.occupants.len()
    }

    /// Forget an alien that left.
    pub fn depart(&mut self, alien: AlienId) {
        self.occupants.retain(|a| *a != alien);
    }

    /// Mark the city destroyed and hand back everyone who was inside.
    pub fn destroy(&mut self) -> Vec<AlienId> {
        self.destroyed = true;
        std::mem::take(&mut self.occupants)
    }
}

impl Identifiable for City {
    fn id(&self) -> &str {
        &self.name
    }
}
