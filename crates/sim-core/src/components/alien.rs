//! Alien Component
//!
//! A mobile invader. Aliens reference their city by name only; the map
//! resolves the name when needed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an alien in the simulation population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlienId(pub usize);

impl fmt::Display for AlienId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An invading alien
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alien {
    pub id: AlienId,
    pub name: String,
    /// Name of the city the alien currently occupies
    pub current_city: String,
    pub is_dead: bool,
    /// Move attempts so far, trapped attempts included
    pub num_movements: u32,
    /// Cleared once the movement budget is spent or the alien dies
    pub can_move: bool,
}

impl Alien {
    pub fn new(id: usize, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: AlienId(id),
            name: name.into(),
            current_city: city.into(),
            is_dead: false,
            num_movements: 0,
            can_move: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Relocate to `city`, counting one movement.
    pub fn invade(&mut self, city: impl Into<String>) {
        self.current_city = city.into();
        self.num_movements += 1;
    }

    /// Count a movement attempt that went nowhere.
    pub fn stay_trapped(&mut self) {
        self.num_movements += 1;
    }

    pub fn kill(&mut self) {
        self.is_dead = true;
    }
}

impl fmt::Display for Alien {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alien[{}] - Name: {} - CurrentCity: {} - Dead: {} - NumMovements: {} - Can Move: {}",
            self.id, self.name, self.current_city, self.is_dead, self.num_movements, self.can_move
        )
    }
}
