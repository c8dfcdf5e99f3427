//! Simulation Components
//!
//! Cities, aliens, and the directions that label paths between cities.

pub mod alien;
pub mod city;
pub mod direction;

pub use alien::{Alien, AlienId};
pub use city::City;
pub use direction::Direction;
