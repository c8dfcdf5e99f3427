//! Simulation Setup
//!
//! Seed loading and alien spawning.

pub mod agents;
pub mod loader;

pub use agents::*;
pub use loader::*;
