//! Alien Invasion Simulation Library
//!
//! Aliens wander a map of cities joined by one-way paths. Two aliens meeting
//! in a city destroy it, and themselves with it.
//!
//! # Modules
//!
//! - [`components`]: Cities, aliens, directions
//! - [`world`]: The [`Map`] built on [`sim_graph::Graph`]
//! - [`systems`]: The round-based [`Simulator`]
//! - [`setup`]: Seed loading and alien spawning
//! - [`output`]: End-of-run reports
//! - [`config`]: TOML configuration

use rand::rngs::SmallRng;
use rand::SeedableRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod setup;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{Config, ConfigError, SimulationConfig};
pub use error::{LoadError, MapError, SimError};
pub use output::SimulationReport;
pub use runner::{start_simulation, SimulationParams};
pub use setup::{spawn_aliens, FsLoader, InMemoryLoader, NameGenerator, SeedLoader};
pub use systems::{MoveOutcome, SimulationStats, Simulator, TerminationReason};
pub use world::Map;

/// Random source for a run: seeded when a seed is given, from entropy otherwise.
pub fn sim_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}
