//! Simulation Systems
//!
//! The round-based invasion engine.

pub mod simulator;

pub use simulator::{MoveOutcome, SimulationStats, Simulator, TerminationReason};
