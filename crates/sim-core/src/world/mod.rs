//! World Model
//!
//! The map of cities and one-way paths the invasion plays out on.

pub mod map;

pub use map::Map;
