//! Run Report
//!
//! Summary of a finished run, written as JSON for later inspection.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::components::Alien;
use crate::systems::{SimulationStats, Simulator, TerminationReason};

/// Final state of a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub termination: TerminationReason,
    pub stats: SimulationStats,
    /// Aliens still alive at the end
    pub survivors: Vec<Alien>,
    /// Remaining cities, ascending
    pub cities_left: Vec<String>,
    /// The remaining map in its text form
    pub final_map: String,
}

impl SimulationReport {
    pub fn from_simulator<R>(sim: &Simulator<R>, termination: TerminationReason) -> Self {
        Self {
            termination,
            stats: sim.stats(),
            survivors: sim.aliens().iter().filter(|a| a.is_alive()).cloned().collect(),
            cities_left: sim.map().city_names(),
            final_map: sim.map().serialize(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = self.to_json()?;
        fs::write(path, json)
    }
}
