//! Simulation Runner
//!
//! Wires a seed loader, the map, spawned aliens, and the simulator into one
//! call.

use rand::Rng;
use std::path::PathBuf;

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::output::SimulationReport;
use crate::setup::{spawn_aliens, SeedLoader};
use crate::systems::Simulator;
use crate::world::Map;

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub map_path: PathBuf,
    pub num_aliens: usize,
    pub config: SimulationConfig,
}

/// Load the map, spawn aliens, and run the invasion to completion.
pub fn start_simulation<L, R>(
    params: &SimulationParams,
    loader: &L,
    mut rng: R,
) -> Result<SimulationReport, SimError>
where
    L: SeedLoader,
    R: Rng,
{
    tracing::info!("Starting invasion with {} aliens...", params.num_aliens);
    tracing::info!("Building map from {}...", params.map_path.display());

    let reader = loader.open(&params.map_path)?;
    let map = Map::from_reader(reader)?;
    tracing::info!(
        "Map has {} cities and {} paths",
        map.city_count(),
        map.path_count()
    );

    let aliens = spawn_aliens(params.num_aliens, &map, &mut rng);
    let mut sim = Simulator::new(map, aliens, rng, &params.config)?;
    let termination = sim.run()?;
    Ok(SimulationReport::from_simulator(&sim, termination))
}
