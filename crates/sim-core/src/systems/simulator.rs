//! Invasion Simulator
//!
//! Advances every alien once per round until the world runs out of cities or
//! the aliens run out of moves.
//!
//! Each round, in population order, a living alien that still may move either
//! stays put or walks one random path out of its city. Arriving in a city that
//! is already occupied starts a fight: the city is destroyed along with every
//! alien inside it.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::components::{Alien, AlienId};
use crate::config::SimulationConfig;
use crate::error::{MapError, SimError};
use crate::world::Map;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    NoCitiesLeft,
    AllAliensDead,
    AllAliensExhausted,
    AllAliensImmobile,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            TerminationReason::NoCitiesLeft => "No more cities left",
            TerminationReason::AllAliensDead => "All aliens are dead",
            TerminationReason::AllAliensExhausted => "All aliens have used up their moves",
            TerminationReason::AllAliensImmobile => "No alien is able to move",
        };
        f.write_str(message)
    }
}

/// What happened to an alien that tried to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No path leads out of the alien's city
    Trapped,
    /// The alien arrived alone
    Moved { to: String },
    /// The alien arrived in an occupied city and destroyed it
    Collision { city: String, victims: Vec<AlienId> },
}

/// Counters describing a run at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub round: u64,
    pub total_aliens: usize,
    pub dead_aliens: usize,
    pub cities_left: usize,
    pub exhausted_aliens: usize,
    pub immobile_aliens: usize,
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round # {} - Total Aliens: {} - Dead Aliens: {} - Cities Left: {} - Aliens Reached Max Moves: {}",
            self.round, self.total_aliens, self.dead_aliens, self.cities_left, self.exhausted_aliens
        )
    }
}

/// The round-based invasion state machine
#[derive(Debug)]
pub struct Simulator<R> {
    map: Map,
    aliens: Vec<Alien>,
    rng: R,
    max_moves: u32,
    verbose: bool,
    num_dead: usize,
    num_exhausted: usize,
    num_immobile: usize,
    round: u64,
}

impl<R: Rng> Simulator<R> {
    /// Set up a run. Every living alien must start in a city on the map.
    ///
    /// Presence is only recorded on arrival: aliens that start in the same
    /// city do not fight, and an alien walking into a city where another one
    /// merely started does not fight either.
    pub fn new(
        map: Map,
        aliens: Vec<Alien>,
        rng: R,
        config: &SimulationConfig,
    ) -> Result<Self, SimError> {
        if let Some(lost) = aliens
            .iter()
            .find(|a| a.is_alive() && !map.has_city(&a.current_city))
        {
            return Err(MapError::CityDoesNotExist(lost.current_city.clone()).into());
        }
        let num_dead = aliens.iter().filter(|a| a.is_dead).count();

        Ok(Self {
            map,
            aliens,
            rng,
            max_moves: config.max_moves,
            verbose: config.verbose,
            num_dead,
            num_exhausted: 0,
            num_immobile: num_dead,
            round: 0,
        })
    }

    /// Run rounds until a terminal state is reached.
    pub fn run(&mut self) -> Result<TerminationReason, SimError> {
        self.round = 0;
        if self.map.is_empty() {
            tracing::info!("No cities on map. Stopping");
            return Ok(TerminationReason::NoCitiesLeft);
        }

        let reason = loop {
            if self.verbose {
                tracing::info!("{}", self.stats());
            }
            self.step_round()?;
            if let Some(reason) = self.termination() {
                break reason;
            }
            self.round += 1;
        };

        tracing::info!("{}. Stopping simulation.", reason);
        tracing::info!("Finished simulation. Map is:\n-------\n\n{}", self.map);
        tracing::info!("{}", self.stats());
        Ok(reason)
    }

    /// Give every alien one turn.
    pub fn step_round(&mut self) -> Result<(), SimError> {
        for index in 0..self.aliens.len() {
            if self.verbose {
                tracing::info!("{}", self.aliens[index]);
            }

            let alien = &mut self.aliens[index];
            if alien.is_dead || !alien.can_move {
                continue;
            }
            if alien.num_movements >= self.max_moves {
                alien.can_move = false;
                self.num_exhausted += 1;
                self.num_immobile += 1;
                continue;
            }

            if self.rng.gen_bool(0.5) {
                self.move_alien(index)?;
            }
        }
        Ok(())
    }

    /// Move the alien at `index` along a random path out of its city.
    pub fn move_alien(&mut self, index: usize) -> Result<MoveOutcome, SimError> {
        let alien = self
            .aliens
            .get(index)
            .ok_or(SimError::UnknownAlien(AlienId(index)))?;
        let (id, from) = (alien.id, alien.current_city.clone());

        let paths: Vec<_> = self.map.neighbors(&from)?.into_iter().collect();
        if paths.is_empty() {
            self.aliens[index].stay_trapped();
            tracing::debug!(
                "Alien {} is trapped in {}! [Movement #{}]",
                self.aliens[index].name,
                from,
                self.aliens[index].num_movements
            );
            return Ok(MoveOutcome::Trapped);
        }

        let (destination, direction) = paths[self.rng.gen_range(0..paths.len())].clone();
        let occupants = self.map.move_alien(id, &from, &destination)?;
        self.aliens[index].invade(destination.clone());
        tracing::trace!(alien = %id, %from, %direction, to = %destination, "alien moved");

        if occupants < 2 {
            return Ok(MoveOutcome::Moved { to: destination });
        }
        let victims = self.resolve_collision(&destination)?;
        Ok(MoveOutcome::Collision {
            city: destination,
            victims,
        })
    }

    /// Destroy `city` and kill everyone in it.
    fn resolve_collision(&mut self, city: &str) -> Result<Vec<AlienId>, SimError> {
        let victims = self.map.destroy_city(city)?;

        let mut names = Vec::with_capacity(victims.len());
        for victim in &victims {
            let alien = self
                .aliens
                .iter_mut()
                .find(|a| a.id == *victim)
                .ok_or(SimError::UnknownAlien(*victim))?;
            if !alien.is_dead {
                alien.kill();
                self.num_dead += 1;
            }
            if alien.can_move {
                alien.can_move = false;
                self.num_immobile += 1;
            }
            names.push(alien.name.clone());
        }

        tracing::info!(
            "[DESTROYED] Aliens {} are fighting! City {} is destroyed.",
            names.join(" and "),
            city
        );
        Ok(victims)
    }
}

impl<R> Simulator<R> {
    /// The terminal state reached, if any.
    pub fn termination(&self) -> Option<TerminationReason> {
        let population = self.aliens.len();
        if self.map.is_empty() {
            Some(TerminationReason::NoCitiesLeft)
        } else if self.num_dead >= population {
            Some(TerminationReason::AllAliensDead)
        } else if self.num_exhausted >= population {
            Some(TerminationReason::AllAliensExhausted)
        } else if self.num_immobile >= population {
            Some(TerminationReason::AllAliensImmobile)
        } else {
            None
        }
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            round: self.round,
            total_aliens: self.aliens.len(),
            dead_aliens: self.num_dead,
            cities_left: self.map.city_count(),
            exhausted_aliens: self.num_exhausted,
            immobile_aliens: self.num_immobile,
        }
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Always decides to move and always takes the first path.
    fn always_first() -> StepRng {
        StepRng::new(0, 0)
    }

    fn config(max_moves: u32) -> SimulationConfig {
        SimulationConfig {
            max_moves,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_new_simulator_leaves_cities_empty() {
        let map = Map::parse("a north=b\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a"), Alien::new(1, "y", "a")];
        let sim = Simulator::new(map, aliens, always_first(), &config(10)).unwrap();

        assert_eq!(sim.map().city("a").unwrap().occupant_count(), 0);
        assert_eq!(sim.stats().dead_aliens, 0);
        assert!(sim.termination().is_none());
    }

    #[test]
    fn test_new_simulator_rejects_unknown_start_city() {
        let map = Map::parse("a north=b\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a"), Alien::new(1, "y", "nowhere")];
        let result = Simulator::new(map, aliens, always_first(), &config(0));

        assert!(matches!(
            result,
            Err(SimError::Map(MapError::CityDoesNotExist(c))) if c == "nowhere"
        ));
    }

    #[test]
    fn test_dead_alien_may_start_anywhere() {
        let map = Map::parse("a north=b\n").unwrap();
        let mut ghost = Alien::new(0, "x", "gone");
        ghost.kill();
        let sim = Simulator::new(map, vec![ghost], always_first(), &config(10)).unwrap();
        assert_eq!(sim.stats().dead_aliens, 1);
        assert_eq!(sim.termination(), Some(TerminationReason::AllAliensDead));
    }

    #[test]
    fn test_stats_display() {
        let map = Map::parse("a north=b\nb south=c\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a")];
        let sim = Simulator::new(map, aliens, always_first(), &config(10)).unwrap();
        assert_eq!(
            sim.stats().to_string(),
            "Round # 0 - Total Aliens: 1 - Dead Aliens: 0 - Cities Left: 3 - Aliens Reached Max Moves: 0"
        );
    }

    #[test]
    fn test_move_from_missing_city_fails() {
        let map = Map::parse("a north=b\nc north=b\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a"), Alien::new(1, "y", "c")];
        let mut sim = Simulator::new(map, aliens, always_first(), &config(10)).unwrap();
        sim.move_alien(0).unwrap();
        sim.move_alien(1).unwrap();

        // Alien 0 now stands in the rubble of "b"
        assert!(matches!(
            sim.move_alien(0),
            Err(SimError::Map(MapError::CityDoesNotExist(c))) if c == "b"
        ));
        assert!(matches!(sim.move_alien(5), Err(SimError::UnknownAlien(AlienId(5)))));
    }

    #[test]
    fn test_move_to_empty_city() {
        let map = Map::parse("a north=b\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a")];
        let mut sim = Simulator::new(map, aliens, always_first(), &config(10)).unwrap();

        let outcome = sim.move_alien(0).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved { to: "b".to_string() });
        assert_eq!(sim.aliens()[0].current_city, "b");
        assert_eq!(sim.aliens()[0].num_movements, 1);
        assert_eq!(sim.map().city("a").unwrap().occupant_count(), 0);
        assert!(sim.map().city("b").unwrap().has_alien(AlienId(0)));
    }

    #[test]
    fn test_move_into_occupied_city_collides() {
        let mut map = Map::parse("a north=b\nb south=c\n").unwrap();
        map.place_alien("b", AlienId(1)).unwrap();
        let aliens = vec![Alien::new(0, "x", "a"), Alien::new(1, "y", "b")];
        let mut sim = Simulator::new(map, aliens, always_first(), &config(10)).unwrap();

        let outcome = sim.move_alien(0).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Collision {
                city: "b".to_string(),
                victims: vec![AlienId(1), AlienId(0)],
            }
        );
        assert!(!sim.map().has_city("b"));
        assert!(sim.aliens().iter().all(|a| a.is_dead && !a.can_move));

        let stats = sim.stats();
        assert_eq!(stats.dead_aliens, 2);
        assert_eq!(stats.immobile_aliens, 2);
        assert_eq!(stats.cities_left, 2);
        assert_eq!(sim.termination(), Some(TerminationReason::AllAliensDead));
    }

    #[test]
    fn test_trapped_alien_counts_a_movement() {
        let map = Map::parse("a north=b\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "b")];
        let mut sim = Simulator::new(map, aliens, always_first(), &config(10)).unwrap();

        assert_eq!(sim.move_alien(0).unwrap(), MoveOutcome::Trapped);
        assert_eq!(sim.aliens()[0].num_movements, 1);
        assert_eq!(sim.aliens()[0].current_city, "b");
    }

    #[test]
    fn test_exhausted_alien_counted_once() {
        let map = Map::parse("a north=b\nb south=a\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a")];
        let mut sim = Simulator::new(map, aliens, always_first(), &config(2)).unwrap();

        sim.step_round().unwrap();
        sim.step_round().unwrap();
        assert_eq!(sim.aliens()[0].num_movements, 2);
        assert_eq!(sim.stats().exhausted_aliens, 0);

        sim.step_round().unwrap();
        assert!(!sim.aliens()[0].can_move);
        assert_eq!(sim.stats().exhausted_aliens, 1);
        assert_eq!(sim.stats().immobile_aliens, 1);

        sim.step_round().unwrap();
        sim.step_round().unwrap();
        assert_eq!(sim.aliens()[0].num_movements, 2);
        assert_eq!(sim.stats().exhausted_aliens, 1);
        assert_eq!(sim.stats().immobile_aliens, 1);
    }

    #[test]
    fn test_run_without_cities_stops_immediately() {
        let aliens = Vec::new();
        let mut sim = Simulator::new(Map::new(), aliens, always_first(), &config(10)).unwrap();

        assert_eq!(sim.run().unwrap(), TerminationReason::NoCitiesLeft);
        let stats = sim.stats();
        assert_eq!(stats.round, 0);
        assert_eq!(stats.dead_aliens, 0);
        assert_eq!(stats.exhausted_aliens, 0);
        assert_eq!(stats.immobile_aliens, 0);
    }

    #[test]
    fn test_run_until_moves_are_exhausted() {
        let map = Map::parse("a north=b\nb south=a\n").unwrap();
        let aliens = vec![Alien::new(0, "x", "a")];
        let mut sim = Simulator::new(map, aliens, always_first(), &config(3)).unwrap();

        assert_eq!(sim.run().unwrap(), TerminationReason::AllAliensExhausted);
        assert_eq!(sim.aliens()[0].num_movements, 3);
        assert_eq!(sim.stats().round, 3);
        assert_eq!(sim.map().city_count(), 2);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let text = "a north=b east=c\nb south=a west=c\nc north=a south=b\n";
        let run = |seed: u64| {
            let map = Map::parse(text).unwrap();
            let aliens = vec![
                Alien::new(0, "x", "a"),
                Alien::new(1, "y", "b"),
                Alien::new(2, "z", "c"),
            ];
            let rng = SmallRng::seed_from_u64(seed);
            let mut sim = Simulator::new(map, aliens, rng, &config(50)).unwrap();
            let reason = sim.run().unwrap();
            (reason, sim.stats(), sim.map().serialize())
        };

        assert_eq!(run(7), run(7));
    }
}
