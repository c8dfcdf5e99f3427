//! World Map
//!
//! Cities joined by one-way, direction-labelled paths. The map is read from
//! and rendered to a line format:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! The first token of a row is a city; every following token is a path
//! `direction=destination` leaving it. Destinations are created on first
//! mention, so a city may appear only on the right-hand side of a path.

use sim_graph::{Graph, GraphError};
use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;

use crate::components::{AlienId, City, Direction};
use crate::error::MapError;

/// A parsed path token: `direction=destination`
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathToken<'a> {
    direction: Direction,
    destination: &'a str,
}

impl<'a> PathToken<'a> {
    fn parse(token: &'a str) -> Result<Self, MapError> {
        let mut parts = token.split('=');
        let (label, destination) = match (parts.next(), parts.next(), parts.next()) {
            (Some(label), Some(destination), None) if !destination.is_empty() => {
                (label, destination)
            }
            _ => return Err(MapError::InvalidToken(token.to_string())),
        };
        Ok(Self {
            direction: label.parse()?,
            destination,
        })
    }
}

/// Check a whole row before any of it touches the map.
fn validate_row<'a>(fields: &[&'a str]) -> Result<(&'a str, Vec<PathToken<'a>>), MapError> {
    let (city, paths) = match fields.split_first() {
        Some(split) => split,
        None => return Err(MapError::EmptyRow { line: 0 }),
    };
    let paths = paths
        .iter()
        .copied()
        .map(PathToken::parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((*city, paths))
}

/// The set of cities and the paths between them
#[derive(Debug, Default)]
pub struct Map {
    graph: Graph<City, Direction>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a map from its text form.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        Self::from_reader(text.as_bytes())
    }

    /// Read a map line by line. Any bad row aborts the whole read.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, MapError> {
        let mut map = Map::new();
        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            let line = line?;
            map.read_row(&line).map_err(|err| match err {
                MapError::EmptyRow { .. } => MapError::EmptyRow { line: number },
                other => other.at_line(number),
            })?;
        }
        tracing::debug!(
            cities = map.city_count(),
            paths = map.path_count(),
            "map loaded"
        );
        Ok(map)
    }

    fn read_row(&mut self, line: &str) -> Result<(), MapError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (city, paths) = validate_row(&fields)?;

        self.get_or_create_city(city);
        for path in paths {
            if path.destination == city {
                return Err(MapError::PathToSameCity(city.to_string()));
            }
            self.get_or_create_city(path.destination);
            self.add_path(city, path.destination, path.direction)?;
        }
        Ok(())
    }

    /// Add a city unless one with this name already exists.
    pub fn get_or_create_city(&mut self, name: &str) -> City {
        if let Some(city) = self.city(name) {
            return city;
        }
        let city = City::new(name);
        self.graph.add_vertex(city.clone());
        city
    }

    /// Add a one-way path. Both cities must already exist.
    pub fn add_path(&mut self, from: &str, to: &str, direction: Direction) -> Result<(), MapError> {
        if !self.has_city(from) {
            return Err(MapError::CityDoesNotExist(from.to_string()));
        }
        if !self.has_city(to) {
            return Err(MapError::CityDoesNotExist(to.to_string()));
        }
        if from == to {
            return Err(MapError::PathToSameCity(from.to_string()));
        }
        self.graph.add_edge(from, to, direction)?;
        Ok(())
    }

    /// Add a path from its textual direction label.
    pub fn add_path_labelled(&mut self, from: &str, to: &str, label: &str) -> Result<(), MapError> {
        let direction: Direction = label.parse()?;
        self.add_path(from, to, direction)
    }

    /// Remove a city and every path touching it.
    ///
    /// Returns the aliens that were inside; they are no longer tracked by any
    /// city and should be treated as dead.
    pub fn destroy_city(&mut self, name: &str) -> Result<Vec<AlienId>, MapError> {
        let mut city = self.graph.remove_vertex_by_id(name).map_err(|err| match err {
            GraphError::VertexNotFound(_) => MapError::CityDoesNotExist(name.to_string()),
            other => MapError::Graph(other),
        })?;
        let victims = city.destroy();
        tracing::debug!(city = name, victims = victims.len(), "city destroyed");
        Ok(victims)
    }

    /// Paths leaving `name`, keyed by destination.
    pub fn neighbors(&self, name: &str) -> Result<BTreeMap<String, Direction>, MapError> {
        let edges = self
            .graph
            .outgoing_edges(name)
            .map_err(|_| MapError::CityDoesNotExist(name.to_string()))?;
        Ok(edges
            .into_iter()
            .map(|edge| (edge.to().to_string(), edge.data))
            .collect())
    }

    /// Record `alien` as present in `city`. Returns the occupant count.
    pub fn place_alien(&mut self, city: &str, alien: AlienId) -> Result<usize, MapError> {
        self.graph
            .update_vertex(city, |c| c.admit(alien))
            .map_err(|_| MapError::CityDoesNotExist(city.to_string()))
    }

    /// Move `alien` between cities. Returns the occupant count at `to`.
    pub fn move_alien(&mut self, alien: AlienId, from: &str, to: &str) -> Result<usize, MapError> {
        if !self.has_city(to) {
            return Err(MapError::CityDoesNotExist(to.to_string()));
        }
        self.graph
            .update_vertex(from, |c| c.depart(alien))
            .map_err(|_| MapError::CityDoesNotExist(from.to_string()))?;
        self.place_alien(to, alien)
    }

    /// Snapshot of a city.
    pub fn city(&self, name: &str) -> Option<City> {
        self.graph.with_vertex(name, |v| v.data.clone())
    }

    pub fn has_city(&self, name: &str) -> bool {
        self.graph.contains_vertex(name)
    }

    /// City names, ascending.
    pub fn city_names(&self) -> Vec<String> {
        self.graph
            .vertex_ids()
            .into_iter()
            .map(|id| id.into_inner())
            .collect()
    }

    pub fn city_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn path_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph<City, Direction> {
        &self.graph
    }

    /// Render the map in its text form.
    ///
    /// Cities are listed by name, their paths by direction label. Cities
    /// without outgoing paths are left out.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for name in self.graph.vertex_ids() {
            let mut paths: Vec<_> = match self.graph.outgoing_edges(&name) {
                Ok(edges) => edges
                    .into_iter()
                    .map(|edge| (edge.data.as_str(), edge.to().to_string()))
                    .collect(),
                Err(_) => continue,
            };
            if paths.is_empty() {
                continue;
            }
            paths.sort();

            out.push_str(name.as_str());
            for (direction, destination) in paths {
                out.push(' ');
                out.push_str(direction);
                out.push('=');
                out.push_str(&destination);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
