//! Error types for map construction, seed loading, and simulation runs.

use sim_graph::GraphError;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::AlienId;

/// Errors raised while building or mutating the map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("city {0} does not exist")]
    CityDoesNotExist(String),

    #[error("invalid direction '{0}', expected one of north, south, east, west")]
    InvalidDirection(String),

    #[error("cannot create a path from {0} to itself")]
    PathToSameCity(String),

    #[error("invalid token '{0}', paths must look like 'direction=city'")]
    InvalidToken(String),

    #[error("line {line}: a row needs at least a city name")]
    EmptyRow { line: usize },

    /// A parse failure, tagged with the 1-based line it came from
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<MapError>,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to read map: {0}")]
    Io(#[from] std::io::Error),
}

impl MapError {
    pub fn at_line(self, line: usize) -> Self {
        MapError::Line {
            line,
            source: Box::new(self),
        }
    }

    /// The underlying error with any line tag stripped.
    pub fn root(&self) -> &MapError {
        match self {
            MapError::Line { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors raised by a [`SeedLoader`](crate::setup::SeedLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("alien {0} is not part of this simulation")]
    UnknownAlien(AlienId),
}

impl From<GraphError> for SimError {
    fn from(err: GraphError) -> Self {
        SimError::Map(MapError::Graph(err))
    }
}
