//! Seed Loading
//!
//! Where the map text comes from. The simulation entry point takes a loader
//! rather than opening files itself, so tests can hand it text directly.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use crate::error::LoadError;

/// Opens a map source by path.
pub trait SeedLoader {
    type Reader: BufRead;

    fn open(&self, path: &Path) -> Result<Self::Reader, LoadError>;
}

/// Reads maps from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SeedLoader for FsLoader {
    type Reader = BufReader<File>;

    fn open(&self, path: &Path) -> Result<Self::Reader, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BufReader::new(file))
    }
}

/// Serves the same text for every path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    text: String,
}

impl InMemoryLoader {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SeedLoader for InMemoryLoader {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self, _path: &Path) -> Result<Self::Reader, LoadError> {
        Ok(Cursor::new(self.text.clone().into_bytes()))
    }
}
