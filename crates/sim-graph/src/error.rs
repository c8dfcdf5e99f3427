//! Error types for graph operations.

use thiserror::Error;

use crate::id::{EdgeId, VertexId};

/// Errors raised by [`Graph`](crate::Graph) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The referenced vertex is not stored in the graph
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    /// An edge for this ordered pair is already stored
    #[error("edge {0} already exists")]
    EdgeAlreadyExists(EdgeId),
}

impl GraphError {
    /// Creates a vertex-not-found error.
    pub fn vertex_not_found(id: impl Into<VertexId>) -> Self {
        Self::VertexNotFound(id.into())
    }
}
