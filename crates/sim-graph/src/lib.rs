//! Generic directed graph with string-identified vertices.
//!
//! The graph stores arbitrary vertex payloads (anything [`Identifiable`]) and
//! arbitrary edge payloads, at most one edge per ordered pair of vertices.
//! All access goes through a single reader-writer lock, so a [`Graph`] can be
//! shared between threads behind an `Arc` without further synchronization.
//!
//! # Storage
//!
//! ```text
//! vertices: VertexId -> Vertex { data, outgoing: {VertexId}, incoming: {VertexId} }
//! edges:    EdgeId { from, to } -> Edge { data }
//! ```
//!
//! Vertices only record the identities of their neighbors; edge payloads live
//! in one global index. Removing a vertex first removes every incident edge
//! from the index and from the opposite endpoint, then drops the vertex.
//!
//! # Modules
//!
//! - [`id`]: Vertex and edge identities, the [`Identifiable`] contract
//! - [`graph`]: The [`Graph`] store and its [`Vertex`]/[`Edge`] snapshots
//! - [`error`]: [`GraphError`]

pub mod error;
pub mod graph;
pub mod id;

pub use error::GraphError;
pub use graph::{Edge, Graph, Vertex};
pub use id::{EdgeId, Identifiable, VertexId};
