//! Graph Store
//!
//! Vertex and edge storage behind a single reader-writer lock. Reads take the
//! shared lock, mutations take the exclusive lock, and no lock is held past the
//! end of the call that acquired it.

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

use crate::error::GraphError;
use crate::id::{EdgeId, Identifiable, VertexId};

/// A vertex: its payload plus the identities of its neighbors.
#[derive(Debug, Clone)]
pub struct Vertex<N> {
    id: VertexId,
    /// Caller-supplied payload
    pub data: N,
    outgoing: BTreeSet<VertexId>,
    incoming: BTreeSet<VertexId>,
}

impl<N> Vertex<N> {
    fn new(id: VertexId, data: N) -> Self {
        Self {
            id,
            data,
            outgoing: BTreeSet::new(),
            incoming: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &VertexId {
        &self.id
    }

    /// Targets of this vertex's outgoing edges, ascending.
    pub fn outgoing(&self) -> impl Iterator<Item = &VertexId> {
        self.outgoing.iter()
    }

    /// Sources of this vertex's incoming edges, ascending.
    pub fn incoming(&self) -> impl Iterator<Item = &VertexId> {
        self.incoming.iter()
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// Every edge touching this vertex, deduplicated.
    fn incident_edges(&self) -> BTreeSet<EdgeId> {
        let out = self
            .outgoing
            .iter()
            .map(|to| EdgeId::new(self.id.clone(), to.clone()));
        let inc = self
            .incoming
            .iter()
            .map(|from| EdgeId::new(from.clone(), self.id.clone()));
        out.chain(inc).collect()
    }
}

/// A directed edge and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<E> {
    id: EdgeId,
    /// Caller-supplied payload
    pub data: E,
}

impl<E> Edge<E> {
    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn from(&self) -> &VertexId {
        &self.id.from
    }

    pub fn to(&self) -> &VertexId {
        &self.id.to
    }
}

#[derive(Debug)]
struct Store<N, E> {
    vertices: HashMap<VertexId, Vertex<N>>,
    edges: HashMap<EdgeId, Edge<E>>,
}

impl<N, E> Store<N, E> {
    fn insert_vertex(&mut self, data: N) -> VertexId
    where
        N: Identifiable,
    {
        let id = VertexId::new(data.id());
        match self.vertices.get_mut(id.as_str()) {
            // Same identity: swap the payload, keep the adjacency so the
            // edge index stays consistent.
            Some(existing) => existing.data = data,
            None => {
                self.vertices
                    .insert(id.clone(), Vertex::new(id.clone(), data));
            }
        }
        id
    }

    fn check_endpoints(&self, from: &str, to: &str) -> Result<(), GraphError> {
        if !self.vertices.contains_key(from) {
            return Err(GraphError::vertex_not_found(from));
        }
        if !self.vertices.contains_key(to) {
            return Err(GraphError::vertex_not_found(to));
        }
        Ok(())
    }

    fn insert_edge(&mut self, from: &str, to: &str, data: E) -> Result<EdgeId, GraphError> {
        self.check_endpoints(from, to)?;

        let id = EdgeId::new(from, to);
        if self.edges.contains_key(&id) {
            return Err(GraphError::EdgeAlreadyExists(id));
        }

        if let Some(source) = self.vertices.get_mut(from) {
            source.outgoing.insert(id.to.clone());
        }
        if let Some(target) = self.vertices.get_mut(to) {
            target.incoming.insert(id.from.clone());
        }
        self.edges.insert(
            id.clone(),
            Edge {
                id: id.clone(),
                data,
            },
        );
        Ok(id)
    }

    fn delete_edge(&mut self, from: &str, to: &str) -> Result<Option<E>, GraphError> {
        self.check_endpoints(from, to)?;

        let removed = self.edges.remove(&EdgeId::new(from, to));
        if let Some(source) = self.vertices.get_mut(from) {
            source.outgoing.remove(to);
        }
        if let Some(target) = self.vertices.get_mut(to) {
            target.incoming.remove(from);
        }
        Ok(removed.map(|edge| edge.data))
    }

    fn delete_vertex(&mut self, id: &str) -> Result<N, GraphError> {
        let incident = match self.vertices.get(id) {
            Some(vertex) => vertex.incident_edges(),
            None => return Err(GraphError::vertex_not_found(id)),
        };

        // Edges go first: the opposite endpoints must forget this vertex
        // before it disappears from the index.
        for edge in &incident {
            self.delete_edge(edge.from.as_str(), edge.to.as_str())?;
        }

        tracing::trace!(vertex = id, edges = incident.len(), "removed vertex");
        self.vertices
            .remove(id)
            .map(|vertex| vertex.data)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }
}

/// A concurrency-safe directed graph.
///
/// Vertices are keyed by their payload's [`Identifiable::id`]; edges by the
/// ordered pair of endpoint identities.
#[derive(Debug)]
pub struct Graph<N, E> {
    store: RwLock<Store<N, E>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            store: RwLock::new(Store {
                vertices: HashMap::new(),
                edges: HashMap::new(),
            }),
        }
    }
}

impl<N: Identifiable, E> Graph<N, E> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from vertex payloads and edges between them.
    ///
    /// Fails on the first edge that could not be inserted.
    pub fn from_parts(
        vertices: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (EdgeId, E)>,
    ) -> Result<Self, GraphError> {
        let mut store = Store {
            vertices: HashMap::new(),
            edges: HashMap::new(),
        };
        for data in vertices {
            store.insert_vertex(data);
        }
        for (id, data) in edges {
            store.insert_edge(id.from.as_str(), id.to.as_str(), data)?;
        }
        Ok(Self {
            store: RwLock::new(store),
        })
    }

    /// Inserts a vertex keyed by the payload's identity.
    ///
    /// An existing vertex with the same identity gets its payload replaced;
    /// its edges are kept.
    pub fn add_vertex(&self, data: N) -> VertexId {
        self.store.write().insert_vertex(data)
    }

    /// Removes the vertex holding `vertex`'s payload identity.
    pub fn remove_vertex(&self, vertex: &Vertex<N>) -> Result<N, GraphError> {
        let id = vertex.data.id();
        self.store.write().delete_vertex(id)
    }

    /// Runs `f` over the payload of vertex `id` under the exclusive lock.
    ///
    /// `f` must not change the payload's identity.
    pub fn update_vertex<R>(
        &self,
        id: impl AsRef<str>,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, GraphError> {
        let id = id.as_ref();
        let mut store = self.store.write();
        match store.vertices.get_mut(id) {
            Some(vertex) => {
                let out = f(&mut vertex.data);
                debug_assert_eq!(
                    vertex.data.id(),
                    id,
                    "update_vertex changed a vertex identity"
                );
                Ok(out)
            }
            None => Err(GraphError::vertex_not_found(id)),
        }
    }
}

impl<N, E> Graph<N, E> {
    /// Removes a vertex and every edge touching it, returning its payload.
    pub fn remove_vertex_by_id(&self, id: impl AsRef<str>) -> Result<N, GraphError> {
        self.store.write().delete_vertex(id.as_ref())
    }

    /// Inserts a directed edge. Both endpoints must exist and the ordered pair
    /// must be free.
    pub fn add_edge(
        &self,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
        data: E,
    ) -> Result<EdgeId, GraphError> {
        let (from, to) = (from.as_ref(), to.as_ref());
        let id = self.store.write().insert_edge(from, to, data)?;
        tracing::trace!(edge = %id, "added edge");
        Ok(id)
    }

    /// Removes the edge `from -> to`, returning its payload if there was one.
    ///
    /// Both endpoints must exist; a missing edge between them is not an error.
    pub fn remove_edge(
        &self,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
    ) -> Result<Option<E>, GraphError> {
        self.store.write().delete_edge(from.as_ref(), to.as_ref())
    }

    /// Runs `f` over vertex `id` under the shared lock.
    pub fn with_vertex<R>(&self, id: impl AsRef<str>, f: impl FnOnce(&Vertex<N>) -> R) -> Option<R> {
        self.store.read().vertices.get(id.as_ref()).map(f)
    }

    pub fn contains_vertex(&self, id: impl AsRef<str>) -> bool {
        self.store.read().vertices.contains_key(id.as_ref())
    }

    pub fn contains_edge(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> bool {
        self.store
            .read()
            .edges
            .contains_key(&EdgeId::new(from.as_ref(), to.as_ref()))
    }

    pub fn vertex_count(&self) -> usize {
        self.store.read().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.store.read().edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().vertices.is_empty()
    }

    /// All vertex identities, ascending.
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<_> = self.store.read().vertices.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All edge identities, ascending.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        let mut ids: Vec<_> = self.store.read().edges.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl<N: Clone, E> Graph<N, E> {
    /// Snapshot of the vertex with identity `id`.
    pub fn vertex(&self, id: &VertexId) -> Option<Vertex<N>> {
        self.vertex_by_str(id.as_str())
    }

    /// Snapshot of the vertex with identity `id`.
    pub fn vertex_by_str(&self, id: &str) -> Option<Vertex<N>> {
        self.store.read().vertices.get(id).cloned()
    }
}

impl<N, E: Clone> Graph<N, E> {
    /// Snapshot of the edge `from -> to`.
    pub fn edge(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> Option<Edge<E>> {
        self.store
            .read()
            .edges
            .get(&EdgeId::new(from.as_ref(), to.as_ref()))
            .cloned()
    }

    /// All edges, ascending by identity.
    pub fn edges(&self) -> Vec<Edge<E>> {
        let mut edges: Vec<_> = self.store.read().edges.values().cloned().collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        edges
    }

    /// Edges leaving `id`, ascending by target.
    pub fn outgoing_edges(&self, id: impl AsRef<str>) -> Result<Vec<Edge<E>>, GraphError> {
        let id = id.as_ref();
        let store = self.store.read();
        let vertex = store
            .vertices
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))?;
        Ok(vertex
            .outgoing
            .iter()
            .filter_map(|to| store.edges.get(&EdgeId::new(id, to.clone())).cloned())
            .collect())
    }

    /// Edges entering `id`, ascending by source.
    pub fn incoming_edges(&self, id: impl AsRef<str>) -> Result<Vec<Edge<E>>, GraphError> {
        let id = id.as_ref();
        let store = self.store.read();
        let vertex = store
            .vertices
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))?;
        Ok(vertex
            .incoming
            .iter()
            .filter_map(|from| store.edges.get(&EdgeId::new(from.clone(), id)).cloned())
            .collect())
    }
}
