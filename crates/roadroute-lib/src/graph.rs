use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::network::VertexId;

/// Immutable directed road graph.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    vertices: Vec<VertexId>,
    adjacency: Arc<HashMap<VertexId, Vec<VertexId>>>,
    edge_count: usize,
}

impl RoadGraph {
    /// Build a graph from vertex ids and directed edges.
    ///
    /// Vertex ids are sorted and deduplicated. Duplicate edges are kept, and
    /// each vertex's neighbours follow the order of `edges`. Every edge
    /// endpoint must be one of `vertices`.
    pub fn new(
        vertices: impl IntoIterator<Item = VertexId>,
        edges: &[(VertexId, VertexId)],
    ) -> Result<Self> {
        let mut vertices: Vec<VertexId> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();

        let mut adjacency: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
        for &(tail, head) in edges {
            for vertex in [tail, head] {
                if vertices.binary_search(&vertex).is_err() {
                    return Err(Error::UnknownEdgeVertex { tail, head, vertex });
                }
            }
            adjacency.entry(tail).or_default().push(head);
        }

        Ok(Self {
            vertices,
            adjacency: Arc::new(adjacency),
            edge_count: edges.len(),
        })
    }

    /// Out-neighbours of `vertex`, empty for unknown vertices.
    pub fn neighbours(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sorted vertex ids.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    pub fn has_edge(&self, tail: VertexId, head: VertexId) -> bool {
        self.neighbours(tail).contains(&head)
    }
}
