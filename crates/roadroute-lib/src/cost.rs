use std::sync::Arc;

use crate::error::{Error, Result};
use crate::network::{LocationTable, VertexId};

/// Cost of travelling along a directed edge.
pub trait EdgeCost {
    /// Non-negative cost of the edge `from -> to`.
    fn distance(&self, from: VertexId, to: VertexId) -> Result<f64>;
}

/// Straight-line distance between the scaled coordinates of two vertices.
///
/// The result is in scaled-degree units, not metres.
#[derive(Debug, Clone)]
pub struct EuclideanCost {
    locations: Arc<LocationTable>,
}

impl EuclideanCost {
    pub fn new(locations: Arc<LocationTable>) -> Self {
        Self { locations }
    }
}

impl EdgeCost for EuclideanCost {
    fn distance(&self, from: VertexId, to: VertexId) -> Result<f64> {
        let lookup = |vertex| {
            self.locations
                .get(&vertex)
                .ok_or(Error::MissingCoordinate { vertex })
        };
        let a = lookup(from)?;
        let b = lookup(to)?;
        Ok(a.distance_to(b))
    }
}
