use serde::Serialize;

use crate::cost::EuclideanCost;
use crate::error::Result;
use crate::nearest::nearest_vertex;
use crate::network::{Coordinate, RoadNetwork, VertexId};
use crate::path::{least_cost_path, path_cost};

/// The two points of a route request, in scaled coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    pub start: Coordinate,
    pub dest: Coordinate,
}

impl RouteQuery {
    pub fn new(start_lat: i64, start_lon: i64, dest_lat: i64, dest_lon: i64) -> Self {
        Self {
            start: Coordinate::new(start_lat, start_lon),
            dest: Coordinate::new(dest_lat, dest_lon),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    /// Vertex the start point snapped to.
    pub start: VertexId,
    /// Vertex the destination point snapped to.
    pub goal: VertexId,
    /// Path vertices, empty when the goal is unreachable.
    pub steps: Vec<VertexId>,
    /// Coordinate of each entry in `steps`.
    pub waypoints: Vec<Coordinate>,
    /// Sum of edge costs in scaled-degree units.
    pub cost: f64,
}

impl RoutePlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Snap both query points to vertices and search for the cheapest path.
pub fn plan_route(network: &RoadNetwork, query: &RouteQuery) -> Result<RoutePlan> {
    let start = nearest_vertex(query.start.lat, query.start.lon, &network.locations)?;
    let goal = nearest_vertex(query.dest.lat, query.dest.lon, &network.locations)?;

    let cost = EuclideanCost::new(network.locations.clone());
    let steps = least_cost_path(&network.graph, start, goal, &cost)?;
    let waypoints = steps
        .iter()
        .map(|&vertex| network.location(vertex))
        .collect::<Result<Vec<_>>>()?;
    let total = path_cost(&steps, &cost)?;

    tracing::debug!(start, goal, hops = steps.len(), cost = total, "planned route");

    Ok(RoutePlan {
        start,
        goal,
        steps,
        waypoints,
        cost: total,
    })
}
