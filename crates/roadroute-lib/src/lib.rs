//! Roadroute library entry points.
//!
//! This crate loads a road network into memory, snaps geographic points to
//! its vertices, finds least-cost paths between them, and serves those paths
//! over a small line protocol. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod channel;
pub mod config;
pub mod cost;
pub mod error;
pub mod graph;
pub mod heap;
pub mod nearest;
pub mod network;
pub mod path;
pub mod protocol;
pub mod routing;

pub use channel::{BatchChannel, Channel, LineEvent, LinkChannel};
pub use config::TransportConfig;
pub use cost::{EdgeCost, EuclideanCost};
pub use error::{Error, Result};
pub use graph::RoadGraph;
pub use heap::MinPriorityQueue;
pub use nearest::nearest_vertex;
pub use network::{
    load_road_network, parse_road_network, Coordinate, LocationTable, RoadNetwork, VertexId,
};
pub use path::{least_cost_path, path_cost};
pub use protocol::{advance, run_batch, SessionState, StreamingEngine, Transition};
pub use routing::{plan_route, RoutePlan, RouteQuery};
