use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::RoadGraph;

/// Numeric identifier for a road-network vertex (an intersection).
pub type VertexId = i64;

/// Factor applied to decimal degrees to obtain scaled integer coordinates.
pub const COORDINATE_SCALE: f64 = 100_000.0;

/// Latitude/longitude pair in 100000-ths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    pub lat: i64,
    pub lon: i64,
}

impl Coordinate {
    pub fn new(lat: i64, lon: i64) -> Self {
        Self { lat, lon }
    }

    /// Convert decimal degrees into a scaled coordinate, truncating toward zero.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat: scale_degrees(lat),
            lon: scale_degrees(lon),
        }
    }

    /// Euclidean distance to another coordinate, in scaled-degree units.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dlat = other.lat as f64 - self.lat as f64;
        let dlon = other.lon as f64 - self.lon as f64;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

fn scale_degrees(value: f64) -> i64 {
    (value * COORDINATE_SCALE).trunc() as i64
}

/// Coordinates per vertex. Iteration is in ascending vertex id.
pub type LocationTable = BTreeMap<VertexId, Coordinate>;

/// A loaded road network: the graph plus the coordinate of every vertex.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub graph: RoadGraph,
    pub locations: Arc<LocationTable>,
}

impl RoadNetwork {
    /// Coordinate of `vertex`.
    pub fn location(&self, vertex: VertexId) -> Result<Coordinate> {
        self.locations
            .get(&vertex)
            .copied()
            .ok_or(Error::MissingCoordinate { vertex })
    }
}

/// Load a road network description from `path`.
pub fn load_road_network(path: &Path) -> Result<RoadNetwork> {
    if !path.exists() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let network = parse_road_network(BufReader::new(file))?;
    info!(
        path = %path.display(),
        vertices = network.graph.vertex_count(),
        edges = network.graph.edge_count(),
        "loaded road network"
    );
    Ok(network)
}

/// Parse `V,<id>,<lat>,<lon>` and `E,<tail>,<head>` lines.
///
/// Lines starting with any other character are ignored.
pub fn parse_road_network<R: BufRead>(reader: R) -> Result<RoadNetwork> {
    let mut locations = LocationTable::new();
    let mut edges = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let line = line.trim_end();
        let mut fields = line.split(',');

        match fields.next() {
            Some("V") => {
                let id = parse_field::<VertexId>(fields.next(), line_number, "vertex id")?;
                let lat = parse_field::<f64>(fields.next(), line_number, "latitude")?;
                let lon = parse_field::<f64>(fields.next(), line_number, "longitude")?;
                locations.insert(id, Coordinate::from_degrees(lat, lon));
            }
            Some("E") => {
                let tail = parse_field::<VertexId>(fields.next(), line_number, "edge tail")?;
                let head = parse_field::<VertexId>(fields.next(), line_number, "edge head")?;
                edges.push((tail, head));
            }
            _ => {
                if !line.is_empty() {
                    debug!(line = line_number, "skipping unrecognised road network line");
                }
            }
        }
    }

    let graph = RoadGraph::new(locations.keys().copied(), &edges)?;
    Ok(RoadNetwork {
        graph,
        locations: Arc::new(locations),
    })
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    line: usize,
    name: &'static str,
) -> Result<T> {
    let raw = field.ok_or_else(|| Error::MalformedNetworkLine {
        line,
        reason: format!("missing {name}"),
    })?;
    raw.trim().parse().map_err(|_| Error::MalformedNetworkLine {
        line,
        reason: format!("invalid {name} {raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_are_truncated_toward_zero() {
        let coordinate = Coordinate::from_degrees(53.430996, -113.491331);
        assert_eq!(coordinate, Coordinate::new(5343099, -11349133));
    }

    #[test]
    fn distance_spans_the_full_coordinate_range() {
        let low = Coordinate::new(i64::MIN, 0);
        let high = Coordinate::new(i64::MAX, 0);
        let d = low.distance_to(&high);
        assert!(d.is_finite());
        assert!((d - 2f64.powi(64)).abs() < 1e4);
    }

    #[test]
    fn malformed_vertex_line_reports_line_number() {
        let input = "V,1,53.5,-113.5\nV,2,not-a-number,-113.4\n";
        let error = parse_road_network(input.as_bytes()).expect_err("bad latitude");
        assert!(matches!(error, Error::MalformedNetworkLine { line: 2, .. }));
    }
}
