use crate::error::{Error, Result};
use crate::network::{Coordinate, LocationTable, VertexId};

/// Snap a scaled `(lat, lon)` point to the closest vertex by exhaustive scan.
///
/// Ties go to the lowest vertex id, since the table iterates in ascending id
/// order and only a strictly smaller distance replaces the current best.
pub fn nearest_vertex(lat: i64, lon: i64, locations: &LocationTable) -> Result<VertexId> {
    let query = Coordinate::new(lat, lon);
    let mut best: Option<(VertexId, f64)> = None;

    for (&vertex, coordinate) in locations {
        let distance = query.distance_to(coordinate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((vertex, distance)),
        }
    }

    best.map(|(vertex, _)| vertex)
        .ok_or(Error::EmptyLocationTable)
}
