use std::collections::HashMap;

use crate::cost::EdgeCost;
use crate::error::{Error, Result};
use crate::heap::MinPriorityQueue;
use crate::graph::RoadGraph;
use crate::network::VertexId;

/// Find a least-cost path from `start` to `dest`.
///
/// Edges are pushed into a min-priority queue as `(tail, head)` events keyed
/// by the accumulated cost of reaching `head`. The first event popped for a
/// head finalizes it; later events for the same head are stale and dropped.
/// Runs in O(E log E).
///
/// Returns the vertices of the path, `start` first and `dest` last, or an
/// empty vector when `dest` cannot be reached.
pub fn least_cost_path<C: EdgeCost + ?Sized>(
    graph: &RoadGraph,
    start: VertexId,
    dest: VertexId,
    cost: &C,
) -> Result<Vec<VertexId>> {
    let mut reached: HashMap<VertexId, VertexId> = HashMap::new();
    let mut events = MinPriorityQueue::new();
    events.insert((start, start), 0.0);

    while !events.is_empty() {
        let ((tail, head), time) = events.pop_min()?;
        if reached.contains_key(&head) {
            continue;
        }
        reached.insert(head, tail);
        if head == dest {
            break;
        }

        for &next in graph.neighbours(head) {
            let arrival = time + cost.distance(head, next)?;
            events.insert((head, next), arrival);
        }
    }

    if !reached.contains_key(&dest) {
        return Ok(Vec::new());
    }
    reconstruct_path(&reached, start, dest)
}

/// Total cost of walking `path` edge by edge.
pub fn path_cost<C: EdgeCost + ?Sized>(path: &[VertexId], cost: &C) -> Result<f64> {
    path.windows(2)
        .map(|pair| cost.distance(pair[0], pair[1]))
        .sum()
}

fn reconstruct_path(
    reached: &HashMap<VertexId, VertexId>,
    start: VertexId,
    dest: VertexId,
) -> Result<Vec<VertexId>> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != start {
        // Every step moves to a distinct finalized vertex, so a longer walk is a cycle.
        if path.len() > reached.len() {
            return Err(Error::BrokenSearchTree { vertex: current });
        }
        current = *reached
            .get(&current)
            .ok_or(Error::BrokenSearchTree { vertex: current })?;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}
