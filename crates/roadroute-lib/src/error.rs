use std::path::PathBuf;

use thiserror::Error;

use crate::network::VertexId;

/// Convenient result alias for the roadroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Road-network file could not be located at the resolved path.
    #[error("road network not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// A `V` or `E` line in the road-network description could not be parsed.
    #[error("malformed road network line {line}: {reason}")]
    MalformedNetworkLine { line: usize, reason: String },

    /// An edge references a vertex that was never declared.
    #[error("edge ({tail}, {head}) references undeclared vertex {vertex}")]
    UnknownEdgeVertex {
        tail: VertexId,
        head: VertexId,
        vertex: VertexId,
    },

    /// A vertex has no entry in the location table. The graph and the
    /// location table disagree, which is a loader bug.
    #[error("no coordinate recorded for vertex {vertex}")]
    MissingCoordinate { vertex: VertexId },

    /// Nearest-vertex lookup against a table without any vertices.
    #[error("location table is empty")]
    EmptyLocationTable,

    /// `pop_min` was called on an empty priority queue.
    #[error("pop from an empty priority queue")]
    EmptyQueue,

    /// Path reconstruction hit a vertex without a predecessor, or looped.
    #[error("search tree is broken at vertex {vertex}")]
    BrokenSearchTree { vertex: VertexId },

    /// The first line of a batch exchange was not a valid `R` request.
    #[error("invalid request: {line:?}")]
    MalformedRequest { line: String },

    /// The peer closed the channel while a line was still expected.
    #[error("channel closed while waiting for {expected}")]
    ChannelClosed { expected: &'static str },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
