use thiserror::Error;

/// Errors raised while building a graph or answering a query.
///
/// An unreachable destination is not an error: distance queries report it as
/// [`RouteDistance::NoRoute`](crate::RouteDistance::NoRoute).
#[derive(Debug, Error)]
pub enum Error {
    /// The town label never appeared as an edge endpoint.
    #[error("unknown town '{0}'")]
    UnknownTown(String),

    /// An edge record was rejected during graph construction.
    /// `index` is the zero-based position of the record in the input.
    #[error("malformed edge #{index}: {reason}")]
    MalformedEdge { index: usize, reason: String },

    /// A raw edge line could not be parsed. `line` is 1-based.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("a route needs at least two towns, got {len}")]
    RouteTooShort { len: usize },

    /// Walks from `start` reach a cycle of zero-distance routes inside the
    /// distance bound, so the bound never cuts them off.
    #[error("trips from '{start}' to '{end}' are unbounded: a zero-distance cycle is reachable")]
    UnboundedTrips { start: String, end: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
