//! trainroute-core: In-memory train route graph and query engine.
//!
//! Builds an immutable directed, weighted graph of towns from an edge list
//! and answers route queries against it: exact route distance, shortest
//! distance (Dijkstra), and trip counting bounded by stops or distance.
//! No I/O beyond the optional edge-list loader in [`parse`].
//!
//! Queries take `&Graph` and never mutate it, so one graph can be shared
//! across threads without locking.

mod error;
mod graph;
pub mod parse;
mod traversal;

pub use error::{Error, Result};
pub use graph::{Distance, EdgeRecord, Graph, Route, TownId};
pub use parse::{load_edges, parse_edge_line, parse_edges};
pub use traversal::{
    count_trips_exact_stops, count_trips_max_distance, count_trips_max_stops, route_distance,
    shortest_distance, RouteDistance,
};
