use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use trainroute_core::Graph;

/// Read an edge-list file and build the route graph.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let start = Instant::now();

    let edges = trainroute_core::load_edges(path)
        .with_context(|| format!("failed to read edge list '{}'", path.display()))?;
    let graph = Graph::from_edges(edges)
        .with_context(|| format!("invalid edge list '{}'", path.display()))?;

    tracing::info!(
        path = %path.display(),
        towns = graph.town_count(),
        routes = graph.route_count(),
        load_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "route graph loaded"
    );

    Ok(graph)
}
