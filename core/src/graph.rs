use std::collections::HashMap;

use crate::error::{Error, Result};

/// Interned town index. Dense: `0..town_count()`.
pub type TownId = u32;

/// Distance carried by a single route.
pub type Distance = u32;

/// A directed route in the adjacency list.
///
/// In `outgoing` lists `destination` is the far end of the route; in
/// `incoming` lists it is the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub destination: TownId,
    pub distance: Distance,
}

/// One `(from, to, distance)` triple as supplied to [`Graph::from_edges`].
///
/// The distance is signed so that negative values coming from a parser can be
/// rejected here with a typed error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub distance: i64,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

/// Immutable route graph: town label interning + per-town outgoing routes.
///
/// Routes are stored in both directions: `outgoing[a]` holds routes leaving
/// `a`, `incoming[b]` holds routes arriving at `b`. Every town seen as an
/// origin or destination has an entry in both, possibly empty. Routes keep the
/// order of the input edge list.
#[derive(Debug, Clone)]
pub struct Graph {
    outgoing: Vec<Vec<Route>>,
    incoming: Vec<Vec<Route>>,
    labels: Vec<String>,
    town_index: HashMap<String, TownId>,
    /// `zero_cycle[t]` is true when `t` lies on a cycle of zero-distance routes.
    zero_cycle: Vec<bool>,
}

impl Graph {
    /// Build a graph from edge records, in input order.
    ///
    /// Fails on the first record with an empty endpoint label or a distance
    /// outside `0..=u32::MAX`. Nothing is returned on failure.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = Self {
            outgoing: Vec::new(),
            incoming: Vec::new(),
            labels: Vec::new(),
            town_index: HashMap::new(),
            zero_cycle: Vec::new(),
        };

        for (index, edge) in edges.into_iter().enumerate() {
            let from = edge.from.trim();
            let to = edge.to.trim();
            if from.is_empty() || to.is_empty() {
                return Err(Error::MalformedEdge {
                    index,
                    reason: "town label is empty".to_string(),
                });
            }
            let distance = Distance::try_from(edge.distance).map_err(|_| Error::MalformedEdge {
                index,
                reason: format!("distance {} is not a non-negative 32-bit integer", edge.distance),
            })?;

            let origin = graph.intern_town(from);
            let destination = graph.intern_town(to);
            graph.outgoing[origin as usize].push(Route {
                destination,
                distance,
            });
            graph.incoming[destination as usize].push(Route {
                destination: origin,
                distance,
            });
        }

        graph.zero_cycle = graph.find_zero_cycles();

        tracing::debug!(
            towns = graph.town_count(),
            routes = graph.route_count(),
            zero_cycles = graph.has_zero_cycle(),
            "route graph built"
        );

        Ok(graph)
    }

    /// Intern a town label, returning its compact ID.
    fn intern_town(&mut self, label: &str) -> TownId {
        if let Some(&id) = self.town_index.get(label) {
            return id;
        }
        let id = self.labels.len() as TownId;
        self.labels.push(label.to_string());
        self.town_index.insert(label.to_string(), id);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Mark towns that can return to themselves over zero-distance routes only.
    fn find_zero_cycles(&self) -> Vec<bool> {
        let n = self.outgoing.len();
        let mut marked = vec![false; n];

        for origin in 0..n {
            let mut stack: Vec<usize> = self.zero_targets(origin).collect();
            if stack.is_empty() {
                continue;
            }
            let mut seen = vec![false; n];
            while let Some(town) = stack.pop() {
                if town == origin {
                    marked[origin] = true;
                    break;
                }
                if !seen[town] {
                    seen[town] = true;
                    stack.extend(self.zero_targets(town));
                }
            }
        }

        marked
    }

    fn zero_targets(&self, town: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[town]
            .iter()
            .filter(|r| r.distance == 0)
            .map(|r| r.destination as usize)
    }

    /// Resolve a town label to its ID.
    pub fn town_id(&self, label: &str) -> Option<TownId> {
        self.town_index.get(label).copied()
    }

    /// Resolve a town label, failing with [`Error::UnknownTown`] if absent.
    pub fn resolve(&self, label: &str) -> Result<TownId> {
        self.town_id(label)
            .ok_or_else(|| Error::UnknownTown(label.to_string()))
    }

    /// Label of an interned town.
    pub fn town_label(&self, id: TownId) -> Option<&str> {
        self.labels.get(id as usize).map(|s| s.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.town_index.contains_key(label)
    }

    /// Outgoing routes of a town, in input order.
    pub fn neighbors(&self, label: &str) -> Result<&[Route]> {
        let id = self.resolve(label)?;
        Ok(self.routes_from(id))
    }

    /// Outgoing routes by ID. Unknown IDs have no routes.
    pub fn routes_from(&self, id: TownId) -> &[Route] {
        self.outgoing
            .get(id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Routes arriving at a town by ID; each `destination` is the origin.
    pub fn routes_into(&self, id: TownId) -> &[Route] {
        self.incoming
            .get(id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Town labels in first-seen order (index == [`TownId`]).
    pub fn towns(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }

    pub fn town_count(&self) -> usize {
        self.labels.len()
    }

    pub fn route_count(&self) -> usize {
        self.outgoing.iter().map(|v| v.len()).sum()
    }

    pub fn has_zero_cycle(&self) -> bool {
        self.zero_cycle.iter().any(|&z| z)
    }

    pub(crate) fn on_zero_cycle(&self, id: TownId) -> bool {
        self.zero_cycle.get(id as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(routes: &[(&str, &str, i64)]) -> Vec<EdgeRecord> {
        routes.iter().map(|&(from, to, d)| EdgeRecord::new(from, to, d)).collect()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_graph_is_send_sync() {
        assert_send_sync::<Graph>();
    }

    #[test]
    fn test_graph_shared_across_threads() {
        let g = Graph::from_edges(edges(&[("A", "B", 5), ("B", "A", 4)])).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| g.neighbors("A").map(|r| r.len())))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap().unwrap(), 1);
            }
        });
    }

    #[test]
    fn test_incoming_routes() {
        let g = Graph::from_edges(edges(&[("A", "C", 5), ("B", "C", 2), ("C", "A", 1)])).unwrap();
        let c = g.town_id("C").unwrap();
        let origins: Vec<(&str, u32)> = g
            .routes_into(c)
            .iter()
            .map(|r| (g.town_label(r.destination).unwrap(), r.distance))
            .collect();
        assert_eq!(origins, vec![("A", 5), ("B", 2)]);
        // B has no incoming routes but is present
        assert!(g.routes_into(g.town_id("B").unwrap()).is_empty());
        assert!(g.routes_into(42).is_empty());
    }

    #[test]
    fn test_build_registers_both_endpoints() {
        let g = Graph::from_edges(edges(&[("A", "B", 5), ("B", "C", 4)])).unwrap();
        assert_eq!(g.town_count(), 3);
        assert_eq!(g.route_count(), 2);
        assert!(g.contains("C"));
        // C only appears as a destination but is still queryable
        assert!(g.neighbors("C").unwrap().is_empty());
    }

    #[test]
    fn test_routes_keep_input_order() {
        let g = Graph::from_edges(edges(&[("A", "D", 5), ("A", "B", 3), ("A", "C", 1)])).unwrap();
        let dests: Vec<&str> = g
            .neighbors("A")
            .unwrap()
            .iter()
            .map(|r| g.town_label(r.destination).unwrap())
            .collect();
        assert_eq!(dests, vec!["D", "B", "C"]);
    }

    #[test]
    fn test_towns_first_seen_order() {
        let g = Graph::from_edges(edges(&[("B", "A", 1), ("C", "B", 1)])).unwrap();
        let towns: Vec<&str> = g.towns().collect();
        assert_eq!(towns, vec!["B", "A", "C"]);
        assert_eq!(g.town_id("A"), Some(1));
        assert_eq!(g.town_label(2), Some("C"));
        assert_eq!(g.town_label(9), None);
    }

    #[test]
    fn test_labels_are_trimmed() {
        let g = Graph::from_edges(edges(&[(" A ", "B", 1)])).unwrap();
        assert!(g.contains("A"));
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::from_edges(Vec::new()).unwrap();
        assert_eq!(g.town_count(), 0);
        assert_eq!(g.route_count(), 0);
        assert!(!g.has_zero_cycle());
    }

    #[test]
    fn test_neighbors_unknown_town() {
        let g = Graph::from_edges(edges(&[("A", "B", 5)])).unwrap();
        match g.neighbors("Z") {
            Err(Error::UnknownTown(t)) => assert_eq!(t, "Z"),
            other => panic!("expected UnknownTown, got {:?}", other),
        }
    }

    #[test]
    fn test_routes_from_unknown_id() {
        let g = Graph::from_edges(edges(&[("A", "B", 5)])).unwrap();
        assert!(g.routes_from(42).is_empty());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let err = Graph::from_edges(edges(&[("A", "B", 5), ("B", "C", -1)])).unwrap_err();
        match err {
            Error::MalformedEdge { index, .. } => assert_eq!(index, 1),
            other => panic!("expected MalformedEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_distance_rejected() {
        let err = Graph::from_edges(edges(&[("A", "B", i64::from(u32::MAX) + 1)])).unwrap_err();
        assert!(matches!(err, Error::MalformedEdge { index: 0, .. }));
    }

    #[test]
    fn test_empty_label_rejected() {
        let err = Graph::from_edges(edges(&[("A", "  ", 5)])).unwrap_err();
        assert!(matches!(err, Error::MalformedEdge { index: 0, .. }));
        let err = Graph::from_edges(edges(&[("", "B", 5)])).unwrap_err();
        assert!(matches!(err, Error::MalformedEdge { index: 0, .. }));
    }

    #[test]
    fn test_duplicate_routes_kept() {
        let g = Graph::from_edges(edges(&[("A", "B", 5), ("A", "B", 2)])).unwrap();
        let routes = g.neighbors("A").unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].distance, 5);
    }

    #[test]
    fn test_zero_cycle_detection() {
        let g = Graph::from_edges(edges(&[("A", "B", 0), ("B", "A", 0), ("B", "C", 0)])).unwrap();
        assert!(g.has_zero_cycle());
        assert!(g.on_zero_cycle(g.town_id("A").unwrap()));
        assert!(g.on_zero_cycle(g.town_id("B").unwrap()));
        assert!(!g.on_zero_cycle(g.town_id("C").unwrap()));
    }

    #[test]
    fn test_zero_self_loop_is_cycle() {
        let g = Graph::from_edges(edges(&[("A", "A", 0)])).unwrap();
        assert!(g.has_zero_cycle());
    }

    #[test]
    fn test_zero_edges_without_cycle() {
        let g = Graph::from_edges(edges(&[("A", "B", 0), ("B", "A", 1)])).unwrap();
        assert!(!g.has_zero_cycle());
    }
}
