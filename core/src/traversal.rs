use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, Route, TownId};

/// Outcome of a distance query.
///
/// `NoRoute` is a successful answer: both towns exist but the walk is not
/// possible. Missing towns are reported as [`Error::UnknownTown`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "distance", rename_all = "snake_case")]
pub enum RouteDistance {
    Found(u64),
    NoRoute,
}

impl RouteDistance {
    pub fn distance(self) -> Option<u64> {
        match self {
            RouteDistance::Found(d) => Some(d),
            RouteDistance::NoRoute => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, RouteDistance::Found(_))
    }

    /// Legacy integer form: the distance, or `-1` for no route.
    pub fn as_sentinel(self) -> i64 {
        match self {
            RouteDistance::Found(d) => i64::try_from(d).unwrap_or(i64::MAX),
            RouteDistance::NoRoute => -1,
        }
    }
}

impl From<Option<u64>> for RouteDistance {
    fn from(d: Option<u64>) -> Self {
        d.map_or(RouteDistance::NoRoute, RouteDistance::Found)
    }
}

/// Total distance of the walk through `towns`, in order.
///
/// Each hop uses the first route from the current town to the next one, in
/// input order. A hop without a route yields `NoRoute`; a town missing from
/// the graph is an error.
pub fn route_distance<S: AsRef<str>>(graph: &Graph, towns: &[S]) -> Result<RouteDistance> {
    if towns.len() < 2 {
        return Err(Error::RouteTooShort { len: towns.len() });
    }

    let ids = towns
        .iter()
        .map(|t| graph.resolve(t.as_ref()))
        .collect::<Result<Vec<TownId>>>()?;

    let mut total: u64 = 0;
    for hop in ids.windows(2) {
        let (from, to) = (hop[0], hop[1]);
        match graph.routes_from(from).iter().find(|r| r.destination == to) {
            Some(route) => total += u64::from(route.distance),
            None => {
                tracing::trace!(
                    from = graph.town_label(from),
                    to = graph.town_label(to),
                    "route distance: missing hop"
                );
                return Ok(RouteDistance::NoRoute);
            }
        }
    }

    Ok(RouteDistance::Found(total))
}

/// Length of the shortest walk from `start` to `end` that takes at least one route.
///
/// Dijkstra over non-negative distances. The start town is not settled at
/// distance zero: the frontier is seeded with its outgoing routes instead, so
/// `start == end` yields the shortest cycle through `start` rather than 0.
pub fn shortest_distance(graph: &Graph, start: &str, end: &str) -> Result<RouteDistance> {
    let start_id = graph.resolve(start)?;
    let end_id = graph.resolve(end)?;

    let seeds = graph
        .routes_from(start_id)
        .iter()
        .map(|r| (r.destination, u64::from(r.distance)));

    let settled = dijkstra(graph, |t| graph.routes_from(t), seeds, Some(end_id));
    let result = match settled.settled_at(end_id) {
        Some(d) => RouteDistance::Found(d),
        None => RouteDistance::NoRoute,
    };
    tracing::trace!(start, end, ?result, "shortest distance");
    Ok(result)
}

/// Settled distances from a Dijkstra run.
struct Settled {
    dist: Vec<Option<u64>>,
}

impl Settled {
    fn settled_at(&self, town: TownId) -> Option<u64> {
        self.dist.get(town as usize).copied().flatten()
    }
}

/// Dijkstra from a set of `(town, initial distance)` seeds, expanding each
/// settled town through `routes` ([`Graph::routes_from`] for forward
/// distances, [`Graph::routes_into`] for distances to a town).
///
/// Heap entries are `(distance, insertion seq, town)` under `Reverse`, so
/// equal distances pop in insertion order. Stops early once `target` is
/// settled.
fn dijkstra<'g, I, F>(graph: &Graph, routes: F, seeds: I, target: Option<TownId>) -> Settled
where
    I: IntoIterator<Item = (TownId, u64)>,
    F: Fn(TownId) -> &'g [Route],
{
    let n = graph.town_count();
    let mut tentative: Vec<u64> = vec![u64::MAX; n];
    let mut settled: Vec<Option<u64>> = vec![None; n];
    let mut heap: BinaryHeap<Reverse<(u64, u64, TownId)>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    for (town, d) in seeds {
        if d < tentative[town as usize] {
            tentative[town as usize] = d;
            heap.push(Reverse((d, seq, town)));
            seq += 1;
        }
    }

    while let Some(Reverse((d, _, current))) = heap.pop() {
        let idx = current as usize;
        if settled[idx].is_some() || d > tentative[idx] {
            continue;
        }
        settled[idx] = Some(d);

        if target == Some(current) {
            break;
        }

        for route in routes(current) {
            let next = route.destination as usize;
            if settled[next].is_some() {
                continue;
            }
            let candidate = d.saturating_add(u64::from(route.distance));
            if candidate < tentative[next] {
                tentative[next] = candidate;
                heap.push(Reverse((candidate, seq, route.destination)));
                seq += 1;
            }
        }
    }

    Settled { dist: settled }
}

/// Number of walks from `start` to `end` taking between 1 and `max_stops` routes.
///
/// Arriving at `end` counts one trip and the walk keeps going, so longer
/// trips that loop back through `end` are counted too.
///
/// Enumerates every walk, revisits included: on dense graphs the work grows
/// exponentially with `max_stops`. An explicit stack replaces recursion, so
/// large bounds cost time but not call-stack depth.
pub fn count_trips_max_stops(graph: &Graph, start: &str, end: &str, max_stops: u32) -> Result<u64> {
    let start_id = graph.resolve(start)?;
    let end_id = graph.resolve(end)?;

    let mut trips: u64 = 0;
    let mut stack: Vec<(TownId, u32)> = vec![(start_id, 0)];

    while let Some((current, stops)) = stack.pop() {
        if current == end_id && stops > 0 {
            trips += 1;
        }
        if stops < max_stops {
            stack.extend(graph.routes_from(current).iter().map(|r| (r.destination, stops + 1)));
        }
    }

    tracing::trace!(start, end, max_stops, trips, "trips with max stops");
    Ok(trips)
}

/// Number of walks from `start` to `end` taking exactly `stops` routes.
///
/// Passing through `end` early does not count; only the town reached when the
/// budget runs out matters. With `stops == 0` the answer is 1 when
/// `start == end`, else 0.
///
/// Same exponential growth as [`count_trips_max_stops`].
pub fn count_trips_exact_stops(graph: &Graph, start: &str, end: &str, stops: u32) -> Result<u64> {
    let start_id = graph.resolve(start)?;
    let end_id = graph.resolve(end)?;

    let mut trips: u64 = 0;
    let mut stack: Vec<(TownId, u32)> = vec![(start_id, 0)];

    while let Some((current, taken)) = stack.pop() {
        if taken == stops {
            if current == end_id {
                trips += 1;
            }
            continue;
        }
        stack.extend(graph.routes_from(current).iter().map(|r| (r.destination, taken + 1)));
    }

    tracing::trace!(start, end, stops, trips, "trips with exact stops");
    Ok(trips)
}

/// Number of walks from `start` to `end` with total distance strictly below
/// `max_distance`, taking at least one route.
///
/// Like [`count_trips_max_stops`], exploration continues past `end`. Shortest
/// distances to `end` are computed first over the incoming routes; a branch
/// is dropped once `end` is unreachable from it or its distance plus the
/// remaining shortest distance reaches `max_distance`.
///
/// Zero-distance routes do not advance a walk toward the bound. If some town
/// on a cycle of such routes lies on a walk from `start` to `end` shorter than
/// the bound, the walk count is infinite and [`Error::UnboundedTrips`] is
/// returned. Zero-distance cycles that no counted walk can pass through are
/// ignored.
pub fn count_trips_max_distance(
    graph: &Graph,
    start: &str,
    end: &str,
    max_distance: u64,
) -> Result<u64> {
    let start_id = graph.resolve(start)?;
    let end_id = graph.resolve(end)?;

    let to_end = dijkstra(graph, |t| graph.routes_into(t), [(end_id, 0)], None);

    if max_distance > 0 && graph.has_zero_cycle() {
        let from_start = dijkstra(graph, |t| graph.routes_from(t), [(start_id, 0)], None);
        let unbounded = (0..graph.town_count() as TownId).any(|t| {
            graph.on_zero_cycle(t)
                && matches!(
                    (from_start.settled_at(t), to_end.settled_at(t)),
                    (Some(there), Some(back)) if there.saturating_add(back) < max_distance
                )
        });
        if unbounded {
            return Err(Error::UnboundedTrips {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }

    let mut trips: u64 = 0;
    // (town, distance so far, departed)
    let mut stack: Vec<(TownId, u64, bool)> = vec![(start_id, 0, false)];

    while let Some((current, travelled, departed)) = stack.pop() {
        match to_end.settled_at(current) {
            Some(remaining) if travelled.saturating_add(remaining) < max_distance => {}
            _ => continue,
        }
        if current == end_id && departed {
            trips += 1;
        }
        stack.extend(
            graph
                .routes_from(current)
                .iter()
                .map(|r| (r.destination, travelled + u64::from(r.distance), true)),
        );
    }

    tracing::trace!(start, end, max_distance, trips, "trips with max distance");
    Ok(trips)
}
