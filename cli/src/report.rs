use anyhow::Result;
use serde::Serialize;
use trainroute_core::{
    count_trips_exact_stops, count_trips_max_distance, count_trips_max_stops, route_distance,
    shortest_distance, Graph, RouteDistance,
};

/// Answer to one query: a distance or a trip count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Distance(RouteDistance),
    Trips(u64),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub number: usize,
    pub query: String,
    pub answer: Answer,
}

/// The ten standard queries, in order.
pub fn standard_report(graph: &Graph) -> Result<Vec<ReportLine>> {
    let mut lines = Vec::with_capacity(10);
    let mut push = |query: String, answer: Answer| {
        lines.push(ReportLine {
            number: lines.len() + 1,
            query,
            answer,
        });
    };

    for route in [
        &["A", "B", "C"][..],
        &["A", "D"],
        &["A", "D", "C"],
        &["A", "E", "B", "C", "D"],
        &["A", "E", "D"],
    ] {
        push(
            format!("distance of route {}", route.join("-")),
            Answer::Distance(route_distance(graph, route)?),
        );
    }

    push(
        "trips C to C with at most 3 stops".to_string(),
        Answer::Trips(count_trips_max_stops(graph, "C", "C", 3)?),
    );
    push(
        "trips A to C with exactly 4 stops".to_string(),
        Answer::Trips(count_trips_exact_stops(graph, "A", "C", 4)?),
    );
    push(
        "shortest route A to C".to_string(),
        Answer::Distance(shortest_distance(graph, "A", "C")?),
    );
    push(
        "shortest route B to B".to_string(),
        Answer::Distance(shortest_distance(graph, "B", "B")?),
    );
    push(
        "trips C to C with distance under 30".to_string(),
        Answer::Trips(count_trips_max_distance(graph, "C", "C", 30)?),
    );

    Ok(lines)
}
