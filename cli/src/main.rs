//! trainroute: answer route queries over a train network edge list.
//!
//! The edge list holds one `<from>, <to>, <distance>` triple per line.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod load;
mod output;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use trainroute_core::Graph;

use crate::output::Format;
use crate::report::Answer;

#[derive(Parser)]
#[command(name = "trainroute")]
#[command(
    about = "Route distances, shortest routes and trip counts over a train network",
    long_about = None
)]
struct Cli {
    /// Edge list file
    #[arg(
        short,
        long,
        env = "TRAINROUTE_INPUT",
        default_value = "Input.txt",
        global = true
    )]
    input: PathBuf,

    /// Output format
    #[arg(
        long,
        env = "TRAINROUTE_FORMAT",
        value_enum,
        default_value_t = Format::Text,
        global = true
    )]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ten standard queries (default)
    Report,
    /// Distance of an exact route, e.g. A-B-C
    Distance {
        /// Dash-separated towns
        route: String,
    },
    /// Length of the shortest route between two towns
    Shortest { from: String, to: String },
    /// Count trips between two towns under a stop or distance bound
    Trips {
        from: String,
        to: String,
        #[command(flatten)]
        bound: TripBound,
    },
    /// List towns and their outgoing routes
    Towns,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TripBound {
    /// At most this many stops
    #[arg(long)]
    max_stops: Option<u32>,
    /// Exactly this many stops
    #[arg(long)]
    exact_stops: Option<u32>,
    /// Total distance strictly below this
    #[arg(long)]
    max_distance: Option<u64>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let graph = load::load_graph(&cli.input)?;
    let rendered = run(&graph, cli.command.unwrap_or(Commands::Report), cli.format)?;
    println!("{}", rendered);
    Ok(())
}

fn run(graph: &Graph, command: Commands, format: Format) -> Result<String> {
    match command {
        Commands::Report => {
            let lines = report::standard_report(graph)?;
            output::render_report(&lines, format)
        }
        Commands::Distance { route } => {
            let towns = split_route(&route)?;
            let answer = Answer::Distance(trainroute_core::route_distance(graph, &towns)?);
            output::render_answer(&format!("distance of route {}", route), answer, format)
        }
        Commands::Shortest { from, to } => {
            let answer = Answer::Distance(trainroute_core::shortest_distance(graph, &from, &to)?);
            output::render_answer(&format!("shortest route {} to {}", from, to), answer, format)
        }
        Commands::Trips { from, to, bound } => {
            let (query, trips) = match bound {
                TripBound { max_stops: Some(n), .. } => (
                    format!("trips {} to {} with at most {} stops", from, to, n),
                    trainroute_core::count_trips_max_stops(graph, &from, &to, n)?,
                ),
                TripBound { exact_stops: Some(n), .. } => (
                    format!("trips {} to {} with exactly {} stops", from, to, n),
                    trainroute_core::count_trips_exact_stops(graph, &from, &to, n)?,
                ),
                TripBound { max_distance: Some(d), .. } => (
                    format!("trips {} to {} with distance under {}", from, to, d),
                    trainroute_core::count_trips_max_distance(graph, &from, &to, d)?,
                ),
                _ => bail!("one of --max-stops, --exact-stops or --max-distance is required"),
            };
            output::render_answer(&query, Answer::Trips(trips), format)
        }
        Commands::Towns => render_towns(graph, format),
    }
}

/// Split `A-B-C` into town labels.
fn split_route(route: &str) -> Result<Vec<&str>> {
    let towns: Vec<&str> = route.split('-').map(str::trim).collect();
    if towns.iter().any(|t| t.is_empty()) {
        bail!("route '{}' has an empty town label", route);
    }
    Ok(towns)
}

#[derive(Serialize)]
struct TownRoutes<'a> {
    town: &'a str,
    routes: Vec<RouteEntry<'a>>,
}

#[derive(Serialize)]
struct RouteEntry<'a> {
    to: &'a str,
    distance: u32,
}

fn render_towns(graph: &Graph, format: Format) -> Result<String> {
    let towns: Vec<TownRoutes> = graph
        .towns()
        .enumerate()
        .map(|(id, town)| TownRoutes {
            town,
            routes: graph
                .routes_from(id as u32)
                .iter()
                .map(|r| RouteEntry {
                    to: graph.town_label(r.destination).unwrap_or_default(),
                    distance: r.distance,
                })
                .collect(),
        })
        .collect();

    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&towns)?),
        Format::Text => Ok(towns
            .iter()
            .map(|t| {
                let routes = t
                    .routes
                    .iter()
                    .map(|r| format!("{}({})", r.to, r.distance))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{}: {}", t.town, routes).trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
