use std::time::Instant;

use trainroute_core::{EdgeRecord, Graph};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let town_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: trainroute-bench [mode] [town_count]");
        println!();
        println!("Modes:");
        println!("  all      Run all generators and benchmark each (default)");
        println!("  ring     Ring line with express chords (long cycles)");
        println!("  random   Uniform random routes, ~3 per town");
        println!("  grid     Square grid with routes right and down, wrapping");
        println!();
        println!("Default town_count: 10000");
        return;
    }

    if town_count < 2 {
        eprintln!("town_count must be at least 2");
        return;
    }

    println!("trainroute-bench");
    println!("================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Vec<EdgeRecord>)> = match mode {
        "ring" => vec![("Ring with chords", gen_ring)],
        "random" => vec![("Uniform random", gen_random)],
        "grid" => vec![("Wrapped grid", gen_grid)],
        "all" => vec![
            ("Ring with chords", gen_ring as fn(u64) -> Vec<EdgeRecord>),
            ("Uniform random", gen_random),
            ("Wrapped grid", gen_grid),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, town_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Vec<EdgeRecord>, town_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} towns", town_count);

    let edges = generator(town_count);
    let t = Instant::now();
    let graph = match Graph::from_edges(edges) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Build failed: {}", e);
            return;
        }
    };
    println!(
        "Built in {:.2}ms: {} towns, {} routes",
        t.elapsed().as_secs_f64() * 1000.0,
        graph.town_count(),
        graph.route_count()
    );

    let first = town(0);
    let far = town(town_count / 2);

    println!();
    let t = Instant::now();
    let shortest = trainroute_core::shortest_distance(&graph, &first, &far);
    println!(
        "Shortest {} -> {}: {:?} in {:.2}ms",
        first,
        far,
        shortest,
        t.elapsed().as_secs_f64() * 1000.0
    );

    let t = Instant::now();
    let cycle = trainroute_core::shortest_distance(&graph, &first, &first);
    println!(
        "Shortest cycle through {}: {:?} in {:.2}ms",
        first,
        cycle,
        t.elapsed().as_secs_f64() * 1000.0
    );

    let walk: Vec<String> = (0..town_count.min(50)).map(town).collect();
    let t = Instant::now();
    let distance = trainroute_core::route_distance(&graph, &walk);
    println!(
        "Route over {} towns: {:?} in {:.3}ms",
        walk.len(),
        distance,
        t.elapsed().as_secs_f64() * 1000.0
    );

    // Walk enumeration is exponential in the bound; keep it small
    println!();
    println!("{:>8} {:>14} {:>14} {:>10}", "bound", "max-stops", "exact-stops", "time");
    println!("{:->8} {:->14} {:->14} {:->10}", "", "", "", "");
    for stops in [2u32, 4, 6, 8, 10] {
        let t = Instant::now();
        let max = trainroute_core::count_trips_max_stops(&graph, &first, &first, stops);
        let exact = trainroute_core::count_trips_exact_stops(&graph, &first, &first, stops);
        let elapsed = t.elapsed();
        match (max, exact) {
            (Ok(max), Ok(exact)) => println!(
                "{:>8} {:>14} {:>14} {:>8.1}ms",
                stops,
                max,
                exact,
                elapsed.as_secs_f64() * 1000.0
            ),
            (Err(e), _) | (_, Err(e)) => println!("{:>8} error: {}", stops, e),
        }
        if elapsed.as_secs_f64() > 5.0 {
            println!("{:>8} (stopping: bound too expensive)", "");
            break;
        }
    }

    println!();
    println!("{:>8} {:>14} {:>10}", "distance", "trips", "time");
    println!("{:->8} {:->14} {:->10}", "", "", "");
    for max_distance in [5u64, 10, 15] {
        let t = Instant::now();
        let trips = trainroute_core::count_trips_max_distance(&graph, &first, &first, max_distance);
        let elapsed = t.elapsed();
        match trips {
            Ok(n) => println!(
                "{:>8} {:>14} {:>8.1}ms",
                max_distance,
                n,
                elapsed.as_secs_f64() * 1000.0
            ),
            Err(e) => println!("{:>8} error: {}", max_distance, e),
        }
        if elapsed.as_secs_f64() > 5.0 {
            println!("{:>8} (stopping: bound too expensive)", "");
            break;
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, O(towns)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn town(i: u64) -> String {
    format!("T{}", i)
}

fn route(from: u64, to: u64, distance: u64) -> EdgeRecord {
    EdgeRecord::new(town(from), town(to), distance as i64)
}

/// Ring line: every town links to the next, plus an express chord every 10 towns.
fn gen_ring(town_count: u64) -> Vec<EdgeRecord> {
    let mut rng = FastRng::new(42);
    let mut edges = Vec::with_capacity(town_count as usize * 2);

    for i in 0..town_count {
        edges.push(route(i, (i + 1) % town_count, 1 + rng.next(9)));
        if i % 10 == 0 {
            edges.push(route(i, (i + town_count / 3) % town_count, 5 + rng.next(20)));
        }
    }

    edges
}

/// Uniform random routes. Each town gets a route to its successor so every
/// town appears in the graph, then ~2 more random routes per town.
fn gen_random(town_count: u64) -> Vec<EdgeRecord> {
    let mut rng = FastRng::new(54321);
    let mut edges = Vec::with_capacity(town_count as usize * 3);

    for i in 0..town_count {
        edges.push(route(i, (i + 1) % town_count, 1 + rng.next(9)));
    }
    for _ in 0..town_count * 2 {
        let from = rng.next(town_count);
        let to = rng.next(town_count);
        if from != to {
            edges.push(route(from, to, 1 + rng.next(19)));
        }
    }

    edges
}

/// Square grid, routes right and down with wrap-around (a torus).
fn gen_grid(town_count: u64) -> Vec<EdgeRecord> {
    let side = ((town_count as f64).sqrt() as u64).max(2);
    let mut rng = FastRng::new(99999);
    let mut edges = Vec::with_capacity((side * side * 2) as usize);

    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            let right = row * side + (col + 1) % side;
            let down = ((row + 1) % side) * side + col;
            edges.push(route(id, right, 1 + rng.next(9)));
            edges.push(route(id, down, 1 + rng.next(9)));
        }
    }

    edges
}
