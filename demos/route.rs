//! Route through the waypoints of a text map and print the result.
//!
//! Run: cargo run --bin route -- demos/maze.txt [--gap] [--corners]
//!
//! Reads the map from stdin when no path is given. `--gap` stops at the
//! first unreachable waypoint instead of approaching the nearest obstacle;
//! `--corners` lets diagonal moves cut between obstacle corners.

use std::io::Read;

use waygrid_core::Grid;
use waygrid_paths::{ChainPolicy, DiagonalRule, DisplayMap, Router, SearchConfig, StopReason};

fn read_map(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SearchConfig::default();
    let mut map_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--gap" => config = config.with_policy(ChainPolicy::StopAtGap),
            "--corners" => config = config.with_diagonal(DiagonalRule::AllowCornerCutting),
            other => map_path = Some(other.to_string()),
        }
    }

    let text = read_map(map_path.as_deref())?;
    let grid = Grid::parse(&text)?;
    log::info!(
        "loaded {} grid with {} waypoints and {} obstacles",
        grid.bounds(),
        grid.waypoints().len(),
        grid.obstacles().len()
    );

    let mut router = Router::new(config);
    let route = router.find_path(grid.waypoints(), &grid.obstacles(), grid.bounds())?;

    println!("{}", DisplayMap::paint(&grid, &route).to_text());
    println!();
    match route.stop {
        None => println!(
            "route complete: {} cells, length {:.3}",
            route.cells().len(),
            route.length()
        ),
        Some(stop) => match stop.reason {
            StopReason::ApproachedObstacle { target } => println!(
                "no route to {target}; stopped at obstacle {} after {} segment(s)",
                stop.at, stop.segment
            ),
            StopReason::Unreachable { target } => println!(
                "no route to {target}; stopped at {} after {} segment(s)",
                stop.at, stop.segment
            ),
        },
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
