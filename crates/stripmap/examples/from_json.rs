//! Lays out a route JSON file and prints a short summary of the result.
//!
//! ```text
//! cargo run -p stripmap --example from_json -- demos/branching.json
//! ```

use std::{env, fs, process};

use stripmap::{DiagramBuilder, route::Direction};

fn main() {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: from_json <route.json>");
        process::exit(2);
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            process::exit(1);
        }
    };

    let builder = DiagramBuilder::default();
    let route = match builder.parse(&source) {
        Ok(route) => route,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let layout = builder.layout(&route);
    for direction in Direction::ALL {
        let side = layout.direction(direction);
        println!(
            "{direction}: {} stops, {} layers, {} lanes, consensus {:?}",
            side.stops().len(),
            side.max_layer() + 1,
            side.lane_count(),
            layout.consensus_sequence(direction),
        );
        for connection in side.connections().iter().filter(|c| c.is_express()) {
            println!(
                "  express {} -> {} ({})",
                connection.from(),
                connection.to(),
                connection.trip_name()
            );
        }
    }

    let output = builder.build(&route);
    for (id, stop) in output.stop_positions() {
        let position = stop.position();
        println!(
            "{id:>12} at ({:>6.1}, {:>6.1}) served by {}",
            position.x(),
            position.y(),
            stop.trip_ids().join(", ")
        );
    }
}
