//! Pinsim - Arduino Circuit Simulator
//!
//! Runs a sketch against a saved circuit design and prints the result.
//!
//! # Usage
//!
//! ```bash
//! pinsim design.json blink.ino --press Button_1 -v
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use pinsim_core::{
    circuit::DesignLayout,
    error::{PinsimError, Result},
    Simulator,
};
use serde_json::{json, Map, Value as Json};
use tracing_subscriber::EnvFilter;

/// Arduino circuit simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the saved circuit design (.json)
    #[arg(value_name = "LAYOUT_FILE")]
    layout_file: PathBuf,

    /// Path to the sketch source (.ino)
    #[arg(value_name = "SKETCH_FILE")]
    sketch_file: PathBuf,

    /// Hold down a button before running (repeatable)
    #[arg(long = "press", value_name = "COMPONENT_ID")]
    press: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Load the design
    let layout = DesignLayout::from_file(&args.layout_file)?;
    let mut simulator = Simulator::new();
    let report = simulator.load_layout(&layout);
    if !report.is_clean() {
        eprintln!(
            "warning: {} component(s) and {} wire(s) could not be loaded",
            report.filtered_components + report.duplicate_components.len(),
            report.filtered_wires + report.rejected_wires.len()
        );
    }

    // Press buttons
    let circuit = simulator.circuit_mut().ok_or(PinsimError::NotLoaded)?;
    for id in &args.press {
        circuit
            .component_mut(id)
            .ok_or_else(|| PinsimError::component_not_found(id))?
            .press(true);
    }

    // Run the sketch
    let source = read_file(&args.sketch_file)?;
    let run = simulator.try_execute_code(&source)?;
    for skipped in &run.skipped {
        eprintln!("line {}: skipped, {}", skipped.line, skipped.reason);
    }

    println!("{}", serde_json::to_string_pretty(&summary(&simulator))?);

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PinsimError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Board levels and component states as JSON.
fn summary(simulator: &Simulator) -> Json {
    let board = simulator.board();
    let digital: Map<String, Json> = board
        .digital_levels()
        .map(|(pin, level)| (pin.to_string(), Json::Bool(level)))
        .collect();
    let analog: Map<String, Json> = board
        .analog_levels()
        .map(|(pin, value)| (pin.to_string(), json!(value)))
        .collect();
    let components: Map<String, Json> = simulator
        .circuit()
        .map(|c| c.components())
        .unwrap_or_default()
        .iter()
        .map(|c| (c.id.clone(), json!(c.state)))
        .collect();

    json!({
        "board": { "digital": digital, "analog": analog },
        "components": components,
    })
}
