//! # Pinsim Core
//!
//! The simulation core of an Arduino circuit designer.
//!
//! This library provides:
//! - A typed pin and component model with a fixed catalog of part kinds
//! - A wire graph with connection validation
//! - A board-centric signal propagator
//! - A line-oriented interpreter for `pinMode`, `digitalWrite` and `analogWrite`
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Pins, wires, the circuit graph, layout records and loading
//! - [`components`] - Component model, kind catalog, board pin table
//! - [`interpreter`] - Sketch scanner
//! - [`simulator`] - Propagation and the [`Simulator`] entry point
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! pinsim design.json blink.ino --press Button_1
//! ```
//!
//! ### Library
//!
//! ```
//! use pinsim_core::circuit::{Circuit, Endpoint, Value};
//! use pinsim_core::components::Component;
//! use pinsim_core::Simulator;
//!
//! let mut circuit = Circuit::new();
//! circuit.add_component(Component::new("Arduino_Uno_1", "Arduino Uno")).unwrap();
//! circuit.add_component(Component::new("LED_1", "LED")).unwrap();
//! circuit
//!     .connect(Endpoint::new("Arduino_Uno_1", "D13"), Endpoint::new("LED_1", "Anode"))
//!     .unwrap();
//!
//! let mut sim = Simulator::new();
//! sim.load_circuit(circuit);
//! sim.execute_code("digitalWrite(D13, HIGH);");
//!
//! let led = sim.circuit().unwrap().get("LED_1").unwrap();
//! assert_eq!(led.state_value("on"), Some(&Value::Bool(true)));
//! ```
//!
//! ## Simulation Model
//!
//! There is no electrical solving. The board holds a table of pin levels;
//! each write updates the table and then runs a single pass over the wires
//! in the order they were drawn, pushing board levels into components
//! (e.g. an LED lights) and pulling component levels into the board
//! (e.g. a pressed button reads HIGH).

pub mod circuit;
pub mod components;
pub mod error;
pub mod interpreter;
pub mod simulator;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{PinsimError, Result};
pub use simulator::Simulator;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmPinSim;

/// `analogWrite` values above this read as HIGH on a digital pin
pub const DEFAULT_ANALOG_THRESHOLD: u32 = 127;
