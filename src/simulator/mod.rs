//! Board-centric signal simulation.
//!
//! The simulator owns one loaded [`Circuit`](crate::circuit::Circuit) and the
//! board's pin-state table. Every pin write from a sketch is followed by one
//! propagation pass over the wires:
//!
//! ```text
//!   board pin ──wire──> component pin   affect rule updates component state
//!   component pin ──wire──> board pin   read rule updates the board table
//! ```
//!
//! Wires that touch neither end of the board are not followed, and a pass
//! is never repeated until the circuit settles.

mod propagate;
mod simulator;

pub use propagate::{propagate, BoardRead, Effect, PropagationReport, SkippedWire};
pub use simulator::{ExecutedStatement, ExecutionReport, Simulator, SimulatorConfig, SkippedLine};
