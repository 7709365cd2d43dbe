//! Circuit graph representation and validation.
//!
//! This module provides the in-memory form of a design: components keyed by
//! id, the wires between their pins, and the persisted layout the design
//! surface reads and writes. The [`Circuit`] struct is what the simulator
//! loads.

mod graph;
mod layout;
mod loader;
mod types;
mod validate;
mod wire;

pub use graph::Circuit;
pub use layout::{ComponentRecord, DesignLayout, PinRecord, RecordedPinKind, WireRecord};
pub use loader::{LoadReport, RejectedWire, SimulatableComponent, WireLike};
pub use types::*;
pub use validate::{validate_circuit, Finding};
pub use wire::Wire;
