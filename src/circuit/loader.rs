//! Loading host objects into a [`Circuit`].
//!
//! The design surface keeps its own component and wire objects. Anything
//! implementing [`SimulatableComponent`] / [`WireLike`] can be loaded;
//! structural checks happen once here rather than on every access during
//! simulation.

use tracing::{info, warn};

use super::graph::Circuit;
use super::types::Endpoint;
use super::wire::Wire;
use crate::components::{Component, StateMap};
use crate::error::PinsimError;

/// What the simulator needs from a host component.
pub trait SimulatableComponent {
    /// Unique id; objects without one are not loaded.
    fn component_id(&self) -> Option<&str>;

    /// Catalog type name; determines the pin layout.
    fn component_type(&self) -> &str;

    fn position(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn properties(&self) -> StateMap {
        StateMap::new()
    }

    /// Initial simulation state, e.g. a button already held down.
    fn state(&self) -> StateMap {
        StateMap::new()
    }
}

/// What the simulator needs from a host wire.
pub trait WireLike {
    fn start(&self) -> Option<Endpoint>;
    fn end(&self) -> Option<Endpoint>;
}

impl<T: SimulatableComponent + ?Sized> SimulatableComponent for &T {
    fn component_id(&self) -> Option<&str> {
        (**self).component_id()
    }

    fn component_type(&self) -> &str {
        (**self).component_type()
    }

    fn position(&self) -> (f64, f64) {
        (**self).position()
    }

    fn properties(&self) -> StateMap {
        (**self).properties()
    }

    fn state(&self) -> StateMap {
        (**self).state()
    }
}

impl<T: WireLike + ?Sized> WireLike for &T {
    fn start(&self) -> Option<Endpoint> {
        (**self).start()
    }

    fn end(&self) -> Option<Endpoint> {
        (**self).end()
    }
}

impl SimulatableComponent for Component {
    fn component_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn component_type(&self) -> &str {
        &self.component_type
    }

    fn position(&self) -> (f64, f64) {
        (self.position.x, self.position.y)
    }

    fn properties(&self) -> StateMap {
        self.properties.clone()
    }

    fn state(&self) -> StateMap {
        self.state.clone()
    }
}

impl WireLike for Wire {
    fn start(&self) -> Option<Endpoint> {
        Some(self.start.clone())
    }

    fn end(&self) -> Option<Endpoint> {
        self.end.clone()
    }
}

/// A wire that had both ends but failed validation.
#[derive(Debug)]
pub struct RejectedWire {
    pub wire: Wire,
    pub error: PinsimError,
}

/// Summary of what a load kept and dropped.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Components without an id
    pub filtered_components: usize,
    /// Wires missing an end point
    pub filtered_wires: usize,
    /// Ids seen more than once; only the first was kept
    pub duplicate_components: Vec<String>,
    /// Wires that failed validation
    pub rejected_wires: Vec<RejectedWire>,
    /// Component ids whose recorded pins differ from their type's layout
    pub pin_mismatches: Vec<String>,
}

impl LoadReport {
    /// True when every input object was loaded as given.
    pub fn is_clean(&self) -> bool {
        self.filtered_components == 0
            && self.filtered_wires == 0
            && self.duplicate_components.is_empty()
            && self.rejected_wires.is_empty()
            && self.pin_mismatches.is_empty()
    }
}

impl Circuit {
    /// Build a circuit from host objects.
    ///
    /// Objects lacking the required attributes are filtered out; wires that
    /// fail validation are dropped and listed in the report.
    pub fn assemble<C, W>(
        components: impl IntoIterator<Item = C>,
        wires: impl IntoIterator<Item = W>,
    ) -> (Circuit, LoadReport)
    where
        C: SimulatableComponent,
        W: WireLike,
    {
        let mut circuit = Circuit::new();
        let mut report = LoadReport::default();

        for source in components {
            let Some(id) = source.component_id() else {
                report.filtered_components += 1;
                continue;
            };
            let (x, y) = source.position();
            let mut component = Component::new(id, source.component_type()).at(x, y);
            component.properties = source.properties();
            component.state = source.state();
            if let Err(PinsimError::DuplicateComponent { id }) = circuit.add_component(component) {
                warn!(component = %id, "duplicate component id, keeping the first");
                report.duplicate_components.push(id);
            }
        }

        for source in wires {
            let (Some(start), Some(end)) = (source.start(), source.end()) else {
                report.filtered_wires += 1;
                continue;
            };
            let wire = Wire::new(start, end);
            if let Err(error) = circuit.add_wire(wire.clone()) {
                warn!(start = %wire.start, error = %error, "wire rejected");
                report.rejected_wires.push(RejectedWire { wire, error });
            }
        }

        info!(
            components = circuit.components().len(),
            wires = circuit.wires().len(),
            "circuit assembled"
        );
        (circuit, report)
    }
}
