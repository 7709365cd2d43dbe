//! Component models for circuit simulation.
//!
//! A [`Component`] is a typed circuit element with a fixed pin layout and a
//! mutable state bag. Per-kind behaviour lives in static descriptors:
//! - [`catalog`] - kind classification, pin layouts, descriptor registry
//! - [`rules`] - affect/read rules used by the descriptors
//! - [`board`] - controller board pin profiles and the board's pin-state table

pub mod board;
pub mod catalog;
pub mod rules;

pub use board::{BoardPins, BoardProfile, PinMode, PinValue};
pub use catalog::{ComponentKind, KindDescriptor, PinSpec, PALETTE};

use std::collections::BTreeMap;

use crate::circuit::{ComponentRecord, Pin, PinRecord, Point, Value};
use crate::error::{PinsimError, Result};

/// Keyed values held by a component, ordered for stable output.
pub type StateMap = BTreeMap<String, Value>;

/// A circuit component placed on the design surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Unique id within the circuit
    pub id: String,
    /// Catalog type name, e.g. "Arduino Uno"
    pub component_type: String,
    /// Kind derived from the type name
    pub kind: ComponentKind,
    /// Position on the design surface
    pub position: Point,
    pins: Vec<Pin>,
    /// Static configuration (resistance, colour, ...)
    pub properties: StateMap,
    /// Simulation state written by the propagator
    pub state: StateMap,
}

impl Component {
    /// Create a component; its pins are fixed by the classified kind.
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        let component_type = component_type.into();
        let kind = ComponentKind::classify(&component_type);
        Self {
            id: id.into(),
            component_type,
            kind,
            position: Point::default(),
            pins: kind.descriptor().build_pins(),
            properties: StateMap::new(),
            state: StateMap::new(),
        }
    }

    /// Set the position on the design surface.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Add a static property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn descriptor(&self) -> &'static KindDescriptor {
        self.kind.descriptor()
    }

    /// Pin-name sets if this component is a controller board.
    pub fn board_profile(&self) -> Option<&'static BoardProfile> {
        self.descriptor().board
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }

    /// Find a pin by name.
    pub fn pin_by_name(&self, name: &str) -> Result<&Pin> {
        self.pins
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PinsimError::unknown_pin(&self.id, name))
    }

    /// Find a pin by name for mutation.
    pub fn pin_by_name_mut(&mut self, name: &str) -> Result<&mut Pin> {
        let id = &self.id;
        self.pins
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| PinsimError::unknown_pin(id, name))
    }

    pub fn has_pin(&self, name: &str) -> bool {
        self.pins.iter().any(|p| p.name == name)
    }

    /// Read a state value.
    pub fn state_value(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Set a state value, e.g. a button press from the host.
    pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.insert(key.into(), value.into());
    }

    /// Whether the `on` state is set, as for a lit LED.
    pub fn is_on(&self) -> bool {
        self.state_value(rules::STATE_ON)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn brightness(&self) -> i64 {
        self.state_value(rules::STATE_BRIGHTNESS)
            .and_then(Value::as_int)
            .unwrap_or(0)
    }

    /// Hold or release a button.
    pub fn press(&mut self, pressed: bool) {
        self.set_state(rules::STATE_PRESSED, pressed);
    }

    /// Apply an incoming level on `pin` through the kind's affect rule.
    pub fn affect(&mut self, pin: &str, level: bool) -> bool {
        (self.descriptor().affect)(&mut self.state, pin, level)
    }

    /// Read the level offered on `pin` through the kind's read rule.
    pub fn read(&self, pin: &str) -> bool {
        (self.descriptor().read)(&self.state, pin)
    }

    /// Produce the plain record the design surface persists.
    pub fn serialize(&self) -> ComponentRecord {
        ComponentRecord {
            component_type: self.component_type.clone(),
            id: Some(self.id.clone()),
            x: self.position.x,
            y: self.position.y,
            properties: self.properties.clone(),
            pins: self
                .pins
                .iter()
                .map(|p| PinRecord {
                    name: p.name.clone(),
                    kind: p.kind.into(),
                })
                .collect(),
        }
    }
}
