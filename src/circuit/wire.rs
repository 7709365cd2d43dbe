//! Wires between component pins.

use serde::{Deserialize, Serialize};

use super::types::Endpoint;
use crate::components::Component;
use crate::error::{PinsimError, Result};

/// A connection between two component pins.
///
/// `end` is `None` while the wire is still being drawn. Only complete wires
/// can be added to a [`Circuit`](super::Circuit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub start: Endpoint,
    pub end: Option<Endpoint>,
}

impl Wire {
    /// A complete wire. Not validated until it joins a circuit.
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A wire whose end has not been placed yet.
    pub fn pending(start: Endpoint) -> Self {
        Self { start, end: None }
    }

    /// Place the end of a pending wire.
    pub fn finish(mut self, end: Endpoint) -> Self {
        self.end = Some(end);
        self
    }

    /// Build a validated wire between two components.
    pub fn between(
        start: &Component,
        start_pin: &str,
        end: &Component,
        end_pin: &str,
    ) -> Result<Self> {
        let wire = Self::new(
            Endpoint::new(&start.id, start_pin),
            Endpoint::new(&end.id, end_pin),
        );
        wire.validate(start, end)?;
        Ok(wire)
    }

    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// The end point, or [`PinsimError::IncompleteWire`].
    pub fn end(&self) -> Result<&Endpoint> {
        self.end.as_ref().ok_or_else(|| PinsimError::IncompleteWire {
            component: self.start.component.clone(),
            pin: self.start.pin.clone(),
        })
    }

    /// Check that both pins exist on the given components and may be linked.
    pub fn validate(&self, start: &Component, end: &Component) -> Result<()> {
        let end_point = self.end()?;
        let a = start.pin_by_name(&self.start.pin)?;
        let b = end.pin_by_name(&end_point.pin)?;
        if !a.can_connect_to(b) {
            return Err(PinsimError::incompatible(&a.name, &b.name));
        }
        Ok(())
    }

    /// Whether either end sits on `component`'s pin `pin`.
    pub fn touches(&self, component: &str, pin: &str) -> bool {
        let hit = |e: &Endpoint| e.component == component && e.pin == pin;
        hit(&self.start) || self.end.as_ref().is_some_and(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_validates_power_rails() {
        let uno = Component::new("U1", "Arduino Uno");
        let sensor = Component::new("S1", "Light Sensor");
        let err = Wire::between(&uno, "3.3V", &sensor, "VCC").unwrap_err();
        assert!(matches!(err, PinsimError::IncompatiblePins { .. }));
        assert!(err.is_validation());

        let other = Component::new("U2", "Arduino Nano");
        assert!(Wire::between(&uno, "5V", &other, "3.3V").is_err());
        assert!(Wire::between(&uno, "5V", &other, "5V").is_ok());
    }

    #[test]
    fn test_between_requires_existing_pins() {
        let uno = Component::new("U1", "Arduino Uno");
        let led = Component::new("L1", "LED");
        let err = Wire::between(&uno, "D13", &led, "Gate").unwrap_err();
        assert!(matches!(err, PinsimError::UnknownPin { ref pin, .. } if pin == "Gate"));
    }

    #[test]
    fn test_ground_to_anything() {
        let uno = Component::new("U1", "Arduino Uno");
        let motor = Component::new("M1", "DC Motor");
        let led = Component::new("L1", "LED");
        assert!(Wire::between(&uno, "GND", &motor, "+").is_ok());
        assert!(Wire::between(&led, "Cathode", &uno, "A3").is_ok());
    }

    #[test]
    fn test_pending_wire() {
        let uno = Component::new("U1", "Arduino Uno");
        let led = Component::new("L1", "LED");
        let wire = Wire::pending(Endpoint::new("U1", "D13"));
        assert!(!wire.is_complete());
        assert!(matches!(wire.validate(&uno, &led), Err(PinsimError::IncompleteWire { .. })));

        let wire = wire.finish(Endpoint::new("L1", "Anode"));
        assert!(wire.validate(&uno, &led).is_ok());
        assert!(wire.touches("L1", "Anode"));
        assert!(!wire.touches("L1", "Cathode"));
    }
}
