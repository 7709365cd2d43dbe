//! Circuit graph structure.

use std::collections::HashMap;

use tracing::debug;

use super::types::Endpoint;
use super::wire::Wire;
use crate::components::Component;
use crate::error::{PinsimError, Result};

/// The components and completed wires of one design session.
///
/// Components keep their insertion order; an id index gives constant-time
/// lookup. Wires are evaluated in insertion order by the propagator.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// All components in insertion order
    components: Vec<Component>,

    /// Mapping from component ids to positions in `components`
    index: HashMap<String, usize>,

    /// Completed wires in insertion order
    wires: Vec<Wire>,

    /// Serial for generated ids, shared by all types
    next_serial: usize,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Ids must be unique.
    pub fn add_component(&mut self, component: Component) -> Result<&mut Component> {
        if self.index.contains_key(&component.id) {
            return Err(PinsimError::DuplicateComponent { id: component.id });
        }
        let idx = self.components.len();
        self.index.insert(component.id.clone(), idx);
        self.components.push(component);
        Ok(&mut self.components[idx])
    }

    /// Generate an unused id of the form `"{type}_{n}"`.
    ///
    /// The serial counts up across all types and restarts on [`clear`](Self::clear).
    pub fn next_id(&mut self, component_type: &str) -> String {
        loop {
            let id = format!("{}_{}", component_type, self.next_serial);
            self.next_serial += 1;
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Remove a component.
    ///
    /// Wires that reference it stay in place as broken references; the
    /// propagator skips them.
    pub fn remove_component(&mut self, id: &str) -> Result<Component> {
        let idx = self
            .index
            .remove(id)
            .ok_or_else(|| PinsimError::component_not_found(id))?;
        let removed = self.components.remove(idx);
        for (i, c) in self.components.iter().enumerate().skip(idx) {
            self.index.insert(c.id.clone(), i);
        }
        for c in &mut self.components {
            for pin in c.pins_mut() {
                if pin.connected_to.as_ref().is_some_and(|e| e.component == id) {
                    pin.connected_to = None;
                }
            }
        }
        debug!(component = id, "removed component");
        Ok(removed)
    }

    /// Find a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.index.get(id).map(|&i| &self.components[i])
    }

    /// Find a component by id for mutation.
    pub fn component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.index.get(id).map(|&i| &mut self.components[i])
    }

    /// Find a component by id or fail with [`PinsimError::ComponentNotFound`].
    pub fn get(&self, id: &str) -> Result<&Component> {
        self.component(id)
            .ok_or_else(|| PinsimError::component_not_found(id))
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn component_at(&self, idx: usize) -> &Component {
        &self.components[idx]
    }

    pub(crate) fn component_at_mut(&mut self, idx: usize) -> &mut Component {
        &mut self.components[idx]
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All wires in insertion order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// The board of record: the first controller board added.
    pub fn board(&self) -> Option<&Component> {
        self.board_index().map(|i| &self.components[i])
    }

    pub(crate) fn board_index(&self) -> Option<usize> {
        self.components.iter().position(|c| c.kind.is_board())
    }

    /// Wire two endpoints together.
    pub fn connect(&mut self, start: Endpoint, end: Endpoint) -> Result<usize> {
        self.add_wire(Wire::new(start, end))
    }

    /// Add a complete wire after validating both endpoints.
    ///
    /// Both pins record each other as peer; a pin that was already linked
    /// takes the new peer.
    pub fn add_wire(&mut self, wire: Wire) -> Result<usize> {
        let end = wire.end()?.clone();
        let start_idx = self
            .index_of(&wire.start.component)
            .ok_or_else(|| PinsimError::component_not_found(&wire.start.component))?;
        let end_idx = self
            .index_of(&end.component)
            .ok_or_else(|| PinsimError::component_not_found(&end.component))?;

        wire.validate(&self.components[start_idx], &self.components[end_idx])?;

        self.components[start_idx]
            .pin_by_name_mut(&wire.start.pin)?
            .connected_to = Some(end.clone());
        self.components[end_idx]
            .pin_by_name_mut(&end.pin)?
            .connected_to = Some(wire.start.clone());

        debug!(start = %wire.start, end = %end, "wire added");
        self.wires.push(wire);
        Ok(self.wires.len() - 1)
    }

    /// Remove a wire and clear the peer links it set.
    pub fn disconnect(&mut self, index: usize) -> Option<Wire> {
        if index >= self.wires.len() {
            return None;
        }
        let wire = self.wires.remove(index);
        if let Some(end) = &wire.end {
            self.clear_peer(&wire.start, end);
            self.clear_peer(end, &wire.start);
        }
        Some(wire)
    }

    fn clear_peer(&mut self, at: &Endpoint, peer: &Endpoint) {
        let Some(component) = self.component_mut(&at.component) else {
            return;
        };
        if let Ok(pin) = component.pin_by_name_mut(&at.pin) {
            if pin.connected_to.as_ref() == Some(peer) {
                pin.connected_to = None;
            }
        }
    }

    /// Wires with an end on `component`'s pin `pin`.
    pub fn wires_at<'a>(&'a self, component: &'a str, pin: &'a str) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.iter().filter(move |w| w.touches(component, pin))
    }

    /// Whether `component` is connected via `pin`.
    pub fn is_connected_via(&self, component: &str, pin: &str) -> bool {
        self.wires_at(component, pin).next().is_some()
    }

    /// Clear the simulation state of every component.
    pub fn reset_state(&mut self) {
        for c in &mut self.components {
            c.state.clear();
        }
    }

    /// Remove all components and wires.
    pub fn clear(&mut self) {
        self.components.clear();
        self.index.clear();
        self.wires.clear();
        self.next_serial = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blink() -> Circuit {
        let mut c = Circuit::new();
        c.add_component(Component::new("U1", "Arduino Uno")).unwrap();
        c.add_component(Component::new("L1", "LED")).unwrap();
        c.connect(Endpoint::new("U1", "D13"), Endpoint::new("L1", "Anode"))
            .unwrap();
        c.connect(Endpoint::new("L1", "Cathode"), Endpoint::new("U1", "GND"))
            .unwrap();
        c
    }

    #[test]
    fn test_duplicate_id() {
        let mut c = Circuit::new();
        c.add_component(Component::new("L1", "LED")).unwrap();
        let err = c.add_component(Component::new("L1", "Button")).unwrap_err();
        assert!(matches!(err, PinsimError::DuplicateComponent { .. }));
    }

    #[test]
    fn test_connect_links_peers() {
        let c = blink();
        let anode = c.get("L1").unwrap().pin_by_name("Anode").unwrap();
        assert_eq!(anode.connected_to, Some(Endpoint::new("U1", "D13")));
        let d13 = c.get("U1").unwrap().pin_by_name("D13").unwrap();
        assert_eq!(d13.connected_to, Some(Endpoint::new("L1", "Anode")));
        assert!(c.is_connected_via("U1", "GND"));
        assert!(!c.is_connected_via("U1", "D12"));
    }

    #[test]
    fn test_invalid_wire_is_rejected() {
        let mut c = blink();
        c.add_component(Component::new("S1", "Light Sensor")).unwrap();
        let err = c
            .connect(Endpoint::new("U1", "3.3V"), Endpoint::new("S1", "VCC"))
            .unwrap_err();
        assert!(err.is_validation());
        let err = c
            .connect(Endpoint::new("U1", "D2"), Endpoint::new("X9", "SIG"))
            .unwrap_err();
        assert!(matches!(err, PinsimError::ComponentNotFound { .. }));
        assert!(c.add_wire(Wire::pending(Endpoint::new("U1", "D2"))).is_err());
        assert_eq!(c.wires().len(), 2);
        assert!(!c.get("S1").unwrap().pin_by_name("VCC").unwrap().is_connected());
    }

    #[test]
    fn test_disconnect_clears_peers() {
        let mut c = blink();
        let wire = c.disconnect(0).unwrap();
        assert_eq!(wire.start, Endpoint::new("U1", "D13"));
        assert!(!c.get("L1").unwrap().pin_by_name("Anode").unwrap().is_connected());
        assert!(!c.get("U1").unwrap().pin_by_name("D13").unwrap().is_connected());
        assert_eq!(c.wires().len(), 1);
        assert!(c.disconnect(5).is_none());
    }

    #[test]
    fn test_remove_component_leaves_broken_wires() {
        let mut c = blink();
        c.add_component(Component::new("B1", "Button")).unwrap();
        c.remove_component("L1").unwrap();
        assert_eq!(c.wires().len(), 2);
        assert!(c.component("L1").is_none());
        assert_eq!(c.get("B1").unwrap().id, "B1");
        assert!(!c.get("U1").unwrap().pin_by_name("D13").unwrap().is_connected());
    }

    #[test]
    fn test_next_id_counts_across_types() {
        let mut c = Circuit::new();
        let led = c.next_id("LED");
        c.add_component(Component::new(led, "LED")).unwrap();
        c.add_component(Component::new("Button_2", "Button")).unwrap();
        assert_eq!(c.next_id("Resistor"), "Resistor_1");
        assert_eq!(c.next_id("Button"), "Button_3");
        assert!(c.component("LED_0").is_some());

        c.clear();
        assert_eq!(c.next_id("LED"), "LED_0");
    }

    #[test]
    fn test_board_is_first_board() {
        let mut c = Circuit::new();
        c.add_component(Component::new("L1", "LED")).unwrap();
        assert!(c.board().is_none());
        c.add_component(Component::new("N1", "Arduino Nano")).unwrap();
        c.add_component(Component::new("U1", "Arduino Uno")).unwrap();
        assert_eq!(c.board().unwrap().id, "N1");
    }
}
