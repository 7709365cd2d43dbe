//! Persisted design layout.
//!
//! The design surface saves a JSON document with two arrays:
//!
//! ```text
//! {
//!   "components": [{"type": "LED", "id": "LED_1", "x": 40.0, "y": 80.0,
//!                   "properties": {}, "pins": [{"name": "Anode", "type": "digital"}, ...]}],
//!   "wires": [{"start_component": "Arduino_Uno_1", "start_pin": "D13",
//!              "end_component": "LED_1", "end_pin": "Anode"}]
//! }
//! ```
//!
//! Records are decoded leniently: a component without an id or a wire
//! without both ends is kept in the record and dropped by the loader.

use serde::{Deserialize, Serialize};

use super::graph::Circuit;
use super::loader::{LoadReport, SimulatableComponent, WireLike};
use super::types::{Endpoint, PinKind};
use crate::components::{ComponentKind, StateMap};
use crate::error::Result;

/// A pin kind as written in a record. Unrecognised wordings are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordedPinKind {
    Known(PinKind),
    Other(String),
}

impl RecordedPinKind {
    pub fn known(&self) -> Option<PinKind> {
        match self {
            RecordedPinKind::Known(kind) => Some(*kind),
            RecordedPinKind::Other(_) => None,
        }
    }
}

impl Default for RecordedPinKind {
    fn default() -> Self {
        RecordedPinKind::Other(String::new())
    }
}

impl From<PinKind> for RecordedPinKind {
    fn from(kind: PinKind) -> Self {
        RecordedPinKind::Known(kind)
    }
}

/// A pin as listed in a component record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: RecordedPinKind,
}

/// A component as persisted by the design surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub properties: StateMap,
    /// Informational; the pin set is always rebuilt from the type.
    #[serde(default)]
    pub pins: Vec<PinRecord>,
}

/// A wire as persisted by the design surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    #[serde(default)]
    pub start_component: Option<String>,
    #[serde(default)]
    pub start_pin: Option<String>,
    #[serde(default)]
    pub end_component: Option<String>,
    #[serde(default)]
    pub end_pin: Option<String>,
}

impl WireRecord {
    pub fn new(start: &Endpoint, end: &Endpoint) -> Self {
        Self {
            start_component: Some(start.component.clone()),
            start_pin: Some(start.pin.clone()),
            end_component: Some(end.component.clone()),
            end_pin: Some(end.pin.clone()),
        }
    }
}

/// The whole persisted design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignLayout {
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub wires: Vec<WireRecord>,
}

impl DesignLayout {
    /// Decode a layout document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a layout file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::PinsimError::FileReadError {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Self::from_json(&content)
    }
}

impl SimulatableComponent for ComponentRecord {
    fn component_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn component_type(&self) -> &str {
        &self.component_type
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn properties(&self) -> StateMap {
        self.properties.clone()
    }
}

impl WireLike for WireRecord {
    fn start(&self) -> Option<Endpoint> {
        match (&self.start_component, &self.start_pin) {
            (Some(c), Some(p)) => Some(Endpoint::new(c, p)),
            _ => None,
        }
    }

    fn end(&self) -> Option<Endpoint> {
        match (&self.end_component, &self.end_pin) {
            (Some(c), Some(p)) => Some(Endpoint::new(c, p)),
            _ => None,
        }
    }
}

impl Circuit {
    /// Rebuild a circuit from a persisted layout.
    ///
    /// Recorded pin lists that disagree with the type's layout are noted in
    /// the report; the type's layout wins.
    pub fn from_layout(layout: &DesignLayout) -> (Circuit, LoadReport) {
        let (circuit, mut report) = Circuit::assemble(&layout.components, &layout.wires);
        for record in &layout.components {
            if record.pins.is_empty() {
                continue;
            }
            let expected = ComponentKind::classify(&record.component_type).descriptor().pins;
            let matches = record.pins.len() == expected.len()
                && record
                    .pins
                    .iter()
                    .zip(expected)
                    .all(|(r, e)| r.name == e.name && r.kind.known() == Some(e.kind));
            if !matches {
                if let Some(id) = &record.id {
                    report.pin_mismatches.push(id.clone());
                }
            }
        }
        (circuit, report)
    }

    /// Produce the persisted form of this circuit.
    pub fn to_layout(&self) -> DesignLayout {
        DesignLayout {
            components: self.components().iter().map(|c| c.serialize()).collect(),
            wires: self
                .wires()
                .iter()
                .filter_map(|w| w.end.as_ref().map(|end| WireRecord::new(&w.start, end)))
                .collect(),
        }
    }
}
