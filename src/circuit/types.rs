//! Core types for circuit representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A layout coordinate on the design surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Electrical role of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    Digital,
    Analog,
    Power,
    Ground,
}

impl PinKind {
    /// Lowercase name used in layout records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PinKind::Digital => "digital",
            PinKind::Analog => "analog",
            PinKind::Power => "power",
            PinKind::Ground => "ground",
        }
    }
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One end of a wire: a component id and a pin name on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub component: String,
    pub pin: String,
}

impl Endpoint {
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

/// A named, typed connection point on a component.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub name: String,
    pub kind: PinKind,
    /// Offset from the component's origin
    pub position: Point,
    /// Peer pin, set while a wire links this pin
    pub connected_to: Option<Endpoint>,
}

impl Pin {
    /// Create an unconnected pin.
    pub fn new(name: impl Into<String>, kind: PinKind, position: Point) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            connected_to: None,
        }
    }

    /// Check whether a wire may link this pin to `other`.
    ///
    /// Only power rails are restricted: a power pin bonds to another power
    /// pin of the same name. Ground behaves as a shared bus.
    pub fn can_connect_to(&self, other: &Pin) -> bool {
        !(self.kind == PinKind::Power && other.kind == PinKind::Power && self.name != other.name)
    }

    pub fn is_connected(&self) -> bool {
        self.connected_to.is_some()
    }
}

/// A property or state value held by a component.
///
/// Anything that is not a scalar (null, arrays, objects) is kept as raw
/// JSON so a saved design always loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
