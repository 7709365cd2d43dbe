//! Component catalog: one static descriptor per component kind.
//!
//! A descriptor carries everything the simulator needs to know about a kind:
//! its pin layout, how an incoming signal changes its state (affect rule) and
//! what it offers back to the board (read rule). Supporting a new kind means
//! adding a descriptor, not editing the propagator.

use serde::{Deserialize, Serialize};

use super::board::BoardProfile;
use super::rules;
use super::StateMap;
use crate::circuit::{Pin, PinKind, Point};

/// Default outline of a placed component.
pub const COMPONENT_WIDTH: f64 = 60.0;
pub const COMPONENT_HEIGHT: f64 = 40.0;

/// Vertical spacing between pins on one edge.
const PIN_PITCH: f64 = 10.0;

/// A pin in a kind's fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSpec {
    pub name: &'static str,
    pub kind: PinKind,
}

const fn pin(name: &'static str, kind: PinKind) -> PinSpec {
    PinSpec { name, kind }
}

/// Applies an incoming level on `pin` to a component's state.
/// Returns whether the kind reacted.
pub type AffectRule = fn(&mut StateMap, &str, bool) -> bool;

/// Reads the level a component offers on `pin`.
pub type ReadRule = fn(&StateMap, &str) -> bool;

/// Static behaviour of a component kind.
#[derive(Debug, Clone, Copy)]
pub struct KindDescriptor {
    pub kind: ComponentKind,
    pub pins: &'static [PinSpec],
    pub affect: AffectRule,
    pub read: ReadRule,
    /// Pin-name sets, present for controller boards only
    pub board: Option<&'static BoardProfile>,
}

impl KindDescriptor {
    /// Instantiate the pin layout, positioned on the component outline.
    ///
    /// The first half of the pins goes on the left edge, the rest on the
    /// right edge, evenly spaced.
    pub fn build_pins(&self) -> Vec<Pin> {
        let (width, height) = self.outline();
        let left = (self.pins.len() + 1) / 2;
        let right = self.pins.len() - left;

        self.pins
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let (x, slot, count) = if i < left {
                    (0.0, i, left)
                } else {
                    (width, i - left, right)
                };
                let y = height * (slot + 1) as f64 / (count + 1) as f64;
                Pin::new(spec.name, spec.kind, Point::new(x, y))
            })
            .collect()
    }

    /// Width and height of the component outline.
    pub fn outline(&self) -> (f64, f64) {
        let per_side = (self.pins.len() + 1) / 2;
        let height = COMPONENT_HEIGHT.max((per_side + 1) as f64 * PIN_PITCH);
        (COMPONENT_WIDTH, height)
    }
}

/// Component kinds known to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Board,
    Led,
    Resistor,
    Button,
    Sensor,
    Motor,
    Generic,
}

impl ComponentKind {
    /// Classify a catalog type name such as "Arduino Uno" or "Light Sensor".
    pub fn classify(component_type: &str) -> Self {
        match component_type {
            t if t.contains("Arduino") => Self::Board,
            "LED" => Self::Led,
            "Resistor" => Self::Resistor,
            "Button" => Self::Button,
            t if t.contains("Sensor") => Self::Sensor,
            t if t.contains("Motor") => Self::Motor,
            _ => Self::Generic,
        }
    }

    /// Look up the static descriptor for this kind.
    pub fn descriptor(&self) -> &'static KindDescriptor {
        match self {
            Self::Board => &BOARD,
            Self::Led => &LED,
            Self::Resistor => &RESISTOR,
            Self::Button => &BUTTON,
            Self::Sensor => &SENSOR,
            Self::Motor => &MOTOR,
            Self::Generic => &GENERIC,
        }
    }

    pub fn is_board(&self) -> bool {
        matches!(self, Self::Board)
    }
}

/// Type names offered by the design surface's component palette.
pub const PALETTE: &[&str] = &[
    "Arduino Uno",
    "Arduino Nano",
    "LED",
    "Resistor",
    "Capacitor",
    "Button",
    "Potentiometer",
    "Temperature Sensor",
    "Motion Sensor",
    "Light Sensor",
    "Servo Motor",
    "DC Motor",
    "LCD Display",
    "OLED Display",
    "Breadboard",
    "Battery 9V",
];

use PinKind::{Analog, Digital, Ground, Power};

static BOARD: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Board,
    pins: &[
        pin("D0", Digital),
        pin("D1", Digital),
        pin("D2", Digital),
        pin("D3", Digital),
        pin("D4", Digital),
        pin("D5", Digital),
        pin("D6", Digital),
        pin("D7", Digital),
        pin("D8", Digital),
        pin("D9", Digital),
        pin("D10", Digital),
        pin("D11", Digital),
        pin("D12", Digital),
        pin("D13", Digital),
        pin("A0", Analog),
        pin("A1", Analog),
        pin("A2", Analog),
        pin("A3", Analog),
        pin("A4", Analog),
        pin("A5", Analog),
        pin("5V", Power),
        pin("3.3V", Power),
        pin("GND", Ground),
        pin("VIN", Power),
    ],
    affect: rules::inert,
    read: rules::read_low,
    board: Some(&BoardProfile::UNO),
};

static LED: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Led,
    pins: &[pin("Anode", Digital), pin("Cathode", Ground)],
    affect: rules::led_affect,
    read: rules::read_low,
    board: None,
};

static RESISTOR: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Resistor,
    pins: &[pin("T1", Digital), pin("T2", Digital)],
    affect: rules::inert,
    read: rules::read_low,
    board: None,
};

static BUTTON: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Button,
    pins: &[pin("Pin1", Digital), pin("Pin2", Digital)],
    affect: rules::inert,
    read: rules::button_read,
    board: None,
};

static SENSOR: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Sensor,
    pins: &[pin("VCC", Power), pin("GND", Ground), pin("OUT", Analog)],
    affect: rules::inert,
    read: rules::read_low,
    board: None,
};

static MOTOR: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Motor,
    pins: &[pin("+", Power), pin("-", Ground)],
    affect: rules::inert,
    read: rules::read_low,
    board: None,
};

static GENERIC: KindDescriptor = KindDescriptor {
    kind: ComponentKind::Generic,
    pins: &[pin("VCC", Power), pin("GND", Ground), pin("SIG", Digital)],
    affect: rules::inert,
    read: rules::read_low,
    board: None,
};
