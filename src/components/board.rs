//! Controller board profile and pin-state table.

use std::collections::HashMap;

use crate::error::{PinsimError, Result};

/// Pin-name sets of a controller board variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardProfile {
    pub name: &'static str,
    pub digital: &'static [&'static str],
    pub analog: &'static [&'static str],
}

impl BoardProfile {
    /// Uno-class pinout, shared by the Uno and Nano entries of the catalog.
    pub const UNO: BoardProfile = BoardProfile {
        name: "Arduino Uno",
        digital: &[
            "D0", "D1", "D2", "D3", "D4", "D5", "D6", "D7", "D8", "D9", "D10", "D11", "D12", "D13",
        ],
        analog: &["A0", "A1", "A2", "A3", "A4", "A5"],
    };

    pub fn is_digital(&self, pin: &str) -> bool {
        self.digital.contains(&pin)
    }

    pub fn is_analog(&self, pin: &str) -> bool {
        self.analog.contains(&pin)
    }
}

/// A value written to a board pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinValue {
    Digital(bool),
    Analog(u32),
}

/// Configured direction of a board pin, as declared by `pinMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
    InputPullup,
}

impl PinMode {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "INPUT" => Some(Self::Input),
            "OUTPUT" => Some(Self::Output),
            "INPUT_PULLUP" => Some(Self::InputPullup),
            _ => None,
        }
    }
}

/// The board's own pin levels, independent of any component state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardPins {
    profile: BoardProfile,
    digital: HashMap<&'static str, bool>,
    analog: HashMap<&'static str, u32>,
    modes: HashMap<&'static str, PinMode>,
}

impl BoardPins {
    /// Create a table with every pin LOW / 0.
    pub fn new(profile: BoardProfile) -> Self {
        Self {
            profile,
            digital: profile.digital.iter().map(|p| (*p, false)).collect(),
            analog: profile.analog.iter().map(|p| (*p, 0)).collect(),
            modes: HashMap::new(),
        }
    }

    pub fn profile(&self) -> &BoardProfile {
        &self.profile
    }

    /// Level of a digital pin, `None` for names outside the profile.
    pub fn digital(&self, pin: &str) -> Option<bool> {
        self.digital.get(pin).copied()
    }

    /// Magnitude of an analog pin, `None` for names outside the profile.
    pub fn analog(&self, pin: &str) -> Option<u32> {
        self.analog.get(pin).copied()
    }

    pub fn mode(&self, pin: &str) -> Option<PinMode> {
        self.modes.get(pin).copied()
    }

    /// Write a value to a board pin.
    ///
    /// Digital pins store a level: analog values above `threshold` read as
    /// HIGH. Analog pins store a magnitude: a digital HIGH is 255.
    pub fn write(&mut self, pin: &str, value: PinValue, threshold: u32) -> Result<()> {
        if let Some(level) = self.digital.get_mut(pin) {
            *level = match value {
                PinValue::Digital(v) => v,
                PinValue::Analog(v) => v > threshold,
            };
            Ok(())
        } else if let Some(magnitude) = self.analog.get_mut(pin) {
            *magnitude = match value {
                PinValue::Digital(true) => 255,
                PinValue::Digital(false) => 0,
                PinValue::Analog(v) => v,
            };
            Ok(())
        } else {
            Err(PinsimError::UnknownBoardPin { pin: pin.to_string() })
        }
    }

    /// Set the level of a digital pin.
    pub fn set_digital(&mut self, pin: &str, level: bool) -> Result<()> {
        let slot = self
            .digital
            .get_mut(pin)
            .ok_or_else(|| PinsimError::UnknownBoardPin { pin: pin.to_string() })?;
        *slot = level;
        Ok(())
    }

    /// Record a `pinMode` declaration.
    pub fn set_mode(&mut self, pin: &str, mode: PinMode) -> Result<()> {
        let key = self
            .profile
            .digital
            .iter()
            .chain(self.profile.analog.iter())
            .copied()
            .find(|p| *p == pin)
            .ok_or_else(|| PinsimError::UnknownBoardPin { pin: pin.to_string() })?;
        self.modes.insert(key, mode);
        Ok(())
    }

    /// Digital levels in profile order.
    pub fn digital_levels(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.profile
            .digital
            .iter()
            .map(move |p| (*p, self.digital.get(p).copied().unwrap_or(false)))
    }

    /// Analog magnitudes in profile order.
    pub fn analog_levels(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.profile
            .analog
            .iter()
            .map(move |p| (*p, self.analog.get(p).copied().unwrap_or(0)))
    }

    /// Reset all levels to LOW / 0 and forget declared modes.
    pub fn reset(&mut self) {
        *self = Self::new(self.profile);
    }
}

impl Default for BoardPins {
    fn default() -> Self {
        Self::new(BoardProfile::UNO)
    }
}
