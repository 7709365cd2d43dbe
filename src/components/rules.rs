//! Affect and read rules referenced by the catalog descriptors.

use super::StateMap;
use crate::circuit::Value;

/// State key: LED lit.
pub const STATE_ON: &str = "on";
/// State key: LED brightness, 0-255.
pub const STATE_BRIGHTNESS: &str = "brightness";
/// State key: button held down.
pub const STATE_PRESSED: &str = "pressed";

/// Ignores incoming signals.
pub fn inert(_state: &mut StateMap, _pin: &str, _level: bool) -> bool {
    false
}

/// Offers LOW on every pin.
pub fn read_low(_state: &StateMap, _pin: &str) -> bool {
    false
}

/// LED driven through its anode: HIGH lights it at full brightness.
pub fn led_affect(state: &mut StateMap, pin: &str, level: bool) -> bool {
    if pin != "Anode" {
        return false;
    }
    state.insert(STATE_ON.to_string(), Value::Bool(level));
    state.insert(
        STATE_BRIGHTNESS.to_string(),
        Value::Int(if level { 255 } else { 0 }),
    );
    true
}

/// Button offers its `pressed` flag on either pin, LOW when unset.
pub fn button_read(state: &StateMap, _pin: &str) -> bool {
    state
        .get(STATE_PRESSED)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
