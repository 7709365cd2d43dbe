//! WASM bindings for Pinsim Core.
//!
//! This module provides JavaScript-friendly bindings for a browser-hosted
//! design surface.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmPinSim } from 'pinsim_core';
//!
//! await init();
//!
//! const sim = new WasmPinSim(JSON.stringify(design));
//! sim.set_component_state('Button_1', 'pressed', 'true');
//! sim.execute_code(editor.value);
//!
//! const led = JSON.parse(sim.component_state('LED_1'));
//! canvas.paintLed('LED_1', led.on, led.brightness);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{DesignLayout, Value};
use crate::error::PinsimError;
use crate::simulator::{Simulator, SimulatorConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: PinsimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible circuit simulator.
///
/// This struct wraps the native `Simulator` and exchanges layouts and
/// component state as JSON strings.
#[wasm_bindgen]
pub struct WasmPinSim {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmPinSim {
    /// Create a simulator from a saved design layout.
    ///
    /// # Arguments
    /// * `layout_json` - The design in the persisted layout format
    #[wasm_bindgen(constructor)]
    pub fn new(layout_json: &str) -> Result<WasmPinSim, JsValue> {
        Self::with_threshold(layout_json, crate::DEFAULT_ANALOG_THRESHOLD)
    }

    /// Create a simulator with a custom `analogWrite` threshold.
    #[wasm_bindgen]
    pub fn with_threshold(layout_json: &str, analog_threshold: u32) -> Result<WasmPinSim, JsValue> {
        let layout = DesignLayout::from_json(layout_json).map_err(js_error)?;
        let config = SimulatorConfig::new().with_analog_threshold(analog_threshold);
        let mut simulator = Simulator::with_config(config);
        simulator.load_layout(&layout);
        Ok(WasmPinSim { simulator })
    }

    /// Run sketch source. Returns the number of statements that took effect.
    #[wasm_bindgen]
    pub fn execute_code(&mut self, source: &str) -> Result<usize, JsValue> {
        let report = self.simulator.try_execute_code(source).map_err(js_error)?;
        Ok(report.executed.len())
    }

    /// Set a state value on a component, then propagate.
    ///
    /// `value_json` is any JSON value, e.g. `true` or `255`.
    #[wasm_bindgen]
    pub fn set_component_state(&mut self, id: &str, key: &str, value_json: &str) -> Result<(), JsValue> {
        let value: Value = serde_json::from_str(value_json).map_err(|e| {
            js_error(PinsimError::WasmError {
                message: format!("invalid state value '{}': {}", value_json, e),
            })
        })?;
        let circuit = self.simulator.circuit_mut().ok_or_else(|| js_error(PinsimError::NotLoaded))?;
        circuit
            .component_mut(id)
            .ok_or_else(|| js_error(PinsimError::component_not_found(id)))?
            .set_state(key, value);
        self.simulator.propagate().map_err(js_error)?;
        Ok(())
    }

    /// Get a component's state as a JSON object.
    #[wasm_bindgen]
    pub fn component_state(&self, id: &str) -> Result<String, JsValue> {
        let circuit = self.simulator.circuit().ok_or_else(|| js_error(PinsimError::NotLoaded))?;
        let component = circuit.get(id).map_err(js_error)?;
        serde_json::to_string(&component.state).map_err(|e| js_error(PinsimError::from(e)))
    }

    /// Get the level of a board digital pin, or `undefined` for unknown pins.
    #[wasm_bindgen]
    pub fn digital_level(&self, pin: &str) -> Option<bool> {
        self.simulator.board().digital(pin)
    }

    /// Reset board levels and component states.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.simulator.reset();
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
