//! End-to-end scenarios: layouts in, sketches run, state read back.

use pinsim_core::circuit::{Circuit, DesignLayout, Endpoint, Value, Wire};
use pinsim_core::components::{Component, PinValue};
use pinsim_core::error::ErrorKind;
use pinsim_core::interpreter::SkipReason;
use pinsim_core::{PinsimError, Simulator};

fn uno() -> Component {
    Component::new("Arduino_Uno_1", "Arduino Uno")
}

fn load(parts: Vec<Component>, wires: &[(&str, &str, &str, &str)]) -> Simulator {
    let mut circuit = Circuit::new();
    for part in parts {
        circuit.add_component(part).unwrap();
    }
    for (sc, sp, ec, ep) in wires {
        circuit
            .connect(Endpoint::new(*sc, *sp), Endpoint::new(*ec, *ep))
            .unwrap();
    }
    let mut sim = Simulator::new();
    sim.load_circuit(circuit);
    sim
}

fn state<'a>(sim: &'a Simulator, id: &str, key: &str) -> Option<&'a Value> {
    sim.circuit().unwrap().get(id).unwrap().state_value(key)
}

#[test]
fn digital_write_sets_every_board_pin() {
    let mut sim = load(vec![uno()], &[]);
    for n in 0..14 {
        let pin = format!("D{}", n);
        sim.execute_code(&format!("digitalWrite({}, HIGH);", pin));
        assert_eq!(sim.board().digital(&pin), Some(true));
        sim.execute_code(&format!("digitalWrite({}, LOW);", pin));
        assert_eq!(sim.board().digital(&pin), Some(false));
    }
}

#[test]
fn unrecognized_pin_leaves_table_unchanged() {
    let mut sim = load(vec![uno()], &[]);
    sim.execute_code("digitalWrite(D3, HIGH);");
    let before: Vec<_> = sim.board().digital_levels().collect();
    let report = sim.execute_code("digitalWrite(LED_BUILTIN, LOW);\ndigitalWrite(D14, LOW);");
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(sim.board().digital_levels().collect::<Vec<_>>(), before);
}

#[test]
fn analog_write_matches_digital_write_around_threshold() {
    for (value, level) in [(0u32, "LOW"), (127, "LOW"), (128, "HIGH"), (255, "HIGH")] {
        let wires = [("Arduino_Uno_1", "D9", "LED_1", "Anode")];
        let mut analog = load(vec![uno(), Component::new("LED_1", "LED")], &wires);
        let mut digital = load(vec![uno(), Component::new("LED_1", "LED")], &wires);

        analog.execute_code(&format!("analogWrite(D9, {});", value));
        digital.execute_code(&format!("digitalWrite(D9, {});", level));

        assert_eq!(analog.board().digital("D9"), digital.board().digital("D9"));
        assert_eq!(state(&analog, "LED_1", "on"), state(&digital, "LED_1", "on"));
        assert_eq!(
            state(&analog, "LED_1", "brightness"),
            state(&digital, "LED_1", "brightness")
        );
    }
}

#[test]
fn led_follows_d13() {
    let mut sim = load(
        vec![uno(), Component::new("LED_1", "LED")],
        &[("Arduino_Uno_1", "D13", "LED_1", "Anode")],
    );
    sim.execute_code("digitalWrite(D13, HIGH);");
    assert_eq!(state(&sim, "LED_1", "on"), Some(&Value::Bool(true)));
    assert_eq!(state(&sim, "LED_1", "brightness"), Some(&Value::Int(255)));

    sim.execute_code("digitalWrite(D13, LOW);");
    assert_eq!(state(&sim, "LED_1", "on"), Some(&Value::Bool(false)));
    assert_eq!(state(&sim, "LED_1", "brightness"), Some(&Value::Int(0)));
}

#[test]
fn button_is_read_into_d2() {
    let mut sim = load(
        vec![uno(), Component::new("Button_1", "Button")],
        &[("Button_1", "Pin1", "Arduino_Uno_1", "D2")],
    );
    sim.execute_code("digitalWrite(D13, LOW);");
    assert_eq!(sim.board().digital("D2"), Some(false));

    sim.circuit_mut()
        .unwrap()
        .component_mut("Button_1")
        .unwrap()
        .set_state("pressed", true);
    sim.execute_code("digitalWrite(D13, LOW);");
    assert_eq!(sim.board().digital("D2"), Some(true));
}

#[test]
fn power_rail_mismatch_fails_validation() {
    let board = uno();
    let other = Component::new("Arduino_Nano_1", "Arduino Nano");
    let err = Wire::between(&board, "5V", &other, "3.3V").unwrap_err();
    assert!(err.is_validation());

    let led = Component::new("LED_1", "LED");
    let motor = Component::new("Motor_1", "DC Motor");
    let sensor = Component::new("Sensor_1", "Light Sensor");
    assert!(Wire::between(&board, "GND", &led, "Anode").is_ok());
    assert!(Wire::between(&board, "GND", &motor, "+").is_ok());
    assert!(Wire::between(&board, "GND", &sensor, "OUT").is_ok());
    assert!(Wire::between(&led, "Cathode", &sensor, "GND").is_ok());
}

#[test]
fn fresh_simulator_runs_nothing() {
    let mut sim = Simulator::new();
    let before = sim.board().clone();
    let report = sim.execute_code("digitalWrite(D13, HIGH)");
    assert_eq!(report.aborted.as_ref().map(PinsimError::kind), Some(ErrorKind::InvalidState));
    assert!(report.executed.is_empty());
    assert_eq!(sim.board(), &before);
}

#[test]
fn repeated_runs_are_identical() {
    let sketch = "\
void setup() {
  pinMode(D13, OUTPUT);
  pinMode(D2, INPUT);
}
void loop() {
  digitalWrite(D13, HIGH);
  analogWrite(D9, 90);
  digitalWrite(D12, HIGH);
}
";
    let mut sim = load(
        vec![
            uno(),
            Component::new("LED_1", "LED"),
            Component::new("LED_2", "LED"),
            Component::new("Button_1", "Button"),
        ],
        &[
            ("Arduino_Uno_1", "D13", "LED_1", "Anode"),
            ("Arduino_Uno_1", "D9", "LED_2", "Anode"),
            ("Button_1", "Pin1", "Arduino_Uno_1", "D2"),
        ],
    );
    sim.circuit_mut()
        .unwrap()
        .component_mut("Button_1")
        .unwrap()
        .set_state("pressed", true);

    sim.execute_code(sketch);
    let first_board = sim.board().clone();
    let first_parts: Vec<_> = sim.circuit().unwrap().components().to_vec();

    sim.execute_code(sketch);
    assert_eq!(sim.board(), &first_board);
    assert_eq!(sim.circuit().unwrap().components(), first_parts.as_slice());
    assert_eq!(state(&sim, "LED_2", "on"), Some(&Value::Bool(false)));
    assert_eq!(sim.board().digital("D2"), Some(true));
}

#[test]
fn chain_through_resistor_does_not_reach_led() {
    // Board -> resistor -> LED: only the first hop is simulated.
    let mut sim = load(
        vec![
            uno(),
            Component::new("Resistor_1", "Resistor"),
            Component::new("LED_1", "LED"),
        ],
        &[
            ("Arduino_Uno_1", "D13", "Resistor_1", "T1"),
            ("Resistor_1", "T2", "LED_1", "Anode"),
        ],
    );
    let report = sim.execute_code("digitalWrite(D13, HIGH);");
    let propagation = report.executed[0].propagation.as_ref().unwrap();
    assert_eq!(propagation.effects.len(), 1);
    assert!(!propagation.effects[0].applied);
    assert_eq!(state(&sim, "LED_1", "on"), None);
}

#[test]
fn saved_design_runs_from_json() {
    let json = r#"{
        "components": [
            {"type": "Arduino Uno", "id": "Arduino_Uno_1", "x": 0, "y": 0, "properties": {}},
            {"type": "LED", "id": "LED_1", "x": 200, "y": 0, "properties": {}},
            {"type": "Button", "id": "Button_1", "x": 200, "y": 100, "properties": {}},
            {"type": "Temperature Sensor", "id": "Temperature_Sensor_1", "x": 200, "y": 200, "properties": {}}
        ],
        "wires": [
            {"start_component": "Arduino_Uno_1", "start_pin": "D13", "end_component": "LED_1", "end_pin": "Anode"},
            {"start_component": "Button_1", "start_pin": "Pin1", "end_component": "Arduino_Uno_1", "end_pin": "D2"},
            {"start_component": "Arduino_Uno_1", "start_pin": "3.3V", "end_component": "Temperature_Sensor_1", "end_pin": "VCC"},
            {"start_component": "Temperature_Sensor_1", "start_pin": "GND", "end_component": "Arduino_Uno_1", "end_pin": "GND"}
        ]
    }"#;
    let layout = DesignLayout::from_json(json).unwrap();
    let mut sim = Simulator::new();
    let report = sim.load_layout(&layout);
    assert_eq!(report.rejected_wires.len(), 1);
    assert!(report.rejected_wires[0].error.is_validation());
    assert_eq!(sim.circuit().unwrap().wires().len(), 3);

    let run = sim.execute_code("digitalWrite(D13, HIGH);\nanalogWrite(D5, brightness);");
    assert_eq!(run.executed.len(), 1);
    assert_eq!(
        run.skipped[0].reason,
        SkipReason::Malformed {
            call: "analogWrite".into()
        }
    );
    assert_eq!(state(&sim, "LED_1", "on"), Some(&Value::Bool(true)));
}

#[test]
fn deleted_part_is_skipped_not_fatal() {
    let mut sim = load(
        vec![
            uno(),
            Component::new("LED_1", "LED"),
            Component::new("LED_2", "LED"),
        ],
        &[
            ("Arduino_Uno_1", "D13", "LED_1", "Anode"),
            ("Arduino_Uno_1", "D13", "LED_2", "Anode"),
        ],
    );
    sim.circuit_mut().unwrap().remove_component("LED_1").unwrap();

    let report = sim.set_pin("D13", PinValue::Digital(true)).unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].error.kind(), ErrorKind::NotFound);
    assert_eq!(state(&sim, "LED_2", "on"), Some(&Value::Bool(true)));
}

#[test]
fn sensor_to_led_without_board_changes_nothing() {
    let mut sim = load(
        vec![
            uno(),
            Component::new("Light_Sensor_1", "Light Sensor"),
            Component::new("LED_1", "LED"),
        ],
        &[("Light_Sensor_1", "OUT", "LED_1", "Anode")],
    );
    sim.execute_code("digitalWrite(D13, HIGH);\nanalogWrite(D9, 255);");
    assert!(sim.circuit().unwrap().get("LED_1").unwrap().state.is_empty());
}

#[test]
fn non_high_level_turns_led_off() {
    let mut sim = load(
        vec![uno(), Component::new("LED_1", "LED")],
        &[("Arduino_Uno_1", "D13", "LED_1", "Anode")],
    );
    sim.execute_code("digitalWrite(D13, HIGH);\ndigitalWrite(D13, 0);");
    assert_eq!(sim.board().digital("D13"), Some(false));
    assert_eq!(state(&sim, "LED_1", "on"), Some(&Value::Bool(false)));
}

#[test]
fn digital_write_claims_a_mixed_line() {
    let mut sim = load(vec![uno()], &[]);
    let report = sim.execute_code("digitalWrite(D13); analogWrite(D13, 255);");
    assert!(report.executed.is_empty());
    assert_eq!(sim.board().digital("D13"), Some(false));

    sim.execute_code("analogWrite(D3, 255); digitalWrite(D12, HIGH);");
    assert_eq!(sim.board().digital("D3"), Some(false));
    assert_eq!(sim.board().digital("D12"), Some(true));
}
