//! Main simulator interface.

use tracing::{debug, info, warn};

use super::propagate::{propagate, PropagationReport};
use crate::circuit::{
    validate_circuit, Circuit, DesignLayout, Finding, LoadReport, SimulatableComponent, WireLike,
};
use crate::components::{BoardPins, BoardProfile, PinValue};
use crate::error::{PinsimError, Result};
use crate::interpreter::{scan, LineOutcome, RunState, ScannedLine, SkipReason, Statement};
use crate::DEFAULT_ANALOG_THRESHOLD;

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// `analogWrite` values above this drive a digital pin HIGH.
    pub analog_threshold: u32,
    /// Board pinout to use instead of the loaded board's own profile.
    pub board: Option<BoardProfile>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            analog_threshold: DEFAULT_ANALOG_THRESHOLD,
            board: None,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `analogWrite` HIGH threshold.
    pub fn with_analog_threshold(mut self, threshold: u32) -> Self {
        self.analog_threshold = threshold;
        self
    }

    /// Force a board pinout regardless of the loaded board.
    pub fn with_board(mut self, profile: BoardProfile) -> Self {
        self.board = Some(profile);
        self
    }
}

/// A statement that reached the board.
#[derive(Debug)]
pub struct ExecutedStatement {
    /// Line number (1-indexed)
    pub line: usize,
    pub statement: Statement,
    /// Propagation triggered by the write, `None` for `pinMode`
    pub propagation: Option<PropagationReport>,
}

/// A line that named a pin call but had no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of one `execute_code` call.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    /// Set when the run could not start
    pub aborted: Option<PinsimError>,
    pub executed: Vec<ExecutedStatement>,
    pub skipped: Vec<SkippedLine>,
}

impl ExecutionReport {
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}

/// The circuit simulator.
///
/// Holds one loaded circuit and the board's pin-state table. Calls are
/// synchronous and run to completion; hosts that share a simulator between
/// threads must serialize access themselves.
#[derive(Debug, Default)]
pub struct Simulator {
    /// The loaded circuit
    circuit: Option<Circuit>,
    /// The board's own pin levels
    pins: BoardPins,
    config: SimulatorConfig,
    state: RunState,
}

impl Simulator {
    /// Create a new simulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a new simulator with custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let pins = BoardPins::new(config.board.unwrap_or(BoardProfile::UNO));
        Self {
            circuit: None,
            pins,
            config,
            state: RunState::Idle,
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Load a circuit, replacing any previous one.
    ///
    /// The board table is rebuilt for the circuit's board. Returned findings
    /// describe parts of the circuit that will not respond.
    pub fn load_circuit(&mut self, circuit: Circuit) -> Vec<Finding> {
        let profile = self
            .config
            .board
            .or_else(|| circuit.board().and_then(|b| b.board_profile()).copied())
            .unwrap_or(BoardProfile::UNO);
        self.pins = BoardPins::new(profile);

        let findings = validate_circuit(&circuit);
        for finding in &findings {
            warn!(%finding, "circuit loaded with problems");
        }
        info!(
            components = circuit.components().len(),
            wires = circuit.wires().len(),
            board = profile.name,
            "circuit loaded"
        );
        self.circuit = Some(circuit);
        findings
    }

    /// Assemble host objects into a circuit and load it.
    pub fn load<C, W>(
        &mut self,
        components: impl IntoIterator<Item = C>,
        wires: impl IntoIterator<Item = W>,
    ) -> LoadReport
    where
        C: SimulatableComponent,
        W: WireLike,
    {
        let (circuit, report) = Circuit::assemble(components, wires);
        self.load_circuit(circuit);
        report
    }

    /// Load a persisted layout.
    pub fn load_layout(&mut self, layout: &DesignLayout) -> LoadReport {
        let (circuit, report) = Circuit::from_layout(layout);
        self.load_circuit(circuit);
        report
    }

    /// Drop the loaded circuit and hand it back.
    pub fn unload(&mut self) -> Option<Circuit> {
        self.circuit.take()
    }

    pub fn is_loaded(&self) -> bool {
        self.circuit.is_some()
    }

    /// The loaded circuit; component state is read from here after a run.
    pub fn circuit(&self) -> Option<&Circuit> {
        self.circuit.as_ref()
    }

    /// The loaded circuit for host-side edits such as pressing a button.
    pub fn circuit_mut(&mut self) -> Option<&mut Circuit> {
        self.circuit.as_mut()
    }

    /// The board's pin-state table.
    pub fn board(&self) -> &BoardPins {
        &self.pins
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Write a board pin directly, then propagate.
    pub fn set_pin(&mut self, pin: &str, value: PinValue) -> Result<PropagationReport> {
        let circuit = self.circuit.as_mut().ok_or(PinsimError::NotLoaded)?;
        self.pins.write(pin, value, self.config.analog_threshold)?;
        Ok(propagate(circuit, &mut self.pins))
    }

    /// Run one propagation pass without changing any pin.
    pub fn propagate(&mut self) -> Result<PropagationReport> {
        let circuit = self.circuit.as_mut().ok_or(PinsimError::NotLoaded)?;
        Ok(propagate(circuit, &mut self.pins))
    }

    /// Scan and run sketch source against the loaded circuit.
    ///
    /// Never fails: without a circuit nothing changes and the report's
    /// `aborted` field carries [`PinsimError::NotLoaded`].
    pub fn execute_code(&mut self, source: &str) -> ExecutionReport {
        let Some(circuit) = self.circuit.as_mut() else {
            warn!("execute_code called with no circuit loaded");
            return ExecutionReport {
                aborted: Some(PinsimError::NotLoaded),
                ..Default::default()
            };
        };

        self.state = RunState::Running;
        let lines = scan(source);
        debug!(calls = lines.len(), "sketch scanned");
        let report = run(circuit, &mut self.pins, &self.config, lines);
        self.state = RunState::Idle;

        info!(
            executed = report.executed.len(),
            skipped = report.skipped.len(),
            "sketch finished"
        );
        report
    }

    /// Like [`execute_code`](Self::execute_code), but a missing circuit is
    /// an error.
    pub fn try_execute_code(&mut self, source: &str) -> Result<ExecutionReport> {
        if self.circuit.is_none() {
            return Err(PinsimError::NotLoaded);
        }
        Ok(self.execute_code(source))
    }

    /// Reset board levels and every component's simulation state.
    pub fn reset(&mut self) {
        self.pins.reset();
        if let Some(circuit) = self.circuit.as_mut() {
            circuit.reset_state();
        }
    }
}

fn run(
    circuit: &mut Circuit,
    pins: &mut BoardPins,
    config: &SimulatorConfig,
    lines: Vec<ScannedLine>,
) -> ExecutionReport {
    let mut report = ExecutionReport::default();

    for ScannedLine { line, outcome } in lines {
        let statement = match outcome {
            LineOutcome::Statement(statement) => statement,
            LineOutcome::Skipped(reason) => {
                debug!(line, %reason, "line skipped");
                report.skipped.push(SkippedLine { line, reason });
                continue;
            }
        };

        let applied = match &statement {
            Statement::PinMode { pin, mode } => pins.set_mode(pin, *mode).map(|_| false),
            Statement::DigitalWrite { pin, level } => write_digital(pins, pin, *level),
            Statement::AnalogWrite { pin, value } => {
                write_digital(pins, pin, *value > u64::from(config.analog_threshold))
            }
        };

        match applied {
            Ok(propagates) => {
                let propagation = propagates.then(|| propagate(circuit, pins));
                report.executed.push(ExecutedStatement {
                    line,
                    statement,
                    propagation,
                });
            }
            Err(_) => {
                let reason = SkipReason::UnknownPin {
                    pin: statement.pin().to_string(),
                };
                debug!(line, %reason, "line skipped");
                report.skipped.push(SkippedLine { line, reason });
            }
        }
    }

    report
}

/// Pin writes from sketches only reach the board's digital pins.
fn write_digital(pins: &mut BoardPins, pin: &str, level: bool) -> Result<bool> {
    pins.set_digital(pin, level).map(|_| true)
}
