//! Single-pass signal propagation between the board and its neighbours.

use tracing::{debug, warn};

use crate::circuit::{Circuit, Endpoint};
use crate::components::BoardPins;
use crate::error::{PinsimError, Result};

/// A board level pushed into a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    /// Index of the wire that carried the level
    pub wire: usize,
    pub component: String,
    pub pin: String,
    pub level: bool,
    /// Whether the component's affect rule reacted
    pub applied: bool,
}

/// A component level read into the board's pin table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRead {
    pub wire: usize,
    pub board_pin: String,
    pub component: String,
    pub level: bool,
}

/// A wire left out of a pass.
#[derive(Debug)]
pub struct SkippedWire {
    pub wire: usize,
    pub error: PinsimError,
}

/// Everything one propagation pass did.
#[derive(Debug, Default)]
pub struct PropagationReport {
    /// Board of record, `None` when the circuit has none
    pub board: Option<String>,
    pub effects: Vec<Effect>,
    pub reads: Vec<BoardRead>,
    pub skipped: Vec<SkippedWire>,
}

/// Run one propagation pass over every wire, in insertion order.
///
/// Wires with the board at the start drive the other end from the board's
/// digital levels. Wires with the board at the end read the other end into
/// the board's digital levels. Wires between two non-board components are
/// not followed, and the pass is never repeated to a fixed point.
pub fn propagate(circuit: &mut Circuit, pins: &mut BoardPins) -> PropagationReport {
    let mut report = PropagationReport::default();

    let Some(board_idx) = circuit.board_index() else {
        debug!("no board in circuit, nothing to propagate");
        return report;
    };
    report.board = Some(circuit.component_at(board_idx).id.clone());

    for index in 0..circuit.wires().len() {
        let wire = &circuit.wires()[index];
        let Some(end) = wire.end.clone() else {
            continue;
        };
        let start = wire.start.clone();

        let (start_idx, end_idx) = match (resolve(circuit, &start), resolve(circuit, &end)) {
            (Ok(s), Ok(e)) => (s, e),
            (Err(error), _) | (_, Err(error)) => {
                warn!(wire = index, error = %error, "skipping broken wire");
                report.skipped.push(SkippedWire { wire: index, error });
                continue;
            }
        };

        if start_idx == board_idx {
            let Some(level) = pins.digital(&start.pin) else {
                continue;
            };
            let target = circuit.component_at_mut(end_idx);
            let applied = target.affect(&end.pin, level);
            report.effects.push(Effect {
                wire: index,
                component: target.id.clone(),
                pin: end.pin,
                level,
                applied,
            });
        } else if end_idx == board_idx {
            let source = circuit.component_at(start_idx);
            let level = source.read(&start.pin);
            if pins.set_digital(&end.pin, level).is_ok() {
                report.reads.push(BoardRead {
                    wire: index,
                    board_pin: end.pin,
                    component: source.id.clone(),
                    level,
                });
            }
        }
    }

    report
}

/// Resolve an endpoint to a component index, checking the pin exists.
fn resolve(circuit: &Circuit, endpoint: &Endpoint) -> Result<usize> {
    let idx = circuit
        .index_of(&endpoint.component)
        .ok_or_else(|| PinsimError::component_not_found(&endpoint.component))?;
    circuit.component_at(idx).pin_by_name(&endpoint.pin)?;
    Ok(idx)
}
