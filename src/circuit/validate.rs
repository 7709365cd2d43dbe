//! Circuit validation.

use std::fmt;

use super::Circuit;

/// A problem found in a loaded circuit.
///
/// None of these stop a simulation run; they explain why parts of the
/// circuit will not respond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// No controller board: code runs but nothing propagates
    MissingBoard,
    /// More than one board; only the first is driven
    ExtraBoard { id: String },
    /// A wire refers to a component or pin that no longer exists
    BrokenWire { index: usize, endpoint: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingBoard => write!(f, "circuit has no controller board"),
            Finding::ExtraBoard { id } => write!(f, "board '{}' is ignored, only the first board is simulated", id),
            Finding::BrokenWire { index, endpoint } => {
                write!(f, "wire {} refers to missing pin '{}'", index, endpoint)
            }
        }
    }
}

/// Validate a circuit for simulation.
///
/// Checks:
/// - Exactly one controller board is present
/// - Every wire endpoint resolves to an existing pin
pub fn validate_circuit(circuit: &Circuit) -> Vec<Finding> {
    let mut findings = Vec::new();

    let mut boards = circuit.components().iter().filter(|c| c.kind.is_board());
    if boards.next().is_none() {
        findings.push(Finding::MissingBoard);
    }
    for extra in boards {
        findings.push(Finding::ExtraBoard {
            id: extra.id.clone(),
        });
    }

    for (index, wire) in circuit.wires().iter().enumerate() {
        for endpoint in std::iter::once(&wire.start).chain(wire.end.as_ref()) {
            let resolved = circuit
                .component(&endpoint.component)
                .is_some_and(|c| c.has_pin(&endpoint.pin));
            if !resolved {
                findings.push(Finding::BrokenWire {
                    index,
                    endpoint: endpoint.to_string(),
                });
            }
        }
    }

    findings
}
