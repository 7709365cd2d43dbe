//! Error types for the Pinsim circuit simulator.
//!
//! This module provides a unified error type [`PinsimError`] that covers
//! wiring validation, lookups during propagation, simulator state and
//! layout I/O. [`PinsimError::kind`] groups the variants into the coarse
//! categories callers usually branch on.

use thiserror::Error;

/// Result type alias using [`PinsimError`].
pub type Result<T> = std::result::Result<T, PinsimError>;

/// Coarse classification of a [`PinsimError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed wire or circuit content, rejected at construction time.
    Validation,
    /// A component, pin or board pin name did not resolve.
    NotFound,
    /// The simulator was used before a circuit was loaded.
    InvalidState,
    /// Reading or decoding a layout failed.
    Io,
}

/// Unified error type for all Pinsim operations.
#[derive(Error, Debug)]
pub enum PinsimError {
    // ============ Lookup Errors ============
    /// Pin name does not exist on the component
    #[error("Component '{component}' has no pin named '{pin}'")]
    UnknownPin { component: String, pin: String },

    /// Component id is not part of the circuit
    #[error("Component '{id}' not found in circuit")]
    ComponentNotFound { id: String },

    /// Pin name is not part of the board profile
    #[error("Board has no pin named '{pin}'")]
    UnknownBoardPin { pin: String },

    // ============ Wiring Errors ============
    /// Two power pins with different rails
    #[error("Cannot connect power pin '{start}' to power pin '{end}'")]
    IncompatiblePins { start: String, end: String },

    /// Wire is still being drawn
    #[error("Wire starting at '{component}.{pin}' has no end point")]
    IncompleteWire { component: String, pin: String },

    /// Duplicate component id
    #[error("Duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    // ============ Simulator Errors ============
    /// Code executed before a circuit was loaded
    #[error("No circuit loaded")]
    NotLoaded,

    // ============ I/O Errors ============
    /// Error reading a layout or sketch file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Layout JSON could not be decoded or encoded
    #[error("Invalid layout: {source}")]
    LayoutFormat {
        #[from]
        source: serde_json::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl PinsimError {
    /// Create an unknown pin error
    pub fn unknown_pin(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self::UnknownPin {
            component: component.into(),
            pin: pin.into(),
        }
    }

    /// Create a component not found error
    pub fn component_not_found(id: impl Into<String>) -> Self {
        Self::ComponentNotFound { id: id.into() }
    }

    /// Create an incompatible pins error
    pub fn incompatible(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::IncompatiblePins {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Classify this error.
    ///
    /// Lookup misses are reported as [`ErrorKind::NotFound`]; when they are
    /// raised while building a wire the caller treats them as validation
    /// failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownPin { .. } | Self::ComponentNotFound { .. } | Self::UnknownBoardPin { .. } => {
                ErrorKind::NotFound
            }
            Self::IncompatiblePins { .. }
            | Self::IncompleteWire { .. }
            | Self::DuplicateComponent { .. } => ErrorKind::Validation,
            Self::NotLoaded => ErrorKind::InvalidState,
            Self::FileReadError { .. } | Self::LayoutFormat { .. } => ErrorKind::Io,
            #[cfg(feature = "wasm")]
            Self::WasmError { .. } => ErrorKind::Io,
        }
    }

    /// Whether this error rejects a wire at construction time.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownPin { .. }
                | Self::ComponentNotFound { .. }
                | Self::IncompatiblePins { .. }
                | Self::IncompleteWire { .. }
                | Self::DuplicateComponent { .. }
        )
    }
}
