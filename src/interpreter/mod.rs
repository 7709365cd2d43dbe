//! Sketch interpreter.
//!
//! This is not a C++ interpreter. Source text is scanned line by line for a
//! fixed vocabulary of pin calls; everything else is ignored.
//!
//! # Recognized calls
//!
//! | Call | Effect |
//! |------|--------|
//! | `pinMode(<pin>, INPUT\|OUTPUT\|INPUT_PULLUP)` | Records the pin's mode |
//! | `digitalWrite(<pin>, <level>)` | Sets a board digital pin (HIGH for `HIGH`, LOW for anything else), then propagates |
//! | `analogWrite(<pin>, <integer>)` | Sets a board digital pin HIGH above the threshold, LOW otherwise, then propagates |
//!
//! At most one call is taken per line. A line mentioning `digitalWrite` is
//! only tried as `digitalWrite`, then `analogWrite`, then `pinMode`; the first
//! well-formed call of that name wins. Unknown pins and malformed arguments
//! are skipped, never raised.
//!
//! # Example
//!
//! ```text
//! void setup() {
//!   pinMode(D13, OUTPUT);
//! }
//!
//! void loop() {
//!   digitalWrite(D13, HIGH);
//!   analogWrite(D9, 200);
//! }
//! ```

mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{scan, LineOutcome, ScannedLine, SkipReason, Statement};

/// Execution state of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}
