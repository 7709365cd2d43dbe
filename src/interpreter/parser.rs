//! Line scanner that extracts pin-write statements.

use std::fmt;

use super::lexer::{Lexer, Token, TokenKind};
use crate::components::PinMode;

/// A recognized statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `pinMode(<pin>, INPUT|OUTPUT|INPUT_PULLUP)`
    PinMode { pin: String, mode: PinMode },
    /// `digitalWrite(<pin>, <level>)`; only `HIGH` drives the pin high
    DigitalWrite { pin: String, level: bool },
    /// `analogWrite(<pin>, <integer>)`
    AnalogWrite { pin: String, value: u64 },
}

impl Statement {
    /// The pin the statement targets.
    pub fn pin(&self) -> &str {
        match self {
            Statement::PinMode { pin, .. }
            | Statement::DigitalWrite { pin, .. }
            | Statement::AnalogWrite { pin, .. } => pin,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::PinMode { pin, mode } => write!(f, "pinMode({}, {:?})", pin, mode),
            Statement::DigitalWrite { pin, level } => {
                write!(f, "digitalWrite({}, {})", pin, if *level { "HIGH" } else { "LOW" })
            }
            Statement::AnalogWrite { pin, value } => write!(f, "analogWrite({}, {})", pin, value),
        }
    }
}

/// Why a line that mentions a pin call produced no statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The call's arguments do not have the expected shape
    Malformed { call: String },
    /// `pinMode` mode other than INPUT, OUTPUT or INPUT_PULLUP
    InvalidMode { value: String },
    /// Pin name outside the board profile
    UnknownPin { pin: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed { call } => write!(f, "malformed {} call", call),
            SkipReason::InvalidMode { value } => write!(f, "'{}' is not a pin mode", value),
            SkipReason::UnknownPin { pin } => write!(f, "unknown pin '{}'", pin),
        }
    }
}

/// Result of scanning one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Statement(Statement),
    Skipped(SkipReason),
}

/// A source line that contained a pin call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Line number (1-indexed)
    pub line: usize,
    pub outcome: LineOutcome,
}

/// Call names in the order a line is tried against them.
const CALLS: &[&str] = &["digitalWrite", "analogWrite", "pinMode"];

/// Scan source text line by line.
///
/// Lines without a pin call produce nothing. Program structure (functions,
/// loops, conditionals) is not interpreted: every call is taken in source
/// order exactly once.
pub fn scan(source: &str) -> Vec<ScannedLine> {
    let mut lexer = Lexer::new(source);
    let mut scanned = Vec::new();
    let mut line_tokens: Vec<Token> = Vec::new();
    let mut line = 1;

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Newline | TokenKind::Eof => {
                if let Some(outcome) = scan_line(&line_tokens) {
                    scanned.push(ScannedLine { line, outcome });
                }
                if token.kind == TokenKind::Eof {
                    break;
                }
                line_tokens.clear();
                line = token.line + 1;
            }
            _ => line_tokens.push(token),
        }
    }

    scanned
}

/// Scan one line for a pin call.
///
/// The line is claimed by the first name in [`CALLS`] it mentions; calls of
/// other names on the same line are never tried. The first well-formed call
/// of that name wins, otherwise its first failure is reported.
fn scan_line(tokens: &[Token]) -> Option<LineOutcome> {
    let call = CALLS.iter().copied().find(|name| {
        tokens
            .iter()
            .any(|t| t.kind == TokenKind::Word && t.text == *name)
    })?;

    let mut first_failure = None;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Word || token.text != call {
            continue;
        }
        match parse_call(call, &tokens[i + 1..]) {
            Ok(statement) => return Some(LineOutcome::Statement(statement)),
            Err(reason) => {
                first_failure.get_or_insert(reason);
            }
        }
    }

    first_failure.map(LineOutcome::Skipped)
}

/// Parse `( <arg> , <arg> )` following a call name.
fn parse_call(call: &str, rest: &[Token]) -> Result<Statement, SkipReason> {
    let malformed = || SkipReason::Malformed {
        call: call.to_string(),
    };

    let [open, pin, comma, arg, close, ..] = rest else {
        return Err(malformed());
    };
    let is_word = |t: &Token| matches!(t.kind, TokenKind::Word | TokenKind::Integer);
    if open.kind != TokenKind::OpenParen
        || !is_word(pin)
        || comma.kind != TokenKind::Comma
        || close.kind != TokenKind::CloseParen
    {
        return Err(malformed());
    }

    let pin = pin.text.clone();
    match call {
        "digitalWrite" if is_word(arg) => Ok(Statement::DigitalWrite {
            pin,
            level: arg.text == "HIGH",
        }),
        // Digit strings too long for u64 are far above any threshold
        "analogWrite" if arg.kind == TokenKind::Integer => Ok(Statement::AnalogWrite {
            pin,
            value: arg.text.parse().unwrap_or(u64::MAX),
        }),
        "pinMode" if is_word(arg) => PinMode::from_keyword(&arg.text)
            .map(|mode| Statement::PinMode { pin, mode })
            .ok_or_else(|| SkipReason::InvalidMode {
                value: arg.text.clone(),
            }),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(source: &str) -> Vec<Statement> {
        scan(source)
            .into_iter()
            .filter_map(|l| match l.outcome {
                LineOutcome::Statement(s) => Some(s),
                LineOutcome::Skipped(_) => None,
            })
            .collect()
    }

    fn only(source: &str) -> LineOutcome {
        let mut lines = scan(source);
        assert_eq!(lines.len(), 1, "{:?}", lines);
        lines.remove(0).outcome
    }

    #[test]
    fn test_parse_digital_write() {
        assert_eq!(
            only("  digitalWrite( D13 ,HIGH );"),
            LineOutcome::Statement(Statement::DigitalWrite {
                pin: "D13".into(),
                level: true
            })
        );
        assert_eq!(
            only("digitalWrite(D2, LOW)"),
            LineOutcome::Statement(Statement::DigitalWrite {
                pin: "D2".into(),
                level: false
            })
        );
    }

    #[test]
    fn test_parse_analog_write() {
        assert_eq!(
            only("analogWrite(D9, 200);"),
            LineOutcome::Statement(Statement::AnalogWrite {
                pin: "D9".into(),
                value: 200
            })
        );
        assert_eq!(
            only("analogWrite(D9, 99999999999999999999999);"),
            LineOutcome::Statement(Statement::AnalogWrite {
                pin: "D9".into(),
                value: u64::MAX
            })
        );
    }

    #[test]
    fn test_parse_pin_mode() {
        assert_eq!(
            only("pinMode(D13, OUTPUT);"),
            LineOutcome::Statement(Statement::PinMode {
                pin: "D13".into(),
                mode: PinMode::Output
            })
        );
        assert_eq!(
            only("pinMode(D13, SIDEWAYS);"),
            LineOutcome::Skipped(SkipReason::InvalidMode {
                value: "SIDEWAYS".into()
            })
        );
    }

    #[test]
    fn test_first_call_on_a_line_wins() {
        let s = statements("digitalWrite(D13, HIGH); digitalWrite(D12, HIGH);");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].pin(), "D13");
    }

    #[test]
    fn test_malformed_calls_are_skipped() {
        assert_eq!(
            only("analogWrite(D9, brightness);"),
            LineOutcome::Skipped(SkipReason::Malformed {
                call: "analogWrite".into()
            })
        );
        assert_eq!(
            only("analogWrite(D9, -5);"),
            LineOutcome::Skipped(SkipReason::Malformed {
                call: "analogWrite".into()
            })
        );
        assert_eq!(
            only("digitalWrite(D13);"),
            LineOutcome::Skipped(SkipReason::Malformed {
                call: "digitalWrite".into()
            })
        );
    }

    #[test]
    fn test_any_level_but_high_is_low() {
        for level in ["1", "0", "LOW", "high", "ledState"] {
            assert_eq!(
                only(&format!("digitalWrite(D13, {});", level)),
                LineOutcome::Statement(Statement::DigitalWrite {
                    pin: "D13".into(),
                    level: false
                }),
                "{}",
                level
            );
        }
    }

    #[test]
    fn test_digital_write_claims_the_line() {
        assert_eq!(
            only("digitalWrite(D13); analogWrite(D13, 255);"),
            LineOutcome::Skipped(SkipReason::Malformed {
                call: "digitalWrite".into()
            })
        );
        assert_eq!(
            statements("analogWrite(D3, 255); digitalWrite(D13, HIGH);"),
            vec![Statement::DigitalWrite {
                pin: "D13".into(),
                level: true
            }]
        );
        assert_eq!(
            statements("pinMode(D13, OUTPUT); analogWrite(D9, 10);"),
            vec![Statement::AnalogWrite {
                pin: "D9".into(),
                value: 10
            }]
        );
    }

    #[test]
    fn test_first_well_formed_call_of_the_name_wins() {
        assert_eq!(
            statements("digitalWrite(D13); digitalWrite(D12, HIGH);"),
            vec![Statement::DigitalWrite {
                pin: "D12".into(),
                level: true
            }]
        );
    }

    #[test]
    fn test_structure_is_not_interpreted() {
        let sketch = "\
void setup() {
  pinMode(D13, OUTPUT);
}

void loop() {
  for (int i = 0; i < 3; i++) {
    digitalWrite(D13, HIGH);
  }
  delay(1000);
  // digitalWrite(D13, LOW);
}
";
        let lines = scan(sketch);
        let numbers: Vec<usize> = lines.iter().map(|l| l.line).collect();
        assert_eq!(numbers, vec![2, 7, 10]);
        assert_eq!(statements(sketch).len(), 3);
    }

    #[test]
    fn test_lines_without_calls_are_ignored() {
        assert!(scan("int led = 13;\ndelay(500);\nSerial.println(\"digital\");").is_empty());
        assert!(scan("").is_empty());
    }
}
