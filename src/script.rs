//! Call scripts
//!
//! Text form of a sequence of UI service calls, replayed against a
//! dispatcher the way a monitor's dispatch loop would issue them.
//!
//! ```text
//! # comment
//! SET_FG 14
//! 0x13 12
//! SET_BG #204060
//! GET_CURSOR_ROW
//! RETURN
//! ```

use std::io::Write;

use log::{debug, trace};

use crate::ui::opcode::parse_number;
use crate::ui::{encode_result, Reply, Serialization, UiDispatcher, UiError};
use crate::utils::parse_packed_rgb;

/// One call: raw opcode plus optional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    /// Script line (1-based)
    pub line: usize,
    pub opcode: u64,
    pub arg: Option<u64>,
}

/// Script parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown opcode name '{token}'")]
    UnknownName { line: usize, token: String },

    #[error("line {line}: invalid argument '{token}'")]
    BadArgument { line: usize, token: String },

    #[error("line {line}: unexpected trailing input '{token}'")]
    TrailingInput { line: usize, token: String },
}

/// Parse a script into calls.
///
/// Numeric opcodes are kept raw so that undefined values reach the
/// dispatcher and come back as UnknownOpcode.
pub fn parse(text: &str) -> Result<Vec<Call>, ScriptError> {
    let mut calls = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw_line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let mut tokens = content.split_whitespace();
        let Some(op_token) = tokens.next() else {
            continue;
        };
        let opcode = match parse_number(op_token) {
            Some(raw) => raw,
            None => op_token
                .parse::<crate::ui::Opcode>()
                .map(|op| op.code() as u64)
                .map_err(|_| ScriptError::UnknownName {
                    line,
                    token: op_token.to_string(),
                })?,
        };

        let arg = match tokens.next() {
            Some(token) => Some(parse_argument(token).ok_or_else(|| ScriptError::BadArgument {
                line,
                token: token.to_string(),
            })?),
            None => None,
        };

        if let Some(extra) = tokens.next() {
            return Err(ScriptError::TrailingInput {
                line,
                token: extra.to_string(),
            });
        }

        calls.push(Call { line, opcode, arg });
    }
    Ok(calls)
}

/// Argument literal: decimal, 0x hex, or #RRGGBB
fn parse_argument(token: &str) -> Option<u64> {
    if token.starts_with('#') {
        parse_packed_rgb(token).map(u64::from)
    } else {
        parse_number(token)
    }
}

/// Outcome of one executed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub call: Call,
    pub result: Result<Reply, UiError>,
}

impl Outcome {
    /// `status value` for getters, `status` otherwise
    pub fn render(&self) -> String {
        let (status, value) = encode_result(&self.result);
        match self.result {
            Ok(Reply::Value(_)) => format!("{} {}", status, value),
            _ => status.to_string(),
        }
    }
}

/// Dispatch calls in order, stopping after RETURN
pub fn run<S: Serialization>(dispatcher: &UiDispatcher<S>, calls: &[Call]) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(calls.len());
    for call in calls {
        let result = dispatcher.dispatch(call.opcode, call.arg);
        trace!("line {}: 0x{:02x} {:?} -> {:?}", call.line, call.opcode, call.arg, result);
        if let Err(e) = &result {
            debug!("line {}: {}", call.line, e);
        }
        outcomes.push(Outcome {
            call: *call,
            result,
        });
        if result == Ok(Reply::Return) {
            debug!("RETURN at line {}, leaving dispatch loop", call.line);
            break;
        }
    }
    outcomes
}

/// Write one rendered line per outcome
pub fn write_outcomes<W: Write>(out: &mut W, outcomes: &[Outcome]) -> std::io::Result<()> {
    for outcome in outcomes {
        writeln!(out, "{}", outcome.render())?;
    }
    Ok(())
}
