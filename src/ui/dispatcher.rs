//! UI service dispatcher
//!
//! Single entry point for the terminal-state call interface.
//! Every call is a complete unit of work: decode, validate, then one
//! read or write of the state block. Nothing on this path allocates,
//! logs or panics; bad calls come back as [`UiError`].

use crate::terminal::{Field, TerminalState};
use crate::ui::{OpKind, Opcode, Serialization, SingleContext, SpinLocked, Status, UiError};

/// Successful dispatch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// RETURN: the caller should leave its dispatch loop
    Return,
    /// Getter result
    Value(u64),
    /// Setter applied
    Done,
}

impl Reply {
    /// (status, value) register pair
    pub const fn encode(&self) -> (u64, u64) {
        match self {
            Reply::Value(v) => (Status::Ok as u64, *v),
            Reply::Return | Reply::Done => (Status::Ok as u64, 0),
        }
    }

    pub const fn value(&self) -> Option<u64> {
        match self {
            Reply::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Encode a dispatch result for register return
pub const fn encode_result(result: &Result<Reply, UiError>) -> (u64, u64) {
    match result {
        Ok(reply) => reply.encode(),
        Err(err) => err.encode(),
    }
}

/// Dispatcher over a terminal state owned by serialization discipline `S`
#[derive(Debug)]
pub struct UiDispatcher<S: Serialization = SingleContext> {
    guard: S,
}

/// Dispatcher shareable between execution contexts
pub type SharedDispatcher = UiDispatcher<SpinLocked>;

impl<S: Serialization> UiDispatcher<S> {
    /// Take ownership of the initial state. The cursor is clamped into the
    /// extent so the invariant holds from the first call.
    pub fn new(mut state: TerminalState) -> Self {
        state.cursor_row = state.cursor_row.min(state.cursor_row_max);
        state.cursor_col = state.cursor_col.min(state.cursor_col_max);
        Self {
            guard: S::new(state),
        }
    }

    /// Decode and execute one call
    pub fn dispatch(&self, opcode: u64, arg: Option<u64>) -> Result<Reply, UiError> {
        let op = Opcode::decode(opcode).ok_or(UiError::UnknownOpcode { opcode })?;
        self.execute(op, arg)
    }

    /// Execute an already-decoded opcode
    pub fn execute(&self, op: Opcode, arg: Option<u64>) -> Result<Reply, UiError> {
        match (op.kind(), op.field()) {
            (OpKind::Getter, Some(field)) => {
                Ok(Reply::Value(self.guard.with(|s| s.get(field)) as u64))
            }
            (OpKind::Setter, Some(field)) => {
                let value = arg.ok_or(UiError::InvalidArgument { opcode: op, value: None })?;
                self.guard.with(|s| set_field(s, op, field, value))?;
                Ok(Reply::Done)
            }
            (OpKind::Control, _) => Ok(Reply::Return),
            // Getters and setters always decode with a field
            (OpKind::Getter | OpKind::Setter, None) => Err(UiError::UnknownOpcode {
                opcode: op.code() as u64,
            }),
        }
    }

    /// Read one field
    pub fn get(&self, field: Field) -> u32 {
        self.guard.with(|s| s.get(field))
    }

    /// Copy of the whole state block, taken under the discipline
    pub fn snapshot(&self) -> TerminalState {
        self.guard.with(|s| *s)
    }
}

impl<S: Serialization> Default for UiDispatcher<S> {
    fn default() -> Self {
        Self::new(TerminalState::default())
    }
}

/// Validate and assign. On error the state is untouched.
fn set_field(state: &mut TerminalState, op: Opcode, field: Field, value: u64) -> Result<(), UiError> {
    let invalid = UiError::InvalidArgument {
        opcode: op,
        value: Some(value),
    };

    match field {
        Field::Fg | Field::Bg => {
            if !state.mode.is_valid_color(value) {
                return Err(invalid);
            }
            // Range check above bounds the value by the 24-bit RGB maximum
            let color = value as u32;
            if field == Field::Fg {
                state.fg_color = color;
            } else {
                state.bg_color = color;
            }
        }
        Field::CursorRow => {
            if value > state.cursor_row_max as u64 {
                return Err(invalid);
            }
            state.cursor_row = value as u32;
        }
        Field::CursorCol => {
            if value > state.cursor_col_max as u64 {
                return Err(invalid);
            }
            state.cursor_col = value as u32;
        }
        Field::CursorRowMax => {
            let max = u32::try_from(value).map_err(|_| invalid)?;
            state.cursor_row_max = max;
            state.cursor_row = state.cursor_row.min(max);
        }
        Field::CursorColMax => {
            let max = u32::try_from(value).map_err(|_| invalid)?;
            state.cursor_col_max = max;
            state.cursor_col = state.cursor_col.min(max);
        }
    }
    Ok(())
}
