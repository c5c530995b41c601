//! Dispatch errors and wire status codes

use crate::constants::{STATUS_INVALID_ARGUMENT, STATUS_OK, STATUS_UNKNOWN_OPCODE};
use crate::ui::Opcode;

/// Numeric status handed back through the calling convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Status {
    Ok = STATUS_OK,
    UnknownOpcode = STATUS_UNKNOWN_OPCODE,
    InvalidArgument = STATUS_INVALID_ARGUMENT,
}

/// Errors a dispatch call can report. State is unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("unknown opcode 0x{opcode:02x}")]
    UnknownOpcode { opcode: u64 },

    #[error("invalid argument for {opcode}: {}", fmt_value(.value))]
    InvalidArgument { opcode: Opcode, value: Option<u64> },
}

fn fmt_value(value: &Option<u64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "missing".to_string(),
    }
}

impl UiError {
    pub const fn status(&self) -> Status {
        match self {
            UiError::UnknownOpcode { .. } => Status::UnknownOpcode,
            UiError::InvalidArgument { .. } => Status::InvalidArgument,
        }
    }

    /// (status, value) register pair; errors carry no value
    pub const fn encode(&self) -> (u64, u64) {
        (self.status() as u64, 0)
    }
}
