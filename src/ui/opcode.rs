//! UI service opcodes
//!
//! Closed enumeration of the call numbers. Decoding is two-level: the high
//! nibble picks the category (getter vs setter) and the low nibble picks
//! the field, so both halves share one [`Field`] table.

use std::fmt;
use std::str::FromStr;

use crate::constants::{self, CATEGORY_GET, CATEGORY_SET};
use crate::terminal::Field;

/// Opcode category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// RETURN: ends the caller's dispatch loop
    Control,
    Getter,
    Setter,
}

/// UI service opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Return = constants::RETURN,
    GetFg = constants::GET_FG,
    GetBg = constants::GET_BG,
    GetCursorRow = constants::GET_CURSOR_ROW,
    GetCursorCol = constants::GET_CURSOR_COL,
    GetCursorRowMax = constants::GET_CURSOR_ROW_MAX,
    GetCursorColMax = constants::GET_CURSOR_COL_MAX,
    SetFg = constants::SET_FG,
    SetBg = constants::SET_BG,
    SetCursorRow = constants::SET_CURSOR_ROW,
    SetCursorCol = constants::SET_CURSOR_COL,
    SetCursorRowMax = constants::SET_CURSOR_ROW_MAX,
    SetCursorColMax = constants::SET_CURSOR_COL_MAX,
}

impl Opcode {
    /// Every opcode in wire order
    pub const ALL: [Opcode; 13] = [
        Opcode::Return,
        Opcode::GetFg,
        Opcode::GetBg,
        Opcode::GetCursorRow,
        Opcode::GetCursorCol,
        Opcode::GetCursorRowMax,
        Opcode::GetCursorColMax,
        Opcode::SetFg,
        Opcode::SetBg,
        Opcode::SetCursorRow,
        Opcode::SetCursorCol,
        Opcode::SetCursorRowMax,
        Opcode::SetCursorColMax,
    ];

    /// Decode a raw call number. Values wider than a byte are never valid.
    pub const fn decode(raw: u64) -> Option<Opcode> {
        if raw > 0xFF {
            return None;
        }
        let (category, index) = constants::split_opcode(raw as u8);
        match category {
            CATEGORY_GET => {
                if index == 0 {
                    return Some(Opcode::Return);
                }
                match Field::from_index(index) {
                    Some(field) => Some(Opcode::getter(field)),
                    None => None,
                }
            }
            CATEGORY_SET => match Field::from_index(index) {
                Some(field) => Some(Opcode::setter(field)),
                None => None,
            },
            _ => None,
        }
    }

    pub const fn getter(field: Field) -> Opcode {
        match field {
            Field::Fg => Opcode::GetFg,
            Field::Bg => Opcode::GetBg,
            Field::CursorRow => Opcode::GetCursorRow,
            Field::CursorCol => Opcode::GetCursorCol,
            Field::CursorRowMax => Opcode::GetCursorRowMax,
            Field::CursorColMax => Opcode::GetCursorColMax,
        }
    }

    pub const fn setter(field: Field) -> Opcode {
        match field {
            Field::Fg => Opcode::SetFg,
            Field::Bg => Opcode::SetBg,
            Field::CursorRow => Opcode::SetCursorRow,
            Field::CursorCol => Opcode::SetCursorCol,
            Field::CursorRowMax => Opcode::SetCursorRowMax,
            Field::CursorColMax => Opcode::SetCursorColMax,
        }
    }

    /// Wire value
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn kind(self) -> OpKind {
        match constants::split_opcode(self.code()) {
            (_, 0) => OpKind::Control,
            (CATEGORY_SET, _) => OpKind::Setter,
            _ => OpKind::Getter,
        }
    }

    /// Field read or written by this opcode (None for RETURN)
    pub const fn field(self) -> Option<Field> {
        Field::from_index(constants::split_opcode(self.code()).1)
    }

    /// Canonical upper-case name
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Return => "RETURN",
            Opcode::GetFg => "GET_FG",
            Opcode::GetBg => "GET_BG",
            Opcode::GetCursorRow => "GET_CURSOR_ROW",
            Opcode::GetCursorCol => "GET_CURSOR_COL",
            Opcode::GetCursorRowMax => "GET_CURSOR_ROW_MAX",
            Opcode::GetCursorColMax => "GET_CURSOR_COL_MAX",
            Opcode::SetFg => "SET_FG",
            Opcode::SetBg => "SET_BG",
            Opcode::SetCursorRow => "SET_CURSOR_ROW",
            Opcode::SetCursorCol => "SET_CURSOR_COL",
            Opcode::SetCursorRowMax => "SET_CURSOR_ROW_MAX",
            Opcode::SetCursorColMax => "SET_CURSOR_COL_MAX",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02x})", self.name(), self.code())
    }
}

impl TryFrom<u64> for Opcode {
    type Error = u64;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Opcode::decode(raw).ok_or(raw)
    }
}

/// Parse a numeric literal: `0x` hex or decimal
pub fn parse_number(s: &str) -> Option<u64> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

/// Error returned when a string names no opcode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode: {0}")]
pub struct ParseOpcodeError(pub String);

impl FromStr for Opcode {
    type Err = ParseOpcodeError;

    /// Accepts a canonical name (any case) or a numeric literal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(raw) = parse_number(s) {
            return Opcode::decode(raw).ok_or_else(|| ParseOpcodeError(s.to_string()));
        }
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOpcodeError(s.to_string()))
    }
}
