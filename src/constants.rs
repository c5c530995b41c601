//! Global constants for uicall
//!
//! The opcode numbers below are the binary interface of the UI service.
//! Existing callers pass these literal values; they must never be renumbered.

// ============================================================================
// Control
// ============================================================================

/// Leave the dispatch loop and resume the caller
pub const RETURN: u8 = 0x00;

// ============================================================================
// Getters (0x0_)
// ============================================================================

/// Current foreground color
pub const GET_FG: u8 = 0x01;

/// Current background color
pub const GET_BG: u8 = 0x02;

/// Current cursor row
pub const GET_CURSOR_ROW: u8 = 0x03;

/// Current cursor column
pub const GET_CURSOR_COL: u8 = 0x04;

/// Last addressable row
pub const GET_CURSOR_ROW_MAX: u8 = 0x05;

/// Last addressable column
pub const GET_CURSOR_COL_MAX: u8 = 0x06;

// ============================================================================
// Setters (0x1_)
// ============================================================================

pub const SET_FG: u8 = 0x11;
pub const SET_BG: u8 = 0x12;
pub const SET_CURSOR_ROW: u8 = 0x13;
pub const SET_CURSOR_COL: u8 = 0x14;
pub const SET_CURSOR_ROW_MAX: u8 = 0x15;
pub const SET_CURSOR_COL_MAX: u8 = 0x16;

/// High-nibble category of getters (and RETURN)
pub const CATEGORY_GET: u8 = 0x0;

/// High-nibble category of setters
pub const CATEGORY_SET: u8 = 0x1;

// ============================================================================
// Display defaults
// ============================================================================

/// Default text rows (80x25 text mode)
pub const DEFAULT_ROWS: u32 = 25;

/// Default text columns
pub const DEFAULT_COLS: u32 = 80;

/// Default foreground (light gray in the 16-color palette)
pub const DEFAULT_FG: u32 = 7;

/// Default background (black)
pub const DEFAULT_BG: u32 = 0;

/// Largest packed 0xRRGGBB value
pub const RGB_MAX: u32 = 0x00FF_FFFF;

// ============================================================================
// Wire status codes
// ============================================================================

pub const STATUS_OK: u64 = 0;
pub const STATUS_UNKNOWN_OPCODE: u64 = 1;
pub const STATUS_INVALID_ARGUMENT: u64 = 2;

/// Split an opcode into its (category, field) nibbles
#[inline]
pub const fn split_opcode(code: u8) -> (u8, u8) {
    (code >> 4, code & 0x0F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_follow_high_nibble() {
        for code in [GET_FG, GET_BG, GET_CURSOR_ROW, GET_CURSOR_COL, GET_CURSOR_ROW_MAX, GET_CURSOR_COL_MAX] {
            assert_eq!(split_opcode(code).0, CATEGORY_GET);
        }
        for code in [SET_FG, SET_BG, SET_CURSOR_ROW, SET_CURSOR_COL, SET_CURSOR_ROW_MAX, SET_CURSOR_COL_MAX] {
            assert_eq!(split_opcode(code).0, CATEGORY_SET);
        }
        // Setter low nibble mirrors its getter
        assert_eq!(split_opcode(SET_CURSOR_COL).1, split_opcode(GET_CURSOR_COL).1);
    }
}
