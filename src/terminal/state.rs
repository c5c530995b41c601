//! Terminal state block
//!
//! The authoritative values the display writer reads when rendering:
//! colors, cursor position and the addressable extent.
//! Maxima are inclusive (last valid index), so an 80x25 screen has
//! `cursor_col_max == 79` and `cursor_row_max == 24`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BG, DEFAULT_COLS, DEFAULT_FG, DEFAULT_ROWS, RGB_MAX};

/// Color space of the active display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// VGA-style text mode, 16-color palette
    #[default]
    Text16,
    /// 256-color palette
    Indexed256,
    /// Packed 0xRRGGBB
    Rgb,
}

impl DisplayMode {
    /// Largest legal color value in this mode
    pub const fn color_max(self) -> u32 {
        match self {
            DisplayMode::Text16 => 15,
            DisplayMode::Indexed256 => 255,
            DisplayMode::Rgb => RGB_MAX,
        }
    }

    #[inline]
    pub const fn is_valid_color(self, value: u64) -> bool {
        value <= self.color_max() as u64
    }
}

/// Individual state field addressed by a getter/setter pair.
/// The discriminant is the low nibble shared by both opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Field {
    Fg = 0x1,
    Bg = 0x2,
    CursorRow = 0x3,
    CursorCol = 0x4,
    CursorRowMax = 0x5,
    CursorColMax = 0x6,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Fg,
        Field::Bg,
        Field::CursorRow,
        Field::CursorCol,
        Field::CursorRowMax,
        Field::CursorColMax,
    ];

    /// Look up a field by the low nibble of its opcode
    pub const fn from_index(index: u8) -> Option<Field> {
        match index {
            0x1 => Some(Field::Fg),
            0x2 => Some(Field::Bg),
            0x3 => Some(Field::CursorRow),
            0x4 => Some(Field::CursorCol),
            0x5 => Some(Field::CursorRowMax),
            0x6 => Some(Field::CursorColMax),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Terminal state
///
/// Fields are only written through the dispatcher, which enforces the
/// cursor and color invariants before assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalState {
    pub(crate) fg_color: u32,
    pub(crate) bg_color: u32,
    pub(crate) cursor_row: u32,
    pub(crate) cursor_col: u32,
    pub(crate) cursor_row_max: u32,
    pub(crate) cursor_col_max: u32,
    pub(crate) mode: DisplayMode,
}

impl Default for TerminalState {
    fn default() -> Self {
        let mut state = Self::new(DEFAULT_ROWS, DEFAULT_COLS, DisplayMode::Text16);
        state.fg_color = DEFAULT_FG;
        state.bg_color = DEFAULT_BG;
        state
    }
}

impl TerminalState {
    /// Create state for a `rows` x `cols` screen with the cursor at the origin.
    /// A zero extent is treated as a single row/column.
    pub const fn new(rows: u32, cols: u32, mode: DisplayMode) -> Self {
        Self {
            fg_color: 0,
            bg_color: 0,
            cursor_row: 0,
            cursor_col: 0,
            cursor_row_max: rows.saturating_sub(1),
            cursor_col_max: cols.saturating_sub(1),
            mode,
        }
    }

    /// Set initial colors. None if either is outside the mode's range.
    pub const fn with_colors(mut self, fg: u32, bg: u32) -> Option<Self> {
        let max = self.mode.color_max();
        if fg > max || bg > max {
            return None;
        }
        self.fg_color = fg;
        self.bg_color = bg;
        Some(self)
    }

    pub const fn fg_color(&self) -> u32 {
        self.fg_color
    }

    pub const fn bg_color(&self) -> u32 {
        self.bg_color
    }

    pub const fn cursor_row(&self) -> u32 {
        self.cursor_row
    }

    pub const fn cursor_col(&self) -> u32 {
        self.cursor_col
    }

    pub const fn cursor_row_max(&self) -> u32 {
        self.cursor_row_max
    }

    pub const fn cursor_col_max(&self) -> u32 {
        self.cursor_col_max
    }

    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Read one field
    pub const fn get(&self, field: Field) -> u32 {
        match field {
            Field::Fg => self.fg_color,
            Field::Bg => self.bg_color,
            Field::CursorRow => self.cursor_row,
            Field::CursorCol => self.cursor_col,
            Field::CursorRowMax => self.cursor_row_max,
            Field::CursorColMax => self.cursor_col_max,
        }
    }

    /// Screen size as (rows, cols)
    pub const fn size(&self) -> (u64, u64) {
        (self.cursor_row_max as u64 + 1, self.cursor_col_max as u64 + 1)
    }

    /// True when the cursor lies inside the addressable extent
    pub const fn cursor_in_bounds(&self) -> bool {
        self.cursor_row <= self.cursor_row_max && self.cursor_col <= self.cursor_col_max
    }
}
