//! uicall - opcode-dispatched terminal state service
//!
//! A bare-metal monitor's UI service: callers request terminal state
//! (colors, cursor position, cursor bounds) through one entry point keyed
//! by a fixed opcode number.
//!
//! ```text
//! caller ─(opcode, arg)─▶ UiDispatcher ─▶ Serialization ─▶ TerminalState
//!                              │
//!                              └─▶ Reply / UiError ─▶ (status, value)
//! ```

pub mod config;
pub mod constants;
pub mod script;
pub mod terminal;
pub mod ui;
pub mod utils;

pub use terminal::{DisplayMode, Field, TerminalState};
pub use ui::{Opcode, Reply, SharedDispatcher, Status, UiDispatcher, UiError};
