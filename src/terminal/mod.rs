//! Terminal state
//!
//! The state block maintained by the UI service and read by display writers.

pub mod state;

pub use state::{DisplayMode, Field, TerminalState};
