//! Call serialization disciplines
//!
//! The dispatcher never synchronizes on its own. It is built with one of
//! these wrappers, which decide how concurrent callers are kept apart.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::terminal::TerminalState;

/// Exclusive access to the terminal state for the duration of one call
pub trait Serialization {
    fn new(state: TerminalState) -> Self
    where
        Self: Sized;

    /// Run `f` with exclusive access. Must not be re-entered from `f`.
    fn with<R>(&self, f: impl FnOnce(&mut TerminalState) -> R) -> R;
}

/// Single execution context. The caller guarantees calls never overlap
/// (single core, interrupts masked around the call). Not `Sync`.
#[derive(Debug)]
pub struct SingleContext {
    state: RefCell<TerminalState>,
}

impl Serialization for SingleContext {
    fn new(state: TerminalState) -> Self {
        Self {
            state: RefCell::new(state),
        }
    }

    #[inline]
    fn with<R>(&self, f: impl FnOnce(&mut TerminalState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }
}

/// Spinlock shared by several execution contexts
#[derive(Debug)]
pub struct SpinLocked {
    state: spin::Mutex<TerminalState>,
}

impl Serialization for SpinLocked {
    fn new(state: TerminalState) -> Self {
        Self {
            state: spin::Mutex::new(state),
        }
    }

    #[inline]
    fn with<R>(&self, f: impl FnOnce(&mut TerminalState) -> R) -> R {
        f(&mut self.state.lock())
    }
}

/// Discipline selector used by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationKind {
    #[default]
    Single,
    Spin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_context_mutation_visible() {
        let guard = SingleContext::new(TerminalState::default());
        guard.with(|s| s.cursor_row = 3);
        assert_eq!(guard.with(|s| s.cursor_row()), 3);
    }

    #[test]
    fn test_spin_locked_mutation_visible() {
        let guard = SpinLocked::new(TerminalState::default());
        guard.with(|s| s.fg_color = 2);
        assert_eq!(guard.with(|s| s.fg_color()), 2);
    }
}
