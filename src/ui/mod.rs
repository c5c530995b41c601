//! UI service call interface
//!
//! Opcode decoding, the dispatcher and the serialization disciplines it
//! can be built with.

pub mod dispatcher;
pub mod error;
pub mod opcode;
pub mod serial;

pub use dispatcher::{encode_result, Reply, SharedDispatcher, UiDispatcher};
pub use error::{Status, UiError};
pub use opcode::{OpKind, Opcode, ParseOpcodeError};
pub use serial::{Serialization, SerializationKind, SingleContext, SpinLocked};
