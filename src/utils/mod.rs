//! Utility functions shared across uicall
//!
//! Common helpers that don't fit in specialized modules.

pub mod color;

pub use color::{pack_rgb, parse_hex_color, parse_packed_rgb, unpack_rgb};
