//! Instruction Word Definitions.
//!
//! Only the memory-access format (format C) carries hazard information for the strand
//! controller; every other format is treated as an ordinary single-cycle instruction unless
//! decode flags it as long-latency.
//!
//! # Modules
//!
//! * `opcodes`: Format tag and memory operation subtypes.
//! * `instruction`: Field extraction from raw 32-bit words.
//! * `classify`: The hazard classifier consumed by the next-state function.
//! * `encode`: Word construction for scenarios and tests.

/// Hazard classification of pending instruction words.
pub mod classify;

/// Construction of memory-format instruction words.
pub mod encode;

/// Field layout and bit extraction utilities.
pub mod instruction;

/// Format tag and memory operation subtype definitions.
pub mod opcodes;

pub use classify::{Classification, classify};
pub use opcodes::{Access, MemOp};
