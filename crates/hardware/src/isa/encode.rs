//! Instruction word construction.
//!
//! Builds raw words for scenarios and tests. Only the fields the strand controller
//! observes are populated; register fields are left zero.

use super::instruction::{
    FORMAT_SHIFT, LOAD_SHIFT, MASKED_STRIDE_MASK, MASKED_STRIDE_SHIFT, MEM_OP_SHIFT, STRIDE_MASK,
    STRIDE_SHIFT,
};
use super::opcodes::{Access, FORMAT_C_TAG, MemOp};

/// Tag placed in bits 31-29 of words built by [`arithmetic`].
const ARITHMETIC_TAG: u32 = 0b110;

/// Encodes a memory-access (format C) instruction.
///
/// The stride is truncated to the field width of the encoding: ten bits for masked
/// subtypes, fifteen bits otherwise.
pub const fn memory(op: MemOp, access: Access, stride: u32) -> u32 {
    let stride_bits = if op.is_masked() {
        (stride & MASKED_STRIDE_MASK) << MASKED_STRIDE_SHIFT
    } else {
        (stride & STRIDE_MASK) << STRIDE_SHIFT
    };
    FORMAT_C_TAG << FORMAT_SHIFT
        | access.bit() << LOAD_SHIFT
        | op.bits() << MEM_OP_SHIFT
        | stride_bits
}

/// Encodes a register-to-register arithmetic instruction with the given low 29 bits.
///
/// Such words are never format C.
pub const fn arithmetic(payload: u32) -> u32 {
    ARITHMETIC_TAG << 29 | (payload & 0x1FFF_FFFF)
}
