//! Instruction field extraction.
//!
//! Provides bit extraction for the fields of a memory-access (format C) word:
//!
//! ```text
//!  31 30 29  28   25 24                   15 14      10 9     5 4     0
//! | 1  0 | L | op   |      stride (masked)    | mask    | ptr   | reg   |
//! | 1  0 | L | op   |      stride (unmasked, bits 24-10)  | ptr   | reg   |
//! ```

use super::opcodes::{FORMAT_C_TAG, MemOp};

/// Bit position of the format tag.
pub const FORMAT_SHIFT: u32 = 30;
/// Bit mask for the format tag after shifting.
pub const FORMAT_MASK: u32 = 0b11;
/// Bit position of the load/store direction bit.
pub const LOAD_SHIFT: u32 = 29;
/// Bit position of the memory operation subtype.
pub const MEM_OP_SHIFT: u32 = 25;
/// Bit mask for the memory operation subtype after shifting.
pub const MEM_OP_MASK: u32 = 0xF;
/// Bit position of the stride field in masked encodings.
pub const MASKED_STRIDE_SHIFT: u32 = 15;
/// Bit mask for the 10-bit stride field of masked encodings.
pub const MASKED_STRIDE_MASK: u32 = 0x3FF;
/// Bit position of the stride field in unmasked encodings.
pub const STRIDE_SHIFT: u32 = 10;
/// Bit mask for the 15-bit stride field of unmasked encodings.
pub const STRIDE_MASK: u32 = 0x7FFF;

/// Trait for extracting memory-format fields from encoded instructions.
pub trait MemoryFormatBits {
    /// Whether bits 31-30 carry the memory-access format tag.
    fn is_format_c(&self) -> bool;

    /// Direction bit (bit 29). Only meaningful for format C words.
    fn load_bit(&self) -> bool;

    /// Memory operation subtype (bits 28-25). Only meaningful for format C words.
    fn mem_op(&self) -> MemOp;

    /// Per-lane stride, zero-extended.
    ///
    /// Masked encodings spend bits 14-10 on the mask register, leaving bits 24-15
    /// for the stride. Unmasked encodings use bits 24-10.
    fn stride(&self, masked: bool) -> u32;
}

impl MemoryFormatBits for u32 {
    #[inline(always)]
    fn is_format_c(&self) -> bool {
        (self >> FORMAT_SHIFT) & FORMAT_MASK == FORMAT_C_TAG
    }

    #[inline(always)]
    fn load_bit(&self) -> bool {
        (self >> LOAD_SHIFT) & 1 == 1
    }

    #[inline(always)]
    fn mem_op(&self) -> MemOp {
        MemOp::from_bits((self >> MEM_OP_SHIFT) & MEM_OP_MASK)
    }

    #[inline(always)]
    fn stride(&self, masked: bool) -> u32 {
        if masked {
            (self >> MASKED_STRIDE_SHIFT) & MASKED_STRIDE_MASK
        } else {
            (self >> STRIDE_SHIFT) & STRIDE_MASK
        }
    }
}
