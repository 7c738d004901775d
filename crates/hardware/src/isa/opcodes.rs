//! Memory Format (C) Opcodes.
//!
//! Defines the format tag (bits 31-30) and the memory operation subtype field
//! (bits 28-25) of memory-access instructions.

use std::fmt;

/// Value of bits 31-30 that identifies a memory-access (format C) instruction.
pub const FORMAT_C_TAG: u32 = 0b10;

/// A memory operation subtype (bits 28-25 of a format C word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MemOp {
    /// Scalar byte access.
    Byte = 0x0,
    /// Scalar byte access, sign-extended.
    ByteSignExtend = 0x1,
    /// Scalar 16-bit access.
    Short = 0x2,
    /// Scalar 16-bit access, sign-extended.
    ShortSignExtend = 0x3,
    /// Scalar 32-bit access.
    Long = 0x4,
    /// Synchronized (load-linked / store-conditional) 32-bit access.
    Sync = 0x5,
    /// Control register transfer.
    ControlRegister = 0x6,
    /// Contiguous vector block access.
    Block = 0x7,
    /// Contiguous vector block access under a lane mask.
    BlockMasked = 0x8,
    /// Contiguous vector block access under an inverted lane mask.
    BlockInvertedMask = 0x9,
    /// Strided vector access, one lane per cycle.
    Strided = 0xA,
    /// Strided vector access under a lane mask.
    StridedMasked = 0xB,
    /// Strided vector access under an inverted lane mask.
    StridedInvertedMask = 0xC,
    /// Scatter/gather vector access, one lane per cycle.
    ScatterGather = 0xD,
    /// Scatter/gather vector access under a lane mask.
    ScatterGatherMasked = 0xE,
    /// Scatter/gather vector access under an inverted lane mask.
    ScatterGatherInvertedMask = 0xF,
}

impl MemOp {
    /// Every subtype, in encoding order.
    pub const ALL: [Self; 16] = [
        Self::Byte,
        Self::ByteSignExtend,
        Self::Short,
        Self::ShortSignExtend,
        Self::Long,
        Self::Sync,
        Self::ControlRegister,
        Self::Block,
        Self::BlockMasked,
        Self::BlockInvertedMask,
        Self::Strided,
        Self::StridedMasked,
        Self::StridedInvertedMask,
        Self::ScatterGather,
        Self::ScatterGatherMasked,
        Self::ScatterGatherInvertedMask,
    ];

    /// Decodes a 4-bit subtype field. Only the low four bits are examined.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self::ALL[(bits & 0xF) as usize]
    }

    /// Raw 4-bit encoding of this subtype.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Whether this access iterates over vector lanes, one lane per issue.
    pub const fn is_multi_cycle(self) -> bool {
        matches!(
            self,
            Self::Strided
                | Self::StridedMasked
                | Self::StridedInvertedMask
                | Self::ScatterGather
                | Self::ScatterGatherMasked
                | Self::ScatterGatherInvertedMask
        )
    }

    /// Whether the encoding reserves a mask register field.
    ///
    /// Masked encodings have a narrower stride field.
    pub const fn is_masked(self) -> bool {
        matches!(
            self,
            Self::BlockMasked
                | Self::BlockInvertedMask
                | Self::StridedMasked
                | Self::StridedInvertedMask
                | Self::ScatterGatherMasked
                | Self::ScatterGatherInvertedMask
        )
    }

    /// Short mnemonic suffix used in traces.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Byte => "b",
            Self::ByteSignExtend => "bx",
            Self::Short => "s",
            Self::ShortSignExtend => "sx",
            Self::Long => "l",
            Self::Sync => "sync",
            Self::ControlRegister => "cr",
            Self::Block => "v",
            Self::BlockMasked => "v.mask",
            Self::BlockInvertedMask => "v.invmask",
            Self::Strided => "strd",
            Self::StridedMasked => "strd.mask",
            Self::StridedInvertedMask => "strd.invmask",
            Self::ScatterGather => "scgath",
            Self::ScatterGatherMasked => "scgath.mask",
            Self::ScatterGatherInvertedMask => "scgath.invmask",
        }
    }
}

impl fmt::Display for MemOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Direction of a memory access (bit 29 of a format C word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Memory to register.
    Load,
    /// Register to memory.
    Store,
}

impl Access {
    /// Value of the direction bit for this access.
    #[inline(always)]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Load => 1,
            Self::Store => 0,
        }
    }
}
