//! Per-strand fetch model.
//!
//! A strand's instruction stream is a fixed program and a program counter. The word at the
//! program counter is presented every cycle until the controller raises
//! `next_instr_request`; a rollback rewinds the program counter to the restart point.

use serde::{Deserialize, Serialize};

/// One program entry: the instruction word and decode's long-latency flag.
///
/// Deserializes from either a bare number or `{ "word": .., "long_latency": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "ProgramEntry")]
pub struct ProgramWord {
    /// Raw instruction word.
    pub word: u32,
    /// Decode marks this (non-memory) instruction as long-latency.
    pub long_latency: bool,
}

impl ProgramWord {
    /// An instruction without the long-latency flag.
    pub const fn new(word: u32) -> Self {
        Self {
            word,
            long_latency: false,
        }
    }

    /// An instruction decode marks as long-latency.
    pub const fn long_latency(word: u32) -> Self {
        Self {
            word,
            long_latency: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProgramEntry {
    Word(u32),
    Detailed {
        word: u32,
        #[serde(default)]
        long_latency: bool,
    },
}

impl From<ProgramEntry> for ProgramWord {
    fn from(entry: ProgramEntry) -> Self {
        match entry {
            ProgramEntry::Word(word) => Self::new(word),
            ProgramEntry::Detailed { word, long_latency } => Self { word, long_latency },
        }
    }
}

/// Instruction stream for one strand.
#[derive(Debug, Clone, Default)]
pub struct FetchUnit {
    program: Vec<ProgramWord>,
    pc: usize,
}

impl FetchUnit {
    /// Creates a stream positioned at the first instruction.
    pub const fn new(program: Vec<ProgramWord>) -> Self {
        Self { program, pc: 0 }
    }

    /// Instruction presented to the strand this cycle, if any.
    pub fn pending(&self) -> Option<ProgramWord> {
        self.program.get(self.pc).copied()
    }

    /// Moves to the next instruction.
    pub fn advance(&mut self) {
        if self.pc < self.program.len() {
            self.pc += 1;
        }
    }

    /// Rewinds (or skips) to `pc` after a rollback. Positions past the end drain the stream.
    pub fn restart(&mut self, pc: usize) {
        self.pc = pc.min(self.program.len());
    }

    /// Index of the pending instruction.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.program.len()
    }

    /// Whether the program is empty.
    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }

    /// Whether every instruction has been fetched past.
    pub fn is_drained(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Rewinds to the first instruction.
    pub const fn reset(&mut self) {
        self.pc = 0;
    }
}
