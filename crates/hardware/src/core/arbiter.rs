//! Strand-select arbiter.
//!
//! Grants issue to at most one ready strand per cycle. Selection is split from the pointer
//! update so the simulator can pick a winner against step-k state and apply the rotation
//! together with the strand commits.

use crate::config::ArbiterPolicy;

/// Strand-select arbiter.
#[derive(Debug, Clone)]
pub struct Arbiter {
    policy: ArbiterPolicy,
    /// First strand considered by round-robin selection.
    next: usize,
}

impl Arbiter {
    /// Creates an arbiter starting at strand 0.
    pub const fn new(policy: ArbiterPolicy) -> Self {
        Self { policy, next: 0 }
    }

    /// Chooses the strand to grant among those whose `ready` bit is set.
    pub fn pick(&self, ready: &[bool]) -> Option<usize> {
        let n = ready.len();
        if n == 0 {
            return None;
        }
        match self.policy {
            ArbiterPolicy::FixedPriority => ready.iter().position(|&r| r),
            ArbiterPolicy::RoundRobin => (0..n)
                .map(|i| (self.next + i) % n)
                .find(|&strand| ready[strand]),
        }
    }

    /// Applies the outcome of a cycle's arbitration.
    pub const fn commit(&mut self, granted: Option<usize>) {
        if let Some(strand) = granted {
            self.next = strand + 1;
        }
    }

    /// Returns the arbiter to strand 0.
    pub const fn reset(&mut self) {
        self.next = 0;
    }
}
