//! Memory budget for operations that materialize contiguous byte buffers.
//!
//! Reading a range of a chain, stringifying the whole chain or reading a line
//! allocates a buffer proportional to the requested range. Such operations
//! are refused up front when the projected allocation exceeds the budget.
//! The projection is twice the requested length: one intermediate buffer
//! plus the final one.
//!
//! Operations whose cost is bounded by the number of segments (insert,
//! delete, overwrite, locate, search) are never budget-checked.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SegChainError};

/// Default process-wide budget: 1 GiB.
pub const DEFAULT_BUDGET: u64 = 1024 * 1024 * 1024;

static PROCESS_BUDGET: AtomicU64 = AtomicU64::new(DEFAULT_BUDGET);

/// Returns the process-wide memory budget in bytes.
#[must_use]
pub fn get_budget() -> u64 {
    PROCESS_BUDGET.load(Ordering::Relaxed)
}

/// Sets the process-wide memory budget in bytes.
///
/// Chains created with an explicit budget (see
/// [`SegmentChain::with_budget`](crate::SegmentChain::with_budget)) are not
/// affected.
pub fn set_budget(bytes: u64) {
    PROCESS_BUDGET.store(bytes, Ordering::Relaxed);
}

/// A ceiling on the bytes a single materialization may allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    bytes: u64,
}

impl MemoryBudget {
    #[must_use]
    pub fn new(bytes: u64) -> Self {
        Self { bytes }
    }

    /// Snapshot of the current process-wide budget.
    #[must_use]
    pub fn process() -> Self {
        Self::new(get_budget())
    }

    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Checks that materializing `length` bytes fits the budget.
    ///
    /// # Errors
    ///
    /// Returns `SegChainError::MemoryBudgetExceeded` if `2 * length` exceeds
    /// the budget.
    pub fn check(&self, length: u64) -> Result<()> {
        let required = length.saturating_mul(2);
        if required > self.bytes {
            tracing::warn!(required, budget = self.bytes, "materialization refused");
            return Err(SegChainError::MemoryBudgetExceeded {
                required,
                budget: self.bytes,
            });
        }
        Ok(())
    }
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self::process()
    }
}
