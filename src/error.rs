use thiserror::Error;

/// Error types for segment and segment chain operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SegChainError {
    /// A position at or past the end of the chain was used where a containing segment is required
    #[error("Position beyond end: position {position} is not below chain size {size}")]
    PositionBeyondEnd {
        /// Position that was looked up
        position: u64,
        /// Current logical size of the chain
        size: u64,
    },
    /// The range does not overlap the segment, or is reversed
    #[error("Invalid range: {start}..{stop} does not fit segment {segment_start}..{segment_stop}")]
    InvalidRange {
        /// Requested start (inclusive)
        start: u64,
        /// Requested stop (exclusive)
        stop: u64,
        /// Start of the segment the range was applied to
        segment_start: u64,
        /// Stop of the segment the range was applied to
        segment_stop: u64,
    },
    /// The search pattern does not occur in the searched range
    #[error("Not found: pattern does not occur in {start}..{stop}")]
    NotFound {
        /// Start of the searched range
        start: u64,
        /// Stop of the searched range
        stop: u64,
    },
    /// A degenerate segment or a non-contiguous chain was requested
    #[error("Invariant violation: {reason}")]
    InvariantViolation {
        /// Description of the violated invariant
        reason: &'static str,
    },
    /// Materializing the requested bytes would exceed the memory budget
    #[error("Memory budget exceeded: operation requires {required} bytes, the budget is {budget} bytes")]
    MemoryBudgetExceeded {
        /// Bytes the operation would need
        required: u64,
        /// Configured budget in bytes
        budget: u64,
    },
    /// An offset computation does not fit in 64 bits
    #[error("Offset overflow: {start} + {size} exceeds the addressable range")]
    OffsetOverflow {
        /// Base offset
        start: u64,
        /// Amount added to the base offset
        size: u64,
    },
    /// A human-readable size string could not be parsed
    #[error("Invalid size string: {input:?}")]
    InvalidSize {
        /// The rejected input
        input: String,
    },
}

pub type Result<T> = core::result::Result<T, SegChainError>;
