//! `segchain`: address and edit a virtual byte sequence of any size while
//! keeping memory proportional to the number of edits.
//!
//! The sequence is a [`SegmentChain`]: an ordered, gap-free list of
//! immutable [`Segment`]s. Each segment describes one byte range compactly:
//!
//! - [`LiteralSegment`]: explicit bytes;
//! - [`HomogeneousSegment`]: one byte repeated;
//! - [`PeriodicSegment`]: a pattern repeated and truncated.
//!
//! This makes it cheap to build inputs like "a 10 GiB file with known text
//! at known offsets" for tests.
//!
//! ```
//! # use segchain::{Segment, SegmentChain};
//! let mut chain = SegmentChain::new();
//! chain
//!     .append(Segment::periodic(0, 10 * 1024 * 1024 * 1024, &b"Hello, World!\n"[..]).unwrap())
//!     .unwrap();
//! assert_eq!(chain.extract(0, 5).unwrap(), b"Hello");
//!
//! chain.insert_literal(7, &b"big "[..]).unwrap();
//! assert_eq!(chain.extract(0, 18).unwrap(), b"Hello, big World!\n");
//! ```
//!
//! # Performance Characteristics
//!
//! With M segments in the chain, N segments after an edit point and B bytes
//! touched by a read:
//!
//! - `locate()`: O(log M) binary search over segment starts
//! - `append()`: O(1)
//! - `insert()`, `delete()`, `overwrite()`: O(log M + N), no payload copies
//! - `extract()`: O(B)
//! - `search()`: per segment O(pattern length) for homogeneous and periodic
//!   segments, linear in the segment for literal ones
//!
//! # Searching
//!
//! [`SegmentChain::search`] finds non-overlapping occurrences, including
//! those spanning segment boundaries, lazily and in increasing order:
//!
//! ```
//! # use segchain::SegmentChain;
//! let mut chain = SegmentChain::new();
//! chain.append_literal(&b"aaf"[..]).unwrap();
//! chain.append_literal(&b"faffaf"[..]).unwrap();
//! let found: Vec<u64> = chain.search(b"aff", 0, chain.size(), false).collect();
//! assert_eq!(found, vec![1, 4]);
//! ```
//!
//! # Memory Budget
//!
//! Operations that materialize bytes (`extract`, `to_full_bytes`,
//! `read_line`, the `*_and_return` variants) refuse up front when twice the
//! requested length exceeds the budget. The budget is process-wide
//! ([`get_budget`], [`set_budget`], 1 GiB by default) unless a chain carries
//! its own ([`SegmentChain::with_budget`]).
//!
//! # Concurrency
//!
//! A chain is a plain value without internal locking; mutation needs
//! `&mut SegmentChain`. Share it across threads only behind your own
//! synchronization. Segments are immutable and freely cloneable.

mod budget;
mod chain;
mod error;
mod iter;
mod overlap;
mod segment;
mod size;
mod slice;

pub use budget::{get_budget, set_budget, MemoryBudget, DEFAULT_BUDGET};
pub use chain::{GapFiller, Location, SegmentChain};
pub use error::{Result, SegChainError};
pub use iter::Matches;
pub use overlap::{BoundaryMatches, OverlapSearcher};
pub use segment::{
    rotate, HomogeneousSegment, LiteralSegment, PeriodicSegment, Segment, SegmentKind,
};
pub use size::parse_size;
