//! Search across segment boundaries.
//!
//! A match of an `m`-byte pattern can start in one segment and end in a
//! later one. [`OverlapSearcher`] keeps the last `m - 1` bytes fed to it and,
//! for the next segment, scans only the short probe formed by those bytes and
//! the first `m - 1` bytes of that segment. Matches lying entirely inside one
//! segment are left to the segment's own search, so nothing is reported
//! twice.

use std::collections::VecDeque;

use crate::segment::{find_in, Segment};

/// Bounded FIFO of the trailing bytes of the segments seen so far.
///
/// # Invariants
/// - `buffered <= pattern.len() - 1`.
/// - The chunks, concatenated, are the most recent `buffered` bytes fed.
#[derive(Debug, Clone)]
pub struct OverlapSearcher {
    pattern: Vec<u8>,
    capacity: usize,
    chunks: VecDeque<Vec<u8>>,
    buffered: usize,
}

impl OverlapSearcher {
    #[must_use]
    pub fn new(pattern: &[u8]) -> Self {
        Self {
            pattern: pattern.to_vec(),
            capacity: pattern.len().saturating_sub(1),
            chunks: VecDeque::new(),
            buffered: 0,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Number of trailing bytes currently remembered.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// The remembered trailing bytes, oldest first.
    #[must_use]
    pub fn buffered_bytes(&self) -> Vec<u8> {
        self.chunks.iter().flatten().copied().collect()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
        self.buffered = 0;
    }

    /// Remembers the trailing bytes of `segment`, which must follow the
    /// previously fed segment.
    pub fn feed(&mut self, segment: &Segment) {
        if self.capacity == 0 {
            return;
        }
        let cap = self.capacity as u64;
        if segment.size() >= cap {
            self.clear();
        }
        let tail_start = segment.stop().saturating_sub(cap).max(segment.start());
        let tail = segment.bytes_between(tail_start, segment.stop());
        self.buffered += tail.len();
        self.chunks.push_back(tail);

        while self.buffered > self.capacity {
            let excess = self.buffered - self.capacity;
            let Some(front) = self.chunks.front_mut() else {
                break;
            };
            if front.len() <= excess {
                self.buffered -= front.len();
                self.chunks.pop_front();
            } else {
                front.drain(..excess);
                self.buffered -= excess;
            }
        }
    }

    /// Matches straddling the start of `next`, the segment following the
    /// last fed one.
    #[must_use]
    pub fn matches_across(&self, next: &Segment) -> BoundaryMatches<'_> {
        self.matches_across_from(next, 0)
    }

    /// Like [`matches_across`](Self::matches_across), but only matches
    /// starting at or after the absolute position `from`.
    #[must_use]
    pub fn matches_across_from(&self, next: &Segment, from: u64) -> BoundaryMatches<'_> {
        let boundary = next.start();
        if self.capacity == 0 || self.buffered == 0 {
            return BoundaryMatches::empty(&self.pattern, boundary);
        }
        let head_stop = next.start().saturating_add(self.capacity as u64);
        let mut probe = self.buffered_bytes();
        probe.extend(next.bytes_between(next.start(), head_stop));

        let origin = boundary.saturating_sub(self.buffered as u64);
        let index = usize::try_from(from.saturating_sub(origin)).unwrap_or(usize::MAX);
        BoundaryMatches {
            pattern: &self.pattern,
            probe,
            origin,
            boundary,
            index,
        }
    }
}

/// Non-overlapping matches in a boundary probe, as absolute positions of
/// their first byte, in increasing order.
#[derive(Debug, Clone)]
pub struct BoundaryMatches<'a> {
    pattern: &'a [u8],
    probe: Vec<u8>,
    origin: u64,
    boundary: u64,
    index: usize,
}

impl<'a> BoundaryMatches<'a> {
    fn empty(pattern: &'a [u8], boundary: u64) -> Self {
        Self {
            pattern,
            probe: Vec::new(),
            origin: boundary,
            boundary,
            index: 0,
        }
    }
}

impl Iterator for BoundaryMatches<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pattern.is_empty() {
            return None;
        }
        let rest = self.probe.get(self.index..)?;
        let found = self.index + find_in(rest, self.pattern)?;
        let position = self.origin + found as u64;
        if position >= self.boundary {
            // Entirely inside the next segment.
            self.index = self.probe.len();
            return None;
        }
        tracing::trace!(position, boundary = self.boundary, "match across boundary");
        self.index = found + self.pattern.len();
        Some(position)
    }
}
