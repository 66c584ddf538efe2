use bytes::Bytes;

use crate::budget::MemoryBudget;
use crate::error::{Result, SegChainError};
use crate::iter::Matches;
use crate::segment::Segment;

/// What to put in a hole left between the end of the chain and a segment
/// written or inserted past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapFiller {
    /// Fill with one repeated byte.
    Byte(u8),
    /// Fill with a repeating pattern, anchored at the start of the hole.
    Pattern(Bytes),
    /// Refuse to create a hole.
    Reject,
}

impl Default for GapFiller {
    fn default() -> Self {
        GapFiller::Byte(0)
    }
}

/// Where a position falls in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Index of the segment covering the position.
    Within(usize),
    /// The position is at or after the end of the chain.
    PastEnd,
}

/// An ordered, gap-free sequence of segments describing one logical byte
/// sequence.
///
/// # Invariants
///
/// After every public operation:
/// - segments are sorted by start and adjoin: `segments[i].stop() == segments[i + 1].start()`;
/// - the first segment starts at 0;
/// - no segment is empty.
///
/// Mutation goes through `&mut self`; there is no internal locking.
#[derive(Debug, Clone, Default)]
pub struct SegmentChain {
    segments: Vec<Segment>,
    gap_filler: GapFiller,
    budget: Option<MemoryBudget>,
}

impl SegmentChain {
    /// An empty chain that fills holes with zero bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a chain by overwriting with each segment in turn, so later
    /// segments win where they overlap earlier ones.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the segments leave a hole and `gap_filler` is
    /// `GapFiller::Reject`.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Segment>,
        gap_filler: GapFiller,
    ) -> Result<Self> {
        let mut chain = Self {
            segments: Vec::new(),
            gap_filler,
            budget: None,
        };
        for segment in segments {
            chain.overwrite(segment)?;
        }
        Ok(chain)
    }

    /// Uses `budget` for this chain instead of the process-wide one.
    #[must_use]
    pub fn with_budget(mut self, budget: MemoryBudget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// The budget materializing operations are checked against.
    #[must_use]
    pub fn budget(&self) -> MemoryBudget {
        self.budget.unwrap_or_else(MemoryBudget::process)
    }

    /// Policy for holes left by writes past the end.
    #[must_use]
    pub fn gap_filler(&self) -> &GapFiller {
        &self.gap_filler
    }

    /// Logical length in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.segments.last().map_or(0, Segment::stop)
    }

    /// True if the chain holds no segments, i.e. its size is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order; they adjoin and the first starts at 0.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Finds the segment covering `pos` by binary search.
    #[must_use]
    pub fn locate(&self, pos: u64) -> Location {
        if pos >= self.size() {
            return Location::PastEnd;
        }
        Location::Within(self.segments.partition_point(|s| s.start() <= pos) - 1)
    }

    /// Index of the segment covering `pos`.
    ///
    /// # Errors
    ///
    /// `PositionBeyondEnd` if `pos >= size`.
    pub fn segment_containing(&self, pos: u64) -> Result<usize> {
        match self.locate(pos) {
            Location::Within(index) => Ok(index),
            Location::PastEnd => Err(SegChainError::PositionBeyondEnd {
                position: pos,
                size: self.size(),
            }),
        }
    }

    /// Segments from the one covering `pos` to the end.
    pub fn iter_from(&self, pos: u64) -> core::slice::Iter<'_, Segment> {
        match self.locate(pos) {
            Location::Within(index) => self.segments[index..].iter(),
            Location::PastEnd => self.segments[self.segments.len()..].iter(),
        }
    }

    /// Checks the chain invariants.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` naming the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        let mut expected_start = 0;
        for segment in &self.segments {
            if segment.size() == 0 {
                return Err(SegChainError::InvariantViolation {
                    reason: "chain contains an empty segment",
                });
            }
            if segment.start() != expected_start {
                return Err(SegChainError::InvariantViolation {
                    reason: "chain segments are not contiguous from 0",
                });
            }
            expected_start = segment.stop();
        }
        Ok(())
    }

    fn fill_gap(&self, start: u64, stop: u64) -> Result<Segment> {
        match &self.gap_filler {
            GapFiller::Byte(byte) => Segment::homogeneous(start, stop - start, *byte),
            GapFiller::Pattern(pattern) => Segment::periodic(start, stop - start, pattern.clone()),
            GapFiller::Reject => Err(SegChainError::InvariantViolation {
                reason: "segment is not contiguous with the chain",
            }),
        }
    }

    /// Places `segment` at or after the current end, filling any hole.
    fn extend_past_end(&mut self, segment: Segment) -> Result<()> {
        let size = self.size();
        if segment.start() > size {
            let gap = self.fill_gap(size, segment.start())?;
            self.segments.push(gap);
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Inserts `segment` at its start, moving every later byte right by its
    /// size.
    ///
    /// A segment starting at or past the end is appended, after a gap filler
    /// if needed.
    ///
    /// # Errors
    ///
    /// `OffsetOverflow` if the chain would grow past `u64::MAX`,
    /// `InvariantViolation` if a hole is needed and gaps are rejected.
    pub fn insert(&mut self, segment: Segment) -> Result<()> {
        let at = segment.start();
        let shift = segment.size();
        let Location::Within(first) = self.locate(at) else {
            self.extend_past_end(segment)?;
            tracing::debug!(at, segments = self.segments.len(), "inserted past end");
            return Ok(());
        };
        self.size()
            .checked_add(shift)
            .ok_or(SegChainError::OffsetOverflow {
                start: self.size(),
                size: shift,
            })?;

        let mut rebuilt = Vec::with_capacity(self.segments.len() - first + 2);
        let (before, after) = self.segments[first].cut_at(at)?;
        rebuilt.extend(before);
        rebuilt.push(segment);
        if let Some(after) = after {
            rebuilt.push(after.copy(after.start() + shift)?);
        }
        for moved in &self.segments[first + 1..] {
            rebuilt.push(moved.copy(moved.start() + shift)?);
        }
        self.segments.truncate(first);
        self.segments.extend(rebuilt);
        tracing::debug!(at, shift, segments = self.segments.len(), "inserted segment");
        Ok(())
    }

    /// Inserts `data` as a literal segment at `start`.
    ///
    /// # Errors
    ///
    /// As [`insert`](Self::insert), plus `InvariantViolation` for empty data.
    pub fn insert_literal(&mut self, start: u64, data: impl Into<Bytes>) -> Result<()> {
        self.insert(Segment::literal(start, data)?)
    }

    /// Removes `[start, stop)` and moves everything after it left.
    ///
    /// Ranges past the end are clamped; empty or reversed ranges and ranges
    /// starting at or past the end do nothing.
    ///
    /// # Errors
    ///
    /// Only on internal inconsistencies; a valid chain always succeeds.
    pub fn delete(&mut self, start: u64, stop: u64) -> Result<()> {
        let stop = stop.min(self.size());
        if start >= stop {
            return Ok(());
        }
        let Location::Within(first) = self.locate(start) else {
            return Ok(());
        };
        let removed = stop - start;

        let mut rebuilt = Vec::with_capacity(self.segments.len() - first + 1);
        for segment in &self.segments[first..] {
            if segment.start() >= stop {
                rebuilt.push(segment.copy(segment.start() - removed)?);
                continue;
            }
            for part in segment.cut(start, stop)? {
                if part.start() >= stop {
                    rebuilt.push(part.copy(part.start() - removed)?);
                } else {
                    rebuilt.push(part);
                }
            }
        }
        self.segments.truncate(first);
        self.segments.extend(rebuilt);
        tracing::debug!(start, stop, segments = self.segments.len(), "deleted range");
        Ok(())
    }

    /// Like [`delete`](Self::delete), returning the removed bytes.
    ///
    /// # Errors
    ///
    /// `MemoryBudgetExceeded` if the removed bytes do not fit the budget; the
    /// chain is left unchanged.
    pub fn delete_and_return(&mut self, start: u64, stop: u64) -> Result<Vec<u8>> {
        let removed = self.extract(start, stop)?;
        self.delete(start, stop)?;
        Ok(removed)
    }

    /// Replaces whatever occupies `[segment.start(), segment.stop())` with
    /// `segment`. Later bytes do not move; the chain grows only if the
    /// segment reaches past the end.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the segment starts past the end and gaps are
    /// rejected.
    pub fn overwrite(&mut self, segment: Segment) -> Result<()> {
        let (start, stop) = (segment.start(), segment.stop());
        let Location::Within(first) = self.locate(start) else {
            self.extend_past_end(segment)?;
            tracing::debug!(start, segments = self.segments.len(), "overwrote past end");
            return Ok(());
        };

        let mut left = Vec::with_capacity(1);
        let mut right = Vec::with_capacity(1);
        let mut last = first;
        for existing in &self.segments[first..] {
            if existing.start() >= stop {
                break;
            }
            last += 1;
            for part in existing.cut(start, stop)? {
                if part.stop() <= start {
                    left.push(part);
                } else {
                    right.push(part);
                }
            }
        }
        left.push(segment);
        left.extend(right);
        self.segments.splice(first..last, left).for_each(drop);
        tracing::debug!(start, stop, segments = self.segments.len(), "overwrote range");
        Ok(())
    }

    /// Like [`overwrite`](Self::overwrite), returning the replaced bytes.
    ///
    /// # Errors
    ///
    /// `MemoryBudgetExceeded` if the replaced bytes do not fit the budget;
    /// the chain is left unchanged.
    pub fn overwrite_and_return(&mut self, segment: Segment) -> Result<Vec<u8>> {
        let replaced = self.extract(segment.start(), segment.stop())?;
        self.overwrite(segment)?;
        Ok(replaced)
    }

    /// Adds `segment` right after the current end, whatever its start.
    ///
    /// # Errors
    ///
    /// `OffsetOverflow` if the chain would grow past `u64::MAX`.
    pub fn append(&mut self, segment: Segment) -> Result<()> {
        let size = self.size();
        let segment = if segment.start() == size {
            segment
        } else {
            segment.copy(size)?
        };
        self.segments.push(segment);
        tracing::debug!(size = self.size(), segments = self.segments.len(), "appended segment");
        Ok(())
    }

    /// Appends `data` as a literal segment.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` for empty data, `OffsetOverflow` on overflow.
    pub fn append_literal(&mut self, data: impl Into<Bytes>) -> Result<()> {
        self.append(Segment::literal(self.size(), data)?)
    }

    /// The bytes of `[start, stop)`, clamped to the chain like slicing a
    /// byte string: `start >= stop` yields nothing.
    ///
    /// # Errors
    ///
    /// `MemoryBudgetExceeded` if twice the clamped length exceeds the budget.
    pub fn extract(&self, start: u64, stop: u64) -> Result<Vec<u8>> {
        let stop = stop.min(self.size());
        if start >= stop {
            return Ok(Vec::new());
        }
        self.budget().check(stop - start)?;
        Ok(self.collect_range(start, stop))
    }

    /// Strided read with the index semantics of sequence slicing: negative
    /// indices count from the end, out-of-range indices clamp, and a negative
    /// `step` reads backwards.
    ///
    /// Bounds are `i128`: every `u64` position and its negation fit.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if `step` is zero, `MemoryBudgetExceeded` if the
    /// span covered by the slice does not fit the budget.
    pub fn extract_stepped(
        &self,
        start: Option<i128>,
        stop: Option<i128>,
        step: i64,
    ) -> Result<Vec<u8>> {
        let Some((lo, hi)) = crate::slice::forward_span(start, stop, step, self.size())? else {
            return Ok(Vec::new());
        };
        self.budget().check(hi - lo)?;
        let span = self.collect_range(lo, hi);
        Ok(crate::slice::stride(&span, step))
    }

    /// Materializes the whole chain.
    ///
    /// # Errors
    ///
    /// `MemoryBudgetExceeded` if the chain does not fit the budget.
    pub fn to_full_bytes(&self) -> Result<Vec<u8>> {
        self.extract(0, self.size())
    }

    /// Bytes from `pos` through the next newline, or to the end.
    ///
    /// # Errors
    ///
    /// `MemoryBudgetExceeded` if the line does not fit the budget.
    pub fn read_line(&self, pos: u64) -> Result<Vec<u8>> {
        let end = self
            .search(b"\n", pos, self.size(), true)
            .next()
            .unwrap_or_else(|| self.size());
        self.extract(pos, end)
    }

    /// Caller has clamped `[start, stop)` to the chain and checked the budget.
    fn collect_range(&self, start: u64, stop: u64) -> Vec<u8> {
        let mut out = Vec::with_capacity(crate::segment::to_usize(stop - start));
        for segment in self.iter_from(start) {
            if segment.start() >= stop {
                break;
            }
            out.extend(segment.bytes_between(start, stop));
        }
        out
    }

    /// Lazily yields the positions of non-overlapping occurrences of
    /// `pattern` in `[start, stop)`, in increasing order, including matches
    /// that span segment boundaries.
    ///
    /// After a match the search resumes at the match end. With
    /// `end_position` each item is the position after the match. An empty
    /// pattern yields nothing.
    #[must_use]
    pub fn search(&self, pattern: &[u8], start: u64, stop: u64, end_position: bool) -> Matches<'_> {
        Matches::new(self, pattern, start, stop, end_position)
    }

    /// First result of [`search`](Self::search).
    ///
    /// # Errors
    ///
    /// `NotFound` if there is no occurrence.
    pub fn index_of(&self, pattern: &[u8], start: u64, stop: u64, end_position: bool) -> Result<u64> {
        self.search(pattern, start, stop, end_position)
            .next()
            .ok_or(SegChainError::NotFound { start, stop })
    }

    fn delete_through_end(&self, start: u64, pattern: &[u8], count: usize, include_match: bool) -> u64 {
        self.search(pattern, start, self.size(), include_match)
            .nth(count - 1)
            .unwrap_or_else(|| self.size())
    }

    /// Deletes from `start` through the `count`-th occurrence of `pattern`
    /// (the match itself included only with `include_match`), or to the end
    /// if there are fewer occurrences. A zero `count` or an empty `pattern`
    /// does nothing.
    ///
    /// # Errors
    ///
    /// As [`delete`](Self::delete).
    pub fn delete_through(
        &mut self,
        start: u64,
        pattern: &[u8],
        count: usize,
        include_match: bool,
    ) -> Result<()> {
        if count == 0 || pattern.is_empty() {
            return Ok(());
        }
        let end = self.delete_through_end(start, pattern, count, include_match);
        self.delete(start, end)
    }

    /// Like [`delete_through`](Self::delete_through), returning the deleted
    /// bytes. A zero `count` or an empty `pattern` deletes nothing.
    ///
    /// # Errors
    ///
    /// `MemoryBudgetExceeded` if the deleted bytes do not fit the budget; the
    /// chain is left unchanged.
    pub fn delete_through_and_return(
        &mut self,
        start: u64,
        pattern: &[u8],
        count: usize,
        include_match: bool,
    ) -> Result<Vec<u8>> {
        if count == 0 || pattern.is_empty() {
            return Ok(Vec::new());
        }
        let end = self.delete_through_end(start, pattern, count, include_match);
        self.delete_and_return(start, end)
    }

    /// Deletes one line, newline included, starting at `start`.
    ///
    /// # Errors
    ///
    /// As [`delete`](Self::delete).
    pub fn delete_line(&mut self, start: u64) -> Result<()> {
        self.delete_through(start, b"\n", 1, true)
    }

    /// Deletes `count` lines starting at `start`.
    ///
    /// # Errors
    ///
    /// As [`delete`](Self::delete).
    pub fn delete_lines(&mut self, start: u64, count: usize) -> Result<()> {
        self.delete_through(start, b"\n", count, true)
    }
}
