//! Immutable descriptors of contiguous byte ranges.
//!
//! A [`Segment`] covers `[start, stop)` of the logical byte sequence and
//! knows how to produce its bytes. Segments never change in place: cutting
//! one yields new segments, moving one yields a shifted copy.

mod homogeneous;
mod literal;
mod periodic;

use bytes::Bytes;

use crate::error::{Result, SegChainError};

pub use homogeneous::HomogeneousSegment;
pub use literal::LiteralSegment;
pub use periodic::{rotate, PeriodicSegment};

/// Text used to fill the example segments.
pub(crate) const SAMPLE_TEXT: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.\n\
Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris \
nisi ut aliquip ex ea commodo consequat.\n";

/// Byte-level behavior each segment variant provides.
///
/// Offsets passed to `local_*`, `head` and `tail` are relative to the
/// segment start and already validated by [`Segment`]:
/// `lo <= hi <= size`, `0 < len < size`, `0 < offset < size`.
pub(crate) trait Content: Sized {
    fn start(&self) -> u64;
    fn size(&self) -> u64;
    fn local_bytes(&self, lo: u64, hi: u64) -> Vec<u8>;
    /// First local offset `>= lo` where `pattern` lies entirely within `[lo, hi)`.
    fn local_find(&self, pattern: &[u8], lo: u64, hi: u64) -> Option<u64>;
    fn head(&self, len: u64) -> Self;
    fn tail(&self, offset: u64) -> Self;
    /// Same content, starting at `start`. Caller checks for overflow.
    fn moved_to(&self, start: u64) -> Self;
}

pub(crate) fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

pub(crate) fn find_in(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn checked_stop(start: u64, size: u64) -> Result<u64> {
    start
        .checked_add(size)
        .ok_or(SegChainError::OffsetOverflow { start, size })
}

/// The segment variants, used to build examples generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Literal,
    Homogeneous,
    Periodic,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [
        SegmentKind::Literal,
        SegmentKind::Homogeneous,
        SegmentKind::Periodic,
    ];
}

/// One contiguous, non-empty byte range of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(LiteralSegment),
    Homogeneous(HomogeneousSegment),
    Periodic(PeriodicSegment),
}

impl Segment {
    /// A segment holding `data` verbatim.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if `data` is empty, `OffsetOverflow` if the end
    /// offset does not fit in `u64`.
    pub fn literal(start: u64, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(SegChainError::InvariantViolation {
                reason: "segment must not be empty",
            });
        }
        checked_stop(start, data.len() as u64)?;
        Ok(Segment::Literal(LiteralSegment::from_parts(start, data)))
    }

    /// A segment of `size` copies of `byte`.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if `size` is zero, `OffsetOverflow` if the end
    /// offset does not fit in `u64`.
    pub fn homogeneous(start: u64, size: u64, byte: u8) -> Result<Self> {
        if size == 0 {
            return Err(SegChainError::InvariantViolation {
                reason: "segment must not be empty",
            });
        }
        checked_stop(start, size)?;
        Ok(Segment::Homogeneous(HomogeneousSegment::from_parts(
            start, size, byte,
        )))
    }

    /// A segment of `pattern` repeated and truncated to `size` bytes.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if `size` is zero or `pattern` is empty,
    /// `OffsetOverflow` if the end offset does not fit in `u64`.
    pub fn periodic(start: u64, size: u64, pattern: impl Into<Bytes>) -> Result<Self> {
        let pattern = pattern.into();
        if size == 0 {
            return Err(SegChainError::InvariantViolation {
                reason: "segment must not be empty",
            });
        }
        if pattern.is_empty() {
            return Err(SegChainError::InvariantViolation {
                reason: "periodic pattern must not be empty",
            });
        }
        checked_stop(start, size)?;
        Ok(Segment::Periodic(PeriodicSegment::from_parts(
            start, size, pattern,
        )))
    }

    /// An example segment of the given kind, for tests and demos.
    ///
    /// # Errors
    ///
    /// Same as the kind's constructor.
    pub fn example(kind: SegmentKind, start: u64, size: u64) -> Result<Self> {
        if size == 0 {
            return Err(SegChainError::InvariantViolation {
                reason: "segment must not be empty",
            });
        }
        checked_stop(start, size)?;
        Ok(match kind {
            SegmentKind::Literal => Segment::Literal(LiteralSegment::example(start, size)),
            SegmentKind::Homogeneous => {
                Segment::Homogeneous(HomogeneousSegment::example(start, size))
            }
            SegmentKind::Periodic => Segment::Periodic(PeriodicSegment::example(start, size)),
        })
    }

    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Literal(_) => SegmentKind::Literal,
            Segment::Homogeneous(_) => SegmentKind::Homogeneous,
            Segment::Periodic(_) => SegmentKind::Periodic,
        }
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        match self {
            Segment::Literal(s) => s.start(),
            Segment::Homogeneous(s) => s.start(),
            Segment::Periodic(s) => s.start(),
        }
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        match self {
            Segment::Literal(s) => s.size(),
            Segment::Homogeneous(s) => s.size(),
            Segment::Periodic(s) => s.size(),
        }
    }

    /// Position of the byte after the last byte of this segment.
    #[must_use]
    pub fn stop(&self) -> u64 {
        self.start() + self.size()
    }

    /// True if some part of `[start, stop)` lies inside this segment.
    ///
    /// A zero-length interval intersects only when strictly inside. Mere
    /// adjacency and reversed intervals never intersect.
    #[must_use]
    pub fn intersects(&self, start: u64, stop: u64) -> bool {
        if start > stop {
            return false;
        }
        if start == stop {
            return self.start() < start && start < self.stop();
        }
        start < self.stop() && self.start() < stop
    }

    #[must_use]
    pub fn intersects_segment(&self, other: &Segment) -> bool {
        self.intersects(other.start(), other.stop())
    }

    /// Whether an insertion or deletion at `index` splits, slices or moves
    /// this segment.
    #[must_use]
    pub fn affected_by(&self, index: u64) -> bool {
        index < self.stop()
    }

    /// What remains after removing `[start, stop)`: the left part if `start`
    /// is inside, the right part if `stop` is inside, nothing if the range
    /// covers the whole segment. Remainders keep their absolute positions.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if the range does not intersect this segment.
    pub fn cut(&self, start: u64, stop: u64) -> Result<Vec<Segment>> {
        if !self.intersects(start, stop) {
            return Err(self.invalid_range(start, stop));
        }
        let mut parts = Vec::with_capacity(2);
        if start > self.start() {
            parts.push(self.head(start - self.start()));
        }
        if stop < self.stop() {
            parts.push(self.tail(stop - self.start()));
        }
        Ok(parts)
    }

    /// Splits at `index` into the parts before and after it.
    ///
    /// # Errors
    ///
    /// `InvalidRange` unless `start <= index <= stop`.
    pub fn cut_at(&self, index: u64) -> Result<(Option<Segment>, Option<Segment>)> {
        if index < self.start() || index > self.stop() {
            return Err(self.invalid_range(index, index));
        }
        if index == self.start() {
            return Ok((None, Some(self.clone())));
        }
        if index == self.stop() {
            return Ok((Some(self.clone()), None));
        }
        let offset = index - self.start();
        Ok((Some(self.head(offset)), Some(self.tail(offset))))
    }

    /// The bytes in `[start, stop)`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` unless `self.start <= start <= stop <= self.stop`.
    pub fn substring(&self, start: u64, stop: u64) -> Result<Vec<u8>> {
        if !(self.start() <= start && start <= stop && stop <= self.stop()) {
            return Err(self.invalid_range(start, stop));
        }
        Ok(self.bytes_between(start, stop))
    }

    /// Position of the first occurrence of `pattern` within `[start, stop)`.
    ///
    /// The window is clamped to the segment. With `end_position` the position
    /// after the match is returned instead of the position of its first byte.
    ///
    /// # Errors
    ///
    /// `NotFound` if the pattern does not occur in the window.
    pub fn search(&self, pattern: &[u8], start: u64, stop: u64, end_position: bool) -> Result<u64> {
        let lo = start.max(self.start());
        let hi = stop.min(self.stop());
        let found = if lo <= hi {
            self.find_between(pattern, lo, hi)
        } else {
            None
        };
        match found {
            Some(pos) if end_position => Ok(pos + pattern.len() as u64),
            Some(pos) => Ok(pos),
            None => Err(SegChainError::NotFound { start, stop }),
        }
    }

    /// The same content starting at `start`.
    ///
    /// # Errors
    ///
    /// `OffsetOverflow` if the new end offset does not fit in `u64`.
    pub fn copy(&self, start: u64) -> Result<Segment> {
        checked_stop(start, self.size())?;
        Ok(match self {
            Segment::Literal(s) => Segment::Literal(s.moved_to(start)),
            Segment::Homogeneous(s) => Segment::Homogeneous(s.moved_to(start)),
            Segment::Periodic(s) => Segment::Periodic(s.moved_to(start)),
        })
    }

    /// The bytes from `pos` through the next newline, or to the segment end.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `pos` is not inside the segment.
    pub fn read_line(&self, pos: u64) -> Result<Vec<u8>> {
        if pos < self.start() || pos >= self.stop() {
            return Err(self.invalid_range(pos, pos));
        }
        let end = self
            .find_between(b"\n", pos, self.stop())
            .map_or(self.stop(), |p| p + 1);
        Ok(self.bytes_between(pos, end))
    }

    /// Materializes the whole segment.
    ///
    /// Allocates `size` bytes; bounding that is up to the caller.
    #[must_use]
    pub fn to_full_bytes(&self) -> Vec<u8> {
        self.bytes_between(self.start(), self.stop())
    }

    /// Bytes of `[lo, hi)` clamped to the segment.
    pub(crate) fn bytes_between(&self, lo: u64, hi: u64) -> Vec<u8> {
        let lo = lo.max(self.start()) - self.start();
        let hi = hi.min(self.stop()).saturating_sub(self.start());
        if lo >= hi {
            return Vec::new();
        }
        match self {
            Segment::Literal(s) => s.local_bytes(lo, hi),
            Segment::Homogeneous(s) => s.local_bytes(lo, hi),
            Segment::Periodic(s) => s.local_bytes(lo, hi),
        }
    }

    /// Absolute start of the first match lying entirely in `[lo, hi)`, which
    /// the caller has clamped to the segment.
    pub(crate) fn find_between(&self, pattern: &[u8], lo: u64, hi: u64) -> Option<u64> {
        let local_lo = lo - self.start();
        let local_hi = hi - self.start();
        let found = match self {
            Segment::Literal(s) => s.local_find(pattern, local_lo, local_hi),
            Segment::Homogeneous(s) => s.local_find(pattern, local_lo, local_hi),
            Segment::Periodic(s) => s.local_find(pattern, local_lo, local_hi),
        };
        found.map(|p| p + self.start())
    }

    fn head(&self, len: u64) -> Segment {
        match self {
            Segment::Literal(s) => Segment::Literal(s.head(len)),
            Segment::Homogeneous(s) => Segment::Homogeneous(s.head(len)),
            Segment::Periodic(s) => Segment::Periodic(s.head(len)),
        }
    }

    fn tail(&self, offset: u64) -> Segment {
        match self {
            Segment::Literal(s) => Segment::Literal(s.tail(offset)),
            Segment::Homogeneous(s) => Segment::Homogeneous(s.tail(offset)),
            Segment::Periodic(s) => Segment::Periodic(s.tail(offset)),
        }
    }

    fn invalid_range(&self, start: u64, stop: u64) -> SegChainError {
        SegChainError::InvalidRange {
            start,
            stop,
            segment_start: self.start(),
            segment_stop: self.stop(),
        }
    }
}

impl core::fmt::Display for Segment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}(start={}, stop={})", self.kind(), self.start(), self.stop())
    }
}
