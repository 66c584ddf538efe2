use bytes::Bytes;

use super::{find_in, to_usize, Content, SAMPLE_TEXT};

/// Rotates `pattern` left by `phase` bytes.
///
/// The result is the pattern as seen when reading starts `phase` bytes into
/// it: `rotate(b"abcd", 1) == b"bcda"`. `phase` is taken modulo the pattern
/// length; an empty pattern stays empty.
#[must_use]
pub fn rotate(pattern: &[u8], phase: usize) -> Vec<u8> {
    if pattern.is_empty() {
        return Vec::new();
    }
    let split = phase % pattern.len();
    let mut rotated = Vec::with_capacity(pattern.len());
    rotated.extend_from_slice(&pattern[split..]);
    rotated.extend_from_slice(&pattern[..split]);
    rotated
}

/// A segment whose content is `pattern` repeated and truncated to `size`.
///
/// The pattern is anchored at the segment's own start: local offset `i`
/// holds `pattern[i % pattern.len()]`. Splitting off a right-hand part
/// rotates the pattern so the part reproduces the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicSegment {
    start: u64,
    size: u64,
    pattern: Bytes,
    // Three periods back to back: any window shorter than two periods is a
    // plain slice of this buffer.
    tripled: Bytes,
}

impl PeriodicSegment {
    /// Caller guarantees `size > 0`, a non-empty pattern and that
    /// `start + size` fits in `u64`.
    pub(crate) fn from_parts(start: u64, size: u64, pattern: Bytes) -> Self {
        let tripled = Bytes::from(pattern.repeat(3));
        Self {
            start,
            size,
            pattern,
            tripled,
        }
    }

    pub(crate) fn example(start: u64, size: u64) -> Self {
        Self::from_parts(start, size, Bytes::from_static(SAMPLE_TEXT))
    }

    #[must_use]
    pub fn pattern(&self) -> &Bytes {
        &self.pattern
    }

    fn period(&self) -> u64 {
        self.pattern.len() as u64
    }
}

impl Content for PeriodicSegment {
    fn start(&self) -> u64 {
        self.start
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn local_bytes(&self, lo: u64, hi: u64) -> Vec<u8> {
        let period = self.period();
        let length = hi - lo;
        let phase = to_usize(lo % period);
        if length < 2 * period {
            return self.tripled[phase..phase + to_usize(length)].to_vec();
        }

        let head = &self.pattern[phase..];
        let tail = &self.pattern[..to_usize(hi % period)];
        let whole_periods = (length - head.len() as u64 - tail.len() as u64) / period;

        let mut out = Vec::with_capacity(to_usize(length));
        out.extend_from_slice(head);
        for _ in 0..whole_periods {
            out.extend_from_slice(&self.pattern);
        }
        out.extend_from_slice(tail);
        out
    }

    fn local_find(&self, pattern: &[u8], lo: u64, hi: u64) -> Option<u64> {
        let needle_len = pattern.len() as u64;
        if hi - lo < needle_len {
            return None;
        }
        // Content repeats every period, so the first match (if any) starts
        // less than one period after `lo`.
        let period = self.period();
        let window = (hi - lo).min(period + needle_len.saturating_sub(1));
        let phase = to_usize(lo % period);
        let end = phase + to_usize(window);
        let found = if end <= self.tripled.len() {
            find_in(&self.tripled[phase..end], pattern)
        } else {
            find_in(&self.local_bytes(lo, lo + window), pattern)
        };
        found.map(|i| lo + i as u64)
    }

    fn head(&self, len: u64) -> Self {
        Self {
            start: self.start,
            size: len,
            pattern: self.pattern.clone(),
            tripled: self.tripled.clone(),
        }
    }

    fn tail(&self, offset: u64) -> Self {
        let phase = to_usize(offset % self.period());
        let pattern = Bytes::from(rotate(&self.pattern, phase));
        Self::from_parts(self.start + offset, self.size - offset, pattern)
    }

    fn moved_to(&self, start: u64) -> Self {
        Self {
            start,
            size: self.size,
            pattern: self.pattern.clone(),
            tripled: self.tripled.clone(),
        }
    }
}
