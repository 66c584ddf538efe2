use super::{to_usize, Content};

/// A segment made of one byte value repeated `size` times.
///
/// Substrings are built directly from the byte and the length; searching is
/// arithmetic on the window size, never a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomogeneousSegment {
    start: u64,
    size: u64,
    byte: u8,
}

impl HomogeneousSegment {
    /// Caller guarantees `size > 0` and that `start + size` fits in `u64`.
    pub(crate) fn from_parts(start: u64, size: u64, byte: u8) -> Self {
        Self { start, size, byte }
    }

    pub(crate) fn example(start: u64, size: u64) -> Self {
        Self::from_parts(start, size, 0)
    }

    #[must_use]
    pub fn byte(&self) -> u8 {
        self.byte
    }
}

impl Content for HomogeneousSegment {
    fn start(&self) -> u64 {
        self.start
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn local_bytes(&self, lo: u64, hi: u64) -> Vec<u8> {
        vec![self.byte; to_usize(hi - lo)]
    }

    fn local_find(&self, pattern: &[u8], lo: u64, hi: u64) -> Option<u64> {
        if pattern.iter().any(|b| *b != self.byte) {
            return None;
        }
        if hi - lo < pattern.len() as u64 {
            return None;
        }
        Some(lo)
    }

    fn head(&self, len: u64) -> Self {
        Self::from_parts(self.start, len, self.byte)
    }

    fn tail(&self, offset: u64) -> Self {
        Self::from_parts(self.start + offset, self.size - offset, self.byte)
    }

    fn moved_to(&self, start: u64) -> Self {
        Self::from_parts(start, self.size, self.byte)
    }
}
