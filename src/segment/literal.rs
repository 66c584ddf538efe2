use bytes::Bytes;

use super::{find_in, to_usize, Content, SAMPLE_TEXT};

/// A segment whose bytes are stored explicitly.
///
/// A chain made only of literal segments is not fake at all, but splitting
/// and shifting still never copy the payload: parts share one `Bytes`
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSegment {
    start: u64,
    data: Bytes,
}

impl LiteralSegment {
    /// Caller guarantees a non-empty payload whose end fits in `u64`.
    pub(crate) fn from_parts(start: u64, data: Bytes) -> Self {
        Self { start, data }
    }

    /// Sample text repeated and truncated to `size` bytes.
    pub(crate) fn example(start: u64, size: u64) -> Self {
        let size = to_usize(size);
        let data: Vec<u8> = SAMPLE_TEXT.iter().copied().cycle().take(size).collect();
        Self::from_parts(start, Bytes::from(data))
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl Content for LiteralSegment {
    fn start(&self) -> u64 {
        self.start
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn local_bytes(&self, lo: u64, hi: u64) -> Vec<u8> {
        self.data
            .get(to_usize(lo)..to_usize(hi))
            .map(<[u8]>::to_vec)
            .unwrap_or_default()
    }

    fn local_find(&self, pattern: &[u8], lo: u64, hi: u64) -> Option<u64> {
        let haystack = self.data.get(to_usize(lo)..to_usize(hi))?;
        find_in(haystack, pattern).map(|i| lo + i as u64)
    }

    fn head(&self, len: u64) -> Self {
        Self::from_parts(self.start, self.data.slice(..to_usize(len)))
    }

    fn tail(&self, offset: u64) -> Self {
        Self::from_parts(self.start + offset, self.data.slice(to_usize(offset)..))
    }

    fn moved_to(&self, start: u64) -> Self {
        Self::from_parts(start, self.data.clone())
    }
}
