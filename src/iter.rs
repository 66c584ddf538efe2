use std::collections::VecDeque;

use crate::chain::{Location, SegmentChain};
use crate::overlap::OverlapSearcher;

/// Lazy iterator over match positions in a `SegmentChain`.
///
/// Segments are visited in order starting with the one covering the search
/// start. At each segment the boundary with the previous one is probed
/// first, then the segment is searched on its own, then its tail is handed
/// to the overlap searcher. Positions come out in increasing order and never
/// overlap: after a match the search resumes at the match end.
///
/// This iterator implements `Clone`; a clone continues independently from
/// the same point.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    chain: &'a SegmentChain,
    overlap: OverlapSearcher,
    pending: VecDeque<u64>,
    index: usize,
    cursor: u64,
    stop: u64,
    end_position: bool,
    boundary_checked: bool,
    done: bool,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(
        chain: &'a SegmentChain,
        pattern: &[u8],
        start: u64,
        stop: u64,
        end_position: bool,
    ) -> Self {
        let stop = stop.min(chain.size());
        let (index, done) = match chain.locate(start) {
            Location::Within(index) => (index, pattern.is_empty() || start >= stop),
            Location::PastEnd => (0, true),
        };
        Self {
            chain,
            overlap: OverlapSearcher::new(pattern),
            pending: VecDeque::new(),
            index,
            cursor: start,
            stop,
            end_position,
            boundary_checked: false,
            done,
        }
    }

    fn pattern_len(&self) -> u64 {
        self.overlap.pattern().len() as u64
    }

    fn report(&self, position: u64) -> u64 {
        if self.end_position {
            position + self.pattern_len()
        } else {
            position
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(position) = self.pending.pop_front() {
                return Some(self.report(position));
            }
            if self.done {
                return None;
            }
            let Some(segment) = self.chain.segments().get(self.index) else {
                self.done = true;
                continue;
            };
            if segment.start() >= self.stop {
                self.done = true;
                continue;
            }
            let pattern_len = self.pattern_len();

            if !self.boundary_checked {
                self.boundary_checked = true;
                for position in self.overlap.matches_across_from(segment, self.cursor) {
                    if position + pattern_len > self.stop {
                        break;
                    }
                    self.pending.push_back(position);
                    self.cursor = position + pattern_len;
                }
                continue;
            }

            let lo = self.cursor.max(segment.start());
            let hi = self.stop.min(segment.stop());
            if lo <= hi {
                if let Some(position) = segment.find_between(self.overlap.pattern(), lo, hi) {
                    self.cursor = position + pattern_len;
                    return Some(self.report(position));
                }
            }
            self.overlap.feed(segment);
            self.index += 1;
            self.boundary_checked = false;
        }
    }
}
