//! Ordered set of byte spans already claimed by a match.
//!
//! The exact, fuzzy and partial passes run in that order over one shared
//! `ClaimedSpans`; each pass consults it before accepting a candidate and
//! extends it afterwards, which is what gives stricter passes priority.

use std::ops::Range;

/// Disjoint byte ranges, sorted by start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedSpans {
    spans: Vec<Range<usize>>,
}

impl ClaimedSpans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `span` intersects any claimed span.
    pub fn overlaps(&self, span: &Range<usize>) -> bool {
        if span.start >= span.end {
            return false;
        }
        // Claimed spans are disjoint and sorted, so only the last one starting
        // before `span.end` can reach into `span`.
        let idx = self.spans.partition_point(|s| s.start < span.end);
        idx > 0 && self.spans[idx - 1].end > span.start
    }

    /// Claim `span` unless it overlaps an existing one. Returns whether it was claimed.
    pub fn try_claim(&mut self, span: Range<usize>) -> bool {
        if span.start >= span.end || self.overlaps(&span) {
            return false;
        }
        let idx = self.spans.partition_point(|s| s.start < span.start);
        self.spans.insert(idx, span);
        true
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range<usize>> {
        self.spans.iter()
    }
}
