use crate::edge::EdgeDesc;
use crate::overlap::Overlap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An overlap waiting to be processed. Longer overlaps compare greater;
/// among equal lengths the smaller descriptor wins, so a [`BinaryHeap`] of
/// elements pops in a deterministic longest-first order.
#[derive(Debug, Clone, Copy)]
pub struct ExploreElement {
    pub ed: EdgeDesc,
    pub ovr: Overlap,
    length: usize,
}

impl ExploreElement {
    pub fn new(ed: EdgeDesc, ovr: Overlap) -> Self {
        ExploreElement {
            ed,
            ovr,
            length: ovr.min_overlap_length(),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl PartialEq for ExploreElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExploreElement {}

impl PartialOrd for ExploreElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExploreElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length
            .cmp(&other.length)
            .then_with(|| other.ed.cmp(&self.ed))
    }
}

/// Longest-overlap-first frontier
pub type ExplorePriorityQueue = BinaryHeap<ExploreElement>;
