//! Overlap algebra.
//!
//! A [`Match`] is an ungapped correspondence between an interval on one
//! sequence (side 0) and an interval of the same length on another (side 1),
//! optionally with side 1 read on the opposite strand. An [`Overlap`] ties a
//! match to the two graph vertices it was computed between.

use crate::edge::{EdgeComp, EdgeDir};
use crate::seq_coord::SeqCoord;
use crate::sequence::{count_mismatches, reverse_complement};
use crate::string_graph::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub coord: [SeqCoord; 2],
    pub is_reverse: bool,
}

impl Match {
    pub fn new(c0: SeqCoord, c1: SeqCoord, is_reverse: bool) -> Self {
        debug_assert_eq!(
            c0.length(),
            c1.length(),
            "match sides differ in length: {c0} vs {c1}"
        );
        Match {
            coord: [c0, c1],
            is_reverse,
        }
    }

    /// The same match with the two sides interchanged
    pub fn swap(&self) -> Self {
        Match {
            coord: [self.coord[1], self.coord[0]],
            is_reverse: self.is_reverse,
        }
    }

    pub fn min_overlap_length(&self) -> usize {
        self.coord[0].length().min(self.coord[1].length())
    }

    /// Map a position inside the side-0 interval onto side 1.
    fn translate(&self, pos: usize) -> usize {
        let t = pos - self.coord[0].start;
        if self.is_reverse {
            self.coord[1].end - t
        } else {
            self.coord[1].start + t
        }
    }

    /// Differences between the aligned substrings of `seq0` and `seq1`.
    pub fn count_differences(&self, seq0: &[u8], seq1: &[u8]) -> usize {
        let s0 = self.coord[0].substring(seq0);
        let s1 = self.coord[1].substring(seq1);
        if self.is_reverse {
            count_mismatches(s0, &reverse_complement(s1))
        } else {
            count_mismatches(s0, s1)
        }
    }

    /// True if the side-0 intervals of the two matches intersect.
    pub fn matches_intersect(a: &Match, b: &Match) -> bool {
        a.coord[0].intersect(&b.coord[0]).is_some()
    }

    /// Compose two matches that share side 0 (sequence Y) into a match between
    /// their side-1 sequences (X from `m_yx`, Z from `m_yz`).
    ///
    /// The result covers only the part of Y both matches agree on; call
    /// [`Match::expand`] to grow it to canonical bounds. Returns `None` when
    /// the two Y intervals do not intersect.
    pub fn infer(m_yx: &Match, m_yz: &Match) -> Option<Match> {
        let (start, end) = m_yx.coord[0].intersect(&m_yz.coord[0])?;

        let (xa, xb) = (m_yx.translate(start), m_yx.translate(end));
        let (za, zb) = (m_yz.translate(start), m_yz.translate(end));

        let x = SeqCoord::new(xa.min(xb), xa.max(xb), m_yx.coord[1].seq_len);
        let z = SeqCoord::new(za.min(zb), za.max(zb), m_yz.coord[1].seq_len);
        Some(Match::new(x, z, m_yx.is_reverse != m_yz.is_reverse))
    }

    /// Extend the match diagonally until, at both ends, one of the two sides
    /// reaches the extreme of its sequence.
    pub fn expand(&self) -> Self {
        let [mut a, mut b] = self.coord;
        let a_right = a.seq_len - 1 - a.end;
        let b_right = b.seq_len - 1 - b.end;

        if self.is_reverse {
            let left = a.start.min(b_right);
            a.start -= left;
            b.end += left;
            let right = a_right.min(b.start);
            a.end += right;
            b.start -= right;
        } else {
            let left = a.start.min(b.start);
            a.start -= left;
            b.start -= left;
            let right = a_right.min(b_right);
            a.end += right;
            b.end += right;
        }
        Match::new(a, b, self.is_reverse)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.coord[0],
            self.coord[1],
            if self.is_reverse { "rc" } else { "fw" }
        )
    }
}

/// A match between the sequences of two vertices, `id[0]` being side 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Overlap {
    pub id: [VertexId; 2],
    pub m: Match,
}

impl Overlap {
    pub fn new(id0: VertexId, id1: VertexId, m: Match) -> Self {
        Overlap { id: [id0, id1], m }
    }

    /// Overlap of fixed length `len` between the ends of two sequences, as
    /// implied by an adjacency record: `dir` selects the end of the first
    /// sequence and `comp` whether the second is read reverse complemented.
    pub fn from_adjacency(
        (x, x_len): (VertexId, usize),
        (y, y_len): (VertexId, usize),
        dir: EdgeDir,
        comp: EdgeComp,
        len: usize,
    ) -> Self {
        let prefix = |seq_len: usize| SeqCoord::new(0, len - 1, seq_len);
        let suffix = |seq_len: usize| prefix(seq_len).flip();

        let cx = match dir {
            EdgeDir::Sense => suffix(x_len),
            EdgeDir::Antisense => prefix(x_len),
        };
        // Y's overlapping end is on the far side of X's, unless Y is flipped.
        let cy = match (dir, comp) {
            (EdgeDir::Sense, EdgeComp::Same) | (EdgeDir::Antisense, EdgeComp::Reverse) => {
                prefix(y_len)
            }
            (EdgeDir::Antisense, EdgeComp::Same) | (EdgeDir::Sense, EdgeComp::Reverse) => {
                suffix(y_len)
            }
        };
        Overlap::new(x, y, Match::new(cx, cy, comp == EdgeComp::Reverse))
    }

    pub fn swap(&self) -> Self {
        Overlap {
            id: [self.id[1], self.id[0]],
            m: self.m.swap(),
        }
    }

    pub fn expand(&self) -> Self {
        Overlap {
            id: self.id,
            m: self.m.expand(),
        }
    }

    pub fn overlap_length(&self, side: usize) -> usize {
        self.m.coord[side].length()
    }

    pub fn min_overlap_length(&self) -> usize {
        self.m.min_overlap_length()
    }

    pub fn is_reverse_complement(&self) -> bool {
        self.m.is_reverse
    }

    pub fn side_is_left_extreme(&self, side: usize) -> bool {
        self.m.coord[side].is_left_extreme()
    }

    pub fn side_is_right_extreme(&self, side: usize) -> bool {
        self.m.coord[side].is_right_extreme()
    }

    pub fn side_is_contained(&self, side: usize) -> bool {
        self.m.coord[side].is_contained()
    }

    /// Either sequence lies entirely within the other
    pub fn is_containment(&self) -> bool {
        self.side_is_contained(0) || self.side_is_contained(1)
    }

    /// Direction of the edge leaving the vertex on `side`: overlaps at the
    /// end of that sequence extend it in the sense direction. Contained and
    /// internal sides have no direction.
    pub fn side_direction(&self, side: usize) -> Option<EdgeDir> {
        let coord = &self.m.coord[side];
        if coord.is_contained() || !coord.is_extreme() {
            None
        } else if coord.is_right_extreme() {
            Some(EdgeDir::Sense)
        } else {
            Some(EdgeDir::Antisense)
        }
    }

    pub fn extract_substring<'a>(&self, side: usize, seq: &'a [u8]) -> &'a [u8] {
        self.m.coord[side].substring(seq)
    }

    pub fn count_differences(&self, seq0: &[u8], seq1: &[u8]) -> usize {
        self.m.count_differences(seq0, seq1)
    }
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id[0], self.id[1], self.m)
    }
}
