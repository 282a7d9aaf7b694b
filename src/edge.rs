use crate::string_graph::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which end of a vertex's sequence an edge extends from.
///
/// `Sense` edges leave from the end of the sequence, `Antisense` edges from
/// its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeDir {
    Sense,
    Antisense,
}

impl EdgeDir {
    pub const ALL: [EdgeDir; 2] = [EdgeDir::Sense, EdgeDir::Antisense];

    pub fn flip(self) -> Self {
        match self {
            EdgeDir::Sense => EdgeDir::Antisense,
            EdgeDir::Antisense => EdgeDir::Sense,
        }
    }

    /// Direction from its numeric form in adjacency records
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(EdgeDir::Sense),
            1 => Some(EdgeDir::Antisense),
            _ => None,
        }
    }
}

/// Whether the target of an edge is read on the opposite strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeComp {
    Same,
    Reverse,
}

impl EdgeComp {
    pub const ALL: [EdgeComp; 2] = [EdgeComp::Same, EdgeComp::Reverse];

    pub fn from_reverse(is_reverse: bool) -> Self {
        if is_reverse {
            EdgeComp::Reverse
        } else {
            EdgeComp::Same
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(EdgeComp::Same),
            1 => Some(EdgeComp::Reverse),
            _ => None,
        }
    }

    /// Strand of a chain of two edges
    pub fn compose(self, other: EdgeComp) -> Self {
        match (self, other) {
            (EdgeComp::Same, EdgeComp::Same) | (EdgeComp::Reverse, EdgeComp::Reverse) => {
                EdgeComp::Same
            }
            (EdgeComp::Same, EdgeComp::Reverse) | (EdgeComp::Reverse, EdgeComp::Same) => {
                EdgeComp::Reverse
            }
        }
    }
}

/// Direction in which to leave Y to keep moving away from X, given the X->Y
/// edge's direction and strand.
pub fn correct_dir(dir: EdgeDir, comp: EdgeComp) -> EdgeDir {
    match comp {
        EdgeComp::Same => dir,
        EdgeComp::Reverse => dir.flip(),
    }
}

/// Identity of "the edge to `vertex` in direction `dir` with strand `comp`",
/// without its overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeDesc {
    pub vertex: VertexId,
    pub dir: EdgeDir,
    pub comp: EdgeComp,
}

impl EdgeDesc {
    pub fn new(vertex: VertexId, dir: EdgeDir, comp: EdgeComp) -> Self {
        EdgeDesc { vertex, dir, comp }
    }

    /// Direction to traverse out of the target vertex to continue the walk
    pub fn traversal_dir(&self) -> EdgeDir {
        correct_dir(self.dir, self.comp)
    }

    /// Descriptor of X->Z given X->Y (`self`) and Y->Z.
    pub fn compose(&self, ed_yz: &EdgeDesc) -> EdgeDesc {
        EdgeDesc {
            vertex: ed_yz.vertex,
            dir: self.dir,
            comp: self.comp.compose(ed_yz.comp),
        }
    }
}

impl fmt::Display for EdgeDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeDir::Sense => write!(f, "S"),
            EdgeDir::Antisense => write!(f, "A"),
        }
    }
}

impl fmt::Display for EdgeComp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeComp::Same => write!(f, "+"),
            EdgeComp::Reverse => write!(f, "-"),
        }
    }
}

impl fmt::Display for EdgeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.vertex, self.dir, self.comp)
    }
}
