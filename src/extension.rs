use crate::overlap_map::construct_complete_overlap_map;
use crate::sequence::{reverse, reverse_complement};
use crate::string_graph::{StringGraph, VertexId};
use log::trace;

/// Overlapping sequence of every vertex in the complete overlap set of a
/// vertex, split by the end they overlap and read outwards from it:
/// right-end sequences are reversed so both lists start at the vertex's
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapExtensions {
    pub left: Vec<Vec<u8>>,
    pub right: Vec<Vec<u8>>,
}

/// Collect the overlapping sequences of `vertex` over all overlaps reachable
/// from it, regardless of quality. Overlaps that reach neither end of
/// `vertex` are skipped.
pub fn collect_extensions(graph: &StringGraph, vertex: VertexId) -> OverlapExtensions {
    let mut out = OverlapExtensions::default();
    for (ed, ovr) in construct_complete_overlap_map(graph, vertex, 1.0, 0) {
        let mut overlapped = ovr.extract_substring(1, graph.sequence(ed.vertex)).to_vec();
        if ovr.is_reverse_complement() {
            overlapped = reverse_complement(&overlapped);
        }

        if ovr.side_is_right_extreme(0) {
            out.right.push(reverse(&overlapped));
        } else if ovr.side_is_left_extreme(0) {
            out.left.push(overlapped);
        } else {
            trace!("[extension] vertex {}: skipping internal overlap {}", vertex, ovr);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::{Match, Overlap};
    use crate::seq_coord::SeqCoord;
    use crate::string_graph::GraphParams;

    const GENOME: &[u8] = b"CCTAGGATCGGTACCATGCAAGTTCGAGCTTAGGCATCCGATGGCTTAACGAGTCCATGTACCGGATTACGTAGCAAGGTCCTAGC";

    #[test]
    fn test_extensions_of_middle_read() {
        let mut graph = StringGraph::new(GraphParams::default());
        let r0 = graph.add_vertex("r0", GENOME[0..40].to_vec());
        let r1 = graph.add_vertex("r1", GENOME[10..50].to_vec());
        // r2 is stored on the reverse strand.
        let r2 = graph.add_vertex("r2", reverse_complement(&GENOME[20..60]));

        let c = |s, e| SeqCoord::new(s, e, 40);
        graph
            .create_edges(&Overlap::new(r0, r1, Match::new(c(10, 39), c(0, 29), false)), false)
            .unwrap();
        graph
            .create_edges(&Overlap::new(r1, r2, Match::new(c(10, 39), c(10, 39), true)), false)
            .unwrap();

        let ext = collect_extensions(&graph, r1);
        assert_eq!(ext.left, vec![GENOME[10..40].to_vec()]);
        assert_eq!(ext.right, vec![reverse(&GENOME[20..50])]);
    }
}
