//! Complete overlap sets.
//!
//! The complete overlap set of a vertex X holds, for every edge descriptor
//! reachable from X by chaining overlaps, the overlap implied between X and
//! the descriptor's vertex. Chains are followed away from X only, and an
//! inferred overlap is expanded further only if it is accepted.

use crate::edge::EdgeDesc;
use crate::overlap::Overlap;
use crate::string_graph::{Edge, StringGraph, VertexId};
use crate::transitive::{
    has_transitive_overlap, infer_transitive_edge_desc, infer_transitive_overlap, is_acceptable,
    overlap_error_rate,
};
use std::collections::BTreeMap;

/// One overlap per target/direction/strand, ordered by descriptor.
pub type EdgeDescOverlapMap = BTreeMap<EdgeDesc, Overlap>;

/// Receives the overlaps found while exploring outwards from a vertex.
pub(crate) trait OverlapVisitor {
    /// Known descriptors are neither inferred again nor explored through.
    fn is_known(&self, ed: &EdgeDesc) -> bool;

    /// Offer a newly inferred overlap. Returning true explores through it.
    fn visit(&mut self, graph: &StringGraph, ed: EdgeDesc, ovr: Overlap) -> bool;
}

struct Frame<'g> {
    ed_xy: EdgeDesc,
    ovr_xy: Overlap,
    neighbors: Vec<&'g Edge>,
    next: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g StringGraph, ed_xy: EdgeDesc, ovr_xy: Overlap) -> Self {
        Frame {
            ed_xy,
            ovr_xy,
            neighbors: graph.edges_in_dir(ed_xy.vertex, ed_xy.traversal_dir()),
            next: 0,
        }
    }
}

/// Depth-first walk from X through Y = `ed_xy.vertex`, inferring X->Z for
/// every neighbour Z of Y that lies further away from X.
///
/// An explicit stack replaces recursion; neighbours are visited in the same
/// order a recursive walk would visit them, so results do not depend on the
/// choice.
pub(crate) fn explore_transitive<V: OverlapVisitor>(
    graph: &StringGraph,
    x: VertexId,
    ed_xy: &EdgeDesc,
    ovr_xy: &Overlap,
    visitor: &mut V,
) {
    let mut stack = vec![Frame::new(graph, *ed_xy, *ovr_xy)];
    while let Some(frame) = stack.last_mut() {
        let Some(edge_yz) = frame.neighbors.get(frame.next).copied() else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        if edge_yz.end() == x {
            continue;
        }
        let ed_xz = infer_transitive_edge_desc(&frame.ed_xy, &edge_yz.desc());
        if visitor.is_known(&ed_xz) {
            continue;
        }

        let ovr_yz = edge_yz.overlap();
        if !has_transitive_overlap(&frame.ovr_xy, ovr_yz) {
            continue;
        }
        let Some(ovr_xz) = infer_transitive_overlap(&frame.ovr_xy, ovr_yz) else {
            continue;
        };
        if visitor.visit(graph, ed_xz, ovr_xz) {
            stack.push(Frame::new(graph, ed_xz, ovr_xz));
        }
    }
}

/// Collects accepted overlaps into a map.
struct ThresholdedMap<'m> {
    map: &'m mut EdgeDescOverlapMap,
    max_error_rate: f64,
    min_length: usize,
}

impl OverlapVisitor for ThresholdedMap<'_> {
    fn is_known(&self, ed: &EdgeDesc) -> bool {
        self.map.contains_key(ed)
    }

    fn visit(&mut self, graph: &StringGraph, ed: EdgeDesc, ovr: Overlap) -> bool {
        let error_rate = overlap_error_rate(graph, &ovr);
        if is_acceptable(error_rate, ovr.overlap_length(0), self.max_error_rate, self.min_length) {
            self.map.insert(ed, ovr);
            true
        } else {
            false
        }
    }
}

/// Add to `out` every overlap of X inferred through the edges of
/// Y = `ed_xy.vertex`, recursively. Descriptors already in `out` are left
/// untouched and not explored.
pub fn add_overlaps_to_map(
    graph: &StringGraph,
    x: VertexId,
    ed_xy: &EdgeDesc,
    ovr_xy: &Overlap,
    max_error_rate: f64,
    min_length: usize,
    out: &mut EdgeDescOverlapMap,
) {
    let mut visitor = ThresholdedMap {
        map: out,
        max_error_rate,
        min_length,
    };
    explore_transitive(graph, x, ed_xy, ovr_xy, &mut visitor);
}

/// Build the complete overlap set of `vertex`: its direct edges plus every
/// overlap reachable from them through accepted transitive inferences.
pub fn construct_complete_overlap_map(
    graph: &StringGraph,
    vertex: VertexId,
    max_error_rate: f64,
    min_length: usize,
) -> EdgeDescOverlapMap {
    let mut map = EdgeDescOverlapMap::new();
    for edge in graph.edges(vertex) {
        let ed = edge.desc();
        let ovr = *edge.overlap();
        map.entry(ed).or_insert(ovr);
        add_overlaps_to_map(graph, vertex, &ed, &ovr, max_error_rate, min_length, &mut map);
    }
    map
}
