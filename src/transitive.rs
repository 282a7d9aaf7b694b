//! Inference of X->Z overlaps from chained X->Y and Y->Z overlaps.

use crate::edge::EdgeDesc;
use crate::overlap::{Match, Overlap};
use crate::string_graph::StringGraph;

/// Descriptor of the X->Z edge implied by X->Y and Y->Z.
pub fn infer_transitive_edge_desc(ed_xy: &EdgeDesc, ed_yz: &EdgeDesc) -> EdgeDesc {
    ed_xy.compose(ed_yz)
}

/// True if the parts of Y covered by the two overlaps intersect, i.e. X and
/// Z are implied to overlap each other.
pub fn has_transitive_overlap(ovr_xy: &Overlap, ovr_yz: &Overlap) -> bool {
    Match::matches_intersect(&ovr_xy.m.swap(), &ovr_yz.m)
}

/// Overlap between X and Z implied by X->Y and Y->Z, expanded to canonical
/// bounds. `None` exactly when [`has_transitive_overlap`] is false.
pub fn infer_transitive_overlap(ovr_xy: &Overlap, ovr_yz: &Overlap) -> Option<Overlap> {
    let m_xz = Match::infer(&ovr_xy.m.swap(), &ovr_yz.m)?.expand();
    Some(Overlap::new(ovr_xy.id[0], ovr_yz.id[1], m_xz))
}

/// Fraction of differing bases between the two sequences over the overlap.
/// `x` is side 0 of `ovr`.
pub fn calc_error_rate(x: &[u8], z: &[u8], ovr: &Overlap) -> f64 {
    let diffs = ovr.count_differences(x, z);
    diffs as f64 / ovr.min_overlap_length() as f64
}

/// Error rate of `ovr` computed on the sequences of the vertices it names
pub fn overlap_error_rate(graph: &StringGraph, ovr: &Overlap) -> f64 {
    calc_error_rate(graph.sequence(ovr.id[0]), graph.sequence(ovr.id[1]), ovr)
}

pub fn is_error_rate_acceptable(error_rate: f64, max_error_rate: f64) -> bool {
    error_rate <= max_error_rate
}

/// Acceptance predicate shared by every inference site.
pub fn is_acceptable(error_rate: f64, length: usize, max_error_rate: f64, min_length: usize) -> bool {
    is_error_rate_acceptable(error_rate, max_error_rate) && length >= min_length
}
