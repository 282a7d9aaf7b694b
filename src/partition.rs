//! Irreducible/transitive partitioning of overlap sets.
//!
//! An overlap X->Z is transitive if some strictly longer overlap X->Y in the
//! same direction, together with the Y->Z overlap it implies, explains it
//! within the error and length thresholds. The test is computed from the
//! overlaps alone, not from the edges present in the graph, so it can be
//! re-run after overlaps have been corrected.

use crate::edge::{EdgeComp, EdgeDesc, EdgeDir};
use crate::error::GraphResult;
use crate::explore::{ExploreElement, ExplorePriorityQueue};
use crate::overlap::Overlap;
use crate::overlap_map::{construct_complete_overlap_map, EdgeDescOverlapMap};
use crate::string_graph::{EdgeId, StringGraph, VertexId};
use crate::transitive::{
    has_transitive_overlap, infer_transitive_overlap, is_acceptable, overlap_error_rate,
};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedOverlaps {
    pub irreducible: EdgeDescOverlapMap,
    pub transitive: EdgeDescOverlapMap,
}

impl PartitionedOverlaps {
    pub fn len(&self) -> usize {
        self.irreducible.len() + self.transitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.irreducible.is_empty() && self.transitive.is_empty()
    }
}

/// Is X->Z explained by the longer X->Y? `ovr_yx` is X->Y swapped.
fn is_explained_by(
    graph: &StringGraph,
    ovr_yx: &Overlap,
    ovr_xz: &Overlap,
    max_error_rate: f64,
    min_length: usize,
) -> bool {
    if !has_transitive_overlap(ovr_yx, ovr_xz) {
        return false;
    }
    let Some(ovr_yz) = infer_transitive_overlap(ovr_yx, ovr_xz) else {
        return false;
    };
    let error_rate = overlap_error_rate(graph, &ovr_yz);
    is_acceptable(error_rate, ovr_yz.overlap_length(0), max_error_rate, min_length)
}

/// Split the complete overlap set of `vertex` into irreducible and
/// transitive overlaps.
///
/// Overlaps are processed longest first. Every remaining irreducible overlap
/// in the same direction that is strictly shorter than the current one is
/// tested against it; the scan is exhaustive on purpose.
pub fn construct_partitioned_overlap_map(
    graph: &StringGraph,
    vertex: VertexId,
    max_error_rate: f64,
    min_length: usize,
) -> PartitionedOverlaps {
    let mut irreducible = construct_complete_overlap_map(graph, vertex, max_error_rate, min_length);
    let mut transitive = EdgeDescOverlapMap::new();

    let mut queue: ExplorePriorityQueue = irreducible
        .iter()
        .map(|(ed, ovr)| ExploreElement::new(*ed, *ovr))
        .collect();

    while let Some(elem) = queue.pop() {
        let (ed_xy, ovr_xy) = (elem.ed, elem.ovr);
        if !irreducible.contains_key(&ed_xy) {
            continue;
        }

        let ovr_yx = ovr_xy.swap();
        let explained: Vec<EdgeDesc> = irreducible
            .iter()
            .filter(|(ed_xz, ovr_xz)| {
                **ed_xz != ed_xy
                    && ed_xz.dir == ed_xy.dir
                    && ovr_xy.overlap_length(0) > ovr_xz.overlap_length(0)
            })
            .filter(|(_, ovr_xz)| is_explained_by(graph, &ovr_yx, ovr_xz, max_error_rate, min_length))
            .map(|(ed_xz, _)| *ed_xz)
            .collect();

        for ed_xz in explained {
            if let Some(ovr_xz) = irreducible.remove(&ed_xz) {
                transitive.insert(ed_xz, ovr_xz);
            }
        }
    }

    debug!(
        "[partition] vertex {}: {} irreducible, {} transitive",
        vertex,
        irreducible.len(),
        transitive.len()
    );
    PartitionedOverlaps {
        irreducible,
        transitive,
    }
}

/// Partition every live vertex of the graph in parallel.
///
/// Workers only read the graph. Results are returned in vertex order.
pub fn partition_all(
    graph: &StringGraph,
    max_error_rate: f64,
    min_length: usize,
) -> Vec<(VertexId, PartitionedOverlaps)> {
    let vertices: Vec<VertexId> = graph.vertex_ids().collect();
    vertices
        .par_iter()
        .map(|&v| {
            (
                v,
                construct_partitioned_overlap_map(graph, v, max_error_rate, min_length),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimplifyStats {
    pub vertices: usize,
    pub edges_before: usize,
    pub transitive_edges_removed: usize,
    pub edges_after: usize,
}

/// Remove every edge that the partition of its start vertex classifies as
/// transitive, using the graph's own thresholds.
///
/// Partitioning runs in parallel against the unmodified graph; deletions are
/// applied afterwards on a single thread.
pub fn simplify_graph(graph: &mut StringGraph) -> GraphResult<SimplifyStats> {
    let params = graph.params();
    let edges_before = graph.num_edges();
    info!(
        "Partitioning {} vertices (min overlap {}, max error rate {})",
        graph.num_vertices(),
        params.min_overlap,
        params.max_error_rate
    );

    let view: &StringGraph = graph;
    let partitions = partition_all(view, params.max_error_rate, params.min_overlap);
    let doomed: Vec<EdgeId> = partitions
        .iter()
        .flat_map(|(v, p)| {
            p.transitive
                .keys()
                .filter_map(move |ed| view.find_edge(*v, ed).map(|e| e.id()))
        })
        .collect();

    let mut removed = 0;
    for id in doomed {
        // The twin may already be gone with its partner.
        if graph.contains_edge(id) {
            graph.delete_edge(id)?;
            removed += 1;
        }
    }

    let stats = SimplifyStats {
        vertices: graph.num_vertices(),
        edges_before,
        transitive_edges_removed: removed,
        edges_after: graph.num_edges(),
    };
    info!(
        "Removed {} transitive edge pairs ({} -> {} edges)",
        removed, stats.edges_before, stats.edges_after
    );
    Ok(stats)
}

/// One overlap of a partition, described by vertex names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapReport {
    pub target: String,
    pub dir: EdgeDir,
    pub comp: EdgeComp,
    pub length: usize,
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionReport {
    pub vertex: String,
    pub irreducible: Vec<OverlapReport>,
    pub transitive: Vec<OverlapReport>,
}

impl PartitionReport {
    pub fn new(graph: &StringGraph, vertex: VertexId, partition: &PartitionedOverlaps) -> Self {
        let describe = |map: &EdgeDescOverlapMap| {
            map.iter()
                .map(|(ed, ovr)| OverlapReport {
                    target: graph
                        .vertex(ed.vertex)
                        .map(|v| v.name().to_string())
                        .unwrap_or_else(|| ed.vertex.to_string()),
                    dir: ed.dir,
                    comp: ed.comp,
                    length: ovr.min_overlap_length(),
                    error_rate: overlap_error_rate(graph, ovr),
                })
                .collect::<Vec<_>>()
        };
        PartitionReport {
            vertex: graph
                .vertex(vertex)
                .map(|v| v.name().to_string())
                .unwrap_or_else(|| vertex.to_string()),
            irreducible: describe(&partition.irreducible),
            transitive: describe(&partition.transitive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::Match;
    use crate::seq_coord::SeqCoord;
    use crate::string_graph::GraphParams;

    const GENOME: &[u8] = b"TTGACCGTAGGCATCGATCGGATTCAGCTAGCATGCAAGTCCGATTGCAGGCTAACGTTAGCCGATACGGTACCATGGTACGTTAGC";

    fn read_graph(offsets: &[usize], len: usize) -> (StringGraph, Vec<VertexId>) {
        let mut graph = StringGraph::new(GraphParams {
            min_overlap: 10,
            max_error_rate: 0.0,
        });
        let ids: Vec<_> = offsets
            .iter()
            .enumerate()
            .map(|(i, &p)| graph.add_vertex(format!("r{i}"), GENOME[p..p + len].to_vec()))
            .collect();
        // Every pair of overlapping reads gets an edge.
        for i in 0..offsets.len() {
            for j in i + 1..offsets.len() {
                let shift = offsets[j] - offsets[i];
                if shift >= len {
                    continue;
                }
                let ovr = Overlap::new(
                    ids[i],
                    ids[j],
                    Match::new(
                        SeqCoord::new(shift, len - 1, len),
                        SeqCoord::new(0, len - 1 - shift, len),
                        false,
                    ),
                );
                graph.create_edges(&ovr, false).unwrap();
            }
        }
        (graph, ids)
    }

    #[test]
    fn test_partition_keeps_nearest_neighbour() {
        let (graph, ids) = read_graph(&[0, 10, 20, 30], 40);
        let p = construct_partitioned_overlap_map(&graph, ids[0], 0.0, 10);

        let irreducible: Vec<_> = p.irreducible.keys().map(|ed| ed.vertex).collect();
        let transitive: Vec<_> = p.transitive.keys().map(|ed| ed.vertex).collect();
        assert_eq!(irreducible, vec![ids[1]]);
        assert_eq!(transitive, vec![ids[2], ids[3]]);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let (graph, ids) = read_graph(&[0, 10, 20, 30], 40);
        for &v in &ids {
            let complete = construct_complete_overlap_map(&graph, v, 0.0, 10);
            let p = construct_partitioned_overlap_map(&graph, v, 0.0, 10);
            assert_eq!(p.len(), complete.len());
            for ed in complete.keys() {
                assert!(p.irreducible.contains_key(ed) ^ p.transitive.contains_key(ed));
            }
        }
    }

    #[test]
    fn test_partition_is_idempotent() {
        let (graph, ids) = read_graph(&[0, 10, 20, 30], 40);
        let first = construct_partitioned_overlap_map(&graph, ids[1], 0.0, 10);
        let second = construct_partitioned_overlap_map(&graph, ids[1], 0.0, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_transitivity_needs_long_enough_implied_overlap() {
        // r1 and r2 overlap by 35 bases.
        let (graph, ids) = read_graph(&[0, 25, 30], 40);
        let p = construct_partitioned_overlap_map(&graph, ids[0], 0.0, 36);
        assert!(p.transitive.is_empty());
        assert_eq!(p.irreducible.len(), 2);

        let p = construct_partitioned_overlap_map(&graph, ids[0], 0.0, 10);
        let transitive: Vec<_> = p.transitive.keys().map(|ed| ed.vertex).collect();
        assert_eq!(transitive, vec![ids[2]]);
    }

    #[test]
    fn test_simplify_graph_removes_transitive_edges() {
        let (mut graph, ids) = read_graph(&[0, 10, 20, 30], 40);
        assert_eq!(graph.num_edges(), 12);

        let stats = simplify_graph(&mut graph).unwrap();
        assert_eq!(stats.transitive_edges_removed, 3);
        assert_eq!(graph.num_edges(), 6);
        assert!(graph.validate().is_ok());
        assert_eq!(graph.non_branching_vertices(), ids);
    }

    #[test]
    fn test_partition_report_names() {
        let (graph, ids) = read_graph(&[0, 10, 20], 40);
        let p = construct_partitioned_overlap_map(&graph, ids[0], 0.0, 10);
        let report = PartitionReport::new(&graph, ids[0], &p);
        assert_eq!(report.vertex, "r0");
        assert_eq!(report.irreducible[0].target, "r1");
        assert_eq!(report.transitive[0].target, "r2");
        assert_eq!(report.transitive[0].length, 20);
    }
}
