//! Local graph repair before an edge is removed.
//!
//! When the edge X->Y is about to be deleted, X may lose overlaps that were
//! only implied through Y. The remodeler finds those overlaps and materialises
//! the minimal set of new edges for X, visiting candidates longest first so
//! that no new edge is transitive with respect to another edge of X.

use crate::edge::EdgeDesc;
use crate::error::{GraphError, GraphResult};
use crate::explore::{ExploreElement, ExplorePriorityQueue};
use crate::overlap::Overlap;
use crate::overlap_map::{add_overlaps_to_map, explore_transitive, EdgeDescOverlapMap, OverlapVisitor};
use crate::string_graph::{Edge, EdgeId, StringGraph, VertexId};
use crate::transitive::{calc_error_rate, is_error_rate_acceptable};
use log::{debug, trace};
use std::collections::HashSet;

/// Queues every overlap reachable through the doomed edge, marking
/// descriptors as seen when they are queued.
struct Frontier<'a> {
    queue: &'a mut ExplorePriorityQueue,
    seen: &'a mut HashSet<EdgeDesc>,
}

impl OverlapVisitor for Frontier<'_> {
    fn is_known(&self, ed: &EdgeDesc) -> bool {
        self.seen.contains(ed)
    }

    fn visit(&mut self, _graph: &StringGraph, ed: EdgeDesc, ovr: Overlap) -> bool {
        self.queue.push(ExploreElement::new(ed, ovr));
        self.seen.insert(ed);
        true
    }
}

/// Everything `vertex` reaches without `doomed`, at any quality, plus the
/// doomed overlap itself.
fn build_exclusion_set(graph: &StringGraph, vertex: VertexId, doomed: &Edge) -> EdgeDescOverlapMap {
    let mut exclusion = EdgeDescOverlapMap::new();
    exclusion.insert(doomed.desc(), *doomed.overlap());

    for edge in graph.edges(vertex) {
        if edge.id() == doomed.id() {
            continue;
        }
        let ed = edge.desc();
        let ovr = *edge.overlap();
        exclusion.entry(ed).or_insert(ovr);
        add_overlaps_to_map(graph, vertex, &ed, &ovr, 1.0, 0, &mut exclusion);
    }
    exclusion
}

/// Add the edges `vertex` needs so that deleting `delete_edge` loses no
/// overlap that passes the graph's thresholds. Returns the new edges that
/// start at `vertex`.
///
/// Must be called before `delete_edge` is removed; the edge itself is left
/// in place. Panics if `delete_edge` does not start at `vertex`, if an
/// overlap to be materialised is a containment, or if the graph creates an
/// edge other than the one requested.
pub fn remodel_vertex_for_excision(
    graph: &mut StringGraph,
    vertex: VertexId,
    delete_edge: EdgeId,
) -> GraphResult<Vec<EdgeId>> {
    let doomed = *graph
        .edge(delete_edge)
        .ok_or(GraphError::UnknownEdge(delete_edge))?;
    assert_eq!(
        doomed.start(),
        vertex,
        "edge {} does not start at vertex {}",
        delete_edge,
        vertex
    );
    let ed_xy = doomed.desc();
    let ovr_xy = *doomed.overlap();

    let mut exclusion = build_exclusion_set(graph, vertex, &doomed);

    let mut queue = ExplorePriorityQueue::new();
    let mut seen: HashSet<EdgeDesc> = exclusion.keys().copied().collect();
    explore_transitive(
        graph,
        vertex,
        &ed_xy,
        &ovr_xy,
        &mut Frontier {
            queue: &mut queue,
            seen: &mut seen,
        },
    );
    debug!(
        "[remodel] vertex {} losing {}: {} excluded, {} candidates",
        vertex,
        ed_xy,
        exclusion.len(),
        queue.len()
    );

    let mut created = Vec::new();
    while let Some(elem) = queue.pop() {
        // Reachable through some other edge already, so it would be transitive.
        if exclusion.contains_key(&elem.ed) {
            continue;
        }

        let error_rate = calc_error_rate(
            graph.sequence(vertex),
            graph.sequence(elem.ed.vertex),
            &elem.ovr,
        );
        if elem.length() < graph.min_overlap()
            || !is_error_rate_acceptable(error_rate, graph.max_error_rate())
        {
            continue;
        }

        // Chains of dovetails only imply dovetails.
        assert!(
            !elem.ovr.is_containment(),
            "vertex {}: inferred overlap {} is a containment",
            vertex,
            elem.ovr
        );
        let id = graph.create_edges(&elem.ovr, false)?;
        let desc = graph.edge(id).map(|e| e.desc());
        assert_eq!(desc, Some(elem.ed), "created edge {id} does not match its overlap");
        trace!("[remodel] vertex {}: new edge {} ({})", vertex, elem.ed, elem.ovr);
        created.push(id);

        add_overlaps_to_map(graph, vertex, &elem.ed, &elem.ovr, 1.0, 0, &mut exclusion);
    }
    Ok(created)
}

/// Remodel `vertex` for the loss of `edge`, then delete the edge and its
/// twin.
pub fn excise_edge(
    graph: &mut StringGraph,
    vertex: VertexId,
    edge: EdgeId,
) -> GraphResult<Vec<EdgeId>> {
    let created = remodel_vertex_for_excision(graph, vertex, edge)?;
    graph.delete_edge(edge)?;
    Ok(created)
}

/// Remove `vertex` from the graph, first remodelling each neighbour so that
/// overlaps implied through `vertex` survive as direct edges.
pub fn excise_vertex(graph: &mut StringGraph, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
    if !graph.contains_vertex(vertex) {
        return Err(GraphError::UnknownVertex(vertex));
    }
    let incident: Vec<(VertexId, EdgeId)> = graph
        .edges(vertex)
        .into_iter()
        .filter(|e| e.end() != vertex)
        .map(|e| (e.end(), e.twin()))
        .collect();

    let mut created = Vec::new();
    for (neighbor, twin) in incident {
        if graph.contains_edge(twin) {
            created.extend(excise_edge(graph, neighbor, twin)?);
        }
    }
    graph.delete_vertex(vertex)?;
    debug!("[remodel] excised vertex {}, {} new edges", vertex, created.len());
    Ok(created)
}
