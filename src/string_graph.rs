//! Arena-backed string graph.
//!
//! Vertices and edges live in append-only vectors addressed by [`VertexId`]
//! and [`EdgeId`]. Deleting an element only clears its bit in the liveness
//! bitmap, so a handle is never reused while something may still refer to it.

use crate::edge::{EdgeComp, EdgeDesc, EdgeDir};
use crate::error::{GraphError, GraphResult};
use crate::overlap::Overlap;
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable handle of a vertex in a [`StringGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    pub fn new(index: usize) -> Self {
        VertexId(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable handle of an edge in a [`StringGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(u32);

impl EdgeId {
    pub fn new(index: usize) -> Self {
        EdgeId(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A contig or read in the graph
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    name: String,
    sequence: Vec<u8>,
    edges: Vec<EdgeId>,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// A directed overlap edge. Its overlap has the start vertex on side 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    id: EdgeId,
    start: VertexId,
    end: VertexId,
    dir: EdgeDir,
    comp: EdgeComp,
    overlap: Overlap,
    twin: EdgeId,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    pub fn dir(&self) -> EdgeDir {
        self.dir
    }

    pub fn comp(&self) -> EdgeComp {
        self.comp
    }

    pub fn overlap(&self) -> &Overlap {
        &self.overlap
    }

    pub fn twin(&self) -> EdgeId {
        self.twin
    }

    pub fn desc(&self) -> EdgeDesc {
        EdgeDesc::new(self.end, self.dir, self.comp)
    }
}

/// Quality thresholds shared by every operation on a graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphParams {
    pub min_overlap: usize,
    pub max_error_rate: f64,
}

impl Default for GraphParams {
    fn default() -> Self {
        GraphParams {
            min_overlap: 0,
            max_error_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StringGraph {
    vertices: Vec<Vertex>,
    live_vertices: BitVec<u64, Lsb0>,
    edges: Vec<Edge>,
    live_edges: BitVec<u64, Lsb0>,
    names: HashMap<String, VertexId>,
    params: GraphParams,
}

impl StringGraph {
    pub fn new(params: GraphParams) -> Self {
        StringGraph {
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> GraphParams {
        self.params
    }

    pub fn min_overlap(&self) -> usize {
        self.params.min_overlap
    }

    pub fn max_error_rate(&self) -> f64 {
        self.params.max_error_rate
    }

    /// Add a vertex. Names are expected to be unique; a repeated name
    /// shadows the earlier vertex in [`StringGraph::vertex_by_name`].
    pub fn add_vertex(&mut self, name: impl Into<String>, sequence: Vec<u8>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        let name = name.into();
        self.names.insert(name.clone(), id);
        self.vertices.push(Vertex {
            id,
            name,
            sequence,
            edges: Vec::new(),
        });
        self.live_vertices.push(true);
        id
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.live_vertices.get(id.index()).is_some_and(|bit| *bit)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.live_edges.get(id.index()).is_some_and(|bit| *bit)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.contains_vertex(id).then(|| &self.vertices[id.index()])
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.names.get(name).and_then(|&id| self.vertex(id))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.contains_edge(id).then(|| &self.edges[id.index()])
    }

    /// Handles of all live vertices, in insertion order
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.live_vertices.iter_ones().map(VertexId::new)
    }

    pub fn num_vertices(&self) -> usize {
        self.live_vertices.count_ones()
    }

    /// Number of live edges; twins count separately
    pub fn num_edges(&self) -> usize {
        self.live_edges.count_ones()
    }

    /// Sequence of a live vertex.
    ///
    /// Panics on a dead handle: callers only hold handles they obtained
    /// from live edges of this graph.
    pub fn sequence(&self, id: VertexId) -> &[u8] {
        assert!(self.contains_vertex(id), "vertex {id} is not in the graph");
        &self.vertices[id.index()].sequence
    }

    /// Outgoing edges of `vertex`
    pub fn edges(&self, vertex: VertexId) -> Vec<&Edge> {
        self.vertex(vertex)
            .map(|v| v.edges.iter().map(|e| &self.edges[e.index()]).collect())
            .unwrap_or_default()
    }

    /// Outgoing edges of `vertex` extending it in direction `dir`
    pub fn edges_in_dir(&self, vertex: VertexId, dir: EdgeDir) -> Vec<&Edge> {
        self.edges(vertex)
            .into_iter()
            .filter(|e| e.dir == dir)
            .collect()
    }

    /// The edge of `vertex` matching a descriptor, if present
    pub fn find_edge(&self, vertex: VertexId, desc: &EdgeDesc) -> Option<&Edge> {
        self.edges(vertex).into_iter().find(|e| e.desc() == *desc)
    }

    /// Insert the edge pair implied by `overlap` and return the edge that
    /// starts at `overlap.id[0]`.
    ///
    /// Edge directions follow the end of each sequence the overlap touches.
    /// Containment overlaps are rejected unless `allow_contained` is set, in
    /// which case a contained side is given the sense direction when it
    /// touches the end of its sequence.
    pub fn create_edges(&mut self, overlap: &Overlap, allow_contained: bool) -> GraphResult<EdgeId> {
        let [x, y] = overlap.id;
        for id in overlap.id {
            if !self.contains_vertex(id) {
                return Err(GraphError::UnknownVertex(id));
            }
        }
        if overlap.is_containment() && !allow_contained {
            return Err(GraphError::ContainedOverlap(x, y));
        }

        let side_dir = |side: usize| {
            overlap.side_direction(side).or_else(|| {
                overlap.side_is_contained(side).then(|| {
                    if overlap.side_is_right_extreme(1 - side) {
                        EdgeDir::Antisense
                    } else {
                        EdgeDir::Sense
                    }
                })
            })
        };
        let (Some(dir_xy), Some(dir_yx)) = (side_dir(0), side_dir(1)) else {
            return Err(GraphError::UndirectedOverlap(x, y));
        };

        let comp = EdgeComp::from_reverse(overlap.is_reverse_complement());
        self.add_edge_pair(*overlap, dir_xy, dir_yx, comp)
    }

    /// Insert an edge from `overlap.id[0]` to `overlap.id[1]` together with
    /// its twin, using the given directions.
    pub fn add_edge_pair(
        &mut self,
        overlap: Overlap,
        dir_xy: EdgeDir,
        dir_yx: EdgeDir,
        comp: EdgeComp,
    ) -> GraphResult<EdgeId> {
        let [x, y] = overlap.id;
        for id in overlap.id {
            if !self.contains_vertex(id) {
                return Err(GraphError::UnknownVertex(id));
            }
        }

        let xy = EdgeId::new(self.edges.len());
        let yx = EdgeId::new(self.edges.len() + 1);
        self.edges.push(Edge {
            id: xy,
            start: x,
            end: y,
            dir: dir_xy,
            comp,
            overlap,
            twin: yx,
        });
        self.edges.push(Edge {
            id: yx,
            start: y,
            end: x,
            dir: dir_yx,
            comp,
            overlap: overlap.swap(),
            twin: xy,
        });
        self.live_edges.push(true);
        self.live_edges.push(true);
        self.vertices[x.index()].edges.push(xy);
        self.vertices[y.index()].edges.push(yx);
        Ok(xy)
    }

    /// Remove an edge and its twin
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let edge = *self.edge(id).ok_or(GraphError::UnknownEdge(id))?;
        for (e, owner) in [(edge.id, edge.start), (edge.twin, edge.end)] {
            self.live_edges.set(e.index(), false);
            self.vertices[owner.index()].edges.retain(|&other| other != e);
        }
        Ok(())
    }

    /// Remove a vertex and every edge incident to it
    pub fn delete_vertex(&mut self, id: VertexId) -> GraphResult<()> {
        if !self.contains_vertex(id) {
            return Err(GraphError::UnknownVertex(id));
        }
        let incident = self.vertices[id.index()].edges.clone();
        for e in incident {
            // A self-loop's twin goes with the first half.
            if self.contains_edge(e) {
                self.delete_edge(e)?;
            }
        }
        self.live_vertices.set(id.index(), false);
        let name = &self.vertices[id.index()].name;
        if self.names.get(name) == Some(&id) {
            self.names.remove(name);
        }
        Ok(())
    }

    /// Vertices with at most one edge in each direction
    pub fn non_branching_vertices(&self) -> Vec<VertexId> {
        self.vertex_ids()
            .filter(|&v| {
                EdgeDir::ALL
                    .iter()
                    .all(|&dir| self.edges_in_dir(v, dir).len() <= 1)
            })
            .collect()
    }

    /// Check that every live edge has a consistent live twin.
    pub fn validate(&self) -> GraphResult<()> {
        for id in self.live_edges.iter_ones().map(EdgeId::new) {
            let edge = &self.edges[id.index()];
            let twin = self.edge(edge.twin).ok_or_else(|| {
                GraphError::Inconsistent(format!("edge {id} has no twin"))
            })?;
            if twin.twin != id || twin.start != edge.end || twin.end != edge.start {
                return Err(GraphError::Inconsistent(format!(
                    "edge {id} and {} are not twins",
                    twin.id
                )));
            }
            if twin.comp != edge.comp || twin.overlap != edge.overlap.swap() {
                return Err(GraphError::Inconsistent(format!(
                    "edge {id} and its twin disagree on the overlap"
                )));
            }
            if !self.contains_vertex(edge.start) || !self.contains_vertex(edge.end) {
                return Err(GraphError::Inconsistent(format!(
                    "edge {id} references a deleted vertex"
                )));
            }
        }
        Ok(())
    }
}
