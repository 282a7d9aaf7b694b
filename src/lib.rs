//! Transitive overlap inference and reduction for sequence-assembly string
//! graphs.
//!
//! Vertices are reads or contigs and edges are bidirected overlaps. From the
//! edges actually present, the crate infers every overlap a vertex has with
//! vertices reachable through chains of edges, partitions those overlaps into
//! irreducible and transitive ones, and repairs a vertex's neighbourhood
//! before one of its edges is deleted.

pub mod cli;
pub mod edge;
pub mod error;
pub mod explore;
pub mod extension;
pub mod loader;
pub mod overlap;
pub mod overlap_map;
pub mod partition;
pub mod remodel;
pub mod seq_coord;
pub mod sequence;
pub mod string_graph;
pub mod transitive;

pub use edge::{EdgeComp, EdgeDesc, EdgeDir};
pub use error::{ConfigError, GraphError, GraphResult, LoadError};
pub use overlap::{Match, Overlap};
pub use overlap_map::{construct_complete_overlap_map, EdgeDescOverlapMap};
pub use partition::{construct_partitioned_overlap_map, simplify_graph, PartitionedOverlaps};
pub use remodel::{excise_vertex, remodel_vertex_for_excision};
pub use seq_coord::SeqCoord;
pub use string_graph::{Edge, EdgeId, GraphParams, StringGraph, Vertex, VertexId};
