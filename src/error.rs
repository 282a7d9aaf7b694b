//! Error types for graph mutation and loading.

use crate::string_graph::{EdgeId, VertexId};
use thiserror::Error;

pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),

    /// One sequence of the overlap lies inside the other
    #[error("overlap between {0} and {1} is a containment")]
    ContainedOverlap(VertexId, VertexId),

    /// The overlap does not reach an end of one of its sequences
    #[error("overlap between {0} and {1} is not a dovetail")]
    UndirectedOverlap(VertexId, VertexId),

    #[error("inconsistent graph: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}:{line}: {message}")]
    Malformed {
        path: String,
        line: usize,
        message: String,
    },

    #[error("{path}:{line}: unknown contig '{name}'")]
    UnknownContig {
        path: String,
        line: usize,
        name: String,
    },

    #[error("duplicate contig '{0}'")]
    DuplicateContig(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Invalid command-line settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("k-mer size must be positive")]
    ZeroKmer,

    #[error("max error rate must be within [0, 1], got {0}")]
    ErrorRateOutOfRange(f64),
}
