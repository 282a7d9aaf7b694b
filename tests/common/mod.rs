#![allow(dead_code)]

use sgsimplify::overlap::{Match, Overlap};
use sgsimplify::seq_coord::SeqCoord;
use sgsimplify::sequence::reverse_complement;
use sgsimplify::string_graph::{GraphParams, StringGraph, VertexId};

/// Deterministic pseudo-random genome
pub fn genome(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            b"ACGT"[(state >> 62) as usize]
        })
        .collect()
}

/// A read sampled from the genome at `start`, optionally stored on the
/// reverse strand.
#[derive(Debug, Clone, Copy)]
pub struct Read {
    pub start: usize,
    pub len: usize,
    pub reverse: bool,
}

impl Read {
    pub fn fwd(start: usize, len: usize) -> Self {
        Read { start, len, reverse: false }
    }

    pub fn rev(start: usize, len: usize) -> Self {
        Read { start, len, reverse: true }
    }

    fn end(&self) -> usize {
        self.start + self.len
    }

    /// Read-local coordinates of the genome interval `[a, b)`.
    fn local(&self, a: usize, b: usize) -> SeqCoord {
        if self.reverse {
            SeqCoord::new(self.end() - b, self.end() - 1 - a, self.len)
        } else {
            SeqCoord::new(a - self.start, b - 1 - self.start, self.len)
        }
    }
}

/// Overlap between two reads from their genome positions, if they share at
/// least one base.
pub fn read_overlap(ids: (VertexId, VertexId), r1: &Read, r2: &Read) -> Option<Overlap> {
    let a = r1.start.max(r2.start);
    let b = r1.end().min(r2.end());
    if a >= b {
        return None;
    }
    Some(Overlap::new(
        ids.0,
        ids.1,
        Match::new(r1.local(a, b), r2.local(a, b), r1.reverse != r2.reverse),
    ))
}

/// Copy of `genome` with the base at `pos` substituted.
pub fn mutate(genome: &[u8], pos: usize) -> Vec<u8> {
    let mut out = genome.to_vec();
    out[pos] = if out[pos] == b'A' { b'C' } else { b'A' };
    out
}

pub fn add_read(graph: &mut StringGraph, name: &str, genome: &[u8], read: &Read) -> VertexId {
    let seq = &genome[read.start..read.end()];
    let seq = if read.reverse {
        reverse_complement(seq)
    } else {
        seq.to_vec()
    };
    graph.add_vertex(name, seq)
}

pub fn add_reads(graph: &mut StringGraph, genome: &[u8], reads: &[Read]) -> Vec<VertexId> {
    reads
        .iter()
        .enumerate()
        .map(|(i, r)| add_read(graph, &format!("r{i}"), genome, r))
        .collect()
}

/// Connect reads `i` and `j` with the overlap their positions imply.
pub fn connect(graph: &mut StringGraph, ids: &[VertexId], reads: &[Read], i: usize, j: usize) {
    let ovr = read_overlap((ids[i], ids[j]), &reads[i], &reads[j])
        .unwrap_or_else(|| panic!("reads {i} and {j} do not overlap"));
    graph.create_edges(&ovr, false).unwrap();
}

/// Graph with an edge between every pair of overlapping reads.
pub fn all_pairs_graph(
    genome: &[u8],
    reads: &[Read],
    params: GraphParams,
) -> (StringGraph, Vec<VertexId>) {
    let mut graph = StringGraph::new(params);
    let ids = add_reads(&mut graph, genome, reads);
    for i in 0..reads.len() {
        for j in i + 1..reads.len() {
            if read_overlap((ids[i], ids[j]), &reads[i], &reads[j]).is_some() {
                connect(&mut graph, &ids, reads, i, j);
            }
        }
    }
    (graph, ids)
}

/// Graph with edges only between consecutive reads.
pub fn chain_graph(
    genome: &[u8],
    reads: &[Read],
    params: GraphParams,
) -> (StringGraph, Vec<VertexId>) {
    let mut graph = StringGraph::new(params);
    let ids = add_reads(&mut graph, genome, reads);
    for i in 1..reads.len() {
        connect(&mut graph, &ids, reads, i - 1, i);
    }
    (graph, ids)
}

pub fn params(min_overlap: usize, max_error_rate: f64) -> GraphParams {
    GraphParams {
        min_overlap,
        max_error_rate,
    }
}
