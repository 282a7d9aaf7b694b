//! Loading contigs and their adjacencies into a [`StringGraph`].
//!
//! Contigs come from FASTA. Adjacencies are whitespace-separated records
//! `from to dir comp`, where `dir` is 0 (sense) or 1 (antisense) and `comp`
//! is 0 (same strand) or 1 (reverse complement). Adjacent contigs of a
//! de Bruijn assembly with k-mer size `k` overlap by exactly `k - 1` bases.

use crate::edge::{correct_dir, EdgeComp, EdgeDesc, EdgeDir};
use crate::error::LoadError;
use crate::overlap::Overlap;
use crate::string_graph::{GraphParams, StringGraph};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub id: String,
    pub sequence: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRecord {
    pub line: usize,
    pub from: String,
    pub to: String,
    pub dir: EdgeDir,
    pub comp: EdgeComp,
}

/// Parse FASTA records. Header text after the first whitespace is dropped.
pub fn read_fasta<R: BufRead>(reader: R) -> std::io::Result<Vec<Contig>> {
    let mut contigs = Vec::new();
    let mut id: Option<String> = None;
    let mut data = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(id_val) = id.take() {
                contigs.push(Contig {
                    id: id_val,
                    sequence: std::mem::take(&mut data),
                });
            }
            id = Some(header.split_whitespace().next().unwrap_or_default().to_string());
        } else if id.is_some() {
            data.extend_from_slice(line.as_bytes());
        }
    }
    if let Some(id_val) = id {
        contigs.push(Contig {
            id: id_val,
            sequence: data,
        });
    }
    Ok(contigs)
}

pub fn load_contigs(path: impl AsRef<Path>) -> Result<Vec<Contig>, LoadError> {
    let file = File::open(path)?;
    Ok(read_fasta(BufReader::new(file))?)
}

/// Parse adjacency records. Blank lines and `#` comments are skipped;
/// `label` names the source in error messages.
pub fn read_adjacency<R: BufRead>(reader: R, label: &str) -> Result<Vec<AdjacencyRecord>, LoadError> {
    let malformed = |line: usize, message: String| LoadError::Malformed {
        path: label.to_string(),
        line,
        message,
    };

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(malformed(
                line_no,
                format!("expected 4 fields (from to dir comp), found {}", fields.len()),
            ));
        }
        let dir = fields[2]
            .parse::<u8>()
            .ok()
            .and_then(EdgeDir::from_index)
            .ok_or_else(|| malformed(line_no, format!("invalid direction '{}'", fields[2])))?;
        let comp = fields[3]
            .parse::<u8>()
            .ok()
            .and_then(EdgeComp::from_index)
            .ok_or_else(|| malformed(line_no, format!("invalid complement flag '{}'", fields[3])))?;

        records.push(AdjacencyRecord {
            line: line_no,
            from: fields[0].to_string(),
            to: fields[1].to_string(),
            dir,
            comp,
        });
    }
    Ok(records)
}

pub fn load_adjacency(path: impl AsRef<Path>) -> Result<Vec<AdjacencyRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_adjacency(BufReader::new(file), &path.display().to_string())
}

/// Build a graph from contigs and adjacency records whose overlaps are all
/// `overlap_len` bases long. A record whose edge already exists, typically
/// the same adjacency listed from the other contig, is skipped.
pub fn build_graph(
    contigs: Vec<Contig>,
    records: &[AdjacencyRecord],
    overlap_len: usize,
    params: GraphParams,
    label: &str,
) -> Result<StringGraph, LoadError> {
    let mut graph = StringGraph::new(params);
    for contig in contigs {
        if graph.vertex_by_name(&contig.id).is_some() {
            return Err(LoadError::DuplicateContig(contig.id));
        }
        graph.add_vertex(contig.id, contig.sequence);
    }

    let mut skipped = 0;
    for record in records {
        let lookup = |name: &str| {
            graph
                .vertex_by_name(name)
                .map(|v| (v.id(), v.len()))
                .ok_or_else(|| LoadError::UnknownContig {
                    path: label.to_string(),
                    line: record.line,
                    name: name.to_string(),
                })
        };
        let (x, x_len) = lookup(&record.from)?;
        let (y, y_len) = lookup(&record.to)?;

        if overlap_len == 0 || overlap_len > x_len || overlap_len > y_len {
            return Err(LoadError::Malformed {
                path: label.to_string(),
                line: record.line,
                message: format!(
                    "overlap of {} bases does not fit {} ({}) and {} ({})",
                    overlap_len, record.from, x_len, record.to, y_len
                ),
            });
        }

        let desc = EdgeDesc::new(y, record.dir, record.comp);
        if graph.find_edge(x, &desc).is_some() {
            skipped += 1;
            continue;
        }

        let overlap = Overlap::from_adjacency((x, x_len), (y, y_len), record.dir, record.comp, overlap_len);
        let dir_yx = correct_dir(record.dir, record.comp).flip();
        graph.add_edge_pair(overlap, record.dir, dir_yx, record.comp)?;
    }
    debug!("[loader] skipped {} duplicate adjacency records", skipped);

    graph.validate()?;
    Ok(graph)
}

/// Load contigs and adjacencies for k-mer size `kmer`.
pub fn load_graph(
    contigs_path: impl AsRef<Path>,
    adjacency_path: impl AsRef<Path>,
    kmer: usize,
    params: GraphParams,
) -> Result<StringGraph, LoadError> {
    let adjacency_path = adjacency_path.as_ref();
    let contigs = load_contigs(contigs_path)?;
    let records = load_adjacency(adjacency_path)?;
    let graph = build_graph(
        contigs,
        &records,
        kmer.saturating_sub(1),
        params,
        &adjacency_path.display().to_string(),
    )?;
    info!(
        "Loaded {} contigs and {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );
    Ok(graph)
}
