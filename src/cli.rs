use crate::error::ConfigError;
use crate::loader::load_graph;
use crate::partition::{partition_all, simplify_graph, PartitionReport, SimplifyStats};
use crate::string_graph::{GraphParams, StringGraph};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use serde::Serialize;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
#[command(name = "sgsimplify", version, about = "Transitive overlap reduction for assembly string graphs")]
pub struct Args {
    /// Contigs in FASTA format
    #[arg(value_name = "CONTIGS")]
    pub contigs: String,

    /// Adjacency records (from, to, dir, comp)
    #[arg(value_name = "ADJACENCY")]
    pub adjacency: String,

    /// K-mer size of the assembly; adjacent contigs overlap by k - 1 bases
    #[arg(short, long)]
    pub kmer: usize,

    /// Minimum overlap length [default: k - 1]
    #[arg(long)]
    pub min_overlap: Option<usize>,

    /// Maximum error rate of an inferred overlap (0.0-1.0)
    #[arg(short = 'e', long, default_value_t = 0.0)]
    pub max_error_rate: f64,

    /// Number of threads
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    #[arg(long, value_enum, default_value_t = Mode::Unique)]
    pub mode: Mode,

    /// Write JSON instead of tab-separated text
    #[arg(long)]
    pub json: bool,

    /// Verbose logging level: "trace", "debug", or "info"
    /// Without a value (--verbose or -v), defaults to "info"
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    pub verbose: Option<Option<LogLevel>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// List vertices with at most one edge at each end
    Unique,
    /// Remove transitive edges, then list unique vertices
    Simplify,
    /// Report the irreducible/transitive partition of every vertex
    Partition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            None => LevelFilter::Off,
            Some(None) => LevelFilter::Info,
            Some(Some(level)) => level.into(),
        }
    }
}

/// Thresholds and parallelism resolved from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimplifyConfig {
    pub max_error_rate: f64,
    pub min_overlap: usize,
    pub threads: usize,
}

impl SimplifyConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.kmer == 0 {
            return Err(ConfigError::ZeroKmer);
        }
        if !(0.0..=1.0).contains(&args.max_error_rate) {
            return Err(ConfigError::ErrorRateOutOfRange(args.max_error_rate));
        }
        Ok(SimplifyConfig {
            max_error_rate: args.max_error_rate,
            min_overlap: args.min_overlap.unwrap_or(args.kmer - 1),
            threads: args.threads.max(1),
        })
    }

    pub fn graph_params(&self) -> GraphParams {
        GraphParams {
            min_overlap: self.min_overlap,
            max_error_rate: self.max_error_rate,
        }
    }
}

fn unique_names(graph: &StringGraph) -> Vec<String> {
    graph
        .non_branching_vertices()
        .into_iter()
        .filter_map(|v| graph.vertex(v).map(|vx| vx.name().to_string()))
        .collect()
}

fn write_unique<W: Write>(out: &mut W, names: &[String]) -> std::io::Result<()> {
    for name in names {
        writeln!(out, "{}\tUNIQUE", name)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SimplifyOutput<'a> {
    config: &'a SimplifyConfig,
    stats: SimplifyStats,
    unique: Vec<String>,
}

/// Load the graph named by `args` and write the result of the selected mode
/// to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimplifyConfig::from_args(args)?;

    // Only initialize thread pool if not already initialized
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build_global();

    let mut graph = load_graph(&args.contigs, &args.adjacency, args.kmer, config.graph_params())?;

    match args.mode {
        Mode::Unique => {
            let names = unique_names(&graph);
            info!("{} of {} vertices are unique", names.len(), graph.num_vertices());
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &names)?;
                writeln!(out)?;
            } else {
                write_unique(out, &names)?;
            }
        }
        Mode::Simplify => {
            let stats = simplify_graph(&mut graph)?;
            let unique = unique_names(&graph);
            if args.json {
                let report = SimplifyOutput {
                    config: &config,
                    stats,
                    unique,
                };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                writeln!(
                    out,
                    "# {} vertices, {} edges, {} transitive edge pairs removed, {} edges left",
                    stats.vertices, stats.edges_before, stats.transitive_edges_removed, stats.edges_after
                )?;
                write_unique(out, &unique)?;
            }
        }
        Mode::Partition => {
            let reports: Vec<PartitionReport> =
                partition_all(&graph, config.max_error_rate, config.min_overlap)
                    .iter()
                    .map(|(v, p)| PartitionReport::new(&graph, *v, p))
                    .collect();
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &reports)?;
                writeln!(out)?;
            } else {
                for report in &reports {
                    let rows = report
                        .irreducible
                        .iter()
                        .map(|o| ("irreducible", o))
                        .chain(report.transitive.iter().map(|o| ("transitive", o)));
                    for (kind, o) in rows {
                        writeln!(
                            out,
                            "{}\t{}\t{}\t{}{}\t{}\t{:.4}",
                            report.vertex, kind, o.target, o.dir, o.comp, o.length, o.error_rate
                        )?;
                    }
                }
            }
        }
    }
    Ok(())
}
