mod common;

use common::{add_read, add_reads, chain_graph, connect, genome, mutate, params, Read};
use sgsimplify::edge::{EdgeComp, EdgeDesc, EdgeDir};
use sgsimplify::error::GraphError;
use sgsimplify::overlap_map::construct_complete_overlap_map;
use sgsimplify::remodel::{excise_edge, excise_vertex, remodel_vertex_for_excision};
use sgsimplify::string_graph::StringGraph;
use std::collections::BTreeSet;

#[test]
fn test_excision_keeps_only_long_enough_overlaps() {
    // V overlaps D by 80; through D it reaches E (60) and F (30).
    let g = genome(200, 1);
    let reads = [
        Read::fwd(0, 100),
        Read::fwd(20, 100),
        Read::fwd(40, 100),
        Read::fwd(70, 100),
    ];
    let mut graph = StringGraph::new(params(40, 0.0));
    let ids = add_reads(&mut graph, &g, &reads);
    connect(&mut graph, &ids, &reads, 0, 1);
    connect(&mut graph, &ids, &reads, 1, 2);
    connect(&mut graph, &ids, &reads, 1, 3);
    let (v, d, e) = (ids[0], ids[1], ids[2]);

    let doomed = graph.edges(v)[0].id();
    assert_eq!(graph.edge(doomed).unwrap().end(), d);
    let created = excise_edge(&mut graph, v, doomed).unwrap();

    assert_eq!(created.len(), 1);
    let edge = graph.edge(created[0]).unwrap();
    assert_eq!(edge.desc(), EdgeDesc::new(e, EdgeDir::Sense, EdgeComp::Same));
    assert_eq!(edge.overlap().overlap_length(0), 60);

    let targets: Vec<_> = graph.edges(v).iter().map(|e| e.end()).collect();
    assert_eq!(targets, vec![e]);
    assert!(graph.validate().is_ok());
}

#[test]
fn test_excision_drops_noisy_overlaps() {
    // E has one substitution inside its 60 base overlap with V.
    let g = genome(200, 6);
    let noisy = mutate(&g, 50);
    let reads = [Read::fwd(0, 100), Read::fwd(20, 100), Read::fwd(40, 100)];

    for (max_error_rate, expected) in [(0.01, 0), (0.02, 1)] {
        let mut graph = StringGraph::new(params(40, max_error_rate));
        let ids = vec![
            add_read(&mut graph, "v", &g, &reads[0]),
            add_read(&mut graph, "d", &g, &reads[1]),
            add_read(&mut graph, "e", &noisy, &reads[2]),
        ];
        connect(&mut graph, &ids, &reads, 0, 1);
        connect(&mut graph, &ids, &reads, 1, 2);

        let doomed = graph.edges(ids[0])[0].id();
        let created = remodel_vertex_for_excision(&mut graph, ids[0], doomed).unwrap();
        assert_eq!(created.len(), expected, "max error rate {max_error_rate}");
        for id in created {
            assert_eq!(graph.edge(id).unwrap().end(), ids[2]);
        }
    }
}

#[test]
fn test_excision_across_strands() {
    let g = genome(200, 2);
    let reads = [Read::fwd(0, 80), Read::rev(20, 80), Read::fwd(40, 80)];
    let (mut graph, ids) = chain_graph(&g, &reads, params(20, 0.0));

    let doomed = graph.edges(ids[0])[0].id();
    let created = remodel_vertex_for_excision(&mut graph, ids[0], doomed).unwrap();
    assert_eq!(created.len(), 1);
    let edge = graph.edge(created[0]).unwrap();
    assert_eq!(edge.desc(), EdgeDesc::new(ids[2], EdgeDir::Sense, EdgeComp::Same));
    assert_eq!(edge.overlap().overlap_length(0), 40);

    let overlap = *edge.overlap();
    assert_eq!(
        overlap.count_differences(graph.sequence(ids[0]), graph.sequence(ids[2])),
        0
    );
}

fn reachable(graph: &StringGraph, v: sgsimplify::VertexId, min_len: usize) -> BTreeSet<EdgeDesc> {
    construct_complete_overlap_map(graph, v, 0.0, min_len)
        .into_keys()
        .collect()
}

#[test]
fn test_vertex_excision_preserves_reachability() {
    let g = genome(200, 3);
    let reads: Vec<_> = (0..6).map(|i| Read::fwd(i * 10, 40)).collect();
    let (mut graph, ids) = chain_graph(&g, &reads, params(10, 0.0));

    let gone = ids[2];
    let before: Vec<_> = ids
        .iter()
        .map(|&v| reachable(&graph, v, 10))
        .collect();

    excise_vertex(&mut graph, gone).unwrap();
    assert!(graph.vertex(gone).is_none());
    assert!(graph.validate().is_ok());

    for (i, &v) in ids.iter().enumerate() {
        if v == gone {
            continue;
        }
        let expected: BTreeSet<_> = before[i].iter().filter(|ed| ed.vertex != gone).copied().collect();
        assert_eq!(reachable(&graph, v, 10), expected, "vertex {v}");
    }
}

#[test]
fn test_excise_unknown_vertex() {
    let g = genome(100, 4);
    let reads = [Read::fwd(0, 40), Read::fwd(10, 40)];
    let (mut graph, ids) = chain_graph(&g, &reads, params(10, 0.0));
    excise_vertex(&mut graph, ids[1]).unwrap();
    assert!(matches!(
        excise_vertex(&mut graph, ids[1]),
        Err(GraphError::UnknownVertex(v)) if v == ids[1]
    ));
    assert!(graph.edges(ids[0]).is_empty());
}
