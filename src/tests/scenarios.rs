use super::build_graph;
use crate::{Graph, GraphFactory, GraphKind, Repair};

/// Five nodes, each pointing at the four others.
fn fully_mutual(values: [u8; 5]) -> Graph<u8> {
    let edges: Vec<(usize, usize)> = (0..5)
        .flat_map(|i| (0..5).filter(move |&j| j != i).map(move |j| (i, j)))
        .collect();
    build_graph(&values, &edges)
}

#[test]
fn test_empty_graph() {
    let graph = Graph::<u8>::new();
    let repair = Repair::new();

    let compressed = repair.compress(graph.clone());
    assert!(compressed.is_empty());

    let restored = repair.decompress(&compressed).unwrap();
    assert!(restored.is_empty());
    assert_eq!(restored, graph);
}

#[test]
fn test_fully_mutual_graph() {
    let original = fully_mutual([1, 2, 3, 4, 5]);
    let repair = Repair::new();

    let compressed = repair.compress(original.clone());
    let restored = repair.decompress(&compressed).unwrap();

    assert!(restored.equivalent(&original));
    assert_eq!(restored.edge_count(), 20);
}

#[test]
fn test_fully_mutual_graph_with_repeated_values() {
    let original = fully_mutual([1, 1, 2, 2, 1]);
    let repair = Repair::new();

    let compressed = repair.compress(original.clone());
    assert!(compressed.stats().compression_nodes > 0);
    assert!(compressed.len() < original.len());

    let restored = repair.decompress(&compressed).unwrap();
    assert_eq!(restored.stats().compression_nodes, 0);
    assert!(restored.equivalent(&original));
}

#[test]
fn test_no_compression_nodes() {
    // 1 -> {2, 3, 4, 5}, 2 -> {1, 5}, 3 -> {1, 2}, 4 -> {3, 5}, 5 -> {}
    let original = build_graph(
        &[1, 2, 3, 4, 5],
        &[
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            (1, 0),
            (1, 4),
            (2, 0),
            (2, 1),
            (3, 2),
            (3, 4),
        ],
    );
    let repair = Repair::new();

    let compressed = repair.compress(original.clone());
    assert_eq!(compressed.stats().compression_nodes, 0);
    assert_eq!(compressed, original);

    let restored = repair.decompress(&compressed).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_multiple_compression_nodes() {
    // Two `1 -> 2` and two `2 -> 3` edges among six nodes.
    let original = build_graph(
        &[1, 2, 3, 1, 2, 3],
        &[(0, 1), (1, 2), (3, 4), (4, 5), (2, 3), (5, 0)],
    );
    let repair = Repair::new();

    let compressed = repair.compress(original.clone());
    assert!(compressed.stats().compression_nodes >= 2);

    let restored = repair.decompress(&compressed).unwrap();
    assert!(restored.equivalent(&original));
}

#[test]
fn test_multiple_runs_with_fresh_engines() {
    let original = fully_mutual([7, 7, 7, 7, 7]);

    let compressed = Repair::new().compress(original.clone());
    assert!(compressed.stats().depth >= 2);

    let restored = Repair::new().decompress(&compressed).unwrap();
    assert!(restored.equivalent(&original));
}

#[test]
fn test_compress_twice_then_decompress() {
    let original = build_graph(&[1, 2, 1, 2, 1, 2], &[(0, 1), (2, 3), (4, 5)]);
    let repair = Repair::new();

    let first = repair.compress(original.clone());
    let second = repair.compress(first);
    let restored = repair.decompress(&second).unwrap();
    assert!(restored.equivalent(&original));
}

#[test]
fn test_factory_graphs_round_trip() {
    for (kind, seed) in [
        (GraphKind::Generic, 1),
        (GraphKind::Complete, 2),
        (GraphKind::HubAndSpoke, 3),
    ] {
        let mut factory = GraphFactory::alphanumeric(kind, 12, seed);
        let mut graph = factory.build();
        factory.connect_randomly(&mut graph, 24).unwrap();
        let original = graph.clone();

        let repair = Repair::new();
        let compressed = repair.compress(graph);
        let restored = repair.decompress(&compressed).unwrap();
        assert!(restored.equivalent(&original), "{:?} graph failed", kind);
    }
}

#[test]
fn test_blank_factory_graphs_compress() {
    let mut factory = GraphFactory::blank(GraphKind::Complete, 6);
    let original = factory.build();

    let repair = Repair::new();
    let compressed = repair.compress(original.clone());
    assert!(compressed.len() < original.len());

    let restored = repair.decompress(&compressed).unwrap();
    assert!(restored.equivalent(&original));
}

#[test]
fn test_render_compressed() {
    let original = build_graph(&[1, 2, 1, 2], &[(0, 1), (2, 3)]);
    let compressed = Repair::new().compress(original);
    let rendered = compressed.to_string();
    assert_eq!(rendered.lines().count(), 2);
    assert!(rendered.starts_with("<1 2> #"));
}
